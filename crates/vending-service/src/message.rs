use crate::actions::{MachineAction, MachineActionResult};
use crate::error::ServiceError;
use crate::model::MachineId;
use tokio::sync::oneshot;
use vending_core::{MachineConfig, MachineStatus};

pub type Response<T> = oneshot::Sender<Result<T, ServiceError>>;

/// Requests understood by the [`MachineActor`](crate::actor::MachineActor).
#[derive(Debug)]
pub enum MachineRequest {
    Commission {
        config: MachineConfig,
        respond_to: Response<MachineId>,
    },
    Status {
        id: MachineId,
        respond_to: Response<MachineStatus>,
    },
    /// Replaces catalog and coins and abandons the open transaction.
    Reset {
        id: MachineId,
        config: MachineConfig,
        respond_to: Response<()>,
    },
    Decommission {
        id: MachineId,
        respond_to: Response<()>,
    },
    Action {
        id: MachineId,
        action: MachineAction,
        respond_to: Response<MachineActionResult>,
    },
}
