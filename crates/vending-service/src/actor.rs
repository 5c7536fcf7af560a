//! # Machine Actor
//!
//! Hosts any number of [`VendingMachine`]s behind a single task. Requests arrive on a
//! bounded channel and are handled one at a time, so every purchase runs its whole
//! check-compute-commit sequence before the next request for that machine is looked at.
//! Machines are owned by the actor and never shared, which is why nothing here needs a
//! lock.

use crate::client::MachineClient;
use crate::error::ServiceError;
use crate::message::MachineRequest;
use crate::model::MachineId;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use vending_core::VendingMachine;

pub struct MachineActor {
    receiver: mpsc::Receiver<MachineRequest>,
    machines: HashMap<MachineId, VendingMachine>,
    next_id: u32,
}

impl MachineActor {
    pub fn new(buffer_size: usize) -> (Self, MachineClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            machines: HashMap::new(),
            next_id: 1,
        };
        let client = MachineClient::new(sender);
        (actor, client)
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!("Machine actor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg);
        }

        info!(size = self.machines.len(), "Shutdown");
    }

    fn handle(&mut self, msg: MachineRequest) {
        match msg {
            MachineRequest::Commission { config, respond_to } => {
                debug!(products = config.product_list.len(), "Commission");
                match VendingMachine::new(config) {
                    Ok(machine) => {
                        let id = MachineId::from(self.next_id);
                        self.next_id += 1;
                        self.machines.insert(id, machine);
                        info!(%id, size = self.machines.len(), "Commissioned");
                        let _ = respond_to.send(Ok(id));
                    }
                    Err(e) => {
                        warn!(error = %e, "Commission failed");
                        let _ = respond_to.send(Err(e.into()));
                    }
                }
            }
            MachineRequest::Status { id, respond_to } => {
                let status = self.machines.get(&id).map(VendingMachine::status);
                debug!(%id, found = status.is_some(), "Status");
                let _ = respond_to.send(status.ok_or(ServiceError::MachineNotFound(id)));
            }
            MachineRequest::Reset {
                id,
                config,
                respond_to,
            } => {
                debug!(%id, "Reset");
                let result = match self.machines.get_mut(&id) {
                    Some(machine) => machine.reset(config).map_err(ServiceError::from),
                    None => Err(ServiceError::MachineNotFound(id)),
                };
                match &result {
                    Ok(()) => info!(%id, "Reset"),
                    Err(e) => warn!(%id, error = %e, "Reset failed"),
                }
                let _ = respond_to.send(result);
            }
            MachineRequest::Decommission { id, respond_to } => {
                debug!(%id, "Decommission");
                if self.machines.remove(&id).is_some() {
                    info!(%id, size = self.machines.len(), "Decommissioned");
                    let _ = respond_to.send(Ok(()));
                } else {
                    warn!(%id, "Not found");
                    let _ = respond_to.send(Err(ServiceError::MachineNotFound(id)));
                }
            }
            MachineRequest::Action {
                id,
                action,
                respond_to,
            } => {
                debug!(%id, ?action, "Action");
                if let Some(machine) = self.machines.get_mut(&id) {
                    let result = action.apply(machine).map_err(ServiceError::from);
                    match &result {
                        Ok(_) => debug!(%id, "Action ok"),
                        Err(e) => warn!(%id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                } else {
                    warn!(%id, "Not found");
                    let _ = respond_to.send(Err(ServiceError::MachineNotFound(id)));
                }
            }
        }
    }
}
