use crate::actor::MachineActor;
use crate::client::MachineClient;
use tracing::{error, info};

const CHANNEL_BUFFER: usize = 32;

/// Runs the [`MachineActor`] on its own task and hands out the client to reach it.
///
/// ```ignore
/// let system = VendingSystem::new();
/// let id = system.client.commission(MachineConfig::default()).await?;
/// system.client.buy(id, "A2", &[200]).await?;
/// system.shutdown().await?;
/// ```
pub struct VendingSystem {
    pub client: MachineClient,
    handle: tokio::task::JoinHandle<()>,
}

impl VendingSystem {
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (actor, client) = MachineActor::new(CHANNEL_BUFFER);
        let handle = tokio::spawn(actor.run());
        Self { client, handle }
    }

    /// Drops the system's client and waits for the actor to drain its queue.
    ///
    /// Clones of the client handed out earlier keep the actor alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for VendingSystem {
    fn default() -> Self {
        Self::new()
    }
}
