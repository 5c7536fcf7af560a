//! # Machine Client
//!
//! Cloneable handle to the [`MachineActor`](crate::actor::MachineActor). Every method sends
//! one request and waits for the reply, so callers never touch a machine directly.

use crate::actions::{MachineAction, MachineActionResult};
use crate::error::ServiceError;
use crate::message::{MachineRequest, Response};
use crate::model::MachineId;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};
use vending_core::{MachineConfig, MachineStatus, PurchaseOutcome, RefundOutcome, Selection};

#[derive(Clone)]
pub struct MachineClient {
    sender: mpsc::Sender<MachineRequest>,
}

impl MachineClient {
    pub fn new(sender: mpsc::Sender<MachineRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> MachineRequest,
    ) -> Result<T, ServiceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ServiceError::ActorClosed)?;
        response.await.map_err(|_| ServiceError::ActorDropped)?
    }

    async fn perform_action(
        &self,
        id: MachineId,
        action: MachineAction,
    ) -> Result<MachineActionResult, ServiceError> {
        self.request(|respond_to| MachineRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Brings a new machine into service and returns its id.
    #[instrument(skip(self, config))]
    pub async fn commission(&self, config: MachineConfig) -> Result<MachineId, ServiceError> {
        debug!("Sending request");
        self.request(|respond_to| MachineRequest::Commission { config, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn status(&self, id: MachineId) -> Result<MachineStatus, ServiceError> {
        debug!("Sending request");
        self.request(|respond_to| MachineRequest::Status { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn select_product(
        &self,
        id: MachineId,
        product_id: &str,
    ) -> Result<Selection, ServiceError> {
        debug!("Sending request");
        match self
            .perform_action(id, MachineAction::SelectProduct(product_id.to_string()))
            .await?
        {
            MachineActionResult::SelectProduct(selection) => Ok(selection),
            other => Err(unexpected(other)),
        }
    }

    /// Inserts a coin by face value and returns the running total.
    #[instrument(skip(self))]
    pub async fn insert_coin(&self, id: MachineId, value: u32) -> Result<u32, ServiceError> {
        debug!("Sending request");
        match self
            .perform_action(id, MachineAction::InsertCoin(value))
            .await?
        {
            MachineActionResult::InsertCoin(total) => Ok(total),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn purchase(&self, id: MachineId) -> Result<PurchaseOutcome, ServiceError> {
        debug!("Sending request");
        match self.perform_action(id, MachineAction::Purchase).await? {
            MachineActionResult::Purchase(outcome) => Ok(outcome),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: MachineId) -> Result<RefundOutcome, ServiceError> {
        debug!("Sending request");
        match self.perform_action(id, MachineAction::Cancel).await? {
            MachineActionResult::Cancel(refund) => Ok(refund),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, config))]
    pub async fn reset(&self, id: MachineId, config: MachineConfig) -> Result<(), ServiceError> {
        debug!("Sending request");
        self.request(|respond_to| MachineRequest::Reset {
            id,
            config,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn set_coin_count(
        &self,
        id: MachineId,
        value: u32,
        count: u32,
    ) -> Result<(), ServiceError> {
        debug!("Sending request");
        match self
            .perform_action(id, MachineAction::SetCoinCount { value, count })
            .await?
        {
            MachineActionResult::SetCoinCount(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Adds stock to a product and returns the new level.
    #[instrument(skip(self))]
    pub async fn restock(
        &self,
        id: MachineId,
        product_id: &str,
        quantity: u32,
    ) -> Result<u32, ServiceError> {
        debug!("Sending request");
        let action = MachineAction::Restock {
            product_id: product_id.to_string(),
            quantity,
        };
        match self.perform_action(id, action).await? {
            MachineActionResult::Restock(stock) => Ok(stock),
            other => Err(unexpected(other)),
        }
    }

    /// Overrides a product's stock level and returns it.
    #[instrument(skip(self))]
    pub async fn set_stock(
        &self,
        id: MachineId,
        product_id: &str,
        count: u32,
    ) -> Result<u32, ServiceError> {
        debug!("Sending request");
        let action = MachineAction::SetStock {
            product_id: product_id.to_string(),
            count,
        };
        match self.perform_action(id, action).await? {
            MachineActionResult::SetStock(stock) => Ok(stock),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn decommission(&self, id: MachineId) -> Result<(), ServiceError> {
        debug!("Sending request");
        self.request(|respond_to| MachineRequest::Decommission { id, respond_to })
            .await
    }

    /// Selects `product_id`, inserts `coins` in order and purchases.
    ///
    /// The steps are separate requests. If any of them is refused the coins inserted so
    /// far stay in the machine's open transaction, exactly as they would for a customer
    /// standing at it.
    #[instrument(skip(self))]
    pub async fn buy(
        &self,
        id: MachineId,
        product_id: &str,
        coins: &[u32],
    ) -> Result<PurchaseOutcome, ServiceError> {
        self.select_product(id, product_id).await?;
        for &coin in coins {
            self.insert_coin(id, coin).await?;
        }
        self.purchase(id).await
    }
}

fn unexpected(result: MachineActionResult) -> ServiceError {
    ServiceError::UnexpectedResponse(format!("{result:?}"))
}
