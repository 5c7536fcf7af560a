//! # Mock Utilities
//!
//! Helpers for testing code that talks to a [`MachineClient`] without running the real
//! [`MachineActor`](crate::actor::MachineActor).
//!
//! Two styles are offered:
//!
//! - [`create_mock_client`] plus the `expect_*` functions hand each raw request to the
//!   test, which inspects it and answers through the responder.
//! - [`MockClient`] answers from a queue of canned responses set up in advance and
//!   checks that they were all consumed with [`MockClient::verify`].

use crate::actions::{MachineAction, MachineActionResult};
use crate::client::MachineClient;
use crate::error::ServiceError;
use crate::message::{MachineRequest, Response};
use crate::model::MachineId;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use vending_core::{MachineConfig, MachineStatus};

enum Expectation {
    Commission {
        response: Result<MachineId, ServiceError>,
    },
    Status {
        id: MachineId,
        response: Result<MachineStatus, ServiceError>,
    },
    Reset {
        id: MachineId,
        response: Result<(), ServiceError>,
    },
    Decommission {
        id: MachineId,
        response: Result<(), ServiceError>,
    },
    Action {
        id: MachineId,
        response: Result<MachineActionResult, ServiceError>,
    },
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

pub struct MockClient {
    client: MachineClient,
    expectations: Expectations,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClient {
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<MachineRequest>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        MachineRequest::Commission { respond_to, .. },
                        Some(Expectation::Commission { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        MachineRequest::Status { id, respond_to },
                        Some(Expectation::Status {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Status for unexpected machine");
                        let _ = respond_to.send(response);
                    }
                    (
                        MachineRequest::Reset { id, respond_to, .. },
                        Some(Expectation::Reset {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Reset for unexpected machine");
                        let _ = respond_to.send(response);
                    }
                    (
                        MachineRequest::Decommission { id, respond_to },
                        Some(Expectation::Decommission {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Decommission for unexpected machine");
                        let _ = respond_to.send(response);
                    }
                    (
                        MachineRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Action for unexpected machine");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: MachineClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> MachineClient {
        self.client.clone()
    }

    pub fn expect_commission(&mut self) -> CommissionExpectationBuilder {
        CommissionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_status(&mut self, id: MachineId) -> StatusExpectationBuilder {
        StatusExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_reset(&mut self, id: MachineId) -> UnitExpectationBuilder {
        UnitExpectationBuilder {
            id,
            kind: UnitRequest::Reset,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_decommission(&mut self, id: MachineId) -> UnitExpectationBuilder {
        UnitExpectationBuilder {
            id,
            kind: UnitRequest::Decommission,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_action(&mut self, id: MachineId) -> ActionExpectationBuilder {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any queued response was never requested.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

pub struct CommissionExpectationBuilder {
    expectations: Expectations,
}

impl CommissionExpectationBuilder {
    pub fn return_ok(self, id: MachineId) {
        self.push(Ok(id));
    }

    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<MachineId, ServiceError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Commission { response });
    }
}

pub struct StatusExpectationBuilder {
    id: MachineId,
    expectations: Expectations,
}

impl StatusExpectationBuilder {
    pub fn return_ok(self, status: MachineStatus) {
        self.push(Ok(status));
    }

    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<MachineStatus, ServiceError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Status {
                id: self.id,
                response,
            });
    }
}

enum UnitRequest {
    Reset,
    Decommission,
}

/// Builds an expectation for a request that answers with `()`.
pub struct UnitExpectationBuilder {
    id: MachineId,
    kind: UnitRequest,
    expectations: Expectations,
}

impl UnitExpectationBuilder {
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), ServiceError>) {
        let id = self.id;
        let expectation = match self.kind {
            UnitRequest::Reset => Expectation::Reset { id, response },
            UnitRequest::Decommission => Expectation::Decommission { id, response },
        };
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

pub struct ActionExpectationBuilder {
    id: MachineId,
    expectations: Expectations,
}

impl ActionExpectationBuilder {
    pub fn return_ok(self, result: MachineActionResult) {
        self.push(Ok(result));
    }

    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<MachineActionResult, ServiceError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action {
                id: self.id,
                response,
            });
    }
}

/// A client wired to a bare channel, so a test can play the actor itself.
pub fn create_mock_client(buffer_size: usize) -> (MachineClient, mpsc::Receiver<MachineRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MachineClient::new(sender), receiver)
}

pub async fn expect_commission(
    receiver: &mut mpsc::Receiver<MachineRequest>,
) -> Option<(MachineConfig, Response<MachineId>)> {
    match receiver.recv().await {
        Some(MachineRequest::Commission { config, respond_to }) => Some((config, respond_to)),
        _ => None,
    }
}

pub async fn expect_status(
    receiver: &mut mpsc::Receiver<MachineRequest>,
) -> Option<(MachineId, Response<MachineStatus>)> {
    match receiver.recv().await {
        Some(MachineRequest::Status { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_action(
    receiver: &mut mpsc::Receiver<MachineRequest>,
) -> Option<(MachineId, MachineAction, Response<MachineActionResult>)> {
    match receiver.recv().await {
        Some(MachineRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
