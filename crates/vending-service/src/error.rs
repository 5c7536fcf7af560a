use crate::model::MachineId;
use vending_core::VendingError;

/// Failures seen by callers of [`MachineClient`](crate::client::MachineClient).
///
/// Transport problems and unknown machines are reported next to the domain refusals
/// that come back from the machine itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ServiceError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Machine not found: {0}")]
    MachineNotFound(MachineId),
    #[error("Unexpected response from actor: {0}")]
    UnexpectedResponse(String),
    #[error(transparent)]
    Vending(#[from] VendingError),
}

impl ServiceError {
    /// The domain refusal, if that is what this is.
    pub fn vending(&self) -> Option<&VendingError> {
        match self {
            ServiceError::Vending(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vending_error_is_transparent() {
        let err = ServiceError::from(VendingError::NoProductSelected);
        assert_eq!(err.to_string(), VendingError::NoProductSelected.to_string());
        assert_eq!(err.vending(), Some(&VendingError::NoProductSelected));
    }

    #[test]
    fn test_transport_errors_have_no_domain_cause() {
        assert_eq!(ServiceError::ActorClosed.vending(), None);
        assert_eq!(
            ServiceError::MachineNotFound(MachineId(4)).to_string(),
            "Machine not found: machine_4"
        );
    }
}
