use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle for a machine hosted by the [`MachineActor`](crate::actor::MachineActor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(pub u32);

impl From<u32> for MachineId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "machine_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(MachineId::from(7).to_string(), "machine_7");
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&MachineId(3)).unwrap(), "3");
    }
}
