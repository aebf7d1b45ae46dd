//! Graduation gate for an asset's transferability.
//!
//! ```text
//!   ┌────────────┐  foundry graduates  ┌──────────────┐
//!   │ RESTRICTED ├────────────────────▶│ UNRESTRICTED │
//!   └────────────┘                     └──────────────┘
//! ```
//!
//! The transition is one-way. Only the foundry collaborator may trigger it.

use serde::{Deserialize, Serialize};

/// Whether transfers of an asset are currently subject to restriction checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransferGate {
    /// Pre-graduation: recipients are checked against the restriction source,
    /// and no new spending authorizations may be created.
    #[default]
    Restricted,
    /// Post-graduation: all checks pass. **Terminal.**
    Unrestricted,
}

impl TransferGate {
    /// Can the gate move to the given target state?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Restricted, Self::Unrestricted))
    }

    #[must_use]
    pub fn is_restricted(&self) -> bool {
        *self == Self::Restricted
    }
}

impl std::fmt::Display for TransferGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Restricted => write!(f, "RESTRICTED"),
            Self::Unrestricted => write!(f, "UNRESTRICTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_restricted() {
        assert_eq!(TransferGate::default(), TransferGate::Restricted);
        assert!(TransferGate::default().is_restricted());
    }

    #[test]
    fn only_forward_transition_is_legal() {
        assert!(TransferGate::Restricted.can_transition_to(TransferGate::Unrestricted));
        assert!(!TransferGate::Unrestricted.can_transition_to(TransferGate::Restricted));
        assert!(!TransferGate::Unrestricted.can_transition_to(TransferGate::Unrestricted));
        assert!(!TransferGate::Restricted.can_transition_to(TransferGate::Restricted));
    }

    #[test]
    fn display() {
        assert_eq!(TransferGate::Restricted.to_string(), "RESTRICTED");
        assert_eq!(TransferGate::Unrestricted.to_string(), "UNRESTRICTED");
    }
}
