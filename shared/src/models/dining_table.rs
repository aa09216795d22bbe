//! Dining Table Model

use crate::error::{ValidationError, ValidationResult, require_min};
use crate::models::Waiter;
use crate::types::{TableId, WaiterId};
use serde::{Deserialize, Serialize};

/// Dining table entity
///
/// `cleared` means the tab is settled and holds no active orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: TableId,
    /// Number printed on the physical table
    pub number: u32,
    #[serde(alias = "waiterid")]
    pub waiter_id: WaiterId,
    #[serde(default)]
    pub cleared: bool,
    /// Waiter display name, when the server joins it in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Lifecycle state of a table tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Active,
    Cleared,
}

impl DiningTable {
    pub fn status(&self) -> TableStatus {
        if self.cleared {
            TableStatus::Cleared
        } else {
            TableStatus::Active
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Cleared => write!(f, "cleared"),
        }
    }
}

/// Open a tab on a table (`POST /create-waiter-tab`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCreate {
    pub number: u32,
    pub waiter_id: WaiterId,
}

impl TabCreate {
    /// Checks that need no server data
    pub fn validate_fields(&self) -> ValidationResult {
        require_min(i64::from(self.number), 1, "number")
    }

    /// Field checks, and the waiter must be one of `waiters`
    pub fn validate(&self, waiters: &[Waiter]) -> ValidationResult {
        self.validate_fields()?;
        if !waiters.iter().any(|w| w.id == self.waiter_id) {
            return Err(ValidationError::UnknownWaiter(self.waiter_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_defaults_to_active() {
        let table: DiningTable =
            serde_json::from_str(r#"{"id":5,"number":12,"waiterId":2,"name":"Ada"}"#).unwrap();
        assert_eq!(table.status(), TableStatus::Active);
        assert_eq!(table.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_lowercase_waiter_alias() {
        let table: DiningTable =
            serde_json::from_str(r#"{"id":5,"number":12,"waiterid":2,"cleared":true}"#).unwrap();
        assert_eq!(table.waiter_id, 2);
        assert_eq!(table.status(), TableStatus::Cleared);
    }

    #[test]
    fn test_tab_requires_known_waiter() {
        let waiters = vec![Waiter {
            id: 1,
            name: "Ada".into(),
        }];
        let tab = TabCreate {
            number: 4,
            waiter_id: 1,
        };
        assert!(tab.validate(&waiters).is_ok());

        let orphan = TabCreate {
            number: 4,
            waiter_id: 9,
        };
        assert_eq!(
            orphan.validate(&waiters),
            Err(ValidationError::UnknownWaiter(9))
        );

        let zero = TabCreate {
            number: 0,
            waiter_id: 1,
        };
        assert!(zero.validate(&waiters).is_err());
    }
}
