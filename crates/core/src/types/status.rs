//! Order lifecycle status and its transition rules.

use serde::{Deserialize, Serialize};

/// Order fulfillment lifecycle status.
///
/// Every order is created as [`OrderStatus::Pending`] and may move to exactly
/// one of the terminal states. No transition leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Initial state, assigned at creation.
    #[default]
    Pending,
    /// Terminal: the order was fulfilled.
    Completed,
    /// Terminal: the order was turned down.
    Rejected,
}

/// Error returned for an illegal order status change.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot change order status from {from} to {to}")]
pub struct InvalidTransition {
    /// Current status of the order.
    pub from: OrderStatus,
    /// Status the caller attempted to set.
    pub to: OrderStatus,
}

impl OrderStatus {
    /// Whether no further transition is permitted from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    /// Check a transition from `self` to `next`.
    ///
    /// Re-applying the current status is accepted as a no-op; any other
    /// change away from a terminal status is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] if `self` is terminal and `next` differs.
    pub const fn check_transition(self, next: Self) -> Result<(), InvalidTransition> {
        if self as u8 == next as u8 {
            return Ok(());
        }
        if self.is_terminal() {
            return Err(InvalidTransition {
                from: self,
                to: next,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
