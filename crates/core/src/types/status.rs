//! Order status state machine.
//!
//! An order is created as `pending` and only changes through two doors:
//! an admin update (validated by [`OrderStatus::validate_admin_target`]) or
//! a customer cancellation (validated by [`OrderStatus::validate_cancel`]).
//! Orders are never deleted.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Lifecycle stage of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Received,
    Completed,
    Rejected,
    Cancelled,
}

/// Whether admin updates may move an order backwards through the lifecycle.
///
/// The permissive default matches the long-observed behavior where an admin
/// can reopen a completed order by setting it back to `pending`. Deployments
/// that want a strict forward-only graph opt in via configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any admin-settable target is accepted regardless of the current state.
    #[default]
    AllowRegression,
    /// Admin updates may only move the order forward; terminal states are final.
    ForwardOnly,
}

/// Errors from validating an admin-initiated status update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderStatusError {
    /// The target is not one of the admin-settable statuses.
    #[error("invalid order status: {0}")]
    InvalidTarget(String),
    /// Forward-only policy rejected a backwards move.
    #[error("cannot move order from {from} back to {to}")]
    Regression {
        from: OrderStatus,
        to: OrderStatus,
    },
}

/// Errors from validating a customer-initiated cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CancelError {
    #[error("not your order")]
    NotOwner,
    #[error("only pending orders can be cancelled")]
    NotPending,
}

impl OrderStatus {
    /// Statuses an admin update may target. `cancelled` is customer-only.
    pub const ADMIN_TARGETS: [Self; 4] =
        [Self::Pending, Self::Received, Self::Completed, Self::Rejected];

    /// Whether this status ends the order's lifecycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Cancelled)
    }

    /// Canonical string form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Received => "received",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Position in the forward ordering, used by the forward-only policy.
    const fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Received => 1,
            Self::Completed | Self::Rejected | Self::Cancelled => 2,
        }
    }

    /// Validate an admin update from `self` to the raw `target` string.
    ///
    /// Returns the parsed target status on success.
    ///
    /// # Errors
    ///
    /// Returns `OrderStatusError::InvalidTarget` if `target` is not one of
    /// `pending`, `received`, `completed`, `rejected` (note: `cancelled` is
    /// not admin-settable). Under `TransitionPolicy::ForwardOnly`, returns
    /// `OrderStatusError::Regression` for backwards moves.
    pub fn validate_admin_target(
        self,
        target: &str,
        policy: TransitionPolicy,
    ) -> Result<Self, OrderStatusError> {
        let target: Self = target
            .parse()
            .map_err(|_| OrderStatusError::InvalidTarget(target.to_owned()))?;

        if !Self::ADMIN_TARGETS.contains(&target) {
            return Err(OrderStatusError::InvalidTarget(target.as_str().to_owned()));
        }

        if policy == TransitionPolicy::ForwardOnly && target.rank() < self.rank() {
            return Err(OrderStatusError::Regression {
                from: self,
                to: target,
            });
        }

        Ok(target)
    }

    /// Validate a customer cancellation of an order in state `self`.
    ///
    /// # Errors
    ///
    /// Returns `CancelError::NotOwner` if `caller` does not own the order,
    /// `CancelError::NotPending` if the order has left the `pending` state.
    pub fn validate_cancel(self, owner: UserId, caller: UserId) -> Result<(), CancelError> {
        if owner != caller {
            return Err(CancelError::NotOwner);
        }
        if self != Self::Pending {
            return Err(CancelError::NotPending);
        }
        Ok(())
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "received" => Ok(Self::Received),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

impl std::str::FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow-regression" => Ok(Self::AllowRegression),
            "forward-only" => Ok(Self::ForwardOnly),
            _ => Err(format!("invalid transition policy: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_targets_accepted_by_default_policy() {
        for target in ["pending", "received", "completed", "rejected"] {
            let result =
                OrderStatus::Completed.validate_admin_target(target, TransitionPolicy::default());
            assert!(result.is_ok(), "{target} should be accepted");
        }
    }

    #[test]
    fn test_bogus_target_rejected() {
        let err = OrderStatus::Pending
            .validate_admin_target("bogus", TransitionPolicy::AllowRegression)
            .unwrap_err();
        assert!(matches!(err, OrderStatusError::InvalidTarget(_)));
    }

    #[test]
    fn test_cancelled_is_not_admin_settable() {
        let err = OrderStatus::Pending
            .validate_admin_target("cancelled", TransitionPolicy::AllowRegression)
            .unwrap_err();
        assert!(matches!(err, OrderStatusError::InvalidTarget(_)));
    }

    #[test]
    fn test_regression_allowed_by_default() {
        let target = OrderStatus::Completed
            .validate_admin_target("pending", TransitionPolicy::AllowRegression)
            .unwrap();
        assert_eq!(target, OrderStatus::Pending);
    }

    #[test]
    fn test_forward_only_rejects_regression() {
        let err = OrderStatus::Completed
            .validate_admin_target("pending", TransitionPolicy::ForwardOnly)
            .unwrap_err();
        assert_eq!(
            err,
            OrderStatusError::Regression {
                from: OrderStatus::Completed,
                to: OrderStatus::Pending,
            }
        );
    }

    #[test]
    fn test_forward_only_allows_forward_moves() {
        assert!(
            OrderStatus::Pending
                .validate_admin_target("received", TransitionPolicy::ForwardOnly)
                .is_ok()
        );
        assert!(
            OrderStatus::Received
                .validate_admin_target("completed", TransitionPolicy::ForwardOnly)
                .is_ok()
        );
        // Same rank is not a regression
        assert!(
            OrderStatus::Rejected
                .validate_admin_target("completed", TransitionPolicy::ForwardOnly)
                .is_ok()
        );
    }

    #[test]
    fn test_cancel_pending_by_owner() {
        let owner = UserId::new(1);
        assert!(OrderStatus::Pending.validate_cancel(owner, owner).is_ok());
    }

    #[test]
    fn test_cancel_rejects_non_owner_regardless_of_status() {
        let owner = UserId::new(1);
        let other = UserId::new(2);
        for status in [
            OrderStatus::Pending,
            OrderStatus::Received,
            OrderStatus::Completed,
        ] {
            assert_eq!(
                status.validate_cancel(owner, other).unwrap_err(),
                CancelError::NotOwner
            );
        }
    }

    #[test]
    fn test_cancel_rejects_non_pending() {
        let owner = UserId::new(1);
        for status in [
            OrderStatus::Received,
            OrderStatus::Completed,
            OrderStatus::Rejected,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(
                status.validate_cancel(owner, owner).unwrap_err(),
                CancelError::NotPending
            );
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Received.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "allow-regression".parse::<TransitionPolicy>().unwrap(),
            TransitionPolicy::AllowRegression
        );
        assert_eq!(
            "forward-only".parse::<TransitionPolicy>().unwrap(),
            TransitionPolicy::ForwardOnly
        );
        assert!("strict".parse::<TransitionPolicy>().is_err());
    }
}
