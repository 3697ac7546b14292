//! User roles and account status.

use serde::{Deserialize, Serialize};

/// Coarse capability class gating handler access.
///
/// The authorization gate evaluates a single predicate, [`Role::permits`],
/// instead of scattering role checks across handlers. An admin passes every
/// customer gate (admin-is-superset-of-customer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl Role {
    /// Whether a caller with this role satisfies a gate requiring `required`.
    #[must_use]
    pub const fn permits(self, required: Self) -> bool {
        match required {
            Self::Customer => true,
            Self::Admin => matches!(self, Self::Admin),
        }
    }

    /// Canonical string form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Account status. Blocked users cannot log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Blocked,
}

impl UserStatus {
    /// Canonical string form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            _ => Err(format!("invalid user status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_permits_everything() {
        assert!(Role::Admin.permits(Role::Admin));
        assert!(Role::Admin.permits(Role::Customer));
    }

    #[test]
    fn test_customer_never_permits_admin() {
        assert!(Role::Customer.permits(Role::Customer));
        assert!(!Role::Customer.permits(Role::Admin));
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Customer, Role::Admin] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [UserStatus::Active, UserStatus::Blocked] {
            let parsed: UserStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("frozen".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&UserStatus::Blocked).unwrap(),
            "\"blocked\""
        );
    }
}
