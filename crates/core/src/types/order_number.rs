//! Time-based order numbers.

use core::fmt;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A customer-facing order number, e.g. `ORD-1724400000000-4821`.
///
/// Built from the creation timestamp in unix milliseconds plus a random
/// 4-digit suffix. The timestamp prefix keeps numbers roughly sortable by
/// creation time; the database enforces uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    const PREFIX: &'static str = "ORD";

    /// Generate a new order number from the current time.
    #[must_use]
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix: u16 = rand::rng().random_range(1000..10000);
        Self(format!("{}-{millis}-{suffix}", Self::PREFIX))
    }

    /// Returns the order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OrderNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The unix-millisecond timestamp embedded in the number, if well-formed.
    #[must_use]
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0.split('-').nth(1)?.parse().ok()
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OrderNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OrderNumber {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OrderNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let number = OrderNumber::generate();
        let parts: Vec<&str> = number.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[2].len(), 4);
    }

    #[test]
    fn test_timestamp_prefix_is_current() {
        let before = Utc::now().timestamp_millis();
        let number = OrderNumber::generate();
        let after = Utc::now().timestamp_millis();

        let millis = number.timestamp_millis().unwrap();
        assert!(millis >= before && millis <= after);
    }

    #[test]
    fn test_serde_transparent() {
        let number = OrderNumber::from("ORD-1724400000000-4821".to_owned());
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"ORD-1724400000000-4821\"");
    }

    #[test]
    fn test_timestamp_of_malformed_number() {
        let number = OrderNumber::from("garbage".to_owned());
        assert!(number.timestamp_millis().is_none());
    }
}
