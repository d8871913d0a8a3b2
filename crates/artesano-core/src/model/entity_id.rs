// ── Core identity type ──
//
// Every catalog record carries a server-assigned integer id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier for a feedstock or product.
///
/// Ids are assigned by the backend; values `<= 0` never name a real record
/// and are treated as "no selection" by the forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// `true` for ids the backend could have issued.
    pub const fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for EntityId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::EntityId;

    #[test]
    fn parses_trimmed_integers() {
        assert_eq!(" 42 ".parse::<EntityId>().ok(), Some(EntityId::new(42)));
        assert!("abc".parse::<EntityId>().is_err());
    }

    #[test]
    fn non_positive_ids_are_unassigned() {
        assert!(!EntityId::new(0).is_assigned());
        assert!(!EntityId::new(-3).is_assigned());
        assert!(EntityId::new(1).is_assigned());
    }
}
