// ── Units of measure ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Unit a feedstock's stock is counted in.
///
/// The backend stores the unit as a free string; this enum is what the
/// forms offer and what known values parse into.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum UnitOfMeasure {
    /// Kilograms.
    #[default]
    Kg,
    /// Linear meters.
    M,
    /// Square meters.
    M2,
    /// Cubic meters.
    M3,
    /// Units (pieces).
    Un,
    /// Liters.
    L,
}

impl UnitOfMeasure {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Cycle forward through the units, wrapping at the end.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Kg => Self::M,
            Self::M => Self::M2,
            Self::M2 => Self::M3,
            Self::M3 => Self::Un,
            Self::Un => Self::L,
            Self::L => Self::Kg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UnitOfMeasure;
    use strum::IntoEnumIterator;

    #[test]
    fn wire_names_are_uppercase() {
        let names: Vec<&str> = UnitOfMeasure::iter().map(UnitOfMeasure::as_str).collect();
        assert_eq!(names, ["KG", "M", "M2", "M3", "UN", "L"]);
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!("m2".parse::<UnitOfMeasure>().ok(), Some(UnitOfMeasure::M2));
        assert!("ton".parse::<UnitOfMeasure>().is_err());
    }

    #[test]
    fn next_wraps_around() {
        assert_eq!(UnitOfMeasure::L.next(), UnitOfMeasure::Kg);
    }
}
