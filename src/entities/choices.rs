//! Closed code sets stored as plain strings on `pv_modules`.
//!
//! A column holds one of three states: NULL, blank (`""`, unspecified), or
//! one of the codes below. `Unknown` is a real code and is never the same
//! thing as blank.

use std::fmt;
use std::str::FromStr;

use strum::{AsRefStr, EnumIter, EnumMessage, EnumString, IntoEnumIterator};

use crate::errors::ServiceError;

/// A code set usable in a [`Choice`] column.
pub trait ChoiceCode:
    Copy + FromStr + AsRef<str> + IntoEnumIterator + EnumMessage + fmt::Debug
{
    /// Name of the field carrying this code set.
    const FIELD: &'static str;

    fn label(&self) -> &'static str {
        self.get_message().unwrap_or("")
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
pub enum CellType {
    #[strum(serialize = "Mono_Si", message = "Mono-crystalline silicon")]
    MonoSi,
    #[strum(serialize = "Poly_Si", message = "Poly-crystalline silicon")]
    PolySi,
    #[strum(serialize = "CdTe", message = "Cadmium telluride thin film")]
    CdTe,
    #[strum(serialize = "CIGS", message = "Copper indium gallium selenide thin film")]
    Cigs,
    #[strum(serialize = "a_Si", message = "Amorphous silicon thin film")]
    ASi,
    #[strum(serialize = "Unknown", message = "Unknown")]
    Unknown,
}

impl ChoiceCode for CellType {
    const FIELD: &'static str = "cell_type";
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
pub enum DopingType {
    #[strum(serialize = "n_type", message = "n-type")]
    NType,
    #[strum(serialize = "p_type", message = "p-type")]
    PType,
    #[strum(serialize = "Unknown", message = "Unknown")]
    Unknown,
}

impl ChoiceCode for DopingType {
    const FIELD: &'static str = "doping_type";
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
pub enum CellTech {
    #[strum(serialize = "Al_BSF", message = "Aluminium back surface field")]
    AlBsf,
    #[strum(serialize = "PERC", message = "Passivated emitter and rear cell")]
    Perc,
    #[strum(serialize = "TOPCon", message = "Tunnel oxide passivated contact")]
    TopCon,
    #[strum(serialize = "HJT", message = "Heterojunction")]
    Hjt,
    #[strum(serialize = "IBC", message = "Interdigitated back contact")]
    Ibc,
    #[strum(serialize = "Unknown", message = "Unknown")]
    Unknown,
}

impl ChoiceCode for CellTech {
    const FIELD: &'static str = "cell_tech";
}

/// A present value of a choice column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice<T> {
    Blank,
    Code(T),
}

impl<T: ChoiceCode> Choice<T> {
    /// Parses a raw value. Surrounding whitespace is ignored; an empty
    /// string is [`Choice::Blank`].
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Choice::Blank);
        }
        T::from_str(raw).map(Choice::Code).map_err(|_| {
            ServiceError::invalid_field(T::FIELD, format!("'{}' is not a valid choice", raw))
        })
    }

    /// Parses an optional raw value, keeping NULL distinct from blank.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, ServiceError> {
        raw.map(Self::parse).transpose()
    }

    pub fn as_str(&self) -> &str {
        match self {
            Choice::Blank => "",
            Choice::Code(code) => code.as_ref(),
        }
    }
}

impl<T: ChoiceCode> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical column value for an optional choice.
pub fn to_column<T: ChoiceCode>(choice: Option<Choice<T>>) -> Option<String> {
    choice.map(|c| c.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn blank_and_unknown_are_distinct() {
        let blank = Choice::<CellType>::parse("").unwrap();
        let unknown = Choice::<CellType>::parse("Unknown").unwrap();
        assert_eq!(blank, Choice::Blank);
        assert_eq!(unknown, Choice::Code(CellType::Unknown));
        assert_ne!(blank, unknown);
        assert_eq!(to_column(Some(blank)), Some(String::new()));
        assert_eq!(to_column(Some(unknown)), Some("Unknown".to_string()));
        assert_eq!(to_column::<CellType>(None), None);
    }

    #[test]
    fn codes_keep_their_spelling() {
        assert_eq!(
            Choice::<CellType>::parse("Mono_Si").unwrap().as_str(),
            "Mono_Si"
        );
        assert_eq!(
            Choice::<CellTech>::parse(" TOPCon ").unwrap(),
            Choice::Code(CellTech::TopCon)
        );
        assert_eq!(DopingType::NType.as_ref(), "n_type");
    }

    #[test]
    fn unknown_string_names_the_field() {
        let err = Choice::<CellType>::parse("Quantum").unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(_));
        assert!(err.is_invalid_field("cell_type"));

        let err = Choice::<DopingType>::parse("mono").unwrap_err();
        assert!(err.is_invalid_field("doping_type"));
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert!(Choice::<CellType>::parse("mono_si").is_err());
    }

    #[test]
    fn null_stays_null() {
        assert_eq!(Choice::<CellTech>::parse_optional(None).unwrap(), None);
        assert_eq!(
            Choice::<CellTech>::parse_optional(Some("")).unwrap(),
            Some(Choice::Blank)
        );
    }

    #[test]
    fn every_code_has_a_label() {
        assert!(CellType::iter().all(|c| !c.label().is_empty()));
        assert!(DopingType::iter().all(|c| !c.label().is_empty()));
        assert!(CellTech::iter().all(|c| !c.label().is_empty()));
        assert_eq!(CellType::iter().count(), 6);
    }
}
