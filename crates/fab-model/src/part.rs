//! Part classification types.
//!
//! A [`PartType`] is the semantic tag inferred for every placed part. The
//! tag set is closed except for the fallback, which carries the first
//! character of the reference designator verbatim.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Semantic part type inferred from reference, value and package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartType {
    /// Ceramic/generic capacitor.
    Cap,
    /// Tantalum capacitor (`CP_EIA-` footprints).
    Tcap,
    /// Resistor.
    Res,
    /// Resistor network (`RN` references).
    ResNetwork,
    /// Inductor.
    Ind,
    /// Connector.
    Con,
    /// Bipolar transistor.
    Trx,
    /// MOSFET (`IRLM` values).
    Mosfet,
    /// Light-emitting diode.
    Led,
    /// Diode other than LED.
    Diode,
    /// Crystal or oscillator.
    Xtal,
    /// Integrated circuit (QFN/SOP packages).
    Ic,
    /// First character of the reference designator, used verbatim.
    Other(String),
}

impl PartType {
    /// Returns the tag as written to output files.
    pub fn as_str(&self) -> &str {
        match self {
            PartType::Cap => "CAP",
            PartType::Tcap => "TCAP",
            PartType::Res => "RES",
            PartType::ResNetwork => "RESxN",
            PartType::Ind => "IND",
            PartType::Con => "CON",
            PartType::Trx => "TRX",
            PartType::Mosfet => "MOSFET",
            PartType::Led => "LED",
            PartType::Diode => "DIODE",
            PartType::Xtal => "XTAL",
            PartType::Ic => "IC",
            PartType::Other(prefix) => prefix,
        }
    }

    /// Builds the fallback tag from a reference designator.
    pub fn fallback(reference: &str) -> Self {
        PartType::Other(reference.chars().take(1).collect())
    }

    /// Returns true for the transistor family that needs rotation correction.
    pub fn is_transistor(&self) -> bool {
        matches!(self, PartType::Trx | PartType::Mosfet)
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PartType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for PartType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s.trim() {
            "CAP" => PartType::Cap,
            "TCAP" => PartType::Tcap,
            "RES" => PartType::Res,
            "RESxN" => PartType::ResNetwork,
            "IND" => PartType::Ind,
            "CON" => PartType::Con,
            "TRX" => PartType::Trx,
            "MOSFET" => PartType::Mosfet,
            "LED" => PartType::Led,
            "DIODE" => PartType::Diode,
            "XTAL" => PartType::Xtal,
            "IC" => PartType::Ic,
            other if other.chars().count() <= 1 => PartType::Other(other.to_string()),
            other => return Err(ModelError::UnknownPartType(other.to_string())),
        };
        Ok(tag)
    }
}

/// Board side of a placed part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Side {
    Top,
    Bottom,
    /// Unrecognised side text, passed through unchanged.
    Other(String),
}

impl Side {
    /// Parses the side column case-insensitively.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("top") {
            Side::Top
        } else if trimmed.eq_ignore_ascii_case("bottom") {
            Side::Bottom
        } else {
            Side::Other(trimmed.to_string())
        }
    }

    /// Layer code written to the factory file.
    pub fn code(&self) -> &str {
        match self {
            Side::Top => "T",
            Side::Bottom => "B",
            Side::Other(raw) => raw,
        }
    }
}

/// A part after classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedPart {
    pub reference: String,
    pub value: String,
    pub package: String,
    pub part_type: PartType,
}
