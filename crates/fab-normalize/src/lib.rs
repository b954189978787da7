//! Normalization and classification of placed parts.
//!
//! - **classify**: ordered part-type rules over reference, value and package
//! - **value**: capacitance, resistance, inductance and LED colour canonicalization
//! - **package**: built-in chip sizes plus an external ordered rule table
//! - **numeric**: leading-number parsing and magnitude formatting

pub mod classify;
pub mod numeric;
pub mod package;
pub mod value;

pub use classify::{CLASSIFICATION_RULES, ClassificationRule, PartFields, classify, classify_part};
pub use package::{MAX_PACKAGE_LEN, PackageNormalizer, normalize_package};
pub use value::{
    NormalizedValue, led_color_token, normalize_capacitance, normalize_inductance,
    normalize_resistance, normalize_value,
};
