//! Electrical value canonicalization.
//!
//! Turns the free-form value text from a schematic into the form used in
//! catalog part names, so a prefix search on the name can find it.

use fab_model::PartType;

use crate::numeric::{format_trimmed, format_whole, leading_f64};

/// Tolerance and annotation markers; text from the first one on is dropped.
/// Checked in this order.
const TRUNCATION_MARKERS: [&str; 3] = ["±", "+/-", " "];

/// Ohm glyph used in catalog names (U+03A9).
pub const OHM: char = 'Ω';
const OHM_SIGN: char = '\u{2126}';

/// LED colour keywords and the catalog token each maps to.
/// First matching entry wins.
const LED_COLORS: [(&[&str], &str); 3] = [
    (&["BLUE", "BLE"], "蓝"),
    (&["GREEN", "GRN"], "绿"),
    (&["RED"], "红"),
];

/// A normalized value plus whether it fit the expected pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedValue {
    pub text: String,
    /// False when the raw value did not look like a value of its type.
    pub recognized: bool,
}

impl NormalizedValue {
    fn recognized(text: String) -> Self {
        Self {
            text,
            recognized: true,
        }
    }

    fn unrecognized(text: String) -> Self {
        Self {
            text,
            recognized: false,
        }
    }
}

/// Normalizes `raw` with the algorithm for `part_type`.
///
/// Types without a dedicated algorithm pass the value through unchanged.
pub fn normalize_value(part_type: &PartType, raw: &str) -> NormalizedValue {
    match part_type {
        PartType::Cap | PartType::Tcap => {
            let text = normalize_capacitance(raw);
            let recognized = starts_with_number(raw);
            NormalizedValue { text, recognized }
        }
        PartType::Res | PartType::ResNetwork => {
            let text = normalize_resistance(raw);
            let recognized = starts_with_number(raw);
            NormalizedValue { text, recognized }
        }
        PartType::Ind => {
            let text = normalize_inductance(raw);
            let recognized = starts_with_number(raw);
            NormalizedValue { text, recognized }
        }
        PartType::Led => match led_color_token(raw) {
            Some(token) => NormalizedValue::recognized(token.to_string()),
            None => NormalizedValue::unrecognized(raw.to_string()),
        },
        _ => NormalizedValue::recognized(raw.to_string()),
    }
}

fn starts_with_number(raw: &str) -> bool {
    raw.trim_start()
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_digit() || ch == '.')
}

/// Cuts `value` at the first tolerance/annotation marker.
///
/// A marker at position 0 is left in place so the value is never emptied.
fn truncate_at_markers(value: &mut String) {
    for marker in TRUNCATION_MARKERS {
        if let Some(idx) = value.find(marker) {
            if idx > 0 {
                value.truncate(idx);
            }
        }
    }
}

/// Canonical capacitance: `"0.1uF ±10%"` becomes `"100nF"`.
///
/// Sub-unit values move down one prefix (`u`→`n`, `n`→`p`) and are
/// rounded to whole numbers; values of 1000 or more move up one prefix
/// (`n`→`u`, `p`→`n`). Moves repeat until none applies, so
/// `"1000000pF"` ends at `"1uF"`. Zero and negative values never move down.
/// The unit letter `F` is always re-appended.
pub fn normalize_capacitance(raw: &str) -> String {
    let mut value = raw.replace('F', "");
    truncate_at_markers(&mut value);

    // A down move lands on a whole number, which never moves down again.
    while let Some(rebased) = rebase_capacitance(&value) {
        value = rebased;
    }
    value.push('F');
    value
}

/// One prefix move, or `None` when the value is already canonical.
fn rebase_capacitance(value: &str) -> Option<String> {
    let magnitude = leading_f64(value);
    let below_unit = magnitude > 0.0 && magnitude < 1.0;
    match value.chars().last() {
        Some('u') if below_unit => Some(format!("{}n", format_whole(magnitude * 1000.0))),
        Some('n') if below_unit => Some(format!("{}p", format_whole(magnitude * 1000.0))),
        Some('n') if magnitude >= 1000.0 => {
            Some(format!("{}u", format_trimmed(magnitude / 1000.0)))
        }
        Some('p') if magnitude >= 1000.0 => {
            Some(format!("{}n", format_trimmed(magnitude / 1000.0)))
        }
        _ => None,
    }
}

/// Canonical resistance: `"4R7"` becomes `"4.7Ω"`, `"4k7"` becomes `"4.7kΩ"`.
pub fn normalize_resistance(raw: &str) -> String {
    let mut value = remove_ascii_ignore_case(raw, "ohm")
        .replace([OHM, OHM_SIGN], "");
    truncate_at_markers(&mut value);

    // KiCad writes the decimal point as R: 4R7 = 4.7
    let mut value = value.replace('R', ".");
    if value.ends_with('.') {
        value.pop();
    }

    let mut chars: Vec<char> = value.chars().collect();
    if chars.len() > 2 && matches!(chars[1], 'k' | 'K') {
        chars[1] = '.';
        value = chars.into_iter().collect();
        value.push('k');
    }

    value.push(OHM);
    value
}

/// Canonical inductance: the unit letter `H` is re-appended once.
pub fn normalize_inductance(raw: &str) -> String {
    let mut value = raw.replace('H', "");
    value.push('H');
    value
}

/// Maps an LED value to its colour search token, if it names a colour.
pub fn led_color_token(raw: &str) -> Option<&'static str> {
    LED_COLORS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| raw.contains(keyword)))
        .map(|(_, token)| *token)
}

/// Removes every ASCII-case-insensitive occurrence of `needle`.
fn remove_ascii_ignore_case(haystack: &str, needle: &str) -> String {
    let lower = haystack.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut pos = 0usize;
    while let Some(found) = lower[pos..].find(&needle) {
        let start = pos + found;
        out.push_str(&haystack[pos..start]);
        pos = start + needle.len();
    }
    out.push_str(&haystack[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacitance_rebasing() {
        assert_eq!(normalize_capacitance("0.1uF"), "100nF");
        assert_eq!(normalize_capacitance("0.47u"), "470nF");
        assert_eq!(normalize_capacitance("0.5nF"), "500pF");
        assert_eq!(normalize_capacitance("4700nF"), "4.7uF");
        assert_eq!(normalize_capacitance("10000pF"), "10nF");
        assert_eq!(normalize_capacitance("4700p"), "4.7nF");
        assert_eq!(normalize_capacitance("100nF"), "100nF");
        assert_eq!(normalize_capacitance("10uF"), "10uF");
        assert_eq!(normalize_capacitance("22pF"), "22pF");
    }

    #[test]
    fn capacitance_rebases_until_canonical() {
        assert_eq!(normalize_capacitance("1000000pF"), "1uF");
        assert_eq!(normalize_capacitance("0.9996uF"), "1uF");
        assert_eq!(normalize_capacitance("0.99996nF"), "1nF");
        assert_eq!(normalize_capacitance("0.0004uF"), "0nF");
        assert_eq!(normalize_capacitance("0nF"), "0nF");
        for canonical in ["1uF", "0nF", "4.7uF", "470pF"] {
            assert_eq!(normalize_capacitance(canonical), canonical);
        }
    }

    #[test]
    fn capacitance_strips_tolerance_and_annotations() {
        assert_eq!(normalize_capacitance("100nF ±10%"), "100nF");
        assert_eq!(normalize_capacitance("100nF±10%"), "100nF");
        assert_eq!(normalize_capacitance("0.1uF+/-20%"), "100nF");
        assert_eq!(normalize_capacitance("1uF 50V"), "1uF");
    }

    #[test]
    fn capacitance_without_unit_prefix() {
        assert_eq!(normalize_capacitance("1F"), "1F");
        assert_eq!(normalize_capacitance(""), "F");
    }

    #[test]
    fn resistance_conventions() {
        assert_eq!(normalize_resistance("4R7"), "4.7Ω");
        assert_eq!(normalize_resistance("100R"), "100Ω");
        assert_eq!(normalize_resistance("10k"), "10kΩ");
        assert_eq!(normalize_resistance("4k7"), "4.7kΩ");
        assert_eq!(normalize_resistance("4K7"), "4.7kΩ");
        assert_eq!(normalize_resistance("1k"), "1kΩ");
        assert_eq!(normalize_resistance("47kOhm 1%"), "47kΩ");
        assert_eq!(normalize_resistance("220 OHM"), "220Ω");
        assert_eq!(normalize_resistance("330Ω"), "330Ω");
        assert_eq!(normalize_resistance("1M"), "1MΩ");
    }

    #[test]
    fn resistance_short_inputs_are_safe() {
        assert_eq!(normalize_resistance(""), "Ω");
        assert_eq!(normalize_resistance("k"), "kΩ");
        assert_eq!(normalize_resistance("R"), "Ω");
        assert_eq!(normalize_resistance("Ω"), "Ω");
    }

    #[test]
    fn inductance_unit() {
        assert_eq!(normalize_inductance("10uH"), "10uH");
        assert_eq!(normalize_inductance("4.7u"), "4.7uH");
    }

    #[test]
    fn led_colors() {
        assert_eq!(led_color_token("BLUE"), Some("蓝"));
        assert_eq!(led_color_token("LED_GRN"), Some("绿"));
        assert_eq!(led_color_token("RED_0603"), Some("红"));
        assert_eq!(led_color_token("BLUE/RED"), Some("蓝"));
        assert_eq!(led_color_token("white"), None);
    }

    #[test]
    fn dispatch_by_type() {
        let led = normalize_value(&PartType::Led, "YELLOW");
        assert_eq!(led.text, "YELLOW");
        assert!(!led.recognized);

        let cap = normalize_value(&PartType::Tcap, "10uF");
        assert_eq!(cap.text, "10uF");
        assert!(cap.recognized);

        let trx = normalize_value(&PartType::Trx, "2N3904");
        assert_eq!(trx.text, "2N3904");
        assert!(trx.recognized);

        assert!(!normalize_value(&PartType::Res, "DNP").recognized);
    }
}
