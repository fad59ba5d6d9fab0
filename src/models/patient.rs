use serde::{Deserialize, Serialize};

use super::enums::{Gender, Region};

pub const AGE_RANGE: std::ops::RangeInclusive<i64> = 1..=120;
pub const WEIGHT_RANGE: std::ops::RangeInclusive<i64> = 1..=200;

/// Patient attributes as typed into the predictor form.
///
/// Age and weight stay as raw text: validation reads them, it never rewrites
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDetails {
    pub age: String,
    pub weight: String,
    pub region: Region,
    pub gender: Gender,
    pub pregnant: bool,
    pub g6pd_deficiency: bool,
    pub previous_medications: bool,
}

impl PatientDetails {
    pub fn age_is_valid(&self) -> bool {
        parse_int(&self.age).is_some_and(|age| AGE_RANGE.contains(&age))
    }

    pub fn weight_is_valid(&self) -> bool {
        parse_int(&self.weight).is_some_and(|weight| WEIGHT_RANGE.contains(&weight))
    }
}

// ═══════════════════════════════════════════
// Coercions
// ═══════════════════════════════════════════

/// Parse the leading integer of a form value.
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit, so `"30kg"` reads as 30 and `"12.5"` as 12. Returns `None`
/// when no digit leads the text.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in digits[..end].bytes() {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    Some(if negative { -value } else { value })
}

/// `parse_int`, with 0 standing in for unparseable text.
pub fn int_or_zero(raw: &str) -> i64 {
    parse_int(raw).unwrap_or(0)
}

/// Booleans travel as 0/1 on the wire.
pub fn flag(value: bool) -> u8 {
    u8::from(value)
}
