//! Normalization of raw text typed into a single input field.

use crate::field::{FieldKind, FieldSpec};

/// What an invalid hex field is replaced with.
pub const FALLBACK_HEX: &str = "#000";

/// Applies the per-field rules to raw input. Validation never fails: invalid
/// input is replaced with something the field accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldValidator {
    wrap_offset: i64,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl FieldValidator {
    /// Create a validator that subtracts `wrap_offset` after wrapping a value
    /// that exceeds its bound.
    pub fn new(wrap_offset: i64) -> Self {
        Self { wrap_offset }
    }

    /// Normalize raw input for the given field.
    ///
    /// Bounded numeric fields read the leading integer of the input (0 when
    /// there is none), wrap values above the bound to
    /// `value % max - wrap_offset` and replace negative values with the
    /// bound. Unbounded numeric fields pass through untouched. The hex field
    /// must be `#` and 3 to 6 lowercase hex digits, otherwise it becomes
    /// [`FALLBACK_HEX`].
    pub fn normalize(&self, spec: &FieldSpec, raw: &str) -> String {
        match (spec.kind, spec.max) {
            (FieldKind::HexPattern, _) => {
                if is_hex_pattern(raw) {
                    raw.to_owned()
                } else {
                    FALLBACK_HEX.to_owned()
                }
            }
            (FieldKind::Numeric, Some(max)) => {
                self.wrap(parse_leading_int(raw).unwrap_or(0), max).to_string()
            }
            (FieldKind::Numeric, None) => raw.to_owned(),
        }
    }

    /// Wrap an integer into the field bound `max`.
    ///
    /// ```rust
    /// use colorpick::FieldValidator;
    /// let validator = FieldValidator::default();
    /// assert_eq!(validator.wrap(150, 100), 49);
    /// assert_eq!(validator.wrap(-5, 100), 100);
    /// assert_eq!(validator.wrap(100, 100), 100);
    /// ```
    pub fn wrap(&self, value: i64, max: i64) -> i64 {
        if value > max {
            value.checked_rem(max).unwrap_or(0) - self.wrap_offset
        } else if value < 0 {
            max
        } else {
            value
        }
    }
}

fn is_hex_pattern(raw: &str) -> bool {
    raw.strip_prefix('#').is_some_and(|digits| {
        (3..=6).contains(&digits.len())
            && digits
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    })
}

/// Read the integer at the start of `text`, after optional whitespace and an
/// optional sign. Trailing characters are ignored, so `"12px"` reads as 12.
/// Returns `None` when there are no digits. Values beyond `i64` saturate.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .collect::<Vec<_>>();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .into_iter()
        .fold(0i64, |acc, digit| acc.saturating_mul(10).saturating_add(digit));

    Some(if negative { -magnitude } else { magnitude })
}
