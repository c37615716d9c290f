//! Parse color strings handed to the picker from outside its own fields.
//!
//! Recognized forms are hex (`#f60`, `ff6600`), `rgb(255, 102, 0)`,
//! `hsb(24, 100, 100)` and bare triples such as `255 102 0` when the space is
//! given explicitly.

use std::str::FromStr;

use crate::color::{ColorValue, Space};
use crate::error::{ColorError, Result};

impl ColorValue {
    /// Parse a color string. With a `hint` the string is read in exactly that
    /// space; `Some(Space::Hex)` in particular never falls back to RGB or HSB
    /// interpretation. Without a hint the space is inferred from an `rgb` or
    /// `hsb` prefix, and anything else is read as hex.
    pub fn parse(text: &str, hint: Option<Space>) -> Result<Self> {
        let text = text.trim();

        let space = hint.unwrap_or_else(|| infer_space(text));
        match space {
            Space::Hex => ColorValue::from_hex(text),
            Space::Rgb => {
                let [red, green, blue] = triple(text, "rgb")
                    .ok_or_else(|| ColorError::InvalidColor(text.to_owned()))?;
                let channel =
                    |v: i64| u8::try_from(v).map_err(|_| ColorError::InvalidColor(text.to_owned()));
                Ok(ColorValue::from_rgb(channel(red)?, channel(green)?, channel(blue)?))
            }
            Space::Hsb => {
                let [hue, saturation, brightness] = triple(text, "hsb")
                    .ok_or_else(|| ColorError::InvalidColor(text.to_owned()))?;
                Ok(ColorValue::from_hsb(hue, saturation, brightness))
            }
        }
    }
}

impl FromStr for ColorValue {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        ColorValue::parse(s, None)
    }
}

fn infer_space(text: &str) -> Space {
    let lower = text.to_ascii_lowercase();
    if lower.starts_with("rgb") {
        Space::Rgb
    } else if lower.starts_with("hsb") {
        Space::Hsb
    } else {
        Space::Hex
    }
}

/// Read three integers, either wrapped as `prefix(a, b, c)` or bare and
/// separated by commas and/or whitespace.
fn triple(text: &str, prefix: &str) -> Option<[i64; 3]> {
    let lower = text.to_ascii_lowercase();
    let body = match lower.strip_prefix(prefix) {
        Some(rest) => rest.trim_start().strip_prefix('(')?.strip_suffix(')')?,
        None => lower.as_str(),
    };

    let mut values = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i64>().ok());

    let triple = [values.next()??, values.next()??, values.next()??];
    if values.next().is_some() {
        return None;
    }

    Some(triple)
}
