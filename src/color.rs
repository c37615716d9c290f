//! A [`ColorValue`] is one immutable color with its hex, RGB and HSB forms
//! all derived up front.

use std::fmt;

use serde::Deserialize;

use crate::error::{ColorError, Result};
use crate::models::{Hsb, Rgb};

#[cfg(not(feature = "f64"))]
/// A 32-bit floating point value used for fractional view coordinates.
pub type Component = f32;

#[cfg(feature = "f64")]
/// A 64-bit floating point value used for fractional view coordinates.
pub type Component = f64;

/// The groups of input fields whose members must be jointly consistent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    /// Red, green and blue channels in `0..=255`.
    Rgb,
    /// Hue in degrees, saturation and brightness in percent.
    Hsb,
    /// A single `#rgb` or `#rrggbb` field.
    Hex,
}

impl Space {
    /// The lowercase name of the space.
    pub fn name(&self) -> &'static str {
        match self {
            Space::Rgb => "rgb",
            Space::Hsb => "hsb",
            Space::Hex => "hex",
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable snapshot of one color.
///
/// All three representations are filled in at construction, so no reader
/// ever observes a partially derived value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorValue {
    hex: String,
    rgb: Rgb,
    hsb: Hsb,
}

impl ColorValue {
    /// Create a color from a 3 or 6 digit hex string with an optional leading
    /// `#`. Letters may be in either case; the stored hex is lowercase with a
    /// leading `#` and keeps the shorthand form when one was given.
    ///
    /// ```rust
    /// use colorpick::ColorValue;
    /// let orange = ColorValue::from_hex("F60").unwrap();
    /// assert_eq!(orange.hex(), "#f60");
    /// assert_eq!(orange.rgb().to_array(), [255, 102, 0]);
    /// ```
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);

        if !matches!(digits.len(), 3 | 6) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidColor(s.to_owned()));
        }

        let digits = digits.to_ascii_lowercase();
        let parse = |pair: &str| {
            u8::from_str_radix(pair, 16).map_err(|_| ColorError::InvalidColor(s.to_owned()))
        };

        let rgb = if digits.len() == 3 {
            // #rgb -> #rrggbb
            let expand = |i: usize| parse(&digits[i..=i]).map(|nibble| nibble * 17);
            Rgb::new(expand(0)?, expand(1)?, expand(2)?)
        } else {
            Rgb::new(parse(&digits[0..2])?, parse(&digits[2..4])?, parse(&digits[4..6])?)
        };

        Ok(Self {
            hex: format!("#{digits}"),
            rgb,
            hsb: rgb.to_hsb(),
        })
    }

    /// Create a color from RGB channels.
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        let rgb = Rgb::new(red, green, blue);
        Self {
            hex: rgb.to_hex(),
            rgb,
            hsb: rgb.to_hsb(),
        }
    }

    /// Create a color from HSB components. Saturation and brightness are
    /// clamped to `0..=100` and the hue is folded into `0..360`. The HSB
    /// triple is stored as given so that editing one HSB field never drifts
    /// the other two through an RGB round trip.
    pub fn from_hsb(hue: i64, saturation: i64, brightness: i64) -> Self {
        Self::from_normalized_hsb(Hsb::normalized(hue, saturation, brightness))
    }

    /// Like [`ColorValue::from_hsb`], but a hue up to `hue_max` is kept. The
    /// RGB conversion takes it modulo 360.
    pub(crate) fn from_hsb_within(
        hue: i64,
        saturation: i64,
        brightness: i64,
        hue_max: i64,
    ) -> Self {
        Self::from_normalized_hsb(Hsb::within(hue, saturation, brightness, hue_max))
    }

    fn from_normalized_hsb(hsb: Hsb) -> Self {
        let rgb = hsb.to_rgb();
        Self {
            hex: rgb.to_hex(),
            rgb,
            hsb,
        }
    }

    /// The lowercase `#`-prefixed hex form.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The RGB form.
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// The HSB form.
    pub fn hsb(&self) -> Hsb {
        self.hsb
    }

    /// The integer value shown in the named RGB or HSB field.
    pub fn channel(&self, name: &str) -> Option<i64> {
        self.rgb.channel(name).or_else(|| self.hsb.channel(name))
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}
