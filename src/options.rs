//! Per-instance picker configuration.
//!
//! Options deserialize from TOML; every key is optional:
//!
//! ```rust
//! use colorpick::{PickerOptions, Space};
//! let options = PickerOptions::from_toml(r#"
//!     default_value = "hsb(200, 50, 50)"
//!     default_value_space = "hsb"
//!
//!     [fields]
//!     hue_max = 366
//! "#).unwrap();
//! assert_eq!(options.default_value_space, Space::Hsb);
//! assert_eq!(options.hue_scale(), 366);
//! ```

use serde::Deserialize;

use crate::color::Space;
use crate::error::Result;

/// Options accepted when building a picker.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    /// The color shown before the first edit.
    pub default_value: String,
    /// How to read [`PickerOptions::default_value`].
    pub default_value_space: Space,
    /// The hue that maps to the far end of the hue slider. Defaults to
    /// [`FieldOptions::hue_max`].
    pub hue_scale: Option<u16>,
    /// Bounds for the numeric input fields.
    pub fields: FieldOptions,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            default_value: "f60".to_owned(),
            default_value_space: Space::Hex,
            hue_scale: None,
            fields: FieldOptions::default(),
        }
    }
}

impl PickerOptions {
    /// Read options from a TOML document.
    pub fn from_toml(document: &str) -> Result<Self> {
        Ok(toml::from_str(document)?)
    }

    /// Replace the default value and the space it is read in.
    pub fn with_default(mut self, value: impl Into<String>, space: Space) -> Self {
        self.default_value = value.into();
        self.default_value_space = space;
        self
    }

    /// The divisor for the hue slider offset.
    pub fn hue_scale(&self) -> u16 {
        self.hue_scale.unwrap_or(self.fields.hue_max)
    }
}

/// Upper bounds and wrap behavior of the numeric input fields.
///
/// A field whose typed value exceeds its bound wraps to
/// `value % max - wrap_offset`; a negative value becomes `max`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Upper bound of the hue field. Some picker revisions used 366.
    pub hue_max: u16,
    /// Upper bound of the saturation field.
    pub saturation_max: u8,
    /// Upper bound of the brightness field.
    pub brightness_max: u8,
    /// Upper bound of the red, green and blue fields. Unbounded by default,
    /// leaving range checks to the color conversion.
    pub rgb_max: Option<u8>,
    /// Subtracted after the modulo when a value exceeds its bound.
    pub wrap_offset: i64,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            hue_max: 360,
            saturation_max: 100,
            brightness_max: 100,
            rgb_max: None,
            wrap_offset: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorError;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(PickerOptions::from_toml("").unwrap(), PickerOptions::default());
    }

    #[test]
    fn defaults_match_the_classic_picker() {
        let options = PickerOptions::default();
        assert_eq!(options.default_value, "f60");
        assert_eq!(options.default_value_space, Space::Hex);
        assert_eq!(options.hue_scale(), 360);
        assert_eq!(options.fields.wrap_offset, 1);
        assert_eq!(options.fields.rgb_max, None);
    }

    #[test]
    fn explicit_hue_scale_wins() {
        let options = PickerOptions::from_toml(
            r#"
            hue_scale = 360

            [fields]
            hue_max = 255
            rgb_max = 255
            "#,
        )
        .unwrap();
        assert_eq!(options.hue_scale(), 360);
        assert_eq!(options.fields.hue_max, 255);
        assert_eq!(options.fields.rgb_max, Some(255));
    }

    #[test]
    fn unknown_space_is_an_options_error() {
        let err = PickerOptions::from_toml(r#"default_value_space = "cmyk""#).unwrap_err();
        assert!(matches!(err, ColorError::Options(_)));
    }

    #[test]
    fn with_default_replaces_value_and_space() {
        let options = PickerOptions::default().with_default("10 20 30", Space::Rgb);
        assert_eq!(options.default_value, "10 20 30");
        assert_eq!(options.default_value_space, Space::Rgb);
    }
}
