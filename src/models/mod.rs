//! Models are the integer channel triples shown in the picker's input fields.
//! Conversions between them live in [`crate::convert`].

mod hsb;
mod rgb;

pub use hsb::Hsb;
pub use rgb::Rgb;

use crate::color::{ColorValue, Space};

/// A trait implemented for channel models that can be turned into a complete
/// [`ColorValue`].
pub trait Model {
    /// The space whose input fields show this model.
    const SPACE: Space;

    /// Convert the model to a [`ColorValue`].
    fn to_color(&self) -> ColorValue;
}

impl Model for Rgb {
    const SPACE: Space = Space::Rgb;

    fn to_color(&self) -> ColorValue {
        ColorValue::from_rgb(self.red, self.green, self.blue)
    }
}

impl Model for Hsb {
    const SPACE: Space = Space::Hsb;

    fn to_color(&self) -> ColorValue {
        ColorValue::from_hsb(
            i64::from(self.hue),
            i64::from(self.saturation),
            i64::from(self.brightness),
        )
    }
}
