//! Static descriptors for the picker's input fields.

use crate::color::Space;
use crate::error::{ColorError, Result};
use crate::models::{Hsb, Rgb};
use crate::options::FieldOptions;

/// The name of the single hex field.
pub const HEX_FIELD: &str = "Hex";

/// How raw input for a field is validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// An integer, optionally bounded.
    Numeric,
    /// A `#` followed by 3 to 6 lowercase hex digits.
    HexPattern,
}

/// Describes one input field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field name, e.g. `Saturation`.
    pub name: &'static str,
    /// The space this field belongs to.
    pub space: Space,
    /// The upper bound; `None` leaves the field unbounded.
    pub max: Option<i64>,
    /// How input is validated.
    pub kind: FieldKind,
}

impl FieldSpec {
    fn numeric(name: &'static str, space: Space, max: Option<i64>) -> Self {
        Self {
            name,
            space,
            // A zero bound can not wrap anything.
            max: max.filter(|max| *max > 0),
            kind: FieldKind::Numeric,
        }
    }
}

/// All fields of a picker, in display order: RGB, HSB, then hex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldTable {
    specs: Vec<FieldSpec>,
}

impl FieldTable {
    /// Build the field table for the given bounds.
    pub fn new(options: &FieldOptions) -> Self {
        let rgb_max = options.rgb_max.map(i64::from);
        let [hue, saturation, brightness] = Hsb::FIELD_NAMES;

        let mut specs = Rgb::FIELD_NAMES
            .into_iter()
            .map(|name| FieldSpec::numeric(name, Space::Rgb, rgb_max))
            .collect::<Vec<_>>();

        specs.extend([
            FieldSpec::numeric(hue, Space::Hsb, Some(i64::from(options.hue_max))),
            FieldSpec::numeric(saturation, Space::Hsb, Some(i64::from(options.saturation_max))),
            FieldSpec::numeric(brightness, Space::Hsb, Some(i64::from(options.brightness_max))),
            FieldSpec {
                name: HEX_FIELD,
                space: Space::Hex,
                max: None,
                kind: FieldKind::HexPattern,
            },
        ]);

        Self { specs }
    }

    /// Find the descriptor for a field name.
    pub fn lookup(&self, name: &str) -> Result<&FieldSpec> {
        self.specs
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| ColorError::UnknownColorSpace(name.to_owned()))
    }

    /// The fields of one space, in channel order.
    pub fn in_space(&self, space: Space) -> impl Iterator<Item = &FieldSpec> {
        self.specs.iter().filter(move |spec| spec.space == space)
    }

    /// Iterate all fields in display order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.iter()
    }
}

impl Default for FieldTable {
    fn default() -> Self {
        Self::new(&FieldOptions::default())
    }
}
