//! Project a [`ColorValue`] onto everything the picker displays.

use std::collections::BTreeMap;

use bitflags::bitflags;
use euclid::default::{Point2D, Size2D};

use crate::color::{ColorValue, Component};
use crate::field::HEX_FIELD;
use crate::math::{fraction, unit};
use crate::models::{Hsb, Rgb};

bitflags! {
    /// Marks the parts of a [`Projection`] that differ from a previous one.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Changes : u8 {
        /// Any of the red, green or blue field texts.
        const RGB_FIELDS = 1 << 0;
        /// Any of the hue, saturation or brightness field texts.
        const HSB_FIELDS = 1 << 1;
        /// The hex field text.
        const HEX_FIELD = 1 << 2;
        /// The palette background color.
        const PALETTE_BACKGROUND = 1 << 3;
        /// The palette cursor position.
        const PALETTE_CURSOR = 1 << 4;
        /// The hue slider position.
        const HUE_SLIDER = 1 << 5;
        /// The preview swatch color.
        const PREVIEW = 1 << 6;
    }
}

/// Everything the adapter layer applies to its elements for one color.
///
/// Positions are unit fractions; the adapter scales them against the pixel
/// size of its palette and hue slider.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    /// Text for every input field, keyed by field name.
    pub fields: BTreeMap<&'static str, String>,
    /// The fully saturated, fully bright version of the current hue.
    pub palette_background: Rgb,
    /// Saturation along x, inverted brightness along y.
    pub palette_cursor: Point2D<Component>,
    /// Hue divided by the hue scale, clamped to the unit interval.
    pub hue_slider_offset: Component,
    /// The color of the preview swatch, as hex.
    pub preview_color: String,
}

impl Projection {
    /// Project `value`, dividing the hue by `hue_scale` for the slider.
    pub fn new(value: &ColorValue, hue_scale: u16) -> Self {
        let rgb = value.rgb();
        let hsb = value.hsb();

        let mut fields = BTreeMap::new();
        for (name, channel) in Rgb::FIELD_NAMES.into_iter().zip(rgb.to_array()) {
            fields.insert(name, channel.to_string());
        }
        for (name, channel) in Hsb::FIELD_NAMES.into_iter().zip(hsb.to_array()) {
            fields.insert(name, channel.to_string());
        }
        fields.insert(HEX_FIELD, value.hex().to_owned());

        let percent = |v: u8| fraction(Component::from(v), 100.0);

        Self {
            fields,
            palette_background: Hsb::new(hsb.hue, 100, 100).to_rgb(),
            palette_cursor: Point2D::new(
                percent(hsb.saturation),
                1.0 - percent(hsb.brightness),
            ),
            hue_slider_offset: unit(fraction(
                Component::from(hsb.hue),
                Component::from(hue_scale),
            )),
            preview_color: value.hex().to_owned(),
        }
    }

    /// The text of the named field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The palette cursor scaled to a palette of the given pixel size.
    pub fn palette_cursor_px(&self, size: Size2D<Component>) -> Point2D<Component> {
        Point2D::new(
            self.palette_cursor.x * size.width,
            self.palette_cursor.y * size.height,
        )
    }

    /// The hue slider offset scaled to a slider of the given pixel length.
    pub fn hue_slider_px(&self, length: Component) -> Component {
        self.hue_slider_offset * length
    }

    /// Which parts differ from `previous`.
    pub fn changes_from(&self, previous: &Projection) -> Changes {
        let differs = |names: [&str; 3]| {
            names
                .into_iter()
                .any(|name| self.field(name) != previous.field(name))
        };

        let mut changes = Changes::empty();
        changes.set(Changes::RGB_FIELDS, differs(Rgb::FIELD_NAMES));
        changes.set(Changes::HSB_FIELDS, differs(Hsb::FIELD_NAMES));
        changes.set(
            Changes::HEX_FIELD,
            self.field(HEX_FIELD) != previous.field(HEX_FIELD),
        );
        changes.set(
            Changes::PALETTE_BACKGROUND,
            self.palette_background != previous.palette_background,
        );
        changes.set(
            Changes::PALETTE_CURSOR,
            self.palette_cursor != previous.palette_cursor,
        );
        changes.set(
            Changes::HUE_SLIDER,
            self.hue_slider_offset != previous.hue_slider_offset,
        );
        changes.set(
            Changes::PREVIEW,
            self.preview_color != previous.preview_color,
        );
        changes
    }
}
