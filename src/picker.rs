//! The picker widget core: a color model plus the pointer, keyboard and
//! visibility behavior of the popup.

use std::cell::Cell;
use std::rc::Rc;

use euclid::default::Point2D;
use tracing::debug;

use crate::color::{Component, Space};
use crate::error::Result;
use crate::math::{lerp, round, unit};
use crate::model::ColorModel;
use crate::options::PickerOptions;
use crate::projection::Projection;
use crate::validate::parse_leading_int;

/// A single increment of a numeric field from an arrow key or the wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Arrow up, or the wheel rolled up.
    Up,
    /// Arrow down, or the wheel rolled down.
    Down,
}

impl Step {
    /// The step for a wheel delta; positive deltas step up.
    pub fn from_wheel(delta: Component) -> Self {
        if delta > 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    fn delta(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// One picker instance.
#[derive(Debug)]
pub struct ColorPicker {
    model: Rc<ColorModel>,
    visible: Cell<bool>,
}

impl ColorPicker {
    /// Create a hidden picker showing the configured default value.
    pub fn new(options: &PickerOptions) -> Result<Self> {
        Ok(Self {
            model: Rc::new(ColorModel::new(options)?),
            visible: Cell::new(false),
        })
    }

    /// The model behind this picker.
    pub fn model(&self) -> &Rc<ColorModel> {
        &self.model
    }

    /// Open the popup.
    pub fn show(&self) {
        if !self.visible.replace(true) {
            debug!("picker shown");
        }
    }

    /// Close the popup.
    pub fn hide(&self) {
        if self.visible.replace(false) {
            debug!("picker hidden");
        }
    }

    /// Whether the popup is open.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Pick saturation and brightness from a point on the palette, given as
    /// unit fractions of its size. Saturation grows to the right, brightness
    /// grows upwards. Points outside the palette are clamped to its edge.
    pub fn pick_palette(&self, point: Point2D<Component>) -> Result<Option<Projection>> {
        let saturation = round(lerp(0.0, 100.0, unit(point.x))).to_string();
        let brightness = round(lerp(100.0, 0.0, unit(point.y))).to_string();

        self.model.set_from_fields(
            &[("Saturation", saturation.as_str()), ("Brightness", brightness.as_str())],
            &self.model.projection(),
        )
    }

    /// Pick the hue from a point on the hue slider, given as a unit fraction
    /// of its length. The top of the slider is the largest hue.
    pub fn pick_hue(&self, y: Component) -> Result<Option<Projection>> {
        let scale = Component::from(self.model.hue_scale());
        let hue = round(lerp(scale, 0.0, unit(y))).to_string();

        self.model
            .set_from_field("Hue", &hue, &self.model.projection())
    }

    /// Step a numeric field by one from its displayed value. The result is
    /// validated like typed input, so stepping past a bound wraps. Stepping
    /// the hex field does nothing.
    pub fn step_field(&self, name: &str, step: Step) -> Result<Option<Projection>> {
        let spec = self.model.fields().lookup(name)?;
        if spec.space == Space::Hex {
            return Ok(None);
        }

        let projection = self.model.projection();
        let current = projection
            .field(spec.name)
            .and_then(parse_leading_int)
            .unwrap_or(0);
        let next = current.saturating_add(step.delta()).to_string();

        self.model.set_from_field(spec.name, &next, &projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorError;
    use crate::models::{Hsb, Rgb};

    fn picker() -> ColorPicker {
        ColorPicker::new(&PickerOptions::default()).unwrap()
    }

    #[test]
    fn starts_hidden() {
        let picker = picker();
        assert!(!picker.is_visible());
        picker.show();
        picker.show();
        assert!(picker.is_visible());
        picker.hide();
        assert!(!picker.is_visible());
    }

    #[test]
    fn palette_pick_sets_saturation_and_brightness() {
        let picker = picker();
        let projection = picker
            .pick_palette(Point2D::new(0.25, 0.4))
            .unwrap()
            .unwrap();
        assert_eq!(picker.model().value().hsb(), Hsb::new(24, 25, 60));
        assert_fraction_eq!(projection.palette_cursor.x, 0.25);
        assert_fraction_eq!(projection.palette_cursor.y, 0.4);
    }

    #[test]
    fn palette_pick_clamps_to_the_edge() {
        let picker = picker();
        picker.pick_palette(Point2D::new(-3.0, 7.0)).unwrap();
        assert_eq!(picker.model().value().hsb(), Hsb::new(24, 0, 0));

        picker.pick_palette(Point2D::new(2.0, -1.0)).unwrap();
        assert_eq!(picker.model().value().hsb(), Hsb::new(24, 100, 100));
    }

    #[test]
    fn hue_pick_is_inverted() {
        let picker = picker();
        picker.pick_hue(0.75).unwrap();
        assert_eq!(picker.model().value().hsb().hue, 90);

        picker.pick_hue(0.0).unwrap();
        assert_eq!(picker.model().value().hsb().hue, 360);
        assert_eq!(picker.model().value().rgb(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn stepping_moves_by_one_and_wraps() {
        let picker = picker();
        picker.step_field("Hue", Step::Up).unwrap();
        assert_eq!(picker.model().value().hsb().hue, 25);

        picker.step_field("Brightness", Step::Up).unwrap();
        // 101 % 100 - 1
        assert_eq!(picker.model().value().hsb().brightness, 0);

        picker.step_field("Saturation", Step::Down).unwrap();
        assert_eq!(picker.model().value().hsb().saturation, 99);
    }

    #[test]
    fn stepping_rgb_past_its_range_is_rejected() {
        let picker = picker();
        let err = picker.step_field("Red", Step::Up).unwrap_err();
        assert!(matches!(err, ColorError::InvalidColor(_)));
        assert_eq!(picker.model().value().hex(), "#f60");

        picker.step_field("Green", Step::Down).unwrap();
        assert_eq!(picker.model().value().rgb().green, 101);
    }

    #[test]
    fn stepping_hex_is_a_no_op() {
        let picker = picker();
        assert_eq!(picker.step_field("Hex", Step::Up).unwrap(), None);
        assert!(picker.step_field("Alpha", Step::Up).is_err());
    }

    #[test]
    fn wheel_direction() {
        assert_eq!(Step::from_wheel(3.0), Step::Up);
        assert_eq!(Step::from_wheel(-1.0), Step::Down);
        assert_eq!(Step::from_wheel(0.0), Step::Down);
    }
}
