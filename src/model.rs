//! The color model: one authoritative [`ColorValue`] that every field edit
//! and external color update funnels through.
//!
//! An update validates its input, builds the new color, projects it, commits
//! it and then notifies listeners exactly once. While listeners run, the
//! model refuses further updates, so writing a field from a listener can not
//! loop back into the model.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace};

use crate::color::{ColorValue, Space};
use crate::error::{ColorError, Result};
use crate::field::{FieldSpec, FieldTable};
use crate::notify::{ChangeNotifier, ColorChanged, Subscription};
use crate::options::PickerOptions;
use crate::projection::Projection;
use crate::validate::{parse_leading_int, FieldValidator};

/// Reads the text currently displayed in a field, so a single edited field
/// can be combined with the untouched fields of its space.
pub trait SiblingReader {
    /// The displayed text of the named field, if the reader knows it.
    fn read(&self, name: &str) -> Option<String>;
}

impl<F> SiblingReader for F
where
    F: Fn(&str) -> Option<String>,
{
    fn read(&self, name: &str) -> Option<String> {
        self(name)
    }
}

impl SiblingReader for Projection {
    fn read(&self, name: &str) -> Option<String> {
        self.field(name).map(str::to_owned)
    }
}

impl SiblingReader for HashMap<String, String> {
    fn read(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl SiblingReader for BTreeMap<&str, &str> {
    fn read(&self, name: &str) -> Option<String> {
        self.get(name).map(|text| (*text).to_owned())
    }
}

struct ModelState {
    value: ColorValue,
    projection: Projection,
}

/// Marks the model as updating for as long as it lives.
struct UpdateGuard<'a>(&'a Cell<bool>);

impl<'a> UpdateGuard<'a> {
    fn enter(updating: &'a Cell<bool>) -> Option<Self> {
        if updating.replace(true) {
            None
        } else {
            Some(Self(updating))
        }
    }
}

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Owns the current color of one picker.
///
/// All operations take `&self`, which lets listeners hold a shared handle to
/// the model. The model is not `Sync`; it is meant to be driven from a
/// single UI thread.
pub struct ColorModel {
    fields: FieldTable,
    validator: FieldValidator,
    hue_scale: u16,
    state: RefCell<ModelState>,
    updating: Cell<bool>,
    notifier: ChangeNotifier,
}

impl ColorModel {
    /// Create a model showing the configured default value.
    pub fn new(options: &PickerOptions) -> Result<Self> {
        let value = ColorValue::parse(&options.default_value, Some(options.default_value_space))?;
        let hue_scale = options.hue_scale();
        let projection = Projection::new(&value, hue_scale);

        debug!(hex = value.hex(), "color model created");

        Ok(Self {
            fields: FieldTable::new(&options.fields),
            validator: FieldValidator::new(options.fields.wrap_offset),
            hue_scale,
            state: RefCell::new(ModelState { value, projection }),
            updating: Cell::new(false),
            notifier: ChangeNotifier::default(),
        })
    }

    /// The current color.
    pub fn value(&self) -> ColorValue {
        self.state.borrow().value.clone()
    }

    /// The projection of the current color.
    pub fn projection(&self) -> Projection {
        self.state.borrow().projection.clone()
    }

    /// The field descriptors of this model.
    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// The divisor for the hue slider offset.
    pub fn hue_scale(&self) -> u16 {
        self.hue_scale
    }

    /// Whether listeners are currently being notified.
    pub fn is_updating(&self) -> bool {
        self.updating.get()
    }

    /// Subscribe to color changes.
    pub fn subscribe(&self, listener: impl FnMut(&ColorChanged<'_>) + 'static) -> Subscription {
        self.notifier.subscribe(listener)
    }

    /// Remove a subscription.
    pub fn unsubscribe(&self, id: Subscription) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Apply raw text typed into the named field.
    ///
    /// The text is validated for its field, then combined with the other
    /// fields of the same space as read through `siblings`. A field the
    /// reader does not know falls back to the text this model last
    /// projected.
    ///
    /// Returns the new projection, or `None` if the call was made while the
    /// model was already updating. On error nothing changes.
    pub fn set_from_field(
        &self,
        name: &str,
        raw: &str,
        siblings: &impl SiblingReader,
    ) -> Result<Option<Projection>> {
        self.set_from_fields(&[(name, raw)], siblings)
    }

    /// Apply raw text for several fields of the same space as one update with
    /// a single notification. Fields of different spaces are rejected with
    /// [`ColorError::UnknownColorSpace`] naming the first stray field.
    pub fn set_from_fields(
        &self,
        edits: &[(&str, &str)],
        siblings: &impl SiblingReader,
    ) -> Result<Option<Projection>> {
        let Some(_guard) = UpdateGuard::enter(&self.updating) else {
            trace!(?edits, "ignoring field update while updating");
            return Ok(None);
        };

        let value = self.value_from_fields(edits, siblings).map_err(|err| {
            debug!(%err, ?edits, "rejected field update");
            err
        })?;

        Ok(Some(self.commit(value, "field")))
    }

    /// Set the color from a string handed in from outside the picker's own
    /// fields, such as a bound text input. `hint` selects the space the
    /// string is read in; see [`ColorValue::parse`].
    ///
    /// Returns the new projection, or `None` if the call was made while the
    /// model was already updating. On error nothing changes.
    pub fn set_from_color(&self, text: &str, hint: Option<Space>) -> Result<Option<Projection>> {
        let Some(_guard) = UpdateGuard::enter(&self.updating) else {
            trace!(text, "ignoring color update while updating");
            return Ok(None);
        };

        let value = ColorValue::parse(text, hint).map_err(|err| {
            debug!(%err, ?hint, "rejected color update");
            err
        })?;

        Ok(Some(self.commit(value, "color")))
    }

    fn value_from_fields(
        &self,
        edits: &[(&str, &str)],
        siblings: &impl SiblingReader,
    ) -> Result<ColorValue> {
        let mut validated: Vec<(&FieldSpec, String)> = Vec::with_capacity(edits.len());
        for &(name, raw) in edits {
            let spec = self.fields.lookup(name)?;
            if let Some((first, _)) = validated.first() {
                if first.space != spec.space {
                    return Err(ColorError::UnknownColorSpace(name.to_owned()));
                }
            }
            validated.push((spec, self.validator.normalize(spec, raw)));
        }

        let Some((first, _)) = validated.first() else {
            return Ok(self.value());
        };
        let space = first.space;

        if space == Space::Hex {
            let (_, hex) = &validated[validated.len() - 1];
            return ColorValue::from_hex(hex);
        }

        let mut channels = [0i64; 3];
        for (slot, spec) in channels.iter_mut().zip(self.fields.in_space(space)) {
            let text = match validated.iter().rev().find(|(edited, _)| edited.name == spec.name) {
                Some((_, text)) => text.clone(),
                None => self.sibling_text(spec, siblings),
            };
            *slot = channel_value(spec, &text)?;
        }

        let [c0, c1, c2] = channels;
        match space {
            Space::Rgb => {
                let channel = |v: i64| {
                    u8::try_from(v)
                        .map_err(|_| ColorError::InvalidColor(format!("rgb({c0}, {c1}, {c2})")))
                };
                Ok(ColorValue::from_rgb(channel(c0)?, channel(c1)?, channel(c2)?))
            }
            _ => {
                let hue_max = self
                    .fields
                    .in_space(Space::Hsb)
                    .next()
                    .and_then(|hue| hue.max)
                    .unwrap_or(359);
                Ok(ColorValue::from_hsb_within(c0, c1, c2, hue_max))
            }
        }
    }

    /// The validated text of an unedited field of the edited space.
    fn sibling_text(&self, spec: &FieldSpec, siblings: &impl SiblingReader) -> String {
        let raw = siblings.read(spec.name).unwrap_or_else(|| {
            self.state
                .borrow()
                .projection
                .field(spec.name)
                .unwrap_or_default()
                .to_owned()
        });
        self.validator.normalize(spec, &raw)
    }

    fn commit(&self, value: ColorValue, source: &'static str) -> Projection {
        let projection = Projection::new(&value, self.hue_scale);

        let changes = {
            let mut state = self.state.borrow_mut();
            let changes = projection.changes_from(&state.projection);
            debug!(source, hex = value.hex(), ?changes, "color updated");
            state.value = value;
            state.projection = projection.clone();
            changes
        };

        let state = self.state.borrow();
        self.notifier.notify(&ColorChanged {
            value: &state.value,
            projection: &state.projection,
            changes,
        });

        projection
    }
}

/// Read one channel from validated field text. Bounded fields read
/// unparseable text as 0, like the validator does; an unbounded field has no
/// such fallback and rejects it.
fn channel_value(spec: &FieldSpec, text: &str) -> Result<i64> {
    match parse_leading_int(text) {
        Some(value) => Ok(value),
        None if spec.max.is_some() => Ok(0),
        None => Err(ColorError::InvalidColor(text.to_owned())),
    }
}

impl std::fmt::Debug for ColorModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorModel")
            .field("value", &self.state.borrow().value)
            .field("hue_scale", &self.hue_scale)
            .field("updating", &self.updating.get())
            .field("notifier", &self.notifier)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::models::{Hsb, Rgb};
    use crate::projection::Changes;

    fn model() -> ColorModel {
        ColorModel::new(&PickerOptions::default()).unwrap()
    }

    fn reader(pairs: &[(&'static str, &'static str)]) -> BTreeMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn default_value_is_orange() {
        let model = model();
        let value = model.value();
        assert_eq!(value.rgb(), Rgb::new(255, 102, 0));
        assert_eq!(value.hsb(), Hsb::new(24, 100, 100));
        assert_eq!(model.projection().field("Hex"), Some("#f60"));
    }

    #[test]
    fn saturation_edit_combines_with_siblings() {
        let model = model();
        let before = model.value();

        let projection = model
            .set_from_field(
                "Saturation",
                "50",
                &reader(&[("Hue", "24"), ("Brightness", "100")]),
            )
            .unwrap()
            .unwrap();

        let expected = ColorValue::from_hsb(24, 50, 100);
        assert_ne!(model.value().hex(), before.hex());
        assert_eq!(projection.field("Hex"), Some(expected.hex()));
        assert_eq!(model.value(), expected);
        assert_eq!(model.projection(), projection);
    }

    #[test]
    fn edited_value_is_validated_first() {
        let model = model();
        model
            .set_from_field("Saturation", "150", &model.projection())
            .unwrap();
        assert_eq!(model.value().hsb(), Hsb::new(24, 49, 100));
    }

    #[test]
    fn rgb_edit_reads_siblings() {
        let model = model();
        model
            .set_from_field("Blue", "255", &reader(&[("Red", "0"), ("Green", "0")]))
            .unwrap();
        assert_eq!(model.value().hex(), "#0000ff");
        assert_eq!(model.value().hsb(), Hsb::new(240, 100, 100));
    }

    #[test]
    fn missing_siblings_fall_back_to_the_projection() {
        let model = model();
        let nothing = |_: &str| -> Option<String> { None };
        model.set_from_field("Red", "0", &nothing).unwrap();
        assert_eq!(model.value().rgb(), Rgb::new(0, 102, 0));
    }

    #[test]
    fn hex_edit_replaces_the_color() {
        let model = model();
        model
            .set_from_field("Hex", "#00ff00", &model.projection())
            .unwrap();
        assert_eq!(model.value().rgb(), Rgb::new(0, 255, 0));

        model.set_from_field("Hex", "nonsense", &model.projection()).unwrap();
        assert_eq!(model.value().hex(), "#000");
    }

    #[test]
    fn hex_edit_that_passes_the_field_but_not_the_color_is_rejected() {
        let model = model();
        let before = model.projection();
        let err = model.set_from_field("Hex", "#abcd", &before).unwrap_err();
        assert!(matches!(err, ColorError::InvalidColor(_)));
        assert_eq!(model.projection(), before);
    }

    #[test]
    fn out_of_range_rgb_is_rejected_without_clamping() {
        let model = model();
        let before = model.value();
        let err = model
            .set_from_field("Red", "300", &model.projection())
            .unwrap_err();
        assert!(matches!(err, ColorError::InvalidColor(ref text) if text == "rgb(300, 102, 0)"));
        assert_eq!(model.value(), before);

        let err = model
            .set_from_field("Green", "abc", &model.projection())
            .unwrap_err();
        assert!(matches!(err, ColorError::InvalidColor(_)));
    }

    #[test]
    fn unknown_field_leaves_state_untouched() {
        let model = model();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        model.subscribe(move |_| counter.set(counter.get() + 1));

        let before = model.projection();
        let err = model
            .set_from_field("Alpha", "10", &before)
            .unwrap_err();
        assert!(matches!(err, ColorError::UnknownColorSpace(ref name) if name == "Alpha"));
        assert_eq!(model.projection(), before);
        assert_eq!(calls.get(), 0);
        assert!(!model.is_updating());
    }

    #[test]
    fn mixed_space_edits_are_rejected() {
        let model = model();
        let err = model
            .set_from_fields(&[("Hue", "10"), ("Red", "10")], &model.projection())
            .unwrap_err();
        assert!(matches!(err, ColorError::UnknownColorSpace(ref name) if name == "Red"));
    }

    #[test]
    fn multi_field_edit_notifies_once() {
        let model = model();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        model.subscribe(move |_| counter.set(counter.get() + 1));

        model
            .set_from_fields(&[("Saturation", "20"), ("Brightness", "30")], &model.projection())
            .unwrap();
        assert_eq!(model.value().hsb(), Hsb::new(24, 20, 30));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn set_from_color_honors_hex_hint() {
        let model = model();
        model.set_from_color("#00F", Some(Space::Hex)).unwrap();
        assert_eq!(model.value().hex(), "#00f");

        let before = model.value();
        let err = model.set_from_color("rgb(0, 0, 0)", Some(Space::Hex)).unwrap_err();
        assert!(matches!(err, ColorError::InvalidColor(_)));
        assert_eq!(model.value(), before);
    }

    #[test]
    fn set_from_color_infers_space() {
        let model = model();
        model.set_from_color("hsb(120, 100, 50)", None).unwrap();
        assert_eq!(model.value().hsb(), Hsb::new(120, 100, 50));
    }

    #[test]
    fn listeners_see_the_committed_value() {
        let model = Rc::new(model());
        let seen = Rc::new(RefCell::new(None));

        let inner = Rc::downgrade(&model);
        let sink = Rc::clone(&seen);
        model.subscribe(move |event| {
            let model = inner.upgrade().unwrap();
            assert!(model.is_updating());
            assert_eq!(&model.value(), event.value);
            *sink.borrow_mut() = Some(event.changes);
        });

        model.set_from_color("#ff6600", None).unwrap();
        let changes = seen.borrow().unwrap();
        assert_eq!(changes, Changes::HEX_FIELD | Changes::PREVIEW);
        assert!(!model.is_updating());
    }

    #[test]
    fn nested_update_from_listener_is_a_no_op() {
        let model = Rc::new(model());
        let nested = Rc::new(RefCell::new(Vec::new()));

        let inner = Rc::downgrade(&model);
        let results = Rc::clone(&nested);
        model.subscribe(move |_| {
            let model = inner.upgrade().unwrap();
            let projection = model.projection();
            results.borrow_mut().push((
                model.set_from_field("Hue", "200", &projection).unwrap(),
                model.set_from_color("#123456", None).unwrap(),
            ));
        });

        model
            .set_from_field("Saturation", "50", &model.projection())
            .unwrap();

        assert_eq!(*nested.borrow(), [(None, None)]);
        assert_eq!(model.value(), ColorValue::from_hsb(24, 50, 100));
    }

    #[test]
    fn updating_flag_is_cleared_after_errors() {
        let model = model();
        assert!(model.set_from_color("zzz", None).is_err());
        assert!(!model.is_updating());
        assert!(model.set_from_color("#fff", None).unwrap().is_some());
    }

    #[test]
    fn historical_hue_bound() {
        let options = PickerOptions::from_toml("[fields]\nhue_max = 366").unwrap();
        let model = ColorModel::new(&options).unwrap();
        model.set_from_field("Hue", "363", &model.projection()).unwrap();
        assert_eq!(model.value().hsb().hue, 363);
        assert_eq!(model.value().rgb(), ColorValue::from_hsb(3, 100, 100).rgb());

        model.set_from_field("Hue", "370", &model.projection()).unwrap();
        assert_eq!(model.value().hsb().hue, 3);
    }

    #[test]
    fn out_of_range_hue_from_a_color_string_is_folded() {
        let model = model();
        let projection = model
            .set_from_color("hsb(720, 50, 50)", Some(Space::Hsb))
            .unwrap()
            .unwrap();
        assert_eq!(model.value().hsb(), Hsb::new(0, 50, 50));
        assert_eq!(projection.field("Hue"), Some("0"));
        assert!((0.0..=1.0).contains(&projection.hue_slider_offset));

        model.set_from_color("hsb(1000, 50, 50)", None).unwrap();
        assert_eq!(model.value().hsb().hue, 280);
    }

    #[test]
    fn sibling_text_is_validated_like_typed_input() {
        let model = model();
        let projection = model
            .set_from_field(
                "Saturation",
                "50",
                &reader(&[("Hue", "1000"), ("Brightness", "100")]),
            )
            .unwrap()
            .unwrap();
        // 1000 % 360 - 1
        assert_eq!(model.value().hsb(), Hsb::new(279, 50, 100));
        assert_eq!(projection.field("Hue"), Some("279"));
        assert!((0.0..=1.0).contains(&projection.hue_slider_offset));

        model
            .set_from_field("Hue", "10", &reader(&[("Saturation", "-4"), ("Brightness", "x")]))
            .unwrap();
        assert_eq!(model.value().hsb(), Hsb::new(10, 100, 0));
    }

    #[test]
    fn hue_at_the_bound_is_kept_from_a_field_only() {
        let model = model();
        model.set_from_field("Hue", "360", &model.projection()).unwrap();
        assert_eq!(model.value().hsb().hue, 360);
        assert_fraction_eq!(model.projection().hue_slider_offset, 1.0);

        model.set_from_color("hsb(360, 100, 100)", None).unwrap();
        assert_eq!(model.value().hsb().hue, 0);
    }

    #[test]
    fn invalid_default_value_fails_construction() {
        let options = PickerOptions::default().with_default("nope", Space::Hex);
        assert!(matches!(
            ColorModel::new(&options),
            Err(ColorError::InvalidColor(_))
        ));
    }
}
