//! Bind a picker to a plain text input holding a hex color.
//!
//! The binding keeps both sides in sync: edits to the text set the picker's
//! color, and every color change writes the new hex back into the text.
//! Clicks decide whether the popup is open.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::color::Space;
use crate::error::Result;
use crate::notify::Subscription;
use crate::options::PickerOptions;
use crate::picker::ColorPicker;
use crate::projection::Projection;

/// Where a click landed, relative to the bound input and its popup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// The bound text input.
    Field,
    /// Anywhere inside the picker popup.
    Popup,
    /// Anywhere else in the document.
    Elsewhere,
}

/// A [`ColorPicker`] attached to a text input.
#[derive(Debug)]
pub struct TextInputBinding {
    picker: ColorPicker,
    text: Rc<RefCell<String>>,
    subscription: Subscription,
}

impl TextInputBinding {
    /// Attach a new picker to a text input currently showing `initial_text`.
    ///
    /// The text, read as hex, becomes the picker's default value. An empty
    /// input keeps the default from `options`.
    pub fn new(initial_text: &str, mut options: PickerOptions) -> Result<Self> {
        if !initial_text.trim().is_empty() {
            options = options.with_default(initial_text, Space::Hex);
        }

        let picker = ColorPicker::new(&options)?;
        let text = Rc::new(RefCell::new(initial_text.to_owned()));

        let sink = Rc::clone(&text);
        let subscription = picker.model().subscribe(move |event| {
            let mut text = sink.borrow_mut();
            text.clear();
            text.push_str(event.value.hex());
        });

        Ok(Self {
            picker,
            text,
            subscription,
        })
    }

    /// The current text of the input.
    pub fn text(&self) -> Ref<'_, String> {
        self.text.borrow()
    }

    /// The bound picker.
    pub fn picker(&self) -> &ColorPicker {
        &self.picker
    }

    /// The input's text was changed by the user.
    ///
    /// On success the text is replaced with the normalized hex of the new
    /// color. Text that is not a hex color stays in the input as typed and
    /// leaves the picker unchanged.
    pub fn on_text_changed(&self, text: &str) -> Result<Option<Projection>> {
        self.text.replace(text.to_owned());
        self.picker
            .model()
            .set_from_color(text, Some(Space::Hex))
    }

    /// A click landed on `target`.
    pub fn on_click(&self, target: ClickTarget) {
        debug!(?target, "click");
        match target {
            ClickTarget::Field => self.picker.show(),
            ClickTarget::Popup => {}
            ClickTarget::Elsewhere => self.picker.hide(),
        }
    }
}

impl Drop for TextInputBinding {
    fn drop(&mut self) {
        self.picker.model().unsubscribe(self.subscription);
    }
}
