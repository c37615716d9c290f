//! colorpick keeps the state of a color picker widget in sync.
//!
//! A picker shows one color in several places at once: red, green and blue
//! fields, hue, saturation and brightness fields, a hex field, a
//! saturation/brightness palette, a hue slider and a preview swatch. Editing
//! any of them must update all the others. [`ColorModel`] holds the single
//! authoritative [`ColorValue`], accepts edits from any field or from an
//! external string, and hands the [`Projection`] of every committed color to
//! subscribed listeners.
//!
//! ```rust
//! use colorpick::{ColorModel, PickerOptions};
//!
//! let model = ColorModel::new(&PickerOptions::default()).unwrap();
//! assert_eq!(model.value().hex(), "#f60");
//!
//! let projection = model
//!     .set_from_field("Saturation", "50", &model.projection())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(projection.field("Saturation"), Some("50"));
//! assert_eq!(projection.field("Hue"), Some("24"));
//! ```

#![deny(missing_docs)]

#[cfg(test)]
#[macro_use]
mod test;

mod binding;
mod color;
mod convert;
mod error;
mod field;
mod math;
mod model;
mod models;
mod notify;
mod options;
mod parse;
mod picker;
mod projection;
mod validate;

pub use binding::{ClickTarget, TextInputBinding};
pub use color::{ColorValue, Component, Space};
pub use error::{ColorError, Result};
pub use field::{FieldKind, FieldSpec, FieldTable, HEX_FIELD};
pub use model::{ColorModel, SiblingReader};
pub use models::{Hsb, Model, Rgb};
pub use notify::{ChangeNotifier, ColorChanged, Subscription};
pub use options::{FieldOptions, PickerOptions};
pub use picker::{ColorPicker, Step};
pub use projection::{Changes, Projection};
pub use validate::{parse_leading_int, FieldValidator, FALLBACK_HEX};
