//! Per-format text fields over one shared color.
//!
//! Each field keeps a draft that only reaches the shared color through
//! [`ColorEditor::commit`]. A successful commit re-renders every other
//! field, discarding whatever was typed there; a failed one marks only
//! the committing field.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use super::state::{Origin, SharedColor, SubscriptionId};
use crate::color::{Color, ColorParseError, FormatId, format, parse, render_all};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized color value")]
pub struct FieldError {
    pub input: String,
    #[source]
    pub source: ColorParseError,
}

/// One text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatField {
    pub id: FormatId,
    pub draft: String,
    pub error: Option<FieldError>,
}

impl FormatField {
    fn rendered(id: FormatId, color: &Color) -> Self {
        Self {
            id,
            draft: format(color, id),
            error: None,
        }
    }
}

pub struct ColorEditor {
    shared: SharedColor,
    /// Indexed by `FormatId as usize`.
    fields: Arc<Mutex<Vec<FormatField>>>,
    sync: SubscriptionId,
}

impl ColorEditor {
    pub fn new(initial: &Color) -> Self {
        let shared = SharedColor::new(initial);
        let current = shared.current();
        let fields: Vec<_> = render_all(&current)
            .into_iter()
            .map(|(id, rendered)| FormatField {
                id,
                draft: rendered.text,
                error: None,
            })
            .collect();
        let fields = Arc::new(Mutex::new(fields));

        let view = Arc::clone(&fields);
        let sync = shared.subscribe(move |color, origin| {
            for field in view.lock().iter_mut() {
                if !origin.is_field(field.id) {
                    *field = FormatField::rendered(field.id, color);
                }
            }
        });

        Self {
            shared,
            fields,
            sync,
        }
    }

    /// Replace the draft of `id` without touching the shared color.
    pub fn edit(&self, id: FormatId, text: impl Into<String>) {
        self.fields.lock()[id as usize].draft = text.into();
    }

    /// Parse the draft of `id` and, on success, make it the shared color.
    ///
    /// `hex`, `rgb` and `hsl` never render alpha, so text without one keeps
    /// the current alpha, as [`pick`](Self::pick) does.
    pub fn commit(&self, id: FormatId) -> Result<(), FieldError> {
        let draft = self.value(id);

        match parse(&draft) {
            Ok(mut color) => {
                if !id.carries_alpha() && color.alpha.is_none() {
                    color.alpha = self.shared.current().alpha;
                }
                self.shared.replace(&color, Origin::Field(id));
                self.fields.lock()[id as usize].error = None;
                Ok(())
            }
            Err(source) => {
                let err = FieldError {
                    input: draft,
                    source,
                };
                self.fields.lock()[id as usize].error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Alpha slider. Clamped to `[0, 1]`; NaN counts as opaque.
    pub fn set_alpha(&self, alpha: f64) {
        let alpha = if alpha.is_nan() {
            1.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        let color = self.shared.current().with_alpha(Some(alpha));
        self.shared.replace(&color, Origin::Alpha);
    }

    /// Color picker. Only `#` hex is accepted; the picked value carries no
    /// alpha, so the current alpha is kept.
    pub fn pick(&self, hex: &str) -> Result<(), ColorParseError> {
        let hex = hex.trim();
        if !hex.starts_with('#') {
            return Err(ColorParseError::InvalidHex(hex.to_string()));
        }
        let picked = parse(hex)?;
        let alpha = self.shared.current().alpha;
        self.shared.replace(&picked.with_alpha(alpha), Origin::Picker);
        Ok(())
    }

    pub fn value(&self, id: FormatId) -> String {
        self.fields.lock()[id as usize].draft.clone()
    }

    pub fn error(&self, id: FormatId) -> Option<FieldError> {
        self.fields.lock()[id as usize].error.clone()
    }

    /// Snapshot of every field.
    pub fn fields(&self) -> Vec<FormatField> {
        self.fields.lock().clone()
    }

    /// The shared color, in OKLCh.
    #[inline]
    pub fn canonical(&self) -> Arc<Color> {
        self.shared.current()
    }

    #[inline]
    pub fn shared(&self) -> &SharedColor {
        &self.shared
    }
}

impl Drop for ColorEditor {
    fn drop(&mut self) {
        self.shared.unsubscribe(self.sync);
    }
}
