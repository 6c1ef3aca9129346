//! Presentational form options, passed through to the host untouched.
//!
//! The core never renders, so these values only travel: a host reads them
//! when laying out labels, buttons, and the field grid. The one computed
//! convenience is [`FormLayout::span_for`], which resolves a field's grid
//! span against the form-wide default.

use crate::schema::FieldDescriptor;

// ---------------------------------------------------------------------------
// FormLayout
// ---------------------------------------------------------------------------

/// Layout and button options for one form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout {
    /// Width of the label column, as a CSS-style length.
    pub label_width: String,
    /// Lay fields out in a single row instead of stacked.
    pub inline: bool,
    /// Horizontal spacing between grid columns.
    pub gutter: u16,
    /// Grid columns a field occupies when its descriptor gives no span.
    pub col_span: u16,
    /// Label of the submit button.
    pub submit_text: String,
    /// Label of the cancel button.
    pub cancel_text: String,
    /// Whether the cancel button is shown at all.
    pub show_cancel: bool,
    /// Whether the submit button shows a busy indicator.
    pub loading: bool,
}

impl Default for FormLayout {
    fn default() -> Self {
        Self {
            label_width: "100px".to_owned(),
            inline: false,
            gutter: 20,
            col_span: 24,
            submit_text: "Submit".to_owned(),
            cancel_text: "Cancel".to_owned(),
            show_cancel: true,
            loading: false,
        }
    }
}

impl FormLayout {
    /// Create a new default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label column width (builder).
    pub fn with_label_width(mut self, width: impl Into<String>) -> Self {
        self.label_width = width.into();
        self
    }

    /// Switch to inline layout (builder).
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Set the grid gutter (builder).
    pub fn with_gutter(mut self, gutter: u16) -> Self {
        self.gutter = gutter;
        self
    }

    /// Set the default column span (builder).
    pub fn with_col_span(mut self, span: u16) -> Self {
        self.col_span = span;
        self
    }

    /// Set the submit button label (builder).
    pub fn with_submit_text(mut self, text: impl Into<String>) -> Self {
        self.submit_text = text.into();
        self
    }

    /// Set the cancel button label (builder).
    pub fn with_cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }

    /// Show or hide the cancel button (builder).
    pub fn with_show_cancel(mut self, show: bool) -> Self {
        self.show_cancel = show;
        self
    }

    /// Set the submit button's busy indicator (builder).
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// The grid span for `field`: its own if declared, the form default
    /// otherwise.
    pub fn span_for(&self, field: &FieldDescriptor) -> u16 {
        field.span.unwrap_or(self.col_span)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
