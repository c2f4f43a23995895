//! Headless text surface: the measurement side of the fitter.
//!
//! Mirrors how a live element behaves during a fit. Each probe *applies* the
//! candidate size before reading the scroll width, so the surface is left at
//! whatever size was probed last until the host applies the final result.

use crate::layout::fitter::OverflowProbe;
use crate::layout::font_metrics::{get_metrics, FontFamily, FontMetricTable};

/// CSS `line-height` the theme sets on jumbo text.
pub const LINE_HEIGHT: f64 = 1.2;

pub struct TextSurface {
    text: String,
    metrics: &'static FontMetricTable,
    font_size_px: f64,
}

impl TextSurface {
    pub fn new(text: impl Into<String>, font: FontFamily) -> Self {
        Self {
            text: text.into(),
            metrics: get_metrics(font),
            font_size_px: 1.0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn font(&self) -> FontFamily {
        self.metrics.font
    }

    pub fn font_size(&self) -> f64 {
        self.font_size_px
    }

    pub fn set_font_size(&mut self, px: f64) {
        self.font_size_px = px;
    }

    /// Number of characters, the `text_length` a fit request uses.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Explicit line breaks + 1.
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// Width of the widest line at the applied font size, in px.
    pub fn scroll_width(&self) -> f64 {
        f64::from(self.metrics.widest_line_em(&self.text)) * self.font_size_px
    }

    /// Height of the laid-out block at the applied font size, in px.
    pub fn rendered_height(&self) -> f64 {
        self.line_count() as f64 * self.font_size_px * LINE_HEIGHT
    }

    /// A probe bound to `container_width`: applies each candidate size, then compares.
    pub fn overflow_probe(&mut self, container_width: f64) -> impl OverflowProbe + '_ {
        move |size: f64| {
            self.set_font_size(size);
            self.scroll_width() > container_width
        }
    }
}
