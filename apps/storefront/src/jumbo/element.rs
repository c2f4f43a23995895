//! Jumbo text element: sizes its text to the widest size that fits the container.
//!
//! # Re-fit sequence (one call to `handle_resize`)
//! 1. Skip when the text is empty or whitespace-only.
//! 2. Clear `ready` so the host hides the text while it is measured.
//! 3. Skip when the element has no width.
//! 4. Detach the resize observer, resolve font bounds from CSS, tighten `max` on mobile.
//! 5. Run the fitter against the surface, apply the result, re-attach, set `ready`.
//! 6. Recompute the cap-text flag from the distance to the bottom of the page.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::jumbo::style::{FontSizeVars, DEFAULT_MAX_FONT_SIZE, DEFAULT_MIN_FONT_SIZE};
use crate::jumbo::visibility::{JumboOptions, VisibilityAnimator, VISIBLE_CLASS};
use crate::layout::fitter::{fit_with_tuning, FitError, FitReport, FitRequest, FitTuning};
use crate::layout::font_metrics::FontFamily;
use crate::layout::surface::{TextSurface, LINE_HEIGHT};

pub const READY_CLASS: &str = "ready";
/// Viewports narrower than this get the height-based max font size.
pub const MOBILE_BREAKPOINT: f64 = 750.0;
/// Share of the viewport height jumbo text may take outside a group block.
pub const MOBILE_HEIGHT_RATIO: f64 = 0.8;
/// Within this many px of the page bottom the element switches to cap-text trimming.
pub const CAP_TEXT_DISTANCE: f64 = 100.0;

// ────────────────────────────────────────────────────────────────────────────
// Host inputs / outputs
// ────────────────────────────────────────────────────────────────────────────

/// Layout facts the host reads from the page at the moment of a re-fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostEnvironment {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub scroll_y: f64,
    pub document_height: f64,
    /// Element's `offsetWidth`: the width the text must fit.
    pub offset_width: f64,
    /// Element's bounding-rect top, relative to the viewport.
    pub element_top: f64,
    pub prefers_reduced_motion: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumboSettings {
    pub default_min_font_size: f64,
    pub default_max_font_size: f64,
    pub tuning: FitTuning,
}

impl Default for JumboSettings {
    fn default() -> Self {
        Self {
            default_min_font_size: DEFAULT_MIN_FONT_SIZE,
            default_max_font_size: DEFAULT_MAX_FONT_SIZE,
            tuning: FitTuning::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EmptyText,
    ZeroWidth,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FitStatus {
    Fitted(FitReport),
    Skipped(SkipReason),
    Failed(FitError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefitOutcome {
    pub status: FitStatus,
    pub cap_text: bool,
}

impl RefitOutcome {
    pub fn font_size(&self) -> Option<f64> {
        match &self.status {
            FitStatus::Fitted(report) => Some(report.font_size),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Element
// ────────────────────────────────────────────────────────────────────────────

pub struct JumboText {
    surface: TextSurface,
    options: JumboOptions,
    font_vars: FontSizeVars,
    in_group_block: bool,
    settings: JumboSettings,
    ready: bool,
    cap_text: bool,
    applied_font_size: Option<f64>,
    resize_observed: bool,
    visibility: Option<VisibilityAnimator>,
}

impl JumboText {
    pub fn new(text: impl Into<String>, font: FontFamily) -> Self {
        Self {
            surface: TextSurface::new(text, font),
            options: JumboOptions::default(),
            font_vars: FontSizeVars::default(),
            in_group_block: false,
            settings: JumboSettings::default(),
            ready: false,
            cap_text: false,
            applied_font_size: None,
            resize_observed: false,
            visibility: None,
        }
    }

    pub fn with_options(mut self, options: JumboOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_font_vars(mut self, font_vars: FontSizeVars) -> Self {
        self.font_vars = font_vars;
        self
    }

    pub fn with_settings(mut self, settings: JumboSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Whether the element sits inside a `.group-block-content` container.
    pub fn inside_group_block(mut self, inside: bool) -> Self {
        self.in_group_block = inside;
        self
    }

    /// Element attached to the page: initial fit, then the reveal observer if enabled.
    /// Resize observation starts only once a fit gets past the skip checks.
    pub fn connect(&mut self, env: &HostEnvironment) -> RefitOutcome {
        let outcome = self.handle_resize(env);
        if self.options.animation_enabled(env.prefers_reduced_motion) {
            self.visibility = Some(VisibilityAnimator::new(self.options.animation_repeat));
        }
        outcome
    }

    pub fn disconnect(&mut self) {
        self.resize_observed = false;
        if let Some(animator) = self.visibility.as_mut() {
            animator.disconnect();
        }
    }

    pub fn on_intersection(&mut self, ratio: f64) {
        if let Some(animator) = self.visibility.as_mut() {
            animator.on_intersection(ratio);
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.surface.set_text(text);
    }

    pub fn handle_resize(&mut self, env: &HostEnvironment) -> RefitOutcome {
        let status = self.calculate_optimal_font_size(env);

        let bottom = env.element_top + env.scroll_y + self.surface.rendered_height();
        let distance_from_bottom = env.document_height - bottom;
        self.cap_text = distance_from_bottom <= CAP_TEXT_DISTANCE;

        RefitOutcome {
            status,
            cap_text: self.cap_text,
        }
    }

    fn calculate_optimal_font_size(&mut self, env: &HostEnvironment) -> FitStatus {
        if self.surface.text().trim().is_empty() {
            return FitStatus::Skipped(SkipReason::EmptyText);
        }

        self.ready = false;

        if env.offset_width <= 0.0 {
            return FitStatus::Skipped(SkipReason::ZeroWidth);
        }

        self.resize_observed = false;

        let (min_font_size, mut max_font_size) = self.font_vars.resolve(
            self.settings.default_min_font_size,
            self.settings.default_max_font_size,
        );
        if env.viewport_width < MOBILE_BREAKPOINT {
            max_font_size = self.mobile_max_font_size(env, min_font_size, max_font_size);
        }

        self.surface.set_font_size(1.0);

        let request = FitRequest {
            text_length: self.surface.char_count(),
            container_width: env.offset_width,
            min_font_size,
            max_font_size,
        };
        let result = fit_with_tuning(
            &request,
            &self.settings.tuning,
            self.surface.overflow_probe(env.offset_width),
        );

        self.resize_observed = true;

        match result {
            Ok(report) => {
                self.surface.set_font_size(report.font_size);
                self.applied_font_size = Some(report.font_size);
                self.ready = true;
                debug!(
                    font_size = report.font_size,
                    probes = report.probes,
                    width = env.offset_width,
                    "Jumbo text fitted"
                );
                FitStatus::Fitted(report)
            }
            Err(e) => {
                warn!(error = %e, "Jumbo text fit rejected its input");
                FitStatus::Failed(e)
            }
        }
    }

    /// Caps `max` so the block's height stays within the viewport on small screens.
    /// Never drops below `min`.
    pub(crate) fn mobile_max_font_size(&self, env: &HostEnvironment, min: f64, max: f64) -> f64 {
        let constraint = if self.in_group_block {
            env.viewport_height
        } else {
            env.viewport_height * MOBILE_HEIGHT_RATIO
        };
        let lines = self.surface.line_count() as f64;
        let estimated = (constraint / (lines * LINE_HEIGHT)).floor();
        max.min(estimated).max(min)
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn cap_text(&self) -> bool {
        self.cap_text
    }

    /// Value of the `data-cap-text` attribute.
    pub fn cap_text_attr(&self) -> &'static str {
        if self.cap_text {
            "true"
        } else {
            "false"
        }
    }

    pub fn applied_font_size(&self) -> Option<f64> {
        self.applied_font_size
    }

    pub fn is_resize_observed(&self) -> bool {
        self.resize_observed
    }

    pub fn visibility(&self) -> Option<&VisibilityAnimator> {
        self.visibility.as_ref()
    }

    pub fn surface(&self) -> &TextSurface {
        &self.surface
    }

    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.ready {
            classes.push(READY_CLASS);
        }
        if self.visibility.as_ref().is_some_and(VisibilityAnimator::is_visible) {
            classes.push(VISIBLE_CLASS);
        }
        classes
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
