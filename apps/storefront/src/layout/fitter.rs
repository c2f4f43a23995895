//! Font Fitter: finds the largest font size at which text still fits its container.
//!
//! The search never touches a rendering surface directly. Callers inject an
//! [`OverflowProbe`] that answers "does the text overflow at this size?"; the host
//! decides how that question is measured (live element, metric table, test closure).
//!
//! # Algorithm
//! 1. Seed a guess from container width and text length, clamped into `[min, max]`.
//! 2. Probe the guess once to pull one bound in toward the crossover point.
//! 3. Bisect while the bounds are more than `precision` apart, at most `max_iterations` times.
//! 4. Return the last known non-overflowing size scaled by `safety_margin`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("min font size {min} exceeds max font size {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("font size bounds must be finite and positive (min {min}, max {max})")]
    NonFiniteFontSize { min: f64, max: f64 },

    #[error("container width must be finite, got {0}")]
    NonFiniteWidth(f64),

    #[error("container width must be positive, got {0}")]
    NonPositiveWidth(f64),
}

// ────────────────────────────────────────────────────────────────────────────
// Request / tuning / report
// ────────────────────────────────────────────────────────────────────────────

/// One fit request. Recomputed on every resize or content change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitRequest {
    /// Characters in the content being fit.
    pub text_length: usize,
    /// Available width in px.
    pub container_width: f64,
    pub min_font_size: f64,
    pub max_font_size: f64,
}

impl FitRequest {
    fn validate(&self) -> Result<(), FitError> {
        if !self.container_width.is_finite() {
            return Err(FitError::NonFiniteWidth(self.container_width));
        }
        if self.container_width <= 0.0 {
            return Err(FitError::NonPositiveWidth(self.container_width));
        }
        let bounds_ok = self.min_font_size.is_finite()
            && self.max_font_size.is_finite()
            && self.min_font_size > 0.0;
        if !bounds_ok {
            return Err(FitError::NonFiniteFontSize {
                min: self.min_font_size,
                max: self.max_font_size,
            });
        }
        if self.min_font_size > self.max_font_size {
            return Err(FitError::InvalidRange {
                min: self.min_font_size,
                max: self.max_font_size,
            });
        }
        Ok(())
    }
}

/// Search constants. `Default` reproduces the storefront's tuned values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitTuning {
    /// Bisection stops once `ceiling - floor <= precision`.
    pub precision: f64,
    /// Hard cap on midpoint probes.
    pub max_iterations: u32,
    /// Applied to the final floor to absorb sub-pixel variance between measure and apply.
    pub safety_margin: f64,
    /// Empirical seed: `sqrt(width) * guess_coefficient / sqrt(text_length)`.
    /// Only affects probe count, never the converged answer.
    pub guess_coefficient: f64,
}

impl Default for FitTuning {
    fn default() -> Self {
        Self {
            precision: 0.5,
            max_iterations: 30,
            safety_margin: 0.99,
            guess_coefficient: 15.0,
        }
    }
}

/// Result of a fit plus the probe accounting used by logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub font_size: f64,
    /// Total probe evaluations, including the initial guess.
    pub probes: u32,
    /// Bisection iterations (excludes the initial guess).
    pub iterations: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Probe capability
// ────────────────────────────────────────────────────────────────────────────

/// Measurement capability: does the text, rendered at `font_size`, exceed the container?
///
/// Implementations may mutate the host surface (e.g. leave the candidate size applied).
/// The search tolerates that; it never reads the surface itself.
pub trait OverflowProbe {
    fn overflows(&mut self, font_size: f64) -> bool;
}

impl<F> OverflowProbe for F
where
    F: FnMut(f64) -> bool,
{
    fn overflows(&mut self, font_size: f64) -> bool {
        self(font_size)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Search
// ────────────────────────────────────────────────────────────────────────────

/// Returns the largest non-overflowing font size in `[min, max]`, with the safety margin applied.
pub fn fit<P: OverflowProbe>(request: &FitRequest, probe: P) -> Result<f64, FitError> {
    fit_with_tuning(request, &FitTuning::default(), probe).map(|report| report.font_size)
}

/// Same as [`fit`], with explicit tuning and probe accounting.
pub fn fit_with_tuning<P: OverflowProbe>(
    request: &FitRequest,
    tuning: &FitTuning,
    mut probe: P,
) -> Result<FitReport, FitError> {
    request.validate()?;

    let mut floor = request.min_font_size;
    let mut ceiling = request.max_font_size;

    let guess = initial_guess(request, tuning).clamp(floor, ceiling);
    let mut probes = 1u32;
    if probe.overflows(guess) {
        ceiling = guess;
    } else {
        floor = guess;
    }

    let mut iterations = 0u32;
    while ceiling - floor > tuning.precision && iterations < tuning.max_iterations {
        let mid = (floor + ceiling) / 2.0;
        probes += 1;
        if probe.overflows(mid) {
            ceiling = mid;
        } else {
            floor = mid;
        }
        iterations += 1;
    }

    let font_size = floor * tuning.safety_margin;
    debug!(
        text_length = request.text_length,
        container_width = request.container_width,
        guess,
        floor,
        ceiling,
        probes,
        font_size,
        "Font fit converged"
    );

    Ok(FitReport {
        font_size,
        probes,
        iterations,
    })
}

/// Seed size: grows with container width, shrinks with text length, capped at `max`.
fn initial_guess(request: &FitRequest, tuning: &FitTuning) -> f64 {
    let length = request.text_length.max(1) as f64;
    let seeded = request.container_width.sqrt() * (tuning.guess_coefficient / length.sqrt());
    request.max_font_size.min(seeded)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
