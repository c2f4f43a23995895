// Text fitting: the bisection core, the metric tables it measures against, and the
// headless surface that stands in for a live element.
// Fits are CPU-bound; async callers run them inside tokio::task::spawn_blocking.

pub mod fitter;
pub mod font_metrics;
pub mod surface;

pub use fitter::{fit, fit_with_tuning, FitError, FitReport, FitRequest, FitTuning, OverflowProbe};
pub use font_metrics::FontFamily;
pub use surface::TextSurface;
