// Jumbo text: the host side of font fitting. Reads layout from the page, runs the
// fitter against a measurement surface, applies the result, and drives the reveal.

pub mod element;
pub mod refit;
pub mod style;
pub mod visibility;

pub use element::{FitStatus, HostEnvironment, JumboSettings, JumboText, RefitOutcome, SkipReason};
pub use refit::{spawn_refit_loop, RefitHandle};
pub use style::FontSizeVars;
pub use visibility::JumboOptions;
