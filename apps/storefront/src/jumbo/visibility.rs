//! Scroll-triggered reveal for jumbo text.
//!
//! The host feeds intersection ratios in as the element scrolls; the animator
//! decides whether the `jumbo-text-visible` class is present.

use serde::{Deserialize, Serialize};

pub const VISIBLE_CLASS: &str = "jumbo-text-visible";
/// Fraction of the element that must be on screen to count as intersecting.
pub const VISIBILITY_THRESHOLD: f64 = 0.3;

/// `data-text-effect` / `data-animation-repeat` from the element's dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JumboOptions {
    pub text_effect: Option<String>,
    /// `false` only when the dataset says exactly `"false"`.
    pub animation_repeat: bool,
}

impl JumboOptions {
    pub fn from_dataset(text_effect: Option<&str>, animation_repeat: Option<&str>) -> Self {
        Self {
            text_effect: text_effect.map(str::to_owned),
            animation_repeat: animation_repeat != Some("false"),
        }
    }

    /// The reveal runs only for a real effect and when motion is allowed.
    pub fn animation_enabled(&self, prefers_reduced_motion: bool) -> bool {
        matches!(self.text_effect.as_deref(), Some(effect) if effect != "none")
            && !prefers_reduced_motion
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityAnimator {
    repeat: bool,
    observing: bool,
    visible: bool,
}

impl VisibilityAnimator {
    pub fn new(repeat: bool) -> Self {
        Self {
            repeat,
            observing: true,
            visible: false,
        }
    }

    /// Applies one intersection entry. Ignored once observation has stopped.
    pub fn on_intersection(&mut self, ratio: f64) {
        if !self.observing {
            return;
        }
        if ratio >= VISIBILITY_THRESHOLD {
            self.visible = true;
            if !self.repeat {
                self.observing = false;
            }
        } else {
            self.visible = false;
        }
    }

    pub fn disconnect(&mut self) {
        self.observing = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_gated_on_effect_and_motion() {
        let fade = JumboOptions::from_dataset(Some("fade"), None);
        assert!(fade.animation_enabled(false));
        assert!(!fade.animation_enabled(true));

        let none = JumboOptions::from_dataset(Some("none"), None);
        assert!(!none.animation_enabled(false));

        let missing = JumboOptions::from_dataset(None, None);
        assert!(!missing.animation_enabled(false));
    }

    #[test]
    fn test_animation_repeat_only_false_when_explicit() {
        assert!(JumboOptions::from_dataset(None, None).animation_repeat);
        assert!(JumboOptions::from_dataset(None, Some("true")).animation_repeat);
        assert!(!JumboOptions::from_dataset(None, Some("false")).animation_repeat);
    }

    #[test]
    fn test_repeating_reveal_toggles() {
        let mut animator = VisibilityAnimator::new(true);
        animator.on_intersection(0.5);
        assert!(animator.is_visible());
        animator.on_intersection(0.1);
        assert!(!animator.is_visible());
        animator.on_intersection(0.3);
        assert!(animator.is_visible());
        assert!(animator.is_observing());
    }

    #[test]
    fn test_one_shot_reveal_stays_visible() {
        let mut animator = VisibilityAnimator::new(false);
        animator.on_intersection(0.1);
        assert!(!animator.is_visible());
        animator.on_intersection(0.9);
        assert!(animator.is_visible());
        assert!(!animator.is_observing());
        animator.on_intersection(0.0);
        assert!(animator.is_visible(), "unobserved element keeps the class");
    }
}
