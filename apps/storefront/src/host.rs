//! Page host: builds the storefront widgets from runtime configuration.
//!
//! One `Storefront` per page. It owns the shared notification banner, so every header
//! indicator it builds replays the same banner.

use crate::config::Config;
use crate::jumbo::element::JumboText;
use crate::jumbo::refit::{spawn_refit_loop, RefitHandle};
use crate::van::catalog::ModelLinkSource;
use crate::van::indicator::HeaderYourVan;
use crate::van::notification::Notifier;
use crate::van::storage::SessionStore;

pub struct Storefront {
    config: Config,
    notifier: Notifier,
}

impl Storefront {
    pub fn new(config: Config) -> Self {
        let notifier = Notifier::new(config.notification_settings());
        Self { config, notifier }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// A jumbo text element in the configured face and font bounds.
    pub fn jumbo_text(&self, text: impl Into<String>) -> JumboText {
        JumboText::new(text, self.config.font).with_settings(self.config.jumbo_settings())
    }

    /// Hands `element` to a re-fit loop debounced by `REFIT_DEBOUNCE_MS`.
    /// Must be called inside a tokio runtime.
    pub fn mount_jumbo_text(&self, element: JumboText) -> RefitHandle {
        spawn_refit_loop(element, self.config.refit_debounce)
    }

    pub fn header_your_van<S, L>(&self, store: S, links: L) -> HeaderYourVan<S, L>
    where
        S: SessionStore,
        L: ModelLinkSource,
    {
        HeaderYourVan::new(store, links, self.notifier.clone())
            .with_notification_message(self.config.notification_message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::jumbo::element::HostEnvironment;
    use crate::layout::font_metrics::FontFamily;
    use crate::van::catalog::ModelLink;
    use crate::van::storage::{MemorySessionStore, SELECTED_VAN_KEY};

    fn storefront(pairs: &[(&str, &str)]) -> Storefront {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Storefront::new(Config::from_lookup(|key| env.get(key).cloned()).unwrap())
    }

    fn env(offset_width: f64) -> HostEnvironment {
        HostEnvironment {
            viewport_width: 1440.0,
            viewport_height: 900.0,
            scroll_y: 0.0,
            document_height: 4000.0,
            offset_width,
            element_top: 200.0,
            prefers_reduced_motion: false,
        }
    }

    #[test]
    fn test_jumbo_text_uses_configured_font_and_bounds() {
        let host = storefront(&[("JUMBO_FONT", "oswald"), ("JUMBO_MAX_FONT_SIZE", "72")]);
        let mut element = host.jumbo_text("Go");
        assert_eq!(element.surface().font(), FontFamily::Oswald);
        let size = element.handle_resize(&env(1200.0)).font_size().unwrap();
        assert!(size <= 72.0, "got {size}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_refit_loop_uses_configured_debounce() {
        let host = storefront(&[("REFIT_DEBOUNCE_MS", "300")]);
        let handle = host.mount_jumbo_text(host.jumbo_text("Wanderlust"));
        let mut outcomes = handle.outcomes();

        // 200ms apart: inside a 300ms debounce, so both collapse into one fit.
        handle.notify(env(300.0)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.notify(env(800.0)).await.unwrap();

        outcomes.changed().await.unwrap();
        let size = outcomes.borrow_and_update().as_ref().unwrap().font_size();
        let mut expected = host.jumbo_text("Wanderlust");
        assert_eq!(size, expected.handle_resize(&env(800.0)).font_size());

        let element = handle.shutdown().await.unwrap();
        assert_eq!(element.applied_font_size(), size);
    }

    #[tokio::test(start_paused = true)]
    async fn test_header_banner_uses_configured_message_and_hide_delay() {
        let host = storefront(&[
            ("VAN_NOTIFICATION_HIDE_MS", "1000"),
            ("VAN_NOTIFICATION_MESSAGE", "Parts that fit your van"),
        ]);
        host.notifier().mount(false);
        let links = vec![ModelLink {
            model_id: Some("sprinter".into()),
            model_name: Some("Sprinter".into()),
            ..ModelLink::default()
        }];
        let mut van = host.header_your_van(MemorySessionStore::new(), links);
        van.store_mut().set(SELECTED_VAN_KEY, "sprinter");
        van.on_model_selected().await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;
        let banner = host.notifier().snapshot().unwrap();
        assert!(banner.showing);
        assert_eq!(banner.message, "Parts that fit your van");

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!host.notifier().snapshot().unwrap().showing);
    }
}
