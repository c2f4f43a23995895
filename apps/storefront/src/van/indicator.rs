//! Header "your van" indicator.
//!
//! Mirrors the van model id kept in session storage: shows the model's badge when
//! the id matches a model on the page, hides otherwise. Owns the popover and the
//! clear action; selection notifications are delegated to the [`Notifier`].

use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::errors::AppError;
use crate::van::catalog::{ModelLinkSource, VanCatalog};
use crate::van::notification::Notifier;
use crate::van::storage::{SessionStore, SELECTED_VAN_KEY};

pub const VAN_PLACEHOLDER_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\"%3E%3Crect fill=\"%23f0f0f0\" width=\"100\" height=\"100\"/%3E%3Ctext x=\"50\" y=\"50\" text-anchor=\"middle\" dy=\".3em\" fill=\"%23999\" font-size=\"14\"%3EVan%3C/text%3E%3C/svg%3E";
pub const VAN_PLACEHOLDER_ALT: &str = "Van placeholder";

/// Query parameters that filter listings by van model.
const VAN_FILTER_PREFIXES: [&str; 2] = ["filter.v.m.custom.van_model", "filter.p.tag"];

/// Wait before re-reading model links when none were on the page at init.
const CATALOG_RETRY_DELAY: Duration = Duration::from_millis(500);
/// Wait after a selection event so the selecting widget has written session storage.
const SELECTION_SETTLE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanBadge {
    pub name: String,
    pub image_src: String,
    pub image_alt: String,
}

/// Events the indicator raises for the rest of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VanEvent {
    /// Selection cleared.
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Navigate to this URL (current page without van filters).
    Reload(Url),
    /// Nothing to reload; the indicator is now hidden.
    Hidden,
}

pub struct HeaderYourVan<S, L> {
    store: S,
    links: L,
    catalog: VanCatalog,
    notifier: Notifier,
    notification_message: Option<String>,
    badge: Option<VanBadge>,
    popover_open: bool,
    events: Vec<VanEvent>,
}

impl<S: SessionStore, L: ModelLinkSource> HeaderYourVan<S, L> {
    pub fn new(store: S, links: L, notifier: Notifier) -> Self {
        let catalog = VanCatalog::load(&links);
        Self {
            store,
            links,
            catalog,
            notifier,
            notification_message: None,
            badge: None,
            popover_open: false,
            events: Vec::new(),
        }
    }

    /// Custom banner text (the megamenu's `data-notification-message`).
    pub fn with_notification_message(mut self, message: Option<String>) -> Self {
        self.notification_message = message;
        self
    }

    /// First render. When the page had no model links yet, re-reads them once after a delay.
    pub async fn init(&mut self) {
        self.update_display();
        if self.catalog.is_empty() {
            tokio::time::sleep(CATALOG_RETRY_DELAY).await;
            self.reload_catalog();
            self.update_display();
        }
    }

    pub fn reload_catalog(&mut self) {
        self.catalog = VanCatalog::load(&self.links);
        debug!(models = self.catalog.len(), "Van catalog loaded");
    }

    pub fn update_display(&mut self) {
        let selected = self.store.get(SELECTED_VAN_KEY);
        let model = selected.as_deref().and_then(|id| self.catalog.find(id));

        match model {
            Some(model) => {
                let (image_src, image_alt) = match &model.image {
                    Some(src) => (src.clone(), model.display_name.clone()),
                    None => (
                        VAN_PLACEHOLDER_IMAGE.to_string(),
                        VAN_PLACEHOLDER_ALT.to_string(),
                    ),
                };
                self.badge = Some(VanBadge {
                    name: model.display_name.clone(),
                    image_src,
                    image_alt,
                });
            }
            None => self.hide_component(),
        }
    }

    fn hide_component(&mut self) {
        self.badge = None;
        self.hide_popover();
    }

    /// Storage changed in another tab.
    pub fn on_storage_event(&mut self, key: Option<&str>) {
        if key == Some(SELECTED_VAN_KEY) {
            self.update_display();
        }
    }

    /// Another widget selected a model: refresh and announce it.
    pub async fn on_model_selected(&mut self) -> Result<(), AppError> {
        self.reload_catalog();
        tokio::time::sleep(SELECTION_SETTLE_DELAY).await;
        self.update_display();

        let selected = self.store.get(SELECTED_VAN_KEY);
        let model = selected.as_deref().and_then(|id| self.catalog.find(id));
        info!(model = selected.as_deref(), "Van model selected");
        self.notifier
            .show(model, self.notification_message.as_deref())
            .await
    }

    pub fn toggle_popover(&mut self) {
        if self.popover_open {
            self.hide_popover();
        } else {
            self.show_popover();
        }
    }

    pub fn show_popover(&mut self) {
        self.popover_open = true;
    }

    pub fn hide_popover(&mut self) {
        self.popover_open = false;
    }

    /// Any click on the document. Clicks outside the indicator close an open popover.
    pub fn on_document_click(&mut self, inside_container: bool) {
        if self.popover_open && !inside_container {
            self.hide_popover();
        }
    }

    /// Forgets the selection and deactivates every model link. Listing pages reload
    /// without their van filters.
    pub fn clear_selection(&mut self, page_url: &Url) -> ClearOutcome {
        self.store.remove(SELECTED_VAN_KEY);
        self.events.push(VanEvent::Cleared);
        self.links.deactivate_all();

        if is_collection_or_product_page(page_url) {
            let target = strip_van_filters(page_url);
            info!(%target, "Van selection cleared, reloading without filters");
            ClearOutcome::Reload(target)
        } else {
            info!("Van selection cleared");
            self.hide_component();
            ClearOutcome::Hidden
        }
    }

    pub fn drain_events(&mut self) -> Vec<VanEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn badge(&self) -> Option<&VanBadge> {
        self.badge.as_ref()
    }

    pub fn is_shown(&self) -> bool {
        self.badge.is_some()
    }

    pub fn is_popover_open(&self) -> bool {
        self.popover_open
    }

    pub fn links(&self) -> &L {
        &self.links
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

pub fn is_collection_or_product_page(url: &Url) -> bool {
    let path = url.path();
    path.contains("/collections/") || path.contains("/products/")
}

/// Copy of `url` with every van-model filter parameter removed; other parameters keep their order.
pub fn strip_van_filters(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !VAN_FILTER_PREFIXES.iter().any(|p| key.starts_with(p)))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut stripped = url.clone();
    if kept.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.query_pairs_mut().clear().extend_pairs(kept);
    }
    stripped
}
