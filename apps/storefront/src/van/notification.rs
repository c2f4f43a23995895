//! "Van model set" banner with its show/hide timers.
//!
//! The banner markup can be rendered after the selection event fires, so `show`
//! waits for it to mount before doing anything. Every call to `show` cancels the
//! timers of the previous one; a click on the banner or backdrop hides it early.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::errors::AppError;
use crate::van::catalog::VanModel;

pub const DEFAULT_MESSAGE: &str = "We will only show you products that are for your van";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Gap between resetting the banner and showing it, so the show animation replays.
    pub show_delay: Duration,
    pub hide_after: Duration,
    pub mount_retry_interval: Duration,
    pub max_mount_retries: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            show_delay: Duration::from_millis(50),
            hide_after: Duration::from_millis(6000),
            mount_retry_interval: Duration::from_millis(100),
            max_mount_retries: 10,
        }
    }
}

/// Rendered banner state. `backdrop_showing` is `None` when the page has no backdrop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Banner {
    pub showing: bool,
    pub backdrop_showing: Option<bool>,
    pub title: Option<String>,
    pub message: String,
}

#[derive(Default)]
struct NotifierState {
    banner: Option<Banner>,
    timer: Option<JoinHandle<()>>,
}

#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Mutex<NotifierState>>,
    settings: NotificationSettings,
}

impl Notifier {
    pub fn new(settings: NotificationSettings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NotifierState::default())),
            settings,
        }
    }

    /// Banner markup is now on the page.
    pub fn mount(&self, has_backdrop: bool) {
        let mut state = lock(&self.inner);
        state.banner = Some(Banner {
            backdrop_showing: has_backdrop.then_some(false),
            ..Banner::default()
        });
    }

    pub fn snapshot(&self) -> Option<Banner> {
        lock(&self.inner).banner.clone()
    }

    /// Resets and replays the banner for `model`.
    ///
    /// An unknown model keeps the previous title. An empty custom message falls back to
    /// [`DEFAULT_MESSAGE`].
    pub async fn show(
        &self,
        model: Option<&VanModel>,
        custom_message: Option<&str>,
    ) -> Result<(), AppError> {
        let mut retries = 0u32;
        loop {
            let mounted = lock(&self.inner).banner.is_some();
            if mounted {
                break;
            }
            if retries >= self.settings.max_mount_retries {
                error!(retries, "Notification elements not found");
                return Err(AppError::Notification(format!(
                    "notification elements not found after {retries} retries"
                )));
            }
            retries += 1;
            debug!(
                retry = retries,
                max = self.settings.max_mount_retries,
                "Notification elements not mounted yet, retrying"
            );
            tokio::time::sleep(self.settings.mount_retry_interval).await;
        }

        let mut state = lock(&self.inner);
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        let Some(banner) = state.banner.as_mut() else {
            return Err(AppError::Notification("notification unmounted".to_string()));
        };

        if let Some(model) = model {
            banner.title = Some(format!("Van model set to: {}", model.name));
        }
        banner.message = custom_message
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MESSAGE)
            .to_owned();
        set_showing(banner, false);

        let inner = Arc::clone(&self.inner);
        let settings = self.settings;
        state.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(settings.show_delay).await;
            apply_showing(&inner, true);
            tokio::time::sleep(settings.hide_after).await;
            apply_showing(&inner, false);
        }));
        Ok(())
    }

    /// Click on the banner or backdrop. Only a visible banner reacts; returns whether it hid.
    pub fn dismiss(&self) -> bool {
        let mut state = lock(&self.inner);
        let showing = state.banner.as_ref().is_some_and(|b| b.showing);
        if !showing {
            return false;
        }
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        if let Some(banner) = state.banner.as_mut() {
            set_showing(banner, false);
        }
        true
    }
}

fn lock(inner: &Mutex<NotifierState>) -> MutexGuard<'_, NotifierState> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

fn apply_showing(inner: &Mutex<NotifierState>, showing: bool) {
    if let Some(banner) = lock(inner).banner.as_mut() {
        set_showing(banner, showing);
    }
}

fn set_showing(banner: &mut Banner, showing: bool) {
    banner.showing = showing;
    if let Some(backdrop) = banner.backdrop_showing.as_mut() {
        *backdrop = showing;
    }
}
