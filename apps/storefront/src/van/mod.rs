// Header "your van" indicator: session-stored model selection, badge, popover,
// clear action and the selection banner.

pub mod catalog;
pub mod indicator;
pub mod notification;
pub mod storage;

pub use catalog::{ModelLink, ModelLinkSource, VanCatalog, VanModel};
pub use indicator::{ClearOutcome, HeaderYourVan, VanBadge, VanEvent};
pub use notification::{NotificationSettings, Notifier};
pub use storage::{MemorySessionStore, SessionStore, SELECTED_VAN_KEY};
