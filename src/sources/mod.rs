pub mod fixtures;
pub mod mock;
pub mod traits;
pub mod types;

pub use mock::{Delays, MockBackend};
pub use traits::{AuthBackend, ChatSource, NotificationSource, PropertySource, ResourceSource};
pub use types::{FilterPatch, PropertyFilters};
