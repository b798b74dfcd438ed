pub mod auth;
pub mod chat;
pub mod notifications;
pub mod properties;
pub mod resources;

pub use auth::{AuthState, AuthStore};
pub use chat::{ChatState, ChatStore, SenderIdentity};
pub use notifications::{NotificationsState, NotificationsStore};
pub use properties::{PropertiesState, PropertiesStore};
pub use resources::{ResourcesState, ResourcesStore};
