use crate::models::{
    ChatRoom, Message, Notification, OutgoingMessage, Property, Resource, ResourceCategory, User,
};
use anyhow::Result;
use async_trait::async_trait;

/// Listing catalog backend
/// A real API client can replace the mock without touching the stores
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Load every listing
    async fn fetch_properties(&self) -> Result<Vec<Property>>;

    /// Get the name of the backing source
    fn source_name(&self) -> &'static str;
}

#[async_trait]
pub trait ChatSource: Send + Sync {
    async fn fetch_chat_rooms(&self) -> Result<Vec<ChatRoom>>;

    /// Messages of one room, oldest first. Unknown rooms have none.
    async fn fetch_messages(&self, room_id: &str) -> Result<Vec<Message>>;

    /// Deliver an outgoing message. The backend assigns the id and the
    /// timestamp when it accepts the message.
    async fn send_message(&self, message: OutgoingMessage) -> Result<Message>;
}

#[async_trait]
pub trait NotificationSource: Send + Sync {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>>;
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Verify credentials and return the matching account
    async fn login(&self, email: &str, password: &str) -> Result<User>;

    /// Create an account and return it
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User>;
}

#[async_trait]
pub trait ResourceSource: Send + Sync {
    async fn fetch_resources(&self) -> Result<Vec<Resource>>;

    async fn fetch_categories(&self) -> Result<Vec<ResourceCategory>>;

    async fn fetch_resource(&self, id: &str) -> Result<Option<Resource>>;
}
