use crate::models::{
    ChatRoom, Message, MessageStatus, Notification, OutgoingMessage, Property, Resource,
    ResourceCategory, User,
};
use crate::sources::fixtures;
use crate::sources::traits::{
    AuthBackend, ChatSource, NotificationSource, PropertySource, ResourceSource,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::debug;

/// Simulated network latency per kind of call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    /// Loading a whole collection, logging in, registering
    pub fetch: Duration,
    /// Sending a chat message
    pub send: Duration,
    /// Loading a single resource
    pub lookup: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            fetch: Duration::from_millis(1000),
            send: Duration::from_millis(500),
            lookup: Duration::from_millis(500),
        }
    }
}

/// In-memory backend serving the static fixtures after a fixed delay
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    delays: Delays,
    failure: Option<String>,
}

impl MockBackend {
    pub fn new(delays: Delays) -> Self {
        Self {
            delays,
            failure: None,
        }
    }

    /// Backend whose every call fails with `message` after its delay
    pub fn failing(delays: Delays, message: impl Into<String>) -> Self {
        Self {
            delays,
            failure: Some(message.into()),
        }
    }

    async fn simulate(&self, delay: Duration) -> Result<()> {
        debug!("Simulating {:?} of network latency", delay);
        tokio::time::sleep(delay).await;

        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }
        Ok(())
    }
}

#[async_trait]
impl PropertySource for MockBackend {
    async fn fetch_properties(&self) -> Result<Vec<Property>> {
        self.simulate(self.delays.fetch).await?;
        Ok(fixtures::properties())
    }

    fn source_name(&self) -> &'static str {
        "Mock"
    }
}

#[async_trait]
impl ChatSource for MockBackend {
    async fn fetch_chat_rooms(&self) -> Result<Vec<ChatRoom>> {
        self.simulate(self.delays.fetch).await?;
        Ok(fixtures::chat_rooms())
    }

    async fn fetch_messages(&self, room_id: &str) -> Result<Vec<Message>> {
        self.simulate(self.delays.fetch).await?;
        Ok(fixtures::messages().remove(room_id).unwrap_or_default())
    }

    async fn send_message(&self, message: OutgoingMessage) -> Result<Message> {
        self.simulate(self.delays.send).await?;

        let now = Utc::now();
        Ok(Message {
            id: format!("new-{}", now.timestamp_millis()),
            room_id: message.room_id,
            sender_id: message.sender_id,
            sender_name: message.sender_name,
            sender_avatar: message.sender_avatar,
            content: message.content,
            created_at: now,
            status: MessageStatus::Sent,
        })
    }
}

#[async_trait]
impl NotificationSource for MockBackend {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        self.simulate(self.delays.fetch).await?;
        Ok(fixtures::notifications())
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.simulate(self.delays.fetch).await?;

        if email != fixtures::DEMO_EMAIL || password != fixtures::DEMO_PASSWORD {
            anyhow::bail!("Invalid email or password");
        }
        Ok(fixtures::current_user())
    }

    async fn register(&self, name: &str, email: &str, _password: &str) -> Result<User> {
        self.simulate(self.delays.fetch).await?;

        if email == fixtures::DEMO_EMAIL {
            anyhow::bail!("Email already in use");
        }

        Ok(User {
            id: "new-user-id".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            is_verified: false,
            ..fixtures::current_user()
        })
    }
}

#[async_trait]
impl ResourceSource for MockBackend {
    async fn fetch_resources(&self) -> Result<Vec<Resource>> {
        self.simulate(self.delays.fetch).await?;
        Ok(fixtures::resources())
    }

    async fn fetch_categories(&self) -> Result<Vec<ResourceCategory>> {
        self.simulate(self.delays.fetch).await?;
        Ok(fixtures::resource_categories())
    }

    async fn fetch_resource(&self, id: &str) -> Result<Option<Resource>> {
        self.simulate(self.delays.lookup).await?;
        Ok(fixtures::resources().into_iter().find(|resource| resource.id == id))
    }
}
