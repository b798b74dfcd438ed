use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Account role of a user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Landlord,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub is_verified: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Geographic position of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Core rental listing model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Monthly rent
    pub price: i64,
    pub currency: String,
    pub deposit: i64,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    /// Floor area in square meters
    pub size: i32,
    pub rooms: u32,
    pub furnished: bool,
    pub available_from: NaiveDate,
    pub available_to: Option<NaiveDate>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub landlord_id: String,
    pub landlord_name: String,
    pub landlord_avatar: Option<String>,
    pub landlord_rating: Option<f32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub coordinates: Option<Coordinates>,
    /// Distance to the user's campus in kilometers, when known
    pub distance: Option<f64>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Property {
    /// Case-insensitive match of an already lowercased query against the
    /// searchable text fields.
    pub fn matches_query(&self, query: &str) -> bool {
        [&self.title, &self.description, &self.address, &self.city]
            .iter()
            .any(|field| field.to_lowercase().contains(query))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Group,
    Direct,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub room_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub sender_avatar: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub status: MessageStatus,
}

/// Message composed locally, not yet accepted by the chat backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub room_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub sender_avatar: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub participants: Vec<User>,
    pub last_message: Option<Message>,
    pub unread_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub avatar: Option<String>,
}

/// Notification type tag, derived from the payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Message,
    Property,
    Payment,
    System,
}

/// Entities a notification points at, keyed by notification type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NotificationPayload {
    #[serde(rename_all = "camelCase")]
    Message { room_id: String, message_id: String },
    #[serde(rename_all = "camelCase")]
    Property { property_id: String },
    #[serde(rename_all = "camelCase")]
    Payment {
        property_id: String,
        payment_id: String,
    },
    System,
}

impl NotificationPayload {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Message { .. } => NotificationKind::Message,
            Self::Property { .. } => NotificationKind::Property,
            Self::Payment { .. } => NotificationKind::Payment,
            Self::System => NotificationKind::System,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub body: String,
    pub read: bool,
    /// Serialized as top-level `type` and `data` keys
    #[serde(flatten)]
    pub payload: NotificationPayload,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        self.payload.kind()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceCategory {
    pub id: String,
    pub name: String,
    /// Icon name understood by the presentation layer
    pub icon: String,
    pub description: Option<String>,
}

/// Guide article shown in the resources library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Markdown body
    pub content: String,
    pub category_id: String,
    pub category_name: String,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    pub fn matches_query(&self, query: &str) -> bool {
        [&self.title, &self.description, &self.content]
            .iter()
            .any(|field| field.to_lowercase().contains(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notification_payload_is_tagged_by_type() {
        let payload = NotificationPayload::Message {
            room_id: "4".to_string(),
            message_id: "404".to_string(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({ "type": "message", "data": { "roomId": "4", "messageId": "404" } })
        );
        assert_eq!(payload.kind(), NotificationKind::Message);
    }

    #[test]
    fn system_payload_carries_no_data() {
        let value = serde_json::to_value(NotificationPayload::System).unwrap();
        assert_eq!(value, json!({ "type": "system" }));

        let parsed: NotificationPayload = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.kind(), NotificationKind::System);
    }

    #[test]
    fn notification_keeps_type_and_data_at_the_top_level() {
        let created_at = "2023-06-14T09:30:00Z".parse().unwrap();
        let notification = Notification {
            id: "2".to_string(),
            title: "Payment Reminder".to_string(),
            body: "Your rent is due in 3 days.".to_string(),
            read: false,
            payload: NotificationPayload::Payment {
                property_id: "1".to_string(),
                payment_id: "pay-1".to_string(),
            },
            created_at,
        };

        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["type"], "payment");
        assert_eq!(value["data"], json!({ "propertyId": "1", "paymentId": "pay-1" }));
        assert!(value.get("payload").is_none());

        let parsed: Notification = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, notification);

        let system = Notification {
            payload: NotificationPayload::System,
            ..notification
        };
        let value = serde_json::to_value(&system).unwrap();
        assert_eq!(value["type"], "system");
        assert!(value.get("data").is_none());
        assert_eq!(serde_json::from_value::<Notification>(value).unwrap(), system);
    }
}
