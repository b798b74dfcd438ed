use crate::models::{ChatRoom, Message, OutgoingMessage, User};
use crate::sources::{fixtures, ChatSource};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct ChatState {
    /// Rooms, most recently updated first after any send
    pub chat_rooms: Vec<ChatRoom>,
    pub current_room_id: Option<String>,
    /// Loaded messages per room id, oldest first
    pub messages: HashMap<String, Vec<Message>>,
    pub is_loading: bool,
    pub is_sending: bool,
    pub error: Option<String>,
}

/// Author stamped on outgoing messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
}

impl From<&User> for SenderIdentity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

pub struct ChatStore {
    source: Arc<dyn ChatSource>,
    sender: SenderIdentity,
    state: watch::Sender<ChatState>,
}

impl ChatStore {
    /// Store sending as the mock session's user, whoever is logged in
    pub fn new(source: Arc<dyn ChatSource>) -> Self {
        Self::with_sender(source, SenderIdentity::from(&fixtures::current_user()))
    }

    pub fn with_sender(source: Arc<dyn ChatSource>, sender: SenderIdentity) -> Self {
        let (state, _) = watch::channel(ChatState::default());
        Self {
            source,
            sender,
            state,
        }
    }

    /// Current snapshot. Do not hold it across an await.
    pub fn state(&self) -> watch::Ref<'_, ChatState> {
        self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.subscribe()
    }

    pub async fn fetch_chat_rooms(&self) {
        debug!("Fetching chat rooms");
        self.begin_loading();

        match self.source.fetch_chat_rooms().await {
            Ok(rooms) => {
                info!("Loaded {} chat rooms", rooms.len());
                self.state.send_modify(|state| {
                    state.chat_rooms = rooms;
                    state.is_loading = false;
                });
            }
            Err(err) => self.fail_loading("chat rooms", err),
        }
    }

    /// Load one room's messages, keeping those of other rooms
    pub async fn fetch_messages(&self, room_id: &str) {
        debug!("Fetching messages for room {}", room_id);
        self.begin_loading();

        match self.source.fetch_messages(room_id).await {
            Ok(messages) => {
                info!("Loaded {} messages for room {}", messages.len(), room_id);
                self.state.send_modify(|state| {
                    state.messages.insert(room_id.to_string(), messages);
                    state.is_loading = false;
                });
            }
            Err(err) => self.fail_loading("messages", err),
        }
    }

    /// Append an outgoing message to a room, make it the room's last message
    /// and move the room to the front of the list
    pub async fn send_message(&self, room_id: &str, content: impl Into<String>) {
        let message = OutgoingMessage {
            room_id: room_id.to_string(),
            sender_id: self.sender.id.clone(),
            sender_name: self.sender.name.clone(),
            sender_avatar: self.sender.avatar.clone(),
            content: content.into(),
        };

        debug!("Sending message to room {}", room_id);
        self.state.send_modify(|state| {
            state.is_sending = true;
            state.error = None;
        });

        match self.source.send_message(message).await {
            Ok(message) => {
                self.state.send_modify(|state| {
                    let room = state.chat_rooms.iter_mut().find(|room| room.id == room_id);
                    if let Some(room) = room {
                        room.updated_at = message.created_at;
                        room.last_message = Some(message.clone());
                    }
                    state.chat_rooms.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                    state
                        .messages
                        .entry(room_id.to_string())
                        .or_default()
                        .push(message);
                    state.is_sending = false;
                });
            }
            Err(err) => {
                warn!("Failed to send message to room {}: {}", room_id, err);
                self.state.send_modify(|state| {
                    state.error = Some(err.to_string());
                    state.is_sending = false;
                });
            }
        }
    }

    /// Record the open room; opening a room marks it read
    pub fn set_current_room(&self, room_id: Option<&str>) {
        self.state
            .send_modify(|state| state.current_room_id = room_id.map(str::to_string));
        if let Some(room_id) = room_id {
            self.mark_as_read(room_id);
        }
    }

    pub fn mark_as_read(&self, room_id: &str) {
        self.state.send_modify(|state| {
            if let Some(room) = state.chat_rooms.iter_mut().find(|room| room.id == room_id) {
                room.unread_count = 0;
            }
        });
    }

    pub fn messages(&self, room_id: &str) -> Vec<Message> {
        self.state
            .borrow()
            .messages
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn total_unread(&self) -> u32 {
        self.state
            .borrow()
            .chat_rooms
            .iter()
            .map(|room| room.unread_count)
            .sum()
    }

    fn begin_loading(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
    }

    fn fail_loading(&self, what: &str, err: anyhow::Error) {
        warn!("Failed to fetch {}: {}", what, err);
        self.state.send_modify(|state| {
            state.error = Some(err.to_string());
            state.is_loading = false;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageStatus;
    use crate::sources::{Delays, MockBackend};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    /// Mock backend that can be taken offline between calls
    #[derive(Default)]
    struct FlakyBackend {
        inner: MockBackend,
        offline: AtomicBool,
    }

    impl FlakyBackend {
        async fn check(&self) -> anyhow::Result<()> {
            if self.offline.load(Ordering::SeqCst) {
                tokio::time::sleep(Delays::default().fetch).await;
                anyhow::bail!("Down");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ChatSource for FlakyBackend {
        async fn fetch_chat_rooms(&self) -> anyhow::Result<Vec<ChatRoom>> {
            self.check().await?;
            self.inner.fetch_chat_rooms().await
        }

        async fn fetch_messages(&self, room_id: &str) -> anyhow::Result<Vec<Message>> {
            self.check().await?;
            self.inner.fetch_messages(room_id).await
        }

        async fn send_message(&self, message: OutgoingMessage) -> anyhow::Result<Message> {
            self.check().await?;
            self.inner.send_message(message).await
        }
    }

    async fn loaded_store() -> ChatStore {
        let store = ChatStore::new(Arc::new(MockBackend::default()));
        store.fetch_chat_rooms().await;
        store.fetch_messages("1").await;
        store
    }

    #[tokio::test(start_paused = true)]
    async fn send_message_appends_and_moves_room_to_front() {
        let store = loaded_store().await;
        let before = store.messages("1").len();
        assert_ne!(store.state().chat_rooms[0].id, "1");

        store.send_message("1", "hello").await;

        let state = store.state();
        assert!(!state.is_sending);
        assert!(state.error.is_none());
        assert_eq!(state.messages["1"].len(), before + 1);

        let room = &state.chat_rooms[0];
        assert_eq!(room.id, "1");
        let last = room.last_message.as_ref().unwrap();
        assert_eq!(last.content, "hello");
        assert_eq!(last.sender_id, "1");
        assert_eq!(last.status, MessageStatus::Sent);
        assert_eq!(room.updated_at, last.created_at);
        assert_eq!(state.messages["1"].last(), Some(last));
    }

    #[tokio::test(start_paused = true)]
    async fn rooms_stay_sorted_by_update_time() {
        let store = loaded_store().await;

        store.send_message("2", "anyone swapping in September?").await;

        let state = store.state();
        assert_eq!(state.chat_rooms[0].id, "2");
        assert!(state
            .chat_rooms
            .windows(2)
            .all(|pair| pair[0].updated_at >= pair[1].updated_at));
    }

    #[tokio::test(start_paused = true)]
    async fn is_sending_is_set_during_the_delay() {
        let store = loaded_store().await;
        let mut updates = store.subscribe();

        let send = store.send_message("4", "See you at 3");
        tokio::pin!(send);
        tokio::select! {
            _ = &mut send => panic!("send finished before its delay"),
            _ = updates.changed() => {}
        }
        assert!(updates.borrow_and_update().is_sending);

        send.await;
        assert!(!store.state().is_sending);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetches_keep_loaded_rooms_and_messages() {
        let backend = Arc::new(FlakyBackend::default());
        let store = ChatStore::new(backend.clone());
        store.fetch_chat_rooms().await;
        store.fetch_messages("1").await;
        let rooms_before = store.state().chat_rooms.clone();
        let messages_before = store.messages("1");

        backend.offline.store(true, Ordering::SeqCst);
        store.fetch_chat_rooms().await;

        {
            let state = store.state();
            assert!(!state.is_loading);
            assert_eq!(state.error.as_deref(), Some("Down"));
            assert_eq!(state.chat_rooms, rooms_before);
        }

        store.fetch_messages("4").await;

        let state = store.state();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Down"));
        assert!(!state.messages.contains_key("4"));
        assert_eq!(state.messages["1"], messages_before);
    }

    #[tokio::test(start_paused = true)]
    async fn next_fetch_clears_a_previous_error() {
        let backend = Arc::new(FlakyBackend::default());
        let store = ChatStore::new(backend.clone());

        backend.offline.store(true, Ordering::SeqCst);
        store.fetch_chat_rooms().await;
        assert!(store.state().error.is_some());

        backend.offline.store(false, Ordering::SeqCst);
        store.fetch_chat_rooms().await;

        let state = store.state();
        assert!(state.error.is_none());
        assert_eq!(state.chat_rooms.len(), 4);
    }

    #[tokio::test]
    async fn room_update_time_is_taken_after_the_send_delay() {
        let send = Duration::from_millis(50);
        let backend = MockBackend::new(Delays {
            fetch: Duration::ZERO,
            send,
            lookup: Duration::ZERO,
        });
        let store = ChatStore::new(Arc::new(backend));
        store.fetch_chat_rooms().await;
        let before = Utc::now();

        store.send_message("2", "hello").await;

        let state = store.state();
        let room = &state.chat_rooms[0];
        assert_eq!(room.id, "2");
        assert!(room.updated_at >= before + chrono::Duration::milliseconds(50));
        assert_eq!(room.last_message.as_ref().map(|m| m.created_at), Some(room.updated_at));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_send_leaves_rooms_untouched() {
        let store = ChatStore::new(Arc::new(MockBackend::failing(
            Delays::default(),
            "Message could not be delivered",
        )));

        store.send_message("1", "hello").await;

        let state = store.state();
        assert!(!state.is_sending);
        assert_eq!(state.error.as_deref(), Some("Message could not be delivered"));
        assert!(state.messages.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_messages_keeps_other_rooms() {
        let store = loaded_store().await;

        store.fetch_messages("4").await;

        let state = store.state();
        assert!(!state.is_loading);
        assert!(state.messages.contains_key("1"));
        assert_eq!(state.messages["4"].len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn opening_a_room_clears_its_unread_counter() {
        let store = loaded_store().await;
        assert_eq!(store.total_unread(), 3);

        store.set_current_room(Some("1"));

        let state = store.state();
        assert_eq!(state.current_room_id.as_deref(), Some("1"));
        let room = state.chat_rooms.iter().find(|room| room.id == "1").unwrap();
        assert_eq!(room.unread_count, 0);
        drop(state);
        assert_eq!(store.total_unread(), 1);

        store.set_current_room(None);
        assert!(store.state().current_room_id.is_none());
        assert_eq!(store.total_unread(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_sender_is_stamped_on_messages() {
        let sender = SenderIdentity {
            id: "42".to_string(),
            name: "Jonas".to_string(),
            avatar: None,
        };
        let store = ChatStore::with_sender(Arc::new(MockBackend::default()), sender);

        store.send_message("3", "count me in").await;

        assert_eq!(store.messages("3")[0].sender_name, "Jonas");
    }
}
