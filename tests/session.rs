use housing_connect::models::NotificationKind;
use housing_connect::sources::{fixtures, Delays, FilterPatch, MockBackend};
use housing_connect::storage::{FileStorage, KeyValueStorage};
use housing_connect::stores::{AuthStore, ChatStore, NotificationsStore, PropertiesStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn fast_backend() -> Arc<MockBackend> {
    Arc::new(MockBackend::new(Delays {
        fetch: Duration::from_millis(5),
        send: Duration::from_millis(1),
        lookup: Duration::from_millis(1),
    }))
}

#[tokio::test]
async fn session_state_survives_a_restart() {
    let dir = tempdir().unwrap();
    let backend = fast_backend();

    {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir.path()));
        let auth = AuthStore::new(backend.clone(), storage.clone());
        let notifications = NotificationsStore::new(backend.clone(), storage);

        auth.login(fixtures::DEMO_EMAIL, fixtures::DEMO_PASSWORD).await;
        assert!(auth.is_authenticated());

        notifications.fetch().await;
        notifications.mark_as_read("1").await;
        notifications.delete_notification("3").await;
    }

    assert!(dir.path().join("auth-storage.json").exists());
    assert!(dir.path().join("notifications-storage.json").exists());

    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir.path()));
    let auth = AuthStore::new(backend.clone(), storage.clone());
    let notifications = NotificationsStore::new(backend, storage);
    auth.restore().await.unwrap();
    notifications.restore().await.unwrap();

    assert!(auth.is_authenticated());
    assert_eq!(
        auth.state().user.as_ref().map(|user| user.email.as_str()),
        Some("ana.rodriguez@example.com")
    );

    let state = notifications.state();
    assert_eq!(state.notifications.len(), 4);
    assert!(state.notifications.iter().all(|n| n.id != "3"));
    drop(state);
    assert_eq!(notifications.unread_count(), 0);
    assert_eq!(
        notifications.state().notifications[0].kind(),
        NotificationKind::Message
    );
}

#[tokio::test]
async fn browsing_and_chatting_flow() {
    let backend = fast_backend();
    let properties = PropertiesStore::new(backend.clone());
    let chat = ChatStore::new(backend);

    properties.fetch().await;
    properties.set_filters(FilterPatch::new().max_price(7000));
    properties.apply_filters();
    let affordable: Vec<String> = properties
        .state()
        .filtered_properties
        .iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(affordable, vec!["1", "3", "5"]);

    properties.toggle_favorite("3");
    properties.clear_filters();
    assert_eq!(properties.state().filtered_properties.len(), 6);
    assert_eq!(properties.favorites().len(), 1);

    chat.fetch_chat_rooms().await;
    chat.fetch_messages("3").await;
    chat.set_current_room(Some("3"));
    chat.send_message("3", "hello").await;

    let state = chat.state();
    assert_eq!(state.chat_rooms[0].id, "3");
    assert_eq!(state.messages["3"].len(), 2);
    assert_eq!(
        state.chat_rooms[0].last_message.as_ref().map(|m| m.content.as_str()),
        Some("hello")
    );
}
