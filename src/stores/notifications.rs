use crate::models::Notification;
use crate::sources::NotificationSource;
use crate::storage::{self, KeyValueStorage, NOTIFICATIONS_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct NotificationsState {
    pub notifications: Vec<Notification>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Persisted part of the state
#[derive(Debug, Default, Serialize, Deserialize)]
struct Persisted {
    notifications: Vec<Notification>,
}

pub struct NotificationsStore {
    source: Arc<dyn NotificationSource>,
    storage: Arc<dyn KeyValueStorage>,
    state: watch::Sender<NotificationsState>,
}

impl NotificationsStore {
    pub fn new(source: Arc<dyn NotificationSource>, storage: Arc<dyn KeyValueStorage>) -> Self {
        let (state, _) = watch::channel(NotificationsState::default());
        Self {
            source,
            storage,
            state,
        }
    }

    /// Current snapshot. Do not hold it across an await.
    pub fn state(&self) -> watch::Ref<'_, NotificationsState> {
        self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<NotificationsState> {
        self.state.subscribe()
    }

    /// Reload the notifications persisted by a previous run
    pub async fn restore(&self) -> storage::Result<()> {
        if let Some(persisted) =
            storage::load::<Persisted>(self.storage.as_ref(), NOTIFICATIONS_NAMESPACE).await?
        {
            debug!("Restored {} notifications", persisted.notifications.len());
            self.state
                .send_modify(|state| state.notifications = persisted.notifications);
        }
        Ok(())
    }

    pub async fn fetch(&self) {
        debug!("Fetching notifications");
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match self.source.fetch_notifications().await {
            Ok(notifications) => {
                info!("Loaded {} notifications", notifications.len());
                self.state.send_modify(|state| {
                    state.notifications = notifications;
                    state.is_loading = false;
                });
                self.persist().await;
            }
            Err(err) => {
                warn!("Failed to fetch notifications: {}", err);
                self.state.send_modify(|state| {
                    state.error = Some(err.to_string());
                    state.is_loading = false;
                });
            }
        }
    }

    pub async fn mark_as_read(&self, notification_id: &str) {
        self.state.send_modify(|state| {
            state
                .notifications
                .iter_mut()
                .filter(|notification| notification.id == notification_id)
                .for_each(|notification| notification.read = true);
        });
        self.persist().await;
    }

    pub async fn mark_all_as_read(&self) {
        self.state.send_modify(|state| {
            state
                .notifications
                .iter_mut()
                .for_each(|notification| notification.read = true);
        });
        self.persist().await;
    }

    pub async fn delete_notification(&self, notification_id: &str) {
        self.state.send_modify(|state| {
            state
                .notifications
                .retain(|notification| notification.id != notification_id);
        });
        self.persist().await;
    }

    pub fn unread_count(&self) -> usize {
        self.state
            .borrow()
            .notifications
            .iter()
            .filter(|notification| !notification.read)
            .count()
    }

    async fn persist(&self) {
        let persisted = Persisted {
            notifications: self.state.borrow().notifications.clone(),
        };

        if let Err(err) =
            storage::save(self.storage.as_ref(), NOTIFICATIONS_NAMESPACE, &persisted).await
        {
            warn!("Failed to persist notifications: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{fixtures, Delays, MockBackend};
    use crate::storage::MemoryStorage;

    fn store_with(storage: Arc<MemoryStorage>) -> NotificationsStore {
        NotificationsStore::new(Arc::new(MockBackend::default()), storage)
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_loads_the_mock_set() {
        let store = store_with(Arc::new(MemoryStorage::new()));

        store.fetch().await;

        assert_eq!(store.state().notifications, fixtures::notifications());
        assert_eq!(store.unread_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn mark_all_as_read_zeroes_the_unread_count() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        store.fetch().await;

        store.mark_all_as_read().await;
        assert_eq!(store.unread_count(), 0);

        let before = store.state().notifications.clone();
        store.mark_as_read("1").await;
        store.mark_as_read("4").await;
        assert_eq!(store.state().notifications, before);
    }

    #[tokio::test(start_paused = true)]
    async fn mark_as_read_touches_only_the_matching_item() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        store.fetch().await;

        store.mark_as_read("1").await;

        assert_eq!(store.unread_count(), 0);
        let state = store.state();
        for (item, fixture) in state.notifications.iter().zip(fixtures::notifications()) {
            assert_eq!(item.id, fixture.id);
            if item.id == "1" {
                assert!(item.read);
            } else {
                assert_eq!(item, &fixture);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn delete_removes_by_id() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        store.fetch().await;

        store.delete_notification("5").await;
        store.delete_notification("missing").await;

        let state = store.state();
        assert_eq!(state.notifications.len(), 4);
        assert!(state.notifications.iter().all(|n| n.id != "5"));
    }

    #[tokio::test(start_paused = true)]
    async fn state_is_restored_from_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone());
        store.fetch().await;
        store.mark_as_read("1").await;
        store.delete_notification("2").await;

        let restarted = store_with(storage);
        assert!(restarted.state().notifications.is_empty());
        restarted.restore().await.unwrap();

        assert_eq!(restarted.state().notifications, store.state().notifications);
        assert_eq!(restarted.unread_count(), 0);
        assert_eq!(restarted.state().notifications.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_keeps_previous_notifications() {
        let storage = Arc::new(MemoryStorage::new());
        store_with(storage.clone()).fetch().await;

        let offline = NotificationsStore::new(
            Arc::new(MockBackend::failing(Delays::default(), "Offline")),
            storage,
        );
        offline.restore().await.unwrap();
        offline.fetch().await;

        let state = offline.state();
        assert_eq!(state.error.as_deref(), Some("Offline"));
        assert_eq!(state.notifications.len(), fixtures::notifications().len());
    }
}
