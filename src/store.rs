//! In-memory cache of the event collection.
//!
//! The server is authoritative. The cache is replaced wholesale by every
//! fetch, grows by one after a successful add and shrinks after a delete.
//! Updates leave it alone; callers reload to see them.

use eventlist_core::{Event, EventId, EventListResult, EventPatch, NewEvent};

use crate::api::{DeleteAck, EventApi};

pub struct EventStore<A> {
    api: A,
    events: Vec<Event>,
}

impl<A: EventApi> EventStore<A> {
    pub fn new(api: A) -> Self {
        EventStore {
            api,
            events: Vec::new(),
        }
    }

    /// The last-fetched events, in server order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn find(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Replace the cache with the server's collection.
    pub async fn fetch_events(&mut self) -> EventListResult<&[Event]> {
        self.events = self.api.get_events().await?;
        tracing::debug!(count = self.events.len(), "fetched events");
        Ok(&self.events)
    }

    /// Create `event` server-side and append the returned record.
    pub async fn add_event(&mut self, event: NewEvent) -> EventListResult<Event> {
        let created = self.api.post_event(&event).await?;
        self.events.push(created.clone());
        Ok(created)
    }

    /// Delete `id` server-side, then drop it from the cache. Removing an id
    /// the server no longer has is not an error.
    pub async fn remove_event(&mut self, id: EventId) -> EventListResult<DeleteAck> {
        let ack = self.api.delete_event(id).await?;
        self.events.retain(|e| e.id != id);
        Ok(ack)
    }

    /// Update `id` server-side. The cache is not touched.
    pub async fn update_event(&mut self, id: EventId, patch: EventPatch) -> EventListResult<Event> {
        self.api.update_event(id, &patch).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use eventlist_core::EventListError;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// In-memory [`EventApi`] that assigns ids like the real server and can
    /// be told to fail.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub events: Mutex<Vec<Event>>,
        pub next_id: Mutex<u64>,
        pub fail: Mutex<bool>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        pub fn seeded(events: Vec<Event>) -> Self {
            let next = events.iter().map(|e| e.id.get()).max().unwrap_or(0) + 1;
            FakeApi {
                events: Mutex::new(events),
                next_id: Mutex::new(next),
                ..Default::default()
            }
        }

        pub fn set_failing(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> EventListResult<()> {
            self.calls.lock().unwrap().push(call);
            if *self.fail.lock().unwrap() {
                return Err(EventListError::Transport("connection refused".into()));
            }
            Ok(())
        }
    }

    impl EventApi for &FakeApi {
        async fn get_events(&self) -> EventListResult<Vec<Event>> {
            self.record("GET".into())?;
            Ok(self.events.lock().unwrap().clone())
        }

        async fn post_event(&self, event: &NewEvent) -> EventListResult<Event> {
            self.record("POST".into())?;
            let mut next = self.next_id.lock().unwrap();
            let id = (*next).max(1);
            *next = id + 1;
            let created = Event::from_new(id.to_string().parse()?, event.clone());
            self.events.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update_event(&self, id: EventId, patch: &EventPatch) -> EventListResult<Event> {
            self.record(format!("PUT {id}"))?;
            let mut events = self.events.lock().unwrap();
            let event = events
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| EventListError::Status {
                    status: 404,
                    message: format!("Event not found: {id}"),
                })?;
            patch.clone().apply_to(event);
            Ok(event.clone())
        }

        async fn delete_event(&self, id: EventId) -> EventListResult<DeleteAck> {
            self.record(format!("DELETE {id}"))?;
            let mut events = self.events.lock().unwrap();
            let before = events.len();
            events.retain(|e| e.id != id);
            if events.len() == before {
                Ok(DeleteAck::AlreadyAbsent)
            } else {
                Ok(DeleteAck::Deleted(serde_json::json!({})))
            }
        }
    }

    pub(crate) fn event(id: u64, name: &str, start: &str, end: &str) -> Event {
        Event::from_new(id.to_string().parse().unwrap(), NewEvent::new(name, start, end))
    }

    #[tokio::test]
    async fn test_fetch_replaces_cache_with_server_collection() {
        let standup = event(1, "Standup", "2024-01-01", "2024-01-01");
        let api = FakeApi::seeded(vec![standup.clone()]);
        let mut store = EventStore::new(&api);

        let fetched = store.fetch_events().await.unwrap().to_vec();

        assert_eq!(fetched, vec![standup.clone()]);
        assert_eq!(store.events(), &[standup]);
    }

    #[tokio::test]
    async fn test_fetch_keeps_duplicates_and_order() {
        let a = event(2, "Same", "2024-01-01", "2024-01-01");
        let b = event(1, "Same", "2024-01-01", "2024-01-01");
        let api = FakeApi::seeded(vec![a.clone(), b.clone()]);
        let mut store = EventStore::new(&api);

        store.fetch_events().await.unwrap();

        assert_eq!(store.events().len(), api.events.lock().unwrap().len());
        assert_eq!(store.events(), &[a, b]);
    }

    #[tokio::test]
    async fn test_add_appends_server_record_without_refetch() {
        let api = FakeApi::seeded(vec![event(6, "Existing", "2024-01-01", "2024-01-01")]);
        let mut store = EventStore::new(&api);
        store.fetch_events().await.unwrap();

        let created = store
            .add_event(NewEvent::new("Demo", "2024-02-01", "2024-02-02"))
            .await
            .unwrap();

        assert_eq!(created, event(7, "Demo", "2024-02-01", "2024-02-02"));
        assert_eq!(store.events().len(), 2);
        assert_eq!(store.find(created.id), Some(&created));
        assert_eq!(api.calls(), vec!["GET", "POST"]);
    }

    #[tokio::test]
    async fn test_remove_parses_row_id_and_filters_cache() {
        let api = FakeApi::seeded(vec![
            event(3, "Gone", "2024-01-01", "2024-01-01"),
            event(4, "Kept", "2024-01-01", "2024-01-01"),
        ]);
        let mut store = EventStore::new(&api);
        store.fetch_events().await.unwrap();

        let id: EventId = "3".parse().unwrap();
        store.remove_event(id).await.unwrap();

        assert!(store.find(id).is_none());
        assert_eq!(store.events().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_absent_id_is_idempotent() {
        let api = FakeApi::seeded(vec![event(3, "Gone", "2024-01-01", "2024-01-01")]);
        let mut store = EventStore::new(&api);
        let id: EventId = "3".parse().unwrap();

        assert!(matches!(store.remove_event(id).await.unwrap(), DeleteAck::Deleted(_)));
        assert_eq!(store.remove_event(id).await.unwrap(), DeleteAck::AlreadyAbsent);
        assert_eq!(store.remove_event(id).await.unwrap(), DeleteAck::AlreadyAbsent);
    }

    #[tokio::test]
    async fn test_update_leaves_cache_until_reload() {
        let api = FakeApi::seeded(vec![event(1, "Old", "2024-01-01", "2024-01-02")]);
        let mut store = EventStore::new(&api);
        store.fetch_events().await.unwrap();
        let id: EventId = "1".parse().unwrap();

        let patch = EventPatch {
            event_name: Some("X".into()),
            ..Default::default()
        };
        let updated = store.update_event(id, patch).await.unwrap();

        assert_eq!(updated, event(1, "X", "2024-01-01", "2024-01-02"));
        assert_eq!(store.find(id).unwrap().event_name, "Old");

        store.fetch_events().await.unwrap();
        assert_eq!(store.find(id).unwrap().event_name, "X");
    }

    #[tokio::test]
    async fn test_failed_mutations_leave_cache_alone() {
        let api = FakeApi::seeded(vec![event(1, "Standup", "2024-01-01", "2024-01-01")]);
        let mut store = EventStore::new(&api);
        store.fetch_events().await.unwrap();
        api.set_failing(true);

        assert!(store.add_event(NewEvent::default()).await.is_err());
        assert!(store.remove_event("1".parse().unwrap()).await.is_err());
        assert!(store.fetch_events().await.is_err());

        assert_eq!(store.events().len(), 1);
    }
}
