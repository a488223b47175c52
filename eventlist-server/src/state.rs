use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use eventlist_core::{Event, EventId, EventListError, EventListResult, EventPatch, NewEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// On-disk layout of the data file: `{ "events": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Database {
    /// Ids are one past the largest id in use, so removing the last event
    /// can hand its id out again.
    fn next_id(&self) -> EventListResult<EventId> {
        match self.events.iter().map(|e| e.id).max() {
            Some(max) => max.next().ok_or(EventListError::IdsExhausted(max)),
            None => Ok(EventId::first()),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    db: Arc<RwLock<Database>>,
    data_file: Option<PathBuf>,
}

impl AppState {
    /// Empty, memory-only collection.
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Memory-only collection starting with `events`.
    pub fn seeded(events: Vec<Event>) -> Self {
        AppState {
            db: Arc::new(RwLock::new(Database { events })),
            data_file: None,
        }
    }

    /// Collection backed by a JSON file. A missing file starts empty and is
    /// created on the first write.
    pub async fn with_data_file(path: PathBuf) -> Result<Self> {
        let db = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Database::default(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        Ok(AppState {
            db: Arc::new(RwLock::new(db)),
            data_file: Some(path),
        })
    }

    pub async fn list(&self) -> Vec<Event> {
        self.db.read().await.events.clone()
    }

    pub async fn get(&self, id: EventId) -> EventListResult<Event> {
        self.db
            .read()
            .await
            .events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| EventListError::NotFound(id.to_string()))
    }

    pub async fn create(&self, new: NewEvent) -> EventListResult<Event> {
        let mut db = self.db.write().await;
        let event = Event::from_new(db.next_id()?, new);
        let mut next = db.clone();
        next.events.push(event.clone());
        self.commit(&mut db, next).await?;
        Ok(event)
    }

    pub async fn update(&self, id: EventId, patch: EventPatch) -> EventListResult<Event> {
        let mut db = self.db.write().await;
        let mut next = db.clone();
        let event = next
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| EventListError::NotFound(id.to_string()))?;
        patch.apply_to(event);
        let updated = event.clone();
        self.commit(&mut db, next).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: EventId) -> EventListResult<Event> {
        let mut db = self.db.write().await;
        let index = db
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EventListError::NotFound(id.to_string()))?;
        let mut next = db.clone();
        let removed = next.events.remove(index);
        self.commit(&mut db, next).await?;
        Ok(removed)
    }

    /// Write `next` out, then make it the live collection. A failed write
    /// leaves `db` untouched.
    async fn commit(&self, db: &mut Database, next: Database) -> EventListResult<()> {
        self.persist(&next).await?;
        *db = next;
        Ok(())
    }

    async fn persist(&self, db: &Database) -> EventListResult<()> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(db)?;
        tokio::fs::write(path, content).await?;
        tracing::debug!(path = %path.display(), events = db.events.len(), "saved collection");
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
