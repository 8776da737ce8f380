//! Session persistence.
//!
//! One record per disease pathway, overwritten on every turn and cleared
//! once the pathway's summary has been consumed. The in-memory tier is the
//! default; callers with a durable tier implement [`SessionStore`] over it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use neuriq_core::analyzer::BoxFuture;
use neuriq_core::disease::Disease;
use neuriq_core::turn::Turn;
use neuriq_dialogue::session::DialogueSession;

use crate::error::TriageError;

/// Persisted state for one pathway.
///
/// The snapshot embeds the ordered, capped turn log, so a resumed machine
/// picks up at exactly the step it left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub disease: Disease,
    pub session: DialogueSession,
}

impl SessionRecord {
    pub fn turns(&self) -> &[Turn] {
        self.session.history.turns()
    }
}

/// Where records live between turns. Methods return boxed futures for dyn
/// compatibility.
pub trait SessionStore: Send + Sync {
    fn load(&self, disease: Disease) -> BoxFuture<'_, Result<Option<SessionRecord>, TriageError>>;
    fn save(&self, record: SessionRecord) -> BoxFuture<'_, Result<(), TriageError>>;
    fn clear(&self, disease: Disease) -> BoxFuture<'_, Result<(), TriageError>>;
}

/// In-memory store, one slot per pathway.
#[derive(Default)]
pub struct MemorySessionStore {
    records: Mutex<HashMap<Disease, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, disease: Disease) -> BoxFuture<'_, Result<Option<SessionRecord>, TriageError>> {
        Box::pin(async move { Ok(self.records.lock().await.get(&disease).cloned()) })
    }

    fn save(&self, record: SessionRecord) -> BoxFuture<'_, Result<(), TriageError>> {
        Box::pin(async move {
            self.records.lock().await.insert(record.disease, record);
            Ok(())
        })
    }

    fn clear(&self, disease: Disease) -> BoxFuture<'_, Result<(), TriageError>> {
        Box::pin(async move {
            self.records.lock().await.remove(&disease);
            Ok(())
        })
    }
}
