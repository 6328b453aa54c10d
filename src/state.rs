// Shared state structs to avoid circular dependencies.
// These are used by the session facade and can be tested independently.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::events::SessionEvent;

/// Host-assigned tab identifier. Unique among currently-open tabs,
/// not stable across close/reopen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fallback shown for tabs that have no title yet (e.g. still loading).
pub const UNTITLED_TAB: &str = "New Tab";

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    /// A tab may not have a title yet; absence is never an error.
    pub title: Option<String>,
    /// Passed through from the host, never interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<i64>,
}

impl Tab {
    pub fn new(id: TabId, title: Option<impl Into<String>>) -> Self {
        Self {
            id,
            title: title.map(Into::into),
            url: None,
            favicon: None,
            window_id: None,
            group: None,
        }
    }

    /// Title for display purposes only. The filter never sees the fallback.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED_TAB)
    }
}

/// A tab archived after a confirmed close (in-memory only, see modules::closed_tabs).
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTab {
    pub id: TabId,
    pub title: Option<String>,
    pub url: Option<String>,
    pub closed_at: DateTime<Utc>,
}

impl From<&Tab> for ClosedTab {
    fn from(tab: &Tab) -> Self {
        Self {
            id: tab.id,
            title: tab.title.clone(),
            url: tab.url.clone(),
            closed_at: Utc::now(),
        }
    }
}

/// Shared session state: the tab snapshot plus cold bookkeeping.
///
/// The snapshot is the single source of truth for the view. It is held in an
/// `ArcSwap` so readers always see either the pre- or post-mutation sequence,
/// never a torn state, without taking a lock on the hot path.
pub struct SessionState {
    snapshot: ArcSwap<Vec<Tab>>,
    pub closed_tabs: Mutex<VecDeque<ClosedTab>>,
    last_synced_at: Mutex<Option<DateTime<Utc>>>,
    events: broadcast::Sender<SessionEvent>,
}

const EVENT_CHANNEL_CAPACITY: usize = 64;

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Create an empty session. The snapshot stays empty-but-valid until the
    /// first sync replaces it.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            snapshot: ArcSwap::from_pointee(Vec::new()),
            closed_tabs: Mutex::new(VecDeque::new()),
            last_synced_at: Mutex::new(None),
            events,
        }
    }

    /// Current snapshot. Cheap clone of an `Arc`; safe to hold across awaits.
    pub fn snapshot(&self) -> Arc<Vec<Tab>> {
        self.snapshot.load_full()
    }

    pub fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.load().is_empty()
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.snapshot.load().iter().any(|t| t.id == id)
    }

    pub fn get(&self, id: TabId) -> Option<Tab> {
        self.snapshot.load().iter().find(|t| t.id == id).cloned()
    }

    /// Atomic full replace, used on initial load and full re-sync.
    ///
    /// Host enumeration order is preserved. Duplicate ids should not happen,
    /// but the uniqueness invariant is enforced here anyway since this is the
    /// single entry point for host data: first occurrence wins.
    pub fn replace(&self, tabs: Vec<Tab>) {
        let mut seen = std::collections::HashSet::with_capacity(tabs.len());
        let deduped: Vec<Tab> = tabs.into_iter().filter(|t| seen.insert(t.id)).collect();
        self.snapshot.store(Arc::new(deduped));
    }

    /// Remove one tab by id. Idempotent: removing an absent id is a no-op.
    /// Returns the removed tab, if any.
    pub fn remove_by_id(&self, id: TabId) -> Option<Tab> {
        let previous = self.snapshot.rcu(|tabs| {
            tabs.iter()
                .filter(|t| t.id != id)
                .cloned()
                .collect::<Vec<Tab>>()
        });
        previous.iter().find(|t| t.id == id).cloned()
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        *self.last_synced_at.lock().unwrap()
    }

    pub(crate) fn mark_synced(&self) {
        *self.last_synced_at.lock().unwrap() = Some(Utc::now());
    }

    /// Subscribe to session change events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Lossy emit: if nobody is listening the event is dropped.
    pub(crate) fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}
