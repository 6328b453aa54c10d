// Command dispatch and reconciliation.
// User intents (group-selected, close-one) are translated into host calls;
// the snapshot is mutated only on confirmed host outcomes so the view never
// diverges from host truth.

use log::{debug, info, warn};
use thiserror::Error;

use crate::events::SessionEvent;
use crate::host::{GroupHandle, HostError, TabHost};
use crate::modules::closed_tabs;
use crate::state::{SessionState, TabId};

/// Label applied when grouping without an explicit one.
pub const DEFAULT_GROUP_LABEL: &str = "Grouped Tabs";

/// Command-level failures, returned as typed results (no silent drops).
#[derive(Debug, Error)]
pub enum CommandError {
    /// A grouping target vanished before the host call completed. Re-sync
    /// and retry.
    #[error("stale selection: tab(s) {missing:?} no longer open")]
    StaleSelection { missing: Vec<TabId> },
    /// The group exists at the host but labeling/collapsing it failed.
    /// Warning only: grouping already reflects user intent, nothing is
    /// rolled back.
    #[error("group {handle} formed but appearance update failed: {source}")]
    PartialGroupApply {
        handle: GroupHandle,
        #[source]
        source: HostError,
    },
    /// Host-layer failure unrelated to id validity. The snapshot keeps the
    /// last known good state.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl CommandError {
    /// Whether retrying can succeed: stale selections after a re-sync,
    /// host-unavailable failures as-is.
    pub fn is_retryable(&self) -> bool {
        match self {
            CommandError::StaleSelection { .. } => true,
            CommandError::PartialGroupApply { .. } => false,
            CommandError::Host(e) => e.is_retryable(),
        }
    }
}

/// Which ids from a selection are missing from the snapshot, in selection
/// order. Pure precondition check for `group_tabs`.
fn missing_from_snapshot(state: &SessionState, tab_ids: &[TabId]) -> Vec<TabId> {
    let snapshot = state.snapshot();
    tab_ids
        .iter()
        .copied()
        .filter(|id| !snapshot.iter().any(|t| t.id == *id))
        .collect()
}

/// Group `tab_ids` at the host, then label the group and collapse it.
///
/// Empty selection is a no-op (`Ok(None)`, no host call). Any id absent from
/// the snapshot, or rejected by the host as unknown, fails the whole command
/// with `StaleSelection` and leaves the snapshot untouched. A successful
/// group never mutates the snapshot: tab identities are unchanged by
/// grouping.
pub async fn group_tabs<H: TabHost>(
    state: &SessionState,
    host: &H,
    tab_ids: &[TabId],
    label: &str,
) -> Result<Option<GroupHandle>, CommandError> {
    if tab_ids.is_empty() {
        debug!("[Tabs] Group requested with empty selection, skipping");
        return Ok(None);
    }

    let missing = missing_from_snapshot(state, tab_ids);
    if !missing.is_empty() {
        warn!("[Tabs] Group selection stale before dispatch: {:?}", missing);
        return Err(CommandError::StaleSelection { missing });
    }

    let handle = match host.group(tab_ids).await {
        Ok(handle) => handle,
        Err(HostError::TabNotFound(id)) => {
            warn!("[Tabs] Group rejected by host, tab {} gone", id);
            return Err(CommandError::StaleSelection { missing: vec![id] });
        }
        Err(e) => return Err(CommandError::Host(e)),
    };

    // Failure boundary: the group already exists at the host from here on.
    if let Err(e) = host.set_group_appearance(handle, label, true).await {
        warn!(
            "[Tabs] Group {} formed but appearance update failed: {}",
            handle, e
        );
        state.emit(SessionEvent::GroupAppearanceSkipped { handle });
        return Err(CommandError::PartialGroupApply { handle, source: e });
    }

    info!(
        "[Tabs] Grouped {} tab(s) under '{}' (group {})",
        tab_ids.len(),
        label,
        handle
    );
    state.emit(SessionEvent::GroupFormed {
        handle,
        count: tab_ids.len(),
    });
    Ok(Some(handle))
}

/// Close one tab and reconcile the snapshot.
///
/// An id already absent from the snapshot is already-satisfied: no host
/// call, no error. A host-side "not found" is normalized to success too,
/// since the net desired state (id absent) holds regardless of which path
/// got there. Any other host failure leaves the snapshot untouched.
pub async fn close_tab<H: TabHost>(
    state: &SessionState,
    host: &H,
    id: TabId,
) -> Result<(), CommandError> {
    if !state.contains(id) {
        debug!("[Tabs] Close of absent tab {}, already satisfied", id);
        return Ok(());
    }

    match host.close_tab(id).await {
        Ok(()) => {
            if let Some(tab) = state.remove_by_id(id) {
                closed_tabs::archive_tab(state, &tab);
            }
            info!("[Tabs] Closed tab {}", id);
            state.emit(SessionEvent::TabClosed { id });
            Ok(())
        }
        Err(HostError::TabNotFound(_)) => {
            // Raced with an external close; apply the removal locally anyway.
            debug!("[Tabs] Tab {} already gone at host, removing locally", id);
            state.remove_by_id(id);
            state.emit(SessionEvent::TabClosed { id });
            Ok(())
        }
        Err(e) => Err(CommandError::Host(e)),
    }
}
