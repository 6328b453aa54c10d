// Snapshot synchronization with the host.
// One enumeration query populates the store at startup; the same path serves
// as the on-demand full re-sync for staleness from external changes.

use log::{info, warn};

use crate::events::SessionEvent;
use crate::host::{TabHost, TabScope};
use crate::modules::commands::CommandError;
use crate::state::SessionState;

/// Enumerate the scope at the host and atomically replace the snapshot.
///
/// Until the first successful call the view renders an empty-but-valid
/// state. On enumeration failure the snapshot is left unchanged, so the
/// view degrades to last-known-good rather than going empty. Returns the
/// number of tabs loaded.
pub async fn sync_tabs<H: TabHost>(
    state: &SessionState,
    host: &H,
    scope: TabScope,
) -> Result<usize, CommandError> {
    let tabs = match host.enumerate(scope).await {
        Ok(tabs) => tabs,
        Err(e) => {
            warn!("[Sync] Enumeration failed, keeping last known snapshot: {}", e);
            return Err(CommandError::Host(e));
        }
    };

    let count = tabs.len();
    state.replace(tabs);
    state.mark_synced();
    info!("[Sync] Snapshot replaced with {} tab(s)", count);
    state.emit(SessionEvent::TabsReplaced { count });
    Ok(count)
}
