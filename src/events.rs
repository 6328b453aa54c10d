// Session change notifications.
// Mutations publish these on a broadcast channel so an embedding UI can
// re-render without polling. Delivery is lossy: no subscriber, no event.

use serde::Serialize;

use crate::host::GroupHandle;
use crate::state::TabId;

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SessionEvent {
    /// The snapshot was fully replaced by a sync.
    #[serde(rename_all = "camelCase")]
    TabsReplaced { count: usize },
    /// A tab was removed from the snapshot after a confirmed close.
    #[serde(rename_all = "camelCase")]
    TabClosed { id: TabId },
    /// A group was formed and labeled.
    #[serde(rename_all = "camelCase")]
    GroupFormed { handle: GroupHandle, count: usize },
    /// Group exists at the host but the label/collapse step failed.
    /// Warning only; nothing is rolled back.
    #[serde(rename_all = "camelCase")]
    GroupAppearanceSkipped { handle: GroupHandle },
}
