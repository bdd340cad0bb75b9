//! Privacy-notice acknowledgement.
//!
//! First-visit dialog: shown until the visitor acknowledges it, then never
//! again for that browser profile. The acknowledgement is a one-shot write
//! under the `"privacy-notice"` key; readers accept any non-empty value, so
//! older sentinels keep working if the written value ever changes.
//!
//! While the notice is shown it blocks the page and offers exactly one way
//! out: acknowledging it. There is no close-without-acknowledging
//! affordance and no programmatic way back to [`NoticeState::Shown`] —
//! re-surfacing the dialog requires the stored preference to be absent,
//! i.e. a fresh profile or cleared storage.

use crate::prefs::{PRIVACY_KEY, PreferenceStore};

/// Sentinel written on acknowledgement.
const ACK_VALUE: &str = "displayed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeState {
    Shown,
    Dismissed,
}

/// One-shot acknowledgement machine over an injectable store.
pub struct PrivacyNotice<S> {
    store: S,
    state: NoticeState,
}

impl<S: PreferenceStore> PrivacyNotice<S> {
    /// Compute the initial state from the store. Runs once per page load.
    pub fn initialize(store: S) -> Self {
        let acknowledged = store
            .get(PRIVACY_KEY)
            .is_some_and(|value| !value.is_empty());
        Self {
            store,
            state: if acknowledged {
                NoticeState::Dismissed
            } else {
                NoticeState::Shown
            },
        }
    }

    /// Dismiss the notice and persist the acknowledgement.
    ///
    /// Calling this when already dismissed is a no-op — UI event ordering
    /// can deliver redundant clicks, and they must not fail or write again.
    pub fn acknowledge(&mut self) {
        if self.state == NoticeState::Shown {
            self.store.set(PRIVACY_KEY, ACK_VALUE);
            self.state = NoticeState::Dismissed;
        }
    }

    pub fn state(&self) -> NoticeState {
        self.state
    }

    pub fn is_acknowledged(&self) -> bool {
        self.state == NoticeState::Dismissed
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
