//! Command-line host delegate
//!
//! [`ScriptHost`] answers the picker's predicates from a [`HostPolicy`] and
//! keeps what the picker reports in a [`HostHandle`] the command can read once
//! the coordinator owns the delegate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info};

use crate::core::config::HostPolicy;
use crate::core::selection::SelectionSet;
use crate::library::{Asset, AssetCollection, AssetRef};
use crate::ui::delegate::PickerDelegate;

#[derive(Debug, Default)]
struct HostState {
    finished: Option<Vec<AssetRef>>,
    cancelled: bool,
    changes: usize,
}

/// Shared view of what the picker told the host
#[derive(Debug, Clone, Default)]
pub struct HostHandle {
    state: Arc<Mutex<HostState>>,
}

impl HostHandle {
    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assets handed over by `did_finish_picking`
    pub fn finished(&self) -> Option<Vec<AssetRef>> {
        self.lock().finished.clone()
    }

    /// Whether the session was cancelled
    pub fn cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Number of `selection_did_change` calls
    pub fn change_count(&self) -> usize {
        self.lock().changes
    }
}

/// Policy-driven delegate for scripted sessions
#[derive(Debug)]
pub struct ScriptHost {
    policy: HostPolicy,
    handle: HostHandle,
}

impl ScriptHost {
    /// Create a host and the handle to read its results
    pub fn new(policy: HostPolicy) -> (Self, HostHandle) {
        let handle = HostHandle::default();
        let host = Self {
            policy,
            handle: handle.clone(),
        };
        (host, handle)
    }
}

impl PickerDelegate for ScriptHost {
    fn did_finish_picking(&mut self, assets: Vec<AssetRef>) {
        info!("Host received {} picked assets", assets.len());
        self.handle.lock().finished = Some(assets);
    }

    fn did_cancel(&mut self) {
        info!("Host received cancellation");
        self.handle.lock().cancelled = true;
    }

    fn should_enable_asset(&self, _selection: &SelectionSet, asset: &AssetRef) -> bool {
        !self.policy.is_disabled(asset.id().as_str())
    }

    fn should_select_asset(&self, selection: &SelectionSet, asset: &AssetRef) -> bool {
        if self.policy.is_at_capacity(selection.len()) {
            debug!(
                "Refusing '{}': selection is at its limit of {}",
                asset.id(),
                self.policy.max_selection
            );
            return false;
        }
        true
    }

    fn should_deselect_asset(&self, _selection: &SelectionSet, asset: &AssetRef) -> bool {
        let locked = self.policy.is_locked(asset.id().as_str());
        if locked {
            debug!("Refusing to deselect locked asset '{}'", asset.id());
        }
        !locked
    }

    fn did_select_asset(&mut self, selection: &SelectionSet, asset: &AssetRef) {
        debug!("Selected '{}' ({} total)", asset.id(), selection.len());
    }

    fn did_deselect_asset(&mut self, selection: &SelectionSet, asset: &AssetRef) {
        debug!("Deselected '{}' ({} total)", asset.id(), selection.len());
    }

    fn selection_did_change(&mut self, _assets: &[AssetRef]) {
        self.handle.lock().changes += 1;
    }

    fn should_highlight_asset(&self, asset: &AssetRef) -> bool {
        !self.policy.refuses_highlight(asset.id().as_str())
    }

    fn should_scroll_to_bottom(&self, _collection: &dyn AssetCollection) -> bool {
        self.policy.scroll_to_bottom.unwrap_or(true)
    }
}
