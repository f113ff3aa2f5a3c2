//! Picker Coordinator Module
//!
//! The single integration point between the selection model, the host's
//! collection sources and the delegate. The coordinator exclusively owns the
//! session's selection; the host only ever receives copies.
//!
//! # Session lifecycle
//!
//! ```text
//! Idle ──present──▶ Presenting ──finish──▶ Finished
//!                        │
//!                        └──cancel──▶ Cancelled
//! ```
//!
//! Selection and highlight operations are legal only while presenting. Calls
//! in any other state return [`PickerError::InvalidState`].
//!
//! # Gesture path
//!
//! `attempt_*` methods are what a rendering surface calls on user gestures.
//! They run the enablement check before the model is consulted; a disabled
//! asset never reaches the veto hooks. `select_asset` / `deselect_asset` are the
//! programmatic entry points: they skip only the enablement check.
//!
//! The rendering surface refers to collections by index and assets by
//! [`AssetId`]; it never holds the coordinator itself.

use std::fmt;

use log::{debug, error, info, warn};

use crate::core::config::PickerConfig;
use crate::core::error::{PickerError, Result};
use crate::core::selection::{SelectionModel, SelectionOutcome, SelectionSet};
use crate::library::{Asset, AssetCollection, AssetId, AssetRef, CollectionRef};
use crate::ui::delegate::{resolve_gate, DelegateDispatch, Gate, PickerDelegate, PickerEvent};
use crate::ui::events::{NotificationBus, Subscription};
use crate::ui::layout::{ContentSize, GridLayout, TraitContext};

// =============================================================================
// Session State
// =============================================================================

/// Lifecycle state of a picker session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, not yet presented
    Idle,
    /// On screen and accepting gestures
    Presenting,
    /// Finished; the selection has been handed to the host
    Finished,
    /// Cancelled by the user
    Cancelled,
}

impl SessionState {
    /// Whether no further operation is valid
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Finished | SessionState::Cancelled)
    }

    /// Lowercase state name
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Presenting => "presenting",
            SessionState::Finished => "finished",
            SessionState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Read-side views
// =============================================================================

/// Transient per-asset state for rendering a grid cell
///
/// Recomputed on every query; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetState {
    /// Whether the asset accepts gestures
    pub enabled: bool,
    /// Whether the asset is in the selection
    pub selected: bool,
    /// Whether the asset carries the touch-down highlight
    pub highlighted: bool,
    /// 1-based selection badge, only when selection indexes are shown
    pub selection_index: Option<usize>,
}

/// One row of the album list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    /// Index into the coordinator's collection list
    pub index: usize,
    /// Display title
    pub title: String,
    /// Number of assets, only when counts are shown
    pub asset_count: Option<usize>,
}

// =============================================================================
// Coordinator
// =============================================================================

/// Owner and orchestrator of one picker session
pub struct PickerCoordinator {
    state: SessionState,
    model: SelectionModel,
    collections: Vec<CollectionRef>,
    config: PickerConfig,
    delegate: Box<dyn PickerDelegate>,
    bus: NotificationBus,
    highlighted: Option<AssetRef>,
}

impl PickerCoordinator {
    /// Create an idle session
    pub fn new(
        delegate: Box<dyn PickerDelegate>,
        collections: Vec<CollectionRef>,
        config: PickerConfig,
    ) -> Self {
        Self {
            state: SessionState::Idle,
            model: SelectionModel::new(),
            collections,
            config,
            delegate,
            bus: NotificationBus::new(),
            highlighted: None,
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Present the picker with an empty selection
    pub fn present(&mut self) -> Result<()> {
        self.present_with_initial_selection(Vec::new())
    }

    /// Present the picker, seeding the selection without running any hooks
    pub fn present_with_initial_selection<I>(&mut self, assets: I) -> Result<()>
    where
        I: IntoIterator<Item = AssetRef>,
    {
        self.require_state(SessionState::Idle, "present")?;
        self.model.seed(assets);
        self.state = SessionState::Presenting;
        info!(
            "Presenting picker with {} collections, {} assets preselected",
            self.collections.len(),
            self.model.selection().len()
        );
        Ok(())
    }

    /// Finish the session, handing the ordered selection to the delegate
    ///
    /// Returns the same snapshot the delegate received.
    pub fn finish(&mut self) -> Result<Vec<AssetRef>> {
        self.require_state(SessionState::Presenting, "finish")?;
        self.state = SessionState::Finished;
        self.highlighted = None;

        let snapshot = self.model.selection().snapshot();
        info!("Finished picking {} assets", snapshot.len());
        self.dispatch().emit(PickerEvent::DidFinish(&snapshot));
        Ok(snapshot)
    }

    /// Cancel the session without reporting the selection
    pub fn cancel(&mut self) -> Result<()> {
        self.require_state(SessionState::Presenting, "cancel")?;
        self.state = SessionState::Cancelled;
        self.highlighted = None;

        info!("Picker cancelled");
        self.dispatch().emit(PickerEvent::DidCancel);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    /// User tapped an unselected asset
    pub fn attempt_select(&mut self, asset: &AssetRef) -> Result<SelectionOutcome> {
        self.require_state(SessionState::Presenting, "attempt_select")?;
        if !self.is_enabled(asset) {
            debug!("Ignoring select of disabled asset '{}'", asset.id());
            return Ok(SelectionOutcome::Disabled);
        }
        Ok(self.select_unchecked(asset))
    }

    /// User tapped a selected asset
    pub fn attempt_deselect(&mut self, asset: &AssetRef) -> Result<SelectionOutcome> {
        self.require_state(SessionState::Presenting, "attempt_deselect")?;
        if !self.is_enabled(asset) {
            debug!("Ignoring deselect of disabled asset '{}'", asset.id());
            return Ok(SelectionOutcome::Disabled);
        }
        Ok(self.deselect_unchecked(asset))
    }

    /// User tapped an asset: deselect if selected, else select
    pub fn attempt_toggle(&mut self, asset: &AssetRef) -> Result<SelectionOutcome> {
        if self.model.is_selected(asset) {
            self.attempt_deselect(asset)
        } else {
            self.attempt_select(asset)
        }
    }

    /// Programmatically select `asset`, skipping the enablement check
    ///
    /// The `should_select_asset` veto still applies.
    pub fn select_asset(&mut self, asset: &AssetRef) -> Result<SelectionOutcome> {
        self.require_state(SessionState::Presenting, "select_asset")?;
        Ok(self.select_unchecked(asset))
    }

    /// Programmatically deselect `asset`, skipping the enablement check
    ///
    /// The `should_deselect_asset` veto still applies.
    pub fn deselect_asset(&mut self, asset: &AssetRef) -> Result<SelectionOutcome> {
        self.require_state(SessionState::Presenting, "deselect_asset")?;
        Ok(self.deselect_unchecked(asset))
    }

    /// Touch down on `asset`
    ///
    /// Returns whether the asset ends up highlighted. A previously highlighted
    /// asset is unhighlighted first.
    pub fn attempt_highlight(&mut self, asset: &AssetRef) -> Result<bool> {
        self.require_state(SessionState::Presenting, "attempt_highlight")?;

        if self.is_highlighted(asset) {
            return Ok(true);
        }
        if !resolve_gate(
            &*self.delegate,
            Gate::Highlight,
            self.model.selection(),
            asset,
        ) {
            return Ok(false);
        }

        if let Some(previous) = self.highlighted.take() {
            self.dispatch().emit(PickerEvent::DidUnhighlight(&previous));
        }
        self.highlighted = Some(asset.clone());
        self.dispatch().emit(PickerEvent::DidHighlight(asset));
        Ok(true)
    }

    /// Touch up: clear the current highlight, if any
    pub fn unhighlight(&mut self) -> Result<Option<AssetRef>> {
        self.require_state(SessionState::Presenting, "unhighlight")?;
        let previous = self.highlighted.take();
        if let Some(ref asset) = previous {
            self.dispatch().emit(PickerEvent::DidUnhighlight(asset));
        }
        Ok(previous)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Session configuration
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Read-only view of the selection
    pub fn selection(&self) -> &SelectionSet {
        self.model.selection()
    }

    /// Copy of the ordered selection
    pub fn selected_assets(&self) -> Vec<AssetRef> {
        self.model.selection().snapshot()
    }

    /// Whether `asset` is selected
    pub fn is_selected(&self, asset: &AssetRef) -> bool {
        self.model.is_selected(asset)
    }

    /// 1-based selection position of `asset`
    pub fn selection_order(&self, asset: &AssetRef) -> Option<usize> {
        self.model.selection_order(asset)
    }

    /// Whether the delegate enables `asset` for gestures
    pub fn is_enabled(&self, asset: &AssetRef) -> bool {
        resolve_gate(
            &*self.delegate,
            Gate::Enable,
            self.model.selection(),
            asset,
        )
    }

    /// Whether `asset` carries the highlight
    pub fn is_highlighted(&self, asset: &AssetRef) -> bool {
        self.highlighted
            .as_ref()
            .is_some_and(|current| current.id() == asset.id())
    }

    /// Everything a grid cell needs to render `asset`
    pub fn asset_state(&self, asset: &AssetRef) -> AssetState {
        let order = self.model.selection_order(asset);
        AssetState {
            enabled: self.is_enabled(asset),
            selected: order.is_some(),
            highlighted: self.is_highlighted(asset),
            selection_index: order.filter(|_| self.config.shows_selection_index),
        }
    }

    /// Whether the cancel affordance should be shown
    pub fn shows_cancel_button(&self) -> bool {
        self.config.shows_cancel_button
    }

    /// Whether "Done" is meaningful (something is selected)
    pub fn done_enabled(&self) -> bool {
        !self.model.selection().is_empty()
    }

    /// All collections, in host order
    pub fn collections(&self) -> &[CollectionRef] {
        &self.collections
    }

    /// Collection at `index`
    pub fn collection(&self, index: usize) -> Result<&CollectionRef> {
        self.collections
            .get(index)
            .ok_or(PickerError::UnknownCollection(index))
    }

    /// Album list rows, honouring the empty-album and count toggles
    pub fn visible_collections(&self) -> Vec<CollectionSummary> {
        self.collections
            .iter()
            .enumerate()
            .filter(|(_, collection)| self.config.shows_empty_albums || !collection.is_empty())
            .map(|(index, collection)| CollectionSummary {
                index,
                title: collection.title().to_string(),
                asset_count: self
                    .config
                    .shows_number_of_assets
                    .then(|| collection.asset_count()),
            })
            .collect()
    }

    /// Asset at `item` within collection `index`, in display order
    pub fn asset_at(&self, index: usize, item: usize) -> Result<Option<AssetRef>> {
        Ok(self.collection(index)?.assets().nth(item))
    }

    /// Find an asset by id within collection `index`
    pub fn find_asset(&self, index: usize, id: &AssetId) -> Result<Option<AssetRef>> {
        Ok(self
            .collection(index)?
            .assets()
            .find(|asset| &asset.id() == id))
    }

    /// Whether collection `index` should open scrolled to its last asset
    pub fn should_scroll_to_bottom(&self, index: usize) -> Result<bool> {
        let collection = self.collection(index)?;
        Ok(self.delegate.should_scroll_to_bottom(collection.as_ref()))
    }

    /// Grid layout for the given content size and traits
    pub fn layout_for(&self, content_size: ContentSize, traits: TraitContext) -> GridLayout {
        self.delegate.collection_layout_for(content_size, traits)
    }

    /// Subscribe to selection notifications
    pub fn subscribe(&mut self) -> Subscription {
        self.bus.subscribe()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn require_state(&self, expected: SessionState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            return Ok(());
        }
        error!(
            "Picker contract violation: '{}' called while {}",
            operation, self.state
        );
        Err(PickerError::InvalidState {
            operation,
            state: self.state,
        })
    }

    fn dispatch(&mut self) -> DelegateDispatch<'_> {
        DelegateDispatch::new(&mut *self.delegate, &mut self.bus)
    }

    fn select_unchecked(&mut self, asset: &AssetRef) -> SelectionOutcome {
        let mut dispatch = DelegateDispatch::new(&mut *self.delegate, &mut self.bus);
        self.model.select(asset, &mut dispatch)
    }

    fn deselect_unchecked(&mut self, asset: &AssetRef) -> SelectionOutcome {
        let mut dispatch = DelegateDispatch::new(&mut *self.delegate, &mut self.bus);
        self.model.deselect(asset, &mut dispatch)
    }
}

impl fmt::Debug for PickerCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerCoordinator")
            .field("state", &self.state)
            .field("selection", &self.model.selection().len())
            .field("collections", &self.collections.len())
            .field("config", &self.config)
            .field("subscribers", &self.bus.subscriber_count())
            .finish()
    }
}

impl Drop for PickerCoordinator {
    fn drop(&mut self) {
        if self.state == SessionState::Presenting {
            warn!(
                "Picker dropped while presenting; {} selected assets were never reported",
                self.model.selection().len()
            );
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{MemoryAsset, MemoryCollection};
    use crate::testdb::{CallLog, DelegateCall, RecordingDelegate};

    fn coordinator_with(delegate: RecordingDelegate) -> PickerCoordinator {
        let collections = vec![
            MemoryCollection::new("Recents")
                .with_asset(MemoryAsset::photo("a"))
                .with_asset(MemoryAsset::photo("b"))
                .into_shared(),
            MemoryCollection::new("Hidden").into_shared(),
        ];
        PickerCoordinator::new(Box::new(delegate), collections, PickerConfig::default())
    }

    fn presenting(delegate: RecordingDelegate) -> PickerCoordinator {
        let mut picker = coordinator_with(delegate);
        picker.present().unwrap();
        picker
    }

    #[test]
    fn test_operations_before_present_are_rejected() {
        let mut picker = coordinator_with(RecordingDelegate::new());
        let a = MemoryAsset::photo("a");
        let err = picker.attempt_select(&a).unwrap_err();
        assert!(matches!(
            err,
            PickerError::InvalidState {
                state: SessionState::Idle,
                ..
            }
        ));
        assert!(picker.finish().is_err());
        assert!(picker.cancel().is_err());
    }

    #[test]
    fn test_present_twice_is_rejected() {
        let mut picker = presenting(RecordingDelegate::new());
        assert!(picker.present().is_err());
        assert_eq!(picker.state(), SessionState::Presenting);
    }

    #[test]
    fn test_seed_does_not_run_hooks() {
        let delegate = RecordingDelegate::new().vetoing_select(&["a"]);
        let log = delegate.log();
        let mut picker = coordinator_with(delegate);
        picker
            .present_with_initial_selection(vec![MemoryAsset::photo("a")])
            .unwrap();

        assert!(picker.is_selected(&MemoryAsset::photo("a")));
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_disabled_asset_never_reaches_veto() {
        let delegate = RecordingDelegate::new().disabling(&["b"]);
        let log = delegate.log();
        let mut picker = presenting(delegate);
        let b = MemoryAsset::photo("b");

        assert_eq!(picker.attempt_select(&b).unwrap(), SelectionOutcome::Disabled);
        assert!(!picker.is_selected(&b));
        assert!(!log.contains(&DelegateCall::ShouldSelect("b".into())));
    }

    #[test]
    fn test_programmatic_select_bypasses_enablement_not_veto() {
        let delegate = RecordingDelegate::new()
            .disabling(&["a", "b"])
            .vetoing_select(&["b"]);
        let mut picker = presenting(delegate);
        let a = MemoryAsset::photo("a");
        let b = MemoryAsset::photo("b");

        assert_eq!(picker.select_asset(&a).unwrap(), SelectionOutcome::Committed);
        assert_eq!(picker.select_asset(&b).unwrap(), SelectionOutcome::Vetoed);
        assert_eq!(picker.deselect_asset(&a).unwrap(), SelectionOutcome::Committed);
    }

    #[test]
    fn test_finish_reports_snapshot_and_closes_session() {
        let delegate = RecordingDelegate::new();
        let log = delegate.log();
        let mut picker = presenting(delegate);
        let a = MemoryAsset::photo("a");
        let b = MemoryAsset::photo("b");
        picker.attempt_select(&b).unwrap();
        picker.attempt_select(&a).unwrap();

        let snapshot = picker.finish().unwrap();
        let ids: Vec<_> = snapshot.iter().map(|x| x.id().to_string()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(log.finished(), Some(vec!["b".to_string(), "a".to_string()]));

        assert!(picker.attempt_select(&a).unwrap_err().is_contract_violation());
        assert!(picker.attempt_deselect(&a).is_err());
        assert!(picker.finish().is_err());
        assert!(picker.cancel().is_err());
        assert_eq!(log.terminal_calls(), 1);
    }

    #[test]
    fn test_cancel_does_not_report_selection() {
        let delegate = RecordingDelegate::new();
        let log = delegate.log();
        let mut picker = presenting(delegate);
        picker.attempt_select(&MemoryAsset::photo("a")).unwrap();
        picker.cancel().unwrap();

        assert_eq!(picker.state(), SessionState::Cancelled);
        assert!(log.finished().is_none());
        assert!(log.contains(&DelegateCall::DidCancel));
        assert!(picker.finish().is_err());
        assert_eq!(log.terminal_calls(), 1);
    }

    #[test]
    fn test_toggle_through_gestures() {
        let mut picker = presenting(RecordingDelegate::new());
        let a = MemoryAsset::photo("a");
        picker.attempt_toggle(&a).unwrap();
        assert!(picker.is_selected(&a));
        picker.attempt_toggle(&a).unwrap();
        assert!(!picker.is_selected(&a));
    }

    #[test]
    fn test_highlight_lifecycle() {
        let delegate = RecordingDelegate::new().refusing_highlight(&["b"]);
        let log = delegate.log();
        let mut picker = presenting(delegate);
        let a = MemoryAsset::photo("a");
        let b = MemoryAsset::photo("b");
        let c = MemoryAsset::photo("c");

        assert!(picker.attempt_highlight(&a).unwrap());
        assert!(picker.is_highlighted(&a));
        assert!(!picker.attempt_highlight(&b).unwrap());
        assert!(picker.is_highlighted(&a));

        assert!(picker.attempt_highlight(&c).unwrap());
        assert!(!picker.is_highlighted(&a));
        assert!(picker.is_highlighted(&c));
        assert!(!picker.is_selected(&c));

        let cleared = picker.unhighlight().unwrap();
        assert_eq!(cleared.map(|x| x.id()), Some(c.id()));
        assert!(picker.unhighlight().unwrap().is_none());

        assert_eq!(
            log.calls()
                .into_iter()
                .filter(|call| matches!(
                    call,
                    DelegateCall::DidHighlight(_) | DelegateCall::DidUnhighlight(_)
                ))
                .collect::<Vec<_>>(),
            vec![
                DelegateCall::DidHighlight("a".into()),
                DelegateCall::DidUnhighlight("a".into()),
                DelegateCall::DidHighlight("c".into()),
                DelegateCall::DidUnhighlight("c".into()),
            ]
        );
    }

    #[test]
    fn test_asset_state_badge_follows_config() {
        let a = MemoryAsset::photo("a");

        let mut plain = presenting(RecordingDelegate::new());
        plain.attempt_select(&a).unwrap();
        let state = plain.asset_state(&a);
        assert!(state.selected && state.enabled && !state.highlighted);
        assert_eq!(state.selection_index, None);

        let mut badged = PickerCoordinator::new(
            Box::new(RecordingDelegate::new()),
            Vec::new(),
            PickerConfig::default().with_selection_index(true),
        );
        badged.present().unwrap();
        badged.attempt_select(&a).unwrap();
        assert_eq!(badged.asset_state(&a).selection_index, Some(1));
    }

    #[test]
    fn test_visible_collections_respects_toggles() {
        let picker = presenting(RecordingDelegate::new());
        let rows = picker.visible_collections();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].asset_count, Some(2));

        let collections = picker.collections().to_vec();
        let hidden = PickerCoordinator::new(
            Box::new(RecordingDelegate::new()),
            collections,
            PickerConfig::default()
                .with_empty_albums(false)
                .with_number_of_assets(false),
        );
        let rows = hidden.visible_collections();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Recents");
        assert_eq!(rows[0].asset_count, None);
    }

    #[test]
    fn test_collection_lookups() {
        let picker = presenting(RecordingDelegate::new());
        assert_eq!(picker.asset_at(0, 1).unwrap().map(|a| a.id()), Some("b".into()));
        assert!(picker.asset_at(0, 9).unwrap().is_none());
        assert!(picker.find_asset(0, &"a".into()).unwrap().is_some());
        assert!(matches!(
            picker.asset_at(7, 0),
            Err(PickerError::UnknownCollection(7))
        ));
        assert!(picker.should_scroll_to_bottom(0).unwrap());
    }

    #[test]
    fn test_done_enabled_tracks_selection() {
        let mut picker = presenting(RecordingDelegate::new());
        assert!(!picker.done_enabled());
        picker.attempt_select(&MemoryAsset::photo("a")).unwrap();
        assert!(picker.done_enabled());
        assert!(picker.shows_cancel_button());
    }

    #[test]
    fn test_log_survives_coordinator() {
        let delegate = RecordingDelegate::new();
        let log: CallLog = delegate.log();
        {
            let mut picker = presenting(delegate);
            picker.attempt_select(&MemoryAsset::photo("a")).unwrap();
        }
        assert!(log.contains(&DelegateCall::DidSelect("a".into())));
        assert_eq!(log.terminal_calls(), 0);
    }
}
