//! Recording delegate
//!
//! A [`PickerDelegate`] that records every hook call into a shared
//! [`CallLog`] and answers predicates from configurable deny lists. The log
//! handle stays readable after the delegate has been moved into a coordinator.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::selection::SelectionSet;
use crate::library::{Asset, AssetCollection, AssetRef};
use crate::ui::delegate::PickerDelegate;
use crate::ui::layout::{ContentSize, GridLayout, TraitContext, DEFAULT_SPACING};

/// One recorded delegate call, with assets reduced to their ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateCall {
    /// `should_enable_asset`
    ShouldEnable(String),
    /// `should_select_asset`
    ShouldSelect(String),
    /// `should_deselect_asset`
    ShouldDeselect(String),
    /// `did_select_asset`
    DidSelect(String),
    /// `did_deselect_asset`
    DidDeselect(String),
    /// `selection_did_change`
    SelectionChanged(Vec<String>),
    /// `should_highlight_asset`
    ShouldHighlight(String),
    /// `did_highlight_asset`
    DidHighlight(String),
    /// `did_unhighlight_asset`
    DidUnhighlight(String),
    /// `should_scroll_to_bottom`
    ShouldScrollToBottom(String),
    /// `did_finish_picking`
    DidFinish(Vec<String>),
    /// `did_cancel`
    DidCancel,
}

impl DelegateCall {
    /// Whether this call is a predicate query
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            DelegateCall::ShouldEnable(_)
                | DelegateCall::ShouldSelect(_)
                | DelegateCall::ShouldDeselect(_)
                | DelegateCall::ShouldHighlight(_)
                | DelegateCall::ShouldScrollToBottom(_)
        )
    }

    /// Whether this call ends the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, DelegateCall::DidFinish(_) | DelegateCall::DidCancel)
    }
}

/// Shared, clonable log of delegate calls
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<DelegateCall>>>,
}

impl CallLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DelegateCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a call
    pub fn record(&self, call: DelegateCall) {
        self.lock().push(call);
    }

    /// Copy of every recorded call, in order
    pub fn calls(&self) -> Vec<DelegateCall> {
        self.lock().clone()
    }

    /// Recorded calls without predicate queries
    pub fn notifications(&self) -> Vec<DelegateCall> {
        self.lock()
            .iter()
            .filter(|call| !call.is_query())
            .cloned()
            .collect()
    }

    /// Whether `call` was recorded
    pub fn contains(&self, call: &DelegateCall) -> bool {
        self.lock().contains(call)
    }

    /// Ids passed to `did_finish_picking`, if it was called
    pub fn finished(&self) -> Option<Vec<String>> {
        self.lock().iter().find_map(|call| match call {
            DelegateCall::DidFinish(ids) => Some(ids.clone()),
            _ => None,
        })
    }

    /// Whether `did_cancel` was called
    pub fn cancelled(&self) -> bool {
        self.contains(&DelegateCall::DidCancel)
    }

    /// Number of terminal callbacks (finish or cancel)
    pub fn terminal_calls(&self) -> usize {
        self.lock().iter().filter(|call| call.is_terminal()).count()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.lock().clear();
    }
}

fn ids_of(assets: &[AssetRef]) -> Vec<String> {
    assets.iter().map(|asset| asset.id().to_string()).collect()
}

/// Delegate that records calls and vetoes by id
#[derive(Debug, Clone, Default)]
pub struct RecordingDelegate {
    log: CallLog,
    disabled: Vec<String>,
    veto_select: Vec<String>,
    veto_deselect: Vec<String>,
    no_highlight: Vec<String>,
    max_selection: Option<usize>,
    scroll_to_bottom: Option<bool>,
    columns: Option<usize>,
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

impl RecordingDelegate {
    /// Delegate that allows everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the shared call log
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Report these ids as not enabled
    pub fn disabling(mut self, ids: &[&str]) -> Self {
        self.disabled.extend(owned(ids));
        self
    }

    /// Veto selecting these ids
    pub fn vetoing_select(mut self, ids: &[&str]) -> Self {
        self.veto_select.extend(owned(ids));
        self
    }

    /// Veto deselecting these ids
    pub fn vetoing_deselect(mut self, ids: &[&str]) -> Self {
        self.veto_deselect.extend(owned(ids));
        self
    }

    /// Refuse highlighting these ids
    pub fn refusing_highlight(mut self, ids: &[&str]) -> Self {
        self.no_highlight.extend(owned(ids));
        self
    }

    /// Veto selections once `max` assets are selected
    pub fn with_max_selection(mut self, max: usize) -> Self {
        self.max_selection = Some(max);
        self
    }

    /// Fixed answer for `should_scroll_to_bottom`
    pub fn with_scroll_to_bottom(mut self, scroll: bool) -> Self {
        self.scroll_to_bottom = Some(scroll);
        self
    }

    /// Fixed column count for the grid layout
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    fn listed(list: &[String], asset: &AssetRef) -> bool {
        let id = asset.id();
        list.iter().any(|entry| entry == id.as_str())
    }
}

impl PickerDelegate for RecordingDelegate {
    fn did_finish_picking(&mut self, assets: Vec<AssetRef>) {
        self.log.record(DelegateCall::DidFinish(ids_of(&assets)));
    }

    fn did_cancel(&mut self) {
        self.log.record(DelegateCall::DidCancel);
    }

    fn should_enable_asset(&self, _selection: &SelectionSet, asset: &AssetRef) -> bool {
        self.log
            .record(DelegateCall::ShouldEnable(asset.id().to_string()));
        !Self::listed(&self.disabled, asset)
    }

    fn should_select_asset(&self, selection: &SelectionSet, asset: &AssetRef) -> bool {
        self.log
            .record(DelegateCall::ShouldSelect(asset.id().to_string()));
        if self.max_selection.is_some_and(|max| selection.len() >= max) {
            return false;
        }
        !Self::listed(&self.veto_select, asset)
    }

    fn should_deselect_asset(&self, _selection: &SelectionSet, asset: &AssetRef) -> bool {
        self.log
            .record(DelegateCall::ShouldDeselect(asset.id().to_string()));
        !Self::listed(&self.veto_deselect, asset)
    }

    fn did_select_asset(&mut self, _selection: &SelectionSet, asset: &AssetRef) {
        self.log.record(DelegateCall::DidSelect(asset.id().to_string()));
    }

    fn did_deselect_asset(&mut self, _selection: &SelectionSet, asset: &AssetRef) {
        self.log
            .record(DelegateCall::DidDeselect(asset.id().to_string()));
    }

    fn selection_did_change(&mut self, assets: &[AssetRef]) {
        self.log.record(DelegateCall::SelectionChanged(ids_of(assets)));
    }

    fn should_highlight_asset(&self, asset: &AssetRef) -> bool {
        self.log
            .record(DelegateCall::ShouldHighlight(asset.id().to_string()));
        !Self::listed(&self.no_highlight, asset)
    }

    fn did_highlight_asset(&mut self, asset: &AssetRef) {
        self.log
            .record(DelegateCall::DidHighlight(asset.id().to_string()));
    }

    fn did_unhighlight_asset(&mut self, asset: &AssetRef) {
        self.log
            .record(DelegateCall::DidUnhighlight(asset.id().to_string()));
    }

    fn collection_layout_for(&self, content_size: ContentSize, traits: TraitContext) -> GridLayout {
        match self.columns {
            Some(columns) => GridLayout::with_columns(content_size, columns, DEFAULT_SPACING),
            None => GridLayout::default_for(content_size, traits),
        }
    }

    fn should_scroll_to_bottom(&self, collection: &dyn AssetCollection) -> bool {
        self.log
            .record(DelegateCall::ShouldScrollToBottom(collection.title().to_string()));
        self.scroll_to_bottom.unwrap_or(true)
    }
}
