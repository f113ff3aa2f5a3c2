//! Selection model
//!
//! Maintains the ordered, duplicate-free selection of a picker session and
//! enforces the legality of every membership change.
//!
//! # Ordering
//!
//! Insertion order is selection order. Removing an asset and selecting it again
//! appends it at the end:
//!
//! ```text
//! select a, b, c      -> [a, b, c]
//! deselect b          -> [a, c]
//! select b            -> [a, c, b]
//! ```
//!
//! # Dispatch order
//!
//! For every attempt the model consults the veto hook first, commits the
//! mutation, then fires the per-asset notification followed by exactly one
//! aggregate notification carrying the full ordered snapshot. Vetoed and
//! redundant attempts fire nothing.

use indexmap::IndexMap;
use log::{debug, trace};

use crate::library::{Asset, AssetId, AssetRef};

/// Result of a selection attempt
///
/// None of these are errors: a veto or a redundant call is a policy outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The mutation was committed and notifications were fired
    Committed,
    /// The asset was already in the requested state
    Redundant,
    /// A `should_select` / `should_deselect` hook refused the change
    Vetoed,
    /// The asset is not enabled, so the gesture never reached the model
    Disabled,
}

impl SelectionOutcome {
    /// Check whether the selection changed
    pub fn is_committed(&self) -> bool {
        matches!(self, SelectionOutcome::Committed)
    }

    /// Lowercase outcome name
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionOutcome::Committed => "committed",
            SelectionOutcome::Redundant => "redundant",
            SelectionOutcome::Vetoed => "vetoed",
            SelectionOutcome::Disabled => "disabled",
        }
    }
}

/// Ordered, duplicate-free set of selected assets keyed by identity
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    entries: IndexMap<AssetId, AssetRef>,
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected assets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Membership test by identity
    pub fn contains(&self, id: &AssetId) -> bool {
        self.entries.contains_key(id)
    }

    /// 1-based position of the asset in selection order
    pub fn position(&self, id: &AssetId) -> Option<usize> {
        self.entries.get_index_of(id).map(|index| index + 1)
    }

    /// Iterate selected assets in selection order
    pub fn iter(&self) -> impl Iterator<Item = &AssetRef> {
        self.entries.values()
    }

    /// Iterate selected ids in selection order
    pub fn ids(&self) -> impl Iterator<Item = &AssetId> {
        self.entries.keys()
    }

    /// Copy of the ordered selection
    pub fn snapshot(&self) -> Vec<AssetRef> {
        self.entries.values().cloned().collect()
    }

    fn insert(&mut self, asset: AssetRef) -> bool {
        let id = asset.id();
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, asset);
        true
    }

    fn remove(&mut self, id: &AssetId) -> Option<AssetRef> {
        // shift_remove keeps the relative order of the remaining entries
        self.entries.shift_remove(id)
    }
}

/// Callbacks the model consults and notifies while mutating
///
/// Defaults allow every change and observe nothing.
pub trait SelectionHooks {
    /// Authoritative gate for selecting `asset`
    fn should_select(&mut self, _selection: &SelectionSet, _asset: &AssetRef) -> bool {
        true
    }

    /// Authoritative gate for deselecting `asset`
    fn should_deselect(&mut self, _selection: &SelectionSet, _asset: &AssetRef) -> bool {
        true
    }

    /// Called after `asset` was appended
    fn did_select(&mut self, _selection: &SelectionSet, _asset: &AssetRef) {}

    /// Called after `asset` was removed
    fn did_deselect(&mut self, _selection: &SelectionSet, _asset: &AssetRef) {}

    /// Called once per committed mutation, after the per-asset notification
    fn selection_changed(&mut self, _snapshot: &[AssetRef]) {}
}

/// Hooks that allow everything and observe nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl SelectionHooks for NoHooks {}

/// The selection model: a `SelectionSet` plus validated mutation
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selection: SelectionSet,
}

impl SelectionModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert trusted, host-provided assets without consulting any hooks
    ///
    /// Duplicates in `assets` collapse to their first occurrence.
    pub fn seed<I: IntoIterator<Item = AssetRef>>(&mut self, assets: I) {
        for asset in assets {
            if !self.selection.insert(asset) {
                trace!("Ignoring duplicate asset in initial selection");
            }
        }
        debug!("Seeded selection with {} assets", self.selection.len());
    }

    /// Read-only view of the selection
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// O(1) membership query
    pub fn is_selected(&self, asset: &AssetRef) -> bool {
        self.selection.contains(&asset.id())
    }

    /// 1-based position of `asset` in the selection, if selected
    pub fn selection_order(&self, asset: &AssetRef) -> Option<usize> {
        self.selection.position(&asset.id())
    }

    /// Append `asset` to the selection unless it is already selected or vetoed
    pub fn select(&mut self, asset: &AssetRef, hooks: &mut dyn SelectionHooks) -> SelectionOutcome {
        if self.is_selected(asset) {
            trace!("Asset '{}' already selected", asset.id());
            return SelectionOutcome::Redundant;
        }
        if !hooks.should_select(&self.selection, asset) {
            debug!("Selection of '{}' vetoed", asset.id());
            return SelectionOutcome::Vetoed;
        }

        self.selection.insert(asset.clone());
        debug!("Selected '{}' (#{})", asset.id(), self.selection.len());

        hooks.did_select(&self.selection, asset);
        hooks.selection_changed(&self.selection.snapshot());
        SelectionOutcome::Committed
    }

    /// Remove `asset` from the selection unless it is absent or vetoed
    pub fn deselect(
        &mut self,
        asset: &AssetRef,
        hooks: &mut dyn SelectionHooks,
    ) -> SelectionOutcome {
        let id = asset.id();
        if !self.selection.contains(&id) {
            trace!("Asset '{}' not selected", id);
            return SelectionOutcome::Redundant;
        }
        if !hooks.should_deselect(&self.selection, asset) {
            debug!("Deselection of '{}' vetoed", id);
            return SelectionOutcome::Vetoed;
        }

        self.selection.remove(&id);
        debug!("Deselected '{}' ({} remaining)", id, self.selection.len());

        hooks.did_deselect(&self.selection, asset);
        hooks.selection_changed(&self.selection.snapshot());
        SelectionOutcome::Committed
    }

    /// Deselect if selected, else select
    pub fn toggle(&mut self, asset: &AssetRef, hooks: &mut dyn SelectionHooks) -> SelectionOutcome {
        if self.is_selected(asset) {
            self.deselect(asset, hooks)
        } else {
            self.select(asset, hooks)
        }
    }

    /// Consume the model, returning the final selection
    pub fn into_selection(self) -> SelectionSet {
        self.selection
    }
}
