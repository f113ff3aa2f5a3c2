//! Picker delegate protocol
//!
//! [`PickerDelegate`] is the contract a host implements to customise a picker
//! session. Only `did_finish_picking` is required; every other hook has a
//! default (predicates allow, observers do nothing, layout falls back to
//! [`GridLayout::default_for`]).
//!
//! The coordinator never calls delegate hooks directly. Gates are resolved by
//! [`resolve_gate`] and every notification goes through
//! [`DelegateDispatch::emit`], which fans out to the typed delegate callbacks
//! and the [`NotificationBus`] in one place.

use log::trace;

use crate::core::selection::{SelectionHooks, SelectionSet};
use crate::library::{Asset, AssetCollection, AssetRef};
use crate::ui::events::{Notification, NotificationBus};
use crate::ui::layout::{ContentSize, GridLayout, TraitContext};

/// Host-side callbacks for a picker session
///
/// Predicates receive the current selection so that a host can implement
/// policies such as a maximum selection count.
pub trait PickerDelegate {
    /// The user finished picking. Called exactly once, with a copy of the
    /// ordered selection. Terminal.
    fn did_finish_picking(&mut self, assets: Vec<AssetRef>);

    /// The user cancelled. Called at most once, never together with
    /// `did_finish_picking`. Terminal.
    fn did_cancel(&mut self) {}

    /// Whether `asset` can be interacted with at all
    fn should_enable_asset(&self, _selection: &SelectionSet, _asset: &AssetRef) -> bool {
        true
    }

    /// Whether `asset` may be added to the selection
    fn should_select_asset(&self, _selection: &SelectionSet, _asset: &AssetRef) -> bool {
        true
    }

    /// Whether `asset` may be removed from the selection
    fn should_deselect_asset(&self, _selection: &SelectionSet, _asset: &AssetRef) -> bool {
        true
    }

    /// `asset` was appended to the selection
    fn did_select_asset(&mut self, _selection: &SelectionSet, _asset: &AssetRef) {}

    /// `asset` was removed from the selection
    fn did_deselect_asset(&mut self, _selection: &SelectionSet, _asset: &AssetRef) {}

    /// The selection changed; called after the per-asset callback
    fn selection_did_change(&mut self, _assets: &[AssetRef]) {}

    /// Whether `asset` may show the transient touch-down highlight
    fn should_highlight_asset(&self, _asset: &AssetRef) -> bool {
        true
    }

    /// `asset` became highlighted
    fn did_highlight_asset(&mut self, _asset: &AssetRef) {}

    /// `asset` lost its highlight
    fn did_unhighlight_asset(&mut self, _asset: &AssetRef) {}

    /// Grid layout for the asset view
    fn collection_layout_for(&self, content_size: ContentSize, traits: TraitContext) -> GridLayout {
        GridLayout::default_for(content_size, traits)
    }

    /// Whether the asset grid opens scrolled to its last asset
    fn should_scroll_to_bottom(&self, _collection: &dyn AssetCollection) -> bool {
        true
    }
}

/// A predicate hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// `should_enable_asset`
    Enable,
    /// `should_select_asset`
    Select,
    /// `should_deselect_asset`
    Deselect,
    /// `should_highlight_asset`
    Highlight,
}

impl Gate {
    /// Hook name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Enable => "should_enable_asset",
            Gate::Select => "should_select_asset",
            Gate::Deselect => "should_deselect_asset",
            Gate::Highlight => "should_highlight_asset",
        }
    }
}

/// Ask `delegate` whether `gate` allows the transition for `asset`
pub fn resolve_gate(
    delegate: &dyn PickerDelegate,
    gate: Gate,
    selection: &SelectionSet,
    asset: &AssetRef,
) -> bool {
    let allowed = match gate {
        Gate::Enable => delegate.should_enable_asset(selection, asset),
        Gate::Select => delegate.should_select_asset(selection, asset),
        Gate::Deselect => delegate.should_deselect_asset(selection, asset),
        Gate::Highlight => delegate.should_highlight_asset(asset),
    };
    trace!("{}({}) -> {}", gate.name(), asset.id(), allowed);
    allowed
}

/// Everything a session can tell its host
#[derive(Debug, Clone, Copy)]
pub enum PickerEvent<'a> {
    /// `asset` was appended to `selection`
    DidSelect {
        /// Selection after the change
        selection: &'a SelectionSet,
        /// Asset that was selected
        asset: &'a AssetRef,
    },
    /// `asset` was removed from `selection`
    DidDeselect {
        /// Selection after the change
        selection: &'a SelectionSet,
        /// Asset that was deselected
        asset: &'a AssetRef,
    },
    /// Full ordered selection after a committed change
    SelectionChanged(&'a [AssetRef]),
    /// Asset became highlighted
    DidHighlight(&'a AssetRef),
    /// Asset lost its highlight
    DidUnhighlight(&'a AssetRef),
    /// Session finished with this selection
    DidFinish(&'a [AssetRef]),
    /// Session was cancelled
    DidCancel,
}

/// Single emission point towards the host
pub struct DelegateDispatch<'a> {
    delegate: &'a mut dyn PickerDelegate,
    bus: &'a mut NotificationBus,
}

impl<'a> DelegateDispatch<'a> {
    /// Bind a delegate and a bus for the duration of one operation
    pub fn new(delegate: &'a mut dyn PickerDelegate, bus: &'a mut NotificationBus) -> Self {
        Self { delegate, bus }
    }

    /// Resolve a predicate hook
    pub fn allows(&self, gate: Gate, selection: &SelectionSet, asset: &AssetRef) -> bool {
        resolve_gate(&*self.delegate, gate, selection, asset)
    }

    /// Deliver `event` to the delegate, then to bus subscribers
    pub fn emit(&mut self, event: PickerEvent<'_>) {
        match event {
            PickerEvent::DidSelect { selection, asset } => {
                self.delegate.did_select_asset(selection, asset);
                self.bus.publish(Notification::DidSelectAsset(asset.clone()));
            }
            PickerEvent::DidDeselect { selection, asset } => {
                self.delegate.did_deselect_asset(selection, asset);
                self.bus.publish(Notification::DidDeselectAsset(asset.clone()));
            }
            PickerEvent::SelectionChanged(assets) => {
                self.delegate.selection_did_change(assets);
                self.bus
                    .publish(Notification::SelectedAssetsDidChange(assets.to_vec()));
            }
            PickerEvent::DidHighlight(asset) => self.delegate.did_highlight_asset(asset),
            PickerEvent::DidUnhighlight(asset) => self.delegate.did_unhighlight_asset(asset),
            PickerEvent::DidFinish(assets) => self.delegate.did_finish_picking(assets.to_vec()),
            PickerEvent::DidCancel => self.delegate.did_cancel(),
        }
    }
}

impl SelectionHooks for DelegateDispatch<'_> {
    fn should_select(&mut self, selection: &SelectionSet, asset: &AssetRef) -> bool {
        self.allows(Gate::Select, selection, asset)
    }

    fn should_deselect(&mut self, selection: &SelectionSet, asset: &AssetRef) -> bool {
        self.allows(Gate::Deselect, selection, asset)
    }

    fn did_select(&mut self, selection: &SelectionSet, asset: &AssetRef) {
        self.emit(PickerEvent::DidSelect { selection, asset });
    }

    fn did_deselect(&mut self, selection: &SelectionSet, asset: &AssetRef) {
        self.emit(PickerEvent::DidDeselect { selection, asset });
    }

    fn selection_changed(&mut self, snapshot: &[AssetRef]) {
        self.emit(PickerEvent::SelectionChanged(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{MemoryAsset, MemoryCollection};

    #[derive(Default)]
    struct FinishOnly {
        finished: Option<Vec<AssetRef>>,
    }

    impl PickerDelegate for FinishOnly {
        fn did_finish_picking(&mut self, assets: Vec<AssetRef>) {
            self.finished = Some(assets);
        }
    }

    struct DenyAll;

    impl PickerDelegate for DenyAll {
        fn did_finish_picking(&mut self, _assets: Vec<AssetRef>) {}

        fn should_enable_asset(&self, _selection: &SelectionSet, _asset: &AssetRef) -> bool {
            false
        }

        fn should_select_asset(&self, _selection: &SelectionSet, _asset: &AssetRef) -> bool {
            false
        }

        fn should_deselect_asset(&self, _selection: &SelectionSet, _asset: &AssetRef) -> bool {
            false
        }

        fn should_highlight_asset(&self, _asset: &AssetRef) -> bool {
            false
        }
    }

    #[test]
    fn test_unimplemented_gates_default_to_true() {
        let delegate = FinishOnly::default();
        let selection = SelectionSet::new();
        let asset = MemoryAsset::photo("a");
        for gate in [Gate::Enable, Gate::Select, Gate::Deselect, Gate::Highlight] {
            assert!(resolve_gate(&delegate, gate, &selection, &asset), "{:?}", gate);
        }
    }

    #[test]
    fn test_implemented_gates_are_consulted() {
        let selection = SelectionSet::new();
        let asset = MemoryAsset::photo("a");
        for gate in [Gate::Enable, Gate::Select, Gate::Deselect, Gate::Highlight] {
            assert!(!resolve_gate(&DenyAll, gate, &selection, &asset), "{:?}", gate);
        }
    }

    #[test]
    fn test_default_layout_and_scroll() {
        let delegate = FinishOnly::default();
        let size = ContentSize::new(375.0, 812.0);
        let traits = TraitContext::default();
        assert_eq!(
            delegate.collection_layout_for(size, traits),
            GridLayout::default_for(size, traits)
        );
        assert!(delegate.should_scroll_to_bottom(&MemoryCollection::new("Recents")));
    }

    #[test]
    fn test_emit_fans_out_to_bus() {
        let mut delegate = FinishOnly::default();
        let mut bus = NotificationBus::new();
        let subscription = bus.subscribe();
        let selection = SelectionSet::new();
        let asset = MemoryAsset::photo("a");

        {
            let mut dispatch = DelegateDispatch::new(&mut delegate, &mut bus);
            dispatch.emit(PickerEvent::DidSelect {
                selection: &selection,
                asset: &asset,
            });
            dispatch.emit(PickerEvent::SelectionChanged(&[asset.clone()]));
            dispatch.emit(PickerEvent::DidHighlight(&asset));
            dispatch.emit(PickerEvent::DidFinish(&[asset.clone()]));
        }

        let names: Vec<_> = subscription.drain().iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["did-select-asset", "selected-assets-did-change"]);
        assert_eq!(delegate.finished.map(|f| f.len()), Some(1));
    }
}
