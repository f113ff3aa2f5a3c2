//! End-to-end picker session tests
//!
//! These tests drive a full session through [`PickerCoordinator`] against the
//! mock and generated libraries, observing both the recording delegate and the
//! notification bus.

use super::generator::{GeneratorConfig, LibraryGenerator, RandomGesture};
use super::mock_library::MockLibrary;
use super::recorder::{DelegateCall, RecordingDelegate};
use crate::core::config::PickerConfig;
use crate::core::selection::SelectionOutcome;
use crate::library::{Asset, AssetCollection, AssetRef};
use crate::ui::coordinator::{PickerCoordinator, SessionState};
use crate::ui::events::{Notification, Subscription};

// =============================================================================
// Helpers
// =============================================================================

fn session(mock: &MockLibrary, delegate: RecordingDelegate) -> PickerCoordinator {
    let mut picker =
        PickerCoordinator::new(Box::new(delegate), mock.collections(), PickerConfig::default());
    picker.present().unwrap();
    picker
}

fn ids(assets: &[AssetRef]) -> Vec<String> {
    assets.iter().map(|a| a.id().to_string()).collect()
}

fn bus_trace(subscription: &Subscription) -> Vec<DelegateCall> {
    subscription
        .drain()
        .into_iter()
        .map(|notification| match notification {
            Notification::DidSelectAsset(a) => DelegateCall::DidSelect(a.id().to_string()),
            Notification::DidDeselectAsset(a) => DelegateCall::DidDeselect(a.id().to_string()),
            Notification::SelectedAssetsDidChange(all) => DelegateCall::SelectionChanged(ids(&all)),
        })
        .collect()
}

fn selection_calls(calls: Vec<DelegateCall>) -> Vec<DelegateCall> {
    calls
        .into_iter()
        .filter(|call| {
            matches!(
                call,
                DelegateCall::DidSelect(_)
                    | DelegateCall::DidDeselect(_)
                    | DelegateCall::SelectionChanged(_)
            )
        })
        .collect()
}

// =============================================================================
// Selection properties
// =============================================================================

#[test]
fn test_selection_order_counts_distinct_selects() {
    let mock = MockLibrary::new();
    let mut picker = session(&mock, RecordingDelegate::new());

    for n in 1..=4 {
        let asset = mock.photo(n);
        picker.attempt_select(&asset).unwrap();
        picker.attempt_select(&asset).unwrap();
        assert!(picker.is_selected(&asset));
        assert_eq!(picker.selection_order(&asset), Some(n));
    }
    assert_eq!(picker.selection().len(), 4);
}

#[test]
fn test_repeated_select_is_idempotent() {
    let mock = MockLibrary::new();
    let delegate = RecordingDelegate::new();
    let log = delegate.log();
    let mut picker = session(&mock, delegate);
    let a = mock.photo(1);

    assert_eq!(picker.attempt_select(&a).unwrap(), SelectionOutcome::Committed);
    let once = ids(&picker.selected_assets());
    assert_eq!(picker.attempt_select(&a).unwrap(), SelectionOutcome::Redundant);

    assert_eq!(ids(&picker.selected_assets()), once);
    assert_eq!(
        selection_calls(log.calls()),
        vec![
            DelegateCall::DidSelect("IMG_0001".into()),
            DelegateCall::SelectionChanged(vec!["IMG_0001".into()]),
        ]
    );
}

#[test]
fn test_veto_fires_nothing() {
    let mock = MockLibrary::new();
    let delegate = RecordingDelegate::new().vetoing_select(&["IMG_0001"]);
    let log = delegate.log();
    let mut picker = session(&mock, delegate);
    let bus = picker.subscribe();
    let a = mock.photo(1);

    assert_eq!(picker.attempt_select(&a).unwrap(), SelectionOutcome::Vetoed);
    assert!(!picker.is_selected(&a));
    assert!(log.contains(&DelegateCall::ShouldSelect("IMG_0001".into())));
    assert!(selection_calls(log.calls()).is_empty());
    assert!(bus.try_recv().is_none());
}

#[test]
fn test_reselect_appends_at_end() {
    let mock = MockLibrary::new();
    let mut picker = session(&mock, RecordingDelegate::new());
    let (a, b, c) = (mock.photo(1), mock.photo(2), mock.photo(3));

    picker.attempt_select(&a).unwrap();
    picker.attempt_select(&b).unwrap();
    picker.attempt_select(&c).unwrap();
    picker.attempt_deselect(&b).unwrap();
    picker.attempt_select(&b).unwrap();

    assert_eq!(
        ids(&picker.selected_assets()),
        vec!["IMG_0001", "IMG_0003", "IMG_0002"]
    );
    assert_eq!(picker.selection_order(&b), Some(3));
}

#[test]
fn test_locked_asset_cannot_be_deselected() {
    let mock = MockLibrary::new();
    let mut picker = session(&mock, RecordingDelegate::new().vetoing_deselect(&["IMG_0001"]));
    let a = mock.photo(1);

    picker.attempt_select(&a).unwrap();
    assert_eq!(picker.attempt_toggle(&a).unwrap(), SelectionOutcome::Vetoed);
    assert!(picker.is_selected(&a));
}

#[test]
fn test_host_caps_selection_count() {
    let mock = MockLibrary::new();
    let mut picker = session(&mock, RecordingDelegate::new().with_max_selection(2));

    let outcomes: Vec<_> = (1..=4)
        .map(|n| picker.attempt_select(&mock.photo(n)).unwrap())
        .collect();
    assert_eq!(
        outcomes,
        vec![
            SelectionOutcome::Committed,
            SelectionOutcome::Committed,
            SelectionOutcome::Vetoed,
            SelectionOutcome::Vetoed,
        ]
    );

    picker.attempt_deselect(&mock.photo(1)).unwrap();
    assert_eq!(
        picker.attempt_select(&mock.photo(4)).unwrap(),
        SelectionOutcome::Committed
    );
}

// =============================================================================
// Session lifecycle
// =============================================================================

#[test]
fn test_finish_snapshot_matches_selection_at_finish() {
    let mock = MockLibrary::new();
    let delegate = RecordingDelegate::new();
    let log = delegate.log();
    let mut picker = session(&mock, delegate);

    picker.attempt_select(&mock.video(1)).unwrap();
    picker.attempt_select(&mock.photo(2)).unwrap();
    let expected = ids(&picker.selected_assets());

    let snapshot = picker.finish().unwrap();
    assert_eq!(ids(&snapshot), expected);
    assert_eq!(log.finished(), Some(expected));

    let a = mock.photo(1);
    assert!(picker.attempt_select(&a).unwrap_err().is_contract_violation());
    assert!(picker.attempt_deselect(&mock.video(1)).is_err());
    assert!(picker.select_asset(&a).is_err());
    assert!(picker.attempt_highlight(&a).is_err());
    assert_eq!(picker.selected_assets().len(), 2);
}

#[test]
fn test_exactly_one_terminal_callback() {
    let mock = MockLibrary::new();

    for cancel_first in [false, true] {
        let delegate = RecordingDelegate::new();
        let log = delegate.log();
        let mut picker = session(&mock, delegate);
        picker.attempt_select(&mock.photo(1)).unwrap();

        if cancel_first {
            picker.cancel().unwrap();
            assert!(picker.finish().is_err());
            assert_eq!(picker.state(), SessionState::Cancelled);
            assert!(log.cancelled());
            assert!(log.finished().is_none());
        } else {
            picker.finish().unwrap();
            assert!(picker.cancel().is_err());
            assert_eq!(picker.state(), SessionState::Finished);
            assert!(!log.cancelled());
        }
        assert_eq!(log.terminal_calls(), 1);
    }
}

#[test]
fn test_enabled_and_disabled_scenario() {
    let mock = MockLibrary::new();
    let delegate = RecordingDelegate::new().disabling(&["IMG_0002"]);
    let log = delegate.log();
    let mut picker = session(&mock, delegate);
    let (a, b) = (mock.photo(1), mock.photo(2));

    assert_eq!(picker.attempt_select(&a).unwrap(), SelectionOutcome::Committed);
    assert_eq!(ids(&picker.selected_assets()), vec!["IMG_0001"]);

    assert_eq!(picker.attempt_select(&b).unwrap(), SelectionOutcome::Disabled);
    assert!(!log.contains(&DelegateCall::ShouldSelect("IMG_0002".into())));
    assert_eq!(ids(&picker.selected_assets()), vec!["IMG_0001"]);
    assert!(!picker.asset_state(&b).enabled);

    picker.finish().unwrap();
    assert_eq!(log.finished(), Some(vec!["IMG_0001".to_string()]));
}

#[test]
fn test_seeded_selection_skips_hooks() {
    let mock = MockLibrary::new();
    let delegate = RecordingDelegate::new().vetoing_select(&["IMG_0003"]);
    let log = delegate.log();
    let mut picker =
        PickerCoordinator::new(Box::new(delegate), mock.collections(), PickerConfig::default());
    let bus = picker.subscribe();

    picker
        .present_with_initial_selection(vec![mock.photo(3), mock.photo(1), mock.photo(3)])
        .unwrap();

    assert_eq!(ids(&picker.selected_assets()), vec!["IMG_0003", "IMG_0001"]);
    assert!(log.calls().is_empty());
    assert!(bus.try_recv().is_none());
    assert!(picker.done_enabled());
}

// =============================================================================
// Observation channels
// =============================================================================

#[test]
fn test_bus_sees_same_order_as_delegate() {
    let mock = MockLibrary::new();
    let delegate = RecordingDelegate::new();
    let log = delegate.log();
    let mut picker = session(&mock, delegate);
    let bus = picker.subscribe();

    picker.attempt_toggle(&mock.photo(1)).unwrap();
    picker.attempt_toggle(&mock.video(2)).unwrap();
    picker.attempt_toggle(&mock.photo(1)).unwrap();

    let delegate_trace = selection_calls(log.calls());
    assert_eq!(delegate_trace.len(), 6);
    assert_eq!(bus_trace(&bus), delegate_trace);
    assert_eq!(
        delegate_trace.last(),
        Some(&DelegateCall::SelectionChanged(vec!["MOV_0002".into()]))
    );
}

#[test]
fn test_highlight_veto_leaves_state_unchanged() {
    let mock = MockLibrary::new();
    let delegate = RecordingDelegate::new().refusing_highlight(&["IMG_0001"]);
    let log = delegate.log();
    let mut picker = session(&mock, delegate);
    let a = mock.photo(1);

    assert!(!picker.attempt_highlight(&a).unwrap());
    let state = picker.asset_state(&a);
    assert!(!state.highlighted && !state.selected);
    assert!(log.notifications().is_empty());
}

#[test]
fn test_album_list_hides_empty_albums_when_configured() {
    let mock = MockLibrary::new();
    let picker = PickerCoordinator::new(
        Box::new(RecordingDelegate::new()),
        mock.collections(),
        PickerConfig::default().with_empty_albums(false),
    );

    let titles: Vec<_> = picker
        .visible_collections()
        .into_iter()
        .map(|row| row.title)
        .collect();
    assert_eq!(titles, vec!["Recents", "Favorites", "Videos"]);
}

// =============================================================================
// Randomised sessions
// =============================================================================

#[test]
fn test_random_sessions_keep_selection_consistent() {
    for seed in 0..8 {
        let mut generator = LibraryGenerator::with_config(
            seed,
            GeneratorConfig {
                asset_count: 20,
                ..Default::default()
            },
        );
        let library = generator.library();
        let assets: Vec<AssetRef> = library.collections()[0].assets().collect();
        let gestures = generator.gestures(&assets, 60);

        let delegate = RecordingDelegate::new();
        let log = delegate.log();
        let mut picker = PickerCoordinator::new(
            Box::new(delegate),
            library.into_collections(),
            PickerConfig::default(),
        );
        let bus = picker.subscribe();
        picker.present().unwrap();

        let mut shadow: Vec<String> = Vec::new();
        for gesture in gestures {
            match gesture {
                RandomGesture::Toggle(asset) => {
                    let id = asset.id().to_string();
                    picker.attempt_toggle(&asset).unwrap();
                    match shadow.iter().position(|x| *x == id) {
                        Some(index) => {
                            shadow.remove(index);
                        }
                        None => shadow.push(id),
                    }
                }
                RandomGesture::Highlight(asset) => {
                    assert!(picker.attempt_highlight(&asset).unwrap());
                }
                RandomGesture::Unhighlight => {
                    picker.unhighlight().unwrap();
                }
            }
            assert_eq!(ids(&picker.selected_assets()), shadow);
        }

        assert_eq!(bus_trace(&bus), selection_calls(log.calls()));
        let snapshot = picker.finish().unwrap();
        assert_eq!(ids(&snapshot), shadow);
    }
}
