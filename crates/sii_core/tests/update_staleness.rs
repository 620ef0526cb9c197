use bytes::Bytes;
use pretty_assertions::assert_eq;
use sii_core::{
    update, AppState, DecodeResult, Effect, FileHandle, FileSelection, Msg, Stage, INERT_HREF,
};

fn select(state: AppState, name: &str) -> AppState {
    let (state, _) = update(
        state,
        Msg::FileSelected(Some(FileSelection {
            handle: FileHandle::new(name),
            name: name.to_string(),
            byte_len: 0,
        })),
    );
    state
}

fn loaded(state: AppState, selection_id: u64) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FileLoaded {
            selection_id,
            bytes: Bytes::from_static(b"SiiN"),
        },
    )
}

fn finished(state: AppState, selection_id: u64, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::DecodeFinished {
            selection_id,
            result: DecodeResult::Ok(text.to_string()),
        },
    )
}

#[test]
fn late_result_for_superseded_selection_is_discarded() {
    pipeline_logging::initialize_for_tests();
    // First file reaches the decoder, then a second file is picked.
    let state = select(AppState::new(), "slow.sii");
    let (state, _) = loaded(state, 1);
    let state = select(state, "fast.sii");
    let (state, _) = loaded(state, 2);

    // Second completes first.
    let (state, effects) = finished(state, 2, "fast");
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().display, "fast");

    // First completes late and must not overwrite anything.
    let before = state.view();
    let (state, effects) = finished(state, 1, "slow");
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
    assert_eq!(state.view().download_filename(), Some("fast-decoded.sii"));
}

#[test]
fn stale_result_arriving_before_current_one_is_not_rendered() {
    pipeline_logging::initialize_for_tests();
    let state = select(AppState::new(), "old.sii");
    let (state, _) = loaded(state, 1);
    let state = select(state, "new.sii");

    let (state, effects) = finished(state, 1, "old");
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.display, "");
    assert_eq!(view.download_href(), INERT_HREF);
    assert_eq!(view.stage, Stage::Loading);

    let (state, _) = loaded(state, 2);
    let (state, _) = finished(state, 2, "new");
    assert_eq!(state.view().display, "new");
}

#[test]
fn stale_file_contents_are_never_decoded() {
    pipeline_logging::initialize_for_tests();
    let state = select(AppState::new(), "old.sii");
    let state = select(state, "new.sii");

    let (state, effects) = loaded(state, 1);
    assert!(effects.is_empty());
    assert_eq!(state.stage(), Stage::Loading);
}

#[test]
fn stale_read_failure_is_discarded() {
    pipeline_logging::initialize_for_tests();
    let state = select(AppState::new(), "old.sii");
    let state = select(state, "new.sii");

    let (state, effects) = update(
        state,
        Msg::LoadFailed {
            selection_id: 1,
            message: "gone".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().display, "");
    assert_eq!(state.stage(), Stage::Loading);
}

#[test]
fn duplicate_completion_is_ignored() {
    pipeline_logging::initialize_for_tests();
    let state = select(AppState::new(), "a.sii");
    let (state, _) = loaded(state, 1);
    let (state, first) = finished(state, 1, "a");
    let (state, second) = finished(state, 1, "again");

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(state.view().display, "a");
}
