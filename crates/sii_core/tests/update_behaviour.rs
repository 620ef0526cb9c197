use bytes::Bytes;
use pretty_assertions::assert_eq;
use sii_core::{
    update, AppState, DecodeResult, DownloadTarget, Effect, FileHandle, FileSelection, Locator,
    Msg, Stage, INERT_HREF, TEXT_CONTENT_TYPE,
};

fn selection(name: &str) -> FileSelection {
    FileSelection {
        handle: FileHandle::new(name),
        name: name.to_string(),
        byte_len: 4,
    }
}

fn select(state: AppState, name: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::FileSelected(Some(selection(name))))
}

/// Drives one selection through load and decode, returning the final effects.
fn run_to_done(state: AppState, name: &str, result: DecodeResult) -> (AppState, Vec<Effect>) {
    let (state, _) = select(state, name);
    let selection_id = state.current_selection().expect("selection id");
    let (state, _) = update(
        state,
        Msg::FileLoaded {
            selection_id,
            bytes: Bytes::from_static(b"SiiN"),
        },
    );
    update(
        state,
        Msg::DecodeFinished {
            selection_id,
            result,
        },
    )
}

#[test]
fn initial_view_is_empty_and_inert() {
    pipeline_logging::initialize_for_tests();
    let view = AppState::new().view();

    assert_eq!(view.stage, Stage::Idle);
    assert_eq!(view.display, "");
    assert_eq!(view.download_href(), INERT_HREF);
    assert_eq!(view.download_filename(), None);
    assert_eq!(view.file_name, None);
}

#[test]
fn selection_emits_read_and_enters_loading() {
    pipeline_logging::initialize_for_tests();
    let (mut state, effects) = select(AppState::new(), "test.sii");

    assert_eq!(
        effects,
        vec![Effect::ReadFile {
            selection_id: 1,
            selection: selection("test.sii"),
        }]
    );
    assert_eq!(state.stage(), Stage::Loading);
    assert_eq!(state.view().file_name.as_deref(), Some("test.sii"));
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn loaded_bytes_are_sent_to_decode() {
    pipeline_logging::initialize_for_tests();
    let (state, _) = select(AppState::new(), "test.sii");
    let (state, effects) = update(
        state,
        Msg::FileLoaded {
            selection_id: 1,
            bytes: Bytes::from_static(b"SiiN"),
        },
    );

    assert_eq!(state.stage(), Stage::Decoding);
    assert_eq!(
        effects,
        vec![Effect::Decode {
            selection_id: 1,
            bytes: Bytes::from_static(b"SiiN"),
        }]
    );
}

#[test]
fn successful_decode_displays_text_and_publishes_artifact() {
    pipeline_logging::initialize_for_tests();
    let (state, effects) = run_to_done(
        AppState::new(),
        "test.sii",
        DecodeResult::Ok("SiiN".to_string()),
    );

    assert_eq!(
        effects,
        vec![Effect::PublishArtifact {
            locator: Locator(1),
            filename: "test-decoded.sii".to_string(),
            content_type: TEXT_CONTENT_TYPE,
            text: "SiiN".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.stage, Stage::Done);
    assert_eq!(view.display, "SiiN");
    assert_ne!(view.download_href(), INERT_HREF);
    assert_eq!(view.download_href(), "blob:sii-decode/1");
    assert_eq!(view.download_filename(), Some("test-decoded.sii"));
}

#[test]
fn decode_error_is_labelled_and_leaves_download_inert() {
    pipeline_logging::initialize_for_tests();
    let (state, effects) = run_to_done(
        AppState::new(),
        "test.sii",
        DecodeResult::Error("Unknown file type".to_string()),
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.display, "Error: Unknown file type");
    assert_eq!(view.download, DownloadTarget::Inert);
    assert_eq!(view.download_href(), INERT_HREF);
}

#[test]
fn error_label_is_not_doubled() {
    pipeline_logging::initialize_for_tests();
    let (state, _) = run_to_done(
        AppState::new(),
        "test.sii",
        DecodeResult::Error("Error: engine says no".to_string()),
    );

    assert_eq!(state.view().display, "Error: engine says no");
}

#[test]
fn read_failure_routes_like_decode_error() {
    pipeline_logging::initialize_for_tests();
    let (state, _) = select(AppState::new(), "locked.sii");
    let (state, effects) = update(
        state,
        Msg::LoadFailed {
            selection_id: 1,
            message: "permission denied".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.stage, Stage::Done);
    assert_eq!(view.display, "Error: permission denied");
    assert_eq!(view.download_href(), INERT_HREF);
}

#[test]
fn new_selection_clears_display_and_revokes_previous_locator_first() {
    pipeline_logging::initialize_for_tests();
    let (state, _) = run_to_done(
        AppState::new(),
        "first.sii",
        DecodeResult::Ok("first".to_string()),
    );

    let (state, effects) = select(state, "second.sii");
    assert_eq!(
        effects,
        vec![
            Effect::RevokeArtifact {
                locator: Locator(1)
            },
            Effect::ReadFile {
                selection_id: 2,
                selection: selection("second.sii"),
            },
        ]
    );
    let view = state.view();
    assert_eq!(view.display, "");
    assert_eq!(view.download, DownloadTarget::Inert);
    assert_eq!(view.stage, Stage::Loading);
}

#[test]
fn repeated_selections_never_hold_two_locators() {
    pipeline_logging::initialize_for_tests();
    let mut state = AppState::new();
    let mut live: Vec<Locator> = Vec::new();

    for round in 0..5 {
        let name = format!("save{round}.sii");
        let (next, effects) = select(state, &name);
        let selection_id = next.current_selection().expect("selection id");
        let mut all_effects = effects;
        let (next, effects) = update(
            next,
            Msg::FileLoaded {
                selection_id,
                bytes: Bytes::from(name.clone().into_bytes()),
            },
        );
        all_effects.extend(effects);
        let (next, effects) = update(
            next,
            Msg::DecodeFinished {
                selection_id,
                result: DecodeResult::Ok(name),
            },
        );
        all_effects.extend(effects);
        state = next;

        for effect in all_effects {
            match effect {
                Effect::RevokeArtifact { locator } => live.retain(|l| *l != locator),
                Effect::PublishArtifact { locator, .. } => {
                    assert!(live.is_empty(), "publish while {live:?} still live");
                    live.push(locator);
                }
                _ => {}
            }
        }
        assert_eq!(live.len(), 1);
    }
    assert_eq!(live, vec![Locator(5)]);
}

#[test]
fn error_after_success_leaves_no_live_locator() {
    pipeline_logging::initialize_for_tests();
    let (state, _) = run_to_done(
        AppState::new(),
        "good.sii",
        DecodeResult::Ok("ok".to_string()),
    );
    let (state, effects) = select(state, "bad.sii");
    assert!(effects.contains(&Effect::RevokeArtifact {
        locator: Locator(1)
    }));

    let (state, effects) = update(
        state,
        Msg::LoadFailed {
            selection_id: 2,
            message: "not found".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().download, DownloadTarget::Inert);
}

#[test]
fn pipeline_accepts_new_selection_after_error() {
    pipeline_logging::initialize_for_tests();
    let (state, _) = run_to_done(
        AppState::new(),
        "bad.sii",
        DecodeResult::Error("broken".to_string()),
    );
    assert!(state.is_settled());

    let (state, _) = run_to_done(state, "bad.sii", DecodeResult::Ok("fixed".to_string()));
    let view = state.view();
    assert_eq!(view.display, "fixed");
    assert_eq!(view.download_filename(), Some("bad-decoded.sii"));
}
