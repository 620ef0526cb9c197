use crate::{AppState, Effect, Msg, Stage};

/// Pure update function: applies a message to state and returns any effects.
///
/// Effects must be executed in the order returned; a `RevokeArtifact` always
/// precedes the `PublishArtifact` or `ReadFile` that replaces it.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::FileSelected(None) => {}
        Msg::FileSelected(Some(selection)) => {
            let selection_id = state.begin_selection(&selection, &mut effects);
            effects.push(Effect::ReadFile {
                selection_id,
                selection,
            });
        }
        Msg::FileLoaded {
            selection_id,
            bytes,
        } => {
            if state.is_current(selection_id, "file contents") && state.stage() == Stage::Loading {
                state.set_stage(Stage::Decoding);
                effects.push(Effect::Decode {
                    selection_id,
                    bytes,
                });
            }
        }
        Msg::LoadFailed {
            selection_id,
            message,
        } => {
            if state.is_current(selection_id, "read failure") && state.stage() == Stage::Loading {
                state.apply_result(crate::DecodeResult::Error(message), &mut effects);
            }
        }
        Msg::DecodeFinished {
            selection_id,
            result,
        } => {
            if state.is_current(selection_id, "decode result") && state.stage() == Stage::Decoding
            {
                state.apply_result(result, &mut effects);
            }
        }
    }

    (state, effects)
}
