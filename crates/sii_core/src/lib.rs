//! SII decode core: pure selection/output state machine and view-model helpers.
mod effect;
mod filename;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, TEXT_CONTENT_TYPE};
pub use filename::{decoded_filename, DECODED_SUFFIX, INPUT_SUFFIX};
pub use msg::Msg;
pub use state::{
    AppState, DecodeResult, DownloadTarget, FileHandle, FileSelection, Locator, SelectionId,
    Stage, ERROR_LABEL, INERT_HREF,
};
pub use update::update;
pub use view_model::AppViewModel;
