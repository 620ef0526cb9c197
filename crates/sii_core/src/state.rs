use std::fmt;

use pipeline_logging::pipeline_debug;

use crate::view_model::AppViewModel;
use crate::{decoded_filename, Effect, TEXT_CONTENT_TYPE};

pub type SelectionId = u64;

/// Href shown by the download link while no artifact is active.
pub const INERT_HREF: &str = "#";

/// Label put in front of error messages on the display surface.
pub const ERROR_LABEL: &str = "Error:";

/// Opaque key understood by the file source (a path, or a name for in-memory sources).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle(pub String);

impl FileHandle {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub handle: FileHandle,
    pub name: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    Loading,
    Decoding,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeResult {
    Ok(String),
    Error(String),
}

/// Revocable reference to a published download blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locator(pub u64);

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob:sii-decode/{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadTarget {
    #[default]
    Inert,
    Active { locator: Locator, filename: String },
}

impl DownloadTarget {
    pub fn href(&self) -> String {
        match self {
            DownloadTarget::Inert => INERT_HREF.to_string(),
            DownloadTarget::Active { locator, .. } => locator.to_string(),
        }
    }

    pub fn filename(&self) -> Option<&str> {
        match self {
            DownloadTarget::Inert => None,
            DownloadTarget::Active { filename, .. } => Some(filename),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DownloadTarget::Active { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CurrentSelection {
    id: SelectionId,
    name: String,
    stage: Stage,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    last_selection_id: SelectionId,
    last_locator: u64,
    current: Option<CurrentSelection>,
    display: String,
    download: DownloadTarget,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            stage: self.stage(),
            file_name: self.current.as_ref().map(|current| current.name.clone()),
            display: self.display.clone(),
            download: self.download.clone(),
            dirty: self.dirty,
        }
    }

    pub fn stage(&self) -> Stage {
        self.current
            .as_ref()
            .map_or(Stage::Idle, |current| current.stage)
    }

    /// Id of the latest selection; results for any other id are stale.
    pub fn current_selection(&self) -> Option<SelectionId> {
        self.current.as_ref().map(|current| current.id)
    }

    /// True when nothing is in flight for the latest selection.
    pub fn is_settled(&self) -> bool {
        matches!(self.stage(), Stage::Idle | Stage::Done)
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Supersedes whatever was in flight and resets the output surfaces.
    pub(crate) fn begin_selection(
        &mut self,
        selection: &FileSelection,
        effects: &mut Vec<Effect>,
    ) -> SelectionId {
        self.last_selection_id += 1;
        let id = self.last_selection_id;
        if let Some(previous) = &self.current {
            if previous.stage != Stage::Done {
                pipeline_debug!(selection = previous.id; "superseded while {:?}", previous.stage);
            }
        }
        self.display.clear();
        self.clear_download(effects);
        self.current = Some(CurrentSelection {
            id,
            name: selection.name.clone(),
            stage: Stage::Loading,
        });
        self.mark_dirty();
        id
    }

    /// Checks `selection_id` against the latest selection, logging discards.
    pub(crate) fn is_current(&self, selection_id: SelectionId, what: &str) -> bool {
        let current = self.current_selection();
        if current == Some(selection_id) {
            true
        } else {
            pipeline_debug!(
                selection = selection_id;
                "discarding stale {} (latest selection is {:?})",
                what,
                current
            );
            false
        }
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        if let Some(current) = self.current.as_mut() {
            if current.stage != stage {
                current.stage = stage;
                self.mark_dirty();
            }
        }
    }

    /// Output Router: writes the result to the display and swaps the download target.
    pub(crate) fn apply_result(&mut self, result: DecodeResult, effects: &mut Vec<Effect>) {
        self.clear_download(effects);
        match result {
            DecodeResult::Ok(text) => {
                let name = self.current.as_ref().map_or("", |current| current.name.as_str());
                let filename = decoded_filename(name);
                self.last_locator += 1;
                let locator = Locator(self.last_locator);
                effects.push(Effect::PublishArtifact {
                    locator,
                    filename: filename.clone(),
                    content_type: TEXT_CONTENT_TYPE,
                    text: text.clone(),
                });
                self.display = text;
                self.download = DownloadTarget::Active { locator, filename };
            }
            DecodeResult::Error(message) => {
                self.display = error_display(&message);
            }
        }
        self.set_stage(Stage::Done);
        self.mark_dirty();
    }

    /// Sets the download target to inert, revoking a live locator first.
    fn clear_download(&mut self, effects: &mut Vec<Effect>) {
        if let DownloadTarget::Active { locator, .. } = std::mem::take(&mut self.download) {
            effects.push(Effect::RevokeArtifact { locator });
            self.mark_dirty();
        }
    }
}

fn error_display(message: &str) -> String {
    if message.starts_with(ERROR_LABEL) {
        message.to_string()
    } else {
        format!("{ERROR_LABEL} {message}")
    }
}
