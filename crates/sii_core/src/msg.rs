use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file. `None` when the picker was cancelled.
    FileSelected(Option<crate::FileSelection>),
    /// Loader finished reading the selected file.
    FileLoaded {
        selection_id: crate::SelectionId,
        bytes: Bytes,
    },
    /// Loader could not read the selected file.
    LoadFailed {
        selection_id: crate::SelectionId,
        message: String,
    },
    /// Dispatcher produced a normalized result for a selection.
    DecodeFinished {
        selection_id: crate::SelectionId,
        result: crate::DecodeResult,
    },
}
