use bytes::Bytes;

use crate::{FileSelection, Locator, SelectionId};

/// Content type of every published download artifact.
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Side effects requested by [`crate::update`], executed in order by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Release the blob behind a previously published locator.
    RevokeArtifact { locator: Locator },
    /// Read the full contents of the selected file.
    ReadFile {
        selection_id: SelectionId,
        selection: FileSelection,
    },
    /// Run the decode engine over the loaded bytes.
    Decode {
        selection_id: SelectionId,
        bytes: Bytes,
    },
    /// Create a downloadable blob reachable through `locator`.
    PublishArtifact {
        locator: Locator,
        filename: String,
        content_type: &'static str,
        text: String,
    },
}
