use crate::{DownloadTarget, Stage};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub stage: Stage,
    pub file_name: Option<String>,
    pub display: String,
    pub download: DownloadTarget,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn download_href(&self) -> String {
        self.download.href()
    }

    pub fn download_filename(&self) -> Option<&str> {
        self.download.filename()
    }
}
