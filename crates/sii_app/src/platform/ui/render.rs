use sii_core::{AppViewModel, Stage, INERT_HREF};

use super::constants::*;

/// What the user sees: a read-only text area and a download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSurface {
    pub text_area: String,
    pub download_href: String,
    pub download_filename: Option<String>,
    pub status: String,
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self {
            text_area: String::new(),
            download_href: INERT_HREF.to_string(),
            download_filename: None,
            status: String::new(),
        }
    }
}

impl RenderSurface {
    pub fn is_download_active(&self) -> bool {
        self.download_href != INERT_HREF
    }
}

pub fn render(surface: &mut RenderSurface, view: &AppViewModel) {
    if surface.text_area != view.display {
        surface.text_area.clone_from(&view.display);
    }
    surface.download_href = view.download_href();
    surface.download_filename = view.download_filename().map(ToOwned::to_owned);
    surface.status = status_line(view);
}

pub fn status_line(view: &AppViewModel) -> String {
    let name = view.file_name.as_deref().unwrap_or_default();
    match view.stage {
        Stage::Idle => format!("{TITLE}: {NO_SELECTION}. {FOOTER}"),
        Stage::Loading => format!("Reading {name}..."),
        Stage::Decoding => format!("Decoding {name}..."),
        Stage::Done => match view.download_filename() {
            Some(filename) => {
                format!("{name}: {DOWNLOAD_LABEL} {filename} ({})", view.download_href())
            }
            None => format!("{name}: failed"),
        },
    }
}
