pub mod app;
pub mod config;
pub mod effects;
pub mod logging;
pub mod ui;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use pipeline_logging::{pipeline_info, pipeline_warn};
use sii_core::{FileHandle, FileSelection};
use sii_engine::{FsFileSource, SiiDecoder};

pub use app::App;
pub use config::{AppConfig, ConfigError, DispatchSetting};
pub use logging::LogDestination;

/// Options for one CLI run, after config file and flags are merged.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub files: Vec<PathBuf>,
    pub config: AppConfig,
    pub quiet: bool,
}

/// Builds the selection the file picker would hand over for `path`.
pub fn selection_for_path(path: &Path) -> FileSelection {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let byte_len = fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);
    FileSelection {
        handle: FileHandle::new(path.to_string_lossy()),
        name,
        byte_len,
    }
}

/// Selects each file in turn and reports the outcome.
///
/// Returns `Ok(false)` when at least one file failed to decode.
pub fn run_app(options: RunOptions) -> anyhow::Result<bool> {
    let mut app = App::new(
        &options.config,
        Arc::new(FsFileSource::new()),
        Arc::new(SiiDecoder),
    );

    if options.files.is_empty() {
        eprintln!("{}", ui::render::status_line(&app.view()));
        return Ok(true);
    }

    let mut all_ok = true;
    for path in &options.files {
        app.select(Some(selection_for_path(path)));
        if !app.wait_until_settled() {
            anyhow::bail!("decode engine stopped before {} finished", path.display());
        }

        let surface = app.surface();
        if !options.quiet {
            println!("{}", surface.text_area);
        }
        eprintln!("{}", surface.status);

        if surface.is_download_active() {
            if let Some(dir) = &options.config.output_dir {
                let saved = app
                    .save_download(dir)
                    .with_context(|| format!("saving download to {}", dir.display()))?;
                if let Some(saved) = saved {
                    pipeline_info!("saved {}", saved.display());
                    eprintln!("saved {}", saved.display());
                }
            }
        } else {
            pipeline_warn!("no download for {}", path.display());
            all_ok = false;
        }
    }
    Ok(all_ok)
}
