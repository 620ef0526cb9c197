use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};

use pipeline_logging::pipeline_debug;
use sii_core::{update, AppState, AppViewModel, DownloadTarget, FileSelection, Msg};
use sii_engine::{Artifact, AtomicFileWriter, Decoder, FileSource, PersistError};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::render::{render, RenderSurface};

/// Single-threaded pipeline driver.
///
/// All state transitions and artifact bookkeeping happen on the thread that
/// owns the `App`; the engine only talks back through the message channel.
pub struct App {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    surface: RenderSurface,
}

impl App {
    pub fn new(config: &AppConfig, source: Arc<dyn FileSource>, decoder: Arc<dyn Decoder>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let runner = EffectRunner::new(config.engine_settings(), source, decoder, msg_tx);
        let state = AppState::new();
        let mut surface = RenderSurface::default();
        render(&mut surface, &state.view());
        Self {
            state,
            runner,
            msg_rx,
            surface,
        }
    }

    /// Selection Handler entry point; `None` means the picker was cancelled.
    pub fn select(&mut self, selection: Option<FileSelection>) {
        self.dispatch_msg(Msg::FileSelected(selection));
    }

    /// Applies every message already waiting, without blocking.
    pub fn process_pending_messages(&mut self) -> usize {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        let count = inbox.len();
        for msg in inbox {
            self.dispatch_msg(msg);
        }
        count
    }

    /// Blocks until the latest selection is done. There is no timeout.
    ///
    /// Returns false if the engine went away first.
    pub fn wait_until_settled(&mut self) -> bool {
        while !self.state.is_settled() {
            match self.msg_rx.recv() {
                Ok(msg) => self.dispatch_msg(msg),
                Err(_) => return false,
            }
        }
        true
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn live_downloads(&self) -> usize {
        self.runner.artifacts().live_count()
    }

    pub fn active_download(&self) -> Option<&Artifact> {
        match self.state.view().download {
            DownloadTarget::Active { locator, .. } => self.runner.artifacts().get(locator.0),
            DownloadTarget::Inert => None,
        }
    }

    /// Writes the active download into `dir`. `Ok(None)` when nothing is active.
    pub fn save_download(&self, dir: &Path) -> Result<Option<PathBuf>, PersistError> {
        match self.active_download() {
            Some(artifact) => AtomicFileWriter::new(dir).save(artifact).map(Some),
            None => Ok(None),
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        if state.consume_dirty() {
            let view = state.view();
            pipeline_debug!("render stage={:?} href={}", view.stage, view.download_href());
            render(&mut self.surface, &view);
        }
        self.state = state;
    }
}
