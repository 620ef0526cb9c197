use std::sync::{mpsc, Arc};
use std::thread;

use bytes::Bytes;
use pipeline_logging::{pipeline_debug, pipeline_info, pipeline_warn};
use sii_core::{DecodeResult, Effect, Msg};
use sii_engine::{
    Artifact, ArtifactStore, Decoder, EngineEvent, EngineEvents, EngineHandle, EngineSettings,
    FileSource,
};

/// Executes core effects against the engine and the artifact store.
pub struct EffectRunner {
    engine: EngineHandle,
    artifacts: ArtifactStore,
}

impl EffectRunner {
    pub fn new(
        settings: EngineSettings,
        source: Arc<dyn FileSource>,
        decoder: Arc<dyn Decoder>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let (engine, events) = EngineHandle::new(settings, source, decoder);
        spawn_event_loop(events, msg_tx);
        Self {
            engine,
            artifacts: ArtifactStore::new(),
        }
    }

    /// Runs effects in the order given.
    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RevokeArtifact { locator } => {
                    self.artifacts.revoke(locator.0);
                }
                Effect::ReadFile {
                    selection_id,
                    selection,
                } => {
                    pipeline_info!(
                        selection = selection_id;
                        "reading {} ({} bytes)",
                        selection.name,
                        selection.byte_len
                    );
                    self.engine.load(selection_id, selection.handle.0);
                }
                Effect::Decode {
                    selection_id,
                    bytes,
                } => {
                    pipeline_debug!(selection = selection_id; "decoding {} bytes", bytes.len());
                    self.engine.decode(selection_id, bytes);
                }
                Effect::PublishArtifact {
                    locator,
                    filename,
                    content_type,
                    text,
                } => {
                    let artifact = Artifact::new(filename, content_type, Bytes::from(text));
                    self.artifacts.publish(locator.0, artifact);
                }
            }
        }
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }
}

fn spawn_event_loop(events: EngineEvents, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Loaded {
            selection_id,
            result: Ok(bytes),
        } => Msg::FileLoaded {
            selection_id,
            bytes,
        },
        EngineEvent::Loaded {
            selection_id,
            result: Err(err),
        } => {
            pipeline_warn!(selection = selection_id; "read failed: {}", err);
            Msg::LoadFailed {
                selection_id,
                message: err.to_string(),
            }
        }
        EngineEvent::Decoded {
            selection_id,
            result,
        } => Msg::DecodeFinished {
            selection_id,
            result: map_result(result),
        },
    }
}

fn map_result(result: sii_engine::DecodeResult) -> DecodeResult {
    match result {
        sii_engine::DecodeResult::Ok(text) => DecodeResult::Ok(text),
        sii_engine::DecodeResult::Error(message) => DecodeResult::Error(message),
    }
}
