use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use genie_core::{Effect, Msg, PreviewInfo};
use genie_engine::{
    export_document, write_preview, ClipboardSink, EngineEvent, EngineHandle, GatewaySettings,
    SystemClipboard,
};
use genie_logging::{genie_info, genie_warn};

use super::app::AppEvent;

/// Executes core effects and feeds their outcomes back as [`Msg`]s.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Option<SystemClipboard>,
    output_dir: PathBuf,
    msg_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        settings: GatewaySettings,
        output_dir: PathBuf,
        msg_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let runner = Self {
            engine: EngineHandle::new(settings),
            clipboard: None,
            output_dir,
            msg_tx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            let msg = match effect {
                Effect::SendPrompt {
                    turn_id,
                    endpoint,
                    prompt,
                } => {
                    genie_info!("SendPrompt turn={} endpoint={}", turn_id, endpoint);
                    self.engine.send(turn_id, endpoint, prompt);
                    continue;
                }
                Effect::RenderPreview { html } => {
                    let result = write_preview(&self.output_dir, &html)
                        .map(|summary| PreviewInfo {
                            path: summary.path.display().to_string(),
                            title: summary.title,
                        })
                        .map_err(|err| err.to_string());
                    match &result {
                        Ok(info) => genie_info!(
                            "preview updated path={} title={:?}",
                            info.path,
                            info.title
                        ),
                        Err(err) => genie_warn!("preview render failed: {}", err),
                    }
                    Msg::PreviewRendered(result)
                }
                Effect::CopyDocument { html } => {
                    // Created on first use; on Linux it must outlive the copy.
                    let clipboard = self.clipboard.get_or_insert_with(SystemClipboard::new);
                    let result = clipboard
                        .copy_text(&html)
                        .map(|method| genie_info!("copied {} bytes via {:?}", html.len(), method))
                        .map_err(|err| err.to_string());
                    Msg::CopyFinished {
                        result,
                        at: Utc::now(),
                    }
                }
                Effect::ExportDocument { html } => {
                    let result = export_document(&self.output_dir, &html)
                        .map(|summary| {
                            genie_info!(
                                "exported {} bytes ({}) to {:?}",
                                summary.bytes,
                                summary.mime,
                                summary.path
                            );
                            summary.path.display().to_string()
                        })
                        .map_err(|err| err.to_string());
                    Msg::ExportFinished(result)
                }
            };
            let _ = self.msg_tx.send(AppEvent::Msg(msg));
        }
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let msg = match event {
                    EngineEvent::TurnCompleted { turn_id, result } => match result {
                        Ok(text) => Msg::AgentReplied {
                            turn_id,
                            text,
                            at: Utc::now(),
                        },
                        Err(err) => {
                            genie_warn!("turn {} failed: {}", turn_id, err);
                            Msg::AgentFailed {
                                turn_id,
                                reason: err.to_string(),
                                at: Utc::now(),
                            }
                        }
                    },
                };
                if msg_tx.send(AppEvent::Msg(msg)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}
