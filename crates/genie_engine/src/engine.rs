use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use genie_logging::{genie_error, genie_info};

use crate::gateway::{AgentGateway, GatewaySettings, ReqwestGateway};
use crate::{AgentResponse, EngineEvent, FailureKind, GatewayError, TurnId};

enum EngineCommand {
    Send {
        turn_id: TurnId,
        endpoint: String,
        prompt: String,
    },
}

impl EngineCommand {
    fn turn_id(&self) -> TurnId {
        match self {
            EngineCommand::Send { turn_id, .. } => *turn_id,
        }
    }
}

/// Owns the IO thread. Commands go in over a channel, [`EngineEvent`]s come
/// back over another; callers poll with [`EngineHandle::try_recv`]. Clones
/// share both channels.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    /// Lets `send` complete a turn itself when the engine thread is gone.
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: GatewaySettings) -> Self {
        match ReqwestGateway::new(settings) {
            Ok(gateway) => Self::with_gateway(Arc::new(gateway)),
            Err(err) => {
                genie_error!("failed to build agent gateway: {}", err);
                Self::unavailable(err.message)
            }
        }
    }

    pub fn with_gateway(gateway: Arc<dyn AgentGateway>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let thread_tx = event_tx.clone();

        thread::spawn(move || {
            let event_tx = thread_tx;
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    genie_error!("failed to start tokio runtime: {}", err);
                    reject_all(cmd_rx, event_tx, err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let turn_id = command.turn_id();
                let gateway = gateway.clone();
                let task_tx = event_tx.clone();
                let task = runtime.spawn(async move {
                    handle_command(gateway.as_ref(), command, task_tx).await;
                });
                // A turn whose task dies still has to complete.
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    if let Err(err) = task.await {
                        genie_error!("turn={} task ended without a result: {}", turn_id, err);
                        let _ = event_tx.send(unavailable_event(turn_id, err.to_string()));
                    }
                });
            }
        });

        Self::from_channels(cmd_tx, event_tx, event_rx)
    }

    /// An engine that fails every turn with `reason`.
    fn unavailable(reason: String) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let thread_tx = event_tx.clone();
        thread::spawn(move || reject_all(cmd_rx, thread_tx, reason));
        Self::from_channels(cmd_tx, event_tx, event_rx)
    }

    fn from_channels(
        cmd_tx: mpsc::Sender<EngineCommand>,
        event_tx: mpsc::Sender<EngineEvent>,
        event_rx: mpsc::Receiver<EngineEvent>,
    ) -> Self {
        Self {
            cmd_tx,
            event_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    /// Queue a turn. Exactly one `TurnCompleted` event follows, even when the
    /// engine thread has stopped.
    pub fn send(&self, turn_id: TurnId, endpoint: impl Into<String>, prompt: impl Into<String>) {
        let command = EngineCommand::Send {
            turn_id,
            endpoint: endpoint.into(),
            prompt: prompt.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            genie_error!("turn={} engine thread stopped", turn_id);
            let _ = self
                .event_tx
                .send(unavailable_event(turn_id, "engine thread stopped".to_string()));
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    gateway: &dyn AgentGateway,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Send {
            turn_id,
            endpoint,
            prompt,
        } => {
            let result = gateway
                .send(&endpoint, &prompt)
                .await
                .and_then(AgentResponse::into_text);
            match &result {
                Ok(text) => genie_info!("turn={} agent replied len={}", turn_id, text.len()),
                Err(err) => genie_info!("turn={} agent call failed: {}", turn_id, err),
            }
            let _ = event_tx.send(EngineEvent::TurnCompleted { turn_id, result });
        }
    }
}

fn reject_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: String,
) {
    while let Ok(command) = cmd_rx.recv() {
        let _ = event_tx.send(unavailable_event(command.turn_id(), reason.clone()));
    }
}

fn unavailable_event(turn_id: TurnId, reason: String) -> EngineEvent {
    EngineEvent::TurnCompleted {
        turn_id,
        result: Err(GatewayError::new(FailureKind::EngineUnavailable, reason)),
    }
}
