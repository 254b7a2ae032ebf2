use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use genie_core::{update, AppState, Msg, ParseSettings};
use genie_engine::{GatewaySettings, OutputDir};
use genie_logging::{genie_debug, genie_info};

use super::effects::EffectRunner;
use super::input::{parse_command, Command, LineBuffer};
use super::ui::constants::HELP_TEXT;
use super::ui::render::{describe_notice, Renderer};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub struct AppConfig {
    pub endpoint: String,
    pub output_dir: PathBuf,
    pub parse: ParseSettings,
    pub gateway: GatewaySettings,
}

/// Everything the main loop reacts to.
pub enum AppEvent {
    Input(Command),
    Msg(Msg),
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    OutputDir::open(&config.output_dir)
        .with_context(|| format!("cannot use output directory {:?}", config.output_dir))?;
    genie_info!(
        "starting endpoint={} output_dir={:?}",
        config.endpoint,
        config.output_dir
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let mut effects = EffectRunner::new(config.gateway, config.output_dir, event_tx.clone());
    let mut state = AppState::new(config.endpoint, config.parse, Utc::now());
    let mut renderer = Renderer::default();
    let mut out = io::stdout();

    spawn_input_thread(event_tx.clone());
    spawn_tick_thread(event_tx.clone());

    // Put the placeholder page on disk before the first turn.
    let _ = event_tx.send(AppEvent::Msg(Msg::PreviewRequested));
    drop(event_tx);

    state.consume_dirty();
    renderer.render(&state.view(), &mut out)?;

    for event in event_rx {
        let msgs = match event {
            AppEvent::Msg(msg) => vec![msg],
            AppEvent::Input(command) => match command_to_msgs(command, &state) {
                Ok(msgs) => msgs,
                Err(text) => {
                    renderer.note(&text, &mut out)?;
                    continue;
                }
            },
        };
        for msg in msgs {
            state = dispatch(state, msg, &mut effects, &mut renderer, &mut out)?;
        }
        if state.view().should_quit {
            break;
        }
    }

    genie_info!("session ended");
    Ok(())
}

fn dispatch(
    state: AppState,
    msg: Msg,
    effects: &mut EffectRunner,
    renderer: &mut Renderer,
    out: &mut impl Write,
) -> io::Result<AppState> {
    let (mut state, pending) = update(state, msg);
    effects.enqueue(pending);
    if state.consume_dirty() {
        renderer.render(&state.view(), out)?;
    }
    if let Some(text) = state.take_notice().as_ref().and_then(describe_notice) {
        renderer.note(&text, out)?;
    }
    Ok(state)
}

/// Translate a user command into messages, or into text to print directly.
fn command_to_msgs(command: Command, state: &AppState) -> Result<Vec<Msg>, String> {
    let at = Utc::now();
    let msgs = match command {
        Command::Prompt(text) => vec![Msg::InputChanged(text), Msg::PromptSubmitted { at }],
        Command::Clear => vec![Msg::ClearClicked { at }],
        Command::Copy => vec![Msg::CopyClicked],
        Command::Download => vec![Msg::DownloadClicked],
        Command::Endpoint(Some(endpoint)) => vec![Msg::EndpointChanged(endpoint)],
        Command::Endpoint(None) => return Err(format!("Endpoint: {}", state.endpoint())),
        Command::Preview => vec![Msg::PreviewRequested],
        Command::Help => return Err(HELP_TEXT.to_string()),
        Command::Quit => vec![Msg::QuitRequested],
        Command::Unknown(name) => {
            return Err(format!("Unknown command /{name}. Type /help for a list."))
        }
    };
    Ok(msgs)
}

fn spawn_input_thread(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut buffer = LineBuffer::default();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let Some(entry) = buffer.push(&line) else {
                continue;
            };
            if let Some(command) = parse_command(&entry) {
                if event_tx.send(AppEvent::Input(command)).is_err() {
                    return;
                }
            }
        }
        if let Some(command) = buffer.finish().as_deref().and_then(parse_command) {
            let _ = event_tx.send(AppEvent::Input(command));
        }
        genie_debug!("stdin closed");
        let _ = event_tx.send(AppEvent::Input(Command::Quit));
    });
}

fn spawn_tick_thread(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while event_tx
            .send(AppEvent::Msg(Msg::Tick { at: Utc::now() }))
            .is_ok()
        {
            thread::sleep(TICK_INTERVAL);
        }
    });
}
