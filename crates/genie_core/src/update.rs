use genie_logging::{genie_debug, genie_info, genie_warn};

use crate::conversation::{MessageStatus, CLEARED_GREETING};
use crate::pipeline::parse_response;
use crate::{AppState, Effect, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            // Input is disabled while a turn is outstanding.
            if !state.is_busy() {
                state.set_input(text);
            }
            Vec::new()
        }
        Msg::PromptSubmitted { at } => {
            if state.is_busy() {
                state.set_notice(Notice::Busy);
                return (state, Vec::new());
            }
            if state.input().trim().is_empty() {
                return (state, Vec::new());
            }
            let prompt = state.take_input();
            let turn_id = state.begin_turn(&prompt, at);
            genie_info!("turn={} submitted prompt_len={}", turn_id, prompt.len());
            vec![Effect::SendPrompt {
                turn_id,
                endpoint: state.endpoint().to_string(),
                prompt,
            }]
        }
        Msg::AgentReplied { turn_id, text, at } => {
            if !state.finish_turn(turn_id) {
                genie_warn!("turn={} reply ignored, not in flight", turn_id);
                return (state, Vec::new());
            }
            let parsed = parse_response(&text, state.settings());
            genie_info!(
                "turn={} classified as {:?} response_len={} document={}",
                turn_id,
                parsed.classification,
                text.len(),
                parsed.document.is_some()
            );
            state.append_bot(parsed.chat_text, MessageStatus::Normal, at);
            match parsed.document {
                Some(document) => {
                    state.update_preview(document);
                    vec![Effect::RenderPreview {
                        html: state.preview().current().to_string(),
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::AgentFailed {
            turn_id,
            reason,
            at,
        } => {
            if !state.finish_turn(turn_id) {
                genie_warn!("turn={} failure ignored, not in flight", turn_id);
                return (state, Vec::new());
            }
            genie_warn!("turn={} failed: {}", turn_id, reason);
            state.append_bot(error_reply(&reason), MessageStatus::Error, at);
            state.record_error(reason);
            Vec::new()
        }
        Msg::ClearClicked { at } => {
            if state.is_busy() {
                state.set_notice(Notice::Busy);
            } else {
                state.clear_conversation(CLEARED_GREETING, at);
                state.clear_error();
            }
            Vec::new()
        }
        Msg::EndpointChanged(raw) => {
            let endpoint = raw.trim();
            if !endpoint.is_empty() {
                genie_info!("endpoint changed to {}", endpoint);
                state.set_endpoint(endpoint.to_string());
                state.clear_error();
                state.set_notice(Notice::EndpointChanged(endpoint.to_string()));
            }
            Vec::new()
        }
        Msg::PreviewRequested => vec![Effect::RenderPreview {
            html: state.preview().current().to_string(),
        }],
        Msg::PreviewRendered(result) => {
            match result {
                Ok(info) => state.set_notice(Notice::PreviewRendered(info)),
                Err(err) => state.set_notice(Notice::PreviewFailed(err)),
            }
            Vec::new()
        }
        Msg::CopyClicked => vec![Effect::CopyDocument {
            html: state.preview().current().to_string(),
        }],
        Msg::CopyFinished { result, at } => {
            match result {
                Ok(()) => {
                    state.mark_copied(at);
                    state.set_notice(Notice::Copied);
                }
                Err(err) => state.set_notice(Notice::CopyFailed(err)),
            }
            Vec::new()
        }
        Msg::DownloadClicked => vec![Effect::ExportDocument {
            html: state.preview().current().to_string(),
        }],
        Msg::ExportFinished(result) => {
            match result {
                Ok(path) => state.set_notice(Notice::Exported(path)),
                Err(err) => state.set_notice(Notice::ExportFailed(err)),
            }
            Vec::new()
        }
        Msg::QuitRequested => {
            genie_debug!("quit requested");
            state.request_quit();
            Vec::new()
        }
        Msg::Tick { at } => {
            state.expire_copy_feedback(at);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Chat text for a failed turn.
pub fn error_reply(reason: &str) -> String {
    format!("Sorry, I encountered an error: {reason}. Please check your connection and try again.")
}
