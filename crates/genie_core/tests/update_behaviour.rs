use std::sync::Once;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use genie_core::{
    update, AppState, Effect, Msg, Notice, ParseSettings, Role, TurnId, CLEARED_GREETING,
    FULL_DOCUMENT_REPLY, GREETING, PLACEHOLDER_DOCUMENT,
};
use pretty_assertions::assert_eq;

const ENDPOINT: &str = "http://agent.test";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(genie_logging::initialize_for_tests);
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn new_state() -> AppState {
    AppState::new(ENDPOINT, ParseSettings::default(), t0())
}

fn submit(state: AppState, prompt: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(prompt.to_string()));
    update(state, Msg::PromptSubmitted { at: t0() })
}

fn turn_of(effects: &[Effect]) -> TurnId {
    match effects {
        [Effect::SendPrompt { turn_id, .. }] => *turn_id,
        other => panic!("expected a single SendPrompt, got {other:?}"),
    }
}

fn reply(state: AppState, turn_id: TurnId, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::AgentReplied {
            turn_id,
            text: text.to_string(),
            at: t0(),
        },
    )
}

fn run_turn(state: AppState, prompt: &str, response: &str) -> (AppState, Vec<Effect>) {
    let (state, effects) = submit(state, prompt);
    let turn_id = turn_of(&effects);
    reply(state, turn_id, response)
}

#[test]
fn fresh_state_has_greeting_and_placeholder() {
    init_logging();
    let state = new_state();
    let view = state.view();

    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].text, GREETING);
    assert_eq!(view.messages[0].role, Role::Bot);
    assert!(view.preview_is_placeholder);
    assert!(!view.busy);
    assert_eq!(state.preview().current(), PLACEHOLDER_DOCUMENT);
}

#[test]
fn submit_records_user_message_and_sends_prompt() {
    init_logging();
    let (mut state, effects) = submit(new_state(), "Make a bakery landing page");

    assert_eq!(
        effects,
        vec![Effect::SendPrompt {
            turn_id: 1,
            endpoint: ENDPOINT.to_string(),
            prompt: "Make a bakery landing page".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.busy);
    assert_eq!(view.messages.len(), 2);
    assert_eq!(view.messages[1].role, Role::User);
    assert_eq!(view.messages[1].text, "Make a bakery landing page");
    assert_eq!(state.input(), "");
    assert!(state.consume_dirty());
}

#[test]
fn blank_prompt_is_ignored() {
    init_logging();
    let (state, effects) = submit(new_state(), "   \n ");
    assert!(effects.is_empty());
    assert_eq!(state.view().messages.len(), 1);
    assert!(!state.is_busy());
}

#[test]
fn second_submit_while_busy_is_rejected() {
    init_logging();
    let (state, _) = submit(new_state(), "first");
    let (state, _) = update(state, Msg::InputChanged("second".to_string()));
    let (mut state, effects) = update(state, Msg::PromptSubmitted { at: t0() });

    assert!(effects.is_empty());
    assert_eq!(state.view().messages.len(), 2);
    assert_eq!(state.input(), "");
    assert_eq!(state.take_notice(), Some(Notice::Busy));
}

#[test]
fn scenario_a_full_document_updates_preview() {
    init_logging();
    let doc = "<!DOCTYPE html><html><body>Hi</body></html>";
    let (state, effects) = run_turn(new_state(), "hello page", doc);

    assert_eq!(
        effects,
        vec![Effect::RenderPreview {
            html: doc.to_string()
        }]
    );
    let view = state.view();
    assert_eq!(view.messages.last().unwrap().text, FULL_DOCUMENT_REPLY);
    assert!(!view.busy);
    assert_eq!(state.preview().current(), doc);
}

#[test]
fn scenario_b_fenced_block_splits_chat_and_preview() {
    init_logging();
    let raw = "Here you go:\n```html\n<!DOCTYPE html><html></html>\n```\nEnjoy!";
    let (state, effects) = run_turn(new_state(), "tiny page", raw);

    assert_eq!(state.preview().current(), "<!DOCTYPE html><html></html>");
    assert_eq!(effects.len(), 1);
    let bot = state.view().messages.last().cloned().unwrap();
    assert_eq!(bot.role, Role::Bot);
    assert_eq!(bot.text, "Here you go:  \nEnjoy!");
    assert!(!bot.is_error);
}

#[test]
fn scenario_c_plain_text_leaves_preview() {
    init_logging();
    let doc = "<!DOCTYPE html><html><body>Kept</body></html>";
    let (state, _) = run_turn(new_state(), "page", doc);
    let (state, effects) = run_turn(state, "???", "I couldn't understand that request.");

    assert!(effects.is_empty());
    assert_eq!(
        state.view().messages.last().unwrap().text,
        "I couldn't understand that request."
    );
    assert_eq!(state.preview().current(), doc);
}

#[test]
fn scenario_d_failure_reports_error_and_reenables_input() {
    init_logging();
    let (state, effects) = submit(new_state(), "page");
    let turn_id = turn_of(&effects);
    let (state, effects) = update(
        state,
        Msg::AgentFailed {
            turn_id,
            reason: "HTTP error, status 500".to_string(),
            at: t0(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.messages.len(), 3);
    let last = view.messages.last().unwrap();
    assert!(last.is_error);
    assert!(last.text.contains("500"));
    assert!(!view.busy);
    assert!(view.connection_error);
    assert!(view.preview_is_placeholder);

    let (_, effects) = submit(state, "try again");
    assert_eq!(turn_of(&effects), turn_id + 1);
}

#[test]
fn scenario_e_clear_keeps_last_preview() {
    init_logging();
    let doc = "<!DOCTYPE html><html><body>Second</body></html>";
    let (state, _) = run_turn(
        new_state(),
        "one",
        "<!DOCTYPE html><html><body>First</body></html>",
    );
    let (state, _) = run_turn(state, "two", doc);
    let (state, effects) = update(state, Msg::ClearClicked { at: t0() });

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].text, CLEARED_GREETING);
    assert_eq!(state.preview().current(), doc);
}

#[test]
fn clear_resets_connection_error() {
    init_logging();
    let (state, effects) = submit(new_state(), "page");
    let (state, _) = update(
        state,
        Msg::AgentFailed {
            turn_id: turn_of(&effects),
            reason: "network error".to_string(),
            at: t0(),
        },
    );
    assert!(state.view().connection_error);

    let (state, _) = update(state, Msg::ClearClicked { at: t0() });
    assert!(!state.view().connection_error);
}

#[test]
fn clear_is_ignored_while_busy() {
    init_logging();
    let (state, _) = submit(new_state(), "page");
    let (mut state, _) = update(state, Msg::ClearClicked { at: t0() });

    assert_eq!(state.view().messages.len(), 2);
    assert_eq!(state.take_notice(), Some(Notice::Busy));
}

#[test]
fn stale_reply_is_ignored() {
    init_logging();
    let (state, effects) = submit(new_state(), "page");
    let turn_id = turn_of(&effects);
    let (state, _) = reply(state, turn_id, "done");
    let before = state.view();

    let (state, effects) = reply(state, turn_id, "<!DOCTYPE html><html></html>");
    assert!(effects.is_empty());
    assert_eq!(state.view().messages, before.messages);
    assert!(state.preview().is_placeholder());
}

#[test]
fn preview_never_regresses_over_mixed_turns() {
    init_logging();
    let responses = [
        "<!DOCTYPE html><html><body>1</body></html>",
        "no document here",
        "```html\n<div>fragment only</div>\n```",
        "",
        "Updated:\n```html\n<!DOCTYPE html><html><body>2</body></html>\n```",
    ];
    let mut state = new_state();
    let mut expected = state.preview().current().to_string();
    for response in responses {
        let (next, _) = run_turn(state, "go", response);
        state = next;
        if response.contains("<body>") {
            expected = state.preview().current().to_string();
        }
        let current = state.preview().current();
        assert!(!current.is_empty());
        assert!(current.contains("<html"));
        assert_eq!(current, expected);
    }
    assert_eq!(
        state.preview().current(),
        "<!DOCTYPE html><html><body>2</body></html>"
    );
}

#[test]
fn endpoint_change_trims_and_clears_error() {
    init_logging();
    let (state, effects) = submit(new_state(), "page");
    let (state, _) = update(
        state,
        Msg::AgentFailed {
            turn_id: turn_of(&effects),
            reason: "timeout".to_string(),
            at: t0(),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::EndpointChanged("  http://other:9000  ".to_string()),
    );

    assert_eq!(state.endpoint(), "http://other:9000");
    assert!(!state.view().connection_error);
    assert_eq!(
        state.take_notice(),
        Some(Notice::EndpointChanged("http://other:9000".to_string()))
    );

    let (state, _) = update(state, Msg::EndpointChanged("   ".to_string()));
    assert_eq!(state.endpoint(), "http://other:9000");
}

#[test]
fn copy_and_download_carry_current_document() {
    init_logging();
    let state = new_state();
    let (state, effects) = update(state, Msg::CopyClicked);
    assert_eq!(
        effects,
        vec![Effect::CopyDocument {
            html: PLACEHOLDER_DOCUMENT.to_string()
        }]
    );
    let (_, effects) = update(state, Msg::DownloadClicked);
    assert_eq!(
        effects,
        vec![Effect::ExportDocument {
            html: PLACEHOLDER_DOCUMENT.to_string()
        }]
    );
}

#[test]
fn copy_indicator_expires_after_feedback_window() {
    init_logging();
    let (state, _) = update(
        new_state(),
        Msg::CopyFinished {
            result: Ok(()),
            at: t0(),
        },
    );
    assert!(state.view().copy_success);

    let (state, _) = update(
        state,
        Msg::Tick {
            at: t0() + TimeDelta::milliseconds(500),
        },
    );
    assert!(state.view().copy_success);

    let (state, _) = update(
        state,
        Msg::Tick {
            at: t0() + TimeDelta::seconds(2),
        },
    );
    assert!(!state.view().copy_success);
}

#[test]
fn failed_copy_reports_notice_without_indicator() {
    init_logging();
    let (mut state, _) = update(
        new_state(),
        Msg::CopyFinished {
            result: Err("no display".to_string()),
            at: t0(),
        },
    );
    assert!(!state.view().copy_success);
    assert_eq!(
        state.take_notice(),
        Some(Notice::CopyFailed("no display".to_string()))
    );
}

#[test]
fn quit_request_is_reflected_in_view() {
    init_logging();
    let (state, effects) = update(new_state(), Msg::QuitRequested);
    assert!(effects.is_empty());
    assert!(state.view().should_quit);
}
