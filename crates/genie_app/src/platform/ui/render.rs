use std::fmt::Display;
use std::io::{self, Write};

use chrono::{Local, TimeZone};
use genie_core::{AppViewModel, MessageId, MessageView, Notice, Role};

use super::constants::*;

/// Prints the conversation incrementally: each render writes only what
/// changed since the previous one.
#[derive(Debug, Default)]
pub struct Renderer {
    last_rendered: Option<MessageId>,
    busy: bool,
    connection_error: bool,
    copy_success: bool,
}

impl Renderer {
    pub fn render(&mut self, view: &AppViewModel, out: &mut impl Write) -> io::Result<()> {
        let mut lines = Vec::new();
        if let (Some(last), Some(first)) = (self.last_rendered, view.messages.first()) {
            if first.id > last {
                lines.push(TEXT_CLEARED.to_string());
            }
        }

        for message in view.messages.iter() {
            if !self.last_rendered.is_none_or(|last| message.id > last) {
                continue;
            }
            // The user's own line is already on screen.
            if message.role != Role::User || self.last_rendered.is_none() {
                lines.push(format_message(message, &Local));
            }
            self.last_rendered = Some(message.id);
        }

        if view.busy && !self.busy {
            lines.push(TEXT_THINKING.to_string());
        }
        if view.connection_error && !self.connection_error {
            lines.push(format!("{TEXT_CONNECTION_ERROR} (endpoint {})", view.endpoint));
        }
        if view.copy_success && !self.copy_success {
            lines.push(TEXT_COPIED.to_string());
        }
        self.busy = view.busy;
        self.connection_error = view.connection_error;
        self.copy_success = view.copy_success;

        if lines.is_empty() {
            return Ok(());
        }
        for line in lines {
            writeln!(out, "{line}")?;
        }
        if !view.busy && !view.should_quit {
            write!(out, "{PROMPT_MARKER}")?;
        }
        out.flush()
    }

    /// Print a standalone line and re-show the prompt.
    pub fn note(&self, text: &str, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{text}")?;
        if !self.busy {
            write!(out, "{PROMPT_MARKER}")?;
        }
        out.flush()
    }
}

/// `[HH:MM] Label: text` with the chat text's hard breaks shown as plain newlines.
pub fn format_message<Tz>(message: &MessageView, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let label = match (message.role, message.is_error) {
        (Role::User, _) => LABEL_USER,
        (Role::Bot, false) => LABEL_BOT,
        (Role::Bot, true) => LABEL_BOT_ERROR,
    };
    let time = message.created_at.with_timezone(tz).format("%H:%M");
    format!("[{time}] {label}: {}", display_text(&message.text))
}

pub fn display_text(text: &str) -> String {
    text.replace("  \n", "\n")
}

/// One-line description of a notice, if it should be shown.
pub fn describe_notice(notice: &Notice) -> Option<String> {
    let text = match notice {
        Notice::Busy => TEXT_BUSY.to_string(),
        Notice::EndpointChanged(endpoint) => format!("Endpoint set to {endpoint}"),
        Notice::PreviewRendered(info) => match &info.title {
            Some(title) => format!("Preview: {} ({title})", info.path),
            None => format!("Preview: {}", info.path),
        },
        Notice::PreviewFailed(err) => format!("Could not write preview: {err}"),
        // Shown through the copy indicator.
        Notice::Copied => return None,
        Notice::CopyFailed(err) => format!("Copy failed: {err}"),
        Notice::Exported(path) => format!("Saved {path}"),
        Notice::ExportFailed(err) => format!("Download failed: {err}"),
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use genie_core::{AppViewModel, MessageView, Notice, PreviewInfo, Role};
    use pretty_assertions::assert_eq;

    use super::{describe_notice, display_text, format_message, Renderer};

    fn message(id: u64, role: Role, text: &str, is_error: bool) -> MessageView {
        MessageView {
            id,
            role,
            text: text.to_string(),
            is_error,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 7, 0).unwrap(),
        }
    }

    fn render_to_string(renderer: &mut Renderer, view: &AppViewModel) -> String {
        let mut out = Vec::new();
        renderer.render(view, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn message_line_has_time_and_label() {
        let line = format_message(&message(1, Role::Bot, "Hello  \nthere", false), &Utc);
        assert_eq!(line, "[09:07] Bot: Hello\nthere");
        let line = format_message(&message(2, Role::Bot, "Sorry", true), &Utc);
        assert_eq!(line, "[09:07] Bot (error): Sorry");
    }

    #[test]
    fn hard_breaks_become_newlines() {
        assert_eq!(display_text("a  \nb  \nc"), "a\nb\nc");
        assert_eq!(display_text("no breaks"), "no breaks");
    }

    #[test]
    fn renders_only_new_bot_messages() {
        let mut renderer = Renderer::default();
        let mut view = AppViewModel {
            messages: vec![message(1, Role::Bot, "Hi!", false)],
            ..AppViewModel::default()
        };
        let first = render_to_string(&mut renderer, &view);
        assert!(first.contains("Bot: Hi!"));

        view.messages.push(message(2, Role::User, "a page", false));
        view.busy = true;
        let second = render_to_string(&mut renderer, &view);
        assert!(!second.contains("a page"));
        assert!(second.contains("Bot is thinking..."));
        assert!(!second.contains("Hi!"));

        view.messages.push(message(3, Role::Bot, "Done", false));
        view.busy = false;
        let third = render_to_string(&mut renderer, &view);
        assert!(third.contains("Bot: Done"));
        assert!(!third.contains("thinking"));
        assert!(third.ends_with("> "));
    }

    #[test]
    fn clear_prints_divider() {
        let mut renderer = Renderer::default();
        let mut view = AppViewModel {
            messages: vec![message(1, Role::Bot, "Hi!", false)],
            ..AppViewModel::default()
        };
        render_to_string(&mut renderer, &view);

        view.messages = vec![message(4, Role::Bot, "Fresh start", false)];
        let out = render_to_string(&mut renderer, &view);
        assert!(out.starts_with("--- chat cleared ---\n"));
        assert!(out.contains("Bot: Fresh start"));
    }

    #[test]
    fn indicators_print_on_transition_only() {
        let mut renderer = Renderer::default();
        let view = AppViewModel {
            connection_error: true,
            copy_success: true,
            endpoint: "http://localhost:8000".into(),
            ..AppViewModel::default()
        };
        let first = render_to_string(&mut renderer, &view);
        assert!(first.contains("Connection Error (endpoint http://localhost:8000)"));
        assert!(!first.contains("could not reach"));
        assert!(first.contains("Copied!"));

        let second = render_to_string(&mut renderer, &view);
        assert_eq!(second, "");
    }

    #[test]
    fn notices_describe_outcomes() {
        let info = PreviewInfo {
            path: "output/preview.html".into(),
            title: Some("Bakery".into()),
        };
        assert_eq!(
            describe_notice(&Notice::PreviewRendered(info)).as_deref(),
            Some("Preview: output/preview.html (Bakery)")
        );
        assert_eq!(describe_notice(&Notice::Copied), None);
        assert_eq!(
            describe_notice(&Notice::Busy).as_deref(),
            Some("Please wait for the current reply.")
        );
    }
}
