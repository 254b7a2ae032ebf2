/// One complete line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Prompt(String),
    Clear,
    Copy,
    Download,
    /// `/endpoint` alone shows the current endpoint.
    Endpoint(Option<String>),
    Preview,
    Help,
    Quit,
    Unknown(String),
}

/// Interpret a complete input entry. Blank entries yield `None`.
///
/// Anything starting with `/` is a command; `//` escapes a prompt that
/// itself starts with a slash.
pub fn parse_command(entry: &str) -> Option<Command> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(escaped) = trimmed.strip_prefix("//") {
        return Some(Command::Prompt(format!("/{escaped}")));
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Some(Command::Prompt(entry.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let command = match name.to_ascii_lowercase().as_str() {
        "clear" => Command::Clear,
        "copy" => Command::Copy,
        "download" | "save" => Command::Download,
        "endpoint" if arg.is_empty() => Command::Endpoint(None),
        "endpoint" => Command::Endpoint(Some(arg.to_string())),
        "preview" => Command::Preview,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(name.to_string()),
    };
    Some(command)
}

/// Joins physical lines ending in `\` into one multi-line entry.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: String,
}

impl LineBuffer {
    /// Feed one line (without its terminator). Returns the entry once complete.
    pub fn push(&mut self, line: &str) -> Option<String> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(partial) = line.strip_suffix('\\') {
            self.pending.push_str(partial);
            self.pending.push('\n');
            return None;
        }
        self.pending.push_str(line);
        Some(std::mem::take(&mut self.pending))
    }

    /// Whatever was buffered when input ended.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.pending);
        (!rest.trim().is_empty()).then_some(rest)
    }
}
