pub const LABEL_USER: &str = "You";
pub const LABEL_BOT: &str = "Bot";
pub const LABEL_BOT_ERROR: &str = "Bot (error)";

pub const TEXT_THINKING: &str = "Bot is thinking...";
pub const TEXT_CLEARED: &str = "--- chat cleared ---";
pub const TEXT_CONNECTION_ERROR: &str = "Connection Error";
pub const TEXT_COPIED: &str = "Copied!";
pub const TEXT_BUSY: &str = "Please wait for the current reply.";

pub const PROMPT_MARKER: &str = "> ";

pub const HELP_TEXT: &str = "\
Type a description of the page you want and press Enter.
End a line with \\ to continue on the next line.

  /clear            start a new conversation
  /copy             copy the current page's HTML to the clipboard
  /download         save the current page as generated-website.html
  /preview          rewrite preview.html from the current page
  /endpoint [url]   show or change the agent service endpoint
  /help             show this help
  /quit             leave";
