use ratatui::style::{Color, Modifier, Style};

pub const APP_TITLE: &str = "Vibe Digest";
pub const INPUT_PLACEHOLDER: &str = "Paste URL here...";
pub const BUTTON_SUMMARIZE: &str = "[ Summarize ]";
pub const BUTTON_PENDING: &str = "Summarizing...";
pub const COPY_HINT: &str = " Ctrl+Y copy ";
pub const COPY_DONE: &str = " Copied! ";
pub const HELP_TEXT: &str =
    "Enter summarize | Esc cancel | Ctrl+Y copy | Ctrl+T plain/structured | Up/Down scroll | Ctrl+C quit";

pub const CHECK_MARKER: &str = "✔ ";
pub const INSIGHT_BAR: &str = "▌ ";
pub const RULE_WIDTH: usize = 40;

pub const TITLE_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
pub const HEADING_STYLE: Style = Style::new().fg(Color::LightBlue).add_modifier(Modifier::BOLD);
pub const CHECK_STYLE: Style = Style::new().fg(Color::Green);
pub const INSIGHT_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::ITALIC);
pub const CODE_STYLE: Style = Style::new().fg(Color::Gray);
pub const ERROR_STYLE: Style = Style::new().fg(Color::Red);
pub const MUTED_STYLE: Style = Style::new().fg(Color::DarkGray);
pub const BUTTON_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::White)
    .add_modifier(Modifier::BOLD);
pub const PENDING_STYLE: Style = Style::new().fg(Color::Yellow);
