//! Terminal rendering of a chat session. Output is returned as strings; the REPL prints it.

use chrono::{DateTime, Local, Utc};

use crate::models::{Message, Role};
use crate::session::ChatSession;
use crate::theme::ThemeMode;

const RESET: &str = "\x1b[0m";

struct Palette {
    user: &'static str,
    accent: &'static str,
    muted: &'static str,
}

fn palette(theme: ThemeMode) -> Palette {
    match theme {
        ThemeMode::Dark => Palette {
            user: "\x1b[1;97m",
            accent: "\x1b[38;5;208m",
            muted: "\x1b[90m",
        },
        ThemeMode::Light => Palette {
            user: "\x1b[1;30m",
            accent: "\x1b[38;5;166m",
            muted: "\x1b[38;5;244m",
        },
    }
}

/// Prints only what was appended since the last call, so the view always ends at the
/// latest message.
#[derive(Debug, Default)]
pub struct Renderer {
    rendered: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, session: &ChatSession) -> String {
        let messages = session.messages();
        let mut out = String::new();

        if messages.len() < self.rendered {
            self.rendered = 0;
        }
        if messages.is_empty() {
            out.push_str(&empty_state(session.theme()));
            return out;
        }

        for index in self.rendered..messages.len() {
            let previous = index.checked_sub(1).map(|i| messages[i].role);
            out.push_str(&format_message(
                &messages[index],
                previous,
                session.theme(),
                session.show_debug(),
            ));
        }
        self.rendered = messages.len();
        out
    }

    /// Re-renders the whole conversation, e.g. after a theme or debug toggle.
    pub fn render_all(&mut self, session: &ChatSession) -> String {
        self.rendered = 0;
        self.render(session)
    }
}

pub fn processing_indicator(theme: ThemeMode) -> String {
    let p = palette(theme);
    format!("{}▁▃▅ processing resume…{RESET}\n", p.accent)
}

pub fn empty_state(theme: ThemeMode) -> String {
    let p = palette(theme);
    format!(
        "{accent}Resume Processor{RESET}\n\
         {muted}Attach a PDF resume to get AI-powered analysis and feedback.{RESET}\n\
         {accent}•{RESET} /attach <path> to select your resume\n\
         {accent}•{RESET} type the job posting URL, then /send to get feedback\n\
         {accent}•{RESET} /help for all commands\n",
        accent = p.accent,
        muted = p.muted,
    )
}

/// The assistant label is only repeated when the speaker changes.
pub fn show_avatar(message: &Message, previous: Option<Role>) -> bool {
    message.role == Role::Assistant && previous != Some(Role::Assistant)
}

pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

pub fn format_message(
    message: &Message,
    previous: Option<Role>,
    theme: ThemeMode,
    debug: bool,
) -> String {
    let p = palette(theme);
    let mut out = String::new();

    if debug {
        if let Ok(json) = serde_json::to_string_pretty(message) {
            out.push_str(&format!("{}{json}{RESET}\n", p.muted));
        }
    }

    let label = match message.role {
        Role::User => format!("{}You{RESET}", p.user),
        Role::Assistant if show_avatar(message, previous) => format!("{}AI{RESET}", p.accent),
        Role::Assistant => String::new(),
    };
    out.push_str(&format!(
        "{}[{}]{RESET} {label}\n",
        p.muted,
        format_time(message.timestamp)
    ));
    for line in message.text.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out
}

pub fn help() -> &'static str {
    "Commands:\n\
     \x20 /attach <path>  attach a PDF resume\n\
     \x20 /send           process the attached resume against the job posting URL\n\
     \x20 /clear          clear the conversation\n\
     \x20 /theme          toggle dark/light theme\n\
     \x20 /debug          toggle the debug overlay\n\
     \x20 /help           show this help\n\
     \x20 /quit           exit\n\
     Any other text sets the job posting URL.\n"
}
