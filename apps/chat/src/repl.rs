//! Line-based front end: reads commands from stdin and drives the chat session.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::backend::ResumeBackend;
use crate::extract::TextExtractor;
use crate::models::Attachment;
use crate::render::{self, Renderer};
use crate::session::ChatSession;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Attach(String),
    Send,
    Clear,
    Theme,
    Debug,
    Help,
    Quit,
    JobUrl(String),
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        if !line.starts_with('/') {
            return Command::JobUrl(line.to_string());
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name {
            "/attach" if !arg.is_empty() => Command::Attach(arg.to_string()),
            "/send" => Command::Send,
            "/clear" => Command::Clear,
            "/theme" => Command::Theme,
            "/debug" => Command::Debug,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

pub async fn run(
    mut session: ChatSession,
    extractor: &dyn TextExtractor,
    backend: &dyn ResumeBackend,
) -> Result<()> {
    let mut renderer = Renderer::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", renderer.render(&session));
    prompt(&session)?;

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Attach(path) => match Attachment::from_path(Path::new(&path)).await {
                Ok(attachment) => match session.attach(attachment) {
                    Ok(()) => println!("Attached {path}"),
                    Err(e) => println!("{e}"),
                },
                Err(e) => {
                    warn!("Cannot read {path}: {e}");
                    println!("Cannot read {path}: {e}");
                }
            },
            Command::Send => match session.begin_submission() {
                Ok(pending) => {
                    print!("{}", renderer.render(&session));
                    print!("{}", render::processing_indicator(session.theme()));
                    std::io::stdout().flush()?;
                    session.run_submission(pending, extractor, backend).await;
                    info!("Submission settled: {:?}", session.request_state());
                    print!("{}", renderer.render(&session));
                }
                Err(e) => println!("{e}"),
            },
            Command::Clear => {
                session.clear();
                print!("{}", renderer.render(&session));
            }
            Command::Theme => {
                if let Err(e) = session.toggle_theme() {
                    warn!("Theme not saved: {e:#}");
                    println!("Theme not saved: {e:#}");
                }
                print!("{}", renderer.render_all(&session));
            }
            Command::Debug => {
                session.toggle_debug();
                print!("{}", renderer.render_all(&session));
            }
            Command::Help => print!("{}", render::help()),
            Command::Quit => break,
            Command::JobUrl(url) => {
                session.set_job_url(url);
                println!("Job posting URL set");
            }
            Command::Empty => {}
            Command::Unknown(input) => println!("Unknown command '{input}'. Try /help."),
        }
        prompt(&session)?;
    }

    Ok(())
}

fn prompt(session: &ChatSession) -> Result<()> {
    match session.attachment() {
        Some(attachment) => print!("[{}] › ", attachment.name),
        None => print!("› "),
    }
    std::io::stdout().flush()?;
    Ok(())
}
