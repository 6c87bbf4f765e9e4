//! Chat session: everything one run of the client knows, i.e. the conversation, the pending
//! attachment, the job URL draft, the theme and the state of the in-flight submission.

pub mod request_state;

use anyhow::Result;
use tracing::{info, warn};

use crate::backend::ResumeBackend;
use crate::errors::{AttachError, SubmitError, SubmitRejected};
use crate::extract::TextExtractor;
use crate::models::{Attachment, Message};
use crate::theme::{ThemeMode, ThemeStore};

pub use request_state::{RequestEvent, RequestState};

/// Shown in the user bubble when no job posting was entered.
const NO_URL_PLACEHOLDER: &str = "(no URL provided)";

/// A submission that has been accepted but not yet run.
/// Only `ChatSession::begin_submission` creates one, and only while no other is in flight.
#[derive(Debug)]
pub struct PendingSubmission {
    attachment: Attachment,
    job_url: String,
}

pub struct ChatSession {
    messages: Vec<Message>,
    attachment: Option<Attachment>,
    job_url: String,
    request: RequestState,
    theme: ThemeMode,
    theme_store: ThemeStore,
    show_debug: bool,
}

impl ChatSession {
    /// Starts an empty session with the persisted theme.
    pub fn new(theme_store: ThemeStore) -> Self {
        let theme = theme_store.load();
        Self {
            messages: Vec::new(),
            attachment: None,
            job_url: String::new(),
            request: RequestState::Idle,
            theme,
            theme_store,
            show_debug: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn job_url(&self) -> &str {
        &self.job_url
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }

    pub fn is_processing(&self) -> bool {
        self.request.is_processing()
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    /// Replaces the current attachment. Non-PDF files are rejected and leave the
    /// previous attachment in place.
    pub fn attach(&mut self, attachment: Attachment) -> Result<(), AttachError> {
        if self.is_processing() {
            return Err(AttachError::Busy);
        }
        if !attachment.is_pdf() {
            return Err(AttachError::NotPdf {
                name: attachment.name,
                content_type: attachment.content_type,
            });
        }

        info!("Attached {} ({} bytes)", attachment.name, attachment.bytes.len());
        self.attachment = Some(attachment);
        Ok(())
    }

    pub fn set_job_url(&mut self, url: impl Into<String>) {
        self.job_url = url.into();
    }

    /// Accepts the current attachment for processing and appends the user's bubble.
    /// Rejections leave the session untouched.
    pub fn begin_submission(&mut self) -> Result<PendingSubmission, SubmitRejected> {
        if self.is_processing() {
            return Err(SubmitRejected::Busy);
        }
        let attachment = self.attachment.take().ok_or(SubmitRejected::NoAttachment)?;
        let job_url = std::mem::take(&mut self.job_url);

        let shown_url = if job_url.is_empty() {
            NO_URL_PLACEHOLDER
        } else {
            job_url.as_str()
        };
        self.push(Message::user(format!(
            "Processing resume: {}\nJob posting: {}",
            attachment.name, shown_url
        )));
        self.advance(RequestEvent::Begin);

        Ok(PendingSubmission {
            attachment,
            job_url,
        })
    }

    /// Extracts, sends, and appends the assistant's reply. Any failure becomes the reply.
    /// Attachment and URL draft are cleared on every path.
    pub async fn run_submission(
        &mut self,
        pending: PendingSubmission,
        extractor: &dyn TextExtractor,
        backend: &dyn ResumeBackend,
    ) -> &Message {
        let outcome = self.process(&pending, extractor, backend).await;

        let (event, text) = match outcome {
            Ok(response) => (RequestEvent::Succeeded, response),
            Err(e) => {
                warn!("Processing {} failed: {e}", pending.attachment.name);
                (
                    RequestEvent::Failed,
                    format!("Error processing resume: {e}"),
                )
            }
        };

        self.advance(event);
        self.attachment = None;
        self.job_url.clear();
        self.push(Message::assistant(text))
    }

    /// `begin_submission` followed by `run_submission`.
    #[allow(dead_code)]
    pub async fn submit(
        &mut self,
        extractor: &dyn TextExtractor,
        backend: &dyn ResumeBackend,
    ) -> Result<&Message, SubmitRejected> {
        let pending = self.begin_submission()?;
        Ok(self.run_submission(pending, extractor, backend).await)
    }

    /// Drops the whole conversation and any pending input.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.attachment = None;
        self.job_url.clear();
        if let Some(next) = self.request.next(RequestEvent::Reset) {
            self.request = next;
        }
        info!("Chat history cleared");
    }

    /// Flips the theme and persists it. The in-memory theme changes even if saving fails.
    pub fn toggle_theme(&mut self) -> Result<ThemeMode> {
        self.theme = self.theme.toggled();
        self.theme_store.save(self.theme)?;
        Ok(self.theme)
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.show_debug = !self.show_debug;
        self.show_debug
    }

    async fn process(
        &mut self,
        pending: &PendingSubmission,
        extractor: &dyn TextExtractor,
        backend: &dyn ResumeBackend,
    ) -> Result<String, SubmitError> {
        let resume_text = extractor.extract(pending.attachment.bytes.clone()).await?;
        self.advance(RequestEvent::Extracted);

        let response = backend.process(&resume_text, &pending.job_url).await?;
        Ok(response)
    }

    fn advance(&mut self, event: RequestEvent) {
        match self.request.next(event) {
            Some(next) => self.request = next,
            None => warn!("Ignoring {event:?} in state {:?}", self.request),
        }
    }

    fn push(&mut self, message: Message) -> &Message {
        let index = self.messages.len();
        self.messages.push(message);
        &self.messages[index]
    }
}
