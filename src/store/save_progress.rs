//! Utilities to track the progression of a save sweep

use std::fmt::{Display, Error, Formatter};

/// An event that happens while pending goals are being persisted
#[derive(Clone, Debug)]
pub enum SaveEvent {
    /// No save has started
    NotStarted,
    /// A save sweep has just started but no goal is handled yet
    Started,
    /// A save sweep is in progress
    InProgress { goal: String, saved_already: usize },
    /// The save sweep is finished
    Finished { success: bool },
}

impl Display for SaveEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            SaveEvent::NotStarted => write!(f, "Not started"),
            SaveEvent::Started => write!(f, "Save has started..."),
            SaveEvent::InProgress{goal, saved_already} => write!(f, "[{} saved] {}...", saved_already, goal),
            SaveEvent::Finished{success} => match success {
                true => write!(f, "Save successfully finished"),
                false => write!(f, "Save finished with errors"),
            }
        }
    }
}

impl Default for SaveEvent {
    fn default() -> Self {
        Self::NotStarted
    }
}


/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<SaveEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<SaveEvent>;

/// Create a feedback channel, that can be used to retrieve the current progress of a save sweep
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(SaveEvent::default())
}


/// A structure that tracks the progression and the errors that happen during a save sweep
pub struct SaveProgress {
    n_errors: u32,
    feedback_channel: Option<FeedbackSender>,
}
impl SaveProgress {
    pub fn new() -> Self {
        Self { n_errors: 0, feedback_channel: None }
    }
    pub fn new_with_feedback_channel(channel: FeedbackSender) -> Self {
        Self { n_errors: 0, feedback_channel: Some(channel) }
    }

    pub fn is_success(&self) -> bool {
        self.n_errors == 0
    }

    /// Log an error
    pub fn error(&mut self, text: &str) {
        log::error!("{}", text);
        self.n_errors += 1;
    }
    /// Log a warning
    pub fn warn(&mut self, text: &str) {
        log::warn!("{}", text);
        self.n_errors += 1;
    }
    /// Log an info
    pub fn info(&mut self, text: &str) {
        log::info!("{}", text);
    }
    /// Log a debug message
    pub fn debug(&mut self, text: &str) {
        log::debug!("{}", text);
    }
    /// Send an event as a feedback to the listener (if any).
    pub fn feedback(&mut self, event: SaveEvent) {
        self.feedback_channel
            .as_ref()
            .map(|sender| {
                sender.send(event)
            });
    }
}
