use crate::config::LOG_LENGTH;

// Narrative feed of match events (deaths, victory) shown on screen
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<String>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    /// Appends a message and mirrors it to the diagnostic log on target `events`.
    pub fn push(&mut self, tick: u64, message: impl Into<String>) {
        let message = message.into();
        log::info!(target: "events", "Tick {} {}", tick, message);
        self.entries.push(message);
    }

    /// The most recent `LOG_LENGTH` messages, oldest first.
    pub fn recent(&self) -> &[String] {
        let start = self.entries.len().saturating_sub(LOG_LENGTH);
        &self.entries[start..]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
