//! Meldungskanal zum Host (Statuszeile, Message-Bar).

use serde::{Deserialize, Serialize};

/// Schweregrad einer Meldung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageLevel {
    Success,
    Info,
    Warning,
    Critical,
}

/// Nimmt Meldungen der Tools entgegen.
pub trait MessageSink {
    fn push(&mut self, level: MessageLevel, message: &str);
}

/// Leitet Meldungen an das `log`-Facade weiter.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl MessageSink for LogSink {
    fn push(&mut self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Success | MessageLevel::Info => log::info!("{}", message),
            MessageLevel::Warning => log::warn!("{}", message),
            MessageLevel::Critical => log::error!("{}", message),
        }
    }
}

/// Sammelt Meldungen in einer Liste (Tests, Batch-Betrieb).
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    messages: Vec<(MessageLevel, String)>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[(MessageLevel, String)] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Leert die Liste und gibt die bisherigen Meldungen zurück.
    pub fn take(&mut self) -> Vec<(MessageLevel, String)> {
        std::mem::take(&mut self.messages)
    }
}

impl MessageSink for CollectingSink {
    fn push(&mut self, level: MessageLevel, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}
