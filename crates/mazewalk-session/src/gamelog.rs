//! Game message log.

/// Style of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    Normal,
    Notable,
    Hurt,
    Victory,
    Defeat,
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub style: LogStyle,
    /// Extra repetitions folded into this entry.
    pub dups: u32,
}

impl LogEntry {
    /// The entry text with a repeat counter when it was folded.
    pub fn display(&self) -> String {
        if self.dups > 0 {
            format!("{} ({}x)", self.text, self.dups + 1)
        } else {
            self.text.clone()
        }
    }
}

const MAX_ENTRIES: usize = 1000;

/// The session's message log. Every message is also forwarded to the
/// `log` facade at info level.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message with a given style. A message identical to the last
    /// one bumps its repeat counter instead.
    pub fn log_styled(&mut self, text: impl Into<String>, style: LogStyle) {
        let text = text.into();
        log::info!("{text}");

        if let Some(last) = self.entries.last_mut() {
            if last.text == text && last.style == style {
                last.dups += 1;
                return;
            }
        }
        self.entries.push(LogEntry {
            text,
            style,
            dups: 0,
        });

        if self.entries.len() > MAX_ENTRIES {
            self.entries.drain(0..MAX_ENTRIES / 10);
        }
    }

    /// Add a normal-style message.
    pub fn log(&mut self, text: impl Into<String>) {
        self.log_styled(text, LogStyle::Normal);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[LogEntry] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
