//! Short user-facing log: a handful of recent lines, newest first.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

/// Capped, newest-first message list. Every line is also sent to the `log` facade.
#[derive(Debug, Clone)]
pub struct MessageLog {
    capacity: usize,
    entries: VecDeque<Message>,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::info!("{text}");
        self.push(Level::Info, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::warn!("{text}");
        self.push(Level::Error, text);
    }

    fn push(&mut self, level: Level, text: String) {
        self.entries.push_front(Message { level, text });
        self.entries.truncate(self.capacity);
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Message> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_lines_only() {
        let mut log = MessageLog::new(3);
        log.info("Rule Set to 30");
        log.error("Invalid Rule Number: x");
        log.info("Lattice Size Set to 50");
        log.info("Iterations Set to 10");

        let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            ["Iterations Set to 10", "Lattice Size Set to 50", "Invalid Rule Number: x"]
        );
        assert_eq!(log.iter().nth(2).map(|m| m.level), Some(Level::Error));
    }

    #[test]
    fn zero_capacity_still_keeps_one() {
        let mut log = MessageLog::new(0);
        log.info("a");
        log.info("b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().map(|m| m.text.as_str()), Some("b"));
    }
}
