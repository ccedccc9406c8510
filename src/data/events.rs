use log::Level;

/// One diagnostics entry produced during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub level: Level,
    pub message: String,
}

/// Append-only diagnostics for a single analysis run.
///
/// Passed explicitly into every step; each run owns its own log so
/// nothing is shared between recomputations. Entries are mirrored to
/// the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, level: Level, message: impl Into<String>) {
        let message = message.into();
        log::log!(level, "{message}");
        self.events.push(Event { level, message });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(Level::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.record(Level::Warn, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.record(Level::Error, message);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
