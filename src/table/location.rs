//! Where the encoded table state is mirrored
//!
//! In a browser this is the address bar. The controller reads it once on
//! construction and afterwards only writes to it.

/// Sink for the serialized table state
pub trait Location {
    /// Current query string, without the leading `?`
    fn current(&self) -> String;

    /// Replace the query string with an already validated encoding
    fn replace(&mut self, query: &str);
}

/// In-memory location that keeps every replacement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    history: Vec<String>,
}

impl MemoryLocation {
    /// Create a location holding `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        let initial = initial.strip_prefix('?').map(str::to_string).unwrap_or(initial);
        Self {
            history: vec![initial],
        }
    }

    /// All values, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Location for MemoryLocation {
    fn current(&self) -> String {
        self.history.last().cloned().unwrap_or_default()
    }

    fn replace(&mut self, query: &str) {
        if self.history.last().map(String::as_str) != Some(query) {
            self.history.push(query.to_string());
        }
    }
}
