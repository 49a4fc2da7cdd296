//! Operation outcome reporting.
//!
//! Skin operations report human-readable outcomes (lock timeouts, directory
//! creation/removal failures) through a results collector rather than only
//! through error values. Control flow always follows the returned `Result`;
//! the collector exists so an admin surface can show what happened, in order,
//! after a batch of operations.

/// Accumulates human-readable outcome messages for skin operations.
#[derive(Debug, Clone, Default)]
pub struct Results {
    messages: Vec<String>,
}

impl Results {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome message.
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.messages.push(message.into());
    }

    /// All recorded messages, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Drain the recorded messages, leaving the collector empty.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order() {
        let mut results = Results::new();
        results.push("first");
        results.push("second".to_string());

        assert_eq!(results.messages(), &["first", "second"]);
    }

    #[test]
    fn take_drains_messages() {
        let mut results = Results::new();
        results.push("only");

        let taken = results.take();
        assert_eq!(taken, vec!["only".to_string()]);
        assert!(results.is_empty());
    }
}
