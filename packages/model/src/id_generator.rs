use chrono::Utc;

/// Generates node ids of the form `{prefix}-{timestamp_ms}-{n}`, or
/// `{prefix}-{tag}-{timestamp_ms}-{n}` for typed nodes.
///
/// The timestamp separates sessions; the counter separates ids minted within
/// the same millisecond.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            count: 0,
        }
    }

    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}-{}", self.prefix, Utc::now().timestamp_millis(), self.count)
    }

    /// Generate next id tagged with the node type, e.g. `shop-row-…`
    pub fn new_id_for(&mut self, tag: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}-{}", self.prefix, tag, Utc::now().timestamp_millis(), self.count)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("node")
    }
}
