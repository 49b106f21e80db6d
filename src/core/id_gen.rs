use crate::domain::ports::IdGenerator;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Random v4 UUID suffixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// `{unix_millis}-{n}`; the counter keeps ids distinct within one millisecond.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    counter: AtomicUsize,
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", chrono::Utc::now().timestamp_millis(), n)
    }
}

/// Deterministic `{prefix}{n}` suffixes counting from 1.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicUsize,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicUsize::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{}", self.prefix, n)
    }
}
