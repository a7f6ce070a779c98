//! Logging contracts and sinks.
//!
//! The processor only knows the [`FileLogger`] trait; sinks decide rendering.
//! Two sinks are provided: [`ConsoleLogger`] prints colored lines directly,
//! and [`StoreLogger`] feeds a bounded in-memory [`LogStore`] so the CLI can
//! show recent activity next to its progress bars without interleaving.

use chrono::{DateTime, Utc};
use colored::*;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Severity/kind of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// A completed operation.
    Info,
    /// A recoverable per-entry failure.
    Error,
    /// A simulated operation under dry-run.
    DryRun,
}

/// Consumer of per-operation log messages.
///
/// Side-effect only; the core never reads logger state. `category` is absent
/// for general messages not tied to one category.
pub trait FileLogger {
    fn log(&self, message: &str, level: LogLevel, category: Option<&str>);
}

/// Logger that prints colored lines to the console.
pub struct ConsoleLogger;

impl FileLogger for ConsoleLogger {
    fn log(&self, message: &str, level: LogLevel, category: Option<&str>) {
        let tag = category.unwrap_or("");
        match level {
            LogLevel::DryRun => println!("{} {}", format!("{} DRY", tag).yellow(), message),
            LogLevel::Error => eprintln!("{} {}", format!("{} ERR", tag).red(), message),
            LogLevel::Info => {
                if tag.is_empty() {
                    println!("{}", message.green());
                } else {
                    println!("{} {}", tag.green(), message);
                }
            }
        }
    }
}

/// One captured log line.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// When the entry was recorded.
    pub time: DateTime<Utc>,
    /// Category tag, if the message was tied to one.
    pub category: Option<String>,
    /// Rendered message including the level prefix.
    pub message: String,
}

/// Maximum number of entries retained by a [`LogStore`].
pub const LOG_STORE_CAPACITY: usize = 200;

/// Bounded, thread-safe in-memory log queue.
///
/// Once full, the oldest entry is dropped so producers never block on a slow
/// consumer.
#[derive(Default)]
pub struct LogStore {
    entries: Mutex<VecDeque<LogEntry>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, dropping the oldest beyond capacity.
    pub fn push(&self, category: Option<String>, message: String) {
        let mut entries = self.entries.lock().expect("log store poisoned");
        entries.push_back(LogEntry {
            time: Utc::now(),
            category,
            message,
        });
        while entries.len() > LOG_STORE_CAPACITY {
            entries.pop_front();
        }
    }

    /// Returns up to the `n` most recent entries, oldest first.
    pub fn last(&self, n: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().expect("log store poisoned");
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    /// Returns up to the `n` most recent entries for one category, oldest
    /// first. Category comparison is case-insensitive.
    pub fn last_for_category(&self, category: &str, n: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().expect("log store poisoned");
        let matching: Vec<_> = entries
            .iter()
            .filter(|e| {
                e.category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(category))
            })
            .cloned()
            .collect();
        let skip = matching.len().saturating_sub(n);
        matching.into_iter().skip(skip).collect()
    }
}

/// Logger that records into a shared [`LogStore`].
pub struct StoreLogger {
    store: Arc<LogStore>,
}

impl StoreLogger {
    pub fn new(store: Arc<LogStore>) -> Self {
        Self { store }
    }
}

impl FileLogger for StoreLogger {
    fn log(&self, message: &str, level: LogLevel, category: Option<&str>) {
        let prefix = match level {
            LogLevel::Error => "ERR",
            LogLevel::DryRun => "DRY",
            LogLevel::Info => "INF",
        };
        self.store.push(
            category.map(|c| c.to_string()),
            format!("{} {}", prefix, message),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_keeps_insertion_order() {
        let store = LogStore::new();
        store.push(None, "one".to_string());
        store.push(None, "two".to_string());

        let entries = store.last(10);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "one");
        assert_eq!(entries[1].message, "two");
    }

    #[test]
    fn test_store_drops_oldest_beyond_capacity() {
        let store = LogStore::new();
        for i in 0..(LOG_STORE_CAPACITY + 25) {
            store.push(None, format!("msg {}", i));
        }

        let entries = store.last(LOG_STORE_CAPACITY + 25);
        assert_eq!(entries.len(), LOG_STORE_CAPACITY);
        assert_eq!(entries[0].message, "msg 25");
        assert_eq!(
            entries.last().expect("empty store").message,
            format!("msg {}", LOG_STORE_CAPACITY + 24)
        );
    }

    #[test]
    fn test_last_returns_most_recent() {
        let store = LogStore::new();
        for i in 0..10 {
            store.push(None, format!("msg {}", i));
        }

        let entries = store.last(3);
        let messages: Vec<_> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["msg 7", "msg 8", "msg 9"]);
    }

    #[test]
    fn test_last_for_category_filters_case_insensitive() {
        let store = LogStore::new();
        store.push(Some("Images".to_string()), "a".to_string());
        store.push(Some("Documents".to_string()), "b".to_string());
        store.push(Some("images".to_string()), "c".to_string());

        let entries = store.last_for_category("IMAGES", 10);
        let messages: Vec<_> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "c"]);
    }

    #[test]
    fn test_store_logger_prefixes_levels() {
        let store = Arc::new(LogStore::new());
        let logger = StoreLogger::new(Arc::clone(&store));

        logger.log("moved", LogLevel::Info, Some("Images"));
        logger.log("simulated", LogLevel::DryRun, Some("Images"));
        logger.log("failed", LogLevel::Error, None);

        let entries = store.last(10);
        assert_eq!(entries[0].message, "INF moved");
        assert_eq!(entries[1].message, "DRY simulated");
        assert_eq!(entries[2].message, "ERR failed");
        assert_eq!(entries[0].category.as_deref(), Some("Images"));
        assert!(entries[2].category.is_none());
    }
}
