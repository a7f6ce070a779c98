//! sortdir - organize a directory into category subdirectories
//!
//! This library moves files (and, for some categories, directories) that
//! match per-category predicates into named subdirectories, resolves name
//! collisions deterministically, and runs a normalization pass that relocates
//! misfiled entries and flattens nested files back into category roots while
//! leaving application-bundle internals alone.

pub mod category;
pub mod cli;
pub mod collision;
pub mod config;
pub mod known_folders;
pub mod logger;
pub mod mover;
pub mod output;
pub mod processor;
pub mod progress;

pub use category::{Category, Matcher, default_categories};
pub use collision::resolve_collision;
pub use config::{CategoryConfig, ConfigError, load_categories};
pub use logger::{ConsoleLogger, FileLogger, LogLevel, LogStore, StoreLogger};
pub use mover::{FileMover, FsMover};
pub use processor::{CategoryProcessor, ProcessError, ProcessResult, is_inside_app_bundle};
pub use progress::{BarReporter, ProgressReporter};
