//! # heading-decorator
//!
//! Automatic numbering and labelling of markdown headings.
//!
//! The library scans markdown for headings (skipping front-matter, fenced
//! code and display math) and computes a label for each one: hierarchical
//! numbers such as `1.2.1`, letters, roman numerals, custom symbols, or a
//! fixed label per level. Labels are computed per rendering surface (reading
//! view, live preview, outline), each with its own settings.
//!
//! ## Example
//!
//! ```rust
//! use heading_decorator::{Counter, DecoratorOptions, parse_markdown};
//!
//! let markdown = r#"
//! # Introduction
//!
//! ## Background
//!
//! ## Methodology
//! "#;
//!
//! let doc = parse_markdown(markdown);
//! let options = DecoratorOptions::default();
//! let mut counter = Counter::new(&options);
//!
//! let labels: Vec<_> = doc.levels().map(|level| counter.decorate(level, None)).collect();
//! assert_eq!(labels, vec!["1", "1.1", "1.2"]);
//! ```

/// Configuration module for persisting per-surface settings.
pub mod config;

/// Label generation: options, numbering systems, level tracking and the
/// label counter.
pub mod decorator;

/// Serializable results for JSON output.
pub mod output;

/// Parser module for markdown documents.
///
/// Provides line classification and heading extraction.
pub mod parser;

/// Decoration passes over whole documents.
pub mod pipeline;

/// Settings ownership with change notification.
pub mod settings;

/// File watching for live re-rendering.
pub mod watcher;

// Re-export commonly used types for convenience
pub use config::{Config, Surface, SurfaceConfig};
pub use decorator::{Counter, DecoratorOptions, Position, Querier, StyleType};
pub use parser::{Document, Heading, LineClassifier, parse_file, parse_markdown};
pub use settings::{SettingsEvent, SettingsStore};
