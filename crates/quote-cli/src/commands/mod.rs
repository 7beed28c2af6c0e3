//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `compare` - Compare already-extracted records, plus shared output rendering
//! - `batch` - Extract a batch of documents and compare
//! - `config` - Show effective configuration

pub mod batch;
pub mod compare;
pub mod config;

// Re-export command functions for main.rs
pub use batch::*;
pub use compare::*;
pub use config::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
