//! termsearch - bilingual (French/English) terminology lookup client
//!
//! Reads a search term, queries a glossary API, keeps the entries whose French
//! or English term contains it, and renders each one as a pair of escaped HTML
//! term cards.

pub mod cli;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod panel;
pub mod query;
pub mod render;
pub mod tui;

// Re-export `Cli` for use from `main`
pub use cli::Cli;
pub use error::{LookupError, Result};
pub use fetch::{Endpoint, FetchConfig, HttpTermSource, TermSource};
pub use model::{Language, TermEntry};
pub use panel::{Outcome, SearchPanel};
