//! Command Line Interface module
//!
//! Handles command-line argument parsing using clap and resolves the fetcher
//! configuration.

use crate::constants::DEFAULT_API_URL;
use crate::fetch::{Endpoint, FetchConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Bilingual terminology lookup - search a French/English glossary API
#[derive(Parser, Debug)]
#[command(
    name = "termsearch",
    about = "Bilingual terminology lookup - search a French/English glossary API",
    long_about = "Bilingual terminology lookup - queries a glossary API and renders French/English term cards as HTML

    EXAMPLES:
        termsearch \"blockchain\"                       # Print result cards to stdout
        termsearch \"jeton\" -o results.html            # Write result cards to a file
        termsearch --search-endpoint \"ia\"             # Let the server pre-filter
        termsearch                                    # Interactive search panel

    USAGE TIP:
        In the interactive panel type a term and press Enter; Esc quits
    "
)]
#[command(version)]
pub struct Cli {
    /// Term to look up; omit to open the interactive panel
    #[arg(help = "Term to look up (French or English)")]
    pub query: Option<String>,

    /// Base URL of the terminology API
    #[arg(
        short,
        long = "api-url",
        env = "TERMSEARCH_API_URL",
        default_value = DEFAULT_API_URL,
        help = "Base URL of the terminology API"
    )]
    pub api_url: String,

    /// Use the server-side search route
    #[arg(
        short,
        long = "search-endpoint",
        help = "Query /api/terms/search?term=<query> instead of /api/terms"
    )]
    pub search_endpoint: bool,

    /// Request timeout
    #[arg(short, long, help = "Request timeout in seconds (default: wait indefinitely)")]
    pub timeout: Option<u64>,

    /// Results file
    #[arg(
        short,
        long,
        help = "Write the results fragment to this file, replacing it on every search"
    )]
    pub output: Option<PathBuf>,

    /// Interactive mode
    #[arg(short, long, help = "Open the interactive search panel")]
    pub interactive: bool,

    /// debug mode
    #[arg(
        short,
        long,
        help = "Debug mode (logging to a temp file with timestamps)"
    )]
    pub debug: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate command line arguments
    pub fn validate(&self) -> std::result::Result<(), String> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!(
                "API URL must start with http:// or https:// (got {:?})",
                self.api_url
            ));
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least one second".to_string());
        }

        if let Some(output) = &self.output {
            if output.is_dir() {
                return Err(format!("Output path {} is a directory", output.display()));
            }
            match output.parent() {
                Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                    return Err(format!(
                        "Output directory {} does not exist",
                        parent.display()
                    ));
                }
                _ => {}
            }
        }

        if self.interactive && self.query.is_some() {
            return Err("A query cannot be combined with --interactive".to_string());
        }

        Ok(())
    }

    /// Whether to open the terminal panel
    pub fn is_interactive(&self) -> bool {
        self.interactive || self.query.is_none()
    }

    pub fn endpoint(&self) -> Endpoint {
        if self.search_endpoint {
            Endpoint::Search
        } else {
            Endpoint::AllTerms
        }
    }

    /// Fetcher configuration
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::new(
            &self.api_url,
            self.endpoint(),
            self.timeout.map(Duration::from_secs),
        )
    }
}
