//! Search panel: query input → fetch → render.
//!
//! The panel owns its three anchors (query field, results view, alert surface)
//! and its term source; hosts hand them in at construction.

use crate::constants::ALERT_FETCH_FAILED;
use crate::fetch::{fetch_matching, TermSource};
use crate::logging::{debug_log, error_log, info_log, warn_log};
use crate::model::TermEntry;
use crate::query::{normalize_query, QueryField};
use crate::render::{render_fetch_error, render_results};
use crate::Result;
use colored::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Results container
pub trait ResultsView {
    /// Replace the whole content. Never appends.
    fn replace(&mut self, markup: String) -> Result<()>;

    fn content(&self) -> &str;
}

/// Blocking alert surface
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Results held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    content: String,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultsView for MemoryView {
    fn replace(&mut self, markup: String) -> Result<()> {
        self.content = markup;
        Ok(())
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Results fragment file, truncated and rewritten on every search
#[derive(Debug, Clone)]
pub struct FileView {
    path: PathBuf,
    content: String,
}

impl FileView {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            content: String::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultsView for FileView {
    fn replace(&mut self, markup: String) -> Result<()> {
        fs::write(&self.path, &markup)?;
        debug_log(&format!(
            "Wrote {} bytes of results to {}",
            markup.len(),
            self.path.display()
        ));
        self.content = markup;
        Ok(())
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Results printed to stdout
#[derive(Debug, Default)]
pub struct StdoutView {
    content: String,
}

impl ResultsView for StdoutView {
    fn replace(&mut self, markup: String) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", markup)?;
        stdout.flush()?;
        self.content = markup;
        Ok(())
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Alerts printed to stderr
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{}", message.yellow().bold());
    }
}

/// Alerts kept in order, newest last
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    pub messages: Vec<String>,
}

impl AlertLog {
    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl Notifier for AlertLog {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// A validated query waiting for its fetch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub generation: u64,
    pub query: String,
}

/// What a search did to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Results container replaced with `count` entries
    Rendered { count: usize },
    /// Query rejected before any request
    Rejected,
    /// Fetch failed; inline error shown
    Failed,
    /// A newer search was started; result dropped
    Stale,
}

pub struct SearchPanel<S, Q, V, N> {
    source: S,
    input: Q,
    view: V,
    notifier: N,
    generation: u64,
}

impl<S, Q, V, N> SearchPanel<S, Q, V, N>
where
    S: TermSource,
    Q: QueryField,
    V: ResultsView,
    N: Notifier,
{
    pub fn new(source: S, input: Q, view: V, notifier: N) -> Self {
        Self {
            source,
            input,
            view,
            notifier,
            generation: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn input(&self) -> &Q {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Q {
        &mut self.input
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Generation of the most recent accepted query
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read and validate the query. Blank input raises an alert and yields
    /// `None`; otherwise a new generation is issued.
    pub fn begin(&mut self) -> Option<PendingSearch> {
        match normalize_query(self.input.value()) {
            Ok(query) => {
                self.generation += 1;
                info_log(&format!(
                    "Search #{} started for {:?}",
                    self.generation, query
                ));
                Some(PendingSearch {
                    generation: self.generation,
                    query,
                })
            }
            Err(err) => {
                warn_log(&format!("Query rejected: {:?}", err));
                if let Some(message) = err.user_message() {
                    self.notifier.alert(message);
                }
                None
            }
        }
    }

    /// Apply a fetch result. Only the latest generation may touch the view.
    ///
    /// Fetch failures are handled here and reported as `Outcome::Failed`;
    /// only view write errors are returned.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<Vec<TermEntry>>,
    ) -> Result<Outcome> {
        if generation != self.generation {
            debug_log(&format!(
                "Dropping result of search #{} (latest is #{})",
                generation, self.generation
            ));
            return Ok(Outcome::Stale);
        }

        match result {
            Ok(entries) => {
                let count = entries.len();
                self.view.replace(render_results(&entries))?;
                self.input.clear();
                info_log(&format!("Search #{} rendered {} entries", generation, count));
                Ok(Outcome::Rendered { count })
            }
            Err(err) if err.is_fetch_failure() => {
                error_log(&format!("Error fetching data: {:?}", err));
                self.notifier.alert(ALERT_FETCH_FAILED);
                self.view.replace(render_fetch_error())?;
                Ok(Outcome::Failed)
            }
            Err(err) => Err(err),
        }
    }

    /// Run one search to completion on the current thread
    pub fn submit(&mut self) -> Result<Outcome> {
        let pending = match self.begin() {
            Some(pending) => pending,
            None => return Ok(Outcome::Rejected),
        };
        let result = fetch_matching(&self.source, &pending.query);
        self.complete(pending.generation, result)
    }
}
