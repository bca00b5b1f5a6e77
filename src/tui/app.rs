//! TUI application state and event handling
//!
//! Fetches run on worker threads; results come back over a channel tagged with
//! the generation issued by the panel, so only the latest search is shown.

use crate::constants::ALERT_OUTPUT_FAILED;
use crate::fetch::{fetch_matching, TermSource};
use crate::logging::error_log;
use crate::model::TermEntry;
use crate::panel::{AlertLog, FileView, Notifier, Outcome, ResultsView, SearchPanel};
use crate::query::{QueryField, TextField};
use crate::tui::events::{KeyAction, MouseAction};
use crate::Result;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

const PAGE_SCROLL: u16 = 10;

/// Results pane content, optionally mirrored to a file.
///
/// The pane always shows the latest markup; a failed mirror write is kept
/// for the app to report and never fails the replace.
#[derive(Debug, Default)]
pub struct PaneView {
    content: String,
    mirror: Option<FileView>,
    mirror_failure: Option<String>,
}

impl PaneView {
    pub fn new(mirror: Option<FileView>) -> Self {
        Self {
            content: String::new(),
            mirror,
            mirror_failure: None,
        }
    }

    /// Path of the mirror file whose last write failed, if any
    pub fn take_mirror_failure(&mut self) -> Option<String> {
        self.mirror_failure.take()
    }
}

impl ResultsView for PaneView {
    fn replace(&mut self, markup: String) -> Result<()> {
        self.content = markup;
        if let Some(mirror) = self.mirror.as_mut() {
            if let Err(err) = mirror.replace(self.content.clone()) {
                error_log(&format!(
                    "Failed to write results to {}: {:?}",
                    mirror.path().display(),
                    err
                ));
                self.mirror_failure = Some(mirror.path().display().to_string());
            }
        }
        Ok(())
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Search progress state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Searching { query: String },
    Done { count: usize },
    Failed,
}

type FetchMessage = (u64, Result<Vec<TermEntry>>);

/// Main TUI application state
pub struct App<S> {
    panel: SearchPanel<S, TextField, PaneView, AlertLog>,
    /// Latest alert, cleared on the next edit
    pub alert: Option<String>,
    pub status: SearchStatus,
    /// Vertical scroll offset of the results pane
    pub scroll: u16,
    pub should_quit: bool,
    tx: Sender<FetchMessage>,
    rx: Receiver<FetchMessage>,
}

impl<S> App<S>
where
    S: TermSource + Clone + Send + 'static,
{
    pub fn new(source: S, mirror: Option<FileView>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            panel: SearchPanel::new(
                source,
                TextField::new(),
                PaneView::new(mirror),
                AlertLog::default(),
            ),
            alert: None,
            status: SearchStatus::Idle,
            scroll: 0,
            should_quit: false,
            tx,
            rx,
        }
    }

    pub fn input(&self) -> &str {
        self.panel.input().value()
    }

    pub fn results(&self) -> &str {
        self.panel.view().content()
    }

    /// Apply a key action
    pub fn handle_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Submit => self.submit(),
            KeyAction::ClearInput => {
                self.panel.input_mut().clear();
                self.alert = None;
            }
            KeyAction::InputChar(c) => {
                self.panel.input_mut().push(c);
                self.alert = None;
            }
            KeyAction::DeleteChar => {
                self.panel.input_mut().pop();
                self.alert = None;
            }
            KeyAction::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            KeyAction::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            KeyAction::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_SCROLL),
            KeyAction::PageDown => self.scroll = self.scroll.saturating_add(PAGE_SCROLL),
            KeyAction::None => {}
        }
    }

    pub fn handle_mouse(&mut self, action: MouseAction) {
        match action {
            MouseAction::ScrollUp => self.handle_key(KeyAction::ScrollUp),
            MouseAction::ScrollDown => self.handle_key(KeyAction::ScrollDown),
            MouseAction::None => {}
        }
    }

    /// Validate the query and start a fetch on a worker thread
    pub fn submit(&mut self) {
        let pending = match self.panel.begin() {
            Some(pending) => pending,
            None => {
                self.take_alert();
                return;
            }
        };

        self.status = SearchStatus::Searching {
            query: pending.query.clone(),
        };
        self.alert = None;

        let source = self.panel.source().clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = fetch_matching(&source, &pending.query);
            // The receiver only goes away when the app quits
            let _ = tx.send((pending.generation, result));
        });
    }

    /// Apply finished fetches. Returns true when the view changed.
    pub fn poll_results(&mut self) -> Result<bool> {
        let mut changed = false;
        loop {
            let (generation, result) = match self.rx.try_recv() {
                Ok(message) => message,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };
            let outcome = match self.panel.complete(generation, result) {
                Ok(outcome) => outcome,
                Err(err) if err.is_recoverable() => {
                    error_log(&format!("Search #{} could not be shown: {:?}", generation, err));
                    self.status = SearchStatus::Failed;
                    if let Some(message) = err.user_message() {
                        self.alert = Some(message.to_string());
                    }
                    continue;
                }
                Err(err) => return Err(err),
            };
            match outcome {
                Outcome::Rendered { count } => {
                    self.status = SearchStatus::Done { count };
                    self.scroll = 0;
                    changed = true;
                }
                Outcome::Failed => {
                    self.status = SearchStatus::Failed;
                    self.scroll = 0;
                    self.take_alert();
                    changed = true;
                }
                Outcome::Stale | Outcome::Rejected => {}
            }

            if let Some(path) = self.panel.view_mut().take_mirror_failure() {
                self.panel
                    .notifier_mut()
                    .alert(&format!("{} {}", ALERT_OUTPUT_FAILED, path));
                self.take_alert();
            }
        }
        Ok(changed)
    }

    fn take_alert(&mut self) {
        let messages = &mut self.panel.notifier_mut().messages;
        if let Some(last) = messages.drain(..).last() {
            self.alert = Some(last);
        }
    }

    /// One-line status for the bottom bar
    pub fn status_message(&self) -> String {
        match &self.status {
            SearchStatus::Idle => "Tapez un terme puis Entrée - Type a term and press Enter".to_string(),
            SearchStatus::Searching { query } => format!("Recherche de « {} »...", query),
            SearchStatus::Done { count } => format!("{} résultat(s) - {} result(s)", count, count),
            SearchStatus::Failed => "Échec de la recherche - Search failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::entry;
    use crate::LookupError;
    use std::time::Duration;

    #[derive(Clone)]
    struct StaticSource {
        entries: Vec<TermEntry>,
        fail: bool,
    }

    impl TermSource for StaticSource {
        fn fetch(&self, _query: &str) -> Result<Vec<TermEntry>> {
            if self.fail {
                return Err(LookupError::http_status(500, "Internal Server Error"));
            }
            Ok(self.entries.clone())
        }
    }

    fn app(fail: bool) -> App<StaticSource> {
        App::new(
            StaticSource {
                entries: vec![entry("jeton", "token"), entry("bloc", "block")],
                fail,
            },
            None,
        )
    }

    fn type_text(app: &mut App<StaticSource>, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyAction::InputChar(c));
        }
    }

    fn wait_for_results(app: &mut App<StaticSource>) {
        for _ in 0..200 {
            if app.poll_results().unwrap() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("no result received");
    }

    #[test]
    fn test_typing_and_deleting() {
        let mut app = app(false);
        type_text(&mut app, "tokn");
        app.handle_key(KeyAction::DeleteChar);
        app.handle_key(KeyAction::InputChar('n'));
        assert_eq!(app.input(), "tokn");
        app.handle_key(KeyAction::ClearInput);
        assert_eq!(app.input(), "");
    }

    #[test]
    fn test_empty_submit_shows_alert() {
        let mut app = app(false);
        app.handle_key(KeyAction::Submit);
        assert_eq!(app.status, SearchStatus::Idle);
        assert_eq!(
            app.alert.as_deref(),
            Some("Veuillez entrer un terme pour effectuer une recherche.")
        );

        app.handle_key(KeyAction::InputChar('x'));
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_submit_renders_results() {
        let mut app = app(false);
        type_text(&mut app, "Token");
        app.handle_key(KeyAction::Submit);
        assert!(matches!(app.status, SearchStatus::Searching { .. }));

        wait_for_results(&mut app);
        assert_eq!(app.status, SearchStatus::Done { count: 1 });
        assert!(app.results().contains("token"));
        assert_eq!(app.input(), "");
    }

    #[test]
    fn test_failed_fetch_shows_alert_and_inline_error() {
        let mut app = app(true);
        type_text(&mut app, "bloc");
        app.handle_key(KeyAction::Submit);

        wait_for_results(&mut app);
        assert_eq!(app.status, SearchStatus::Failed);
        assert_eq!(
            app.alert.as_deref(),
            Some("Vérifiez l'orthographe du terme et Réessayez !")
        );
        assert!(app.results().starts_with("<p>Erreur"));
    }

    #[test]
    fn test_unwritable_output_keeps_panel_running() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").join("results.html");
        let mut app = App::new(
            StaticSource {
                entries: vec![entry("jeton", "token")],
                fail: false,
            },
            Some(FileView::new(&missing)),
        );
        type_text(&mut app, "token");
        app.handle_key(KeyAction::Submit);

        wait_for_results(&mut app);
        assert_eq!(app.status, SearchStatus::Done { count: 1 });
        assert!(app.results().contains("token"));
        assert_eq!(app.input(), "");
        let alert = app.alert.clone().unwrap();
        assert!(alert.starts_with("Impossible d'écrire le fichier de résultats"));
        assert!(alert.contains("results.html"));
        assert!(!missing.exists());

        // Still usable afterwards
        type_text(&mut app, "jeton");
        app.handle_key(KeyAction::Submit);
        wait_for_results(&mut app);
        assert_eq!(app.status, SearchStatus::Done { count: 1 });
    }

    #[test]
    fn test_output_file_mirrors_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.html");
        let mut app = App::new(
            StaticSource {
                entries: vec![entry("jeton", "token")],
                fail: false,
            },
            Some(FileView::new(&path)),
        );
        type_text(&mut app, "jeton");
        app.handle_key(KeyAction::Submit);

        wait_for_results(&mut app);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), app.results());
        assert!(app.alert.is_none());
    }

    #[derive(Clone)]
    struct RejectingSource;

    impl TermSource for RejectingSource {
        fn fetch(&self, _query: &str) -> Result<Vec<TermEntry>> {
            Err(LookupError::InvalidInput("query too long".to_string()))
        }
    }

    #[test]
    fn test_recoverable_error_becomes_alert() {
        let mut app = App::new(RejectingSource, None);
        app.panel.input_mut().set_value("token");
        app.submit();

        let mut polled = false;
        for _ in 0..200 {
            app.poll_results().unwrap();
            if app.status == SearchStatus::Failed {
                polled = true;
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(polled, "no result received");
        assert_eq!(
            app.alert.as_deref(),
            Some("Le terme recherché est trop long (200 caractères maximum).")
        );
        assert!(!app.should_quit);
    }

    #[test]
    fn test_scrolling() {
        let mut app = app(false);
        app.handle_key(KeyAction::ScrollUp);
        assert_eq!(app.scroll, 0);
        app.handle_key(KeyAction::PageDown);
        app.handle_mouse(MouseAction::ScrollDown);
        assert_eq!(app.scroll, PAGE_SCROLL + 1);
        app.handle_key(KeyAction::PageUp);
        assert_eq!(app.scroll, 1);
    }

    #[test]
    fn test_quit() {
        let mut app = app(false);
        app.handle_key(KeyAction::Quit);
        assert!(app.should_quit);
    }
}
