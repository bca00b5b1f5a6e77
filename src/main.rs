use colored::*;
use std::process::ExitCode;
use termsearch_rs::logging::{init_debug_logging, init_stderr_logging, info_log};
use termsearch_rs::panel::{FileView, StderrNotifier, StdoutView};
use termsearch_rs::query::TextField;
use termsearch_rs::{tui, Cli, HttpTermSource, LookupError, Outcome, Result, SearchPanel};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(reason) = cli.validate() {
        eprintln!("{}", LookupError::InvalidArguments(reason));
        return ExitCode::from(2);
    }

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.debug {
        let path = init_debug_logging()?;
        eprintln!("{} {}", "Debug log:".dimmed(), path.display());
    } else if !cli.is_interactive() {
        init_stderr_logging();
    }

    let config = cli.fetch_config();
    info_log(&format!("Using terminology API at {}", config.url()));
    let source = HttpTermSource::new(config)?;
    let output = cli.output.as_ref().map(FileView::new);

    if cli.is_interactive() {
        tui::run(source, output)?;
        return Ok(ExitCode::SUCCESS);
    }

    let query = TextField::with_value(cli.query.as_deref().unwrap_or_default());
    let outcome = match output {
        Some(view) => SearchPanel::new(source, query, view, StderrNotifier).submit()?,
        None => SearchPanel::new(source, query, StdoutView::default(), StderrNotifier).submit()?,
    };

    Ok(match outcome {
        Outcome::Rendered { .. } => ExitCode::SUCCESS,
        Outcome::Rejected => ExitCode::from(2),
        Outcome::Failed | Outcome::Stale => ExitCode::FAILURE,
    })
}
