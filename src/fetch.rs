//! Result fetching.
//!
//! Issues the HTTP GET against the terminology API, parses the JSON array and
//! applies the client-side substring filter.

use crate::constants::{DEFAULT_API_URL, SEARCH_PARAM, SEARCH_PATH, TERMS_PATH};
use crate::logging::debug_log;
use crate::model::TermEntry;
use crate::{LookupError, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::time::Duration;

/// Which API route the fetcher calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// `GET /api/terms`, everything is filtered client-side
    #[default]
    AllTerms,
    /// `GET /api/terms/search?term=<query>`
    Search,
}

/// Fetcher settings resolved from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub base_url: String,
    pub endpoint: Endpoint,
    /// `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            endpoint: Endpoint::AllTerms,
            timeout: None,
        }
    }
}

impl FetchConfig {
    pub fn new(base_url: &str, endpoint: Endpoint, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            endpoint,
            timeout,
        }
    }

    /// Request URL without the query string
    pub fn url(&self) -> String {
        let path = match self.endpoint {
            Endpoint::AllTerms => TERMS_PATH,
            Endpoint::Search => SEARCH_PATH,
        };
        format!("{}{}", self.base_url, path)
    }
}

/// Anything that can produce the raw term list for a query
pub trait TermSource {
    fn fetch(&self, query: &str) -> Result<Vec<TermEntry>>;
}

/// Terminology API client
#[derive(Debug, Clone)]
pub struct HttpTermSource {
    client: Client,
    config: FetchConfig,
}

impl HttpTermSource {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LookupError::transport(&format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: FetchConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

impl TermSource for HttpTermSource {
    fn fetch(&self, query: &str) -> Result<Vec<TermEntry>> {
        let url = self.config.url();
        debug_log(&format!("GET {} (query: {:?})", url, query));

        let mut request = self.client.get(&url).header(ACCEPT, "application/json");
        if self.config.endpoint == Endpoint::Search {
            request = request.query(&[(SEARCH_PARAM, query)]);
        }

        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        // Read as text first so a bad body is reported as a parse failure
        let body = response.text()?;
        let entries: Vec<TermEntry> = serde_json::from_str(&body)?;

        debug_log(&format!("Received {} entries from {}", entries.len(), url));
        Ok(entries)
    }
}

/// Keep entries whose French or English term contains `query`.
/// `query` is expected lowercased; order is preserved.
pub fn filter_entries(entries: Vec<TermEntry>, query: &str) -> Vec<TermEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.matches(query))
        .collect()
}

/// Fetch then filter: the full ResultFetcher contract
pub fn fetch_matching<S: TermSource + ?Sized>(source: &S, query: &str) -> Result<Vec<TermEntry>> {
    let entries = source.fetch(query)?;
    let total = entries.len();
    let matched = filter_entries(entries, query);
    debug_log(&format!(
        "Filter {:?} kept {} of {} entries",
        query,
        matched.len(),
        total
    ));
    Ok(matched)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    pub(crate) fn entry(fr: &str, en: &str) -> TermEntry {
        TermEntry {
            french_term: fr.to_string(),
            english_term: en.to_string(),
            ..TermEntry::default()
        }
    }

    /// Serve one canned HTTP response; returns the base URL and the request line
    fn serve_once(status: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        let status = status.to_string();
        let body = body.to_string();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut accept = String::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line.to_lowercase().starts_with("accept:") {
                    accept = line.trim().to_string();
                }
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            tx.send(format!("{} | {}", request_line.trim(), accept))
                .unwrap();

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
        });

        (format!("http://{}", addr), rx)
    }

    fn source(base_url: &str, endpoint: Endpoint) -> HttpTermSource {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpTermSource::with_client(client, FetchConfig::new(base_url, endpoint, None))
    }

    #[test]
    fn test_filter_keeps_exact_matches() {
        let entries = vec![
            entry("chaîne de blocs", "blockchain"),
            entry("jeton", "token"),
            entry("bloc", "block"),
            entry("apprentissage automatique", "machine learning"),
        ];
        let kept = filter_entries(entries, "bloc");
        let terms: Vec<&str> = kept.iter().map(|e| e.english_term.as_str()).collect();
        assert_eq!(terms, vec!["blockchain", "block"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_on_entries() {
        let entries = vec![entry("Jeton Non Fongible", "Non-Fungible Token")];
        assert_eq!(filter_entries(entries.clone(), "fongible").len(), 1);
        assert_eq!(filter_entries(entries.clone(), "non-fungible").len(), 1);
        assert!(filter_entries(entries, "nft").is_empty());
    }

    #[test]
    fn test_config_url() {
        let config = FetchConfig::new("http://localhost:5003/", Endpoint::AllTerms, None);
        assert_eq!(config.url(), "http://localhost:5003/api/terms");

        let config = FetchConfig::new(" http://api.test ", Endpoint::Search, None);
        assert_eq!(config.url(), "http://api.test/api/terms/search");

        assert_eq!(FetchConfig::default().url(), "http://127.0.0.1:5003/api/terms");
    }

    #[test]
    fn test_http_fetch_success() {
        let body = r#"[{"french_term":"jeton","english_term":"token"},
                      {"french_term":"bloc","english_term":"block"}]"#;
        let (base, rx) = serve_once("200 OK", body);

        let matched = fetch_matching(&source(&base, Endpoint::AllTerms), "tok").unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].french_term, "jeton");

        let request = rx.recv().unwrap();
        assert!(request.starts_with("GET /api/terms HTTP/1.1"), "{}", request);
        assert!(request.contains("application/json"), "{}", request);
    }

    #[test]
    fn test_http_search_endpoint_sends_term() {
        let (base, rx) = serve_once("200 OK", "[]");
        let matched = fetch_matching(&source(&base, Endpoint::Search), "ia").unwrap();
        assert!(matched.is_empty());

        let request = rx.recv().unwrap();
        assert!(
            request.starts_with("GET /api/terms/search?term=ia "),
            "{}",
            request
        );
    }

    #[test]
    fn test_http_error_status() {
        let (base, _rx) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
        let err = source(&base, Endpoint::AllTerms).fetch("x").unwrap_err();
        assert!(matches!(
            err,
            LookupError::RequestError {
                status: Some(500),
                ..
            }
        ));
    }

    #[test]
    fn test_http_not_found_is_error() {
        let (base, _rx) = serve_once("404 Not Found", r#"{"message":"No Terms found."}"#);
        let err = source(&base, Endpoint::AllTerms).fetch("x").unwrap_err();
        assert!(matches!(
            err,
            LookupError::RequestError {
                status: Some(404),
                ..
            }
        ));
    }

    #[test]
    fn test_http_bad_body_is_parse_error() {
        let (base, _rx) = serve_once("200 OK", r#"{"message":"not a list"}"#);
        let err = source(&base, Endpoint::AllTerms).fetch("x").unwrap_err();
        assert!(matches!(err, LookupError::ParseError(_)));
    }

    #[test]
    fn test_http_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = source(&base, Endpoint::AllTerms).fetch("x").unwrap_err();
        assert!(matches!(err, LookupError::RequestError { status: None, .. }));
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn test_http_truncated_body_is_fetch_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut stream = stream;
            // Promises more bytes than it sends, then hangs up
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 512\r\n\r\n[{{\"french_term\""
            )
            .unwrap();
            stream.flush().unwrap();
        });

        let err = source(&base, Endpoint::AllTerms).fetch("x").unwrap_err();
        assert!(err.is_fetch_failure());
        assert_eq!(
            err.user_message(),
            Some("Vérifiez l'orthographe du terme et Réessayez !")
        );
    }
}
