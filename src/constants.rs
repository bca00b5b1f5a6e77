//! Constants used throughout the application.
//!
//! Endpoint paths, user-facing French messages and the subdomain palette.

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5003";
pub const TERMS_PATH: &str = "/api/terms";
pub const SEARCH_PATH: &str = "/api/terms/search";
pub const SEARCH_PARAM: &str = "term";

pub const QUERY_MAX_LENGTH: usize = 200;

pub const ALERT_EMPTY_QUERY: &str = "Veuillez entrer un terme pour effectuer une recherche.";
pub const ALERT_FETCH_FAILED: &str = "Vérifiez l'orthographe du terme et Réessayez !";
pub const ALERT_QUERY_TOO_LONG: &str =
    "Le terme recherché est trop long (200 caractères maximum).";
pub const ALERT_OUTPUT_FAILED: &str = "Impossible d'écrire le fichier de résultats :";
pub const INLINE_FETCH_ERROR: &str = "Erreur dans l'obtention des résultats. Veuillez réessayer.";
pub const NO_RESULTS: &str = "Aucun résultat trouvé.";

/// Background classes for subdomain chips, cycled by position.
pub const SUBDOMAIN_PALETTE: [&str; 3] = ["bg-[#296F9A]", "bg-[#A32A34]", "bg-black"];

pub const DEBUG_LOG_FILE: &str = "termsearch-debug.log";
