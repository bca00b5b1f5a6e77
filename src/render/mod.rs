//! Result rendering module
//!
//! Turns filtered entries into the results container markup: two cards per
//! entry, escaped throughout.

pub mod card;
pub mod fields;
pub mod labels;
pub mod markup;

pub use card::{render_card, render_fetch_error, render_results};
pub use markup::{escape, rich_text, Element};
