//! Tender field extraction module.

mod header;
mod line_items;
mod parser;
pub mod rules;

pub use header::HeaderExtractor;
pub use line_items::{LineItemTokenizer, split_cases_and_order};
pub use parser::{ParsedTender, PepsiTenderParser, TenderParser};
