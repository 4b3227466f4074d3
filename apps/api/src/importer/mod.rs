//! Tabular Hotel Importer — converts the spreadsheet export format into
//! structured hotel records and back into a downloadable template.

pub mod handlers;
pub mod parser;
pub mod service;
pub mod template;

pub use service::ImportError;
