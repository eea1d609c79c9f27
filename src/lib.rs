//! Recovers checksum-verified ISBNs from noisy, multilingual OCR text.
//!
//! Raw text passes through numeral conversion, right-to-left repair, label
//! removal and cleaning; the result is checked as ISBN-10 or ISBN-13, and a
//! failing candidate gets a bounded search over commonly misread glyphs.
//!
//! ```
//! use isbn_normalize::NormalizationPipeline;
//!
//! let pipeline = NormalizationPipeline::new();
//! let isbn = pipeline.normalize("ردمك: ٩٧٨٦٠٠١٠٠٢٥٤٠").unwrap();
//! assert_eq!(isbn.as_str(), "9786001002540");
//! assert_eq!(pipeline.statistics().valid, 1);
//! ```

pub mod bidi;
pub mod checksum;
pub mod confusion;
pub mod correction;
pub mod error;
pub mod normalization;
pub mod numerals;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod sanitize;
pub mod server;
mod weights;

pub use checksum::{classify, IsbnFormat, ValidatedIsbn};
pub use error::{Error, Result};
pub use pipeline::{NormalizationPipeline, Outcome, Statistics};
