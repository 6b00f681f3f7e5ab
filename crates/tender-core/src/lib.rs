//! Core library for PepsiCo freight tender processing.
//!
//! This crate provides:
//! - PDF text extraction
//! - Header field rules (dates, load number, addresses, temp, location and stop ids)
//! - Line-item table tokenizing
//! - Configurable projection into flat output rows
//! - Directory batching, the capability envelope, and row sinks

pub mod batch;
pub mod capability;
pub mod error;
pub mod models;
pub mod pdf;
pub mod projection;
pub mod sink;
pub mod tender;

pub use batch::BatchProcessor;
pub use capability::{CAPABILITY_NAME, CapabilityRequest, CapabilityResponse, dispatch, dispatch_json, run_capability};
pub use error::{PdfError, Result, TenderError};
pub use models::config::{FieldDescriptor, OutputConfig, TenderConfig};
pub use models::tender::{BatchEntry, ErrorMarker, Field, HeaderFields, LineItemRecord, OutputRow};
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextSource, TextSource};
pub use projection::{RowProjector, SlotLayout};
pub use sink::{RowSink, SinkReport, prepare_rows};
pub use tender::{HeaderExtractor, LineItemTokenizer, ParsedTender, PepsiTenderParser, TenderParser};
