//! Quote Core Library
//!
//! Compares vendor quotes extracted from uploaded documents:
//! - Normalizer turning loosely-typed extraction records into comparable quotes
//! - Comparator computing price statistics, best deal and savings
//! - Extraction collaborator seam with replay and mock backends
//! - Batch assembly with bounded, order-preserving extraction
//! - Layered configuration (override file, embedded defaults, env)

pub mod batch;
pub mod compare;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;

pub use batch::{check_batch_size, compare_batch, extract_batch};
pub use compare::{compare, price_statistics};
pub use config::{BatchConfig, ExtractionConfig, QuoteConfig};
pub use error::{Error, Result};
pub use extract::{
    ExtractorClient, MockExtractor, MockResponse, QuoteDocument, QuoteExtractor, ReplayExtractor,
};
pub use models::{
    AnnotatedQuote, ComparableQuote, ComparisonResult, PriceComparison, RawAmount,
    RawExtractionRecord, RawLineItem,
};
pub use normalize::normalize;
