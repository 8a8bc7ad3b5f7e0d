//! Batch ranking of resumes against a job description.
//!
//! The job description is embedded once; each document is then normalized,
//! embedded, scored, and classified independently, with failures kept inside
//! that document's [`MatchResult`]. Results come back sorted by score with a
//! [`BatchSummary`].

pub mod config;
pub mod error;
pub mod ranker;
pub mod types;


pub use config::RankerConfig;
pub use error::{DocumentError, RankError};
pub use ranker::BatchRanker;
pub use types::{
    BatchSummary, Document, DocumentBody, DocumentOutcome, MatchResult, RankedBatch,
};
