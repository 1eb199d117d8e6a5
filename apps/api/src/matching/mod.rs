// Resume → jobs matching pipeline.
// fetch resume text → noun keywords → TF-IDF over candidate + jobs → cosine ranking.
// Nothing here knows about HTTP status codes; see errors.rs for that mapping.

pub mod fetcher;
pub mod handlers;
pub mod keywords;
pub mod matcher;
pub mod ranker;
pub mod tagger;
pub mod vectorizer;

use thiserror::Error;

/// Why a matching request could not produce a ranking.
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    NotFound(String),

    /// Download, HTTP status and PDF problems all land here; the cause is logged by the fetcher.
    #[error("Failed to extract text from resume")]
    Extraction,

    #[error("Record store error: {0}")]
    Store(#[source] anyhow::Error),
}
