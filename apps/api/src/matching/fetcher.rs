//! Document Fetcher — downloads a resume PDF and extracts its text.
//!
//! Every failure (transport error, non-2xx status, unreadable PDF, no text at
//! all) collapses into an empty string for the caller. The cause is logged
//! here and nowhere else.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("Document exceeds the {0} byte limit")]
    TooLarge(usize),
}

/// Raw bytes of a downloaded document and where they came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub url: String,
    pub content: Bytes,
}

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Returns the document's text, or an empty string if none could be obtained.
    async fn fetch_text(&self, url: &str) -> String;
}

/// Fetches PDFs over HTTP(S). One attempt per call, bounded by a timeout
/// and by a maximum body size.
#[derive(Clone)]
pub struct HttpPdfFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpPdfFetcher {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, max_bytes })
    }

    async fn download(&self, url: &str) -> Result<Document, FetchError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Checked up front, then again per chunk for bodies without a length.
        if response
            .content_length()
            .is_some_and(|length| length > self.max_bytes as u64)
        {
            return Err(FetchError::TooLarge(self.max_bytes));
        }

        let mut buffer = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            if buffer.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge(self.max_bytes));
            }
            buffer.extend_from_slice(&chunk);
        }
        let content = buffer.freeze();
        debug!("Downloaded {} bytes from {url}", content.len());

        Ok(Document {
            url: url.to_string(),
            content,
        })
    }
}

#[async_trait]
impl DocumentFetcher for HttpPdfFetcher {
    async fn fetch_text(&self, url: &str) -> String {
        let document = match self.download(url).await {
            Ok(document) => document,
            Err(e) => {
                warn!("Resume download failed for {url}: {e}");
                return String::new();
            }
        };

        // PDF parsing is CPU-bound, and the parser may panic on malformed input.
        let source = document.url.clone();
        let parsed =
            tokio::task::spawn_blocking(move || extract_pdf_text(&document.content)).await;

        match parsed {
            Ok(Ok(text)) => {
                if text.is_empty() {
                    warn!("Resume at {source} contains no extractable text");
                }
                text
            }
            Ok(Err(e)) => {
                warn!("Resume at {source} could not be parsed: {e}");
                String::new()
            }
            Err(e) => {
                warn!("Resume parser aborted for {source}: {e}");
                String::new()
            }
        }
    }
}

/// Extracts text page by page and joins the pages in order.
pub fn extract_pdf_text(content: &[u8]) -> Result<String, FetchError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(content)
        .map_err(|e| FetchError::Pdf(e.to_string()))?;
    Ok(join_pages(&pages))
}

/// Pages without text still count as (empty) fragments; only the outer
/// whitespace of the whole document is trimmed.
fn join_pages(pages: &[String]) -> String {
    pages.join("\n").trim().to_string()
}

#[cfg(test)]
pub mod stub {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::DocumentFetcher;

    /// Returns canned text and counts how often it was asked.
    pub struct StubFetcher {
        text: String,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        pub fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentFetcher for StubFetcher {
        async fn fetch_text(&self, _url: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.text.clone()
        }
    }
}
