//! Matching Orchestrator — runs the whole pipeline for one user.
//!
//! Everything it needs (stores, fetcher, tagger) is injected once at startup
//! and shared read-only; every per-request structure is rebuilt from scratch.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::matching::fetcher::DocumentFetcher;
use crate::matching::keywords::{KeywordBag, KeywordExtractor};
use crate::matching::ranker::rank;
use crate::matching::vectorizer::{Corpus, VectorSpace};
use crate::matching::MatchingError;
use crate::models::job::JobRow;
use crate::store::{JobStore, UserStore};

/// One entry of the ranking returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredJob {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub title: String,
    pub score: f64,
}

pub struct JobMatcher {
    users: Arc<dyn UserStore>,
    jobs: Arc<dyn JobStore>,
    fetcher: Arc<dyn DocumentFetcher>,
    extractor: KeywordExtractor,
}

impl JobMatcher {
    pub fn new(
        users: Arc<dyn UserStore>,
        jobs: Arc<dyn JobStore>,
        fetcher: Arc<dyn DocumentFetcher>,
        extractor: KeywordExtractor,
    ) -> Self {
        Self {
            users,
            jobs,
            fetcher,
            extractor,
        }
    }

    /// Ranks every open job against the resume of `user_id`, best match first.
    pub async fn recommend(&self, user_id: Uuid) -> Result<Vec<ScoredJob>, MatchingError> {
        let user = self
            .users
            .find_user(user_id)
            .await
            .map_err(MatchingError::Store)?
            .ok_or_else(|| MatchingError::NotFound("User not found".to_string()))?;

        let resume_url = user
            .resume_url()
            .ok_or_else(|| MatchingError::Input("Resume URL not found".to_string()))?;

        let resume_text = self.fetcher.fetch_text(resume_url).await;
        if resume_text.is_empty() {
            return Err(MatchingError::Extraction);
        }

        let candidate = self.extractor.extract(&resume_text);
        debug!("User {user_id}: {} resume keywords", candidate.len());

        let jobs = self.jobs.list_jobs().await.map_err(MatchingError::Store)?;
        if jobs.is_empty() {
            return Err(MatchingError::NotFound("No jobs available".to_string()));
        }

        let ranked = rank_jobs(&self.extractor, &candidate, &jobs);
        info!("Ranked {} jobs for user {user_id}", ranked.len());
        Ok(ranked)
    }
}

/// Pure ranking step: keywords per job, TF-IDF over `[candidate] + jobs`, cosine, stable sort.
pub fn rank_jobs(
    extractor: &KeywordExtractor,
    candidate: &KeywordBag,
    jobs: &[JobRow],
) -> Vec<ScoredJob> {
    let job_bags: Vec<KeywordBag> = jobs
        .iter()
        .map(|job| extractor.extract(&job.description))
        .collect();

    let corpus = Corpus::new(candidate, &job_bags);
    let space = VectorSpace::fit(&corpus);
    debug!(
        "Vectorized {} documents over {} terms",
        corpus.len(),
        space.dimension()
    );

    rank(space.candidate(), space.jobs())
        .into_iter()
        .map(|ranked| {
            let job = &jobs[ranked.job_index];
            ScoredJob {
                job_id: job.id.to_string(),
                title: job.title.clone(),
                score: ranked.score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use chrono::Utc;

    use crate::matching::fetcher::stub::StubFetcher;
    use crate::matching::tagger::LexiconTagger;
    use crate::store::memory::MemoryStore;

    const RESUME: &str = "Experienced engineer with python and database skills";

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::new(Arc::new(LexiconTagger::new()))
    }

    fn job(title: &str, description: &str) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        }
    }

    fn matcher(store: Arc<MemoryStore>, fetcher: Arc<StubFetcher>) -> JobMatcher {
        JobMatcher::new(store.clone(), store, fetcher, extractor())
    }

    #[test]
    fn test_overlapping_job_ranks_first() {
        let extractor = extractor();
        let jobs = vec![
            job("Designer", "figma sketch design visuals"),
            job("Backend Engineer", "python backend database engineer role"),
        ];
        let candidate = extractor.extract(RESUME);
        let ranked = rank_jobs(&extractor, &candidate, &jobs);

        assert_eq!(ranked[0].title, "Backend Engineer");
        assert_eq!(ranked[1].title, "Designer");
        assert!(ranked[0].score > ranked[1].score);
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn test_result_is_permutation_with_bounded_scores() {
        let extractor = extractor();
        let jobs = vec![
            job("A", "python services and database migrations"),
            job("B", "figma prototypes"),
            job("C", "database engineer for python pipelines"),
            job("D", ""),
            job("E", "engineer engineer engineer"),
        ];
        let ranked = rank_jobs(&extractor, &extractor.extract(RESUME), &jobs);

        assert_eq!(ranked.len(), jobs.len());
        assert!(ranked.iter().all(|r| (0.0..=1.0).contains(&r.score)));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));

        let expected: HashSet<String> = jobs.iter().map(|j| j.id.to_string()).collect();
        let actual: HashSet<String> = ranked.iter().map(|r| r.job_id.clone()).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_frozen_inputs_are_bit_identical() {
        let extractor = extractor();
        let jobs = vec![
            job("A", "python backend database engineer role"),
            job("B", "database administrator with backup experience"),
            job("C", "figma sketch design visuals"),
        ];
        let candidate = extractor.extract(RESUME);
        let first = rank_jobs(&extractor, &candidate, &jobs);
        let second = rank_jobs(&extractor, &candidate, &jobs);

        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }

    #[test]
    fn test_degenerate_corpus_scores_zero_in_input_order() {
        let extractor = extractor();
        let jobs = vec![job("A", ""), job("B", "the and of"), job("C", "")];
        let ranked = rank_jobs(&extractor, &KeywordBag::default(), &jobs);

        let titles: Vec<&str> = ranked.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert!(ranked.iter().all(|r| r.score == 0.0));
    }

    #[tokio::test]
    async fn test_recommend_end_to_end() {
        let user_id = Uuid::new_v4();
        let store = Arc::new(
            MemoryStore::default()
                .with_user(user_id, Some("https://cdn.example.com/cv.pdf"))
                .with_job("Designer", "figma sketch design visuals")
                .with_job("Backend Engineer", "python backend database engineer role"),
        );
        let fetcher = Arc::new(StubFetcher::new(RESUME));

        let ranked = matcher(store, fetcher.clone()).recommend(user_id).await.unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].title, "Backend Engineer");
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let store = Arc::new(MemoryStore::default().with_job("A", "python"));
        let fetcher = Arc::new(StubFetcher::new(RESUME));

        let err = matcher(store, fetcher.clone())
            .recommend(Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, MatchingError::NotFound(ref msg) if msg == "User not found"));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_resume_url_is_input_error() {
        let user_id = Uuid::new_v4();
        let store = Arc::new(MemoryStore::default().with_user(user_id, None));
        let fetcher = Arc::new(StubFetcher::new(RESUME));

        let err = matcher(store, fetcher).recommend(user_id).await.unwrap_err();
        assert!(matches!(err, MatchingError::Input(_)));
    }

    #[tokio::test]
    async fn test_empty_resume_text_is_extraction_error() {
        let user_id = Uuid::new_v4();
        let store = Arc::new(
            MemoryStore::default()
                .with_user(user_id, Some("https://cdn.example.com/cv.pdf"))
                .with_job("A", "python"),
        );
        let fetcher = Arc::new(StubFetcher::new(""));

        let err = matcher(store.clone(), fetcher).recommend(user_id).await.unwrap_err();

        assert!(matches!(err, MatchingError::Extraction));
        // Only the user lookup ran; jobs were never loaded.
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn test_no_jobs_is_not_found() {
        let user_id = Uuid::new_v4();
        let store = Arc::new(
            MemoryStore::default().with_user(user_id, Some("https://cdn.example.com/cv.pdf")),
        );
        let fetcher = Arc::new(StubFetcher::new(RESUME));

        let err = matcher(store, fetcher).recommend(user_id).await.unwrap_err();
        assert!(matches!(err, MatchingError::NotFound(ref msg) if msg == "No jobs available"));
    }

    #[tokio::test]
    async fn test_store_failure_is_store_error() {
        let store = Arc::new(MemoryStore::failing());
        let fetcher = Arc::new(StubFetcher::new(RESUME));

        let err = matcher(store, fetcher).recommend(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, MatchingError::Store(_)));
    }
}
