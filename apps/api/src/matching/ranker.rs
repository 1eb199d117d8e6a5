//! Cosine similarity of the candidate against every job.

/// One job's position in the job list (corpus index minus one) and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedIndex {
    pub job_index: usize,
    pub score: f64,
}

/// Cosine similarity in [0, 1]. Zero-norm vectors (empty bags, empty
/// vocabulary) score 0 instead of NaN so the ordering stays total.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|y| y * y).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Scores every job vector against `candidate` and sorts by score, highest
/// first. The sort is stable: equal scores keep job-list order.
pub fn rank(candidate: &[f64], jobs: &[Vec<f64>]) -> Vec<RankedIndex> {
    let mut ranked: Vec<RankedIndex> = jobs
        .iter()
        .enumerate()
        .map(|(job_index, job)| RankedIndex {
            job_index,
            score: cosine_similarity(candidate, job),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
