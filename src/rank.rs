//! Threshold filtering and deterministic ordering of score results.

use crate::scorer::SkillScoreResult;
use std::cmp::Ordering;

/// Keep results whose score is at least `threshold` (inclusive).
pub fn filter_by_threshold(results: &[SkillScoreResult], threshold: f64) -> Vec<SkillScoreResult> {
    results
        .iter()
        .filter(|r| r.score >= threshold)
        .cloned()
        .collect()
}

/// Order by score descending, then skill name ascending, then skill path.
pub fn sort_descending_by_score(results: &[SkillScoreResult]) -> Vec<SkillScoreResult> {
    let mut sorted = results.to_vec();
    sorted.sort_by(compare_results);
    sorted
}

fn compare_results(a: &SkillScoreResult, b: &SkillScoreResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.skill.name.cmp(&b.skill.name))
        .then_with(|| a.skill.path.cmp(&b.skill.path))
}

/// Filter, sort and optionally truncate in one step.
pub fn rank(
    results: &[SkillScoreResult],
    threshold: f64,
    limit: Option<usize>,
) -> Vec<SkillScoreResult> {
    let mut ranked = sort_descending_by_score(&filter_by_threshold(results, threshold));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}
