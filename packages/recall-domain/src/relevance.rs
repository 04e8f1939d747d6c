use std::{cmp::Ordering, collections::HashSet};

use crate::record::MemoryRecord;

/// Content length, in characters, that would map to a bonus of 1.0 before capping.
pub const LENGTH_BONUS_SCALE: f32 = 1_000.0;
/// Tunable heuristic, not a correctness property.
pub const LENGTH_BONUS_CAP: f32 = 0.1;

/// Lowercased whitespace-delimited word set. Duplicates collapse.
pub fn tokenize(text: &str) -> HashSet<String> {
	text.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Jaccard overlap of the query and content word sets plus a capped length bonus.
///
/// The result lies in `[0.0, 1.1]`. A query without words scores `0.0` regardless of content.
pub fn relevance_score(query: &str, content: &str) -> f32 {
	if tokenize(query).is_empty() {
		return 0.0;
	}

	overlap_ratio(query, content) + length_bonus(content)
}

/// Jaccard overlap of the query and content word sets, in `[0.0, 1.0]`, without the length
/// bonus.
pub fn overlap_ratio(query: &str, content: &str) -> f32 {
	let query_words = tokenize(query);
	let content_words = tokenize(content);
	let overlap = query_words.intersection(&content_words).count();
	let union = query_words.union(&content_words).count();

	if overlap == 0 || union == 0 { 0.0 } else { overlap as f32 / union as f32 }
}

pub fn score_record(query: &str, record: &MemoryRecord) -> f32 {
	relevance_score(query, &record.content)
}

/// Descending order for scores; NaN sorts last.
pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

fn length_bonus(content: &str) -> f32 {
	(content.chars().count() as f32 / LENGTH_BONUS_SCALE).min(LENGTH_BONUS_CAP)
}
