//! Acceptance guard with query-adaptive thresholds.

use crate::classify::{self, QueryShape};

/// Fixed answer returned whenever no candidate clears the threshold.
/// Byte-identical on every rejection path so clients can match on it.
pub const FALLBACK_MESSAGE: &str =
	"죄송해요, 제가 가지고 있는 데이터셋에는 해당 내용이 없어요. 비슷한 질문으로 다시 시도해보세요.";

const SHORT_THRESHOLD: f32 = 0.85;
const INFORMAL_THRESHOLD: f32 = 0.35;
const KEYWORD_THRESHOLD: f32 = 0.65;

/// Decides whether a top candidate's score is trustworthy enough to
/// answer with, using a threshold adapted to the query's shape.
///
/// Short queries are too ambiguous to trust anything but a very close
/// match. Informal queries score low against the polite dataset wording
/// even when the intent matches, so their bar drops well below base.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveGuard {
	base_threshold: f32,
}

impl AdaptiveGuard {
	pub fn new(base_threshold: f32) -> Self {
		Self { base_threshold }
	}

	pub fn threshold(&self, query: &str) -> f32 {
		match classify::classify(query) {
			QueryShape::Short => SHORT_THRESHOLD,
			QueryShape::Informal => INFORMAL_THRESHOLD,
			QueryShape::Formal => self.base_threshold,
			QueryShape::Keyword => KEYWORD_THRESHOLD,
			QueryShape::Default => self.base_threshold,
		}
	}

	/// Acceptance is inclusive: a score exactly at the threshold passes.
	pub fn is_valid(&self, score: f32, query: &str) -> bool {
		score >= self.threshold(query)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_queries_use_the_strict_threshold() {
		let guard = AdaptiveGuard::new(0.8);

		assert!((guard.threshold("뭐야?") - 0.85).abs() < f32::EPSILON);
		assert!((guard.threshold("요금") - 0.85).abs() < f32::EPSILON);
	}

	#[test]
	fn informal_queries_use_the_lenient_threshold() {
		let guard = AdaptiveGuard::new(0.8);

		assert!((guard.threshold("persoai가 뭐야?") - 0.35).abs() < f32::EPSILON);
	}

	#[test]
	fn formal_queries_use_the_base_threshold() {
		let guard = AdaptiveGuard::new(0.8);

		assert!((guard.threshold("Perso.ai는 어떤 서비스인가요?") - 0.8).abs() < f32::EPSILON);
	}

	#[test]
	fn keyword_queries_use_the_keyword_threshold() {
		let guard = AdaptiveGuard::new(0.8);

		assert!((guard.threshold("요금제 구성 안내") - 0.65).abs() < f32::EPSILON);
	}

	#[test]
	fn acceptance_is_inclusive_at_the_threshold() {
		let guard = AdaptiveGuard::new(0.8);

		assert!(guard.is_valid(0.35, "persoai가 뭐야?"));
		assert!(!guard.is_valid(0.349, "persoai가 뭐야?"));
		assert!(guard.is_valid(0.8, "Perso.ai는 어떤 서비스인가요?"));
	}

	#[test]
	fn informal_scenario_accepts_scores_base_would_reject() {
		// A colloquial query typically lands far below the base
		// threshold even when the intent matches the dataset.
		let guard = AdaptiveGuard::new(0.8);

		assert!(guard.is_valid(0.42, "persoai가 뭐야?"));
		assert!(!guard.is_valid(0.42, "Perso.ai는 어떤 서비스인가요?"));
	}
}
