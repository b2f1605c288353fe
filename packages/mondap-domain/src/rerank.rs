//! Hybrid reranking of vector search hits.

use crate::{Candidate, similarity};

/// Multiplier applied when the lexical score falls below the floor.
const LOW_LEXICAL_PENALTY: f32 = 0.9;

/// Blends each candidate's vector score with a lexical similarity
/// between the query and the matched question.
///
/// Candidates whose lexical score falls below `string_floor` take a
/// flat penalty on the blended score, which demotes hits that are close
/// in embedding space but share almost no surface text with the query.
#[derive(Debug, Clone, Copy)]
pub struct HybridReranker {
	vector_weight: f32,
	string_weight: f32,
	string_floor: f32,
}

impl HybridReranker {
	pub fn new(vector_weight: f32, string_weight: f32, string_floor: f32) -> Self {
		Self { vector_weight, string_weight, string_floor }
	}

	/// Recomputes every candidate's score as the weighted blend and
	/// sorts descending. Ties keep input order.
	pub fn rerank(&self, query: &str, candidates: &[Candidate]) -> Vec<Candidate> {
		let mut reranked = candidates
			.iter()
			.map(|candidate| {
				let (_, _, hybrid) = self.blend(query, candidate);

				Candidate {
					question: candidate.question.clone(),
					answer: candidate.answer.clone(),
					score: Some(hybrid),
				}
			})
			.collect::<Vec<_>>();

		reranked.sort_by(|a, b| {
			b.score
				.unwrap_or(0.0)
				.partial_cmp(&a.score.unwrap_or(0.0))
				.unwrap_or(std::cmp::Ordering::Equal)
		});

		reranked
	}

	/// Human-readable rendering of the blend, for logs and debugging.
	pub fn explain(&self, query: &str, candidates: &[Candidate]) -> String {
		let mut out = format!("Query: '{query}'\nReranking {} candidates:", candidates.len());

		for (i, candidate) in candidates.iter().enumerate() {
			let (vector, string, hybrid) = self.blend(query, candidate);

			out.push_str(&format!(
				"\n{}. Q: {}\n   Vector: {vector:.3}, String: {string:.3}, Hybrid: {hybrid:.3}",
				i + 1,
				candidate.question,
			));
		}

		out
	}

	fn blend(&self, query: &str, candidate: &Candidate) -> (f32, f32, f32) {
		let vector = candidate.score.unwrap_or(0.0);
		let string = similarity::token_sort_ratio(query, &candidate.question);
		let mut hybrid = self.vector_weight * vector + self.string_weight * string;

		if string < self.string_floor {
			hybrid *= LOW_LEXICAL_PENALTY;
		}

		(vector, string, hybrid)
	}
}

impl Default for HybridReranker {
	fn default() -> Self {
		Self { vector_weight: 0.7, string_weight: 0.3, string_floor: 0.3 }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lexical_overlap_reorders_close_vector_scores() {
		// Scenario: the query shares its wording with the second hit,
		// so the blend flips the vector ordering.
		let candidates = vec![
			Candidate::new("지원하는 언어는 몇 개인가요?", "answer-a", 0.86),
			Candidate::new("요금제는 어떻게 구성되어 있나요?", "answer-b", 0.84),
		];
		let reranked =
			HybridReranker::default().rerank("요금제는 어떻게 구성되어 있나요?", &candidates);

		assert_eq!(reranked[0].question, "요금제는 어떻게 구성되어 있나요?");
	}

	#[test]
	fn low_lexical_overlap_takes_a_flat_penalty() {
		let candidates = vec![Candidate::new("지원하는 언어는 몇 개인가요?", "answer", 0.9)];
		let reranked = HybridReranker::default().rerank("환불 규정 문의", &candidates);
		let score = reranked[0].score.unwrap_or(0.0);
		let lexical =
			crate::similarity::token_sort_ratio("환불 규정 문의", "지원하는 언어는 몇 개인가요?");
		let expected = (0.7 * 0.9 + 0.3 * lexical) * 0.9;

		assert!(lexical < 0.3, "fixture must sit below the floor, got {lexical}");
		assert!((score - expected).abs() < 1e-6, "got {score}, expected {expected}");
	}

	#[test]
	fn identical_wording_is_not_penalized() {
		let candidates = vec![Candidate::new("요금제는 어떻게 구성되어 있나요?", "answer", 0.8)];
		let reranked =
			HybridReranker::default().rerank("요금제는 어떻게 구성되어 있나요?", &candidates);
		let score = reranked[0].score.unwrap_or(0.0);
		let expected = 0.7 * 0.8 + 0.3 * 1.0;

		assert!((score - expected).abs() < 1e-6, "got {score}");
	}

	#[test]
	fn empty_input_stays_empty() {
		assert!(HybridReranker::default().rerank("요금제", &[]).is_empty());
	}

	#[test]
	fn explain_reports_each_component() {
		let candidates = vec![Candidate::new("요금제는 어떻게 구성되어 있나요?", "answer", 0.8)];
		let rendered =
			HybridReranker::default().explain("요금제는 어떻게 구성되어 있나요?", &candidates);

		assert!(rendered.contains("Reranking 1 candidates:"));
		assert!(rendered.contains("Vector: 0.800"));
		assert!(rendered.contains("String: 1.000"));
	}
}
