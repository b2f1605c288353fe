//! Weighted merge of per-formulation retrieval results.

use std::collections::HashMap;

use crate::Candidate;

/// One formulation's retrieval output together with the weight its
/// scores contribute to the merge.
#[derive(Debug, Clone)]
pub struct WeightedRetrieval {
	pub weight: f32,
	pub candidates: Vec<Candidate>,
}

/// Merges retrieval results keyed by matched question text.
///
/// A question surfaced by several formulations accumulates
/// `weight * score` from each of them. Ordering is by merged score
/// descending; ties keep first-seen order, so the earlier formulation
/// wins. The result is truncated to `top_k` entries.
pub fn merge(retrievals: &[WeightedRetrieval], top_k: usize) -> Vec<Candidate> {
	let mut merged: Vec<Candidate> = Vec::new();
	let mut index_by_question: HashMap<String, usize> = HashMap::new();

	for retrieval in retrievals {
		for candidate in &retrieval.candidates {
			let contribution = retrieval.weight * candidate.score.unwrap_or(0.0);

			match index_by_question.get(&candidate.question) {
				Some(&i) => {
					let slot = &mut merged[i];

					slot.score = Some(slot.score.unwrap_or(0.0) + contribution);
				},
				None => {
					index_by_question.insert(candidate.question.clone(), merged.len());
					merged.push(Candidate {
						question: candidate.question.clone(),
						answer: candidate.answer.clone(),
						score: Some(contribution),
					});
				},
			}
		}
	}

	merged.sort_by(|a, b| {
		b.score
			.unwrap_or(0.0)
			.partial_cmp(&a.score.unwrap_or(0.0))
			.unwrap_or(std::cmp::Ordering::Equal)
	});
	merged.truncate(top_k);

	merged
}

#[cfg(test)]
mod tests {
	use super::*;

	fn retrieval(weight: f32, rows: &[(&str, f32)]) -> WeightedRetrieval {
		WeightedRetrieval {
			weight,
			candidates: rows
				.iter()
				.map(|(question, score)| Candidate::new(*question, "answer", *score))
				.collect(),
		}
	}

	#[test]
	fn shared_questions_accumulate_weighted_scores() {
		let merged = merge(
			&[
				retrieval(0.4, &[("A", 0.9), ("B", 0.5)]),
				retrieval(0.6, &[("A", 0.8), ("C", 0.7)]),
			],
			3,
		);

		assert_eq!(merged[0].question, "A");
		assert!((merged[0].score.unwrap_or(0.0) - (0.4 * 0.9 + 0.6 * 0.8)).abs() < 1e-6);
	}

	#[test]
	fn skewed_weights_let_a_single_formulation_dominate() {
		// An informal query weighs alternates at 0.9, so a strong hit
		// from the rewritten formulation outranks the raw query's hit.
		let merged = merge(
			&[retrieval(0.1, &[("raw", 0.9)]), retrieval(0.9, &[("rewritten", 0.8)])],
			2,
		);

		assert_eq!(merged[0].question, "rewritten");
		assert_eq!(merged[1].question, "raw");
	}

	#[test]
	fn ties_keep_first_seen_order() {
		let merged = merge(
			&[retrieval(0.5, &[("first", 0.8)]), retrieval(0.5, &[("second", 0.8)])],
			2,
		);

		assert_eq!(merged[0].question, "first");
		assert_eq!(merged[1].question, "second");
	}

	#[test]
	fn output_is_truncated_to_top_k() {
		let merged = merge(&[retrieval(1.0, &[("A", 0.9), ("B", 0.8), ("C", 0.7)])], 2);

		assert_eq!(merged.len(), 2);
		assert_eq!(merged[1].question, "B");
	}

	#[test]
	fn unscored_candidates_contribute_nothing() {
		let unscored = WeightedRetrieval {
			weight: 1.0,
			candidates: vec![Candidate { question: "A".to_string(), answer: "answer".to_string(), score: None }],
		};
		let merged = merge(&[unscored], 1);

		assert!(merged[0].score.unwrap_or(1.0).abs() < f32::EPSILON);
	}
}
