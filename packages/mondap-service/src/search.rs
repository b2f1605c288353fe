//! Search orchestration: rewrite, retrieve, merge, rerank, guard.

use std::sync::Arc;

use uuid::Uuid;

use crate::{Error, Retriever, RewriteProvider, ServiceResult};
use mondap_config::Config;
use mondap_domain::{
	OUT_OF_DOMAIN_SENTINEL, classify,
	ensemble::{self, WeightedRetrieval},
	guard::{AdaptiveGuard, FALLBACK_MESSAGE},
	normalize,
	rerank::HybridReranker,
};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AskRequest {
	pub query: String,
	#[serde(default)]
	pub top_k: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SearchResult {
	pub answer: String,
	pub score: f32,
	pub matched_question: String,
	pub sources: Vec<String>,
	pub is_valid: bool,
}

impl SearchResult {
	/// Every rejection path returns the same fixed fallback answer, so
	/// clients cannot tell rejection causes apart from the message.
	fn rejected(score: f32) -> Self {
		Self {
			answer: FALLBACK_MESSAGE.to_string(),
			score,
			matched_question: String::new(),
			sources: Vec::new(),
			is_valid: false,
		}
	}
}

pub struct AnswerService {
	cfg: Config,
	retriever: Arc<dyn Retriever>,
	rewriter: Arc<dyn RewriteProvider>,
	guard: AdaptiveGuard,
	reranker: HybridReranker,
}

impl AnswerService {
	pub fn new(
		cfg: Config,
		retriever: Arc<dyn Retriever>,
		rewriter: Arc<dyn RewriteProvider>,
	) -> Self {
		let guard = AdaptiveGuard::new(cfg.search.base_threshold);
		let reranker = HybridReranker::new(
			cfg.ranking.vector_weight,
			cfg.ranking.string_weight,
			cfg.ranking.string_floor,
		);

		Self { cfg, retriever, rewriter, guard, reranker }
	}

	pub async fn health(&self) -> bool {
		self.retriever.health().await
	}

	pub async fn ask(&self, request: &AskRequest) -> ServiceResult<SearchResult> {
		let query = request.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "Query must be non-empty.".to_string() });
		}
		if request.top_k == Some(0) {
			return Err(Error::InvalidRequest {
				message: "top_k must be greater than zero.".to_string(),
			});
		}

		let trace_id = Uuid::new_v4();
		let top_k = request.top_k.unwrap_or(self.cfg.search.top_k);
		let rewritten = match self.rewriter.rewrite(query).await {
			Ok(rewritten) => rewritten,
			Err(err) => {
				tracing::warn!(
					trace_id = %trace_id,
					error = %err,
					"Rewrite failed, keeping the original query."
				);

				query.to_string()
			},
		};

		if rewritten == OUT_OF_DOMAIN_SENTINEL {
			tracing::info!(trace_id = %trace_id, "Rewriter flagged the query as out of domain.");

			return Ok(SearchResult::rejected(0.0));
		}

		let formulations =
			build_formulations(query, &rewritten, self.cfg.search.max_variants as usize);
		let shape = classify::classify(query);
		let (original_weight, alternate_weight) = classify::ensemble_weights(shape);

		tracing::info!(
			trace_id = %trace_id,
			shape = ?shape,
			rewritten = %rewritten,
			rewrite_changed = rewritten != query,
			formulations = formulations.len(),
			"Search started."
		);

		let mut retrievals = Vec::with_capacity(formulations.len());

		for (i, formulation) in formulations.iter().enumerate() {
			let weight = if i == 0 { original_weight } else { alternate_weight };
			let candidates = self.retriever.search(formulation, top_k).await?;

			retrievals.push(WeightedRetrieval { weight, candidates });
		}

		let merged = ensemble::merge(&retrievals, top_k as usize);

		if merged.is_empty() {
			tracing::info!(trace_id = %trace_id, "No candidates retrieved.");

			return Ok(SearchResult::rejected(0.0));
		}

		let reranked = self.reranker.rerank(query, &merged);
		let top = &reranked[0];
		let score = top.score.unwrap_or(0.0);
		let threshold = self.guard.threshold(query);

		if !self.guard.is_valid(score, query) {
			tracing::info!(
				trace_id = %trace_id,
				score,
				threshold,
				candidates = reranked.len(),
				"Top candidate rejected."
			);

			return Ok(SearchResult::rejected(score));
		}

		tracing::info!(
			trace_id = %trace_id,
			score,
			threshold,
			matched_question = %top.question,
			"Top candidate accepted."
		);

		Ok(SearchResult {
			answer: top.answer.clone(),
			score,
			matched_question: top.question.clone(),
			sources: vec![
				format!("Q: {}", top.question),
				format!("A: {}", top.answer),
				format!("Score: {score:.3}"),
			],
			is_valid: true,
		})
	}
}

/// The raw query always retrieves first. A distinct rewriter output is
/// the sole alternate; otherwise the normalizer's variants beyond the
/// original serve as alternates.
fn build_formulations(query: &str, rewritten: &str, max_variants: usize) -> Vec<String> {
	if rewritten != query {
		return vec![query.to_string(), rewritten.to_string()];
	}

	normalize::expand(query, max_variants)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distinct_rewrite_is_the_sole_alternate() {
		let formulations = build_formulations("persoai가 뭐야?", "Perso.ai는 어떤 서비스인가요?", 5);

		assert_eq!(
			formulations,
			vec!["persoai가 뭐야?".to_string(), "Perso.ai는 어떤 서비스인가요?".to_string()]
		);
	}

	#[test]
	fn unchanged_rewrite_falls_back_to_normalizer_variants() {
		let formulations = build_formulations("persoai가 뭐야?", "persoai가 뭐야?", 5);

		assert_eq!(formulations[0], "persoai가 뭐야?");
		assert!(formulations.len() > 1, "normalizer should contribute variants");
		assert!(formulations.contains(&"Perso.ai가 무엇인가요?".to_string()));
	}

	#[test]
	fn canonical_query_yields_a_single_formulation() {
		let query = "Perso.ai는 어떤 서비스인가요?";
		let formulations = build_formulations(query, query, 5);

		assert_eq!(formulations, vec![query.to_string()]);
	}
}
