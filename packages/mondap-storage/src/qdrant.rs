use std::collections::HashMap;

use qdrant_client::qdrant::{
	Query, QueryPointsBuilder, ScoredPoint, Value, value::Kind,
};

use crate::{Error, Result};
use mondap_domain::Candidate;

pub const QUESTION_PAYLOAD_KEY: &str = "question";
pub const ANSWER_PAYLOAD_KEY: &str = "answer";

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &mondap_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	/// Nearest-neighbour search returning decoded question/answer
	/// candidates, best first. Points with a malformed payload are
	/// skipped rather than failing the whole query.
	pub async fn search(&self, vector: Vec<f32>, top_k: u32) -> Result<Vec<Candidate>> {
		if vector.len() != self.vector_dim as usize {
			return Err(Error::InvalidArgument(format!(
				"Query vector has dimension {}, collection expects {}.",
				vector.len(),
				self.vector_dim,
			)));
		}

		let search = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector))
			.with_payload(true)
			.limit(top_k as u64);
		let response = self.client.query(search).await?;

		Ok(collect_candidates(&response.result))
	}

	/// Connectivity probe for the health endpoint.
	pub async fn health(&self) -> bool {
		self.client.health_check().await.is_ok()
	}
}

fn collect_candidates(points: &[ScoredPoint]) -> Vec<Candidate> {
	let mut out = Vec::with_capacity(points.len());

	for point in points {
		let Some(question) = payload_string(&point.payload, QUESTION_PAYLOAD_KEY) else {
			tracing::warn!("Scored point is missing its question payload.");

			continue;
		};
		let Some(answer) = payload_string(&point.payload, ANSWER_PAYLOAD_KEY) else {
			tracing::warn!(question = %question, "Scored point is missing its answer payload.");

			continue;
		};

		out.push(Candidate { question, answer, score: Some(point.score) });
	}

	out
}

fn payload_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	match payload.get(key)?.kind.as_ref()? {
		Kind::StringValue(value) => Some(value.clone()),
		_ => None,
	}
}
