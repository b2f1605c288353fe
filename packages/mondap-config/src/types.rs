use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub ranking: Ranking,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub rewriter: RewriterProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewriterProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
	/// Closed vocabulary the rewriter may return. Anything else degrades to
	/// the out-of-domain sentinel or the original query.
	pub canonical_questions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	pub top_k: u32,
	pub base_threshold: f32,
	pub max_variants: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { top_k: 3, base_threshold: 0.8, max_variants: 5 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub vector_weight: f32,
	pub string_weight: f32,
	pub string_floor: f32,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { vector_weight: 0.7, string_weight: 0.3, string_floor: 0.3 }
	}
}
