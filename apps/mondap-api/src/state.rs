use std::sync::Arc;

use mondap_service::{AnswerService, LlmRewriter, VectorRetriever};
use mondap_storage::qdrant::QdrantStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<AnswerService>,
}
impl AppState {
	pub fn new(config: mondap_config::Config) -> color_eyre::Result<Self> {
		let store = QdrantStore::new(&config.storage.qdrant)?;
		let retriever =
			VectorRetriever { embedding: config.providers.embedding.clone(), store };
		let rewriter = LlmRewriter { cfg: config.providers.rewriter.clone() };
		let service = AnswerService::new(config, Arc::new(retriever), Arc::new(rewriter));

		Ok(Self { service: Arc::new(service) })
	}
}
