pub mod search;

mod error;

use std::{future::Future, pin::Pin};

pub use error::{Error, Result as ServiceResult};
pub use search::{AnswerService, AskRequest, SearchResult};

use mondap_domain::Candidate;
use mondap_storage::qdrant::QdrantStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Retrieval capability: one query formulation in, scored candidates out.
pub trait Retriever
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, ServiceResult<Vec<Candidate>>>;

	fn health<'a>(&'a self) -> BoxFuture<'a, bool>;
}

/// Rewrite capability with the three-way contract: canonical question,
/// out-of-domain sentinel, or an error the caller degrades from.
pub trait RewriteProvider
where
	Self: Send + Sync,
{
	fn rewrite<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<String>>;
}

/// Production retriever: embeds the formulation and runs a nearest
/// neighbour query against qdrant.
pub struct VectorRetriever {
	pub embedding: mondap_config::EmbeddingProviderConfig,
	pub store: QdrantStore,
}

impl Retriever for VectorRetriever {
	fn search<'a>(
		&'a self,
		query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, ServiceResult<Vec<Candidate>>> {
		Box::pin(async move {
			let texts = [query.to_string()];
			let vectors = mondap_providers::embedding::embed(&self.embedding, &texts)
				.await
				.map_err(|err| Error::Provider { message: err.to_string() })?;
			let vector = vectors.into_iter().next().ok_or_else(|| Error::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			})?;

			Ok(self.store.search(vector, top_k).await?)
		})
	}

	fn health<'a>(&'a self) -> BoxFuture<'a, bool> {
		Box::pin(self.store.health())
	}
}

/// Production rewriter backed by a chat-completions endpoint.
pub struct LlmRewriter {
	pub cfg: mondap_config::RewriterProviderConfig,
}

impl RewriteProvider for LlmRewriter {
	fn rewrite<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(mondap_providers::rewriter::rewrite(&self.cfg, query))
	}
}
