mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, Providers, Qdrant, Ranking, RewriterProviderConfig, Search,
	Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.collection.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.collection must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}
	if cfg.providers.rewriter.canonical_questions.is_empty() {
		return Err(Error::Validation {
			message: "providers.rewriter.canonical_questions must be non-empty.".to_string(),
		});
	}
	if cfg.search.top_k == 0 {
		return Err(Error::Validation {
			message: "search.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_variants == 0 {
		return Err(Error::Validation {
			message: "search.max_variants must be greater than zero.".to_string(),
		});
	}
	if !cfg.search.base_threshold.is_finite() {
		return Err(Error::Validation {
			message: "search.base_threshold must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.base_threshold) {
		return Err(Error::Validation {
			message: "search.base_threshold must be in the range 0.0-1.0.".to_string(),
		});
	}

	for (path, value) in [
		("ranking.vector_weight", cfg.ranking.vector_weight),
		("ranking.string_weight", cfg.ranking.string_weight),
		("ranking.string_floor", cfg.ranking.string_floor),
	] {
		if !value.is_finite() {
			return Err(Error::Validation { message: format!("{path} must be a finite number.") });
		}
		if !(0.0..=1.0).contains(&value) {
			return Err(Error::Validation {
				message: format!("{path} must be in the range 0.0-1.0."),
			});
		}
	}

	if cfg.ranking.vector_weight + cfg.ranking.string_weight <= 0.0 {
		return Err(Error::Validation {
			message: "At least one ranking weight must be greater than zero.".to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("rewriter", &cfg.providers.rewriter.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.providers
		.rewriter
		.canonical_questions
		.retain(|question| !question.trim().is_empty());
}
