use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// Embeds `texts` through an OpenAI-compatible embeddings endpoint.
/// Vectors come back L2-normalized so cosine and dot scores agree.
pub async fn embed(
	cfg: &mondap_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<Vec<Vec<f32>>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"input": texts,
		"dimensions": cfg.dimensions,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;
	let mut vectors = parse_embedding_response(json)?;

	for vector in &mut vectors {
		l2_normalize(vector);
	}

	Ok(vectors)
}

fn parse_embedding_response(json: Value) -> Result<Vec<Vec<f32>>> {
	let data = json
		.get("data")
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Embedding response is missing data array."))?;

	let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());
	for (fallback_index, item) in data.iter().enumerate() {
		let index = item
			.get("index")
			.and_then(|v| v.as_u64())
			.map(|v| v as usize)
			.unwrap_or(fallback_index);
		let embedding = item
			.get("embedding")
			.and_then(|v| v.as_array())
			.ok_or_else(|| eyre::eyre!("Embedding item missing embedding array."))?;
		let mut vec = Vec::with_capacity(embedding.len());
		for value in embedding {
			let number =
				value.as_f64().ok_or_else(|| eyre::eyre!("Embedding value must be numeric."))?;
			vec.push(number as f32);
		}
		indexed.push((index, vec));
	}

	indexed.sort_by_key(|(index, _)| *index);

	Ok(indexed.into_iter().map(|(_, vec)| vec).collect())
}

fn l2_normalize(vector: &mut [f32]) {
	let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();

	if norm > 0.0 {
		for value in vector {
			*value /= norm;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_embeddings_in_index_order() {
		let json = serde_json::json!({
			"data": [
				{ "index": 1, "embedding": [2.0, 3.0] },
				{ "index": 0, "embedding": [0.5, 1.5] }
			]
		});
		let parsed = parse_embedding_response(json).expect("parse failed");
		assert_eq!(parsed.len(), 2);
		assert_eq!(parsed[0], vec![0.5, 1.5]);
		assert_eq!(parsed[1], vec![2.0, 3.0]);
	}

	#[test]
	fn missing_data_array_is_an_error() {
		let err = parse_embedding_response(serde_json::json!({})).expect_err("expected error");
		assert!(err.to_string().contains("missing data array"));
	}

	#[test]
	fn normalization_produces_unit_vectors() {
		let mut vector = vec![3.0, 4.0];
		l2_normalize(&mut vector);
		assert!((vector[0] - 0.6).abs() < 1e-6);
		assert!((vector[1] - 0.8).abs() < 1e-6);
	}

	#[test]
	fn zero_vectors_survive_normalization() {
		let mut vector = vec![0.0, 0.0];
		l2_normalize(&mut vector);
		assert_eq!(vector, vec![0.0, 0.0]);
	}
}
