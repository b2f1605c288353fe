//! LLM query rewriting against a closed question vocabulary.
//!
//! The rewriter asks a chat-completions endpoint to map a colloquial
//! query onto one of the configured canonical questions, or to the
//! out-of-domain sentinel when the query is unrelated. The call is made
//! exactly once; transport failures surface as errors and the caller
//! decides how to degrade.

use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// Sentinel the model is instructed to emit for unrelated queries.
/// Must match [`mondap_domain::OUT_OF_DOMAIN_SENTINEL`].
const NO_MATCH: &str = "[NO_MATCH]";

pub async fn rewrite(cfg: &mondap_config::RewriterProviderConfig, query: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [
			{ "role": "system", "content": build_system_prompt(&cfg.canonical_questions) },
			{ "role": "user", "content": format!("입력: \"{query}\"\n출력:") },
		],
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;
	let content = parse_chat_content(json)?;

	Ok(postprocess(&content))
}

fn build_system_prompt(canonical_questions: &[String]) -> String {
	let mut listed = String::new();

	for (i, question) in canonical_questions.iter().enumerate() {
		listed.push_str(&format!("{}. {question}\n", i + 1));
	}

	format!(
		"당신은 FAQ 챗봇의 질문 변환 전문가입니다.\n\
		 사용자의 구어체/반말 질문을 아래 표준 질문 중 의미적으로 관련된 형태로 변환하세요.\n\n\
		 [표준 질문 목록]\n{listed}\n\
		 [변환 규칙]\n\
		 1. 질문이 표준 질문 목록의 주제와 관련이 있는지 먼저 판단하세요.\n\
		 2. 관련 없는 질문(날씨, 일반 지식, 다른 주제 등)에는 \"{NO_MATCH}\"만 출력하세요.\n\
		 3. 관련 있는 질문은 위 표준 질문 중 하나로만 변환하세요.\n\
		 4. 추가 설명 없이 변환된 질문만 출력하세요."
	)
}

fn parse_chat_content(json: Value) -> Result<String> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(str::to_string)
		.ok_or_else(|| eyre::eyre!("Rewriter response is missing message content."))
}

/// Normalizes the raw model output into the contract's three outcomes:
/// a canonical question, the sentinel, or nothing useful (mapped to the
/// sentinel as well).
fn postprocess(content: &str) -> String {
	let trimmed = content.trim().trim_matches(['"', '\'']).trim();

	if trimmed.is_empty() {
		return NO_MATCH.to_string();
	}
	if trimmed.contains("NO_MATCH") {
		return NO_MATCH.to_string();
	}

	trimmed.to_string()
}
