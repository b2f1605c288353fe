pub mod classify;
pub mod ensemble;
pub mod guard;
pub mod normalize;
pub mod rerank;
pub mod similarity;

/// Reserved rewriter return value meaning "outside the supported domain".
/// Callers must compare by exact string match.
pub const OUT_OF_DOMAIN_SENTINEL: &str = "[NO_MATCH]";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candidate {
	pub question: String,
	pub answer: String,
	pub score: Option<f32>,
}

impl Candidate {
	pub fn new(question: impl Into<String>, answer: impl Into<String>, score: f32) -> Self {
		Self { question: question.into(), answer: answer.into(), score: Some(score) }
	}
}
