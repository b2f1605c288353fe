use regex::Regex;

/// Trimmed character count below which a query is treated as too short
/// to carry reliable sentence-level signal.
pub const SHORT_QUERY_CHARS: usize = 5;
/// Whitespace token count at or below which a query is treated as a
/// bare keyword lookup.
pub const KEYWORD_MAX_TOKENS: usize = 3;

const FORMAL_ENDINGS: &str =
	r"(인가요|한가요|하나요|되나요|있나요|입니까|습니까|할까요|인지요|해주세요|주세요)\s*\??\s*$";
const INFORMAL_ENDINGS: &str = r"(뭐야|뭐임|뭔데|뭐예요|뭐에요|얼마야|얼마예요|있어|있니|가능해|필요해|지원해|제공해|알려줘|설명해줘|말해줘|가르쳐줘|어때|해줘|돼)\s*\??\s*$";

/// Surface shape of a user query.
///
/// Checks run in a fixed order so that overlapping shapes resolve the
/// same way for every consumer: length wins over ending markers, and
/// informal markers win over formal ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
	Short,
	Informal,
	Formal,
	Keyword,
	Default,
}

pub fn classify(query: &str) -> QueryShape {
	let trimmed = query.trim();

	if trimmed.chars().count() < SHORT_QUERY_CHARS {
		return QueryShape::Short;
	}
	if matches_pattern(INFORMAL_ENDINGS, trimmed) {
		return QueryShape::Informal;
	}
	if matches_pattern(FORMAL_ENDINGS, trimmed) {
		return QueryShape::Formal;
	}
	if trimmed.split_whitespace().count() <= KEYWORD_MAX_TOKENS {
		return QueryShape::Keyword;
	}

	QueryShape::Default
}

/// Per-formulation weights `(original, alternates)` for the ensemble
/// merge, keyed on the shape of the raw query.
///
/// A formal query trusts the user's own wording almost entirely, while
/// an informal query leans on the rewritten or normalized alternates.
pub fn ensemble_weights(shape: QueryShape) -> (f32, f32) {
	match shape {
		QueryShape::Formal => (0.95, 0.05),
		QueryShape::Short => (0.4, 0.6),
		QueryShape::Informal => (0.1, 0.9),
		QueryShape::Keyword | QueryShape::Default => (0.5, 0.5),
	}
}

fn matches_pattern(pattern: &str, text: &str) -> bool {
	Regex::new(pattern).map(|re| re.is_match(text)).unwrap_or(false)
}
