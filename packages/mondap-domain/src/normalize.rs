//! Rule-based query normalization for Korean FAQ queries.
//!
//! Four ordered rule tables rewrite a raw query stage by stage: typo
//! fixes, brand-name canonicalization, domain synonym folding, and
//! colloquial-to-polite tone conversion. Each stage feeds the next, and
//! [`expand`] collects the intermediate results as retrieval variants.

use std::borrow::Cow;

use regex::Regex;

/// Common one-edit typos seen in real user queries.
const TYPO_RULES: &[(&str, &str)] = &[
	(r"(?i)무엇이나요", "무엇인가요"),
	(r"(?i)어떻케", "어떻게"),
	(r"(?i)어떻헤", "어떻게"),
	(r"(?i)뭐에요", "뭐예요"),
	(r"(?i)얼마에요", "얼마예요"),
	(r"(?i)필요하나요", "필요한가요"),
	(r"(?i)perso\.ai", "Perso.ai"),
	(r"(?i)persoa\.ai", "Perso.ai"),
];

/// Brand spellings collapse onto the canonical product and company
/// names. Patterns that already match the canonical form rewrite to
/// themselves so a normalized query passes through unchanged.
const BRAND_RULES: &[(&str, &str)] = &[
	(r"(?i)persoai", "Perso.ai"),
	(r"(?i)퍼소\s*ai", "Perso.ai"),
	(r"(?i)퍼소", "Perso.ai"),
	(r"(?i)perso(\.ai)?", "Perso.ai"),
	(r"이스트(소프트)?", "이스트소프트"),
];

/// Domain synonyms fold near-equivalent wording onto the vocabulary the
/// FAQ dataset actually uses.
const SYNONYM_RULES: &[(&str, &str)] = &[
	(r"(?i)요금제|요금", "요금제"),
	(r"(?i)가격", "요금제"),
	(r"(?i)비용", "요금제"),
	(r"(?i)회원가입", "가입"),
	(r"(?i)고객센터", "문의"),
	(r"(?i)상담", "문의"),
	(r"(?i)(주요\s*)?기능", "주요 기능"),
	(r"(?i)특징", "주요 기능"),
];

/// Colloquial endings rewrite to the polite interrogative forms the
/// dataset questions are written in. Order matters: earlier rules can
/// consume text a later, longer pattern would otherwise match, which
/// mirrors how the rules were originally tuned.
const TONE_RULES: &[(&str, &str)] = &[
	// What-is questions.
	(r"뭐야\??", "무엇인가요?"),
	(r"뭐임\??", "무엇인가요?"),
	(r"뭐예요\??", "무엇인가요?"),
	(r"뭔데\??", "무엇인가요?"),
	(r"뭐하는거야\??", "어떤 서비스인가요?"),
	(r"뭐하는거예요\??", "어떤 서비스인가요?"),
	(r"뭐하는건데\??", "어떤 서비스인가요?"),
	// Requests.
	(r"알려줘", "알려주세요"),
	(r"설명해줘", "설명해주세요"),
	(r"말해줘", "말해주세요"),
	(r"가르쳐줘", "가르쳐주세요"),
	// How-to.
	(r"어떻게\s*해\??", "어떻게 하나요?"),
	(r"어떻게\s*문의해\??", "어떻게 문의하나요?"),
	(r"어디서\s*해\??", "어디서 하나요?"),
	// Price and quantity.
	(r"얼마야\??", "얼마인가요?"),
	(r"얼마예요\??", "얼마인가요?"),
	(r"가격이?\s*얼마", "가격은 얼마인가요"),
	(r"몇\s*개(인가요)?", "몇 개인가요"),
	(r"몇\s*명(인가요)?", "몇 명인가요"),
	// Existence and possibility.
	(r"있어\??", "있나요?"),
	(r"있어요\??", "있나요?"),
	(r"있니\??", "있나요?"),
	(r"되\??$", "되나요?"),
	(r"되요\??", "되나요?"),
	(r"돼\??", "되나요?"),
	(r"가능해\??", "가능한가요?"),
	(r"가능해요\??", "가능한가요?"),
	// Necessity.
	(r"필요해\??", "필요한가요?"),
	(r"필요해요\??", "필요한가요?"),
	(r"해야\s*해\??", "해야 하나요?"),
	// Support.
	(r"지원해\??", "지원하나요?"),
	(r"지원해요\??", "지원하나요?"),
	(r"제공해\??", "제공하나요?"),
	(r"쓸\s*수\s*있어\??", "사용할 수 있나요?"),
	// Contact.
	(r"문의해\??", "문의하나요?"),
	(r"연락해\??", "연락하나요?"),
	(r"물어봐\??", "물어보나요?"),
];

pub fn fix_typos(text: &str) -> String {
	apply_rules(TYPO_RULES, text)
}

pub fn normalize_brand(text: &str) -> String {
	apply_rules(BRAND_RULES, text)
}

pub fn normalize_domain(text: &str) -> String {
	apply_rules(SYNONYM_RULES, text)
}

pub fn formalize_tone(text: &str) -> String {
	apply_rules(TONE_RULES, text)
}

/// Full rewrite chain: typos, brand, synonyms, tone, in that order.
///
/// The chain is a fixed point: running it on its own output yields no
/// further change.
pub fn normalize(text: &str) -> String {
	formalize_tone(&normalize_domain(&normalize_brand(&fix_typos(text))))
}

/// Expands a query into retrieval variants.
///
/// The original query always comes first. Each stage output is appended
/// only when it differs from the previous stage and has not been seen
/// before, so a query that is already canonical expands to itself alone.
/// The result is truncated to `max_variants` entries.
pub fn expand(query: &str, max_variants: usize) -> Vec<String> {
	let mut variants = vec![query.to_string()];
	let typo_fixed = fix_typos(query);

	if typo_fixed != query && !variants.contains(&typo_fixed) {
		variants.push(typo_fixed.clone());
	}

	let branded = normalize_brand(&typo_fixed);

	if branded != typo_fixed && !variants.contains(&branded) {
		variants.push(branded.clone());
	}

	let folded = normalize_domain(&branded);

	if folded != branded && !variants.contains(&folded) {
		variants.push(folded.clone());
	}

	let formal = formalize_tone(&folded);

	if formal != folded && !variants.contains(&formal) {
		variants.push(formal);
	}

	variants.truncate(max_variants);

	variants
}

/// Human-readable rendering of the expansion, for logs and debugging.
pub fn explain(query: &str, max_variants: usize) -> String {
	let variants = expand(query, max_variants);
	let mut out = format!("Original: '{query}'\nExpanded to {} variants:", variants.len());

	for (i, variant) in variants.iter().enumerate() {
		out.push_str(&format!("\n  {}. {variant}", i + 1));
	}

	out
}

fn apply_rules(rules: &[(&str, &str)], text: &str) -> String {
	let mut result = text.to_string();

	for (pattern, replacement) in rules {
		let Ok(re) = Regex::new(pattern) else { continue };

		if let Cow::Owned(rewritten) = re.replace_all(&result, *replacement) {
			result = rewritten;
		}
	}

	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn typos_are_fixed() {
		assert_eq!(fix_typos("어떻케 문의하나요"), "어떻게 문의하나요");
		assert_eq!(fix_typos("요금이 얼마에요"), "요금이 얼마예요");
	}

	#[test]
	fn brand_spellings_collapse_to_canonical() {
		assert_eq!(normalize_brand("persoai 소개"), "Perso.ai 소개");
		assert_eq!(normalize_brand("퍼소 ai 소개"), "Perso.ai 소개");
		assert_eq!(normalize_brand("perso 소개"), "Perso.ai 소개");
		assert_eq!(normalize_brand("이스트는 어떤 회사"), "이스트소프트는 어떤 회사");
		// Already-canonical forms pass through unchanged.
		assert_eq!(normalize_brand("Perso.ai 소개"), "Perso.ai 소개");
		assert_eq!(normalize_brand("이스트소프트 소개"), "이스트소프트 소개");
	}

	#[test]
	fn synonyms_fold_onto_dataset_vocabulary() {
		assert_eq!(normalize_domain("가격 안내"), "요금제 안내");
		assert_eq!(normalize_domain("요금 안내"), "요금제 안내");
		assert_eq!(normalize_domain("요금제 안내"), "요금제 안내");
		assert_eq!(normalize_domain("고객센터 연결"), "문의 연결");
		assert_eq!(normalize_domain("기능 소개"), "주요 기능 소개");
		assert_eq!(normalize_domain("주요 기능 소개"), "주요 기능 소개");
	}

	#[test]
	fn informal_endings_become_polite() {
		assert_eq!(formalize_tone("persoai가 뭐야?"), "persoai가 무엇인가요?");
		assert_eq!(formalize_tone("무료 체험 가능해?"), "무료 체험 가능한가요?");
		assert_eq!(formalize_tone("사용법 알려줘"), "사용법 알려주세요");
		assert_eq!(formalize_tone("지원 언어가 몇 개"), "지원 언어가 몇 개인가요");
	}

	#[test]
	fn earlier_tone_rules_win_over_longer_ones() {
		// Documented quirk: the short form consumes the suffix first.
		assert_eq!(formalize_tone("무료 버전 있어요?"), "무료 버전 있나요?요?");
	}

	#[test]
	fn expand_keeps_the_original_first() {
		let variants = expand("persoai가 뭐야?", 5);

		assert_eq!(variants[0], "persoai가 뭐야?");
		assert!(variants.contains(&"Perso.ai가 무엇인가요?".to_string()), "got {variants:?}");
	}

	#[test]
	fn expand_deduplicates_unchanged_stages() {
		let variants = expand("Perso.ai는 어떤 서비스인가요?", 5);

		assert_eq!(variants, vec!["Perso.ai는 어떤 서비스인가요?".to_string()]);
	}

	#[test]
	fn blank_queries_expand_to_themselves() {
		assert_eq!(expand("", 5), vec!["".to_string()]);
		assert_eq!(expand("   ", 5), vec!["   ".to_string()]);
	}

	#[test]
	fn expand_truncates_to_max_variants() {
		let variants = expand("어떻케 퍼소 가격 알려줘", 2);

		assert_eq!(variants.len(), 2);
		assert_eq!(variants[0], "어떻케 퍼소 가격 알려줘");
	}

	#[test]
	fn full_chain_is_a_fixed_point() {
		for query in [
			"persoai가 뭐야?",
			"어떻케 문의해?",
			"퍼소 요금 얼마야?",
			"기능 좀 알려줘",
			"이스트는 어떤 회사야?",
			"무료 버전 있어요?",
			"지원 언어가 몇 개야?",
		] {
			let once = normalize(query);
			let twice = normalize(&once);

			assert_eq!(once, twice, "normalize must be idempotent for {query:?}");
		}
	}

	#[test]
	fn explain_lists_every_variant() {
		let rendered = explain("persoai가 뭐야?", 5);

		assert!(rendered.starts_with("Original: 'persoai가 뭐야?'"));
		assert!(rendered.contains("Perso.ai가 무엇인가요?"));
	}
}
