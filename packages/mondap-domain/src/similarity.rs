//! Token-order-insensitive lexical similarity.
//!
//! Both strings are lowercased, split into unicode words, sorted, and
//! rejoined before a normalized Levenshtein ratio is computed. Sorting
//! makes "가격 Perso.ai" and "Perso.ai 가격" compare as equal.

use unicode_segmentation::UnicodeSegmentation;

/// Similarity in `[0.0, 1.0]` between two strings, ignoring token order
/// and punctuation. Two empty strings compare as `1.0`.
pub fn token_sort_ratio(a: &str, b: &str) -> f32 {
	let left = sorted_tokens(a);
	let right = sorted_tokens(b);

	if left.is_empty() && right.is_empty() {
		return 1.0;
	}
	if left.is_empty() || right.is_empty() {
		return 0.0;
	}

	let left_chars = left.chars().collect::<Vec<_>>();
	let right_chars = right.chars().collect::<Vec<_>>();
	let distance = levenshtein(&left_chars, &right_chars);
	let longest = left_chars.len().max(right_chars.len());

	1.0 - distance as f32 / longest as f32
}

fn sorted_tokens(text: &str) -> String {
	let mut tokens = text.to_lowercase().unicode_words().map(str::to_string).collect::<Vec<_>>();

	tokens.sort_unstable();

	tokens.join(" ")
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
	if a.is_empty() {
		return b.len();
	}
	if b.is_empty() {
		return a.len();
	}

	let mut row = (0..=b.len()).collect::<Vec<usize>>();

	for (i, &ca) in a.iter().enumerate() {
		let mut previous_diagonal = row[0];

		row[0] = i + 1;

		for (j, &cb) in b.iter().enumerate() {
			let substitution = previous_diagonal + usize::from(ca != cb);

			previous_diagonal = row[j + 1];
			row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
		}
	}

	row[b.len()]
}
