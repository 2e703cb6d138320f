use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use remedy_config::Normalizer;

// Sorted for binary search.
const STOP_WORDS: &[&str] = &[
	"a", "about", "above", "after", "again", "against", "all", "also", "am", "among", "an", "and",
	"any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
	"both", "but", "by", "can", "could", "did", "do", "does", "doing", "during", "each", "few",
	"for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him",
	"his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "may", "me",
	"might", "more", "most", "must", "my", "no", "nor", "not", "now", "of", "off", "on", "once",
	"only", "or", "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so",
	"some", "such", "than", "that", "the", "their", "theirs", "them", "then", "there", "these",
	"they", "this", "those", "through", "to", "too", "under", "until", "up", "us", "very", "was",
	"we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
	"would", "you", "your", "yours",
];

/// Canonical token form of a text. `Empty` marks input with no meaningful terms left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NormalizedText {
	Empty,
	Tokens(Vec<String>),
}
impl NormalizedText {
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	pub fn tokens(&self) -> &[String] {
		match self {
			Self::Empty => &[],
			Self::Tokens(tokens) => tokens,
		}
	}
}

/// Applied identically to corpus documents and queries.
pub fn normalize(text: &str, cfg: &Normalizer) -> NormalizedText {
	let folded: String = text.nfkc().collect::<String>().to_lowercase();
	let min_len = cfg.min_token_len as usize;
	let mut tokens = Vec::new();

	for word in folded.unicode_words() {
		let word: String = word.chars().filter(|ch| ch.is_alphanumeric()).collect();

		if word.chars().count() < min_len || is_stop_word(&word, cfg) {
			continue;
		}

		let token = if cfg.stemming { stem(&word) } else { word };

		tokens.push(token);
	}

	if tokens.is_empty() { NormalizedText::Empty } else { NormalizedText::Tokens(tokens) }
}

pub fn is_stop_word(word: &str, cfg: &Normalizer) -> bool {
	STOP_WORDS.binary_search(&word).is_ok()
		|| cfg.extra_stop_words.iter().any(|extra| extra == word)
}

/// Light suffix stripping. Only one rule applies and the stem keeps at least three characters.
pub fn stem(word: &str) -> String {
	const MIN_STEM: usize = 3;

	if !word.is_ascii() || word.chars().all(|ch| ch.is_ascii_digit()) {
		return word.to_string();
	}

	for (suffix, replacement) in
		[("ies", "y"), ("sses", "ss"), ("ing", ""), ("ed", ""), ("s", "")]
	{
		let Some(base) = word.strip_suffix(suffix) else { continue };

		if suffix == "s" && (base.ends_with('s') || base.ends_with('u') || base.ends_with('i')) {
			return word.to_string();
		}
		if base.len() + replacement.len() < MIN_STEM {
			return word.to_string();
		}

		return format!("{base}{replacement}");
	}

	word.to_string()
}
