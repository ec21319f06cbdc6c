//! Deterministic post-processing of generated text into a quest suggestion.
//!
//! The first sentence becomes the title, the remaining sentences become the
//! description. Sentences are split on ". ". Nothing here can fail: text
//! that yields no usable sentence falls back to fixed placeholders.

use graphite_types::suggestion::QuestSuggestion;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 50;

/// Maximum description length in characters, closing period included.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

pub const FALLBACK_TITLE: &str = "Mystery Quest";

pub const FALLBACK_DESCRIPTION: &str = "Embark on an adventure and see where it leads.";

/// Turn raw generated text into a title/description pair.
///
/// Text-generation endpoints echo the prompt in front of the continuation;
/// when `raw` starts with `prompt` that prefix is dropped first.
pub fn suggestion_from_generated(raw: &str, prompt: &str) -> QuestSuggestion {
    let text = raw.strip_prefix(prompt).unwrap_or(raw);
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sentences = text
        .split(". ")
        .map(|s| s.trim().trim_end_matches('.').trim())
        .filter(|s| !s.is_empty());

    let Some(first) = sentences.next() else {
        return QuestSuggestion {
            title: FALLBACK_TITLE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
        };
    };

    let rest: Vec<&str> = sentences.collect();
    let description = if rest.is_empty() {
        FALLBACK_DESCRIPTION.to_string()
    } else {
        finish_description(&rest.join(". "))
    };

    QuestSuggestion {
        title: truncate_chars(first, TITLE_MAX_CHARS).trim_end().to_string(),
        description,
    }
}

/// Cap the description and make sure it ends in exactly one period.
///
/// When the cap cuts through a word, the partial word is dropped.
fn finish_description(text: &str) -> String {
    let text = text.trim();
    if text.ends_with('.') && text.chars().count() <= DESCRIPTION_MAX_CHARS {
        return text.to_string();
    }

    // Leave room for the closing period.
    let limit = DESCRIPTION_MAX_CHARS - 1;
    let mut body = text.to_string();
    if text.chars().count() > limit {
        let cut = truncate_chars(text, limit);
        let cut_mid_word = text
            .chars()
            .nth(limit)
            .is_some_and(|c| !c.is_whitespace());
        body = match cut.rfind(' ') {
            Some(idx) if cut_mid_word && idx > 0 => cut[..idx].to_string(),
            _ => cut.to_string(),
        };
    }

    let body = body.trim_end_matches(|c: char| {
        c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '-' | '!' | '?')
    });
    if body.is_empty() {
        return FALLBACK_DESCRIPTION.to_string();
    }
    format!("{body}.")
}

/// Borrow at most `max` characters of `s`, respecting char boundaries.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
