//! Keyword bridge: English product titles to localized sourcing search terms.

use std::sync::LazyLock;

use regex::Regex;

use crate::dictionary::KeywordDictionary;

const MAX_KEYWORDS: usize = 3;
const MAX_LOCALIZED_TERMS: usize = 5;
const SINGLE_WORD_WINDOW: usize = 5;
const MIN_WORD_LEN: usize = 3;

static BRAND_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z]+\s+(?:brand|official)\b").expect("valid brand suffix regex")
});
static AUTHENTICITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:genuine|original|authentic)\b").expect("valid authenticity regex")
});
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("valid year regex"));
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]+\b").expect("valid word regex"));

/// Both sides of a bridged title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgedKeywords {
    pub english: Vec<String>,
    pub localized: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct KeywordBridge {
    dictionary: KeywordDictionary,
}

impl KeywordBridge {
    #[must_use]
    pub fn new(dictionary: KeywordDictionary) -> Self {
        Self { dictionary }
    }

    #[must_use]
    pub fn dictionary(&self) -> &KeywordDictionary {
        &self.dictionary
    }

    /// Extracts at most three search keywords from an English title.
    ///
    /// Adjacent word pairs that are dictionary phrases come first, in title
    /// order. Single words from the first five significant words follow,
    /// unless the word already leads a kept keyword.
    #[must_use]
    pub fn extract_keywords(&self, title: &str) -> Vec<String> {
        let mut text = title.to_lowercase();
        for pattern in [&*BRAND_SUFFIX_RE, &*AUTHENTICITY_RE, &*YEAR_RE] {
            text = pattern.replace_all(&text, " ").into_owned();
        }

        let words: Vec<&str> = WORD_RE
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|w| w.len() >= MIN_WORD_LEN && !self.dictionary.is_noise(w))
            .collect();

        let mut keywords: Vec<String> = Vec::new();
        for pair in words.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            if self.dictionary.contains_phrase(&bigram) && !keywords.contains(&bigram) {
                keywords.push(bigram);
            }
        }

        for word in words.iter().take(SINGLE_WORD_WINDOW) {
            let leads_existing = keywords
                .iter()
                .any(|k| k.split(' ').next() == Some(*word));
            if !leads_existing {
                keywords.push((*word).to_string());
            }
        }

        keywords.truncate(MAX_KEYWORDS);
        keywords
    }

    /// Maps keywords to localized search terms.
    ///
    /// An exact dictionary hit contributes every mapped term; otherwise the
    /// first term of the first overlapping phrase is used. The result is
    /// deduplicated in first-seen order, capped at five, and never empty.
    #[must_use]
    pub fn translate<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        let mut push = |term: &str| {
            if !terms.iter().any(|t| t == term) {
                terms.push(term.to_string());
            }
        };

        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                continue;
            }
            if let Some(mapped) = self.dictionary.exact(&keyword) {
                mapped.iter().for_each(|term| push(term.as_str()));
            } else if let Some(first) = self.dictionary.first_partial(&keyword) {
                push(first);
            }
        }

        terms.truncate(MAX_LOCALIZED_TERMS);
        if terms.is_empty() {
            terms.push(self.dictionary.fallback().to_string());
        }
        terms
    }

    #[must_use]
    pub fn bridge(&self, title: &str) -> BridgedKeywords {
        let english = self.extract_keywords(title);
        let localized = self.translate(&english);
        BridgedKeywords { english, localized }
    }
}
