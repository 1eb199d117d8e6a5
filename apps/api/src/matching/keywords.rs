//! Keyword extraction — reduces free text to the bag of common nouns used as
//! a stand-in for "skills".

use std::fmt;
use std::sync::Arc;

use crate::matching::tagger::{PartOfSpeech, Tagger};

/// Lowercase noun tokens in tagger order. Duplicates are kept on purpose:
/// repeated nouns carry repeated term-frequency weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordBag {
    tokens: Vec<String>,
}

impl KeywordBag {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl fmt::Display for KeywordBag {
    /// Space-joined form fed to the vectorizer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl FromIterator<String> for KeywordBag {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Keeps the words a tagger marks as common nouns. Cheap to clone; the tagger is shared.
#[derive(Clone)]
pub struct KeywordExtractor {
    tagger: Arc<dyn Tagger>,
}

impl KeywordExtractor {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self { tagger }
    }

    pub fn extract(&self, text: &str) -> KeywordBag {
        self.tagger
            .tag(text)
            .into_iter()
            .filter(|token| token.tag == PartOfSpeech::Noun)
            .map(|token| token.text.to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::tagger::{LexiconTagger, TaggedToken};

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::new(Arc::new(LexiconTagger::new()))
    }

    /// Tags every whitespace-separated word with a fixed tag sequence.
    struct ScriptedTagger(Vec<PartOfSpeech>);

    impl Tagger for ScriptedTagger {
        fn tag<'a>(&self, text: &'a str) -> Vec<TaggedToken<'a>> {
            text.split_whitespace()
                .zip(self.0.iter().cycle())
                .map(|(word, tag)| TaggedToken { text: word, tag: *tag })
                .collect()
        }
    }

    #[test]
    fn test_extracts_lowercase_nouns_in_order() {
        let bag = extractor().extract("Experienced engineer with python and database skills");
        assert_eq!(bag.to_string(), "engineer python database skills");
    }

    #[test]
    fn test_keeps_duplicates() {
        let bag = extractor().extract("python scripts, python services and python tooling");
        let pythons = bag.tokens().iter().filter(|t| *t == "python").count();
        assert_eq!(pythons, 3);
    }

    #[test]
    fn test_only_common_nouns_survive() {
        let tagger = ScriptedTagger(vec![
            PartOfSpeech::Noun,
            PartOfSpeech::ProperNoun,
            PartOfSpeech::Verb,
        ]);
        let bag = KeywordExtractor::new(Arc::new(tagger)).extract("Rust Mozilla ships Cargo Ferris runs");
        assert_eq!(bag.tokens(), ["rust".to_string(), "cargo".to_string()]);
    }

    #[test]
    fn test_empty_text_gives_empty_bag() {
        let bag = extractor().extract("");
        assert!(bag.is_empty());
        assert_eq!(bag.to_string(), "");
    }
}
