//! Part-of-speech tagger used to pick skill-like nouns out of free text.
//!
//! `LexiconTagger` is a deterministic, rule-based English tagger: closed-class
//! word lists, a small open-class lexicon, capitalization and suffix rules.
//! It is built once at startup and shared read-only behind `Arc<dyn Tagger>`.

use std::collections::HashMap;

/// Coarse part-of-speech tags (a subset of the Universal Dependencies set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    Pronoun,
    Adposition,
    Conjunction,
    Particle,
    Numeral,
    Punctuation,
}

/// A token of the input text with its assigned tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken<'a> {
    pub text: &'a str,
    pub tag: PartOfSpeech,
}

pub trait Tagger: Send + Sync {
    fn tag<'a>(&self, text: &'a str) -> Vec<TaggedToken<'a>>;
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "any", "some", "no",
    "another", "all", "both", "either", "neither", "such", "what", "which", "whatever",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us", "our", "ours",
    "ourselves", "they", "them", "their", "theirs", "themselves", "who", "whom", "whose",
    "someone", "anyone", "everyone", "something", "anything", "everything", "nothing",
];

const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "without", "within", "from", "of", "about", "into",
    "onto", "over", "under", "across", "through", "throughout", "between", "among", "during",
    "after", "before", "against", "toward", "towards", "upon", "via", "per", "like", "around",
    "along", "behind", "beyond", "despite", "except", "inside", "outside", "since", "until",
    "above", "below", "near", "off", "up", "down", "out",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "yet", "so", "because", "although", "though", "while", "whereas",
    "if", "unless", "whether", "than", "as", "when", "where", "whereby",
];

const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must", "won't", "can't", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't",
    "weren't", "i'm", "we're", "you're", "they're", "it's", "i've", "we've",
];

const MODALS: &[&str] = &[
    "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];

const PARTICLES: &[&str] = &["to", "not", "n't"];

const VERBS: &[&str] = &[
    "achieve", "achieved", "analyze", "analyzed", "apply", "applied", "architect", "architected",
    "automate", "automated", "build", "built", "collaborate", "collaborated", "communicate",
    "contribute", "contributed", "create", "created", "debug", "debugged", "define", "defined",
    "deliver", "delivered", "deploy", "deployed", "develop", "developed", "drive", "drove",
    "driven", "enable", "enabled", "enhance", "enhanced", "ensure", "ensured", "establish",
    "established", "get", "got", "gain", "gained", "grow", "grew", "help", "helped", "identify",
    "identified", "implement", "implemented", "improve", "improved", "increase", "increased",
    "integrate", "integrated", "join", "joined", "know", "knew", "known", "launch", "launched",
    "lead", "led", "learn", "learned", "make", "made", "maintain", "maintained", "manage",
    "managed", "mentor", "mentored", "migrate", "migrated", "optimize", "optimized", "own",
    "owned", "partner", "partnered", "provide", "provided", "reduce", "reduced", "seek",
    "sought", "ship", "shipped", "solve", "solved", "support", "supported", "take", "took",
    "taken", "use", "used", "want", "work", "worked", "write", "wrote", "written", "looking",
    "join", "thrive", "love", "enjoy", "offer", "offered", "require", "required", "prefer",
];

const ADJECTIVES: &[&str] = &[
    "agile", "analytical", "best", "better", "big", "competitive", "complex", "creative",
    "critical", "cross-functional", "current", "digital", "distributed", "dynamic", "early",
    "effective", "efficient", "excellent", "experienced", "expert", "familiar", "fast", "flexible",
    "full", "functional", "global", "good", "great", "high", "hybrid", "independent",
    "innovative", "internal", "junior", "key", "large", "latest", "long", "main",
    "modern", "multiple", "new", "other", "passionate", "plus", "previous", "principal",
    "proficient", "professional", "proven", "real", "relevant", "remote", "scalable", "senior",
    "several", "small", "social", "solid", "strong", "successful", "technical", "top", "various",
    "visual", "new", "own", "able", "many", "much", "more", "most", "few", "less", "least",
    "same", "different", "similar", "following", "preferred", "required",
];

const ADVERBS: &[&str] = &[
    "also", "always", "currently", "daily", "effectively", "especially", "ever", "highly",
    "just", "never", "now", "often", "only", "primarily", "quickly", "really", "recently",
    "still", "then", "there", "too", "very", "well", "here", "already", "again", "however",
    "together", "closely",
];

/// Words that the suffix rules would otherwise tag as something other than a noun.
const NOUNS: &[&str] = &[
    "accounting", "advertising", "anomaly", "assembly", "branding", "building", "computing",
    "consulting", "engineering", "executive", "family", "funding", "hiring", "initiative",
    "learning", "marketing", "modeling", "networking", "onboarding", "planning", "processing",
    "programming", "recruiting", "scripting", "supply", "testing", "training", "understanding",
    "need", "needs", "background", "bachelor", "master", "degree", "experience", "knowledge",
    "design", "sketch", "role", "team", "skills", "skill", "objective", "detective", "archive",
    "alternative", "representative", "deadline", "feedback",
];

/// Nouns that act as verbs right after a pronoun ("we need", "it needs").
const PRONOUN_VERBS: &[&str] = &["need", "needs"];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ical", "less"];

const SENTENCE_ENDERS: &[char] = &['.', '!', '?', ':', ';'];

/// Rule-based English tagger. Deterministic for a given input.
pub struct LexiconTagger {
    lexicon: HashMap<&'static str, PartOfSpeech>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        let mut lexicon = HashMap::new();
        // Later groups win, so the noun overrides go last.
        let groups: [(&[&str], PartOfSpeech); 10] = [
            (VERBS, PartOfSpeech::Verb),
            (ADJECTIVES, PartOfSpeech::Adjective),
            (ADVERBS, PartOfSpeech::Adverb),
            (CONJUNCTIONS, PartOfSpeech::Conjunction),
            (ADPOSITIONS, PartOfSpeech::Adposition),
            (DETERMINERS, PartOfSpeech::Determiner),
            (PRONOUNS, PartOfSpeech::Pronoun),
            (AUXILIARIES, PartOfSpeech::Auxiliary),
            (PARTICLES, PartOfSpeech::Particle),
            (NOUNS, PartOfSpeech::Noun),
        ];
        for (words, tag) in groups {
            for word in words {
                lexicon.insert(*word, tag);
            }
        }
        Self { lexicon }
    }

    fn tag_word(
        &self,
        word: &str,
        sentence_start: bool,
        prev: Option<(&str, PartOfSpeech)>,
        in_noun_phrase: bool,
    ) -> PartOfSpeech {
        if is_numeral(word) {
            return PartOfSpeech::Numeral;
        }
        if is_acronym(word) {
            return PartOfSpeech::ProperNoun;
        }

        let lower = word.to_lowercase();
        let known = self.lexicon.get(lower.as_str()).copied();

        // Function words keep their tag even when capitalized ("I", "The").
        if let Some(tag) = known.filter(|tag| is_closed_class(*tag)) {
            return tag;
        }
        if !sentence_start && starts_uppercase(word) {
            return PartOfSpeech::ProperNoun;
        }
        let prev_tag = prev.map(|(_, tag)| tag);

        if let Some(tag) = known {
            // "a software architect", "years of work", "the lead role"
            if tag == PartOfSpeech::Verb && in_noun_phrase {
                return PartOfSpeech::Noun;
            }
            if prev_tag == Some(PartOfSpeech::Pronoun) && PRONOUN_VERBS.contains(&lower.as_str()) {
                return PartOfSpeech::Verb;
            }
            return tag;
        }

        if let Some((prev_word, PartOfSpeech::Auxiliary)) = prev {
            if MODALS.contains(&prev_word.to_lowercase().as_str()) {
                return PartOfSpeech::Verb;
            }
        }

        self.tag_by_suffix(&lower, prev_tag)
    }

    fn tag_by_suffix(&self, lower: &str, prev_tag: Option<PartOfSpeech>) -> PartOfSpeech {
        let after_determiner = matches!(prev_tag, Some(PartOfSpeech::Determiner));
        let len = lower.chars().count();

        if len > 4 && lower.ends_with("ly") {
            return PartOfSpeech::Adverb;
        }
        if len > 5 && lower.ends_with("ing") {
            return if after_determiner {
                PartOfSpeech::Noun
            } else {
                PartOfSpeech::Verb
            };
        }
        if len > 4 && lower.ends_with("ed") {
            return if after_determiner {
                PartOfSpeech::Adjective
            } else {
                PartOfSpeech::Verb
            };
        }
        if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return PartOfSpeech::Adjective;
        }
        if len > 5 && (lower.ends_with("ize") || lower.ends_with("ify")) {
            return PartOfSpeech::Verb;
        }
        if self.is_third_person_verb(lower) {
            return PartOfSpeech::Verb;
        }
        PartOfSpeech::Noun
    }

    /// Third-person forms of a known verb: "builds", "manages", "applies".
    fn is_third_person_verb(&self, lower: &str) -> bool {
        let is_verb = |stem: &str| self.lexicon.get(stem) == Some(&PartOfSpeech::Verb);
        if let Some(stem) = lower.strip_suffix("ies") {
            if is_verb(&format!("{stem}y")) {
                return true;
            }
        }
        if let Some(stem) = lower.strip_suffix("es") {
            if is_verb(stem) {
                return true;
            }
        }
        match lower.strip_suffix('s') {
            Some(stem) if !stem.ends_with('s') => is_verb(stem),
            _ => false,
        }
    }
}

impl Tagger for LexiconTagger {
    fn tag<'a>(&self, text: &'a str) -> Vec<TaggedToken<'a>> {
        let mut tagged: Vec<TaggedToken<'a>> = Vec::new();
        let mut sentence_start = true;

        for token in tokenize(text) {
            match token {
                Token::Newline => sentence_start = true,
                Token::Symbol(symbol) => {
                    tagged.push(TaggedToken {
                        text: symbol,
                        tag: PartOfSpeech::Punctuation,
                    });
                    if symbol.chars().all(|c| SENTENCE_ENDERS.contains(&c)) {
                        sentence_start = true;
                    }
                }
                Token::Word(word) => {
                    let prev = tagged
                        .last()
                        .filter(|t| t.tag != PartOfSpeech::Punctuation)
                        .map(|t| (t.text, t.tag));
                    let nominal = !sentence_start && in_noun_phrase(&tagged);
                    let tag = self.tag_word(word, sentence_start, prev, nominal);
                    tagged.push(TaggedToken { text: word, tag });
                    sentence_start = false;
                }
            }
        }

        tagged
    }
}

/// True when the next word sits inside a noun phrase: right after a
/// determiner, adposition or adjective, or after a run of nouns opened by a
/// determiner or adposition.
fn in_noun_phrase(tagged: &[TaggedToken<'_>]) -> bool {
    let mut preceding = tagged.iter().rev();
    match preceding.next().map(|t| t.tag) {
        Some(PartOfSpeech::Determiner | PartOfSpeech::Adposition | PartOfSpeech::Adjective) => {
            true
        }
        Some(PartOfSpeech::Noun) => preceding
            .find(|t| !matches!(t.tag, PartOfSpeech::Noun | PartOfSpeech::Adjective))
            .is_some_and(|t| {
                matches!(t.tag, PartOfSpeech::Determiner | PartOfSpeech::Adposition)
            }),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Symbol(&'a str),
    Newline,
}

/// Splits text into words, single-character symbols and newline markers.
///
/// Words may carry internal `.-_'/` (`node.js`, `ci/cd`, `don't`) and
/// trailing `+`/`#` (`c++`, `c#`).
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, c) = chars[i];

        if c == '\n' {
            tokens.push(Token::Newline);
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if !c.is_alphanumeric() {
            let end = start + c.len_utf8();
            tokens.push(Token::Symbol(&text[start..end]));
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() {
            let ch = chars[j].1;
            let next_is_alnum = chars.get(j + 1).is_some_and(|(_, n)| n.is_alphanumeric());
            let joiner = matches!(ch, '.' | '-' | '_' | '\'' | '/');
            if ch.is_alphanumeric() || (joiner && next_is_alnum) {
                j += 1;
            } else {
                break;
            }
        }
        while j < chars.len() && matches!(chars[j].1, '+' | '#') {
            j += 1;
        }

        let end = chars.get(j).map(|(idx, _)| *idx).unwrap_or(text.len());
        tokens.push(Token::Word(&text[start..end]));
        i = j;
    }

    tokens
}

fn is_closed_class(tag: PartOfSpeech) -> bool {
    matches!(
        tag,
        PartOfSpeech::Determiner
            | PartOfSpeech::Pronoun
            | PartOfSpeech::Adposition
            | PartOfSpeech::Conjunction
            | PartOfSpeech::Auxiliary
            | PartOfSpeech::Particle
    )
}

fn is_numeral(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '+' | '%' | '-' | '/'))
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}
