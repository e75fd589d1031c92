//! Part-of-speech tagging and noun extraction.
//!
//! A tagger model is a tab separated lexicon, one `word<TAB>lemma<TAB>tag`
//! entry per line (`#` starts a comment). German tags follow STTS, English
//! tags the Penn Treebank set. Words missing from the model are tagged by a
//! suffix guesser for the model's language.

use crate::config::{DEFAULT_KEEP_TOKENS, ENGLISH_NOUN_TAGS, GERMAN_NOUN_TAGS};
use crate::error::{PipelineError, Result};
use crate::language::Language;
use crate::lemmatizer::NounLemmatizer;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub lemma: String,
    pub tag: String,
}

/// Tags a token sequence. Implementations return exactly one entry per
/// input token, in input order.
pub trait Tagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Vec<TaggedToken>;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaggerConfig {
    #[serde(default)]
    pub german_model: Option<PathBuf>,
    #[serde(default)]
    pub english_model: Option<PathBuf>,
    /// Tokens kept whatever their tag.
    #[serde(default = "default_keep_tokens")]
    pub keep_tokens: Vec<String>,
    #[serde(default = "default_german_tags")]
    pub german_tags: Vec<String>,
    #[serde(default = "default_english_tags")]
    pub english_tags: Vec<String>,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            german_model: None,
            english_model: None,
            keep_tokens: default_keep_tokens(),
            german_tags: default_german_tags(),
            english_tags: default_english_tags(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_keep_tokens() -> Vec<String> {
    to_strings(DEFAULT_KEEP_TOKENS)
}

fn default_german_tags() -> Vec<String> {
    to_strings(GERMAN_NOUN_TAGS)
}

fn default_english_tags() -> Vec<String> {
    to_strings(ENGLISH_NOUN_TAGS)
}

#[derive(Debug, Clone)]
struct LexiconEntry {
    lemma: Option<String>,
    tag: String,
}

/// Lexicon lookup with a suffix-rule fallback.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    language: Language,
    lexicon: HashMap<String, LexiconEntry>,
    lemmatizer: NounLemmatizer,
}

impl LexiconTagger {
    /// Tagger without a model; every word goes through the guesser.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            lexicon: HashMap::new(),
            lemmatizer: NounLemmatizer::new(),
        }
    }

    /// Builds a tagger from `(word, lemma, tag)` entries. An empty lemma
    /// means "derive it".
    pub fn from_entries<I, S>(language: Language, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: AsRef<str>,
    {
        let mut tagger = Self::new(language);
        for (word, lemma, tag) in entries {
            tagger.insert(word.as_ref(), lemma.as_ref(), tag.as_ref());
        }
        tagger
    }

    /// Loads a model file. Any read or parse problem is fatal.
    pub fn from_path(language: Language, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .comment(Some(b'#'))
            .flexible(true)
            .quoting(false)
            .from_path(path)
            .map_err(|e| PipelineError::resource(path, e))?;

        let mut tagger = Self::new(language);
        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| PipelineError::resource(path, e))?;
            match (record.get(0), record.get(1), record.get(2)) {
                (Some(word), Some(lemma), Some(tag)) if !word.is_empty() && !tag.is_empty() => {
                    tagger.insert(word, lemma, tag);
                }
                _ => {
                    return Err(PipelineError::resource(
                        path,
                        format!("record {} is not word<TAB>lemma<TAB>tag", line + 1),
                    ))
                }
            }
        }

        info!(
            "Loaded {:?} tagger model from {:?} ({} entries)",
            language,
            path,
            tagger.len()
        );
        Ok(tagger)
    }

    pub fn insert(&mut self, word: &str, lemma: &str, tag: &str) {
        let lemma = lemma.trim();
        self.lexicon.insert(
            word.to_lowercase(),
            LexiconEntry {
                lemma: (!lemma.is_empty()).then(|| lemma.to_string()),
                tag: tag.trim().to_string(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    fn tag_word(&self, word: &str) -> TaggedToken {
        let (tag, lemma) = match self.lexicon.get(word) {
            Some(entry) => (entry.tag.clone(), entry.lemma.clone()),
            None => (self.guess_tag(word).to_string(), None),
        };
        let lemma = lemma.unwrap_or_else(|| self.derive_lemma(word, &tag));
        TaggedToken {
            word: word.to_string(),
            lemma,
            tag,
        }
    }

    fn guess_tag(&self, word: &str) -> &'static str {
        match self.language {
            Language::English => guess_english(word),
            Language::German | Language::Unknown => guess_german(word),
        }
    }

    fn derive_lemma(&self, word: &str, tag: &str) -> String {
        match self.language {
            Language::English if tag.starts_with("NN") => self.lemmatizer.lemmatize(word),
            Language::English => word.to_string(),
            Language::German | Language::Unknown => german_noun_lemma(word),
        }
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Vec<TaggedToken> {
        tokens.iter().map(|t| self.tag_word(t)).collect()
    }
}

const ENGLISH_ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "al", "less", "ish", "ary",
];
const ENGLISH_NON_PLURAL_ENDINGS: &[&str] = &["ss", "us", "is", "ics"];

fn guess_english(word: &str) -> &'static str {
    let len = word.chars().count();
    if word.chars().all(|c| c.is_ascii_digit()) {
        "CD"
    } else if len > 4 && word.ends_with("ly") {
        "RB"
    } else if len > 4 && ENGLISH_ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        "JJ"
    } else if len > 4 && word.ends_with("ed") {
        "VBN"
    } else if len > 3
        && word.ends_with('s')
        && !ENGLISH_NON_PLURAL_ENDINGS.iter().any(|s| word.ends_with(s))
    {
        "NNS"
    } else {
        "NN"
    }
}

const GERMAN_NOUN_SUFFIXES: &[&str] = &[
    "ung", "ungen", "heit", "heiten", "keit", "keiten", "schaft", "schaften", "tion",
    "tionen", "tät", "täten", "ismus", "nis", "nisse", "nissen", "ment", "ments", "ik",
    "enz", "anz", "ling", "tum", "erin", "innen",
];
const GERMAN_ADJECTIVE_SUFFIXES: &[&str] = &[
    "ig", "ige", "igen", "iger", "iges", "lich", "liche", "lichen", "licher", "liches",
    "isch", "ische", "ischen", "ischer", "bar", "bare", "baren", "sam", "los", "lose",
    "losen", "haft", "iv", "ive", "iven",
];
const GERMAN_VERB_SUFFIXES: &[&str] = &["ieren", "iert", "ierst"];

// Plural ending -> singular ending for the productive noun suffixes
const GERMAN_PLURAL_RULES: &[(&str, &str)] = &[
    ("ungen", "ung"),
    ("heiten", "heit"),
    ("keiten", "keit"),
    ("schaften", "schaft"),
    ("tionen", "tion"),
    ("täten", "tät"),
    ("nissen", "nis"),
    ("nisse", "nis"),
    ("innen", "in"),
    ("ments", "ment"),
];

fn guess_german(word: &str) -> &'static str {
    let len = word.chars().count();
    if word.chars().all(|c| c.is_ascii_digit()) {
        "CARD"
    } else if len < 2 {
        "XY"
    } else if GERMAN_NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        "NN"
    } else if len > 4 && GERMAN_ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        "ADJA"
    } else if GERMAN_VERB_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        "VVINF"
    } else {
        "NN"
    }
}

fn german_noun_lemma(word: &str) -> String {
    for (plural, singular) in GERMAN_PLURAL_RULES {
        if let Some(stem) = word.strip_suffix(plural) {
            if !stem.is_empty() {
                return format!("{}{}", stem, singular);
            }
        }
    }
    word.to_string()
}

/// Keeps noun-like tokens (plus the allow-list) and emits their lowercased lemma.
#[derive(Debug, Clone)]
pub struct NounFilter {
    german_tags: HashSet<String>,
    english_tags: HashSet<String>,
    keep_tokens: HashSet<String>,
}

impl NounFilter {
    pub fn new(config: &TaggerConfig) -> Self {
        Self {
            german_tags: config.german_tags.iter().cloned().collect(),
            english_tags: config.english_tags.iter().cloned().collect(),
            keep_tokens: config.keep_tokens.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    pub fn extract(&self, tagged: &[TaggedToken], language: Language) -> Vec<String> {
        let tags = match language {
            Language::English => &self.english_tags,
            Language::German | Language::Unknown => &self.german_tags,
        };
        tagged
            .iter()
            .filter(|t| tags.contains(&t.tag) || self.keep_tokens.contains(&t.word))
            .map(|t| t.lemma.to_lowercase())
            .collect()
    }
}

impl Default for NounFilter {
    fn default() -> Self {
        Self::new(&TaggerConfig::default())
    }
}

/// One tagger per processing branch.
pub struct TaggerSet {
    pub german: Box<dyn Tagger>,
    pub english: Box<dyn Tagger>,
}

impl TaggerSet {
    pub fn new(german: Box<dyn Tagger>, english: Box<dyn Tagger>) -> Self {
        Self { german, english }
    }

    /// Loads configured models; languages without a model use the guesser.
    pub fn load(config: &TaggerConfig) -> Result<Self> {
        let german = match &config.german_model {
            Some(path) => LexiconTagger::from_path(Language::German, path)?,
            None => LexiconTagger::new(Language::German),
        };
        let english = match &config.english_model {
            Some(path) => LexiconTagger::from_path(Language::English, path)?,
            None => LexiconTagger::new(Language::English),
        };
        Ok(Self::new(Box::new(german), Box::new(english)))
    }

    pub fn for_language(&self, language: Language) -> &dyn Tagger {
        match language {
            Language::English => self.english.as_ref(),
            Language::German | Language::Unknown => self.german.as_ref(),
        }
    }
}

impl Default for TaggerSet {
    fn default() -> Self {
        Self::new(
            Box::new(LexiconTagger::new(Language::German)),
            Box::new(LexiconTagger::new(Language::English)),
        )
    }
}
