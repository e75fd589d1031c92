//! Rule-based noun lemmatization for English, in the style of WordNet's
//! morphy: an irregular-form table first, then ordered suffix detachment.

use std::collections::HashMap;
use std::sync::OnceLock;

static IRREGULAR_NOUNS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn get_irregular_nouns() -> &'static HashMap<&'static str, &'static str> {
    IRREGULAR_NOUNS.get_or_init(|| {
        [
            ("children", "child"),
            ("people", "person"),
            ("men", "man"),
            ("women", "woman"),
            ("feet", "foot"),
            ("teeth", "tooth"),
            ("mice", "mouse"),
            ("geese", "goose"),
            ("analyses", "analysis"),
            ("bases", "basis"),
            ("crises", "crisis"),
            ("diagnoses", "diagnosis"),
            ("hypotheses", "hypothesis"),
            ("theses", "thesis"),
            ("criteria", "criterion"),
            ("phenomena", "phenomenon"),
            ("indices", "index"),
            ("matrices", "matrix"),
            ("vertices", "vertex"),
            ("appendices", "appendix"),
            ("curricula", "curriculum"),
            ("media", "medium"),
            ("lives", "life"),
            ("wives", "wife"),
            ("knives", "knife"),
            ("leaves", "leaf"),
            ("halves", "half"),
            ("selves", "self"),
            ("series", "series"),
            ("species", "species"),
            ("news", "news"),
        ]
        .into_iter()
        .collect()
    })
}

// Word endings that look plural but are not
const INVARIANT_ENDINGS: &[&str] = &["ss", "us", "is", "ics", "ous"];

// (suffix, replacement), most specific first
const NOUN_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("s", ""),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct NounLemmatizer;

impl NounLemmatizer {
    pub fn new() -> Self {
        Self
    }

    /// Reduces a lowercase English noun to its singular base form. Words the
    /// rules do not cover come back unchanged.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = get_irregular_nouns().get(word) {
            return (*base).to_string();
        }
        if word.chars().count() <= 3 || INVARIANT_ENDINGS.iter().any(|e| word.ends_with(e)) {
            return word.to_string();
        }
        for (suffix, replacement) in NOUN_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.chars().count() >= 2 {
                    return format!("{}{}", stem, replacement);
                }
            }
        }
        word.to_string()
    }
}
