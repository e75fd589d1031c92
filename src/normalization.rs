use crate::error::{PipelineError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

static NON_WORD_REGEX: OnceLock<Regex> = OnceLock::new();
static CAMEL_CASE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_non_word_regex() -> &'static Regex {
    NON_WORD_REGEX.get_or_init(|| Regex::new(r"\W+").unwrap())
}

fn get_camel_case_regex() -> &'static Regex {
    CAMEL_CASE_REGEX.get_or_init(|| Regex::new(r"(\p{Ll})(\p{Lu})").unwrap())
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewriteRule {
    pub name: String,
    pub pattern: String,
    pub replace: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NormalizationConfig {
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    /// NFC, camelCase splitting and punctuation stripping before lowercasing.
    #[serde(default)]
    pub clean: bool,
    #[serde(default)]
    pub rewrite_rules: Vec<RewriteRule>,
}

fn default_lowercase() -> bool {
    true
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            clean: false,
            rewrite_rules: Vec::new(),
        }
    }
}

/// Normalization settings with the rewrite rules compiled once.
#[derive(Clone, Debug)]
pub struct Normalizer {
    lowercase: bool,
    clean: bool,
    rules: Vec<(String, Regex, String)>,
}

impl Normalizer {
    /// Fails on the first rewrite rule whose pattern does not compile.
    pub fn new(config: &NormalizationConfig) -> Result<Self> {
        let rules = config
            .rewrite_rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|re| (rule.name.clone(), re, rule.replace.clone()))
                    .map_err(|e| {
                        PipelineError::Config(format!("rewrite rule '{}': {}", rule.name, e))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            lowercase: config.lowercase,
            clean: config.clean,
            rules,
        })
    }

    /// Normalizes one document's text: optional cleaning, lowercasing, then
    /// rewrite rules in order.
    pub fn normalize(&self, raw: &str) -> String {
        let mut current = if self.clean {
            clean_text(raw)
        } else {
            raw.to_string()
        };

        if self.lowercase {
            current = normalize_text(&current);
        }

        for (_, re, replace) in &self.rules {
            if re.is_match(&current) {
                current = re.replace_all(&current, replace.as_str()).into_owned();
            }
        }

        current
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            lowercase: true,
            clean: false,
            rules: Vec::new(),
        }
    }
}

/// Lowercases the full text.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
}

/// Canonical composition, camelCase boundaries split into words, every run of
/// non-word characters collapsed to one space, surrounding space trimmed.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let composed: String = text.nfc().collect();
    let spaced = get_non_word_regex().replace_all(&composed, " ");
    let split = get_camel_case_regex().replace_all(&spaced, "$1 $2");
    split.trim().to_string()
}
