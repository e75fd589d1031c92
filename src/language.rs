//! Per-document language detection and the language dispatch enum.

use crate::config::LANGUAGE_ERROR_TAG;
use crate::structures::LanguageTag;
use serde::{Deserialize, Serialize};
use whatlang::{Detector, Lang};

/// Processing branch selected from a document's language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    German,
    English,
    /// Any other tag, including the detection error marker. Processed with
    /// the German resources.
    Unknown,
}

impl Language {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "de" => Language::German,
            "en" => Language::English,
            _ => Language::Unknown,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Only consider German and English as candidates.
    #[serde(default)]
    pub restrict_to_supported: bool,
    /// Detections below this confidence (0.0..=1.0) count as failures.
    #[serde(default)]
    pub min_confidence: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            restrict_to_supported: false,
            min_confidence: 0.0,
        }
    }
}

pub struct LanguageDetector {
    detector: Detector,
    min_confidence: f64,
}

impl LanguageDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        let detector = if config.restrict_to_supported {
            Detector::with_allowlist(vec![Lang::Deu, Lang::Eng])
        } else {
            Detector::new()
        };
        Self {
            detector,
            min_confidence: config.min_confidence,
        }
    }

    /// Returns an ISO-639-1 code where one is known, the ISO-639-3 code
    /// otherwise, or `"error"` when nothing usable was detected.
    pub fn detect(&self, text: &str) -> LanguageTag {
        if text.trim().is_empty() {
            return LANGUAGE_ERROR_TAG.to_string();
        }
        match self.detector.detect(text) {
            Some(info) if info.confidence() >= self.min_confidence => {
                iso_639_1(info.lang()).to_string()
            }
            _ => LANGUAGE_ERROR_TAG.to_string(),
        }
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(&DetectorConfig::default())
    }
}

fn iso_639_1(lang: Lang) -> &'static str {
    match lang {
        Lang::Deu => "de",
        Lang::Eng => "en",
        Lang::Fra => "fr",
        Lang::Spa => "es",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Pol => "pl",
        Lang::Tur => "tr",
        other => other.code(),
    }
}
