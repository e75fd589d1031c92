use regex::Regex;
use std::sync::OnceLock;

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_token_regex() -> &'static Regex {
    // \w is Unicode-aware, so umlauts and ß stay inside tokens
    TOKEN_REGEX.get_or_init(|| Regex::new(r"\w+").unwrap())
}

/// Splits text into runs of word characters (letters, digits, underscore).
pub fn tokenize(text: &str) -> Vec<String> {
    get_token_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Adjacent token pairs joined by a single space.
pub fn token_combinations(tokens: &[String]) -> Vec<String> {
    tokens
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect()
}
