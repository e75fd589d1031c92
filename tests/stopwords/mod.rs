use jobmine_rust::language::Language;
use jobmine_rust::stopwords::*;
use std::io::Write;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_builtin_lists() {
    let lists = StopwordLists::builtin();
    assert!(lists.german.contains("und"));
    assert!(lists.english.contains("the"));
    assert!(!lists.german.is_empty());
}

#[test]
fn test_builtin_lists_keep_content_nouns() {
    let lists = StopwordLists::builtin();
    assert_eq!(lists.english.len(), 179);
    assert_eq!(lists.german.len(), 232);
    for word in ["information", "system", "research", "problem"] {
        assert!(!lists.english.contains(word), "{} is not a stopword", word);
    }
    for word in ["zeit", "jahr", "beispiel"] {
        assert!(!lists.german.contains(word), "{} is not a stopword", word);
    }
}

#[test]
fn test_language_selection_defaults_to_german() {
    let lists = StopwordLists::new(StopwordSet::new(["bei"]), StopwordSet::new(["with"]));
    let tokens = strings(&["haus", "bei", "with"]);

    assert_eq!(lists.for_language(Language::German).filter(&tokens), strings(&["haus", "with"]));
    assert_eq!(lists.for_language(Language::English).filter(&tokens), strings(&["haus", "bei"]));
    assert_eq!(lists.for_language(Language::Unknown).filter(&tokens), strings(&["haus", "with"]));
}

#[test]
fn test_filter_is_idempotent_and_keeps_order() {
    let set = StopwordSet::new(["der", "die", "das"]);
    let tokens = strings(&["die", "aufgabe", "der", "team", "das", "ziel"]);
    let once = set.filter(&tokens);
    assert_eq!(once, strings(&["aufgabe", "team", "ziel"]));
    assert_eq!(set.filter(&once), once);
}

#[test]
fn test_exact_match_only() {
    let set = StopwordSet::new(["team"]);
    let tokens = strings(&["team", "teams", "teamleiter", "steam"]);
    assert_eq!(set.filter(&tokens), strings(&["teams", "teamleiter", "steam"]));
}

#[test]
fn test_words_are_lowercased_at_load() {
    let set = StopwordSet::new(["Und", " ODER "]);
    assert!(set.contains("und"));
    assert!(set.contains("oder"));
    assert!(!set.contains("Und"));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# boilerplate").unwrap();
    writeln!(file, "Benefits").unwrap();
    writeln!(file, "").unwrap();
    writeln!(file, "bewerbung").unwrap();

    let set = StopwordSet::from_path(file.path()).unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.contains("benefits"));
    assert!(set.contains("bewerbung"));
}

#[test]
fn test_missing_file_is_fatal() {
    let config = StopwordConfig {
        german_path: Some("/nonexistent/german.txt".into()),
        ..Default::default()
    };
    assert!(StopwordLists::load(&config).is_err());
}

#[test]
fn test_custom_set_loading() {
    let empty = StopwordConfig::default();
    assert!(load_custom(&empty).unwrap().is_none());

    let config = StopwordConfig {
        custom: strings(&["Kenntnisse", "erfahrung"]),
        ..Default::default()
    };
    let set = load_custom(&config).unwrap().unwrap();
    assert!(set.contains("kenntnisse"));
    assert!(set.contains("erfahrung"));
}
