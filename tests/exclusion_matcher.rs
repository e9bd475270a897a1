use quick_gestures::mouse_gestures::ExclusionMatcher;

fn matcher(patterns: &[&str]) -> ExclusionMatcher {
    let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
    ExclusionMatcher::new(&patterns)
}

#[test]
fn wildcards_match_whole_url() {
    let m = matcher(&["*.test.com/*"]);
    assert!(m.is_excluded("https://www.test.com/page"));
    assert!(m.is_excluded("HTTPS://WWW.TEST.COM/"));
    assert!(!m.is_excluded("https://test.com/page"));
    assert!(!m.is_excluded("https://www.test.com"));
}

#[test]
fn question_mark_matches_one_character() {
    let m = matcher(&["https://site?.org/"]);
    assert!(m.is_excluded("https://site1.org/"));
    assert!(!m.is_excluded("https://site12.org/"));
}

#[test]
fn regex_metacharacters_are_literal() {
    let m = matcher(&["https://a.b/(x)+[y]"]);
    assert!(m.is_excluded("https://a.b/(x)+[y]"));
    assert!(!m.is_excluded("https://aXb/xxy"));
}

#[test]
fn blank_patterns_are_ignored() {
    let m = matcher(&["", "   "]);
    assert!(m.is_empty());
    assert!(!m.is_excluded(""));
}

#[test]
fn update_replaces_patterns() {
    let mut m = matcher(&["https://one.example/*"]);
    m.update_patterns(&["https://two.example/*".to_string()]);
    assert_eq!(m.len(), 1);
    assert!(!m.is_excluded("https://one.example/a"));
    assert!(m.is_excluded("https://two.example/a"));
    assert!(ExclusionMatcher::validate_pattern("*://*/admin?").is_ok());
}
