use email_scrape::extractor::{CANDIDATE_SEPARATOR, extract, extract_augmented, possible_email_windows};

fn addresses(text: &str) -> Vec<String> {
    extract(text).into_iter().map(|a| a.to_string()).collect()
}

#[test]
fn test_extract_plain_addresses() {
    assert_eq!(
        addresses("write to jane@example.org or john.doe@mail.example.com."),
        ["jane@example.org", "john.doe@mail.example.com"]
    );
}

#[test]
fn test_extract_requires_known_tld() {
    assert!(extract("hello@world.notarealtld").is_empty());
    assert!(extract("hello@localhost").is_empty());
    assert!(extract("A@B.COM").is_empty());
}

#[test]
fn test_extract_rejects_partial_tld() {
    assert!(extract("a@example.coma").is_empty());
    assert!(extract("a@example.com-").is_empty());
}

#[test]
fn test_extract_cuts_back_to_rightmost_tld() {
    assert_eq!(addresses("x@world.com.nope"), ["x@world.com"]);
    assert_eq!(addresses("x@sub.example.co.uk"), ["x@sub.example.co.uk"]);
}

#[test]
fn test_extract_local_part_grammar() {
    assert_eq!(
        addresses("o'brien+news@example.ie"),
        ["o'brien+news@example.ie"]
    );
    assert_eq!(addresses("j..x@y.com"), ["x@y.com"]);
    assert!(extract(".a.@b.de").is_empty());
}

#[test]
fn test_extract_consumes_terminator() {
    assert_eq!(addresses("a@b.com/c@d.com"), ["a@b.com", "c@d.com"]);
}

#[test]
fn test_extract_rescans_after_failed_domain() {
    assert_eq!(addresses("a@b.notld.c@d.com"), ["b.notld.c@d.com"]);
}

#[test]
fn test_extract_is_case_sensitive() {
    assert_eq!(
        addresses("Jane@Example.com jane@example.com"),
        ["Jane@Example.com", "jane@example.com"]
    );
}

#[test]
fn test_windows_surround_each_at() {
    assert_eq!(
        possible_email_windows("aaa a@b.com\nccc c@d.org"),
        " aaa a@b.com ccc c@d.org"
    );
    assert_eq!(possible_email_windows("no at sign"), "");
}

#[test]
fn test_windows_bound_local_part() {
    let long_local = "x".repeat(100);
    let windows = possible_email_windows(&format!("{long_local}@example.com"));
    assert_eq!(windows, format!(" {}@example.com", "x".repeat(64)));
}

#[test]
fn test_extract_augmented_merges_candidates() {
    let candidates = vec!["first@one.com".to_string(), "second@two.org".to_string()];
    let found = extract_augmented("<p>third@three.net</p>", &candidates);

    assert_eq!(found.len(), 3);
    assert!(found.contains("first@one.com"));
    assert!(found.contains("second@two.org"));
    assert!(found.contains("third@three.net"));
}

#[test]
fn test_separator_cannot_join_candidates() {
    let joined = ["a@b.com", "c@d.org"].join(CANDIDATE_SEPARATOR);
    assert_eq!(addresses(&joined), ["a@b.com", "c@d.org"]);
}
