use email_scrape::tld::{TLDS, is_tld, tld_set};
use email_scrape::*;

// --- EmailAddress ---

#[test]
fn test_parse_valid_address() {
    let email = EmailAddress::parse("first.last@mail.example.de").unwrap();
    assert_eq!(email.as_str(), "first.last@mail.example.de");
    assert_eq!(email.local_part(), "first.last");
    assert_eq!(email.domain(), "mail.example.de");
    assert_eq!(email.tld(), "de");
}

#[test]
fn test_parse_rejects_unknown_tld() {
    assert!(EmailAddress::parse("a@b.notarealtld").is_none());
    assert!(EmailAddress::parse("a@b.COM").is_none());
}

#[test]
fn test_parse_rejects_malformed() {
    for bad in [
        "",
        "plain",
        "@example.com",
        "a@com",
        "a@@example.com",
        "a@b@example.com",
        ".a@example.com",
        "a.@example.com",
        "a..b@example.com",
        "a@.example.com",
        "a@example..com",
        "a b@example.com",
        "a@exa_mple.com",
    ] {
        assert!(EmailAddress::parse(bad).is_none(), "accepted {bad:?}");
    }
}

#[test]
fn test_parse_accepts_special_local_chars() {
    assert!(EmailAddress::parse("!#$%&'*+-/=?^_`{|}~@example.com").is_some());
}

#[test]
fn test_display_and_borrow() {
    let email = EmailAddress::parse("jane@example.org").unwrap();
    assert_eq!(email.to_string(), "jane@example.org");
    assert_eq!(email, "jane@example.org");

    let set: ResultSet = [email].into_iter().collect();
    assert!(set.contains("jane@example.org"));
}

#[test]
fn test_serde_as_plain_string() {
    let email = EmailAddress::parse("jane@example.org").unwrap();
    assert_eq!(serde_json::to_string(&email).unwrap(), "\"jane@example.org\"");

    let back: EmailAddress = serde_json::from_str("\"jane@example.org\"").unwrap();
    assert_eq!(back, email);
    assert!(serde_json::from_str::<EmailAddress>("\"nope@nowhere\"").is_err());
}

// --- TLD table ---

#[test]
fn test_tld_table_sorted_and_unique() {
    assert!(TLDS.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(tld_set().len(), TLDS.len());
}

#[test]
fn test_tld_lookup_is_case_sensitive() {
    assert!(is_tld("com"));
    assert!(is_tld("de"));
    assert!(is_tld("xn--p1ai"));
    assert!(!is_tld("COM"));
    assert!(!is_tld("notarealtld"));
}
