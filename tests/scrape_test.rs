use email_scrape::patterns::{HIDDEN_AT_TOKENS, HIDDEN_DOT_TOKENS, PLAIN_AT, PLAIN_DOT};
use email_scrape::*;

fn in_mailto(address: &str) -> String {
    format!(r#"<html><body><a href="mailto:{address}">email me</a></body></html>"#)
}

fn scrape(html: &str) -> Vec<String> {
    scrape_emails(html)
        .unwrap()
        .into_iter()
        .map(EmailAddress::into_string)
        .collect()
}

#[test]
fn test_plain_mailto() {
    assert_eq!(
        scrape(r#"<a href="mailto:hello@world.com">email me</a>"#),
        ["hello@world.com"]
    );
}

#[test]
fn test_spelled_out_at() {
    assert_eq!(
        scrape(r#"<a href="mailto:hello (at) world.com">email me</a>"#),
        ["hello@world.com"]
    );
}

#[test]
fn test_spelled_out_at_and_dot() {
    assert_eq!(
        scrape(r#"<a href="mailto:hello (at) world (dot) com">email me</a>"#),
        ["hello@world.com"]
    );
}

#[test]
fn test_spelled_out_dot_in_local_part() {
    assert_eq!(
        scrape(r#"<a href="mailto:prefix (dot) hello (at) world (dot) com">email me</a>"#),
        ["prefix.hello@world.com"]
    );
}

#[test]
fn test_spelled_out_keeps_plus_in_local_part() {
    assert_eq!(
        scrape(&in_mailto("john+doe (at) example (dot) com")),
        ["john+doe@example.com"]
    );
    assert_eq!(
        scrape("<p>john+doe (at) example.com</p>"),
        ["john+doe@example.com"]
    );
}

#[test]
fn test_inline_base64_mailto() {
    let html = r#"<a href=".href=atob('bWFpbHRvOmVtYWlsQGV4YW1wbGUuY29t')">E-Mail</a>"#;
    assert_eq!(scrape(html), ["email@example.com"]);
}

#[test]
fn test_no_at_sign_yields_nothing() {
    let html = "<html><body><p>Nothing to see here.</p></body></html>";
    assert!(scrape_emails(html).unwrap().is_empty());
}

#[test]
fn test_unknown_tld_yields_nothing() {
    assert!(scrape(&in_mailto("hello@world.notarealtld")).is_empty());
}

#[test]
fn test_self_test_table() {
    let cases = [
        ("hello@world.com", "hello@world.com"),
        ("hello(AT)world.com", "hello@world.com"),
        ("hello (AT) world.com", "hello@world.com"),
        ("hello (at) world.com", "hello@world.com"),
        ("hello (at) world(dot)com", "hello@world.com"),
        ("hello (at) world (dot) com", "hello@world.com"),
        (
            "prefix (dot) hello (at) world (dot) com",
            "prefix.hello@world.com",
        ),
        (
            "prefix.hello (at) world (.) postfix (dot) com",
            "prefix.hello@world.postfix.com",
        ),
        (
            "prefix.hello (at) world (.) postfix . com",
            "prefix.hello@world.postfix.com",
        ),
        (
            "prefix.hello (at) world.postfix.com",
            "prefix.hello@world.postfix.com",
        ),
    ];

    for (input, expected) in cases {
        assert_eq!(scrape(&in_mailto(input)), [expected], "input: {input}");
    }
}

#[test]
fn test_every_token_pairing_round_trips() {
    let ats = HIDDEN_AT_TOKENS.iter().chain([&PLAIN_AT]);
    for at in ats {
        for dot in HIDDEN_DOT_TOKENS.iter().chain([&PLAIN_DOT]) {
            for tld in ["com", "de", "org", "at", "dot", "world"] {
                let hidden = format!("jane{at}example{dot}{tld}");
                assert_eq!(
                    scrape(&in_mailto(&hidden)),
                    [format!("jane@example.{tld}")],
                    "input: {hidden:?}"
                );
            }
        }
    }
}

#[test]
fn test_literal_embedded_anywhere() {
    for address in ["a@b.de", "first.last@sub.example.co.uk", "x+tag@mail.io"] {
        let html = format!("<div><p>Reach us</p><span>{address}</span> today</div>");
        assert_eq!(scrape(&html), [address]);
    }
}

#[test]
fn test_entity_encoded_address() {
    let encoded: String = "hello@world.com"
        .chars()
        .map(|c| format!("&#{};", u32::from(c)))
        .collect();
    assert_eq!(scrape(&format!("<p>{encoded}</p>")), ["hello@world.com"]);

    assert_eq!(
        scrape("<p>hello&#x40;world&period;com</p>"),
        ["hello@world.com"]
    );
}

#[test]
fn test_entity_quoted_atob_payload() {
    let html = "<a href=\"javascript:location.href=atob(&quot;bWFpbHRvOmphbmVAZXhhbXBsZS5vcmc&quot;)\">x</a>";
    assert_eq!(scrape(html), ["jane@example.org"]);
}

#[test]
fn test_results_are_deduplicated() {
    let html = r#"<a href="mailto:hello@world.com">hello@world.com</a>
        <p>hello (at) world (dot) com</p>"#;
    assert_eq!(scrape(html), ["hello@world.com"]);
}

#[test]
fn test_case_is_preserved() {
    let found = scrape("<p>Jane.Doe@Example.com and jane.doe@example.com</p>");
    assert_eq!(found, ["Jane.Doe@Example.com", "jane.doe@example.com"]);
}

#[test]
fn test_repeated_runs_agree() {
    let html = r#"<p>a (at) b (dot) de</p><a href="mailto:c@d.org">c</a>"#;
    let first = scrape_emails(html).unwrap();
    let second = scrape_emails(html).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_corrupt_payload_fails_whole_input() {
    let html = r#"<a href="mailto:ok@example.com" onclick="atob('abcde')">x</a>"#;
    let err = scrape_emails(html).unwrap_err();
    assert!(matches!(err, ScrapeError::InvalidBase64 { .. }));
}

#[test]
fn test_corrupt_payload_can_be_skipped() {
    let html = r#"<a href="mailto:ok@example.com" onclick="atob('abcde')">x</a>"#;
    let options = ScrapeOptions::default().skipping_undecodable_payloads();
    let found = scrape_emails_with(html, &options).unwrap();
    assert!(found.contains("ok@example.com"));
    assert_eq!(found.len(), 1);
}

#[test]
fn test_input_size_limit() {
    let html = "<p>someone@example.com</p>";
    let options = ScrapeOptions::default().with_max_input_bytes(8);
    let err = scrape_emails_with(html, &options).unwrap_err();
    assert!(matches!(
        err,
        ScrapeError::InputTooLarge { len, limit: 8 } if len == html.len()
    ));

    let roomy = ScrapeOptions::default().with_max_input_bytes(html.len());
    assert!(
        scrape_emails_with(html, &roomy)
            .unwrap()
            .contains("someone@example.com")
    );
}

#[test]
fn test_options_from_json() {
    let options =
        ScrapeOptions::from_json(r#"{"max_input_bytes": 1024, "skip_undecodable_payloads": true}"#)
            .unwrap();
    assert_eq!(options.max_input_bytes, Some(1024));
    assert!(options.skip_undecodable_payloads);

    assert_eq!(ScrapeOptions::from_json("{}").unwrap(), ScrapeOptions::default());
}
