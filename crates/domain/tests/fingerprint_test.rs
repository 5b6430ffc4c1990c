use tubegate_domain::{fingerprint::normalize, Channel, Fingerprint};

#[test]
fn test_fingerprint_ignores_case_and_surrounding_whitespace() {
    assert_eq!(
        Fingerprint::new(Channel::Primary, " Lofi Beats "),
        Fingerprint::new(Channel::Primary, "lofi beats")
    );
}

#[test]
fn test_fingerprint_equals_fingerprint_of_normalized_query() {
    let queries = [
        "Lofi Beats",
        "\tDaft Punk - One More Time\n",
        "  ÉTÉ  ",
        "isrc:USUM71703861",
        "",
    ];
    for q in queries {
        for channel in Channel::ALL {
            assert_eq!(
                Fingerprint::new(channel, q),
                Fingerprint::new(channel, &normalize(q)),
                "query {:?} on {}",
                q,
                channel
            );
        }
    }
}

#[test]
fn test_fingerprint_differs_between_channels() {
    assert_ne!(
        Fingerprint::new(Channel::Primary, "lofi beats"),
        Fingerprint::new(Channel::Secondary, "lofi beats")
    );
}

#[test]
fn test_fingerprint_preserves_inner_whitespace() {
    assert_ne!(
        Fingerprint::new(Channel::Primary, "lofi  beats"),
        Fingerprint::new(Channel::Primary, "lofi beats")
    );
}

#[test]
fn test_fingerprint_canonical_form() {
    let fp = Fingerprint::new(Channel::Primary, " Lofi Beats ");
    assert_eq!(fp.as_str(), "query=lofi+beats&search_type=0");
    assert_eq!(fp.to_string(), fp.as_str());
}
