#[path = "../src/validate.rs"]
#[allow(dead_code)]
mod validate;

use validate::{validate_email, validate_id, validate_mobile};

#[test]
fn mobile_is_exactly_ten_ascii_digits() {
    assert!(validate_mobile("9876543210"));
    assert!(validate_mobile("0000000000"));
    assert!(!validate_mobile("987654321"));
    assert!(!validate_mobile("98765432101"));
    assert!(!validate_mobile("98765x3210"));
    assert!(!validate_mobile("+987654321"));
    assert!(!validate_mobile(""));
    // Non-ASCII digits do not count.
    assert!(!validate_mobile("٩٨٧٦٥٤٣٢١٠"));
}

#[test]
fn mobile_matches_length_and_digit_rule_for_generated_strings() {
    let alphabet = ['0', '5', '9', 'a', ' ', '-'];
    for len in 0..=12 {
        for seed in 0..alphabet.len() {
            let s: String = (0..len)
                .map(|i| alphabet[(seed * 7 + i * 3) % alphabet.len()])
                .collect();
            let expected = s.len() == 10 && s.chars().all(|c| c.is_ascii_digit());
            assert_eq!(validate_mobile(&s), expected, "input {s:?}");
        }
    }
}

#[test]
fn id_holds_only_for_strictly_positive_integers() {
    for s in [
        "1",
        "2",
        "10",
        "007",
        " 12 ",
        "9223372036854775807",
        "9223372036854775808",
        "99999999999999999999",
    ] {
        assert!(validate_id(s), "expected {s:?} to be accepted");
    }
    for s in ["0", "-1", "", " ", "1.0", "1e3", "one", "00", "-99999999999999999999"] {
        assert!(!validate_id(s), "expected {s:?} to be rejected");
    }
}

#[test]
fn email_accepts_and_rejects_documented_examples() {
    assert!(validate_email("a.b@c.org"));
    assert!(validate_email("alice@example.com"));
    assert!(validate_email("user_1%x+y-z@mail-server.example.museum"));

    assert!(!validate_email("a@b"));
    assert!(!validate_email("@c.org"));
    assert!(!validate_email("a.b@c"));
    assert!(!validate_email("a.b@c.o"));
    assert!(!validate_email("a.b@c.or9"));
    assert!(!validate_email("a.b c@d.org"));
}
