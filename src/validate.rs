// Surface syntax checks for the student form fields. Nothing here touches the
// database; controllers call these before any statement is issued.

pub const NAME_MAX_CHARS: usize = 50;
pub const DOB_MAX_CHARS: usize = 15;
pub const MOBILE_LEN: usize = 10;
pub const EMAIL_MAX_CHARS: usize = 50;

/// A strictly positive base-10 integer, surrounding whitespace ignored.
/// Holds regardless of magnitude; whether the id fits the store is `parse_id`'s call.
pub fn validate_id(s: &str) -> bool {
    let s = s.trim();
    let digits = s.strip_prefix('+').unwrap_or(s);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits.bytes().any(|b| b != b'0')
}

/// The stored form of a valid id. `None` when `validate_id` fails or the
/// value does not fit in an `i64` column.
pub fn parse_id(s: &str) -> Option<i64> {
    if !validate_id(s) {
        return None;
    }
    s.trim().parse::<i64>().ok()
}

pub fn validate_mobile(s: &str) -> bool {
    s.len() == MOBILE_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

/// `local@domain.tld` where the tld is two or more ASCII letters.
///
/// Domain characters include `.`, so the tld is whatever follows the last dot;
/// any earlier split would put a dot inside the tld.
pub fn validate_email(s: &str) -> bool {
    let Some((local, rest)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_local_char) {
        return false;
    }
    let Some((domain, tld)) = rest.rsplit_once('.') else {
        return false;
    };
    if domain.is_empty() || !domain.chars().all(is_domain_char) {
        return false;
    }
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Character-count bound shared by the form checks and the table `CHECK`s.
pub fn within_len(s: &str, max_chars: usize) -> bool {
    s.chars().count() <= max_chars
}
