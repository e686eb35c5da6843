//! Target URL and short code validation, plus random code generation.
//!
//! These functions are pure: they never touch the link store. Uniqueness of a
//! generated code is checked by [`crate::application::services::LinkService`].

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Shortest accepted short code.
pub const MIN_CODE_LEN: usize = 6;

/// Longest accepted short code.
pub const MAX_CODE_LEN: usize = 8;

/// Compiled pattern for short codes: 6 to 8 ASCII letters or digits.
static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("short code regex is valid"));

/// Codes that would shadow a fixed top-level route.
///
/// `links` is not listed because it is already too short to be a valid code.
const RESERVED_CODES: &[&str] = &["healthz"];

/// Returns `true` if `input` parses as an absolute URL.
///
/// Any scheme is accepted; relative references such as `"example.com"` or
/// `"/path"` are rejected because they have no base to resolve against.
///
/// # Examples
///
/// ```
/// use tinylink::utils::validation::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/a?b=c"));
/// assert!(is_valid_url("mailto:someone@example.com"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    Url::parse(input).is_ok()
}

/// Parses `input` and returns its serialised form, or `None` if it is not an
/// absolute URL.
///
/// The serialisation is pure ASCII with tabs, newlines and surrounding control
/// characters removed, so it is always usable as a `Location` header.
///
/// # Examples
///
/// ```
/// use tinylink::utils::validation::normalize_url;
///
/// assert_eq!(normalize_url("https://Example.com").as_deref(), Some("https://example.com/"));
/// assert_eq!(normalize_url("https://example.com/a\nb").as_deref(), Some("https://example.com/ab"));
/// assert_eq!(normalize_url("not a url"), None);
/// ```
pub fn normalize_url(input: &str) -> Option<String> {
    Url::parse(input).ok().map(String::from)
}

/// Returns `true` if `code` is 6 to 8 characters from `[A-Za-z0-9]`.
///
/// # Examples
///
/// ```
/// use tinylink::utils::validation::is_valid_code;
///
/// assert!(is_valid_code("ABC123"));
/// assert!(!is_valid_code("abc"));
/// assert!(!is_valid_code("my-link"));
/// ```
pub fn is_valid_code(code: &str) -> bool {
    SHORT_CODE_REGEX.is_match(code)
}

/// Returns `true` if `code` collides with a fixed route and cannot be used.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Generates a random alphanumeric candidate code.
///
/// The length is drawn uniformly from 6..=8 and every character uniformly from
/// the 62-character alphabet. The thread-local RNG is not cryptographically
/// strong and the result is not guaranteed to be unused.
pub fn generate_random_code() -> String {
    let mut rng = rand::rng();
    let len = rng.random_range(MIN_CODE_LEN..=MAX_CODE_LEN);

    (&mut rng)
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
