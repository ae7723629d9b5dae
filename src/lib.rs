//! Semantics-preserving URL normalization.
//!
//! Rewrites absolute URLs into a canonical form following
//! [[RFC3986, Section 6.2.2](https://tools.ietf.org/html/rfc3986#section-6.2.2)], so that two
//! spellings of the same resource compare equal as plain strings. Only normalizations that can
//! never change what the URL refers to are applied:
//!
//! - percent-encoded triplets are written with uppercase hexadecimal digits,
//! - the scheme and host are lowercased,
//! - triplets standing for unreserved characters are decoded,
//! - `"."` and `".."` path segments are removed,
//! - an empty path becomes `"/"`,
//! - a port equal to the scheme's default is removed.
//!
//! ```
//! assert_eq!(
//!     url_normalize::normalize("HTTP://Example.COM:80/bar/../%7Efoo%2a").unwrap(),
//!     "http://example.com/~foo%2A"
//! );
//! ```

mod utility;

pub mod authority;
pub mod fragment;
pub mod normalizer;
pub mod octet;
pub mod parsed_url;
pub mod path;
pub mod query;
pub mod rules;
pub mod scheme;

pub use self::authority::{InvalidAuthority, InvalidHost, InvalidPort, InvalidUserInfo};
pub use self::fragment::InvalidFragment;
pub use self::normalizer::{NormalizeError, Normalizer, NormalizerOptions};
pub use self::octet::{InvalidOctet, Octet};
pub use self::parsed_url::{InvalidUrl, ParsedUrl};
pub use self::path::InvalidPath;
pub use self::query::InvalidQuery;
pub use self::rules::DefaultPortPolicy;
pub use self::scheme::InvalidScheme;
pub use self::utility::InvalidTriplet;

/// Normalizes `url` with the default [`Normalizer`].
pub fn normalize(url: &str) -> Result<String, NormalizeError> {
    Normalizer::default().normalize(url)
}

/// Returns whether `left` and `right` normalize to the same URL with the default [`Normalizer`].
pub fn are_equivalent(left: &str, right: &str) -> Result<bool, NormalizeError> {
    Normalizer::default().are_equivalent(left, right)
}
