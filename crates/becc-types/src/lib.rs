//! Validated text primitives shared across the BECC crates.
//!
//! Each type here can only be constructed through a validating constructor, so a value that
//! reaches a record is known to be well-formed. All of them serialise as plain strings and
//! re-validate when deserialised.

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,

    /// The input text is longer than allowed
    #[error("Ensure this value has at most {max} characters (it has {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Enter a valid URL")]
    InvalidUrl,

    #[error("Enter a valid slug consisting of lowercase letters, numbers, underscores or hyphens")]
    InvalidSlug,

    #[error("Invalid media reference: {0}")]
    InvalidMediaRef(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Like [`NonEmptyText::new`], additionally bounding the trimmed length in characters.
    pub fn with_max_chars(input: impl AsRef<str>, max: usize) -> Result<Self, TextError> {
        let text = Self::new(input)?;
        let actual = text.0.chars().count();
        if actual > max {
            return Err(TextError::TooLong { max, actual });
        }
        Ok(text)
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An email address with a minimal structural check.
///
/// Accepts `local@domain.tld` with no whitespace; deliverability is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LEN: usize = 254;

    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.len() > Self::MAX_LEN || trimmed.chars().any(char::is_whitespace) {
            return Err(TextError::InvalidEmail);
        }

        let (local, domain) = trimmed.split_once('@').ok_or(TextError::InvalidEmail)?;
        let domain_ok = !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.');
        if local.is_empty() || !domain_ok {
            return Err(TextError::InvalidEmail);
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An absolute `http`/`https` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WebUrl(String);

impl WebUrl {
    const MAX_LEN: usize = 2048;

    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.len() > Self::MAX_LEN || trimmed.chars().any(char::is_whitespace) {
            return Err(TextError::InvalidUrl);
        }

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or(TextError::InvalidUrl)?;
        let host = rest.split(['/', '?', '#']).next().unwrap_or("");
        if host.is_empty() || host.starts_with('.') || host.starts_with(':') {
            return Err(TextError::InvalidUrl);
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A URL slug: lowercase ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub const MAX_LEN: usize = 50;

    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(TextError::TooLong {
                max: Self::MAX_LEN,
                actual: trimmed.chars().count(),
            });
        }
        let ok = trimmed
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'-' | b'_'));
        if !ok {
            return Err(TextError::InvalidSlug);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Derive a slug from free text, e.g. a blog post title.
    ///
    /// Runs of characters outside `[a-z0-9]` collapse to a single `-`; the result is
    /// truncated to [`Slug::MAX_LEN`].
    pub fn from_title(title: &str) -> Result<Self, TextError> {
        let mut slug = String::with_capacity(title.len());
        for c in title.chars().flat_map(char::to_lowercase) {
            if c.is_ascii_alphanumeric() {
                slug.push(c);
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        slug.truncate(Self::MAX_LEN);
        let slug = slug.trim_end_matches('-');
        if slug.is_empty() {
            return Err(TextError::InvalidSlug);
        }
        Ok(Self(slug.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reference to a stored media file: the lowercase hex SHA-256 digest of its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaRef(String);

impl MediaRef {
    pub const LEN: usize = 64;

    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let input = input.as_ref().trim();
        let ok = input.len() == Self::LEN
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !ok {
            return Err(TextError::InvalidMediaRef(format!(
                "expected {} lowercase hex characters, got '{}'",
                Self::LEN,
                input
            )));
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public URL under which the media is served.
    pub fn url(&self) -> String {
        format!("/media/{}", self.0)
    }
}

macro_rules! string_newtype_impls {
    ($ty:ident, $ctor:path) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $ty {
            type Err = TextError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ctor(s)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $ctor(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

string_newtype_impls!(NonEmptyText, NonEmptyText::new);
string_newtype_impls!(EmailAddress, EmailAddress::parse);
string_newtype_impls!(WebUrl, WebUrl::parse);
string_newtype_impls!(Slug, Slug::parse);
string_newtype_impls!(MediaRef, MediaRef::parse);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_and_rejects_blank() {
        assert_eq!(NonEmptyText::new("  Water  ").unwrap().as_str(), "Water");
        assert_eq!(NonEmptyText::new("   "), Err(TextError::Empty));
    }

    #[test]
    fn non_empty_text_bounds_length_in_characters() {
        assert!(NonEmptyText::with_max_chars("ééé", 3).is_ok());
        assert_eq!(
            NonEmptyText::with_max_chars("abcd", 3),
            Err(TextError::TooLong { max: 3, actual: 4 })
        );
    }

    #[test]
    fn email_accepts_plain_addresses() {
        let email = EmailAddress::parse(" info@becc.org ").unwrap();
        assert_eq!(email.as_str(), "info@becc.org");
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for bad in ["no-at-sign", "@becc.org", "a@b", "a@@b.org", "a b@c.org", "a@.org"] {
            assert_eq!(EmailAddress::parse(bad), Err(TextError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn url_requires_http_scheme_and_host() {
        assert!(WebUrl::parse("https://becc.org/about").is_ok());
        assert!(WebUrl::parse("http://localhost:8000").is_ok());
        assert_eq!(WebUrl::parse("ftp://becc.org"), Err(TextError::InvalidUrl));
        assert_eq!(WebUrl::parse("https://"), Err(TextError::InvalidUrl));
        assert_eq!(WebUrl::parse("becc.org"), Err(TextError::InvalidUrl));
    }

    #[test]
    fn slug_from_title_collapses_separators() {
        let slug = Slug::from_title("  Tree Planting: Day 1!  ").unwrap();
        assert_eq!(slug.as_str(), "tree-planting-day-1");
    }

    #[test]
    fn slug_from_title_rejects_titles_without_ascii_letters() {
        assert_eq!(Slug::from_title("!!!"), Err(TextError::InvalidSlug));
    }

    #[test]
    fn slug_from_title_truncates_without_trailing_hyphen() {
        let title = format!("{} end", "a".repeat(49));
        let slug = Slug::from_title(&title).unwrap();
        assert_eq!(slug.as_str(), "a".repeat(49));
    }

    #[test]
    fn slug_parse_rejects_uppercase() {
        assert_eq!(Slug::parse("Tree-Planting"), Err(TextError::InvalidSlug));
    }

    #[test]
    fn media_ref_requires_sha256_hex() {
        let hash = "ab".repeat(32);
        let media = MediaRef::parse(&hash).unwrap();
        assert_eq!(media.url(), format!("/media/{hash}"));
        assert!(MediaRef::parse("abc").is_err());
        assert!(MediaRef::parse("AB".repeat(32)).is_err());
    }

    #[test]
    fn serde_revalidates_on_deserialize() {
        let ok: NonEmptyText = serde_json::from_str(r#""Mission""#).unwrap();
        assert_eq!(ok.as_str(), "Mission");
        assert!(serde_json::from_str::<NonEmptyText>(r#""  ""#).is_err());
        assert!(serde_json::from_str::<EmailAddress>(r#""nope""#).is_err());
    }
}
