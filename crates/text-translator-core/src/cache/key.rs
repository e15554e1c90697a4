use crate::config::Lang;

/// Cache key for translated text.
///
/// Keys are opaque MD5 hashes of the normalized request triple, ensuring:
/// - Same (text, source, target) = same key
/// - Any change to inputs produces a different key
/// - Keys are fixed-length (32 hex chars) for consistent storage
///
/// Text is lowercased before hashing, so requests that differ only in case
/// share a cache entry. Callers are expected to pass cleaned text
/// (`text::clean`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    hash: String,
}

impl CacheKey {
    pub fn new(text: &str, source_lang: &Lang, target_lang: &Lang) -> Self {
        // Combine all inputs into a single string for hashing.
        // Using null bytes as separators prevents collision between
        // inputs like ("a", "bc") and ("ab", "c").
        let combined = format!(
            "{}\0{}\0{}",
            text.to_lowercase(),
            source_lang.as_str(),
            target_lang.as_str(),
        );

        Self {
            hash: format!("{:x}", md5::compute(combined.as_bytes())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}
