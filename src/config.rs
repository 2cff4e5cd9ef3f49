//! Render limits
//!
//! [`Config`] holds the limits that bound a dump. The defaults can be
//! overridden per process through environment variables:
//!
//! | Variable | Field |
//! |---|---|
//! | `VARDUMP_MAX_DEPTH` | [`Config::max_depth`] |
//! | `VARDUMP_MAX_ITEMS` | [`Config::max_items`] |
//! | `VARDUMP_MAX_STRING_LEN` | [`Config::max_string_len`] |
//!
//! Values that are negative or not integers are ignored with a warning.

pub const DEFAULT_MAX_DEPTH: usize = 15;
pub const DEFAULT_MAX_ITEMS: usize = 100;
pub const DEFAULT_MAX_STRING_LEN: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Nesting level past which values are replaced by a marker
    pub max_depth: usize,
    /// Entries shown per map or sequence
    pub max_items: usize,
    /// Code points shown per string
    pub max_string_len: usize,
    /// Sort unordered maps by key so output is stable across runs
    pub sort_map_keys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
            max_items: DEFAULT_MAX_ITEMS,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            sort_map_keys: true,
        }
    }
}

impl Config {
    /// Defaults, overridden by the `VARDUMP_*` environment variables
    pub fn from_env() -> Self {
        Self::default().with_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        apply_limit("VARDUMP_MAX_DEPTH", lookup("VARDUMP_MAX_DEPTH"), &mut self.max_depth);
        apply_limit("VARDUMP_MAX_ITEMS", lookup("VARDUMP_MAX_ITEMS"), &mut self.max_items);
        apply_limit(
            "VARDUMP_MAX_STRING_LEN",
            lookup("VARDUMP_MAX_STRING_LEN"),
            &mut self.max_string_len,
        );
        self
    }
}

fn apply_limit(name: &str, raw: Option<String>, slot: &mut usize) {
    let Some(raw) = raw else {
        return;
    };
    match parse_limit(&raw) {
        Some(value) => *slot = value,
        None => log::warn!(
            "ignoring {}={:?}: expected a non-negative integer, keeping {}",
            name,
            raw,
            slot
        ),
    }
}

/// Parse a limit; negative and malformed values are rejected
pub(crate) fn parse_limit(raw: &str) -> Option<usize> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| usize::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_depth, 15);
        assert_eq!(config.max_items, 100);
        assert_eq!(config.max_string_len, 100_000);
        assert!(config.sort_map_keys);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = Config::default().with_lookup(|key| match key {
            "VARDUMP_MAX_DEPTH" => Some("3".to_string()),
            "VARDUMP_MAX_ITEMS" => Some(" 7 ".to_string()),
            _ => None,
        });
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.max_items, 7);
        assert_eq!(config.max_string_len, DEFAULT_MAX_STRING_LEN);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = Config::default().with_lookup(|key| match key {
            "VARDUMP_MAX_DEPTH" => Some("-1".to_string()),
            "VARDUMP_MAX_ITEMS" => Some("lots".to_string()),
            _ => None,
        });
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_zero_is_a_valid_limit() {
        assert_eq!(parse_limit("0"), Some(0));
        assert_eq!(parse_limit("-5"), None);
        assert_eq!(parse_limit(""), None);
    }
}
