//! Cache key convention: `<entityKind>:<id>:<view>`

use std::fmt::Display;

/// Build a cache key such as `movie:42:detail`.
///
/// Two fetches sharing a key are treated as interchangeable, so the key must
/// identify exactly one (entity, view) pair.
pub fn cache_key(kind: &str, id: impl Display, view: &str) -> String {
    format!("{}:{}:{}", kind, id, view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_kind_id_view() {
        assert_eq!(cache_key("movie", 42, "detail"), "movie:42:detail");
        assert_eq!(cache_key("tv", "1399/2", "season"), "tv:1399/2:season");
    }
}
