/// Turn a backend parameter name into a Secret key
///
/// Takes the last `/` segment, upper-cases it and replaces `-` with `_`.
/// A trailing slash yields an empty last segment, hence an empty key.
#[must_use]
pub fn normalize(raw_key: &str) -> String {
    raw_key
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_uppercase()
        .replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn test_normalize_hierarchical_key() {
        assert_eq!(normalize("a/b/My-Key"), "MY_KEY");
        assert_eq!(normalize("/app/dev/db-host"), "DB_HOST");
    }

    #[test]
    fn test_normalize_flat_key() {
        assert_eq!(normalize("single"), "SINGLE");
    }

    #[test]
    fn test_normalize_edge_cases() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("a/b/"), "");
        assert_eq!(normalize("/"), "");
        assert_eq!(normalize("--"), "__");
    }

    #[test]
    fn test_normalize_leaves_other_characters() {
        assert_eq!(normalize("/app/db.host_name"), "DB.HOST_NAME");
    }
}
