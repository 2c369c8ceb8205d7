#[cfg(test)]
mod text_tests;

#[cfg(test)]
mod tests {
    use crate::utils::absolute_uri;

    #[test]
    fn test_absolute_uri_joins_once() {
        assert_eq!(absolute_uri("http://hub.local", "/_static/a.js"), "http://hub.local/_static/a.js");
        assert_eq!(absolute_uri("http://hub.local/", "_static/a.js"), "http://hub.local/_static/a.js");
        assert_eq!(absolute_uri("http://hub.local/", "/"), "http://hub.local/");
        assert_eq!(absolute_uri("http://hub.local", ""), "http://hub.local/");
    }

    #[test]
    fn test_absolute_uri_keeps_absolute_paths() {
        assert_eq!(
            absolute_uri("http://hub.local", "https://cdn.example.com/a.js"),
            "https://cdn.example.com/a.js"
        );
    }
}
