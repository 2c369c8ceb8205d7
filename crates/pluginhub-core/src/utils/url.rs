/// Join `path` onto `base_url` unless it is already absolute.
pub fn absolute_uri(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.is_empty() {
        return format!("{}/", base);
    }
    format!("{}/{}", base, path.trim_start_matches('/'))
}
