use unicode_normalization::UnicodeNormalization;

/// Convert `value` into a URL slug.
///
/// The input is NFKD-decomposed and the non-ASCII remainder dropped, so
/// `"Café"` keeps its `e`. The rest is lowercased, anything other
/// than word characters, whitespace and `-` is removed, runs of whitespace
/// and dashes collapse into a single `-`, and leading/trailing `-`/`_` are
/// trimmed. `"Issue Tracker (Beta)"` becomes `"issue-tracker-beta"`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.nfkd().filter(|c| c.is_ascii()) {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash {
                slug.push('-');
                pending_dash = false;
            }
            slug.push(c);
        } else if c == '-' || c.is_ascii_whitespace() {
            pending_dash = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Title-case `value` with word boundaries at every uncased character.
///
/// A cased letter directly after another cased letter is lowercased, every
/// other cased letter is uppercased. Digits and punctuation start a new
/// word: `"api_key"` becomes `"Api_Key"`, `"oauth2token"` becomes
/// `"Oauth2Token"`.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_cased = false;

    for c in value.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased {
            if previous_cased {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
        } else {
            result.push(c);
        }
        previous_cased = cased;
    }

    result
}
