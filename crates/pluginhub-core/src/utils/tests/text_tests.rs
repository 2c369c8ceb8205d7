use crate::utils::text::{slugify, title_case};

#[test]
fn test_title_case_underscore_words() {
    assert_eq!(title_case("api_key"), "Api_Key");
    assert_eq!(title_case("api_key").replace('_', " "), "Api Key");
}

#[test]
fn test_title_case_lowercases_inner_letters() {
    assert_eq!(title_case("API_KEY"), "Api_Key");
    assert_eq!(title_case("webHookURL"), "Webhookurl");
}

#[test]
fn test_title_case_digits_start_new_word() {
    assert_eq!(title_case("oauth2token"), "Oauth2Token");
    assert_eq!(title_case("server url"), "Server Url");
    assert_eq!(title_case(""), "");
}

#[test]
fn test_slugify_basic() {
    assert_eq!(slugify("Issue Tracker"), "issue-tracker");
    assert_eq!(slugify("Issue Tracker (Beta)"), "issue-tracker-beta");
    assert_eq!(slugify("  --Web  Hooks--  "), "web-hooks");
}

#[test]
fn test_slugify_keeps_underscores_and_folds_accents() {
    assert_eq!(slugify("my_plugin v2"), "my_plugin-v2");
    assert_eq!(slugify("Café Alerts"), "cafe-alerts");
    assert_eq!(slugify("Ｎaïve ﬁlter"), "naive-filter");
    assert_eq!(slugify("_private_"), "private");
}
