//! Small text and URL helpers shared by the serializers.
pub mod text;
pub mod url;

pub use text::{slugify, title_case};
pub use url::absolute_uri;

#[cfg(test)]
mod tests;
