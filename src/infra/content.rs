//! Author profiles loaded from a TOML content file.
//!
//! ```toml
//! [[authors]]
//! name = "Ada"
//! lang = "en"
//! occupation = "Engineer"
//! body = "Hello."
//! ```

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::application::repos::{AuthorsRepo, ContentError};
use crate::domain::content::AuthorProfile;

#[derive(Debug, Deserialize)]
struct AuthorsDocument {
    #[serde(default)]
    authors: Vec<AuthorProfile>,
}

pub fn parse_authors(raw: &str) -> Result<Vec<AuthorProfile>, ContentError> {
    let document: AuthorsDocument = toml::from_str(raw).map_err(ContentError::malformed)?;
    Ok(document.authors)
}

#[derive(Debug, Clone)]
pub struct TomlAuthorsRepo {
    path: PathBuf,
}

impl TomlAuthorsRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuthorsRepo for TomlAuthorsRepo {
    fn list_authors(&self) -> Result<Vec<AuthorProfile>, ContentError> {
        let raw = fs::read_to_string(&self.path).map_err(|err| {
            ContentError::unavailable(format!("failed to read `{}`: {err}", self.path.display()))
        })?;
        let authors = parse_authors(&raw)?;
        debug!(
            path = %self.path.display(),
            count = authors.len(),
            "Loaded author profiles"
        );
        Ok(authors)
    }
}

/// Fixed set of profiles, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthorsRepo {
    authors: Vec<AuthorProfile>,
}

impl StaticAuthorsRepo {
    pub fn new(authors: Vec<AuthorProfile>) -> Self {
        Self { authors }
    }
}

impl AuthorsRepo for StaticAuthorsRepo {
    fn list_authors(&self) -> Result<Vec<AuthorProfile>, ContentError> {
        Ok(self.authors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::locale::Locale;

    const AUTHORS: &str = r#"
[[authors]]
name = "Ming"
lang = "en"
occupation = "Software Engineer"
github = "https://github.com/example"
body = "I write about Rust."

[[authors]]
name = "明"
lang = "zh"
body = "我写关于 Rust 的文章。"
"#;

    #[test]
    fn parses_author_tables() {
        let authors = parse_authors(AUTHORS).unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].lang, Locale::En);
        assert_eq!(authors[0].occupation.as_deref(), Some("Software Engineer"));
        assert_eq!(authors[1].lang, Locale::Zh);
        assert_eq!(authors[1].company, None);
    }

    #[test]
    fn unsupported_lang_tag_is_malformed_content() {
        let raw = "[[authors]]\nname = \"Jean\"\nlang = \"fr\"\n";
        assert!(matches!(parse_authors(raw), Err(ContentError::Malformed(_))));
    }

    #[test]
    fn empty_document_has_no_authors() {
        assert!(parse_authors("").unwrap().is_empty());
    }

    #[test]
    fn reads_authors_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.toml");
        fs::write(&path, AUTHORS).unwrap();

        let repo = TomlAuthorsRepo::new(&path);
        assert_eq!(repo.list_authors().unwrap().len(), 2);

        let missing = TomlAuthorsRepo::new(dir.path().join("missing.toml"));
        assert!(matches!(
            missing.list_authors(),
            Err(ContentError::Unavailable(_))
        ));
    }
}
