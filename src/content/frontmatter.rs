//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};

/// Errors raised for a malformed metadata block
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    #[error("front-matter block is not closed with `---`")]
    Unterminated,
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Keeps any scalar (string, number, bool) in its textual form, so an
/// unquoted `date: 2024` still reads as `"2024"`
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct Scalar;

    impl<'de> Visitor<'de> for Scalar {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(Scalar)
}

/// Metadata block at the top of a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    /// Kept as text; ordering relies on zero-padded ISO-like dates
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub authors: Vec<String>,
    /// Slugs of related posts in the same category
    #[serde(deserialize_with = "string_or_vec")]
    pub relates: Vec<String>,
}

#[derive(Clone, Copy)]
enum Language {
    Yaml,
    Json,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content without a leading `---` line has no front-matter and is
    /// returned untouched.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let (first_line, rest) = content.split_once('\n').unwrap_or((content, ""));

        let language = match first_line.trim_end() {
            "---" | "---yaml" | "---yml" => Language::Yaml,
            "---json" => Language::Json,
            _ => return Ok((FrontMatter::default(), content)),
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                let block = &rest[..offset];
                let remaining = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
                let fm = Self::parse_block(block, language)?;
                return Ok((fm, remaining));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    fn parse_block(block: &str, language: Language) -> Result<Self, FrontMatterError> {
        if block.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let fm = match language {
            Language::Yaml => serde_yaml::from_str(block)?,
            Language::Json => serde_json::from_str(block)?,
        };
        Ok(fm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: "2024-01-15"
authors:
  - Alice
  - Bob
relates:
  - other-post
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.date, Some("2024-01-15".to_string()));
        assert_eq!(fm.authors, vec!["Alice", "Bob"]);
        assert_eq!(fm.relates, vec!["other-post"]);
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"---json
{"title": "Test Post", "authors": ["a", "b"], "date": "2023-12-31"}
---
This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Test Post".to_string()));
        assert_eq!(fm.authors, vec!["a", "b"]);
        assert!(fm.relates.is_empty());
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let content = "---\ntitle: Only a title\n---\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.date, None);
        assert!(fm.authors.is_empty());
        assert!(fm.relates.is_empty());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_unquoted_date_and_single_author() {
        let content = r#"---
title: Single Author Post
date: 2024-06-15
authors: Notes
---

Content here.
"#;

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.date, Some("2024-06-15".to_string()));
        assert_eq!(fm.authors, vec!["Notes"]);
    }

    #[test]
    fn test_numeric_scalars_are_text() {
        let (fm, _) = FrontMatter::parse("---\ntitle: 2048\ndate: 2024\n---\n").unwrap();
        assert_eq!(fm.title, Some("2048".to_string()));
        assert_eq!(fm.date, Some("2024".to_string()));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Windows".to_string()));
        assert_eq!(remaining, "Body\r\n");
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_wrong_field_type_is_an_error() {
        let content = "---\nauthors:\n  nested: map\n---\nBody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_unterminated_block_is_an_error() {
        let content = "---\ntitle: Never closed\n\nBody";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Unterminated)
        ));
    }
}
