//! Slash-delimited references to documents and collections.
//!
//! A [`StorePath`] is the single path contract of the facade: callers hand over one
//! string (or join their segments with [`StorePath::join`]) and the facade parses it
//! before any backend call is made.
//!
//! Segments alternate between collection ids and document ids, so `users/alice` names a
//! document and `users/alice/posts` names a collection. Parsing does not check that
//! alternation; backends reject references of the wrong kind.

use std::fmt;

use crate::error::{FacadeError, FacadeResult};

/// A parsed, non-empty sequence of path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    /// Parses a slash-delimited path.
    ///
    /// Leading and trailing slashes are ignored. The path must contain at least one
    /// segment and no empty segment.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Validation`] if the path is empty or contains `//`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let path = StorePath::parse("/users/alice/")?;
    /// assert_eq!(path.to_string(), "users/alice");
    /// ```
    pub fn parse(path: &str) -> FacadeResult<Self> {
        let trimmed = path.trim_matches('/');

        if trimmed.is_empty() {
            return Err(FacadeError::Validation(format!(
                "path '{path}' does not contain any segment"
            )));
        }

        let segments = trimmed
            .split('/')
            .map(|segment| {
                if segment.is_empty() {
                    Err(FacadeError::Validation(format!(
                        "path '{path}' contains an empty segment"
                    )))
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<FacadeResult<Vec<_>>>()?;

        Ok(Self { segments })
    }

    /// Builds a path from individual segments.
    ///
    /// Each segment may itself contain slashes; the result is parsed as if the segments
    /// were joined with `/`.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Validation`] if no segment is given or any segment is empty.
    pub fn join<I, S>(segments: I) -> FacadeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments.into_iter().collect::<Vec<_>>();

        if segments.iter().any(|s| s.as_ref().trim_matches('/').is_empty()) {
            return Err(FacadeError::Validation(
                "path segments must not be empty".to_string(),
            ));
        }

        Self::parse(
            &segments
                .iter()
                .map(|s| s.as_ref().trim_matches('/'))
                .collect::<Vec<_>>()
                .join("/"),
        )
    }

    /// Returns the parsed segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the last segment, the id of the referenced document or collection.
    pub fn id(&self) -> &str {
        // Parsing guarantees at least one segment.
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Returns the path of the enclosing collection or document, if any.
    pub fn parent(&self) -> Option<StorePath> {
        match self.segments.len() {
            1 => None,
            len => Some(Self {
                segments: self.segments[..len - 1].to_vec(),
            }),
        }
    }

    /// Returns `true` if the segment count denotes a document (collection/doc pairs).
    pub fn is_document(&self) -> bool {
        self.segments.len() % 2 == 0
    }

    /// Returns `true` if the segment count denotes a collection.
    pub fn is_collection(&self) -> bool {
        !self.is_document()
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl TryFrom<&str> for StorePath {
    type Error = FacadeError;

    fn try_from(path: &str) -> FacadeResult<Self> {
        Self::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_document_path() {
        let path = StorePath::parse("users/alice").unwrap();

        assert_eq!(path.segments(), &["users", "alice"]);
        assert_eq!(path.id(), "alice");
        assert!(path.is_document());
    }

    #[test]
    fn parse_ignores_outer_slashes() {
        let path = StorePath::parse("/users/alice/posts/").unwrap();

        assert_eq!(path.to_string(), "users/alice/posts");
        assert!(path.is_collection());
    }

    #[test]
    fn parse_rejects_empty_path() {
        assert!(StorePath::parse("").unwrap_err().is_validation());
        assert!(StorePath::parse("///").unwrap_err().is_validation());
    }

    #[test]
    fn parse_rejects_empty_segment() {
        assert!(StorePath::parse("users//alice").unwrap_err().is_validation());
    }

    #[test]
    fn join_segments() {
        let path = StorePath::join(["users", "alice/posts", "first"]).unwrap();

        assert_eq!(path.to_string(), "users/alice/posts/first");
    }

    #[test]
    fn join_rejects_empty_segment() {
        assert!(StorePath::join(["users", ""]).unwrap_err().is_validation());
        assert!(StorePath::join(Vec::<String>::new()).unwrap_err().is_validation());
    }

    #[test]
    fn parent_of_nested_document() {
        let path = StorePath::parse("users/alice/posts/first").unwrap();

        assert_eq!(path.parent().unwrap().to_string(), "users/alice/posts");
        assert_eq!(StorePath::parse("users").unwrap().parent(), None);
    }
}
