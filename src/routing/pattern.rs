//! Path pattern grammar.
//!
//! A pattern is an absolute path of `/`-separated segments. Each segment is
//! either literal text or a whole-segment placeholder `{name}`, where `name`
//! is made of ASCII letters, digits and `_` and is unique within the pattern.
//! A trailing slash is ignored, so `/users/` and `/users` are the same
//! pattern.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern must start with '/'")]
    NotAbsolute,

    #[error("empty segment at position {0}")]
    EmptySegment(usize),

    #[error("segment '{0}' mixes literal text and a placeholder")]
    MixedSegment(String),

    #[error("placeholder '{0}' has an invalid name")]
    InvalidName(String),

    #[error("placeholder '{0}' appears more than once")]
    DuplicateName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::NotAbsolute);
        }

        let mut segments = Vec::new();
        let mut names: Vec<&str> = Vec::new();

        for (position, segment) in split_path(raw).into_iter().enumerate() {
            if segment.is_empty() {
                return Err(PatternError::EmptySegment(position));
            }

            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    if name.is_empty()
                        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        return Err(PatternError::InvalidName(name.to_string()));
                    }
                    if names.contains(&name) {
                        return Err(PatternError::DuplicateName(name.to_string()));
                    }
                    names.push(name);
                    segments.push(Segment::Param(name.to_string()));
                }
                None if segment.contains(['{', '}']) => {
                    return Err(PatternError::MixedSegment(segment.to_string()));
                }
                None => segments.push(Segment::Literal(segment.to_string())),
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in pattern order.
    pub fn param_names(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Param(name) => Some(name.clone()),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}

/// Split a request path or pattern into segments, ignoring one leading and
/// one trailing slash. The root path yields no segments; inner empty
/// segments (`/a//b`) are kept.
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}
