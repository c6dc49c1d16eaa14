//! Route registry: construct, freeze, match.
//!
//! Routes are registered on a [`RouteRegistryBuilder`] during start-up;
//! [`RouteRegistryBuilder::freeze`] consumes the builder and returns the
//! read-only [`RouteRegistry`] that the admission pipeline shares between
//! requests.
//!
//! Matching walks a segment trie. Literal children are tried before the
//! placeholder child at every level, and the walk backtracks when a branch
//! has no route for the request method, so `/users/me` wins over
//! `/users/{id}` for the methods it is registered for and falls through to
//! the placeholder otherwise.
//!
//! Request segments are percent-decoded before they are compared with
//! literals or captured, so `/users/%6De` matches `/users/me` and a
//! placeholder sees `a b` for `a%20b`.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::http::{Method, Request};
use percent_encoding::percent_decode_str;
use restgate_core::PathParams;
use thiserror::Error;

use super::pattern::{PathPattern, PatternError, Segment, split_path};
use super::spec::RouteSpec;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("a route named '{0}' is already registered")]
    DuplicateName(String),

    #[error("route {method} {pattern} is already registered")]
    DuplicateRoute { method: Method, pattern: String },

    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        pattern: String,
        #[source]
        reason: PatternError,
    },

    #[error("{0} routes cannot be registered")]
    UnroutableMethod(Method),
}

#[derive(Debug, Default)]
struct Node {
    literals: HashMap<String, Node>,
    param: Option<Box<Node>>,
    routes: HashMap<Method, usize>,
}

impl Node {
    fn find<'s>(
        &self,
        segments: &'s [Cow<'s, str>],
        method: &Method,
        captured: &mut Vec<&'s str>,
    ) -> Option<usize> {
        let Some((head, rest)) = segments.split_first() else {
            return self.routes.get(method).copied();
        };
        let head: &'s str = head;

        if let Some(child) = self.literals.get(head) {
            if let Some(index) = child.find(rest, method, captured) {
                return Some(index);
            }
        }

        if let Some(child) = &self.param {
            if !head.is_empty() {
                captured.push(head);
                if let Some(index) = child.find(rest, method, captured) {
                    return Some(index);
                }
                captured.pop();
            }
        }

        None
    }

    /// The node a parsed pattern ends at, without creating anything.
    fn lookup(&self, segments: &[Segment]) -> Option<&Node> {
        let Some((head, rest)) = segments.split_first() else {
            return Some(self);
        };
        let child = match head {
            Segment::Literal(text) => self.literals.get(text)?,
            Segment::Param(_) => self.param.as_deref()?,
        };
        child.lookup(rest)
    }

    #[cfg(test)]
    fn count(&self) -> usize {
        1 + self.literals.values().map(Node::count).sum::<usize>()
            + self.param.as_deref().map_or(0, Node::count)
    }
}

#[derive(Debug)]
struct Entry {
    spec: Arc<RouteSpec>,
    params: Vec<String>,
}

/// The outcome of a successful match.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<RouteSpec>,
    pub params: PathParams,
}

#[derive(Debug, Default)]
pub struct RouteRegistryBuilder {
    entries: Vec<Entry>,
    names: HashSet<String>,
    root: Node,
}

impl RouteRegistryBuilder {
    pub fn register(&mut self, spec: RouteSpec) -> Result<&mut Self, RegistryError> {
        if spec.method() == Method::OPTIONS {
            return Err(RegistryError::UnroutableMethod(Method::OPTIONS));
        }
        if self.names.contains(spec.name()) {
            return Err(RegistryError::DuplicateName(spec.name().to_string()));
        }

        let pattern =
            PathPattern::parse(spec.pattern()).map_err(|reason| RegistryError::InvalidPattern {
                pattern: spec.pattern().to_string(),
                reason,
            })?;

        let taken = self
            .root
            .lookup(pattern.segments())
            .is_some_and(|node| node.routes.contains_key(spec.method()));
        if taken {
            return Err(RegistryError::DuplicateRoute {
                method: spec.method().clone(),
                pattern: spec.pattern().to_string(),
            });
        }

        let mut node = &mut self.root;
        for segment in pattern.segments() {
            node = match segment {
                Segment::Literal(text) => node.literals.entry(text.clone()).or_default(),
                Segment::Param(_) => &mut **node.param.get_or_insert_with(Default::default),
            };
        }

        node.routes.insert(spec.method().clone(), self.entries.len());
        self.names.insert(spec.name().to_string());
        self.entries.push(Entry {
            params: pattern.param_names(),
            spec: Arc::new(spec),
        });

        Ok(self)
    }

    pub fn freeze(self) -> RouteRegistry {
        RouteRegistry {
            entries: self.entries,
            root: self.root,
        }
    }
}

pub struct RouteRegistry {
    entries: Vec<Entry>,
    root: Node,
}

impl RouteRegistry {
    pub fn builder() -> RouteRegistryBuilder {
        RouteRegistryBuilder::default()
    }

    pub fn match_request<B>(&self, req: &Request<B>) -> Option<RouteMatch> {
        self.match_route(req.method(), req.uri().path())
    }

    /// `OPTIONS` never matches; the pipeline forwards those without a route.
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        if method == Method::OPTIONS {
            return None;
        }

        let segments: Vec<Cow<'_, str>> = split_path(path)
            .into_iter()
            .map(|segment| percent_decode_str(segment).decode_utf8_lossy())
            .collect();
        let mut captured = Vec::new();
        let index = self.root.find(&segments, method, &mut captured)?;
        let entry = &self.entries[index];

        let mut params = PathParams::new();
        for (name, value) in entry.params.iter().zip(captured) {
            params.push(name.as_str(), value);
        }

        Some(RouteMatch {
            route: Arc::clone(&entry.spec),
            params,
        })
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<RouteSpec>> {
        self.entries.iter().map(|entry| &entry.spec)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.routes()).finish()
    }
}
