//! Route pattern parsing and path matching.
//!
//! # Responsibilities
//! - Parse `v1/namespaces/{namespace}` style patterns into positional segments
//! - Match a verb and a split path against an ordered table
//! - Capture variable segments by name, verbatim
//!
//! # Design Decisions
//! - Patterns and request paths are split with the same rule (`/`, no
//!   trimming), so a leading slash is an extra empty segment on both sides
//! - Literal segments compare ASCII case-insensitively
//! - Segment counts must be equal; there are no wildcard segments
//! - First match in declaration order wins
//! - No decoding happens here; callers decode captured segments

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Request verbs the router understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "POST" => Ok(HttpMethod::Post),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(RouteError::UnknownMethod(s.to_string())),
        }
    }
}

/// Errors building a route table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),

    #[error("Invalid route pattern {pattern}: variable {name} is declared twice")]
    DuplicateVariable { pattern: String, name: String },

    #[error("Invalid route pattern {pattern}: empty variable name at segment {position}")]
    EmptyVariable { pattern: String, position: usize },
}

/// One positional segment of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment, ignoring ASCII case only; `ſ` does
    /// not match `s`.
    Literal(String),
    /// Matches any single segment and captures it under this name.
    Variable(String),
}

/// Split a path or pattern into segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').collect()
}

/// A parsed route: an identity, a verb and positional segments.
#[derive(Debug, Clone)]
pub struct RouteDefinition<R> {
    id: R,
    method: HttpMethod,
    segments: Vec<Segment>,
}

impl<R: Copy> RouteDefinition<R> {
    pub fn parse(id: R, method: HttpMethod, pattern: &str) -> Result<Self, RouteError> {
        let mut seen = HashSet::new();
        let mut segments = Vec::new();
        for (position, part) in split_path(pattern).into_iter().enumerate() {
            let variable = part
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'));
            match variable {
                Some("") => {
                    return Err(RouteError::EmptyVariable {
                        pattern: pattern.to_string(),
                        position,
                    });
                }
                Some(name) => {
                    if !seen.insert(name) {
                        return Err(RouteError::DuplicateVariable {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    segments.push(Segment::Variable(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            id,
            method,
            segments,
        })
    }

    pub fn id(&self) -> R {
        self.id
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn required_length(&self) -> usize {
        self.segments.len()
    }

    pub fn matches(&self, method: HttpMethod, parts: &[&str]) -> bool {
        self.method == method
            && self.segments.len() == parts.len()
            && self
                .segments
                .iter()
                .zip(parts)
                .all(|(segment, part)| match segment {
                    Segment::Literal(literal) => literal.eq_ignore_ascii_case(part),
                    Segment::Variable(_) => true,
                })
    }

    /// Capture the variable segments of an already matched path.
    pub fn variables(&self, parts: &[&str]) -> HashMap<String, String> {
        self.segments
            .iter()
            .zip(parts)
            .filter_map(|(segment, part)| match segment {
                Segment::Variable(name) => Some((name.clone(), (*part).to_string())),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}

/// A matched route and the raw segments captured for its variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<R> {
    pub route: R,
    pub variables: HashMap<String, String>,
}

/// An ordered, immutable route table.
#[derive(Debug, Clone)]
pub struct RouteTable<R> {
    routes: Vec<RouteDefinition<R>>,
}

impl<R: Copy> RouteTable<R> {
    pub fn new(routes: Vec<RouteDefinition<R>>) -> Self {
        Self { routes }
    }

    /// Parse `(id, method, pattern)` entries in order.
    pub fn parse<'a, I>(entries: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = (R, HttpMethod, &'a str)>,
    {
        entries
            .into_iter()
            .map(|(id, method, pattern)| RouteDefinition::parse(id, method, pattern))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn routes(&self) -> &[RouteDefinition<R>] {
        &self.routes
    }

    /// First route matching `method` and `path`, or `None`.
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<MatchResult<R>> {
        let parts = split_path(path);
        self.routes
            .iter()
            .find(|candidate| candidate.matches(method, &parts))
            .map(|route| MatchResult {
                route: route.id(),
                variables: route.variables(&parts),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pattern() {
        let def = RouteDefinition::parse(1, HttpMethod::Get, "v1/ns/{namespace}/tables").unwrap();
        assert_eq!(def.required_length(), 4);
        assert_eq!(def.segments()[2], Segment::Variable("namespace".into()));
        assert_eq!(def.segments()[3], Segment::Literal("tables".into()));
    }

    #[test]
    fn test_parse_rejects_duplicate_and_empty_variables() {
        assert_eq!(
            RouteDefinition::parse(1, HttpMethod::Get, "a/{x}/{x}").unwrap_err(),
            RouteError::DuplicateVariable {
                pattern: "a/{x}/{x}".into(),
                name: "x".into()
            }
        );
        assert!(matches!(
            RouteDefinition::parse(1, HttpMethod::Get, "a/{}").unwrap_err(),
            RouteError::EmptyVariable { position: 1, .. }
        ));
    }

    #[test]
    fn test_literal_match_ignores_case() {
        let def = RouteDefinition::parse(1, HttpMethod::Get, "v1/config").unwrap();
        assert!(def.matches(HttpMethod::Get, &split_path("V1/CONFIG")));
        assert!(!def.matches(HttpMethod::Post, &split_path("v1/config")));
        assert!(!def.matches(HttpMethod::Get, &split_path("/v1/config")));
        assert!(!def.matches(HttpMethod::Get, &split_path("v1/config/")));
    }

    #[test]
    fn test_literal_case_folding_is_ascii_only() {
        let def = RouteDefinition::parse(1, HttpMethod::Get, "v1/namespaces").unwrap();
        assert!(def.matches(HttpMethod::Get, &split_path("v1/NAMESPACES")));
        assert!(!def.matches(HttpMethod::Get, &split_path("v1/namespaceſ")));
    }

    #[test]
    fn test_variables_are_verbatim() {
        let table = RouteTable::parse([(1, HttpMethod::Get, "v1/{a}/x/{b}")]).unwrap();
        let found = table.find(HttpMethod::Get, "v1/MiXeD%20/X/").unwrap();
        assert_eq!(found.variables["a"], "MiXeD%20");
        assert_eq!(found.variables["b"], "");
    }

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::parse([
            ("first", HttpMethod::Get, "v1/{a}"),
            ("second", HttpMethod::Get, "v1/items"),
        ])
        .unwrap();
        for _ in 0..10 {
            assert_eq!(table.find(HttpMethod::Get, "v1/items").unwrap().route, "first");
        }
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert!("PATCH".parse::<HttpMethod>().is_err());
        assert_eq!(HttpMethod::Head.to_string(), "HEAD");
    }
}
