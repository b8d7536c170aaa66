//! Path-to-view routing

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::api::UnitId;

/// Matches `/chapter/<id>` and `/mcq/<id>` (compiled once)
static UNIT_ROUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/(chapter|mcq)/([^/]+)$").expect("valid route pattern"));

/// A navigable location in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`, redirects to the unit list
    Root,
    /// `/student`
    Student,
    /// `/chapter/:id`
    Chapter(UnitId),
    /// `/mcq/:id`
    Mcq(UnitId),
}

/// Why a path could not be routed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("No route for {0}")]
    NotFound(String),
    #[error("Invalid unit id: {0}")]
    InvalidId(String),
}

impl Route {
    /// Parse a path such as `/chapter/3`
    ///
    /// A trailing slash is accepted; anything else must match exactly.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let path = path.trim();
        let normalized = if path.len() > 1 { path.trim_end_matches('/') } else { path };

        match normalized {
            "" | "/" => return Ok(Route::Root),
            "/student" => return Ok(Route::Student),
            _ => {}
        }

        let caps = UNIT_ROUTE_RE
            .captures(normalized)
            .ok_or_else(|| RouteError::NotFound(path.to_string()))?;
        let id: UnitId = caps[2].parse().map_err(|_| RouteError::InvalidId(caps[2].to_string()))?;

        match &caps[1] {
            "chapter" => Ok(Route::Chapter(id)),
            _ => Ok(Route::Mcq(id)),
        }
    }

    /// Follow redirects
    pub fn resolve(self) -> Self {
        match self {
            Route::Root => Route::Student,
            other => other,
        }
    }

    /// Canonical path of this route
    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Student => "/student".to_string(),
            Route::Chapter(id) => format!("/chapter/{}", id),
            Route::Mcq(id) => format!("/mcq/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current route plus the way back
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self { current: Route::Student, history: Vec::new() }
    }
}

impl Router {
    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 100;

    /// Router starting at `route` (redirects applied)
    pub fn new(route: Route) -> Self {
        Self { current: route.resolve(), history: Vec::new() }
    }

    pub fn current(&self) -> Route {
        self.current
    }


    /// Go to `route`, remembering where we came from
    pub fn push(&mut self, route: Route) -> Route {
        if self.history.len() >= Self::MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push(self.current);
        self.current = route.resolve();
        self.current
    }

    /// Return to the previous route, or the unit list when there is none
    pub fn pop(&mut self) -> Route {
        self.current = self.history.pop().unwrap_or(Route::Student);
        self.current
    }

    /// Drop history and go to `route`
    pub fn reset(&mut self, route: Route) -> Route {
        self.history.clear();
        self.current = route.resolve();
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_routes() {
        assert_eq!(Route::parse("/"), Ok(Route::Root));
        assert_eq!(Route::parse("/student"), Ok(Route::Student));
        assert_eq!(Route::parse("/student/"), Ok(Route::Student));
        assert_eq!(Route::parse("/chapter/3"), Ok(Route::Chapter(UnitId(3))));
        assert_eq!(Route::parse("/mcq/12"), Ok(Route::Mcq(UnitId(12))));
    }

    #[test]
    fn parse_rejects_unknown_paths() {
        assert!(matches!(Route::parse("/teacher"), Err(RouteError::NotFound(_))));
        assert!(matches!(Route::parse("/chapter"), Err(RouteError::NotFound(_))));
        assert!(matches!(Route::parse("/chapter/1/extra"), Err(RouteError::NotFound(_))));
    }

    #[test]
    fn parse_rejects_bad_ids() {
        assert_eq!(Route::parse("/mcq/abc"), Err(RouteError::InvalidId("abc".into())));
    }

    #[test]
    fn root_redirects_to_student() {
        assert_eq!(Route::Root.resolve(), Route::Student);
        assert_eq!(Router::new(Route::Root).current(), Route::Student);
    }

    #[test]
    fn path_roundtrips() {
        for route in [Route::Student, Route::Chapter(UnitId(5)), Route::Mcq(UnitId(7))] {
            assert_eq!(Route::parse(&route.path()), Ok(route));
        }
    }

    #[test]
    fn back_returns_to_previous() {
        let mut router = Router::default();
        router.push(Route::Chapter(UnitId(1)));
        router.push(Route::Mcq(UnitId(1)));
        assert_eq!(router.pop(), Route::Chapter(UnitId(1)));
        assert_eq!(router.pop(), Route::Student);
        assert_eq!(router.pop(), Route::Student);
    }

    #[test]
    fn reset_clears_history() {
        let mut router = Router::default();
        router.push(Route::Chapter(UnitId(1)));
        router.push(Route::Mcq(UnitId(1)));
        router.reset(Route::Chapter(UnitId(2)));
        assert_eq!(router.current(), Route::Chapter(UnitId(2)));
        // Nothing to go back to
        assert_eq!(router.pop(), Route::Student);
        assert_eq!(router.pop(), Route::Student);
    }
}
