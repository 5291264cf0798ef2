//! Route descriptors and path matching.

use std::collections::BTreeMap;

use crate::traits::AuthState;

use super::guard::{Navigation, NavigationGuard};

/// One entry of a static route table.
///
/// Paths of top-level routes start with `/`; child paths are relative to
/// their parent (`""` matches the parent path itself). Segments starting with
/// `:` capture a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    /// The view rendered for this route.
    pub view: &'static str,
    pub requires_auth: bool,
    pub title: Option<&'static str>,
    pub children: &'static [RouteDescriptor],
}

impl RouteDescriptor {
    pub const fn new(path: &'static str, name: &'static str, view: &'static str) -> Self {
        Self {
            path,
            name,
            view,
            requires_auth: false,
            title: None,
            children: &[],
        }
    }

    /// Mark the route (and every route nested under it) as requiring a session.
    pub const fn guarded(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub const fn titled(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    pub const fn with_children(mut self, children: &'static [RouteDescriptor]) -> Self {
        self.children = children;
        self
    }

    fn segments(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }
}

/// A concrete path resolved against a route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The normalized path that was resolved.
    pub path: String,
    /// Name of the deepest matched route.
    pub name: &'static str,
    /// View of the deepest matched route.
    pub view: &'static str,
    /// True if any route in the matched chain requires a session.
    pub requires_auth: bool,
    /// Title of the deepest matched route that has one.
    pub title: Option<&'static str>,
    /// Captured `:param` segments.
    pub params: BTreeMap<String, String>,
    /// Names of the matched chain, outermost first.
    pub matched: Vec<&'static str>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// A static route table with its login and home routes.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [RouteDescriptor],
    login: &'static str,
    home: &'static str,
}

impl RouteTable {
    pub const fn new(
        routes: &'static [RouteDescriptor],
        login: &'static str,
        home: &'static str,
    ) -> Self {
        Self {
            routes,
            login,
            home,
        }
    }

    pub fn routes(&self) -> &'static [RouteDescriptor] {
        self.routes
    }

    /// Path unauthenticated navigations are redirected to.
    pub fn login_route(&self) -> &'static str {
        self.login
    }

    /// Path shown after a successful login.
    pub fn home_route(&self) -> &'static str {
        self.home
    }

    pub fn guard(&self) -> NavigationGuard {
        NavigationGuard::new(self.login)
    }

    /// Resolve a concrete path. Query string, fragment and trailing slash are
    /// ignored. Returns `None` when no route matches.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let normalized = format!("/{}", segments.join("/"));

        let mut chain = Vec::new();
        let mut params = BTreeMap::new();
        if !match_level(self.routes, &segments, &mut chain, &mut params) {
            return None;
        }

        let leaf = chain.last()?;
        Some(RouteMatch {
            path: normalized,
            name: leaf.name,
            view: leaf.view,
            requires_auth: chain.iter().any(|r| r.requires_auth),
            title: chain.iter().rev().find_map(|r| r.title),
            params,
            matched: chain.iter().map(|r| r.name).collect(),
        })
    }

    /// Resolve `path` and run the guard against `auth`.
    pub fn navigate(&self, path: &str, auth: &dyn AuthState) -> Option<Navigation> {
        self.resolve(path).map(|target| self.guard().check(target, auth))
    }
}

fn match_level(
    routes: &'static [RouteDescriptor],
    segments: &[&str],
    chain: &mut Vec<&'static RouteDescriptor>,
    params: &mut BTreeMap<String, String>,
) -> bool {
    for route in routes {
        let Some((captured, rest)) = match_prefix(route, segments) else {
            continue;
        };

        chain.push(route);
        let before = params.clone();
        params.extend(captured);

        if match_level(route.children, rest, chain, params) {
            return true;
        }
        if rest.is_empty() {
            return true;
        }

        chain.pop();
        *params = before;
    }
    false
}

fn match_prefix<'a>(
    route: &RouteDescriptor,
    segments: &'a [&'a str],
) -> Option<(Vec<(String, String)>, &'a [&'a str])> {
    let mut captured = Vec::new();
    let mut rest = segments;

    for pattern in route.segments() {
        let (first, tail) = rest.split_first()?;
        if let Some(name) = pattern.strip_prefix(':') {
            captured.push((name.to_string(), (*first).to_string()));
        } else if pattern != *first {
            return None;
        }
        rest = tail;
    }

    Some((captured, rest))
}
