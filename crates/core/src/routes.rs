//! Static route table of the console
//!
//! Routing is fragment based: the browser location looks like `/#/providers` and only
//! the part after `#` is matched. Matching ignores ASCII case and a trailing slash.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    Dashboard,
    Providers,
    Endpoints,
    Stats,
    #[serde(rename = "APITest")]
    ApiTest,
    UserCenter,
}

/// Views that routes render, loaded lazily by the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Login,
    Layout,
    Dashboard,
    Providers,
    Endpoints,
    Stats,
    #[serde(rename = "APITest")]
    ApiTest,
    UserCenter,
}

/// One node of the route tree
#[derive(Debug)]
pub struct RouteRecord {
    /// Absolute for top-level records, relative to the parent for children
    pub path: &'static str,
    pub name: Option<Route>,
    pub view: View,
    pub children: &'static [RouteRecord],
}

/// The route tree, fixed at build time
pub static ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: "/login",
        name: Some(Route::Login),
        view: View::Login,
        children: &[],
    },
    RouteRecord {
        path: "/",
        name: None,
        view: View::Layout,
        children: &[
            RouteRecord {
                path: "",
                name: Some(Route::Dashboard),
                view: View::Dashboard,
                children: &[],
            },
            RouteRecord {
                path: "providers",
                name: Some(Route::Providers),
                view: View::Providers,
                children: &[],
            },
            RouteRecord {
                path: "endpoints",
                name: Some(Route::Endpoints),
                view: View::Endpoints,
                children: &[],
            },
            RouteRecord {
                path: "stats",
                name: Some(Route::Stats),
                view: View::Stats,
                children: &[],
            },
            RouteRecord {
                path: "test",
                name: Some(Route::ApiTest),
                view: View::ApiTest,
                children: &[],
            },
            RouteRecord {
                path: "user-center",
                name: Some(Route::UserCenter),
                view: View::UserCenter,
                children: &[],
            },
        ],
    },
];

/// A matched route and the chain of views it renders, outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub route: Route,
    pub views: Vec<View>,
}

impl Route {
    pub const ALL: [Self; 7] = [
        Self::Login,
        Self::Dashboard,
        Self::Providers,
        Self::Endpoints,
        Self::Stats,
        Self::ApiTest,
        Self::UserCenter,
    ];

    /// Route name as registered in the table
    pub const fn name(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Providers => "Providers",
            Self::Endpoints => "Endpoints",
            Self::Stats => "Stats",
            Self::ApiTest => "APITest",
            Self::UserCenter => "UserCenter",
        }
    }

    /// Absolute path inside the fragment
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/",
            Self::Providers => "/providers",
            Self::Endpoints => "/endpoints",
            Self::Stats => "/stats",
            Self::ApiTest => "/test",
            Self::UserCenter => "/user-center",
        }
    }

    /// Location fragment, e.g. `#/stats`
    pub fn fragment(self) -> String {
        format!("#{}", self.path())
    }

    /// Full-page href, e.g. `/#/stats`
    pub fn href(self) -> String {
        format!("/#{}", self.path())
    }

    /// Whether the route renders inside the layout shell
    pub const fn in_layout(self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Look up a route by its registered name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.name() == name)
    }

    /// Match a path against the route table
    pub fn from_path(path: &str) -> Option<Self> {
        resolve(path).map(|resolved| resolved.route)
    }

    /// Match a location fragment (`#/providers`, `/providers` or empty)
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        Self::from_path(fragment_path(fragment))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strip the `#` from a location fragment; an empty fragment is the root
pub fn fragment_path(fragment: &str) -> &str {
    let path = fragment.strip_prefix('#').unwrap_or(fragment);
    if path.is_empty() { "/" } else { path }
}

/// Resolve a path to its route and view chain
pub fn resolve(path: &str) -> Option<Resolved> {
    let wanted = normalize(path);
    let mut views = Vec::new();
    resolve_in(ROUTES, "", wanted, &mut views)
}

fn resolve_in(
    records: &[RouteRecord],
    parent: &str,
    wanted: &str,
    views: &mut Vec<View>,
) -> Option<Resolved> {
    for record in records {
        let full = join(parent, record.path);
        views.push(record.view);

        if let Some(route) = record.name {
            if normalize(&full).eq_ignore_ascii_case(wanted) {
                return Some(Resolved {
                    route,
                    views: views.clone(),
                });
            }
        }

        if let Some(found) = resolve_in(record.children, &full, wanted, views) {
            return Some(found);
        }
        views.pop();
    }
    None
}

fn join(parent: &str, child: &str) -> String {
    if child.starts_with('/') || parent.is_empty() {
        child.to_string()
    } else if parent.ends_with('/') {
        format!("{parent}{child}")
    } else {
        format!("{parent}/{child}")
    }
}

/// Drop query and trailing slash
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
