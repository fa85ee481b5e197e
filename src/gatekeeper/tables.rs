use crate::auth::Role;

/// Login entry point and the redirect target of the login gate.
pub const LOGIN_PATH: &str = "/login";
/// Default landing page for authenticated users.
pub const DEFAULT_LOGIN_REDIRECT: &str = "/dashboard/overview";
/// Where signed-out users are sent.
pub const DEFAULT_LOGOUT_REDIRECT: &str = LOGIN_PATH;
/// Landing page for teachers visiting the login page.
pub const TEACHER_LANDING: &str = "/dashboard/adminTeacher/managebyClubs";
/// Landing page for admins visiting the login page.
pub const ADMIN_LANDING: &str = "/dashboard/clubManagement";

/// Trailing marker turning a public entry into a prefix match.
const WILDCARD: char = '*';

/// RoutePattern
///
/// A public route entry: either an exact path or a prefix wildcard such as `/blog/*`.
/// Only the `*` is stripped from a wildcard, so `/blog/*` matches `/blog/42` but neither
/// `/blog` nor `/blogger/42`. An entry like `/blog*` has no slash boundary and matches
/// `/blogger` too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(String),
    Prefix(String),
}

impl RoutePattern {
    pub fn parse(entry: &str) -> Self {
        match entry.strip_suffix(WILDCARD) {
            Some(prefix) => RoutePattern::Prefix(prefix.to_string()),
            None => RoutePattern::Exact(entry.to_string()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(route) => route == path,
            RoutePattern::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

/// RoleRestriction
///
/// A named set of exact paths reserved for one role.
#[derive(Debug, Clone)]
pub struct RoleRestriction {
    pub name: &'static str,
    pub role: Role,
    pub paths: Vec<String>,
}

impl RoleRestriction {
    pub fn new(name: &'static str, role: Role, paths: &[&str]) -> Self {
        Self {
            name,
            role,
            paths: owned(paths),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

/// Landings
///
/// Redirect targets produced by the gatekeeper.
#[derive(Debug, Clone)]
pub struct Landings {
    pub login: String,
    pub default: String,
    pub teacher: String,
    pub admin: String,
}

impl Default for Landings {
    fn default() -> Self {
        Self {
            login: LOGIN_PATH.to_string(),
            default: DEFAULT_LOGIN_REDIRECT.to_string(),
            teacher: TEACHER_LANDING.to_string(),
            admin: ADMIN_LANDING.to_string(),
        }
    }
}

/// RouteTables
///
/// The route classification tables. Built once at startup, shared read-only through
/// `AppState`, and never mutated while requests are served.
#[derive(Debug, Clone)]
pub struct RouteTables {
    pub public: Vec<RoutePattern>,
    pub auth_pages: Vec<String>,
    pub api_auth_prefixes: Vec<String>,
    /// Evaluated in order; see `rules::Rule::RoleGates`.
    pub restricted: Vec<RoleRestriction>,
    pub landing: Landings,
}

impl RouteTables {
    /// The portal's route tables.
    pub fn club_portal() -> Self {
        Self {
            public: [
                "/",
                "/home",
                "/documentation",
                "/about",
                "/api/hello",
                "/api/serviceApis",
                "/api/betaAuth",
                "/blog/*",
                "/stories",
            ]
            .iter()
            .map(|entry| RoutePattern::parse(entry))
            .collect(),
            auth_pages: owned(&[LOGIN_PATH]),
            api_auth_prefixes: owned(&["/api/auth"]),
            restricted: vec![
                RoleRestriction::new("president", Role::President, &["/dashboard/clubManagement"]),
                RoleRestriction::new(
                    "teacher",
                    Role::Teacher,
                    &[
                        "/dashboard/adminTeacher/managebyClubs",
                        "/dashboard/adminTeacher/managebyStudents",
                    ],
                ),
                RoleRestriction::new("admin", Role::Admin, &["/dashboard/addBlog"]),
            ],
            landing: Landings::default(),
        }
    }

    pub fn is_api_auth(&self, path: &str) -> bool {
        self.api_auth_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn is_auth_page(&self, path: &str) -> bool {
        self.auth_pages.iter().any(|p| p == path)
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|pattern| pattern.matches(path))
    }
}

impl Default for RouteTables {
    fn default() -> Self {
        Self::club_portal()
    }
}

fn owned(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}
