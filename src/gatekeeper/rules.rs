use crate::auth::{Role, Session};

use super::tables::RouteTables;

/// Decision
///
/// The gatekeeper's sole output for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<'t> {
    Proceed,
    /// Redirect to an absolute path within the portal.
    RedirectTo(&'t str),
}

/// Rule
///
/// One step of the gatekeeper. Rules run in the order of [`RULES`]; the first one that
/// returns a decision ends the evaluation. Public classification is not a rule of its
/// own: it only feeds the login gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Paths of the authentication subsystem always proceed.
    AuthSubsystemBypass,
    /// The login page sends signed-in users to their landing page.
    AuthPageRedirect,
    /// Anonymous callers may only reach public paths.
    LoginGate,
    /// Restricted sets require their role.
    RoleGates,
}

/// Precedence: auth bypass > auth page > login gate > role gates.
pub const RULES: [Rule; 4] = [
    Rule::AuthSubsystemBypass,
    Rule::AuthPageRedirect,
    Rule::LoginGate,
    Rule::RoleGates,
];

impl Rule {
    pub fn apply<'t>(
        self,
        tables: &'t RouteTables,
        path: &str,
        session: Option<&Session>,
    ) -> Option<Decision<'t>> {
        match self {
            Rule::AuthSubsystemBypass => tables.is_api_auth(path).then_some(Decision::Proceed),

            Rule::AuthPageRedirect => {
                if !tables.is_auth_page(path) {
                    return None;
                }
                let Some(session) = session else {
                    return Some(Decision::Proceed);
                };
                let target = match session.role() {
                    Some(Role::Teacher) => &tables.landing.teacher,
                    Some(Role::Admin) => &tables.landing.admin,
                    _ => &tables.landing.default,
                };
                Some(Decision::RedirectTo(target))
            }

            Rule::LoginGate => (session.is_none() && !tables.is_public(path))
                .then_some(Decision::RedirectTo(&tables.landing.login)),

            // Each restricted set is checked independently: a path listed in two sets
            // must satisfy both.
            Rule::RoleGates => {
                let role = session.and_then(Session::role);
                tables
                    .restricted
                    .iter()
                    .find(|set| set.contains(path) && role != Some(set.role))
                    .map(|_| Decision::RedirectTo(&tables.landing.default))
            }
        }
    }
}

/// Evaluates the gatekeeper for one request. Pure: the same inputs always give the same
/// decision.
pub fn evaluate<'t>(tables: &'t RouteTables, path: &str, session: Option<&Session>) -> Decision<'t> {
    RULES
        .iter()
        .find_map(|rule| rule.apply(tables, path, session))
        .unwrap_or(Decision::Proceed)
}
