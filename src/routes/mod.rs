//! Router Module Index
//!
//! Groups the portal's routes by the access the gatekeeper grants them. Access control
//! itself is applied once, by the gatekeeper middleware wrapping the whole router; these
//! modules only decide which handler serves which path.

/// Routes listed in the public route table, reachable without a session.
pub mod public;

/// The authentication subsystem (`/api/auth/*`, always bypassed) and the login page.
pub mod auth;

/// Dashboard pages open to any signed-in user.
pub mod authenticated;

/// Dashboard pages reserved for presidents, teachers or admins by the role gates.
pub mod restricted;
