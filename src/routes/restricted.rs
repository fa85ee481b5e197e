use crate::{AppState, auth::Session, handlers};
use axum::{Router, routing::get};

/// Restricted Router Module
///
/// Pages listed in the role-restricted route sets. The gatekeeper's role gates send
/// callers without the required role to `/dashboard/overview` before these run.
pub fn restricted_routes() -> Router<AppState> {
    Router::new()
        // President: club management. Also the landing page admins are sent to from
        // `/login`, even though the president gate turns them away.
        .route(
            "/dashboard/clubManagement",
            get(|s: Session| handlers::dashboard_page("dashboard/clubManagement", s)),
        )
        // Teacher: manage members by club or by student.
        .route(
            "/dashboard/adminTeacher/managebyClubs",
            get(|s: Session| handlers::dashboard_page("dashboard/adminTeacher/managebyClubs", s)),
        )
        .route(
            "/dashboard/adminTeacher/managebyStudents",
            get(|s: Session| {
                handlers::dashboard_page("dashboard/adminTeacher/managebyStudents", s)
            }),
        )
        // Admin: blog publishing.
        .route(
            "/dashboard/addBlog",
            get(|s: Session| handlers::dashboard_page("dashboard/addBlog", s)),
        )
}
