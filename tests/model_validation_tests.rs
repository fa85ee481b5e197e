use chrono::Utc;
use club_portal::{
    auth::{Role, Session, SessionUser},
    models::{PageView, Viewer},
};
use serde_json::json;

#[test]
fn test_role_ids_match_backend() {
    assert_eq!(Role::from_id(1), Some(Role::Student));
    assert_eq!(Role::from_id(2), Some(Role::President));
    assert_eq!(Role::from_id(3), Some(Role::Teacher));
    assert_eq!(Role::from_id(99), Some(Role::Admin));
    assert_eq!(Role::from_id(0), None);
    assert_eq!(Role::from_id(4), None);

    for role in [Role::Student, Role::President, Role::Teacher, Role::Admin] {
        assert_eq!(Role::from_id(role.id()), Some(role));
    }
    assert_eq!(Role::Admin.name(), "admin");
}

#[test]
fn test_session_user_tolerates_missing_fields() {
    let user: SessionUser = serde_json::from_value(json!({ "stu_id": "2320610" })).unwrap();

    assert_eq!(user.stu_id, "2320610");
    assert_eq!(user.role_id, None);
    assert!(user.api_token.is_empty());
}

#[test]
fn test_viewer_never_exposes_api_token() {
    let session = Session {
        user: SessionUser {
            api_token: "secret-backend-token".to_string(),
            stu_id: "2320610".to_string(),
            eng_name: "Michael".to_string(),
            role_id: Some(2),
            role_name: "president".to_string(),
            ..SessionUser::default()
        },
        expires: Utc::now(),
    };

    let page = PageView::new("dashboard/overview", Some(&session));
    let body = serde_json::to_string(&page).unwrap();

    assert!(!body.contains("secret-backend-token"));
    assert_eq!(
        page.viewer,
        Some(Viewer {
            stu_id: "2320610".to_string(),
            chi_name: String::new(),
            eng_name: "Michael".to_string(),
            grade: String::new(),
            role_name: "president".to_string(),
        })
    );
}

#[test]
fn test_anonymous_page_has_no_viewer() {
    let page = PageView::new("stories", None);
    assert_eq!(serde_json::to_value(&page).unwrap(), json!({ "page": "stories", "viewer": null }));
}
