use club_portal::gatekeeper::matcher::is_gated;

#[test]
fn test_pages_are_gated() {
    for path in ["/", "/login", "/dashboard/overview", "/blog/42", "/stories"] {
        assert!(is_gated(path), "{path}");
    }
}

#[test]
fn test_framework_internals_skip_the_gatekeeper() {
    assert!(!is_gated("/_next/static/chunks/main.js"));
    assert!(!is_gated("/_next/image"));
    assert!(!is_gated("/_next"));
}

#[test]
fn test_static_files_skip_the_gatekeeper() {
    for path in [
        "/favicon.ico",
        "/styles/site.css",
        "/images/logo.png",
        "/images/photo.JPG.jpeg",
        "/fonts/inter.woff2",
        "/manifest.webmanifest",
        "/reports/hours.xlsx",
        "/scripts/app.js",
        "/index.html",
    ] {
        assert!(!is_gated(path), "{path}");
    }
}

#[test]
fn test_json_is_not_a_static_script() {
    assert!(is_gated("/data/clubs.json"));
    assert!(is_gated("/dashboard/export.pdf"));
}

#[test]
fn test_extension_anywhere_in_the_path_counts() {
    assert!(!is_gated("/assets/theme.css/variant"));
}

#[test]
fn test_api_and_trpc_are_always_gated() {
    assert!(is_gated("/api/hello"));
    assert!(is_gated("/api/export/hours.csv"));
    assert!(is_gated("/api/auth/session"));
    assert!(is_gated("/trpc/clubs.list.js"));
}
