//! Request matcher deciding which paths reach the gatekeeper at all.
//!
//! Framework-internal paths and static files are served without a session check;
//! anything under `/api` or `/trpc` is always gated, file extension or not.

/// Extensions served as static assets. `js` is handled separately so that `.json`
/// endpoints stay gated.
const STATIC_EXTENSIONS: &[&str] = &[
    "html", "htm", "css", "jpg", "jpeg", "webp", "png", "gif", "svg", "ttf", "woff2", "woff",
    "ico", "csv", "docx", "doc", "xlsx", "xls", "zip", "webmanifest",
];

const ALWAYS_GATED: &[&str] = &["/api", "/trpc"];

const FRAMEWORK_INTERNAL: &str = "_next";

/// Returns true when the gatekeeper must evaluate `path`.
pub fn is_gated(path: &str) -> bool {
    if ALWAYS_GATED.iter().any(|prefix| path.starts_with(prefix)) {
        return true;
    }

    let rest = path.strip_prefix('/').unwrap_or(path);
    !(rest.starts_with(FRAMEWORK_INTERNAL) || has_static_extension(rest))
}

/// Any `.` followed by a static extension counts, wherever it sits in the path.
fn has_static_extension(path: &str) -> bool {
    path.match_indices('.').any(|(idx, _)| {
        let after = &path[idx + 1..];
        is_script(after) || STATIC_EXTENSIONS.iter().any(|ext| after.starts_with(ext))
    })
}

fn is_script(after_dot: &str) -> bool {
    after_dot.starts_with("js") && !after_dot[2..].starts_with("on")
}
