//! Route resolution
//!
//! Maps a page to the routes it renders. A page in logical directory `blog`
//! either enumerates suffixes (`getPaths`) that become `blog/<suffix>`, or
//! renders exactly one route: `blog` itself for `index.js`, otherwise the
//! bare base name (`blog/about.js` renders `about`, a sibling of `blog`).

use crate::domain::value_objects::{join_route, normalize_route, Route};

const INDEX_PAGE: &str = "index";

/// Routes of one page, deduplicated in enumeration order
pub fn resolve_routes(
    logical_dir: &str,
    base_name: &str,
    enumerated: Option<Vec<String>>,
) -> Vec<Route> {
    let dir = normalize_route(logical_dir);

    let paths = match enumerated {
        Some(suffixes) => suffixes
            .iter()
            .map(|suffix| join_route(&dir, suffix))
            .collect(),
        None if base_name == INDEX_PAGE => vec![dir.clone()],
        None => vec![normalize_route(base_name)],
    };

    let mut routes: Vec<Route> = Vec::with_capacity(paths.len());
    for path in paths {
        if routes.iter().any(|r| r.path() == path) {
            continue;
        }
        let suffix = suffix_under(&dir, &path);
        routes.push(Route::new(&path, suffix));
    }
    routes
}

/// The part of `route` below `dir`; the whole route when it is not under `dir`
fn suffix_under(dir: &str, route: &str) -> String {
    if dir.is_empty() {
        return route.to_string();
    }
    if route == dir {
        return String::new();
    }
    route
        .strip_prefix(dir)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(route)
        .to_string()
}
