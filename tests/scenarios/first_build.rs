//! Scenario: First Build
//!
//! Journey: A developer writes a handful of pages and builds the site once.
//!
//! Success Criteria:
//! - Every page renders to `<route>/index.html` under the destination
//! - Enumerated pages render one file per suffix, with props for that suffix
//! - Broken pages fail the build with a message naming the page

use dhow::DhowError;

use crate::common::*;

#[test]
fn scenario_initial_build_renders_every_route() {
    let mut env = SiteEnv::new();
    env.write_page("index.js", "// render: <h1>Home</h1>");
    env.write_page("about.js", "// render: <h1>About</h1>");
    env.write_page("blog/index.js", "// render: <h1>Blog</h1>");
    env.write_page(
        "blog/post.js",
        "// paths: hello,world\n// props\n// render: <article>{slug}</article>",
    );

    let report = env.build_initial().unwrap();

    assert_eq!(
        env.output_files(),
        vec![
            "about/index.html",
            "blog/hello/index.html",
            "blog/index.html",
            "blog/world/index.html",
            "index.html",
        ]
    );
    assert_eq!(report.pages.rebuilt.len(), 4);
    assert_eq!(report.pages.written.len(), 5);
    assert!(report.pages.initial);

    assert!(env.read_out("index.html").contains("<body><h1>Home</h1></body>"));
    assert!(env
        .read_out("blog/world/index.html")
        .contains("<article>world</article>"));
}

#[test]
fn scenario_nested_non_index_page_renders_at_its_bare_name() {
    let mut env = SiteEnv::new();
    env.write_page("docs/setup.js", "// render: <p>setup</p>");

    env.build_initial().unwrap();

    assert_output!(env, "setup/index.html");
    assert_no_output!(env, "docs");
}

#[test]
fn scenario_head_elements_land_in_head() {
    let mut env = SiteEnv::new();
    env.write_page(
        "index.js",
        "// head: <title>Home</title>\n// head: <meta name=\"x\" content=\"y\">\n// render: <p>hi</p>",
    );

    env.build_initial().unwrap();

    let html = env.read_out("index.html");
    insta::assert_snapshot!(
        html,
        @r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>Home</title><meta name="x" content="y"></head><body><p>hi</p></body></html>"#
    );
}

#[test]
fn scenario_staging_is_gone_after_a_build() {
    let mut env = SiteEnv::new();
    env.write_page("index.js", "// render: <p>hi</p>");

    env.build_initial().unwrap();

    assert_no_output!(env, ".staging");
    assert_eq!(env.transpiled(), vec!["index.js"]);
}

#[test]
fn scenario_initial_build_clears_stale_destination() {
    let mut env = SiteEnv::new();
    env.write_page("index.js", "// render: <p>hi</p>");
    std::fs::create_dir_all(env.out_path("old")).unwrap();
    std::fs::write(env.out_path("old/index.html"), "stale").unwrap();

    env.build_initial().unwrap();

    assert_no_output!(env, "old");
    assert_eq!(env.output_files(), vec!["index.html"]);
}

#[test]
fn scenario_missing_pages_directory_builds_nothing() {
    let mut env = SiteEnv::new();
    std::fs::remove_dir_all(env.root().join("pages")).unwrap();

    let report = env.build_initial().unwrap();

    assert!(report.pages.rebuilt.is_empty());
    assert!(env.output_files().is_empty());
}

#[test]
fn scenario_page_without_default_function_fails_the_build() {
    let mut env = SiteEnv::new();
    env.write_page("index.js", "// render: <p>fine</p>");
    let broken = env.write_page("broken.js", "// default: string");

    let err = env.build_initial().unwrap_err();

    match err {
        DhowError::MalformedPage { file, reason } => {
            assert_eq!(file, broken);
            assert!(reason.contains("export default"));
        }
        other => panic!("expected a malformed page, got {other:?}"),
    }
}

#[test]
fn scenario_non_function_props_export_is_malformed() {
    let mut env = SiteEnv::new();
    env.write_page("index.js", "// props: object");

    let err = env.build_initial().unwrap_err();

    assert!(err.to_string().contains("getProps"));
}

#[test]
fn scenario_render_failure_names_the_module() {
    let mut env = SiteEnv::new();
    env.write_page("index.js", "// fail: window is not defined");

    let err = env.build_initial().unwrap_err();

    assert!(matches!(err, DhowError::Runtime { .. }));
    assert!(err.to_string().contains("window is not defined"));
}

#[test]
fn scenario_duplicate_suffixes_render_once() {
    let mut env = SiteEnv::new();
    env.write_page("tags/tag.js", "// paths: rust,rust,./rust\n// props\n// render: {slug}");

    let report = env.build_initial().unwrap();

    assert_eq!(report.pages.written.len(), 1);
    assert_eq!(env.output_files(), vec!["tags/rust/index.html"]);
}
