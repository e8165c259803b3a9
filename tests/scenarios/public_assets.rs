//! Scenario: Public Assets
//!
//! Journey: A site ships images and stylesheets from `public/` next to its
//! pages.
//!
//! Success Criteria:
//! - The initial build mirrors `public/` into the destination
//! - Incremental builds copy changed assets and delete removed ones
//! - Asset changes never re-render pages

use dhow::ChangeEvent;

use crate::common::*;

#[test]
fn scenario_initial_build_mirrors_public_tree() {
    let mut env = SiteEnv::new();
    env.write_page("index.js", "// render: <p>hi</p>");
    env.write_public("robots.txt", "User-agent: *");
    env.write_public("img/logo.svg", "<svg/>");

    let report = env.build_initial().unwrap();

    assert_eq!(report.assets.copied.len(), 2);
    assert_eq!(
        env.output_files(),
        vec!["img/logo.svg", "index.html", "robots.txt"]
    );
}

#[test]
fn scenario_changed_asset_is_copied_without_rendering() {
    let mut env = SiteEnv::new();
    env.write_page("index.js", "// render: <p>hi</p>");
    env.write_public("style.css", "body {}");
    env.build_initial().unwrap();

    let css = env.write_public("style.css", "body { margin: 0 }");
    let report = env.build(vec![ChangeEvent::modified(&css)]).unwrap();

    assert!(report.pages.skipped);
    assert_eq!(report.assets.copied, vec![env.out_path("style.css")]);
    assert_eq!(env.read_out("style.css"), "body { margin: 0 }");
}

#[test]
fn scenario_removed_asset_is_deleted_and_pruned() {
    let mut env = SiteEnv::new();
    env.write_page("index.js", "// render: <p>hi</p>");
    let logo = env.write_public("img/logo.svg", "<svg/>");
    env.build_initial().unwrap();

    env.remove(&logo);
    let report = env.build(vec![ChangeEvent::removed(&logo)]).unwrap();

    assert_eq!(report.assets.removed, vec![env.out_path("img/logo.svg")]);
    assert_no_output!(env, "img");
    assert_output!(env, "index.html");
}

#[test]
fn scenario_asset_added_then_removed_before_build_is_skipped() {
    let mut env = SiteEnv::new();
    env.build_initial().unwrap();

    let flash = env.public_path("flash.txt");
    let report = env.build(vec![ChangeEvent::added(&flash)]).unwrap();

    assert!(report.assets.copied.is_empty());
    assert_no_output!(env, "flash.txt");
}

#[test]
fn scenario_hidden_public_files_are_published() {
    let mut env = SiteEnv::new();
    env.write_public(".nojekyll", "");
    env.write_public(".well-known/security.txt", "Contact: mailto:security@example.com");
    env.build_initial().unwrap();

    assert_output!(env, ".nojekyll");
    assert_output!(env, ".well-known/security.txt");

    let txt = env.write_public(".well-known/security.txt", "Contact: https://example.com");
    env.build(vec![ChangeEvent::modified(&txt)]).unwrap();

    assert_eq!(
        env.read_out(".well-known/security.txt"),
        "Contact: https://example.com"
    );
}
