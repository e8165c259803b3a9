//! Scenario: Custom Document and App
//!
//! Journey: A developer adds `_document.js` and `_app.js` to control the
//! HTML skeleton and wrap every page.
//!
//! Success Criteria:
//! - Pages render inside the custom document, at `#dhow` when present
//! - `_app.js` wraps every page
//! - Editing either module re-renders every page; neither renders on its own
//! - A document without an insertion point or head fails before rendering

use dhow::{ChangeEvent, DhowError};

use crate::common::*;

const DOCUMENT: &str = r#"// document: {"kind":"element","tag":"html","children":[{"kind":"element","tag":"head","children":[{"kind":"element","tag":"title","children":[{"kind":"text","value":"Site"}]}]},{"kind":"element","tag":"body","children":[{"kind":"element","tag":"div","attributes":{"id":"dhow"}},{"kind":"element","tag":"footer"}]}]}"#;

const DOCUMENT_WITHOUT_HEAD: &str = r#"// document: {"kind":"element","tag":"html","children":[{"kind":"element","tag":"body"}]}"#;

fn site() -> SiteEnv {
    let env = SiteEnv::new();
    env.write_page("index.js", "// render: <h1>Home</h1>");
    env.write_page("about.js", "// render: <h1>About</h1>\n// head: <meta name=\"a\">");
    env
}

#[test]
fn scenario_pages_render_into_custom_document() {
    let mut env = site();
    env.write_page("_document.js", DOCUMENT);

    env.build_initial().unwrap();

    insta::assert_snapshot!(
        env.read_out("about/index.html"),
        @r#"<!DOCTYPE html><html><head><title>Site</title><meta name="a"></head><body><div id="dhow"><h1>About</h1></div><footer></footer></body></html>"#
    );
}

#[test]
fn scenario_shell_modules_produce_no_routes() {
    let mut env = site();
    env.write_page("_document.js", DOCUMENT);
    env.write_page("_app.js", "// app: <div class=\"app\">{page}</div>");

    env.build_initial().unwrap();

    assert_eq!(env.output_files(), vec!["about/index.html", "index.html"]);
    assert_eq!(
        env.transpiled(),
        vec!["about.js", "index.js", "_document.js", "_app.js"]
    );
}

#[test]
fn scenario_app_wraps_every_page() {
    let mut env = site();
    env.write_page("_app.js", "// app: <div class=\"app\">{page}</div>");

    env.build_initial().unwrap();

    assert!(env
        .read_out("index.html")
        .contains("<body><div class=\"app\"><h1>Home</h1></div></body>"));
    assert!(env
        .read_out("about/index.html")
        .contains("<div class=\"app\"><h1>About</h1></div>"));
}

#[test]
fn scenario_editing_app_rerenders_every_page() {
    let mut env = site();
    env.write_page("_app.js", "// app: <div>{page}</div>");
    env.build_initial().unwrap();

    let app = env.write_page("_app.js", "// app: <section>{page}</section>");
    let report = env.build(vec![ChangeEvent::modified(&app)]).unwrap();

    assert_eq!(report.pages.rebuilt.len(), 2);
    assert!(!report.pages.rebuilt.contains(&app));
    assert!(env.read_out("index.html").contains("<section><h1>Home</h1></section>"));
}

#[test]
fn scenario_removing_document_falls_back_to_builtin_shell() {
    let mut env = site();
    let document = env.write_page("_document.js", DOCUMENT);
    env.build_initial().unwrap();

    env.remove(&document);
    let report = env.build(vec![ChangeEvent::removed(&document)]).unwrap();

    assert_eq!(report.pages.rebuilt.len(), 2);
    assert!(report.pages.cache_misses.is_empty());
    assert!(env
        .read_out("index.html")
        .starts_with("<!DOCTYPE html><html lang=\"en\">"));
}

#[test]
fn scenario_document_without_head_fails_before_rendering() {
    let mut env = site();
    env.write_page("_document.js", DOCUMENT_WITHOUT_HEAD);

    let err = env.build_initial().unwrap_err();

    assert!(matches!(
        err,
        DhowError::MissingDocumentStructure { missing: "head" }
    ));
    assert!(env.output_files().is_empty());
}

#[test]
fn scenario_document_must_export_a_component() {
    let mut env = site();
    env.write_page("_document.js", "// default: object");

    let err = env.build_initial().unwrap_err();

    assert!(matches!(err, DhowError::MalformedComponent { .. }));
}
