//! Scenario: Shared Components
//!
//! Journey: Pages import components from outside the pages directory and
//! from each other; the developer edits those shared files.
//!
//! Success Criteria:
//! - Editing an imported file re-renders the pages importing it
//! - Shallow propagation stops after one level of importers
//! - Transitive propagation follows every level, and terminates on cycles
//! - Dependencies are refreshed from the new source on every render

use dhow::{ChangeEvent, Propagation};

use crate::common::*;

/// `pages/card.js` imports the component, `pages/index.js` imports the card
fn layered_site(propagation: Propagation) -> SiteEnv {
    let mut env = SiteEnv::with_propagation(propagation);
    std::fs::create_dir_all(env.root().join("components")).unwrap();
    std::fs::write(env.root().join("components/button.js"), "export default 1").unwrap();
    env.write_page(
        "card.js",
        "import Button from '../components/button'\n// render: <div>card</div>",
    );
    env.write_page(
        "index.js",
        "import Card from './card.js'\n// render: <main>home</main>",
    );
    env.write_page("about.js", "// render: <p>about</p>");
    env.build_initial().unwrap();
    env
}

#[test]
fn scenario_component_edit_rebuilds_direct_importers() {
    let mut env = layered_site(Propagation::Shallow);
    let button = env.root().join("components/button.js");

    let report = env.build(vec![ChangeEvent::modified(&button)]).unwrap();

    assert_eq!(report.pages.rebuilt, vec![env.page_path("card.js")]);
}

#[test]
fn scenario_shallow_propagation_stops_after_one_level() {
    let mut env = layered_site(Propagation::Shallow);
    let button = env.root().join("components/button.js");

    let report = env.build(vec![ChangeEvent::modified(&button)]).unwrap();

    assert!(!report.pages.rebuilt.contains(&env.page_path("index.js")));
}

#[test]
fn scenario_transitive_propagation_reaches_every_importer() {
    let mut env = layered_site(Propagation::Transitive);
    let button = env.root().join("components/button.js");

    let report = env.build(vec![ChangeEvent::modified(&button)]).unwrap();

    assert_eq!(
        report.pages.rebuilt,
        vec![env.page_path("card.js"), env.page_path("index.js")]
    );
}

#[test]
fn scenario_editing_an_imported_page_rebuilds_it_and_its_importers() {
    let mut env = layered_site(Propagation::Shallow);
    let card = env.page_path("card.js");

    let report = env.build(vec![ChangeEvent::modified(&card)]).unwrap();

    assert_eq!(report.pages.rebuilt, vec![card, env.page_path("index.js")]);
}

#[test]
fn scenario_import_cycle_terminates() {
    let mut env = SiteEnv::with_propagation(Propagation::Transitive);
    let a = env.write_page("a.js", "import B from './b'\n// render: a");
    let b = env.write_page("b.js", "import A from './a'\n// render: b");
    env.build_initial().unwrap();

    let report = env.build(vec![ChangeEvent::modified(&a)]).unwrap();

    assert_eq!(report.pages.rebuilt, vec![a, b]);
}

#[test]
fn scenario_dropped_import_stops_propagation() {
    let mut env = layered_site(Propagation::Shallow);
    let card = env.write_page("card.js", "// render: <div>plain card</div>");
    env.build(vec![ChangeEvent::modified(&card)]).unwrap();

    let button = env.root().join("components/button.js");
    let report = env.build(vec![ChangeEvent::modified(&button)]).unwrap();

    assert!(report.pages.rebuilt.is_empty());
    assert!(report.pages.skipped);
}

#[test]
fn scenario_removed_component_is_not_propagated() {
    let mut env = layered_site(Propagation::Shallow);
    let button = env.root().join("components/button.js");
    std::fs::remove_file(&button).unwrap();

    let report = env.build(vec![ChangeEvent::removed(&button)]).unwrap();

    // Removals only delete outputs of pages; importers wait for their own edit
    assert!(report.pages.rebuilt.is_empty());
    assert!(report.pages.cache_misses.is_empty());
}
