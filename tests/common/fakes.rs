//! In-process stand-ins for esbuild and node.
//!
//! `FakeTranspiler` copies sources into staging unchanged, so the staged
//! module still carries the directive comments `FakeRuntime` interprets:
//!
//! ```text
//! // default: <typeof>      kind of the default export (function when absent)
//! // paths: a,b             getPaths() result
//! // props                  getProps(suffix) returns {"slug": suffix}
//! // props: <typeof>        getProps export of another kind
//! // render: <markup>       page markup; {slug} is replaced from props
//! // head: <markup>         one head element (repeatable)
//! // app: <markup>          wrapper markup around {page}
//! // document: <json>       element tree returned by a document component
//! // fail: <message>        rendering fails with a runtime error
//! ```

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use dhow::domain::entities::Node;
use dhow::domain::ports::{ExportKind, ModuleShape, PageRuntime, RenderedPage, TranspileJob, Transpiler};
use dhow::{DhowError, DhowResult};

/// Names of the files transpiled so far, in order
pub type TranspileLog = Arc<Mutex<Vec<String>>>;

/// Copies every job's source to its output
pub struct FakeTranspiler {
    transpiled: TranspileLog,
}

impl FakeTranspiler {
    pub fn new() -> (Self, TranspileLog) {
        let log = TranspileLog::default();
        (
            Self {
                transpiled: log.clone(),
            },
            log,
        )
    }
}

impl Transpiler for FakeTranspiler {
    fn transpile(&self, jobs: &[TranspileJob]) -> DhowResult<()> {
        for job in jobs {
            if let Some(parent) = job.output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&job.source, &job.output).map_err(|e| DhowError::Transpile {
                file: job.source.clone(),
                message: e.to_string(),
            })?;
            self.transpiled
                .lock()
                .unwrap()
                .push(job.source.file_name().unwrap().to_string_lossy().into_owned());
        }
        Ok(())
    }
}

/// Interprets directive comments in staged modules
#[derive(Default)]
pub struct FakeRuntime;

fn directive(content: &str, name: &str) -> Option<String> {
    directives(content, name).into_iter().next()
}

fn directives(content: &str, name: &str) -> Vec<String> {
    let bare = format!("// {}", name);
    let prefix = format!("// {}:", name);
    content
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            if line == bare {
                Some(String::new())
            } else {
                line.strip_prefix(&prefix).map(|v| v.trim().to_string())
            }
        })
        .collect()
}

fn read(module: &Path) -> DhowResult<String> {
    Ok(fs::read_to_string(module)?)
}

fn runtime_error(module: &Path, message: impl Into<String>) -> DhowError {
    DhowError::Runtime {
        module: module.to_path_buf(),
        message: message.into(),
    }
}

impl PageRuntime for FakeRuntime {
    fn inspect(&self, module: &Path) -> DhowResult<ModuleShape> {
        let content = read(module)?;
        let get_props = match directive(&content, "props") {
            Some(kind) if kind.is_empty() => ExportKind::Function,
            Some(kind) => ExportKind::from_typeof(&kind),
            None => ExportKind::Missing,
        };
        Ok(ModuleShape {
            default: ExportKind::from_typeof(
                &directive(&content, "default").unwrap_or_else(|| "function".to_string()),
            ),
            get_paths: if directive(&content, "paths").is_some() {
                ExportKind::Function
            } else {
                ExportKind::Missing
            },
            get_props,
        })
    }

    fn paths(&self, module: &Path) -> DhowResult<Vec<String>> {
        let content = read(module)?;
        let list = directive(&content, "paths").unwrap_or_default();
        Ok(list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect())
    }

    fn props(&self, _module: &Path, suffix: &str) -> DhowResult<Value> {
        Ok(json!({ "slug": suffix }))
    }

    fn render(&self, page: &Path, wrapper: Option<&Path>, props: &Value) -> DhowResult<RenderedPage> {
        let content = read(page)?;
        if let Some(message) = directive(&content, "fail") {
            return Err(runtime_error(page, message));
        }

        let slug = props.get("slug").and_then(Value::as_str).unwrap_or_default();
        let mut html = directive(&content, "render")
            .unwrap_or_else(|| "<main></main>".to_string())
            .replace("{slug}", slug);

        if let Some(wrapper) = wrapper {
            let app = read(wrapper)?;
            let template = directive(&app, "app").unwrap_or_else(|| "{page}".to_string());
            html = template.replace("{page}", &html);
        }

        Ok(RenderedPage {
            html,
            head: directives(&content, "head"),
        })
    }

    fn document(&self, module: &Path) -> DhowResult<Node> {
        let content = read(module)?;
        let tree = directive(&content, "document")
            .ok_or_else(|| runtime_error(module, "no document tree"))?;
        Ok(serde_json::from_str(&tree)?)
    }
}
