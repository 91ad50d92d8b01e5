//! WASM entry points for browser use.
//!
//! Each entry point takes a project snapshot (JSON) and a configuration
//! (TOML), runs one generator on a fully loaded working copy and returns
//! either the report plus the touched microflows, or the error.

use wasm_bindgen::prelude::*;

use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::generate::{self, RunKind, RunReport};
use crate::microflow::Microflow;
use crate::model::{DocumentKind, WorkingCopy, parse_working_copy};

/// Create validation microflows. Returns a `RunResult` object.
#[wasm_bindgen]
pub fn generate_validation(snapshot_json: &str, config_toml: &str) -> JsValue {
    to_js(&run_inner(RunKind::Validation, snapshot_json, config_toml))
}

/// Create page open-with-log microflows. Returns a `RunResult` object.
#[wasm_bindgen]
pub fn generate_page_logging(snapshot_json: &str, config_toml: &str) -> JsValue {
    to_js(&run_inner(RunKind::PageLogging, snapshot_json, config_toml))
}

/// Recolor activities. Returns a `RunResult` object.
#[wasm_bindgen]
pub fn recolor(snapshot_json: &str, config_toml: &str) -> JsValue {
    to_js(&run_inner(RunKind::Recolor, snapshot_json, config_toml))
}

/// List microflows without an allowed prefix. Returns a `RunResult` object.
#[wasm_bindgen]
pub fn audit_naming(snapshot_json: &str, config_toml: &str) -> JsValue {
    to_js(&run_inner(RunKind::NamingAudit, snapshot_json, config_toml))
}

/// Text outline of a single microflow JSON document.
#[wasm_bindgen]
pub fn render_outline(microflow_json: &str) -> Result<String, JsValue> {
    serde_json::from_str::<Microflow>(microflow_json)
        .map(|mf| crate::render::outline(&mf))
        .map_err(|e| JsValue::from_str(&format!("Failed to parse microflow JSON: {e}")))
}

fn to_js(result: &RunResult) -> JsValue {
    serde_wasm_bindgen::to_value(result).unwrap_or(JsValue::NULL)
}

fn run_inner(kind: RunKind, snapshot_json: &str, config_toml: &str) -> RunResult {
    match try_run(kind, snapshot_json, config_toml) {
        Ok((report, microflows)) => RunResult::Success { report, microflows },
        Err(e) => RunResult::Error(ErrorDto::from(e)),
    }
}

fn try_run(
    kind: RunKind,
    snapshot_json: &str,
    config_toml: &str,
) -> Result<(RunReport, Vec<Microflow>), GenError> {
    let config = GeneratorConfig::from_toml_str(config_toml)?;
    let mut wc = parse_working_copy(snapshot_json)?;
    let mut report = RunReport::new(kind);

    match kind {
        RunKind::Validation => generate::generate_validation(&mut wc, &config.validation, &mut report)?,
        RunKind::PageLogging => {
            generate::generate_page_logging(&mut wc, &config.page_logging, &mut report)?
        }
        RunKind::Recolor => generate::recolor_microflows(&mut wc, &config.recolor, &mut report)?,
        RunKind::NamingAudit => generate::audit_naming(&wc, &config.naming, &mut report)?,
    }

    let microflows = match kind {
        RunKind::Recolor => generate::recolor::selected_microflows(&wc, &config.recolor.modules)?
            .into_iter()
            .map(|id| wc.microflow(id).cloned())
            .collect::<Result<Vec<_>, GenError>>()?,
        _ => created_microflows(&wc, &report.created_microflows)?,
    };
    Ok((report, microflows))
}

fn created_microflows(wc: &WorkingCopy, names: &[String]) -> Result<Vec<Microflow>, GenError> {
    names
        .iter()
        .filter_map(|name| wc.find_by_qualified_name(DocumentKind::Microflow, name))
        .map(|id| wc.microflow(id).cloned())
        .collect()
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct ErrorDto {
    code: String,
    message: String,
}

impl From<GenError> for ErrorDto {
    fn from(e: GenError) -> Self {
        ErrorDto {
            code: e.code().to_string(),
            message: e.to_string(),
        }
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum RunResult {
    #[serde(rename = "success")]
    Success {
        report: RunReport,
        microflows: Vec<Microflow>,
    },
    #[serde(rename = "error")]
    Error(ErrorDto),
}
