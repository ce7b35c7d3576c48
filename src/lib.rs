pub mod codegen;
pub mod ddl;
pub mod model;
pub mod types;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use codegen::{Artifacts, GenerateError, generate_all};
pub use ddl::{ParseOutcome, Warning, parse_ddl};
pub use model::SchemaModel;

/// Full pipeline result: the generated artifacts plus the parse
/// warnings and the model they came from.
#[derive(Debug)]
pub struct PipelineOutput {
    pub model: SchemaModel,
    pub warnings: Vec<Warning>,
    pub artifacts: Artifacts,
}

/// Run the whole pipeline: parse the DDL text, validate the assembled
/// model, fan out to every generator.
///
/// Parsing is best-effort and never fails; the only error is a model
/// with a foreign key pointing at a table absent from the dump.
pub fn run_pipeline(ddl: &str) -> Result<PipelineOutput, GenerateError> {
    let ParseOutcome { model, warnings } = parse_ddl(ddl);
    for warning in &warnings {
        tracing::warn!(%warning, "ddl parse warning");
    }

    let artifacts = generate_all(&model)?;
    Ok(PipelineOutput {
        model,
        warnings,
        artifacts,
    })
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
struct ArtifactBundle<'a> {
    artifacts: &'a Artifacts,
    warnings: Vec<String>,
}

/// Generate all artifacts from DDL text, returned as a JSON bundle of
/// `{ artifacts, warnings }`.
#[wasm_bindgen(js_name = "generateFromDdl")]
pub fn generate_from_ddl(ddl: &str) -> Result<String, String> {
    let output = run_pipeline(ddl).map_err(|e| e.to_string())?;
    let bundle = ArtifactBundle {
        artifacts: &output.artifacts,
        warnings: output.warnings.iter().map(|w| w.to_string()).collect(),
    };
    serde_json::to_string(&bundle).map_err(|e| e.to_string())
}
