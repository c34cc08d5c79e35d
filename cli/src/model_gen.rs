#![deny(missing_docs)]

//! # Model Generation Command
//!
//! Compiles `components.schemas` of an OpenAPI document into the declaration
//! model and writes it out for code generators.

use oapigen_core::error::{AppError, AppResult};
use oapigen_core::{compile_schemas, CollectOptions, ModelDocument, NameAllocator, NameTable};
use std::fs;
use std::path::PathBuf;

/// Arguments for the model command.
#[derive(clap::Args, Debug, Clone)]
pub struct ModelArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long = "in", env = "OAPIGEN_IN")]
    pub input: PathBuf,

    /// Output path for the model.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long = "out", env = "OAPIGEN_OUT")]
    pub output: Option<PathBuf>,

    /// Package name recorded in the model for downstream generators.
    #[clap(long, env = "OAPIGEN_PACKAGE")]
    pub package: Option<String>,

    /// Also hoist nested object schemas into their own declarations.
    #[clap(long)]
    pub hoist_nested_objects: bool,
}

/// Executes the model compilation.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &ModelArgs) -> AppResult<()> {
    if !args.input.exists() {
        return Err(AppError::General(format!(
            "OpenAPI document not found: {:?}",
            args.input
        )));
    }

    let content = fs::read_to_string(&args.input)?;

    // 1. Walk components.schemas into the registry
    let options = CollectOptions {
        hoist_nested_objects: args.hoist_nested_objects,
    };
    let registry = compile_schemas(&content, options)?;

    let dangling = registry.dangling_refs();
    if !dangling.is_empty() {
        return Err(AppError::General(format!(
            "Unresolved schema references: {}",
            dangling.join(", ")
        )));
    }

    // 2. Name every declaration
    let names = NameTable::build(&registry, &mut NameAllocator::new());
    let model = ModelDocument::new(&registry, &names, args.package.as_deref());

    // 3. Output formatting
    let ext = args
        .output
        .as_ref()
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .unwrap_or("json");
    let output_str = match ext {
        "yaml" | "yml" => serde_yaml::to_string(&model)
            .map_err(|e| AppError::General(format!("YAML serialization failed: {}", e)))?,
        _ => serde_json::to_string_pretty(&model)
            .map_err(|e| AppError::General(format!("JSON serialization failed: {}", e)))?,
    };

    // 4. Write result
    if let Some(out_path) = &args.output {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(out_path, output_str)?;
        tracing::info!(
            path = ?out_path,
            declarations = model.declarations.len(),
            "model written"
        );
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DOCUMENT: &str = r#"
openapi: 3.0.3
components:
  schemas:
    Status:
      type: string
      enum: [on, off]
      x-enum-varnames: [On, Off]
    Device:
      type: object
      properties:
        status: {$ref: '#/components/schemas/Status'}
        level:
          type: integer
          enum: [1, 2]
"#;

    fn args(input: PathBuf, output: Option<PathBuf>) -> ModelArgs {
        ModelArgs {
            input,
            output,
            package: Some("devices".to_string()),
            hoist_nested_objects: false,
        }
    }

    #[test]
    fn test_model_to_json() {
        let dir = tempdir().unwrap();
        let in_path = dir.path().join("openapi.yaml");
        let out_path = dir.path().join("out").join("model.json");
        fs::write(&in_path, DOCUMENT).unwrap();

        execute(&args(in_path, Some(out_path.clone()))).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(json["package"], "devices");

        let names: Vec<&str> = json["declarations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Status", "Device", "DeviceLevel"]);
        assert_eq!(json["declarations"][1]["type"]["fields"][0]["type"]["ref"], "Status");
    }

    #[test]
    fn test_model_to_yaml() {
        let dir = tempdir().unwrap();
        let in_path = dir.path().join("openapi.yaml");
        let out_path = dir.path().join("model.yml");
        fs::write(&in_path, DOCUMENT).unwrap();

        execute(&args(in_path, Some(out_path.clone()))).unwrap();

        let yaml = fs::read_to_string(&out_path).unwrap();
        assert!(yaml.contains("package: devices"));
        assert!(yaml.contains("id: Device/properties/level"));
    }

    #[test]
    fn test_model_missing_input() {
        let dir = tempdir().unwrap();
        let result = execute(&args(dir.path().join("nope.yaml"), None));
        match result.unwrap_err() {
            AppError::General(msg) => assert!(msg.contains("OpenAPI document not found")),
            other => panic!("Wrong error type: {other}"),
        }
    }

    #[test]
    fn test_model_rejects_dangling_refs() {
        let dir = tempdir().unwrap();
        let in_path = dir.path().join("openapi.yaml");
        fs::write(
            &in_path,
            "components:\n  schemas:\n    A:\n      type: array\n      items: {$ref: '#/components/schemas/B'}\n",
        )
        .unwrap();

        let err = execute(&args(in_path, None)).unwrap_err();
        assert_eq!(err.to_string(), "General Error: Unresolved schema references: B");
    }

    #[test]
    fn test_model_accepts_external_document_refs() {
        let dir = tempdir().unwrap();
        let in_path = dir.path().join("openapi.yaml");
        let out_path = dir.path().join("model.json");
        fs::write(
            &in_path,
            "components:\n  schemas:\n    A:\n      type: array\n      items: {$ref: 'common.yaml'}\n",
        )
        .unwrap();

        execute(&args(in_path, Some(out_path.clone()))).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        let elem = &json["declarations"][0]["type"]["elem"];
        assert_eq!(elem["ref"], "common.yaml");
        assert_eq!(elem["opaque"], true);
    }

    #[test]
    fn test_model_propagates_walker_errors() {
        let dir = tempdir().unwrap();
        let in_path = dir.path().join("openapi.yaml");
        fs::write(&in_path, "components:\n  schemas:\n    A: {type: [string, integer]}\n").unwrap();

        let err = execute(&args(in_path, None)).unwrap_err();
        assert!(matches!(err, AppError::MultipleTypes { .. }));
    }
}
