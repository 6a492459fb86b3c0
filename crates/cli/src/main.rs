//! Relations OpenAPI CLI
//!
//! Command-line interface for compiling models files into resource bindings
//! and an OpenAPI 3.0.3 document.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use relations_openapi_common::DescriptorProvider;
use relations_openapi_generator::{render_document, write_document, OutputFormat};
use relations_openapi_parser::{parse_models_file, ModelsFile};
use relations_openapi_registry::{Api, ModelResource, Resource, Scope};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relations-openapi")]
#[command(version, about = "Compile data models into CRUD resources and an OpenAPI document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a models file and display its models and resources
    #[command(after_help = "EXAMPLES:\n  \
        relations-openapi inspect --models models.yaml")]
    Inspect {
        /// Path to the models file (.yaml, .yml or .json)
        #[arg(short, long)]
        models: PathBuf,
    },

    /// Print the /model manifest for a models file
    #[command(after_help = "EXAMPLES:\n  \
        relations-openapi manifest --models models.yaml")]
    Manifest {
        /// Path to the models file (.yaml, .yml or .json)
        #[arg(short, long)]
        models: PathBuf,
    },

    /// Generate the OpenAPI document for a models file
    #[command(after_help = "EXAMPLES:\n  \
        # Print JSON to stdout\n  \
        relations-openapi generate --models models.yaml\n\n  \
        # Write YAML to a file\n  \
        relations-openapi generate --models models.yaml --output openapi.yaml")]
    Generate {
        /// Path to the models file (.yaml, .yml or .json)
        #[arg(short, long)]
        models: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit YAML instead of JSON (implied by a .yaml/.yml output file)
        #[arg(long)]
        yaml: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect { models } => inspect_command(&models, cli.verbose)?,
        Commands::Manifest { models } => manifest_command(&models)?,
        Commands::Generate {
            models,
            output,
            yaml,
        } => generate_command(&models, output.as_deref(), yaml, cli.verbose)?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_models(path: &Path) -> Result<ModelsFile> {
    parse_models_file(path)
        .with_context(|| format!("Failed to load models file {}", path.display()))
}

/// Attach the file's declared resources, then defaults for every other model
fn build_api(models: &ModelsFile) -> Result<Api> {
    let provider: Arc<dyn DescriptorProvider> = Arc::new(models.provider());

    let mut scope = Scope::new();
    for resource in &models.resources {
        let mut declared =
            ModelResource::new(&resource.model, Arc::clone(&provider)).named(&resource.name);
        if let Some(endpoints) = &resource.endpoints {
            declared = declared.with_endpoints(endpoints.clone());
        }
        scope.register(declared);
    }

    let mut api = Api::new(models.info.clone());
    api.attach(&scope, &provider)
        .context("Failed to attach resources")?;

    Ok(api)
}

fn inspect_command(path: &Path, verbose: bool) -> Result<()> {
    eprintln!("{} Parsing models file: {}", "→".cyan(), path.display());

    let models = load_models(path)?;
    let api = build_api(&models)?;

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "API:".bold());
    println!("  Title: {}", models.info.title.yellow());
    println!("  Version: {}", models.info.version.yellow());
    println!("  Models: {}", models.models.len());

    println!("\n{}", "Models:".bold());
    for model in &models.models {
        println!(
            "  • {} ({} / {})",
            model.title.cyan(),
            model.singular,
            model.plural
        );
        println!(
            "    Id: {}",
            model.id.as_deref().unwrap_or("none")
        );
        println!("    Fields: {}", model.fields.len());

        if verbose {
            for field in &model.fields {
                let mut flags = Vec::new();
                if field.required {
                    flags.push("required");
                }
                if field.readonly {
                    flags.push("readonly");
                }
                if field.options.is_some() {
                    flags.push("options");
                }
                println!(
                    "      - {}: {}{}",
                    field.name,
                    field.kind.to_string().yellow(),
                    if flags.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", flags.join(", "))
                    }
                );
            }
            println!("    Order: {}", model.order.join(", "));
            println!("    Chunk: {}", model.chunk);
        }
    }

    println!("\n{}", "Resources:".bold());
    for route in api.router().resources() {
        println!(
            "  • {} → {} ({})",
            route.name.cyan(),
            route.resource.model(),
            route.urls.join(", ")
        );
    }

    Ok(())
}

fn manifest_command(path: &Path) -> Result<()> {
    let models = load_models(path)?;
    let api = build_api(&models)?;

    let manifest = api
        .manifest()
        .context("Manifest endpoint was not registered")?;
    println!("{}", serde_json::to_string_pretty(&manifest)?);

    Ok(())
}

fn generate_command(
    path: &Path,
    output: Option<&Path>,
    yaml: bool,
    verbose: bool,
) -> Result<()> {
    let models = load_models(path)?;
    let api = build_api(&models)?;

    let document = api
        .build_document()
        .context("Failed to assemble OpenAPI document")?;

    let format = match (yaml, output) {
        (true, _) => OutputFormat::Yaml,
        (false, Some(output)) => OutputFormat::from_path(output),
        (false, None) => OutputFormat::Json,
    };

    match output {
        Some(output) => {
            write_document(&document, output, format)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            eprintln!("\n{}", "✓ Document generated!".green().bold());
            eprintln!("  Output: {}", output.display().to_string().yellow());
            if verbose {
                let paths = document["paths"].as_object().map_or(0, |paths| paths.len());
                let schemas = document["components"]["schemas"]
                    .as_object()
                    .map_or(0, |schemas| schemas.len());
                eprintln!("  Paths: {}", paths);
                eprintln!("  Schemas: {}", schemas);
            }
        }
        None => println!("{}", render_document(&document, format)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relations_openapi_common::Verb;
    use std::fs;
    use tempfile::TempDir;

    const MODELS: &str = r#"
info: {title: People, version: 2.0.0}
models:
  - name: Person
    chunk: 2
    fields:
      - {name: id, kind: int, readonly: true}
      - {name: name, kind: str, required: true}
  - name: Simple
    fields:
      - {name: id, kind: int, readonly: true}
      - {name: name, kind: str, required: true}
resources:
  - {name: people, model: Person, endpoints: ["/people", "/people/<int:id>"]}
"#;

    fn models_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("models.yaml");
        fs::write(&path, MODELS).unwrap();
        path
    }

    #[test]
    fn test_build_api() {
        let dir = TempDir::new().unwrap();
        let models = load_models(&models_file(&dir)).unwrap();
        let api = build_api(&models).unwrap();

        assert_eq!(api.router().endpoints(), vec!["model", "people", "simple"]);
        assert_eq!(api.info().title, "People");

        let manifest = api.router().respond(Verb::Get, "/model").unwrap();
        assert_eq!(manifest["models"][0]["singular"], "person");
    }

    #[test]
    fn test_generate_writes_yaml() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out").join("openapi.yaml");

        generate_command(&models_file(&dir), Some(&output), false, false).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let document: serde_json::Value = serde_yaml::from_str(&content).unwrap();
        assert_eq!(document["openapi"], "3.0.3");
        assert_eq!(
            document["paths"]["/people/{id}"]["get"]["operationId"],
            "person_retrieve_one"
        );
    }

    #[test]
    fn test_missing_models_file() {
        let dir = TempDir::new().unwrap();
        let err = load_models(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to load models file"));
    }
}
