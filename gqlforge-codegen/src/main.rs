//! gqlforge-codegen
//!
//! Compiles a GraphQL schema into a typed Rust client.
//!
//! Usage:
//!   gqlforge-codegen schema.graphql -o src/graphql
//!   gqlforge-codegen --config gqlforge.toml --substitute DateTime=crate::scalars::Timestamp

use clap::Parser;
use gqlforge_codegen::config::{parse_substitution, Config, CONFIG_FILENAME};
use gqlforge_codegen::generate_from_file;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gqlforge-codegen")]
#[command(about = "Generate a typed Rust GraphQL client from an SDL schema")]
struct Args {
    /// SDL schema file
    schema: Option<PathBuf>,

    /// Output directory for the generated module tree
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Root module path of the generated code (default: crate::graphql)
    #[arg(long)]
    namespace: Option<String>,

    /// Code generation backend (default: rust)
    #[arg(long)]
    backend: Option<String>,

    /// Use an existing type instead of generating one: NAME=PATH
    #[arg(long = "substitute", value_name = "NAME=PATH")]
    substitutions: Vec<String>,

    /// Configuration file (defaults to ./gqlforge.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let file = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let default = PathBuf::from(CONFIG_FILENAME);
            if default.exists() {
                Config::load(&default)?
            } else {
                Config::default()
            }
        }
    };

    let mut flags = Config {
        schema: args.schema,
        output: args.output,
        namespace: args.namespace,
        backend: args.backend,
        ..Config::default()
    };
    for flag in &args.substitutions {
        let (name, path) = parse_substitution(flag)?;
        flags.substitutions.insert(name, path);
    }

    let config = file.merge(flags);
    let options = config.options()?;
    let schema = config
        .schema
        .ok_or("no schema given: pass a schema path or set `schema` in the config file")?;
    let output = config
        .output
        .ok_or("no output directory given: pass --output or set `output` in the config file")?;

    let written = generate_from_file(&schema, &output, &options)?;
    eprintln!("Generated {} files in {}", written.len(), output.display());

    Ok(())
}
