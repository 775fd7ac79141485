//! protoc-gen-webapi entrypoint
//!
//! Invoked by protoc (`--webapi_out=<options>:.`) it reads a
//! `CodeGeneratorRequest` from stdin and answers with a response on stdout.
//! With `--descriptor-set` it runs standalone against a descriptor set file.
#![deny(unsafe_code)]

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use prost::Message;
use prost_types::compiler::{CodeGeneratorResponse, code_generator_response};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use protoc_gen_webapi::config::GenerationConfig;
use protoc_gen_webapi::descriptor;
use protoc_gen_webapi::generation::GenerationReport;

#[derive(Parser)]
#[command(name = "protoc-gen-webapi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read a FileDescriptorSet (protoc --include_imports --descriptor_set_out)
    /// instead of a CodeGeneratorRequest on stdin
    #[arg(long)]
    descriptor_set: Option<PathBuf>,
    /// Schema file to generate from the descriptor set; repeatable, defaults to all
    #[arg(long = "file", requires = "descriptor_set")]
    files: Vec<String>,
    /// Generator options, same syntax as the protoc parameter
    #[arg(long, default_value = "")]
    options: String,
}

fn main() -> anyhow::Result<()> {
    // stdout carries the plugin protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.descriptor_set {
        Some(path) => run_standalone(&path, &cli.files, &cli.options),
        None => run_plugin(),
    }
}

/// protoc plugin mode: errors go back to protoc in the response
fn run_plugin() -> anyhow::Result<()> {
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read CodeGeneratorRequest from stdin")?;

    let mut response = CodeGeneratorResponse {
        supported_features: Some(code_generator_response::Feature::Proto3Optional as u64),
        ..Default::default()
    };
    match generate_from_request(&input) {
        Ok(report) => log_report(&report),
        Err(e) => {
            error!("{e:#}");
            response.error = Some(format!("{e:#}"));
        }
    }

    let mut output = Vec::new();
    response
        .encode(&mut output)
        .context("Failed to encode CodeGeneratorResponse")?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&output)
        .context("Failed to write CodeGeneratorResponse to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn generate_from_request(input: &[u8]) -> anyhow::Result<GenerationReport> {
    let request =
        descriptor::decode_request(input).context("Failed to decode plugin request")?;
    let config = GenerationConfig::parse(&request.parameter);
    protoc_gen_webapi::generate(&config, &request.files).context("Generation failed")
}

fn run_standalone(descriptor_set: &Path, files: &[String], options: &str) -> anyhow::Result<()> {
    info!("Loading descriptor set {}", descriptor_set.display());
    let bytes = std::fs::read(descriptor_set)
        .with_context(|| format!("Failed to read {}", descriptor_set.display()))?;
    let files = descriptor::load_descriptor_set(&bytes, files)
        .with_context(|| format!("Failed to load {}", descriptor_set.display()))?;

    let config = GenerationConfig::parse(options);
    let report = protoc_gen_webapi::generate(&config, &files).context("Generation failed")?;
    log_report(&report);
    Ok(())
}

fn log_report(report: &GenerationReport) {
    for path in &report.written {
        info!("Wrote {}", path.display());
    }
    for dir in &report.skipped_dirs {
        info!("Skipped missing output directory {}", dir.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_without_arguments_is_plugin_mode() {
        let cli = Cli::try_parse_from(["protoc-gen-webapi"]).unwrap();
        assert!(cli.descriptor_set.is_none());
        assert!(cli.files.is_empty());
        assert!(cli.options.is_empty());
    }

    #[test]
    fn test_cli_standalone_arguments() {
        let cli = Cli::try_parse_from([
            "protoc-gen-webapi",
            "--descriptor-set",
            "api.pb",
            "--file",
            "proto/user/user.proto",
            "--file",
            "proto/order/order.proto",
            "--options",
            "output_paths=src/api",
        ])
        .unwrap();
        assert_eq!(cli.descriptor_set, Some(PathBuf::from("api.pb")));
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.options, "output_paths=src/api");
    }

    #[test]
    fn test_cli_file_requires_descriptor_set() {
        assert!(Cli::try_parse_from(["protoc-gen-webapi", "--file", "a.proto"]).is_err());
    }

    #[test]
    fn test_garbage_request_is_an_error() {
        assert!(generate_from_request(&[0xff, 0xff]).is_err());
    }
}
