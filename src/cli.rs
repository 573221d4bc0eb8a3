//! Minimal CLI: schema text → (JSON Schema | canonical schema string)
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use colored::Colorize;
use tracing::{debug, info};

use glue_schema_json::diagnostics::format_unit_buffer;
use glue_schema_json::{lexer, parser, SchemaError};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

const USAGE_NOTES: &str = "\
Reads a table catalog schema (e.g. an AWS Glue column type), parses it, and
translates it into a JSON schema. An example schema to feed this is:

    struct<created_time:bigint,user_id:int,favnumbers:array<int>,description:string>

You can fetch these table schemas from AWS with the AWS CLI and jq like so:

    aws glue get-tables --database {DATABASE_NAME} | jq -r '.TableList | .[] | .StorageDescriptor.Columns | .[] | select(.Name==\"fulldocument\") | .Type'

To convert every table at once, wrap each column type in a struct and use --lines:

    aws glue get-tables --database {DATABASE_NAME} \\
      | jq -r '.TableList | .[] | \"struct<\\(.Name):\\(.StorageDescriptor.Columns | .[] | select(.Name==\"fulldocument\") | .Type )>\"' \\
      | glue-schema-json --lines";

/// parse a catalog type schema (`struct<...>`) and emit it as JSON Schema
#[derive(Parser, Debug)]
#[command(name = "glue-schema-json", version, after_long_help = USAGE_NOTES)]
pub struct CommandLineInterface {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// default log filter (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat every non-blank input line as its own schema
    #[arg(long, default_value_t = false)]
    lines: bool,

    /// Zero or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    ///
    /// Reads stdin when omitted.
    #[arg(long, short, num_args = 1..)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// output form
    #[arg(long, value_enum, default_value_t = OutputFormat::JsonSchema)]
    format: OutputFormat,

    /// pretty-print JSON Schema output
    #[arg(long)]
    pretty: bool,

    /// print the lexed unit buffer as JSON instead of parsing (debugging)
    #[arg(long)]
    dump_units: bool,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// JSON Schema document
    JsonSchema,
    /// canonical `struct<...>` string, whitespace removed
    Debug,
}

/// One schema to convert plus where it came from.
struct Document {
    label: String,
    text: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        let sources = if self.input.is_empty() { vec!["-".to_string()] } else { self.input.clone() };
        for (label, text) in read_sources(&sources)? {
            if self.lines {
                documents.extend(split_lines(&label, &text));
            } else {
                documents.push(Document { label, text });
            }
        }
        Ok(documents)
    }
}

/// One document per non-blank line, labelled `source:line` (1-based).
fn split_lines(label: &str, text: &str) -> Vec<Document> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| Document {
            label: format!("{label}:{}", index + 1),
            text: line.to_string(),
        })
        .collect()
}

impl OutputSettings {
    /// Convert one document. `Ok(None)` means it failed and was already reported.
    fn render(&self, document: &Document) -> Result<Option<String>> {
        let units = match lexer::lex(&document.text) {
            Ok(units) => units,
            Err(error) => {
                report_failure(&document.label, &error, "");
                return Ok(None);
            }
        };
        if self.dump_units {
            return Ok(Some(serde_json::to_string(&units)?));
        }

        let mut schema_parser = parser::Parser::new(units);
        let schema = match schema_parser.parse_schema() {
            Ok(schema) => schema,
            Err(error) => {
                report_failure(&document.label, &error, &format_unit_buffer(schema_parser.units()));
                return Ok(None);
            }
        };

        let rendered = match self.format {
            OutputFormat::Debug => schema.to_debug_string(),
            OutputFormat::JsonSchema if self.pretty => schema.to_json_pretty()?,
            OutputFormat::JsonSchema => schema.to_json_line()?,
        };
        Ok(Some(rendered))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        let documents = self.input_settings.load_documents()?;
        info!(documents = documents.len(), "loaded input");

        let mut output = String::new();
        let mut failures = 0usize;
        for document in &documents {
            match self.output_settings.render(document)? {
                Some(rendered) => {
                    output.push_str(&rendered);
                    output.push('\n');
                }
                None => failures += 1,
            }
        }

        if let Some(out) = self.output_settings.out.as_ref() {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, &output).with_context(|| format!("failed to write {}", out.display()))?;
            debug!(path = %out.display(), "wrote output");
        } else {
            print!("{output}");
        }

        if failures > 0 {
            bail!("{failures} of {} schema(s) failed to parse", documents.len());
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn report_failure(label: &str, error: &SchemaError, unit_dump: &str) {
    eprintln!(
        "{} ({label}):\n{error}\n\n{unit_dump}\n",
        "Received error while attempting to parse struct".red().bold()
    );
}

/// Read every source fully; `-` is stdin.
fn read_sources(patterns: &[String]) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for path in resolve_file_path_patterns(patterns)? {
        if path.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
            out.push(("<stdin>".to_string(), text));
        } else {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read source file {}", path.display()))?;
            out.push((path.display().to_string(), text));
        }
    }
    Ok(out)
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
