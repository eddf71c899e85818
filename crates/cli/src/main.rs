mod manifest;

use anyhow::{Context, Result};
use argfold::{ArgType, OptionsPatch};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::manifest::{DEFAULT_MANIFEST_NAME, Manifest};

#[derive(Parser)]
#[command(name = "argfold")]
#[command(version, about = "Parse command-line tokens into typed JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse tokens against a definition file and print the result as JSON
    Parse(ParseArgs),

    /// Validate a definition file and list its arguments
    Check(CheckArgs),
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to the definition file
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    #[command(flatten)]
    overrides: OptionOverrides,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Tokens to parse (after `--`)
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the definition file
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    #[command(flatten)]
    overrides: OptionOverrides,

    /// Only output JSON (no human-readable output)
    #[arg(long)]
    json: bool,
}

/// Option overrides layered over the definition file's `options`.
#[derive(Args)]
struct OptionOverrides {
    /// Type of arguments that declare none (string, number, boolean)
    #[arg(long, value_name = "TYPE", value_parser = parse_arg_type)]
    default_type: Option<ArgType>,

    /// Whether arguments that declare nothing are required
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    default_required: Option<bool>,

    /// Drop unknown arguments instead of failing
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    ignore_unknown_args: Option<bool>,

    /// Fail when an argument is given more than once
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    prevent_duplicate_args: Option<bool>,

    /// Require boolean flags to be followed by `true` or `false`
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    explicit_boolean_values: Option<bool>,
}

impl OptionOverrides {
    fn to_patch(&self) -> OptionsPatch {
        OptionsPatch {
            default_type: self.default_type,
            default_required: self.default_required,
            ignore_unknown_args: self.ignore_unknown_args,
            prevent_duplicate_args: self.prevent_duplicate_args,
            explicit_boolean_values: self.explicit_boolean_values,
        }
    }
}

fn parse_arg_type(s: &str) -> Result<ArgType, String> {
    s.parse()
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => parse_command(args),
        Commands::Check(args) => check_command(args),
    }
}

fn parse_command(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let manifest = Manifest::from_file(&args.manifest)?;
    let parser = manifest.build_parser(&args.overrides.to_patch())?;

    let parsed = parser.parse(&args.tokens).map_err(|e| {
        let kind = e.kind();
        anyhow::Error::new(e).context(format!("argument parsing failed [{kind}]"))
    })?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&parsed)
    } else {
        serde_json::to_string(&parsed)
    }
    .context("failed to serialize parsed arguments")?;
    println!("{json}");

    Ok(())
}

fn check_command(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let manifest = Manifest::from_file(&args.manifest)?;
    let parser = manifest.build_parser(&args.overrides.to_patch())?;
    let options = parser.options();

    if args.json {
        let report = serde_json::json!({
            "options": options,
            "args": parser.defs(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    eprintln!("Definitions: {}", args.manifest.display());
    for def in parser.defs() {
        let required = if def.is_required(options) {
            ", required"
        } else {
            ""
        };
        println!(
            "  {}  ->  {} ({}{})",
            def.aliases.join(", "),
            def.field,
            def.effective_type(options),
            required
        );
    }
    eprintln!("OK: {} argument(s) defined", parser.defs().len());

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
