//! Minimal CLI: classify → (schema | mock)
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::forest::Forest;
use crate::mock::MockGen;
use crate::synth::Synthesizer;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// classify declaration field types and output either a JSON view or Swift mock factories
#[derive(Parser, Debug)]
#[command(name = "decl-mock")]
pub struct CommandLineInterface {
    /// debug-level logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// classify and print the JSON view of every declaration
    Schema(SchemaOut),
    /// classify and emit Swift mock factories
    Mock(MockOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs: literal paths or quoted glob patterns.
    /// `.json` files hold declarations; everything else is scanned as Swift.
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct MockOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name of the generated static factory
    #[arg(long, default_value = "mock")]
    function: String,

    /// seed for the randomized literals (entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// output .swift file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Every input merged into one forest, in input order.
    fn load(&self) -> anyhow::Result<Forest> {
        let paths = crate::input::resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let mut forest = Forest::default();
        for (_, part) in crate::input::load_all(&paths)? {
            forest.absorb(part);
        }
        Ok(forest)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let forest = target.input_settings.load()?;
                let schema = crate::schema::emit_schema(&forest);
                let schema_src = serde_json::to_string_pretty(&schema)?;
                write_output(target.out.as_deref(), &schema_src)
            }
            Command::Mock(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let forest = target.input_settings.load()?;
                let synth = match target.seed {
                    Some(seed) => Synthesizer::seeded(seed),
                    None => Synthesizer::new(),
                };
                let mut cg = MockGen::new(synth).with_function_name(target.function.as_str());
                cg.emit(&forest);
                let unresolved = cg.unresolved();
                write_output(target.out.as_deref(), &cg.into_string())?;
                report_unresolved(unresolved);
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> anyhow::Result<()> {
    let Some(out) = out else {
        println!("{src}");
        return Ok(());
    };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
}

fn report_unresolved(count: usize) {
    if count == 0 {
        eprintln!("{}", "✅ every field has a default".green());
    } else {
        let noun = if count == 1 { "field needs" } else { "fields need" };
        let line = format!("⚠️  {count} {noun} a hand-written default (<#default value#>)");
        eprintln!("{}", line.yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mock_subcommand() {
        let cli = CommandLineInterface::try_parse_from([
            "decl-mock", "mock", "-i", "a.swift", "b/*.json", "--seed", "7", "--function", "stub",
        ])
        .unwrap();
        let Command::Mock(m) = cli.cmd else { panic!("expected mock") };
        assert_eq!(m.input_settings.input, vec!["a.swift", "b/*.json"]);
        assert_eq!(m.seed, Some(7));
        assert_eq!(m.function, "stub");
    }

    #[test]
    fn input_is_required() {
        assert!(CommandLineInterface::try_parse_from(["decl-mock", "schema"]).is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli =
            CommandLineInterface::try_parse_from(["decl-mock", "schema", "-i", "x.json", "-v"])
                .unwrap();
        assert!(cli.verbose);
    }
}
