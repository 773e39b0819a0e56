//! Minimal CLI: GIR → (stubs | model)
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::{AliasNamespace, Options};
use crate::source::{self, GirIdentifier};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate LuaLS type-annotation stubs from GObject Introspection (GIR) metadata
#[derive(Parser, Debug)]
#[command(name = "gir-luals", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the LuaLS stub module for a namespace
    Stubs(StubsOut),
    /// print the declaration model as JSON (debug view)
    Model(ModelOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// GIR identifier, `Namespace-Version` (e.g. GLib-2.0)
    #[arg(value_name = "IDENT")]
    ident: String,

    /// directory holding `<IDENT>.gir` files
    #[arg(long, default_value = source::DEFAULT_GIR_DIR)]
    gir_dir: PathBuf,

    /// read this GIR file instead of looking IDENT up in --gir-dir
    #[arg(long)]
    file: Option<PathBuf>,

    /// namespace used to qualify bare alias targets
    #[arg(long, value_enum, default_value_t = AliasNamespace::Target)]
    alias_namespace: AliasNamespace,
}

#[derive(clap::Parser, Debug)]
struct StubsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ModelOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Identifier is validated before any file access.
    fn load(&self) -> anyhow::Result<(String, Options)> {
        let ident = GirIdentifier::parse(&self.ident)?;
        let path = match &self.file {
            Some(file) => file.clone(),
            None => ident.path_in(&self.gir_dir),
        };
        let xml = source::read_gir(&path)?;
        let options = Options::new(ident.namespace).with_alias_namespace(self.alias_namespace);
        Ok((xml, options))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let text = match &self.cmd {
            Command::Stubs(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let (xml, options) = target.input_settings.load()?;
                crate::assemble::generate(&xml, &options)
                    .with_context(|| format!("generating stubs for {}", target.input_settings.ident))?
            }
            Command::Model(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let (xml, options) = target.input_settings.load()?;
                let module = crate::assemble::build_module(&xml, &options)
                    .with_context(|| format!("building model for {}", target.input_settings.ident))?;
                let mut json = serde_json::to_string_pretty(&module)?;
                json.push('\n');
                json
            }
        };

        // Fully assembled before anything reaches stdout.
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
