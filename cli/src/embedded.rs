//! Startup path for executables produced by `imp embed`.
//!
//! Such a binary carries its assembly after the host image. Header
//! parameters become `--<name>` options and positional `ADDR:VALUE`
//! arguments preset memory, so the embedded program behaves like a small
//! standalone tool.

use std::{env, ffi::OsString, fs::File};

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use imp_core::{
    asm::{self, Metadata},
    vm::Program,
};
use tracing::{debug, warn};

use crate::{RunOptions, execute};

const PRESETS: &str = "presets";
const MAX_STEPS: &str = "max-steps";
const RESERVED: [&str; 3] = ["help", "version", MAX_STEPS];

/// Program appended to the running executable, if any.
///
/// An unreadable executable is treated as carrying no program; a payload that
/// is present but malformed or fails to assemble is an error.
pub(crate) fn payload() -> Result<Option<(Program, Metadata)>> {
    let exe = match env::current_exe() {
        Ok(path) => path,
        Err(err) => {
            warn!(target: "imp::cli", error = %err, "cannot locate running executable");
            return Ok(None);
        }
    };
    let mut file = match File::open(&exe) {
        Ok(file) => file,
        Err(err) => {
            warn!(target: "imp::cli", path = %exe.display(), error = %err, "cannot open running executable");
            return Ok(None);
        }
    };
    let found = asm::load_embedded(&mut file).with_context(|| format!("invalid program embedded in {}", exe.display()))?;
    debug!(target: "imp::cli", embedded = found.is_some(), "checked for embedded program");
    Ok(found)
}

/// Command line of an embedded program, one option per header parameter.
pub(crate) fn command(name: &str, meta: &Metadata) -> Result<Command> {
    let mut cmd = Command::new(name.to_string())
        .about("Embedded IMP program")
        .arg(
            Arg::new(MAX_STEPS)
                .long(MAX_STEPS)
                .value_name("N")
                .value_parser(clap::value_parser!(u64))
                .help("Abort after dispatching this many instructions"),
        )
        .arg(
            Arg::new(PRESETS)
                .value_name("ADDR:VALUE")
                .action(ArgAction::Append)
                .help("Integers written to memory before the run"),
        );

    for (idx, param) in meta.params.iter().enumerate() {
        if RESERVED.contains(&param.name.as_str()) || param.name == PRESETS {
            bail!("parameter `{}` clashes with a built-in option", param.name);
        }
        if meta.params[..idx].iter().any(|p| p.name == param.name) {
            bail!("parameter `{}` is declared twice", param.name);
        }
        cmd = cmd.arg(
            Arg::new(param.name.clone())
                .long(param.name.clone())
                .value_name(param.kind().to_string().to_uppercase())
                .help(format!("Stored at address {} (default: {param})", param.address)),
        );
    }
    Ok(cmd)
}

/// Collect parameter overrides and presets from parsed matches.
pub(crate) fn options(meta: &Metadata, matches: &ArgMatches) -> RunOptions {
    let overrides = meta
        .params
        .iter()
        .filter_map(|p| matches.get_one::<String>(&p.name).map(|raw| (p.name.clone(), raw.clone())))
        .collect();
    let presets = matches
        .get_many::<String>(PRESETS)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    RunOptions {
        overrides,
        presets,
        max_steps: matches.get_one::<u64>(MAX_STEPS).copied(),
    }
}

pub(crate) fn run(program: &Program, meta: Metadata) -> Result<()> {
    let args: Vec<OsString> = env::args_os().collect();
    let name = args
        .first()
        .and_then(|arg0| std::path::Path::new(arg0).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "imp".to_string());
    let matches = command(&name, &meta)?.get_matches_from(args);
    let opts = options(&meta, &matches);
    execute(program, meta, &opts)
}
