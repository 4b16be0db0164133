use std::{
    env,
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
    process,
    sync::Once,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use imp_core::{
    asm::{self, Metadata, ParamKind},
    val::{Value, quote},
    vm::{self, MapMemory, Program, Vm, VmConfig},
};
use tracing::debug;

mod embedded;

static TRACE_INIT: Once = Once::new();
const DEFAULT_TRACE_FILTER: &str = "imp::vm=debug,imp::asm=debug,imp_core=info,imp_cli=info";
const EXIT_FAILURE: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "imp",
    author,
    version,
    about = "Assembler and runner for the IMP stack machine",
    long_about = None
)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Assemble FILE and run it.
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Override a header parameter.
        #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param_override)]
        params: Vec<(String, String)>,
        /// Abort after dispatching this many instructions.
        #[arg(long, value_name = "N")]
        max_steps: Option<u64>,
        /// Integers written to memory before the run.
        #[arg(value_name = "ADDR:VALUE")]
        presets: Vec<String>,
    },
    /// Write a copy of this executable with FILE embedded; the copy runs it on start.
    Embed {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,
    },
    /// Print the assembled program and its parameters.
    Dump {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Emit JSON instead of assembly text.
        #[arg(long)]
        json: bool,
    },
}

fn parse_param_override(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

/// Filter expression selected by an `IMP_TRACE` value, `None` when tracing is off.
///
/// `1`/`true`/`on` defer to `RUST_LOG` and then the default filter; any other
/// value is taken as the filter itself.
fn trace_filter(raw: &str) -> Option<String> {
    let value = raw.trim();
    match value.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "off" => None,
        "1" | "true" | "on" => Some(env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_TRACE_FILTER.to_string())),
        _ => Some(value.to_string()),
    }
}

fn maybe_init_tracing() {
    let Some(expr) = env::var("IMP_TRACE").ok().as_deref().and_then(trace_filter) else {
        return;
    };

    TRACE_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_new(&expr).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init();
    });
}

/// Everything a run needs besides the program itself.
#[derive(Debug, Default)]
pub(crate) struct RunOptions {
    pub overrides: Vec<(String, String)>,
    pub presets: Vec<String>,
    pub max_steps: Option<u64>,
}

/// Bind parameters and presets into a boot prelude, then run on stdout.
pub(crate) fn execute(program: &Program, mut meta: Metadata, opts: &RunOptions) -> Result<()> {
    for (name, raw) in &opts.overrides {
        meta.set(name, raw)?;
    }
    let mut boot = meta.prelude();
    boot.extend(asm::memory_presets(&opts.presets)?);
    let full = program.with_prelude(&boot);

    if env::var_os("IMP_DEBUG_PROGRAM").is_some() {
        eprintln!("-- program ({} instructions) --", full.len());
        eprint!("{}", vm::dump_program(&full));
    }

    let mut machine = Vm::new().with_config(VmConfig {
        max_steps: opts.max_steps,
    });
    let mut memory = MapMemory::new();
    if let Err(err) = machine.run(&full, &mut memory) {
        bail!("execution failed after {} steps [{}]: {err}", machine.steps(), err.code());
    }
    debug!(target: "imp::vm", steps = machine.steps(), "program finished");
    Ok(())
}

/// Header lines that reproduce `meta` when fed back to the assembler.
fn render_header(meta: &Metadata) -> String {
    let mut out = String::new();
    for param in &meta.params {
        let literal = match param.value() {
            Value::Int(i) => i.to_string(),
            Value::Str(s) => quote(s),
        };
        let kind = match param.kind() {
            ParamKind::Int => "int",
            ParamKind::Str => "str",
        };
        out.push_str(&format!(";@param {} {} {kind} {literal}\n", param.name, param.address));
    }
    out
}

fn embed(file: &Path, output: &Path) -> Result<()> {
    // Refuse to ship a payload that would only fail at startup.
    asm::parse_assembly_file(file)?;

    let exe = env::current_exe().context("failed to locate the running executable")?;
    let mut host = File::open(&exe).with_context(|| format!("failed to open {}", exe.display()))?;
    let mut source = BufReader::new(File::open(file).with_context(|| format!("failed to open {}", file.display()))?);
    let mut out = File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
    let len = asm::embed_payload(&mut host, &mut source, &mut out)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(output, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("failed to mark {} executable", output.display()))?;
    }

    eprintln!("Embedded {} ({len} bytes) into {}", file.display(), output.display());
    Ok(())
}

fn dump(file: &Path, json: bool) -> Result<()> {
    let (program, meta) = asm::parse_assembly_file(file)?;
    let mut stdout = std::io::stdout().lock();
    if json {
        writeln!(stdout, "{}", asm::dump_json(&program, &meta)?)?;
    } else {
        write!(stdout, "{}{}", render_header(&meta), vm::dump_program(&program))?;
    }
    Ok(())
}

fn run_cli(args: CliArgs) -> Result<()> {
    match args.command {
        Commands::Run {
            file,
            params,
            max_steps,
            presets,
        } => {
            let (program, meta) = asm::parse_assembly_file(&file)?;
            let opts = RunOptions {
                overrides: params,
                presets,
                max_steps,
            };
            execute(&program, meta, &opts)
        }
        Commands::Embed { file, output } => embed(&file, &output),
        Commands::Dump { file, json } => dump(&file, json),
    }
}

fn main() {
    maybe_init_tracing();

    let result = match embedded::payload() {
        Ok(Some((program, meta))) => embedded::run(&program, meta),
        Ok(None) => run_cli(CliArgs::parse()),
        Err(err) => Err(err),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(EXIT_FAILURE);
    }
}
