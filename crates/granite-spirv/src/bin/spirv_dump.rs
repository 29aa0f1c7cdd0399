use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context};
use granite_spirv::{decode_bytes, VariableKind};
use tracing::Level;

fn usage() -> &'static str {
    "\
spirv_dump: decode a SPIR-V module and print its id table

USAGE:
    cargo run -p granite-spirv --features cli --bin spirv_dump -- <path.spv> [-v|-vv] [--entry-points]

FLAGS:
    -v, --verbose     Log decoded instructions (repeat for per-instruction tracing)
    --entry-points    Only list entry points and their interfaces
"
}

fn main() {
    if let Err(err) = real_main() {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    let mut path: Option<PathBuf> = None;
    let mut verbosity = 0u8;
    let mut entry_points_only = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{}", usage());
                return Ok(());
            }
            "-v" | "--verbose" => verbosity = verbosity.saturating_add(1),
            "-vv" => verbosity = verbosity.saturating_add(2),
            "--entry-points" => entry_points_only = true,
            _ if arg.starts_with('-') => {
                bail!("unknown option {arg:?}\n\n{}", usage());
            }
            _ => {
                if path.is_some() {
                    bail!("unexpected positional argument {arg:?}\n\n{}", usage());
                }
                path = Some(PathBuf::from(arg));
            }
        }
    }

    let Some(path) = path else {
        bail!("missing SPIR-V input path\n\n{}", usage());
    };

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let program = decode_bytes(&bytes)
        .with_context(|| format!("failed to decode {} as SPIR-V", path.display()))?;

    if entry_points_only {
        for (id, entry) in program.entry_points() {
            println!(
                "%{id} {} \"{}\" interface={:?}",
                entry.execution_model, entry.name, entry.interface
            );
            for mode in &entry.execution_modes {
                println!("    {} {:?}", mode.mode, mode.operands);
            }
        }
        return Ok(());
    }

    print!("{}", program.dump());

    let defined = program
        .variables()
        .iter()
        .filter(|v| !matches!(v.kind, VariableKind::None))
        .count();
    println!();
    println!(
        "{defined} of {} ids defined ({} bytes)",
        program.id_bound().saturating_sub(1),
        bytes.len()
    );

    Ok(())
}
