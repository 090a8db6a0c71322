use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use routeros_diff_core::{
    apply, check_convergence, diff, export, format_json, parse_file_with, parse_script_with,
    render, write_file, Error, OrderTable, RenderMode, SectionPath,
};
use routeros_reconcile::inspect::{render_rows, section_rows};
use routeros_reconcile::profile::{default_profile, load_profile};
use routeros_reconcile::report::{render_script, render_summary};

mod cli;

use cli::{ApplyArgs, CheckArgs, Cli, Command, DiffArgs, InspectArgs, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let order = resolve_profile(cli.profile.as_deref());

    match cli.command {
        Command::Diff(args) => run_diff(args, order),
        Command::Apply(args) => run_apply(args, order),
        Command::Check(args) => run_check(args, order),
        Command::Inspect(args) => run_inspect(args, order),
    }
}

fn resolve_profile(path: Option<&Path>) -> OrderTable {
    let Some(path) = path else {
        return default_profile();
    };
    match load_profile(path) {
        Ok(table) => table,
        Err(err) => {
            log::warn!("{err}; using the default profile");
            default_profile()
        }
    }
}

/// Fail when `output` resolves to one of the files the command read.
///
/// The output's directory must exist; the file itself may not yet.
fn refuse_overwrite(output: &Path, inputs: &[&Path]) -> Result<()> {
    let name = output
        .file_name()
        .with_context(|| format!("output {} does not name a file", output.display()))?;
    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let joined = dir
        .canonicalize()
        .with_context(|| format!("output directory {} is not usable", dir.display()))?
        .join(name);
    let resolved = joined.canonicalize().unwrap_or(joined);

    for input in inputs {
        if input.canonicalize().is_ok_and(|input_abs| input_abs == resolved) {
            bail!(
                "refusing to overwrite input {} with output {}",
                input.display(),
                output.display()
            );
        }
    }
    Ok(())
}

fn load(path: &Path, order: &OrderTable) -> Result<routeros_diff_core::SectionTree> {
    parse_file_with(path, order.clone()).with_context(|| format!("failed to parse {}", path.display()))
}

fn run_diff(args: DiffArgs, order: OrderTable) -> Result<()> {
    let base = load(&args.base, &order)?;
    let target = load(&args.target, &order)?;
    let script = diff(&base, &target).context("failed to compute edit script")?;

    if let Some(out_path) = &args.output {
        refuse_overwrite(out_path, &[&args.base, &args.target])?;
        let mut wire = String::new();
        for line in render(&script, RenderMode::Wire) {
            wire.push_str(&line);
            wire.push('\n');
        }
        fs::write(out_path, wire)
            .with_context(|| format!("failed to write script {}", out_path.display()))?;
        log::info!("wrote {} command(s) to {}", script.len(), out_path.display());
    }

    if args.summary {
        println!("{}", render_summary(&script));
        return Ok(());
    }

    match args.format {
        OutputFormat::Pretty => {
            if script.is_empty() {
                println!("no changes");
            } else {
                println!("{}", render_script(&script));
            }
        }
        OutputFormat::Wire => {
            for line in render(&script, RenderMode::Wire) {
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", format_json(&script)),
    }
    Ok(())
}

fn run_apply(args: ApplyArgs, order: OrderTable) -> Result<()> {
    let base = load(&args.base, &order)?;
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read {}", args.script.display()))?;
    let script = parse_script_with(&text, &order)
        .with_context(|| format!("failed to parse script {}", args.script.display()))?;
    let result = apply(&base, &script)
        .with_context(|| format!("failed to apply {}", args.script.display()))?;

    match &args.output {
        Some(out_path) => {
            refuse_overwrite(out_path, &[&args.base, &args.script])?;
            write_file(&result, out_path)
                .with_context(|| format!("failed to write export {}", out_path.display()))?;
        }
        None => print!("{}", export(&result)),
    }
    Ok(())
}

fn run_check(args: CheckArgs, order: OrderTable) -> Result<()> {
    let actual = load(&args.actual, &order)?;
    let expected = load(&args.expected, &order)?;

    match check_convergence(&actual, &expected) {
        Ok(()) => {
            println!("converged");
            Ok(())
        }
        Err(Error::Convergence(err)) => {
            println!("{}", render_script(&err.residual));
            bail!("{err}");
        }
        Err(err) => Err(err).context("convergence check failed"),
    }
}

fn run_inspect(args: InspectArgs, order: OrderTable) -> Result<()> {
    let tree = load(&args.file, &order)?;
    let under = args.section.as_deref().map(SectionPath::parse);
    let Some(rows) = section_rows(&tree, under.as_ref()) else {
        bail!(
            "section {} not found in {}",
            args.section.as_deref().unwrap_or("/"),
            args.file.display()
        );
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if let Some(version) = tree.version() {
        println!("version={version}");
    }
    print!("{}", render_rows(&rows));
    Ok(())
}
