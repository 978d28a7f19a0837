//! xmldoc-tables CLI - LaTeX reference tables from C# documentation comments

#[cfg(feature = "cli")]
use anyhow::{bail, Context, Result};
#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, IsTerminal, Read, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use fxhash::FxHashSet;
#[cfg(feature = "cli")]
use tracing::{info, warn};
#[cfg(feature = "cli")]
use xmldoc_tables::{
    format_diagnostics, render::render_class_table, render::render_section, render_document,
    DiagnosticLevel, Diagnostics, DocTables, FieldMatch, OwnerKeyStyle, RenderOptions, Section,
    TableAssembler, TableOptions, XmlDocError,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "xmldoc-tables")]
#[command(version)]
#[command(about = "Generate LaTeX reference tables from C# XML documentation comments", long_about = None)]
struct Cli {
    /// C# source files (reads from stdin if none are given)
    inputs: Vec<PathBuf>,

    /// Write classes.tex and <Owner>.<section>.tex into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Raw)]
    format: Format,

    /// Documentation element to put in the description column
    #[arg(long, default_value = "summary")]
    summary_field: String,

    /// Accept any element whose name contains the summary field
    #[arg(long)]
    match_substring: bool,

    /// Skip comments on events, enums and other unsupported members instead
    /// of attributing them to the enclosing type
    #[arg(long)]
    strict_ownership: bool,

    /// Key nested types as Outer.Inner
    #[arg(long)]
    qualified_owners: bool,

    /// Booktabs rules (latex format); also drops the vertical rule from wide
    /// description cells
    #[arg(long)]
    booktabs: bool,

    /// Page-breaking longtable environments (latex format)
    #[arg(long)]
    longtable: bool,

    /// Caption every table, starting with this text (latex format)
    #[arg(long)]
    caption_prefix: Option<String>,

    /// Strict mode: exit with error if any input has syntax errors
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress diagnostics on stderr
    #[arg(short, long)]
    quiet: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Bare rows, ready for \input inside a hand-written table
    Raw,
    /// Complete tabular/longtable environments
    Latex,
    /// Row blobs and diagnostics as JSON
    Json,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut assembler = TableAssembler::new(table_options(&cli));
    let mut diagnostics = Diagnostics::new();

    if cli.inputs.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        assembler.add_source(&buffer);
        report(&cli, "<stdin>", assembler.take_diagnostics(), &mut diagnostics);
    } else {
        for path in &cli.inputs {
            assembler
                .add_file(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let name = path.display().to_string();
            report(&cli, &name, assembler.take_diagnostics(), &mut diagnostics);
        }
    }

    if cli.strict && diagnostics.has_errors() {
        bail!(
            "{} syntax error(s) in the input (--strict)",
            diagnostics.errors
        );
    }

    let tables = assembler.finish();
    info!(
        classes = tables.class_count(),
        owners = tables.members().len(),
        "tables assembled"
    );

    let render = RenderOptions {
        booktabs: cli.booktabs,
        longtable: cli.longtable,
        caption_prefix: cli.caption_prefix.clone(),
        ..Default::default()
    };

    match &cli.output_dir {
        Some(dir) => write_directory(dir, &tables, cli.format, &render),
        None => {
            let output = format_stdout(&tables, cli.format, &render)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "xmldoc_tables=warn",
        1 => "xmldoc_tables=info",
        _ => "xmldoc_tables=debug",
    };
    let filter =
        EnvFilter::try_from_env("XMLDOC_TABLES_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn table_options(cli: &Cli) -> TableOptions {
    let mut options = TableOptions::new()
        .with_summary_field(cli.summary_field.clone())
        .with_strict_ownership(cli.strict_ownership)
        .with_vertical_rules(!cli.booktabs);
    if cli.match_substring {
        options.field_match = FieldMatch::Contains;
    }
    if cli.qualified_owners {
        options = options.with_owner_keys(OwnerKeyStyle::Qualified);
    }
    options
}

/// Print the diagnostics of one input and fold them into the totals.
/// Info messages only show up with `-v`.
#[cfg(feature = "cli")]
fn report(cli: &Cli, name: &str, found: Diagnostics, totals: &mut Diagnostics) {
    let mut shown = Diagnostics::new();
    for diag in found.iter() {
        if diag.level > DiagnosticLevel::Info || cli.verbose > 0 {
            shown.add(diag.clone());
        }
    }
    if !cli.quiet && !shown.is_empty() {
        eprintln!("{}:", name);
        eprintln!("{}", format_diagnostics(&shown, io::stderr().is_terminal()));
        eprintln!();
    }
    totals.extend(found);
}

#[cfg(feature = "cli")]
fn format_stdout(tables: &DocTables, format: Format, render: &RenderOptions) -> Result<String> {
    match format {
        Format::Raw => Ok(raw_document(tables)),
        Format::Latex => Ok(render_document(tables, render)),
        Format::Json => json(tables),
    }
}

/// Row blobs under `%` headings, for stdout
#[cfg(feature = "cli")]
fn raw_document(tables: &DocTables) -> String {
    let mut parts = Vec::new();
    if tables.class_count() > 0 {
        parts.push(format!("% Types\n{}", tables.class_table()));
    }
    for (owner, members) in tables.members() {
        for section in Section::ALL {
            if section.count(members) > 0 {
                parts.push(format!(
                    "% {}: {}\n{}",
                    owner,
                    section.title(),
                    section.rows(members)
                ));
            }
        }
    }
    parts.join("\n")
}

#[cfg(all(feature = "cli", feature = "json"))]
fn json(tables: &DocTables) -> Result<String> {
    let mut output = serde_json::to_string_pretty(tables).context("failed to serialize tables")?;
    output.push('\n');
    Ok(output)
}

#[cfg(all(feature = "cli", not(feature = "json")))]
fn json(_tables: &DocTables) -> Result<String> {
    bail!("JSON output needs the `json` feature")
}

#[cfg(feature = "cli")]
fn write_directory(
    dir: &Path,
    tables: &DocTables,
    format: Format,
    render: &RenderOptions,
) -> Result<()> {
    fs::create_dir_all(dir)
        .map_err(|source| XmlDocError::io(dir, source))
        .context("failed to create the output directory")?;

    if format == Format::Json {
        return write_file(&dir.join("tables.json"), &json(tables)?);
    }

    let classes = match format {
        Format::Latex => with_newline(render_class_table(tables, render)),
        _ => tables.class_table().to_string(),
    };
    write_file(&dir.join("classes.tex"), &classes)?;

    let stems = file_stems(tables.members().keys());
    for ((owner, members), stem) in tables.members().iter().zip(&stems) {
        for section in Section::ALL {
            if section.count(members) == 0 {
                continue;
            }
            let content = match format {
                Format::Latex => with_newline(render_section(owner, members, section, render)),
                _ => section.rows(members).to_string(),
            };
            let name = format!("{}.{}.tex", stem, section.name());
            write_file(&dir.join(name), &content)?;
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|source| XmlDocError::io(path, source))
        .context("failed to write table")?;
    info!(path = %path.display(), "wrote table");
    Ok(())
}

#[cfg(feature = "cli")]
fn with_newline(mut text: String) -> String {
    text.push('\n');
    text
}

/// Owner key -> file name part; `<not found>` becomes `_not_found_`
#[cfg(feature = "cli")]
fn file_stem(owner: &str) -> String {
    owner
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// One file name part per owner, in order. Owners that sanitize to the same
/// stem get `-2`, `-3`, ... appended; C# names never contain `-`.
#[cfg(feature = "cli")]
fn file_stems<'a>(owners: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut used = FxHashSet::default();
    owners
        .into_iter()
        .map(|owner| {
            let base = file_stem(owner);
            let mut stem = base.clone();
            let mut n = 1;
            while !used.insert(stem.clone()) {
                n += 1;
                stem = format!("{}-{}", base, n);
            }
            if n > 1 {
                warn!(owner = %owner, file = %stem, "owner file name collides, renamed");
            }
            stem
        })
        .collect()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install xmldoc-tables --features cli");
    eprintln!("  xmldoc-tables [OPTIONS] [INPUT]...");
}
