//! tgrid - Tupono sheet tool

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tupono_grid::prelude::*;
use tupono_grid::{GridOptions, TemplateSummary};

mod edit;
mod render;

use edit::EditOp;

#[derive(Parser)]
#[command(name = "tgrid")]
#[command(author, version, about = "Create, edit and store mergeable sheets")]
struct Cli {
    /// Template store directory
    #[arg(long, global = true, env = "TGRID_STORE", default_value = ".tgrid")]
    store: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "TGRID_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an empty sheet file
    New {
        /// Output sheet file
        output: PathBuf,

        /// Number of rows
        #[arg(long, default_value_t = tupono_grid::DEFAULT_ROWS)]
        rows: u32,

        /// Number of columns
        #[arg(long, default_value_t = tupono_grid::DEFAULT_COLS)]
        cols: u32,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show the size and merged regions of a sheet
    Info {
        /// Input sheet file
        input: PathBuf,
    },

    /// Draw a sheet as ASCII
    Render {
        /// Input sheet file
        input: PathBuf,

        /// Maximum column width
        #[arg(short, long, default_value = "24")]
        width: usize,

        /// Refuse sheets with damaged entries
        #[arg(long)]
        strict: bool,
    },

    /// Apply edit commands to a sheet file
    #[command(after_help = "Commands: add-row, add-col, remove-row, remove-col, \
        merge-right@CELL, merge-down@CELL, split@CELL, bold@CELL, italic@CELL, \
        align@CELL=left|center|right, valign@CELL=top|middle|bottom, set@CELL=HTML")]
    Edit {
        /// Input sheet file
        input: PathBuf,

        /// Edit commands, applied in order
        #[arg(required = true)]
        commands: Vec<String>,

        /// Output sheet file (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,

        /// Refuse sheets with damaged entries
        #[arg(long)]
        strict: bool,
    },

    /// Manage stored templates
    #[command(subcommand)]
    Store(StoreCommands),
}

#[derive(Subcommand)]
enum StoreCommands {
    /// Store a sheet file as a new template
    Save {
        /// Input sheet file
        input: PathBuf,

        /// Template name
        #[arg(short, long)]
        name: String,

        /// Which editor the sheet belongs to (feedback, report)
        #[arg(short, long, default_value = "feedback")]
        kind: String,

        /// Template description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Who can see the template (private, organisation, public)
        #[arg(long, default_value = "private")]
        visibility: String,

        /// Store as a one-off content record instead of a reusable template
        #[arg(long)]
        content: bool,
    },

    /// List stored records
    List {
        /// Only this kind (feedback, report)
        #[arg(short, long)]
        kind: Option<String>,

        /// Only reusable templates
        #[arg(long)]
        templates: bool,

        /// Only names containing this text
        #[arg(long)]
        name: Option<String>,
    },

    /// Print a stored sheet
    Show {
        /// Template id
        id: String,

        /// Write the sheet to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Draw the sheet instead of printing JSON
        #[arg(short, long)]
        render: bool,
    },

    /// Delete a stored record
    Remove {
        /// Template id
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::New {
            output,
            rows,
            cols,
            pretty,
        } => new_sheet(&output, rows, cols, pretty),
        Commands::Info { input } => show_info(&input),
        Commands::Render {
            input,
            width,
            strict,
        } => render_sheet(&input, width, strict),
        Commands::Edit {
            input,
            commands,
            output,
            pretty,
            strict,
        } => edit_sheet(&input, &commands, output.as_deref(), pretty, strict),
        Commands::Store(command) => run_store(&cli.store, command),
    }
}

fn read_options(strict: bool) -> SheetReadOptions {
    if strict {
        SheetReadOptions::strict()
    } else {
        SheetReadOptions::default()
    }
}

fn write_options(pretty: bool) -> SheetWriteOptions {
    if pretty {
        SheetWriteOptions::pretty()
    } else {
        SheetWriteOptions::default()
    }
}

fn open_sheet(input: &Path, strict: bool) -> Result<Grid> {
    SheetReader::read_file(input, &read_options(strict))
        .with_context(|| format!("Failed to read '{}'", input.display()))
}

fn new_sheet(output: &Path, rows: u32, cols: u32, pretty: bool) -> Result<()> {
    let grid = Grid::with_options(&GridOptions {
        default_rows: rows,
        default_cols: cols,
    })
    .context("Invalid sheet size")?;

    SheetWriter::write_file(&grid, output, &write_options(pretty))
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    eprintln!("Wrote {}x{} sheet to '{}'", rows, cols, output.display());
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let file = File::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;
    let sheet = SheetReader::read_sheet(BufReader::new(file))
        .with_context(|| format!("Failed to parse '{}'", input.display()))?;
    let (grid, report) = Grid::hydrate_report(&sheet);

    println!("File: {}", input.display());
    println!("Size: {} rows x {} columns", grid.rows(), grid.cols());
    println!("Regions: {}", grid.regions().count());

    let merged: Vec<Region> = grid.merged_regions().collect();
    println!("Merged regions: {}", merged.len());
    for region in merged {
        if let Some(cell) = grid.cell(region.start) {
            println!("  {}", render::describe(region, cell));
        }
    }

    if report.clamped_dimensions {
        println!();
        println!("Stored size {}x{} was clamped", sheet.rows, sheet.cols);
    }
    if !report.skipped.is_empty() {
        println!();
        println!("Skipped entries: {}", report.skipped.len());
        for entry in &report.skipped {
            println!(
                "  #{} at ({}, {}): {}",
                entry.index, entry.r, entry.c, entry.reason
            );
        }
    }

    Ok(())
}

fn render_sheet(input: &Path, width: usize, strict: bool) -> Result<()> {
    let grid = open_sheet(input, strict)?;
    io::stdout()
        .write_all(render::render(&grid, width).as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}

fn edit_sheet(
    input: &Path,
    commands: &[String],
    output: Option<&Path>,
    pretty: bool,
    strict: bool,
) -> Result<()> {
    // Parse everything up front so a typo leaves the file untouched
    let ops = commands
        .iter()
        .map(|raw| {
            raw.parse::<EditOp>()
                .with_context(|| format!("Invalid edit command '{}'", raw))
        })
        .collect::<Result<Vec<_>>>()?;

    let grid = open_sheet(input, strict)?;
    let mut editor = SheetEditor::from_grid(SheetKind::default(), grid);

    let mut applied = 0;
    for (raw, op) in commands.iter().zip(&ops) {
        if op.apply(&mut editor)? {
            applied += 1;
        } else {
            tracing::warn!("Edit '{}' was not applied", raw);
        }
    }

    let output = output.unwrap_or(input);
    SheetWriter::write_file(editor.grid(), output, &write_options(pretty))
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    eprintln!(
        "Applied {} of {} edits to '{}'",
        applied,
        ops.len(),
        output.display()
    );
    Ok(())
}

fn run_store(root: &Path, command: StoreCommands) -> Result<()> {
    let mut store = DirTemplateStore::open(root)
        .with_context(|| format!("Failed to open template store '{}'", root.display()))?;

    match command {
        StoreCommands::Save {
            input,
            name,
            kind,
            description,
            visibility,
            content,
        } => {
            let kind: SheetKind = kind.parse()?;
            let visibility: Visibility = visibility.parse()?;
            let grid = open_sheet(&input, true)?;

            let mut meta = TemplateMeta::named(name)
                .with_description(description)
                .with_visibility(visibility);
            meta.is_template = !content;

            let mut editor = SheetEditor::from_grid(kind, grid);
            let id = editor
                .save_as(&mut store, meta)
                .context("Failed to store template")?;
            println!("{}", id);
        }
        StoreCommands::List {
            kind,
            templates,
            name,
        } => {
            let filter = TemplateFilter {
                kind: kind.as_deref().map(str::parse).transpose()?,
                templates_only: templates,
                name_contains: name,
            };
            for summary in store.list(&filter).context("Failed to list templates")? {
                println!("{}", summary_line(&summary));
            }
        }
        StoreCommands::Show { id, output, render } => {
            let id: TemplateId = id.parse()?;
            let template = store
                .get_by_id(id)
                .with_context(|| format!("Failed to load template {}", id))?;

            // JSON output is the record's sheet as stored, damaged entries included
            let mut text = Vec::new();
            if render {
                let (grid, report) = Grid::hydrate_report(&template.sheet);
                if !report.is_clean() {
                    tracing::warn!(
                        "Template {} drawn with {} entries skipped (size clamped: {})",
                        id,
                        report.skipped.len(),
                        report.clamped_dimensions
                    );
                }
                text.extend_from_slice(render::render(&grid, 24).as_bytes());
            } else {
                SheetWriter::write_sheet(&template.sheet, &mut text, &SheetWriteOptions::pretty())?;
                text.push(b'\n');
            }

            match output {
                Some(path) => std::fs::write(&path, text)
                    .with_context(|| format!("Failed to write '{}'", path.display()))?,
                None => io::stdout()
                    .write_all(&text)
                    .context("Failed to write to stdout")?,
            }
        }
        StoreCommands::Remove { id } => {
            let id: TemplateId = id.parse()?;
            store
                .remove(id)
                .with_context(|| format!("Failed to remove template {}", id))?;
            eprintln!("Removed template {}", id);
        }
    }

    Ok(())
}

fn summary_line(summary: &TemplateSummary) -> String {
    let marker = if summary.is_template { "template" } else { "content" };
    format!(
        "{}\t{}\t{}\t{}\t{}",
        summary.id, summary.kind, summary.visibility, marker, summary.name
    )
}
