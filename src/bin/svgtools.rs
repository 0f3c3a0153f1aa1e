use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use svg_tools::{
    dom::{Document, ParseOptions, UnsupportedPolicy, write_document},
    draw::{Info, resolve},
    Cell,
};

#[derive(Parser)]
#[command(name = "svgtools")]
#[command(about = "Inspect SVG drawings and tile them into grids")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print canvas size and content counts
    Info {
        file: PathBuf,
    },
    /// Print every path with its group trail, style, transform and bounds
    Paths {
        file: PathBuf,
        /// Fail on elements other than groups and paths instead of skipping them
        #[arg(long)]
        strict: bool,
    },
    /// Repeat the drawing in a grid of ROWS x COLS copies
    Grid {
        file: PathBuf,
        rows: usize,
        cols: usize,
        output: PathBuf,
    },
    /// Copy the content of one tile of a grid into another
    Move {
        file: PathBuf,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        output: PathBuf,
    },
    /// Exchange the contents of two tiles of a grid
    Swap {
        file: PathBuf,
        row_a: usize,
        col_a: usize,
        row_b: usize,
        col_b: usize,
        output: PathBuf,
    },
}

fn load(path: &Path, options: &ParseOptions) -> Result<Document> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Document::from_data_with(&data, options)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn save(doc: &Document, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    std::fs::write(path, write_document(doc))
        .with_context(|| format!("failed to write {}", path.display()))
}

fn edit(file: &Path, output: &Path, op: impl FnOnce(&Document) -> Result<Document, svg_tools::GridError>) -> Result<()> {
    let doc = load(file, &ParseOptions::default())?;
    let edited = op(&doc).with_context(|| format!("cannot edit {}", file.display()))?;
    save(&edited, output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => {
            let doc = load(&file, &ParseOptions::default())?;
            println!("File: {}", file.display());
            println!("{}", Info::collect(&doc));
            println!("Done.");
        }
        Commands::Paths { file, strict } => {
            let unsupported = if strict { UnsupportedPolicy::Fail } else { UnsupportedPolicy::Skip };
            let doc = load(&file, &ParseOptions { unsupported })?;
            for path in resolve(&doc) {
                println!("{}", path);
            }
        }
        Commands::Grid { file, rows, cols, output } => {
            edit(&file, &output, |doc| svg_tools::tile(doc, rows, cols))?;
        }
        Commands::Move { file, from_row, from_col, to_row, to_col, output } => {
            let (from, to): (Cell, Cell) = ((from_row, from_col), (to_row, to_col));
            edit(&file, &output, |doc| svg_tools::move_tile(doc, from, to))?;
        }
        Commands::Swap { file, row_a, col_a, row_b, col_b, output } => {
            edit(&file, &output, |doc| svg_tools::swap_tiles(doc, (row_a, col_a), (row_b, col_b)))?;
        }
    }
    Ok(())
}
