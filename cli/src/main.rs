//! Axis grid command-line viewer
//!
//! Loads a column schema and a set of rows, applies sort/page/selection
//! actions through the grid engine, and prints the visible page:
//!
//! Usage:
//!   axisgrid --columns columns.json --rows rows.json --sort revenue:desc --page 2
//!
//! Nothing is written back; every run starts from the initial grid state.

use std::path::PathBuf;
use anyhow::Result;
use axisgrid_cli::{Actions, Input, ViewReport, drive, load_filter_model, parse_sort, render_page};
use axisgrid_model::SortModel;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "axisgrid")]
#[command(about = "Sort, page and select tabular data from the command line")]
struct Args {
    /// JSON array of column definitions
    #[arg(short, long)]
    columns: PathBuf,

    /// JSON array of row objects
    #[arg(short, long)]
    rows: PathBuf,

    /// TOML grid config (row key, page sizes, feature switches)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sort as field[:asc|desc]
    #[arg(short, long, value_parser = parse_sort)]
    sort: Option<SortModel>,

    /// 1-based page to show; out-of-range pages are clamped
    #[arg(short, long)]
    page: Option<usize>,

    /// Rows per page; must be one of the configured options
    #[arg(long)]
    page_size: Option<usize>,

    /// Row keys to select (repeatable)
    #[arg(long = "select")]
    select: Vec<String>,

    /// Toggle select-all on the shown page
    #[arg(long)]
    select_page: bool,

    /// JSON filter model to validate and include in --params output
    #[arg(long)]
    filters: Option<PathBuf>,

    /// Print server-side fetch parameters for the shown page
    #[arg(long)]
    params: bool,

    /// Print the view as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let input = Input::load(&args.columns, &args.rows, args.config.as_deref())?;
    let grid = input.grid();
    let filters = match &args.filters {
        Some(path) => {
            let model = load_filter_model(path, &input.columns)?;
            info!(fields = model.len(), "Filter model is valid");
            Some(model)
        }
        None => None,
    };

    let actions = Actions {
        page_size: args.page_size,
        sort: args.sort,
        select: args.select,
        select_page: args.select_page,
        page: args.page,
    };
    let state = drive(&grid, &actions)?;

    if args.params {
        let params = grid.grid_params(&state, filters.as_ref())?;
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    let view = grid.view(&state);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&ViewReport::new(&view))?);
    } else {
        print!("{}", render_page(&view, &input.config));
    }
    Ok(())
}
