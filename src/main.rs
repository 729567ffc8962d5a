mod app;
mod config;
mod strip;
mod ui;
mod util;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use strip::TabStrip;
use util::labels;
use util::layout::{self, FoldParams, TabRect, DEFAULT_FOLD_FACTOR, DEFAULT_MAX_FOLD_STEPS};

#[derive(Parser)]
#[command(name = "foldtabs")]
#[command(about = "A horizontally scrolling tab strip that folds overflowing tabs at its edges")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the demo window with a generated tab list
    Run {
        /// Number of tabs (random below 100 when omitted)
        #[arg(short, long)]
        tabs: Option<usize>,
        /// Path to a Lua config file (defaults to init.lua in the project root)
        #[arg(short, long, env = "FOLDTABS_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print the folded layout for the given parameters as JSON
    Layout {
        /// Number of tabs
        #[arg(long)]
        tabs: usize,
        /// Unfolded tab width in pixels
        #[arg(long)]
        tab_width: f32,
        /// Visible container width in pixels
        #[arg(long)]
        container: f32,
        /// Requested scroll offset in pixels (clamped before layout)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f32,
        /// Fold width as a fraction of the tab width
        #[arg(long, default_value_t = DEFAULT_FOLD_FACTOR)]
        fold_factor: f32,
        /// Tabs eligible for partial folding on each side
        #[arg(long, default_value_t = DEFAULT_MAX_FOLD_STEPS)]
        max_fold_steps: usize,
    },
}

/// JSON output of the `layout` command
#[derive(Serialize)]
struct LayoutReport {
    total_width: f32,
    container_width: f32,
    fold_width: f32,
    scroll_offset: f32,
    rects: Vec<TabRect>,
}

fn print_layout(
    tabs: usize,
    tab_width: f32,
    container: f32,
    offset: f32,
    fold_factor: f32,
    max_fold_steps: usize,
) -> Result<(), String> {
    let params = FoldParams::new(tab_width, fold_factor, max_fold_steps).map_err(|e| e.to_string())?;
    layout::check_container_width(container).map_err(|e| e.to_string())?;

    let total_width = params.total_width(tabs);
    let scroll_offset = layout::clamp_offset(offset, total_width, container);
    let rects = params
        .layout(tabs, scroll_offset, container)
        .map_err(|e| e.to_string())?;

    let report = LayoutReport {
        total_width,
        container_width: container,
        fold_width: params.fold_width,
        scroll_offset,
        rects,
    };
    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { tabs, config } => {
            let config = config::load_config(config.as_deref());

            let params = match FoldParams::new(
                config.tabs.tab_width,
                config.tabs.fold_factor,
                config.tabs.max_fold_steps,
            ) {
                Ok(params) => params,
                Err(e) => {
                    eprintln!("Invalid tab configuration: {}", e);
                    std::process::exit(1);
                }
            };

            let mut rng = rand::rng();
            let count = tabs.unwrap_or_else(|| labels::random_tab_count(&mut rng));
            let strip = TabStrip::new(labels::demo_labels(count, &mut rng), params);

            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([900.0, 160.0])
                    .with_min_inner_size([200.0, 100.0]),
                ..Default::default()
            };

            eframe::run_native(
                "foldtabs",
                options,
                Box::new(move |cc| Ok(Box::new(app::App::new(cc, strip, config)))),
            )
        }
        Commands::Layout {
            tabs,
            tab_width,
            container,
            offset,
            fold_factor,
            max_fold_steps,
        } => {
            if let Err(e) = print_layout(tabs, tab_width, container, offset, fold_factor, max_fold_steps) {
                eprintln!("Layout failed: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
