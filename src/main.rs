//! # Folio CLI
//!
//! Usage:
//!   folio planner.json -o planner.pdf
//!   echo '{ "year": 2025 }' | folio -o planner.pdf
//!   folio --example > planner.json
//!   folio planner.json --dump-graph

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use folio::graph::PageGraph;
use folio::{task, FolioError, PlannerConfig};

#[derive(Parser, Debug)]
#[clap(name = "folio", version, about = "Generate a hyperlinked planner PDF")]
struct Options {
    /// Planner config as JSON. Reads stdin when omitted or `-`.
    config: Option<PathBuf>,

    /// Where to write the PDF. Defaults to a name derived from the config.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Print an example config and exit.
    #[clap(long)]
    example: bool,

    /// Print the page ids in document order instead of rendering.
    #[clap(long = "dump-graph")]
    dump_graph: bool,

    /// More logging. Repeat for more detail; RUST_LOG takes precedence.
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,
}

fn main() {
    let opt = Options::parse();
    init_logging(opt.verbose);

    if opt.example {
        print!("{}", example_config_json());
        return;
    }

    if let Err(e) = run(&opt) {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u64) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(opt: &Options) -> Result<(), CliError> {
    let input = read_input(opt.config.as_ref())?;
    let config = PlannerConfig::from_json(&input)?;

    if opt.dump_graph {
        config.validate()?;
        let graph = PageGraph::build(&config);
        let json = serde_json::to_string_pretty(&graph.page_order()).map_err(FolioError::from)?;
        println!("{}", json);
        return Ok(());
    }

    let output = opt
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.default_file_name()));

    let mut last_percent = None;
    let bytes = task::spawn(config).wait_with(|p| {
        let percent = p.percent();
        if last_percent != Some(percent) {
            last_percent = Some(percent);
            eprint!("\r  {:>3}% {}", percent, p.message);
            let _ = io::stderr().flush();
        }
    });
    if last_percent.is_some() {
        eprintln!();
    }
    let bytes = bytes?;

    fs::write(&output, &bytes).map_err(|e| CliError::Io { path: output.clone(), source: e })?;
    eprintln!("✓ Written {} bytes to {}", bytes.len(), output.display());
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String, CliError> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).map_err(|e| CliError::Io { path: path.clone(), source: e })
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::Io {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            Ok(buf)
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Folio(#[from] FolioError),
}

fn example_config_json() -> &'static str {
    r##"{
  "year": 2025,
  "startMonth": 1,
  "durationMonths": 12,
  "weekStart": "monday",
  "device": "tab-s",
  "orientation": "portrait",
  "handedness": "right",
  "theme": {
    "accentColor": "#3b82f6",
    "font": "Helvetica",
    "lineHeight": 1.2
  },
  "customSections": [
    { "title": "Journal", "pageCount": 20, "template": "lined" },
    { "title": "Sketches", "pageCount": 10, "template": "dotted" },
    { "title": "Scratch", "pageCount": 5, "template": "blank" }
  ],
  "cover": {
    "title": "2025",
    "subtitle": "Plan the work, work the plan"
  }
}
"##
}
