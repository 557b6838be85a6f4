// Wed Aug 26 2026 - Alex

use clap::Parser;
use colored::Colorize;
use cstruct_offset_generator::{
    config::Config,
    frontend::ParseSession,
    layout::{LayoutError, LayoutExtractor},
    output::{JsonSerializer, ReportFormatter},
    utils::logging,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "C struct layout extractor for binding generators", long_about = None)]
struct Args {
    /// C source or header file to parse
    source: PathBuf,

    #[arg(short = 's', long = "struct", default_value = "rte_mbuf")]
    struct_name: String,

    /// Preprocessor definition, KEY or KEY=VALUE (repeatable)
    #[arg(short = 'D', long = "define")]
    defines: Vec<String>,

    /// Directory searched for quoted includes (repeatable)
    #[arg(short = 'I', long = "include-dir")]
    include_dirs: Vec<PathBuf>,

    /// Write the layout as JSON in addition to the stdout report
    #[arg(long)]
    json: Option<PathBuf>,

    /// Emit bare `offset name type size` rows with no header
    #[arg(long)]
    plain: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long)]
    no_color: bool,
}

fn main() {
    let args = Args::parse();
    logging::init_logger(args.verbose as usize);
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = Config::new()
        .with_source_file(args.source.clone())
        .with_target_struct(args.struct_name.clone());
    for define in &args.defines {
        config = config.with_definition(define);
    }
    // Defaults carry RTE_NEXT_ABI for the stock mbuf toolchain; explicit
    // -D flags are applied on top.
    for dir in &args.include_dirs {
        config = config.with_include_dir(dir.clone());
    }

    if let Err(message) = config.validate() {
        eprintln!("{} Invalid configuration: {}", "[!]".red(), message);
        std::process::exit(2);
    }

    let start_time = Instant::now();
    log::info!("parsing {}", args.source.display());

    let session = ParseSession::new()
        .with_definitions(config.definitions.clone())
        .with_include_dirs(config.include_dirs.clone());

    let unit = match session.parse_file(&args.source) {
        Ok(unit) => unit,
        Err(e) => {
            eprintln!("{} Failed to parse {}: {}", "[!]".red(), args.source.display(), e);
            std::process::exit(1);
        }
    };

    let extractor = LayoutExtractor::new()
        .with_cache_line_size(config.cache_line_size)
        .with_sentinel(config.sentinel.clone())
        .with_pointer_label(config.pointer_label.clone());

    let layout = match extractor.extract_by_name(unit.root(), &config.target_struct) {
        Ok(layout) => layout,
        Err(LayoutError::StructNotFound(name)) => {
            eprintln!(
                "{} Struct '{}' not found in {}",
                "[!]".red(),
                name,
                args.source.display()
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{} Layout extraction failed: {}", "[!]".red(), e);
            std::process::exit(1);
        }
    };

    let formatter = ReportFormatter::new().with_color(!args.no_color);
    if args.plain {
        println!("{}", formatter.format_plain(&layout));
    } else {
        print!("{}", formatter.format(&layout));
    }

    if let Some(json_path) = &args.json {
        let serializer = JsonSerializer::new();
        if let Err(e) = serializer.serialize_to_file(&layout, unit.path(), json_path) {
            eprintln!("{} Failed to write JSON report: {}", "[!]".red(), e);
            std::process::exit(1);
        }
        println!("{} JSON report saved to: {}", "[+]".green(), json_path.display());
    }

    log::info!(
        "extracted {} fields in {:.2}ms",
        layout.records().len(),
        start_time.elapsed().as_secs_f64() * 1000.0
    );
}
