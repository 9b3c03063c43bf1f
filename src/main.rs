use clap::{Parser, Subcommand, ValueEnum};
use std::{fs::File, path::PathBuf, process::ExitCode, sync::Mutex};
use tracing::Level;

use fascicule::assets::{AssetLayout, page_download_name};
use fascicule::catalog::{ChapterCatalog, Part};
use fascicule::text::{PageTextStore, TextEndpoint};
use fascicule::ui::App;

#[derive(Parser)]
#[command(name = "fascicule")]
#[command(about = "A terminal viewer for the Sciences Physiques booklet")]
#[command(version)]
struct Cli {
    /// Directory holding fascicule_images/, fascicule_pdfs/ and download/
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Write logs to this file (the viewer never logs to the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the page viewer (default)
    View,

    /// List the chapters of the booklet
    Chapters {
        #[arg(short, long, value_enum)]
        part: Option<PartArg>,
    },

    /// Show the chapter and asset paths for a page
    Locate { page: u32 },

    /// Print the text of every page as JSON
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum PartArg {
    Chimie,
    Physique,
}

impl From<PartArg> for Part {
    fn from(arg: PartArg) -> Self {
        match arg {
            PartArg::Chimie => Part::Chemistry,
            PartArg::Physique => Part::Physics,
        }
    }
}

fn init_logging(cli: &Cli, interactive: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // Anything written to stderr would tear the alternate screen.
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::View));
    init_logging(&cli, interactive)?;

    let layout = AssetLayout::new(cli.root.clone());

    match cli.command {
        None | Some(Commands::View) => {
            let texts = PageTextStore::load(&layout.text_file());
            let mut app = App::new(layout, texts);
            app.run()
                .map_err(|e| -> Box<dyn std::error::Error> { Box::new(e) })?;
        }
        Some(Commands::Chapters { part }) => print_chapters(part.map(Part::from)),
        Some(Commands::Locate { page }) => print_location(&layout, page),
        Some(Commands::Text) => {
            let response = TextEndpoint::new(layout.text_file()).respond();
            println!("{}", serde_json::to_string_pretty(&response.body)?);
            if !response.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_chapters(part: Option<Part>) {
    let catalog = ChapterCatalog::new();
    let parts = match part {
        Some(part) => vec![part],
        None => vec![Part::Chemistry, Part::Physics],
    };

    for part in parts {
        println!("{}", part.label().to_uppercase());
        for chapter in catalog.chapters_by_part(part) {
            println!(
                "  {:>4}  {:>3}-{:<3}  {}",
                chapter.number, chapter.start_page, chapter.end_page, chapter.title
            );
        }
    }
}

fn print_location(layout: &AssetLayout, page: u32) {
    let catalog = ChapterCatalog::new();
    match catalog.find_chapter_for_page(page) {
        Some(chapter) => println!(
            "Page {}: chapitre {} ({}, {})",
            page, chapter.number, chapter.title, chapter.part
        ),
        None => println!("Page {}: hors chapitre", page),
    }

    match layout.resolve_page_image(page) {
        Ok(path) => println!("  image: {}", path.display()),
        Err(e) => println!("  image: {}", e),
    }
    match layout.resolve_page_pdf(page) {
        Ok(path) => println!("  pdf:   {} ({})", path.display(), page_download_name(page)),
        Err(e) => println!("  pdf:   {}", e),
    }
}
