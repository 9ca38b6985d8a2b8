//! ereader - Reflow plain-text books into pages sized for the reading column

mod book;
mod config;
mod progress;
mod text;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use config::ReaderConfig;
use progress::Progress;
use reflow::{Chapter, LayoutParams, Reader, ReadingPosition, TextMetrics, WidthClass};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Characters of page text shown in page summaries.
const PREVIEW_CHARS: usize = 60;

#[derive(Parser, Debug)]
#[command(name = "ereader")]
#[command(about = "Split plain-text books into chapters and screen-sized pages", long_about = None)]
#[command(version)]
struct Args {
    /// Enable debug output
    #[arg(short, long, default_value_t = false, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the chapters detected in a book
    Chapters {
        /// Path to the text file
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Paginate one chapter and summarize its pages
    Paginate {
        /// Path to the text file
        file: PathBuf,

        /// Chapter number (1-based)
        #[arg(short, long, default_value_t = 1)]
        chapter: usize,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Show a page, resuming from saved progress
    Read {
        /// Path to the text file
        file: PathBuf,

        /// Advance one page before showing
        #[arg(long, conflicts_with_all = ["prev", "goto"])]
        next: bool,

        /// Go back one page before showing
        #[arg(long, conflicts_with = "goto")]
        prev: bool,

        /// Jump to CHAPTER:PAGE (both 1-based)
        #[arg(long, value_name = "C:P")]
        goto: Option<String>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Layout overrides; anything left unset comes from the config file.
#[derive(clap::Args, Debug, Default)]
struct LayoutArgs {
    /// Font size in pixels
    #[arg(long)]
    font_size: Option<f32>,

    /// Column width class (narrow, comfort, wide)
    #[arg(long)]
    width: Option<WidthClass>,

    /// Font family
    #[arg(long)]
    font_family: Option<String>,

    /// Text column width in pixels
    #[arg(long)]
    container_width: Option<u32>,
}

impl LayoutArgs {
    fn apply(&self, mut config: ReaderConfig) -> Result<ReaderConfig> {
        if let Some(px) = self.font_size {
            config.set_font_size(px)?;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(family) = &self.font_family {
            config.font_family = Some(family.clone());
        }
        if let Some(px) = self.container_width {
            config.set_container_width(px)?;
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set default font size
    SetFontSize {
        /// Size in pixels
        px: f32,
    },
    /// Set default width class
    SetWidth {
        /// narrow, comfort or wide
        width: WidthClass,
    },
    /// Set default font family
    SetFontFamily {
        /// Family name; omit to use the host default
        family: Option<String>,
    },
    /// Set default text column width
    SetContainerWidth {
        /// Width in pixels
        px: u32,
    },
}

#[derive(Serialize)]
struct ChapterSummary<'a> {
    number: usize,
    title: &'a str,
    words: usize,
}

#[derive(Serialize)]
struct PageSummary<'a> {
    number: usize,
    words: usize,
    chars: usize,
    text: &'a str,
}

#[derive(Serialize)]
struct PaginationReport<'a> {
    chapter: usize,
    title: &'a str,
    layout: &'a LayoutParams,
    strategy: reflow::Strategy,
    pages: Vec<PageSummary<'a>>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    match &args.command {
        Commands::Chapters { file, json } => handle_chapters(file, *json),
        Commands::Paginate {
            file,
            chapter,
            layout,
            json,
        } => handle_paginate(file, *chapter, layout, *json),
        Commands::Read {
            file,
            next,
            prev,
            goto,
            layout,
        } => {
            let movement = match (*next, *prev, goto) {
                (true, _, _) => Movement::Next,
                (_, true, _) => Movement::Prev,
                (_, _, Some(spec)) => Movement::Goto(parse_position(spec)?),
                _ => Movement::Stay,
            };
            handle_read(file, movement, layout)
        }
        Commands::Config { action } => handle_config_command(action),
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn handle_chapters(file: &Path, json: bool) -> Result<()> {
    let book = book::load_book(file)?;
    let summaries: Vec<ChapterSummary> = book
        .chapters
        .iter()
        .enumerate()
        .map(|(i, c)| ChapterSummary {
            number: i + 1,
            title: &c.title,
            words: c.word_count(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    eprintln!(
        "{}: {} chapters, ~{} words",
        book.title,
        summaries.len(),
        book.total_words()
    );
    for summary in &summaries {
        println!(
            "{:>4}. {} ({} words)",
            summary.number, summary.title, summary.words
        );
    }
    Ok(())
}

fn handle_paginate(file: &Path, chapter: usize, layout: &LayoutArgs, json: bool) -> Result<()> {
    let book = book::load_book(file)?;
    let config = layout.apply(ReaderConfig::load().context("Failed to load configuration")?)?;
    let params = config.layout_params();

    let Some(selected) = chapter.checked_sub(1).and_then(|i| book.chapters.get(i)) else {
        bail!(
            "Chapter {} out of range (book has {} chapters)",
            chapter,
            book.chapters.len()
        );
    };

    let result = reflow::paginate(&selected.content, &params, &config.metrics())?;
    let report = PaginationReport {
        chapter,
        title: &selected.title,
        layout: &params,
        strategy: result.strategy,
        pages: result
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| PageSummary {
                number: i + 1,
                words: page.word_count(),
                chars: page.text.chars().count(),
                text: &page.text,
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    eprintln!(
        "{} ({} pages, {}px {} at {}px)",
        report.title,
        report.pages.len(),
        params.font_size_px,
        params.width_class,
        params.container_width_px
    );
    if result.strategy != reflow::Strategy::Measured {
        eprintln!("Note: pages were produced by the {:?} fallback", result.strategy);
    }
    for page in &report.pages {
        println!(
            "{:>4}. {:>5} words  {}",
            page.number,
            page.words,
            preview(page.text, PREVIEW_CHARS)
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Movement {
    Stay,
    Next,
    Prev,
    Goto(ReadingPosition),
}

fn handle_read(file: &Path, movement: Movement, layout: &LayoutArgs) -> Result<()> {
    let book = book::load_book(file)?;
    let config = layout.apply(ReaderConfig::load().context("Failed to load configuration")?)?;
    let params = config.layout_params();
    let book_id = book.book_id.clone();

    let saved = progress::load_progress(&book_id).context("Failed to load reading progress")?;
    let mut reader = open_reader(book.chapters, config.metrics(), params, saved.as_ref())?;

    let moved = match movement {
        Movement::Stay => true,
        Movement::Next => reader.next_page()?,
        Movement::Prev => reader.prev_page()?,
        Movement::Goto(position) => {
            reader.goto(position)?;
            true
        }
    };
    if !moved {
        let edge = if movement == Movement::Prev { "start" } else { "end" };
        eprintln!("Already at the {edge} of the book");
    }

    let position = reader.position();
    let title = reader
        .current_chapter()
        .map(|c| c.title.as_str())
        .unwrap_or_default();
    eprintln!(
        "{} | {} ({}/{}) | page {}/{} | {}%",
        book.title,
        title,
        position.chapter_idx + 1,
        reader.chapters().len(),
        position.page_idx + 1,
        reader.page_count(),
        reader.percent_complete()
    );
    if let Some(page) = reader.current_page() {
        println!("{}", page.text);
    }

    progress::save_progress(&Progress::new(book_id, position, reader.params()))
        .context("Failed to save reading progress")?;
    Ok(())
}

/// Open a book, resuming at `saved` when there is one.
///
/// The saved page index only means something under the layout it was taken
/// in, so the book is paginated that way first and then reflowed to `params`.
fn open_reader<M: TextMetrics>(
    chapters: Vec<Chapter>,
    metrics: M,
    params: LayoutParams,
    saved: Option<&Progress>,
) -> Result<Reader<M>> {
    let Some(progress) = saved else {
        return Ok(Reader::new(chapters, metrics, params)?);
    };

    let mut reader = Reader::new(chapters, metrics, progress.layout_params(&params))?;
    reader.goto(progress.position())?;
    if !progress.matches_layout(&params) {
        log::debug!("layout changed since last session; reflowing");
        reader.set_layout(params)?;
    }
    Ok(reader)
}

/// Parse `C:P` (1-based) into a reading position.
fn parse_position(spec: &str) -> Result<ReadingPosition> {
    let Some((chapter, page)) = spec.split_once(':') else {
        bail!("Invalid position '{}'. Expected CHAPTER:PAGE, e.g. 3:1", spec);
    };
    let chapter: usize = chapter
        .trim()
        .parse()
        .with_context(|| format!("Invalid chapter number in '{}'", spec))?;
    let page: usize = page
        .trim()
        .parse()
        .with_context(|| format!("Invalid page number in '{}'", spec))?;
    if chapter == 0 || page == 0 {
        bail!("Chapter and page numbers start at 1");
    }
    Ok(ReadingPosition::new(chapter - 1, page - 1))
}

/// First `max_chars` characters of `text` on one line.
fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ReaderConfig::load()?;
            println!("Configuration file: {:?}", ReaderConfig::config_path()?);
            println!();
            println!("font_size_px = {}", config.font_size_px);
            println!("width = \"{}\"", config.width);
            if let Some(family) = &config.font_family {
                println!("font_family = \"{}\"", family);
            } else {
                println!("font_family = (default)");
            }
            println!("container_width_px = {}", config.container_width_px);
            println!("line_height = {}", config.line_height);
            println!("advance_factor = {}", config.advance_factor);
            println!("paragraph_gap_lines = {}", config.paragraph_gap_lines);
        }
        ConfigAction::SetFontSize { px } => {
            let mut config = ReaderConfig::load()?;
            config.set_font_size(*px)?;
            config.save()?;
            println!("Default font size set to: {}px", config.font_size_px);
        }
        ConfigAction::SetWidth { width } => {
            let mut config = ReaderConfig::load()?;
            config.width = *width;
            config.save()?;
            println!("Default width set to: {}", config.width);
        }
        ConfigAction::SetFontFamily { family } => {
            let mut config = ReaderConfig::load()?;
            config.font_family = family.clone();
            config.save()?;
            match family {
                Some(family) => println!("Default font family set to: {}", family),
                None => println!("Default font family cleared"),
            }
        }
        ConfigAction::SetContainerWidth { px } => {
            let mut config = ReaderConfig::load()?;
            config.set_container_width(*px)?;
            config.save()?;
            println!("Default container width set to: {}px", config.container_width_px);
        }
    }
    Ok(())
}
