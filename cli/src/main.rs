//! courtpress CLI - legal filing layout tool

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use courtpress::{JsonFormat, TextRenderOptions, Typesetter};

#[derive(Parser)]
#[command(name = "courtpress")]
#[command(version)]
#[command(about = "Lay out plain-text legal filings as paginated proof sheets", long_about = None)]
struct Cli {
    /// Input filing text file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    meta: MetaArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Default)]
struct MetaArgs {
    /// Firm name printed in the page caption
    #[arg(long, global = true)]
    firm: Option<String>,

    /// Case name printed in the page caption
    #[arg(long, global = true)]
    case: Option<String>,

    /// Document title header field
    #[arg(long, global = true)]
    title: Option<String>,

    /// Court header field
    #[arg(long, global = true)]
    court: Option<String>,

    /// Filing date (YYYY-MM-DD)
    #[arg(long, global = true)]
    date: Option<String>,

    /// Exhibit image paths, assigned to exhibits 1..N in order
    #[arg(long = "exhibit", global = true, value_name = "PATH")]
    exhibits: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the paginated proof sheet
    Layout {
        /// Input filing text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Sheet width in characters
        #[arg(long, default_value = "96")]
        width: usize,

        /// Skip the appended index pages
        #[arg(long)]
        no_index: bool,
    },

    /// Print the table of contents with page:line references
    Toc {
        /// Input filing text file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Serialize the parsed filing to JSON
    Json {
        /// Input filing text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show filing information
    Info {
        /// Input filing text file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List section headings in order
    Sections {
        /// Input filing text file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let meta = cli.meta.clone();

    let result = match cli.command {
        Some(Commands::Layout {
            input,
            output,
            width,
            no_index,
        }) => cmd_layout(&input, output.as_deref(), width, no_index, &meta),
        Some(Commands::Toc { input }) => cmd_toc(&input, &meta),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &meta),
        Some(Commands::Info { input }) => cmd_info(&input, &meta),
        Some(Commands::Sections { input }) => cmd_sections(&input),
        None => {
            if let Some(input) = cli.input {
                cmd_layout(&input, None, 96, false, &meta)
            } else {
                println!("{}", "Usage: courtpress <FILE>".yellow());
                println!("       courtpress --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn typesetter(meta: &MetaArgs) -> Result<Typesetter, Box<dyn std::error::Error>> {
    let mut ts = Typesetter::new();
    if let Some(ref firm) = meta.firm {
        ts = ts.with_firm_name(firm);
    }
    if let Some(ref case) = meta.case {
        ts = ts.with_case_name(case);
    }
    if let Some(ref title) = meta.title {
        ts = ts.with_title(title);
    }
    if let Some(ref court) = meta.court {
        ts = ts.with_court(court);
    }
    if let Some(ref date) = meta.date {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date {:?}: {}", date, e))?;
        ts = ts.with_date_filed(parsed);
    }
    if !meta.exhibits.is_empty() {
        ts = ts.with_exhibit_images(meta.exhibits.clone());
    }
    Ok(ts)
}

fn cmd_layout(
    input: &Path,
    output: Option<&Path>,
    width: usize,
    no_index: bool,
    meta: &MetaArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("laying out {}", input.display());
    let raw = fs::read_to_string(input)?;
    let options = TextRenderOptions::new()
        .with_sheet_width(width)
        .with_index(!no_index);
    let sheet = typesetter(meta)?
        .with_render_options(options)
        .typeset(&raw)?
        .to_proof_sheet()?;

    if let Some(path) = output {
        fs::write(path, &sheet)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", sheet);
    }

    Ok(())
}

fn cmd_toc(input: &Path, meta: &MetaArgs) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(input)?;
    let result = typesetter(meta)?.typeset(&raw)?;

    for entry in &result.toc().entries {
        match entry.label() {
            Some(label) => println!("{}  {}", label.cyan(), entry.text),
            None => println!("      {}", entry.text.dimmed()),
        }
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    meta: &MetaArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(input)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = typesetter(meta)?.typeset(&raw)?.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, meta: &MetaArgs) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(input)?;
    let result = typesetter(meta)?.typeset(&raw)?;
    let filing = &result.filing;

    println!("{}", "Filing Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), result.plan().total_pages);
    println!("{}: {}", "Sections".bold(), filing.section_count());
    println!("{}: {}", "Exhibits".bold(), filing.exhibits.len());
    println!("{}: {}", "Sub-documents".bold(), filing.documents.len());

    if let Some(ref title) = filing.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref court) = filing.metadata.court {
        println!("{}: {}", "Court".bold(), court);
    }
    if let Some(date) = filing.metadata.date_filed {
        println!("{}: {}", "Filed".bold(), date);
    }
    if !filing.metadata.detected_case_numbers.is_empty() {
        println!(
            "{}: {}",
            "Case numbers".bold(),
            filing.metadata.detected_case_numbers.join(", ")
        );
    }

    let text = filing.plain_text();
    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    Ok(())
}

fn cmd_sections(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let filing = courtpress::parse_file(input)?;

    for (key, section) in &filing.sections {
        if section.style.is_subsection() {
            println!("  {}", key.dimmed());
        } else {
            println!("{}", key.bold());
        }
    }

    Ok(())
}
