// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for trello2md.
//!
//! This binary provides the `trello2md` command for converting Trello board
//! exports from JSON to Markdown format.

use lexopt::prelude::*;
use snafu::{OptionExt, ensure, prelude::*};
use std::path::{Path, PathBuf};
use trello2md::{parser, renderer};
use walkdir::WalkDir;

/// Where to write the rendered output.
#[derive(Clone)]
enum OutputTarget {
    /// Write next to each input, replacing `.json` with `.md`.
    Beside,
    /// Write each file to the specified directory.
    Directory(PathBuf),
    /// Write to stdout.
    Stdout,
}

#[allow(clippy::struct_excessive_bools)]
struct Cli {
    input: Vec<PathBuf>,
    output: OutputTarget,
    labels: bool,
    archived: bool,
    card_links: bool,
    header: bool,
    comments: bool,
    quiet: bool,
    dry_run: bool,
    force: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("at least one input file or directory is required"))]
    NoInputFiles,

    #[snafu(display("cannot output multiple files to stdout"))]
    MultipleFilesToStdout,

    #[snafu(display("failed to create output directory: {source}"))]
    CreateOutputDir { source: std::io::Error },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse {}: {source}", path.display()))]
    ParseFile {
        path: PathBuf,
        source: parser::ParseError,
    },

    #[snafu(display("failed to render {}: {source}", path.display()))]
    RenderFile {
        path: PathBuf,
        source: renderer::RenderError,
    },

    #[snafu(display("invalid input filename: no file stem"))]
    InvalidFilename,

    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert Trello board JSON exports to Markdown

Usage: {name} [OPTIONS] <INPUT>...

Arguments:
  <INPUT>...  Input JSON files or directories containing exports

Options:
  -o, --output <OUTPUT>  Output directory, or - for stdout
                         (default: next to each input, .json replaced by .md)

Content:
  -l, --labels           Print card labels
  -a, --archived         Don't ignore archived lists and cards
  -c, --card-links       (Currently not implemented)
      --header           Start with a board summary
      --comments         Include card comments

Other options:
  -q, --quiet            Suppress progress messages
  -n, --dry-run          Show what would be processed without writing
  -f, --force            Overwrite existing output files
  -h, --help             Print help
  -V, --version          Print version",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    );
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    // Show help if no arguments provided
    if std::env::args().len() == 1 {
        print_help();
        std::process::exit(0);
    }

    let mut input = Vec::new();
    let mut output = OutputTarget::Beside;
    let mut labels = false;
    let mut archived = false;
    let mut card_links = false;
    let mut header = false;
    let mut comments = false;
    let mut quiet = false;
    let mut dry_run = false;
    let mut force = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('o') | Long("output") => {
                let val: PathBuf = parser.value()?.parse()?;
                output = if val == Path::new("-") {
                    OutputTarget::Stdout
                } else {
                    OutputTarget::Directory(val)
                };
            }
            Short('l') | Long("labels") => labels = true,
            Short('a') | Long("archived") => archived = true,
            Short('c') | Long("card-links") => card_links = true,
            Long("header") => header = true,
            Long("comments") => comments = true,
            Short('q') | Long("quiet") => quiet = true,
            Short('n') | Long("dry-run") => dry_run = true,
            Short('f') | Long("force") => force = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            Value(val) => input.push(val.parse()?),
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Cli {
        input,
        output,
        labels,
        archived,
        card_links,
        header,
        comments,
        quiet,
        dry_run,
        force,
    })
}

fn main() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;

    ensure!(!cli.input.is_empty(), NoInputFilesSnafu);

    // Collect all input files first
    let files = collect_input_files(&cli.input);
    ensure!(!files.is_empty(), NoInputFilesSnafu);

    match &cli.output {
        OutputTarget::Stdout => {
            ensure!(files.len() == 1, MultipleFilesToStdoutSnafu);
            process_to_stdout(&files[0], &cli)?;
        }
        OutputTarget::Directory(dir) => {
            if !cli.dry_run {
                std::fs::create_dir_all(dir).context(CreateOutputDirSnafu)?;
            }
            for file in &files {
                let out_name = file.file_stem().context(InvalidFilenameSnafu)?;
                let out_path = dir.join(format!("{}.md", out_name.to_string_lossy()));
                process_file(file, &out_path, &cli)?;
            }
        }
        OutputTarget::Beside => {
            for file in &files {
                process_file(file, &beside_output_path(file), &cli)?;
            }
        }
    }

    if cli.card_links && !cli.quiet {
        eprintln!("Option --card-links is currently unimplemented and ignored.");
    }

    Ok(())
}

/// Collects all JSON files from the given inputs (files and directories).
fn collect_input_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            {
                files.push(entry.path().to_path_buf());
            }
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Returns the output path used when no `--output` is given.
///
/// A `.json` extension is replaced by `.md`; any other name gets `.md`
/// appended.
fn beside_output_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == "json") {
        input.with_extension("md")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".md");
        PathBuf::from(name)
    }
}

/// Creates render options from CLI arguments.
#[allow(clippy::missing_const_for_fn)]
fn make_render_options(cli: &Cli) -> renderer::RenderOptions {
    renderer::RenderOptions {
        include_header: cli.header,
        include_comments: cli.comments,
        print_labels: cli.labels,
        include_archived: cli.archived,
        card_links: cli.card_links,
    }
}

/// Reads, parses and renders a single board export.
fn convert(input: &Path, cli: &Cli) -> Result<String, Error> {
    let json = std::fs::read_to_string(input).context(ReadFileSnafu { path: input })?;
    let board = parser::parse_board(&json).context(ParseFileSnafu { path: input })?;

    let opts = make_render_options(cli);
    renderer::render_board(&board, &opts).context(RenderFileSnafu { path: input })
}

/// Processes a single file and outputs to stdout.
fn process_to_stdout(input: &Path, cli: &Cli) -> Result<(), Error> {
    if cli.dry_run {
        eprintln!("Would output {}", input.display());
        return Ok(());
    }

    let markdown = convert(input, cli)?;

    print!("{markdown}");
    Ok(())
}

/// Processes a single file and writes it to `out_path`.
fn process_file(input: &Path, out_path: &Path, cli: &Cli) -> Result<(), Error> {
    // Handle dry-run mode
    if cli.dry_run {
        eprintln!("Would write {}", out_path.display());
        return Ok(());
    }

    // Check if output exists and handle overwrite
    if out_path.exists() && !cli.force {
        eprintln!(
            "Skipping {} (already exists, use --force to overwrite)",
            out_path.display()
        );
        return Ok(());
    }

    let markdown = convert(input, cli)?;

    std::fs::write(out_path, &markdown).context(WriteFileSnafu { path: out_path })?;

    if !cli.quiet {
        eprintln!("Wrote {}", out_path.display());
    }
    Ok(())
}
