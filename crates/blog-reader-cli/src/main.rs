use anyhow::{Context, Result};
use blog_reader_config::{Config, ImageConfig};
use blog_reader_engine::{
    AssetRef, Block, Reader, parse_body,
    render::{AssetError, ImageUrlBuilder, PlainHighlighter, SanityImageUrlBuilder},
    toc::headings,
};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Render,
    Toc,
}

impl Command {
    fn parse(arg: &str) -> Option<Self> {
        match arg {
            "render" => Some(Command::Render),
            "toc" => Some(Command::Toc),
            _ => None,
        }
    }
}

/// Used when no `[image]` table is configured; image blocks are skipped.
struct UnconfiguredImages;

impl ImageUrlBuilder for UnconfiguredImages {
    fn url(&self, asset: &AssetRef, _max_width: u32) -> Result<String, AssetError> {
        Err(AssetError::Unconfigured {
            reference: asset.reference.clone(),
        })
    }
}

fn build_reader(image: Option<&ImageConfig>) -> Reader {
    match image {
        Some(image) => {
            let reader = Reader::new(
                PlainHighlighter,
                SanityImageUrlBuilder::new(&image.project_id, &image.dataset),
            );
            match image.max_width {
                Some(max_width) => reader.with_max_image_width(max_width),
                None => reader,
            }
        }
        None => Reader::new(PlainHighlighter, UnconfiguredImages),
    }
}

fn load_body(path: &Path) -> Result<Vec<Block>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read body file {}", path.display()))?;
    let body =
        parse_body(&json).with_context(|| format!("Failed to parse body file {}", path.display()))?;
    log::debug!("Loaded {} blocks from {}", body.len(), path.display());
    Ok(body)
}

fn run(command: Command, reader: &Reader, path: &Path) -> Result<()> {
    let body = load_body(path)?;

    match command {
        Command::Render => println!("{}", reader.render(&body).to_html()),
        Command::Toc => {
            for heading in headings(&body) {
                let indent = "  ".repeat(usize::from(heading.level) - 1);
                println!("{indent}{} (#{})", heading.text, heading.key);
            }
        }
    }
    Ok(())
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <render|toc> [body.json]");
    eprintln!("Without a body file, every body under the configured content path is used");
    process::exit(1);
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("blog-reader");

    let Some(command) = args.get(1).and_then(|arg| Command::parse(arg)) else {
        usage(program);
    };

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    log::debug!("Config path: {}", config_path.display());

    let reader = build_reader(config.as_ref().and_then(|c| c.image.as_ref()));

    let paths: Vec<PathBuf> = match (args.len(), &config) {
        (3, _) => vec![PathBuf::from(&args[2])],
        (2, Some(config)) => config.body_files()?,
        (2, None) => {
            eprintln!("Error: No body file provided and no config file found");
            eprintln!("Create a config file at {}", config_path.display());
            usage(program);
        }
        _ => usage(program),
    };

    if paths.is_empty() {
        log::warn!("No body files found");
    }

    let multiple = paths.len() > 1;
    for path in &paths {
        if multiple {
            println!("<!-- {} -->", path.display());
        }
        run(command, &reader, path)?;
    }

    Ok(())
}
