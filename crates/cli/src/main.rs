//! CLI tool for fitting drafted slide content to presentation templates.

use anyhow::{Context, Result};
use clap::Parser;
use slidefit_core::{slides_from_json_str, slides_from_text, Pipeline, PipelineConfig, Slide};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Assign templates to slide candidates, split oversized slides and extract template data.
#[derive(Parser, Debug)]
#[command(name = "slidefit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file(s): .json slide candidates, or markdown/plain text
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Pipeline configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum words per slide
    #[arg(long)]
    max_words: Option<usize>,

    /// Maximum characters per slide
    #[arg(long)]
    max_chars: Option<usize>,

    /// Maximum bullet points per slide
    #[arg(long)]
    max_bullets: Option<usize>,

    /// Maximum bold sections per slide
    #[arg(long)]
    max_sections: Option<usize>,

    /// Never split oversized slides
    #[arg(long)]
    no_split: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = load_config(&args)?;
    let pipeline = Pipeline::with_config(config).context("Invalid pipeline configuration")?;

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &pipeline) {
            Ok(output) => {
                if args.print {
                    println!("{}", output);
                } else {
                    let output_path = get_output_path(input_path, args.output.as_ref())?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Build the pipeline configuration from the config file and flags.
fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };

    let budget = &mut config.budget;
    if let Some(words) = args.max_words {
        budget.max_words = words;
    }
    if let Some(chars) = args.max_chars {
        budget.max_chars = chars;
    }
    if let Some(bullets) = args.max_bullets {
        budget.max_bullets = bullets;
    }
    if let Some(sections) = args.max_sections {
        budget.max_sections = sections;
    }
    if args.no_split {
        config.split_oversized = false;
    }

    Ok(config)
}

/// Process a single input file into pretty JSON.
fn process_file(input_path: &Path, args: &Args, pipeline: &Pipeline) -> Result<String> {
    let text = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let is_json = input_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let candidates = if is_json {
        log::debug!("Reading slide candidates as JSON");
        slides_from_json_str(&text)?
    } else {
        log::debug!("Reading slide candidates as text");
        slides_from_text(&text)?
    };

    if args.verbose {
        eprintln!("  Found {} slide candidates", candidates.len());
    }

    let slides = pipeline.process(candidates);

    if args.verbose {
        eprintln!("  Produced {} slides", slides.len());
        print_summary(&slides);
    }

    serde_json::to_string_pretty(&slides).context("Failed to serialize slides")
}

fn print_summary(slides: &[Slide]) {
    for slide in slides {
        let Some(recommendation) = &slide.recommendation else {
            continue;
        };
        eprintln!(
            "  {:>8} {:<22} {:.2}  {}",
            slide.order,
            recommendation.template.as_str(),
            recommendation.confidence,
            slide.title
        );
    }
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.slides.json", stem);

    let output_path = match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        },
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    writeln!(file, "{}", content).with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["slidefit"];
        argv.extend_from_slice(extra);
        argv.push("deck.json");
        Args::parse_from(argv)
    }

    #[test]
    fn test_output_path_next_to_input() {
        let path = get_output_path(Path::new("decks/q3.json"), None).unwrap();
        assert_eq!(path, PathBuf::from("decks/q3.slides.json"));
    }

    #[test]
    fn test_flags_override_budget() {
        let config = load_config(&args(&["--max-words", "80", "--max-bullets", "4", "--no-split"])).unwrap();
        assert_eq!(config.budget.max_words, 80);
        assert_eq!(config.budget.max_bullets, 4);
        assert_eq!(config.budget.max_chars, 900);
        assert!(!config.split_oversized);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = load_config(&args(&["--max-sections", "0"])).unwrap();
        assert!(Pipeline::with_config(config).is_err());
    }
}
