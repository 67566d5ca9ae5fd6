use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mjt")]
#[command(about = "Translate MJML emails through DeepL and compile them to HTML.")]
#[command(version)]
pub struct Cli {
    /// Target language code (ISO 639-1), e.g. DE, FR, ES
    #[arg(short = 'l', long)]
    pub lang: Option<String>,

    /// Treat input as plain text instead of an MJML/HTML fragment
    #[arg(short = 't', long)]
    pub text: bool,

    /// Compile the translated markup to HTML as well
    #[arg(short = 'c', long)]
    pub compile: bool,

    /// Compile only, skip translation
    #[arg(long)]
    pub compile_only: bool,

    /// Compile with the built-in rewrite even if the mjml CLI is installed
    #[arg(long)]
    pub fallback_only: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the result to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Send a fixed greeting through the API to verify the key works
    #[arg(long)]
    pub probe: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Edit configuration file
    #[arg(long)]
    pub edit_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Input file (MJML document); use "-" for stdin
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}
