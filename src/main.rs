// Main entry point
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

use mjt::application;
use mjt::domain::error::MjtError;
use mjt::domain::model::{ApiCredential, CompiledHtml, Translation};
use mjt::infrastructure::compiler::cli::find_cli;
use mjt::infrastructure::config::{self, load_config};
use mjt::interfaces::cli::Cli;
use mjt::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Spawn signal handler task
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    // Handle commands (flags)
    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }
    if cli.edit_config {
        if let Some(config_path) = config::get_config_path() {
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            let config_path_clone = config_path.clone();
            // Run editor in blocking task
            tokio::task::spawn_blocking(move || {
                std::process::Command::new(editor)
                    .arg(&config_path_clone)
                    .status()
            })
            .await??;
        } else {
            eprintln!("{}", "Config file not found".red());
        }
        return Ok(());
    }

    let target_lang = cli
        .lang
        .clone()
        .unwrap_or_else(|| config.deepl.target_lang.clone());
    let state = AppState::new(config)?;

    if cli.status {
        print_status(&state).await;
        return Ok(());
    }

    if cli.probe {
        tokio::select! {
            result = application::translate::probe(&state, &target_lang) => {
                report_probe(result, cli.json);
            }
            _ = shutdown_rx => {
                eprintln!("Interrupted.");
            }
        }
        return Ok(());
    }

    // Handle document pipeline
    let Some(input) = cli.input.as_deref() else {
        eprintln!(
            "{}",
            "Please provide an input file (or \"-\" for stdin)".red()
        );
        std::process::exit(1);
    };
    let markup = read_input(input).await?;

    if cli.compile_only {
        let compiled =
            application::compile::compile_document(&state, &markup, cli.fallback_only).await;
        emit_compiled(&compiled, cli.output.as_deref(), cli.json).await?;
        return Ok(());
    }

    let translated = tokio::select! {
        result = run_translation(&state, &markup, &target_lang, cli.text) => result,
        _ = shutdown_rx => {
            eprintln!("Interrupted.");
            return Ok(());
        }
    };

    let translation = match translated {
        Ok(translation) => translation,
        Err(e) => {
            report_failure(&e, cli.json);
            std::process::exit(1);
        }
    };

    let compiled = if cli.compile {
        Some(application::compile::compile_document(&state, &translation.text, cli.fallback_only).await)
    } else {
        None
    };

    emit_result(
        &translation,
        compiled.as_ref(),
        &target_lang,
        cli.output.as_deref(),
        cli.json,
    )
    .await?;

    Ok(())
}

async fn run_translation(
    state: &AppState,
    markup: &str,
    target_lang: &str,
    plain_text: bool,
) -> Result<Translation, MjtError> {
    if plain_text {
        application::translate::translate_text(state, markup, target_lang).await
    } else {
        application::translate::translate_document(state, markup, target_lang).await
    }
}

async fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        use tokio::io::AsyncReadExt;

        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        Ok(buffer)
    } else {
        Ok(tokio::fs::read_to_string(input).await?)
    }
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &mjt::infrastructure::config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}

fn report_probe(result: Result<Translation, MjtError>, json: bool) {
    match result {
        Ok(translation) => {
            let message = format!(
                "Success! \"{}\" → \"{}\"",
                application::translate::PROBE_TEXT,
                translation.text
            );
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "success": true, "message": message })
                );
            } else {
                println!("{}", message.green());
                println!(
                    "  served by {} host (HTTP {})",
                    translation.host, translation.status
                );
            }
        }
        Err(e) => {
            let message = format!("Error: {}", e);
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "success": false, "message": message })
                );
            } else {
                println!("{}", message.red());
            }
            std::process::exit(1);
        }
    }
}

fn report_failure(error: &MjtError, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "success": false, "message": error.to_string() })
        );
    } else {
        eprintln!("{}", error.to_string().red());
    }
}

async fn emit_compiled(
    compiled: &CompiledHtml,
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let payload = serde_json::json!({
            "success": true,
            "engine": compiled.engine,
            "html": compiled.html,
        });
        write_output(output, &serde_json::to_string_pretty(&payload)?).await?;
    } else {
        eprintln!("{}", format!("Compiled with {} engine", compiled.engine).cyan());
        write_output(output, &compiled.html).await?;
    }
    Ok(())
}

async fn emit_result(
    translation: &Translation,
    compiled: Option<&CompiledHtml>,
    target_lang: &str,
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let payload = serde_json::json!({
            "success": true,
            "target_lang": target_lang.to_uppercase(),
            "host": translation.host,
            "status": translation.status,
            "translation": translation.text,
            "compile": compiled.map(|c| serde_json::json!({
                "engine": c.engine,
                "html": c.html,
            })),
        });
        write_output(output, &serde_json::to_string_pretty(&payload)?).await?;
        return Ok(());
    }

    eprintln!(
        "{}",
        format!(
            "Translated to {} via {} host (HTTP {})",
            target_lang.to_uppercase(),
            translation.host,
            translation.status
        )
        .green()
    );

    match compiled {
        Some(compiled) => {
            eprintln!("{}", format!("Compiled with {} engine", compiled.engine).cyan());
            write_output(output, &compiled.html).await?;
        }
        None => {
            write_output(output, &translation.text).await?;
        }
    }

    Ok(())
}

async fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, content).await?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

async fn print_status(state: &AppState) {
    println!("{}", "mjt Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Config status
    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );

    let config = state.config.read().await;

    // Key presence only; the key itself is never printed
    match config.deepl.api_key.as_deref().and_then(ApiCredential::new) {
        Some(credential) => {
            println!("DeepL API: Configured ({} plan guess)", credential.plan_hint());
        }
        None => println!("DeepL API: Not configured"),
    }
    println!("Default target language: {}", config.deepl.target_lang);

    // Compiler status
    let cli_override = config.mjml.cli_path.as_ref().map(PathBuf::from);
    match find_cli(cli_override.as_deref()) {
        Some(path) => println!("MJML CLI: {}", path.display()),
        None => println!("MJML CLI: Not found (fallback rewrite will be used)"),
    }
}
