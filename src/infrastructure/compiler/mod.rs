//! MJML-to-HTML compilation.
//!
//! Strategy:
//!  A) mjml CLI (if available)
//!  B) graceful fallback rewrite so previews still show translated text
//!
//! The CLI is a best-effort upgrade, never a hard dependency: any CLI
//! failure is logged and downgraded to the fallback, so `compile` always
//! produces usable output.

pub mod cli;
pub mod fallback;

use crate::domain::model::{CompiledHtml, Engine};
use crate::domain::traits::MarkupRenderer;
use crate::infrastructure::config::MjmlConfig;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

pub struct MjmlCompiler {
    cli_override: Option<PathBuf>,
    tmp_dir: Option<PathBuf>,
    use_cli: bool,
}

impl MjmlCompiler {
    pub fn new() -> Self {
        Self {
            cli_override: None,
            tmp_dir: None,
            use_cli: true,
        }
    }

    pub fn from_config(config: &MjmlConfig) -> Self {
        Self {
            cli_override: config.cli_path.as_ref().map(PathBuf::from),
            tmp_dir: config.tmp_path.as_ref().map(PathBuf::from),
            use_cli: true,
        }
    }

    /// Skip executable discovery entirely and always use the fallback
    /// rewrite. Useful when deterministic output matters more than
    /// fidelity.
    pub fn without_cli(mut self) -> Self {
        self.use_cli = false;
        self
    }

    /// Compile MJML into HTML.
    pub async fn compile(&self, mjml: &str) -> CompiledHtml {
        if self.use_cli {
            if let Some(cli) = cli::find_cli(self.cli_override.as_deref()) {
                match cli::compile_via_cli(&cli, mjml, self.tmp_dir.as_deref()).await {
                    Ok(html) => {
                        return CompiledHtml {
                            html,
                            engine: Engine::Cli,
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "CLI compile failed, falling back");
                    }
                }
            }
        }

        CompiledHtml {
            html: fallback::rewrite(mjml),
            engine: Engine::Fallback,
        }
    }
}

impl Default for MjmlCompiler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarkupRenderer for MjmlCompiler {
    async fn compile(&self, markup: &str) -> CompiledHtml {
        MjmlCompiler::compile(self, markup).await
    }
}
