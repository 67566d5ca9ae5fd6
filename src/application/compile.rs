use crate::domain::model::CompiledHtml;
use crate::infrastructure::compiler::MjmlCompiler;
use crate::state::AppState;

/// Compile a markup document to HTML using the configured compiler.
///
/// Never fails: CLI problems downgrade to the fallback rewrite inside the
/// compiler, and the fallback itself has no failure mode.
pub async fn compile_document(state: &AppState, markup: &str, fallback_only: bool) -> CompiledHtml {
    let config = state.config.read().await;
    let mut compiler = MjmlCompiler::from_config(&config.mjml);
    drop(config);

    if fallback_only {
        compiler = compiler.without_cli();
    }

    compiler.compile(markup).await
}
