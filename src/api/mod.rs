// Re-export for convenience
pub use crate::domain::error::MjtError;
pub use crate::domain::model::{
    ApiCredential, CompiledHtml, Endpoints, Engine, PlanTier, TranslateMode, Translation,
};
pub use crate::domain::traits::{CredentialProvider, MarkupRenderer, Translator};
pub use crate::infrastructure::compiler::MjmlCompiler;
pub use crate::infrastructure::config::{ConfigCredentials, StaticCredentials};
pub use crate::infrastructure::network::client::DeeplClient;
