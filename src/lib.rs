//! # mjt
//!
//! Translate MJML email documents through the DeepL API and compile them
//! to HTML.
//!
//! Two components do the real work:
//!
//! - [`DeeplClient`](api::DeeplClient): plain-text and HTML-aware
//!   translation with free/pro host failover. The first host is guessed
//!   from the key suffix (`:fx` means free plan); a 403 triggers exactly
//!   one retry against the other tier.
//! - [`MjmlCompiler`](api::MjmlCompiler): compiles MJML via the external
//!   `mjml` CLI when one is installed, and degrades to a built-in rewrite
//!   otherwise, so it always produces usable output.
//!
//! ## Quick start
//!
//! ```no_run
//! use mjt::api::{DeeplClient, MjmlCompiler, StaticCredentials};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), mjt::api::MjtError> {
//! let credentials = Arc::new(StaticCredentials::new(Some("abc123:fx".to_string())));
//! let client = DeeplClient::new(reqwest::Client::new(), credentials);
//!
//! let translated = client
//!     .translate_html("<mj-text>Hello</mj-text>", "fr", &[])
//!     .await?;
//!
//! let compiled = MjmlCompiler::new().compile(&translated.text).await;
//! println!("{} ({})", compiled.html, compiled.engine);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod state;
