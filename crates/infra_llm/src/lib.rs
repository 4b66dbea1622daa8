//! Completion Service Infrastructure
//!
//! Adapters implementing `core_kernel::CompletionPort` against real
//! completion services.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_llm::{OpenAiCompletionAdapter, OpenAiConfig};
//!
//! let adapter = OpenAiCompletionAdapter::new(OpenAiConfig {
//!     credential: Credential::new(api_key),
//!     ..Default::default()
//! })?;
//! let port: Arc<dyn CompletionPort> = Arc::new(adapter);
//! ```

pub mod openai;
mod wire;

pub use openai::{OpenAiCompletionAdapter, OpenAiConfig};
