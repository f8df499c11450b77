mod error;

pub mod config;
pub mod dispatch;
pub mod extract;
pub mod provider;
pub mod providers;
pub mod request;
pub mod utils;

#[cfg(feature = "server")]
pub mod observability;
#[cfg(feature = "server")]
pub mod server;

pub use config::{GeminiConfig, HttpConfig, OpenAiConfig, RelayConfig};
pub use dispatch::Dispatcher;
pub use error::{ProviderError, RelayError, Result};
pub use extract::{JsonPath, extract_chat_text};
pub use provider::ProviderIdentity;
pub use providers::{ChatProvider, ImageProvider, ProviderCall};
pub use request::{ApiKey, Generation, GenerationKind, GenerationRequest, RawGenerationRequest};
