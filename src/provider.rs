use std::fmt;

use serde::{Deserialize, Serialize};

/// Upstream provider a request is routed to.
///
/// Resolution from a raw string is total: see [`ProviderIdentity::parse_or_default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderIdentity {
    /// OpenAI-compatible chat completions and image generation.
    #[default]
    OpenAi,
    /// Gemini-compatible `generateContent`.
    Gemini,
}

impl ProviderIdentity {
    pub const ALL: [ProviderIdentity; 2] = [ProviderIdentity::OpenAi, ProviderIdentity::Gemini];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Resolves a caller-supplied provider name.
    ///
    /// Matching ignores ASCII case. Absent, empty, and unrecognized names all
    /// resolve to the default provider; this never fails.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        Self::ALL
            .into_iter()
            .find(|identity| identity.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or_default()
    }
}

impl fmt::Display for ProviderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
