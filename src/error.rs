use thiserror::Error;

/// Maximum amount of characters of an upstream body kept for diagnostics.
const BODY_SNIPPET_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Riot API error: {status} - {message}")]
    RiotApi { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response of {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Player not found: {game_name}#{tag_line}")]
    PlayerNotFound { game_name: String, tag_line: String },

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// HTTP status returned by the upstream, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RiotApi { status, .. } => Some(*status),
            Self::PlayerNotFound { .. } => Some(404),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error originates from a call to the Riot API.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::RiotApi { .. } | Self::Http(_) | Self::Decode { .. } | Self::PlayerNotFound { .. }
        )
    }
}

/// Truncate an upstream body on a char boundary so it can be logged or displayed.
pub fn body_snippet(body: &str) -> String {
    match body.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
