pub mod cli;
pub mod commands;
pub mod config;
pub mod filter;
pub mod mission;
pub mod render;
pub mod store;

#[derive(Debug)]
pub enum PanelError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(String),
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::Io(e) => write!(f, "io: {e}"),
            PanelError::Json(e) => write!(f, "json: {e}"),
            PanelError::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for PanelError {}

impl From<std::io::Error> for PanelError {
    fn from(e: std::io::Error) -> Self {
        PanelError::Io(e)
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(e: serde_json::Error) -> Self {
        PanelError::Json(e)
    }
}
