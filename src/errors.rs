use std::fmt;

#[derive(Debug)]
pub enum DuelError {
    IoError(std::io::Error),
    ConfigError(String),
    JsonError(serde_json::Error),
    WindowError(String),
    RenderError(String),
}

impl fmt::Display for DuelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DuelError::IoError(err) => write!(f, "IO Error: {}", err),
            DuelError::ConfigError(msg) => write!(f, "Config Error: {}", msg),
            DuelError::JsonError(err) => write!(f, "JSON Error: {}", err),
            DuelError::WindowError(msg) => write!(f, "Window Error: {}", msg),
            DuelError::RenderError(msg) => write!(f, "Render Error: {}", msg),
        }
    }
}

impl std::error::Error for DuelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DuelError::IoError(err) => Some(err),
            DuelError::JsonError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DuelError {
    fn from(err: std::io::Error) -> Self {
        DuelError::IoError(err)
    }
}

impl From<serde_json::Error> for DuelError {
    fn from(err: serde_json::Error) -> Self {
        DuelError::JsonError(err)
    }
}
