pub type BalloonResult<T> = Result<T, BalloonError>;

#[derive(thiserror::Error, Debug)]
pub enum BalloonError {
    #[error("failed to load image {path}: {reason}")]
    ImageLoad { path: String, reason: String },

    #[error("no image files found in {0}")]
    NoImages(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("texture error: {0}")]
    Texture(String),

    #[error("recording error: {0}")]
    Recording(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BalloonError {
    pub fn image_load(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::ImageLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn texture(msg: impl Into<String>) -> Self {
        Self::Texture(msg.into())
    }

    pub fn recording(msg: impl Into<String>) -> Self {
        Self::Recording(msg.into())
    }
}
