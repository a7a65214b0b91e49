#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    /// Network failure or a non-success status from the doctor feed
    #[error("Failed to load doctor data. {0}")]
    Fetch(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
