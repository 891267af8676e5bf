#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing query parameter `{0}`")]
    MissingParam(&'static str),
    #[error("invalid percent-encoding in `{param}`: {message}")]
    Encoding { param: String, message: String },
    #[error("unknown section {0:?}")]
    UnknownSection(String),
    #[error("unknown subsection {0:?}")]
    UnknownSubsection(String),
    #[error("subsection {0:?} is already in the presentation")]
    AlreadyAdded(String),
    #[error("subsection {0:?} is not in the presentation")]
    NotInPresentation(String),
    #[error("slide {index} out of range (1..={len})")]
    OutOfRange { index: usize, len: usize },
}
