use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("palette name is empty")]
    EmptyName,
    #[error("no palette named '{0}'")]
    NotFound(String),
    #[error("active index {0} out of range")]
    ActiveOutOfRange(usize),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SampleSizeError {
    #[error("sample size must be between 1 and 25, got {0}")]
    OutOfRange(usize),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown display mode '{0}', expected R, H or 8")]
    DisplayMode(String),
    #[error("unknown export format '{0}', expected json, gpl or css")]
    ExportFormat(String),
}

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("file operation failed\n{0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse JSON file\n{0}")]
    JsonError(#[from] serde_json::Error),
    #[error("could not parse RON file\n{0}")]
    RonError(#[from] ron::error::SpannedError),
    #[error("could not parse YAML file\n{0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("failed to load image\n{0}")]
    ImageError(#[from] image::ImageError),
    #[error("file does not have a recognized extension")]
    ExtensionError,
    #[error("palette is missing or empty, nothing to export")]
    NothingToExport,
    #[error("{0}")]
    PaletteError(#[from] PaletteError),
    #[error("invalid sample size, {0}")]
    SampleSizeError(#[from] SampleSizeError),
}
