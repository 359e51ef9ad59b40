use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    color::DisplayMode,
    error::PickerError,
    export::ExportFormat,
    palette::PICKER_PALETTE_NAME,
    sample::SampleSize,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub sample_size: SampleSize,
    pub display_mode: DisplayMode,
    pub palette_name: String,
    pub format: ExportFormat,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            sample_size: SampleSize::default(),
            display_mode: DisplayMode::default(),
            palette_name: PICKER_PALETTE_NAME.to_string(),
            format: ExportFormat::default(),
        }
    }
}

impl PickerConfig {
    pub fn from_json(src: &str) -> serde_json::Result<PickerConfig> {
        serde_json::from_str(src)
    }

    pub fn from_ron(src: &str) -> ron::error::SpannedResult<PickerConfig> {
        ron::from_str(src)
    }

    pub fn from_yaml(src: &str) -> Result<PickerConfig, serde_yaml::Error> {
        serde_yaml::from_str(src)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<PickerConfig, PickerError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = match path.as_ref().extension().ok_or(PickerError::ExtensionError)?.to_str() {
            Some("json") => PickerConfig::from_json(&contents)?,
            Some("ron") => PickerConfig::from_ron(&contents)?,
            Some("yaml" | "yml") => PickerConfig::from_yaml(&contents)?,
            _ => return Err(PickerError::ExtensionError),
        };

        log::debug!("loaded config from '{}': {:?}", path.as_ref().display(), config);
        Ok(config)
    }
}
