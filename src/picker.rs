use std::path::Path;

use nalgebra::Point2;

use super::{
    buffer::PixelSource,
    color::{Color, DisplayMode, convert_color},
    config::PickerConfig,
    error::{PaletteError, PickerError},
    export::{ExportFormat, export},
    palette::{Palette, PaletteLibrary},
    sample::{SampleSize, sample},
};

/// Hex code and the three channel strings of a color, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorReadout {
    pub hex: String,
    pub channels: (String, String, String),
}

impl ColorReadout {
    fn new(color: &Color, mode: DisplayMode) -> Self {
        ColorReadout {
            hex: color.to_hex(),
            channels: convert_color(color, mode),
        }
    }
}

/// State of one picking session: the last sampled color, the sampling
/// settings and every palette created along the way.
///
/// The UI owns the session and hands it to each callback.
#[derive(Debug, Clone, Default)]
pub struct Picker {
    config: PickerConfig,
    color: Color,
    selected: bool,
    palettes: PaletteLibrary,
}

impl Picker {
    pub fn new(config: PickerConfig) -> Self {
        Picker {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn sample_size(&self) -> SampleSize {
        self.config.sample_size
    }

    pub fn set_sample_size(&mut self, size: SampleSize) {
        self.config.sample_size = size;
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.config.display_mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.config.display_mode = mode;
    }

    /// Last picked color, black until something is picked.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn palettes(&self) -> &PaletteLibrary {
        &self.palettes
    }

    pub fn working_palette(&self) -> Option<&Palette> {
        self.palettes.get(&self.config.palette_name)
    }

    fn ensure_palette(&mut self) -> &mut Palette {
        let palette = self.palettes.get_or_create(&self.config.palette_name);
        palette.keep = false;
        palette
    }

    /// Samples the source at `origin` and makes the result, clamped to [0,1],
    /// the current color. With `append` the color is also added to the
    /// working palette.
    pub fn pick(&mut self, source: &impl PixelSource, origin: Point2<usize>, append: bool) -> Color {
        self.ensure_palette();

        let color = sample(source, origin, self.config.sample_size).clamped();
        self.color = color;
        self.selected = true;

        if append {
            self.ensure_palette().add(color);
        }

        log::info!("{}", self.report());
        color
    }

    /// Adds the current color to the working palette. Nothing happens until
    /// a color has been picked.
    pub fn add_current_to_palette(&mut self) -> Option<usize> {
        if !self.selected {
            return None;
        }
        let color = self.color;
        Some(self.ensure_palette().add(color))
    }

    pub fn clean_palette(&mut self) -> Result<(), PaletteError> {
        self.palettes.clear(&self.config.palette_name)
    }

    /// Stores a kept copy of the working palette and returns its final name.
    pub fn save_palette(&mut self, name: &str) -> Result<String, PaletteError> {
        match self.palettes.copy_as(&self.config.palette_name, name) {
            Ok(saved) => {
                log::info!("saved palette as '{}'", saved);
                Ok(saved)
            }
            Err(err) => {
                log::warn!("palette not saved: {}", err);
                Err(err)
            }
        }
    }

    pub fn can_export(&self) -> bool {
        self.working_palette().is_some_and(|p| !p.is_empty())
    }

    pub fn export_palette(
        &self,
        path: impl AsRef<Path>,
        format: ExportFormat,
        source: Option<&str>,
    ) -> Result<(), PickerError> {
        let palette = self
            .working_palette()
            .filter(|p| !p.is_empty())
            .ok_or(PickerError::NothingToExport)?;

        export(path, format, palette.colors(), source)
    }

    /// Readout of the current color, once something has been picked.
    pub fn readout(&self) -> Option<ColorReadout> {
        self.selected
            .then(|| ColorReadout::new(&self.color, self.config.display_mode))
    }

    pub fn active_readout(&self) -> Option<ColorReadout> {
        self.working_palette()
            .and_then(Palette::active_color)
            .map(|c| ColorReadout::new(c, self.config.display_mode))
    }

    pub fn report(&self) -> String {
        let (r, g, b) = convert_color(&self.color, DisplayMode::EightBit);
        format!("Red: {}, Green: {}, Blue: {}", r, g, b)
    }
}
