use std::{
    fmt,
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::{
    color::{Color, DisplayMode, convert_color},
    error::{ParseError, PickerError},
};

/// Written in place of the source document when there is none.
pub const BLEND_NOT_AVAILABLE: &str = "Not available";

/// File dialog filter matching every export format.
pub const EXPORT_FILTER: &str = "*.json;*.gpl;*.css";

/// Last line of a CSS export. There is no matching opening brace, so the
/// output is not valid CSS. Downstream consumers may rely on the current
/// bytes, so it stays until that is ruled out.
pub const CSS_TRAILER: &str = "}";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Gpl,
    Css,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::Gpl, ExportFormat::Css];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Gpl => "gpl",
            ExportFormat::Css => "css",
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Option<ExportFormat> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        ExportFormat::ALL.into_iter().find(|f| f.extension() == ext)
    }

    /// `path` with its extension replaced by this format's.
    pub fn with_extension(self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref().with_extension(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.extension() == lower)
            .ok_or_else(|| ParseError::ExportFormat(s.to_string()))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

fn palette_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Serialize)]
struct JsonPalette<'a> {
    name: String,
    blend: &'a str,
    number: usize,
    colors: Vec<JsonColor>,
}

#[derive(Serialize)]
struct JsonColor {
    hex: String,
    rgb: [f32; 3],
}

pub fn render_json(path: impl AsRef<Path>, colors: &[Color], source: Option<&str>) -> serde_json::Result<String> {
    let output = JsonPalette {
        name: palette_name(path.as_ref()),
        blend: source.unwrap_or(BLEND_NOT_AVAILABLE),
        number: colors.len(),
        colors: colors
            .iter()
            .map(|c| JsonColor { hex: c.to_hex(), rgb: c.channels() })
            .collect(),
    };

    serde_json::to_string(&output)
}

pub fn render_gpl(path: impl AsRef<Path>, colors: &[Color], source: Option<&str>) -> String {
    let mut output = format!(
        "GIMP Palette\nName: {}\nColumns: 5\n#\n# Blend : {}\n# Number : {}\n#\n",
        palette_name(path.as_ref()),
        source.unwrap_or(BLEND_NOT_AVAILABLE),
        colors.len()
    );

    for (i, color) in colors.iter().enumerate() {
        let (r, g, b) = convert_color(color, DisplayMode::EightBit);
        output.push_str(&format!("{} {} {} Index {}\n", r, g, b, i));
    }

    output
}

pub fn render_css(path: impl AsRef<Path>, colors: &[Color], source: Option<&str>) -> String {
    let mut output = format!(
        "/* Name : {} */\n/* Blend : {} */\n/* Number : {} */\n",
        palette_name(path.as_ref()),
        source.unwrap_or(BLEND_NOT_AVAILABLE),
        colors.len()
    );

    for color in colors {
        let (r, g, b) = convert_color(color, DisplayMode::EightBit);
        output.push_str(&format!("rgb({}, {}, {})\n", r, g, b));
    }
    output.push_str(CSS_TRAILER);

    output
}

fn write_palette(path: &Path, data: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())
}

pub fn export_colors_to_json(path: impl AsRef<Path>, colors: &[Color], source: Option<&str>) -> Result<(), PickerError> {
    let data = render_json(path.as_ref(), colors, source)?;
    write_palette(path.as_ref(), &data)?;
    Ok(())
}

pub fn export_colors_to_gpl(path: impl AsRef<Path>, colors: &[Color], source: Option<&str>) -> io::Result<()> {
    write_palette(path.as_ref(), &render_gpl(path.as_ref(), colors, source))
}

pub fn export_colors_to_css(path: impl AsRef<Path>, colors: &[Color], source: Option<&str>) -> io::Result<()> {
    write_palette(path.as_ref(), &render_css(path.as_ref(), colors, source))
}

pub fn export(
    path: impl AsRef<Path>,
    format: ExportFormat,
    colors: &[Color],
    source: Option<&str>,
) -> Result<(), PickerError> {
    let path = path.as_ref();
    match format {
        ExportFormat::Json => export_colors_to_json(path, colors, source)?,
        ExportFormat::Gpl => export_colors_to_gpl(path, colors, source)?,
        ExportFormat::Css => export_colors_to_css(path, colors, source)?,
    }

    log::info!("exported {} colors as {} to '{}'", colors.len(), format, path.display());
    Ok(())
}
