use clap::{Parser, Subcommand};
use clap_num::number_range;
use env_logger::Env;
use nalgebra::Point2;
use std::path::PathBuf;

use nxpicker::*;

mod error;
use error::CliError;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Picker configuration (.json, .ron or .yaml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sample one averaged color from an image.
    Sample {
        /// Image to sample from.
        image: PathBuf,
        /// Column of the top-left pixel of the sample block.
        x: usize,
        /// Row of the top-left pixel of the sample block.
        y: usize,
        /// Side length of the averaged block (1 to 25).
        #[arg(short, long, value_parser = sample_size)]
        size: Option<usize>,
        /// Channel display: R (raw), H (HSV) or 8 (8-bit).
        #[arg(short, long)]
        mode: Option<DisplayMode>,
    },
    /// Sample several points into a palette and export it.
    Palette {
        /// Image to sample from.
        image: PathBuf,
        /// Point to sample, as X,Y. Repeat for each color.
        #[arg(short, long = "point", required = true, value_parser = parse_point)]
        points: Vec<Point2<usize>>,
        /// Output file. The format's extension is added when it has none.
        #[arg(short, long)]
        output: PathBuf,
        /// Side length of the averaged block (1 to 25).
        #[arg(short, long, value_parser = sample_size)]
        size: Option<usize>,
        /// Export format: json, gpl or css. Defaults to the output extension.
        #[arg(short, long)]
        format: Option<ExportFormat>,
        /// Source document recorded in the export.
        #[arg(short, long)]
        blend: Option<String>,
    },
}

fn sample_size(s: &str) -> Result<usize, String> {
    number_range(s, SampleSize::MIN, SampleSize::MAX)
}

fn parse_point(s: &str) -> Result<Point2<usize>, CliError> {
    let (x, y) = s.split_once(',').ok_or_else(|| CliError::Point(s.to_string()))?;
    let coord = |v: &str| v.trim().parse::<usize>().map_err(|_| CliError::Point(s.to_string()));
    Ok(Point2::new(coord(x)?, coord(y)?))
}

fn block_origin(buffer: &Buffer<f32>, point: Point2<usize>, size: usize) -> Result<Point2<usize>, CliError> {
    if !buffer.fits_block(size) {
        return Err(CliError::BlockTooLarge {
            size,
            width: buffer.width(),
            height: buffer.height(),
        });
    }
    Ok(buffer.clamp_origin(point, size))
}

fn load_picker(config: Option<&PathBuf>, size: Option<usize>) -> Result<Picker, PickerError> {
    let config = match config {
        Some(path) => PickerConfig::from_file(path)?,
        None => PickerConfig::default(),
    };

    let mut picker = Picker::new(config);
    if let Some(size) = size {
        picker.set_sample_size(SampleSize::new(size)?);
    }
    Ok(picker)
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Sample { image, x, y, size, mode } => {
            let mut picker = load_picker(cli.config.as_ref(), size)?;
            if let Some(mode) = mode {
                picker.set_display_mode(mode);
            }

            let buffer = Buffer::open(&image)?;
            let origin = block_origin(&buffer, Point2::new(x, y), picker.sample_size().get())?;
            picker.pick(&buffer, origin, false);

            if let Some(readout) = picker.readout() {
                let (r, g, b) = readout.channels;
                println!("{}  R: {}  G: {}  B: {}", readout.hex, r, g, b);
            }
        }
        Command::Palette { image, points, output, size, format, blend } => {
            let requested = format.or_else(|| ExportFormat::from_path(&output));
            let mut picker = load_picker(cli.config.as_ref(), size)?;
            let format = requested.unwrap_or(picker.config().format);
            let output = if output.extension().is_none() {
                format.with_extension(&output)
            } else {
                output
            };

            let buffer = Buffer::open(&image)?;
            for point in points {
                let origin = block_origin(&buffer, point, picker.sample_size().get())?;
                picker.pick(&buffer, origin, true);
            }

            let source = blend.as_deref().or_else(|| image.to_str());
            picker.export_palette(&output, format, source)?;

            println!("Palette written to '{}'", output.display());
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3,4").unwrap(), Point2::new(3, 4));
        assert_eq!(parse_point(" 10 , 0").unwrap(), Point2::new(10, 0));
        assert!(matches!(parse_point("3"), Err(CliError::Point(_))));
        assert!(matches!(parse_point("-1,2"), Err(CliError::Point(_))));
    }

    #[test]
    fn test_sample_size_range() {
        assert_eq!(sample_size("25"), Ok(25));
        assert!(sample_size("0").is_err());
        assert!(sample_size("26").is_err());
    }

    #[test]
    fn test_block_origin() {
        let buffer = Buffer::from_func(10, 10, |_, _| Pixel::rgb(0.5f32, 0.5, 0.5));
        assert_eq!(block_origin(&buffer, Point2::new(8, 3), 5).unwrap(), Point2::new(5, 3));
        assert_eq!(block_origin(&buffer, Point2::new(3, 3), 10).unwrap(), Point2::new(0, 0));
        assert!(matches!(
            block_origin(&buffer, Point2::new(3, 3), 25),
            Err(CliError::BlockTooLarge { size: 25, width: 10, height: 10 })
        ));

        let empty: Buffer<f32> = Buffer::from_func(0, 0, |_, _| Pixel::rgb(0.0, 0.0, 0.0));
        assert!(matches!(block_origin(&empty, Point2::new(0, 0), 1), Err(CliError::BlockTooLarge { .. })));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "nxpicker", "palette", "shot.png", "-p", "1,2", "-p", "3,4", "-o", "out", "-f", "gpl",
        ])
        .unwrap();
        match cli.command {
            Command::Palette { points, format, .. } => {
                assert_eq!(points.len(), 2);
                assert_eq!(format, Some(ExportFormat::Gpl));
            }
            _ => panic!("expected palette command"),
        }
    }
}
