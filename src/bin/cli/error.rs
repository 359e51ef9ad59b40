use thiserror::Error;

use nxpicker::PickerError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Picker(#[from] PickerError),
    #[error("invalid point '{0}', expected X,Y")]
    Point(String),
    #[error("a {size}x{size} sample does not fit in a {width}x{height} image")]
    BlockTooLarge { size: usize, width: usize, height: usize },
}
