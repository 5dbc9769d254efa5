//! Viewer configuration: settings structs, defaults, and the
//! `~/.vectorview/config.ini` file handling.

mod defaults;
mod file;
mod settings;

pub use defaults::*;
pub use file::ConfigFileError;
pub use settings::ViewerConfig;
