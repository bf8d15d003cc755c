//! Options and settings-file loading for modalias.
//!
//! [`AliasOptions`] says where to look; [`SettingsLoader`] reads the
//! [`AliasSettings`] found there.

pub mod error;
pub mod loader;
pub mod options;
pub mod settings;

pub use error::*;
pub use loader::{SettingsFormat, SettingsLoader, load_settings};
pub use options::*;
pub use settings::*;
