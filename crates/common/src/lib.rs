//! Shared settings for the flycube demo.
//!
//! Every tunable constant (window, camera, projection, scene layout, asset
//! paths, key bindings) lives in [`Settings`], which loads from TOML.
//! All sections use `#[serde(default)]` so a partial file only overrides
//! what it names.

mod error;
mod settings;

pub use error::SettingsError;
pub use settings::{
    AssetSettings, CameraSettings, KeyBindingSettings, ProjectionSettings, SceneSettings,
    Settings, WindowSettings,
};

pub fn crate_info() -> &'static str {
    "flycube-common v0.1.0"
}
