//! Project configuration (fast.toml)

mod fast_toml;
mod validation;

pub use fast_toml::{load_settings, Settings};
