//! Display parameters and their configuration file
//!
//! A window keeps the last [`DisplayParams`] the application requested and
//! re-applies them whenever a new backend context is attached. Parameters can
//! be read from the `[display]` table of a TOML file:
//!
//! ```toml
//! [display]
//! width = 1280
//! height = 720
//! msaa_sample_count = 4
//! color_space = "display_p3"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Color space of the backbuffer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Standard sRGB
    #[default]
    Srgb,
    /// sRGB primaries with a linear transfer function
    LinearSrgb,
    /// Wide-gamut Display P3
    DisplayP3,
}

impl ColorSpace {
    pub fn is_srgb(&self) -> bool {
        matches!(self, ColorSpace::Srgb)
    }
}

/// Pixel storage format of a surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorType {
    /// 8 bits per channel
    Rgba8888,
    /// 16-bit float per channel
    RgbaF16,
}

impl ColorType {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            ColorType::Rgba8888 => 4,
            ColorType::RgbaF16 => 8,
        }
    }
}

/// Surface format chosen for a color space
///
/// sRGB fits in 8 bits per channel; every other space needs half floats to
/// avoid banding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSettings {
    pub color_space: ColorSpace,
    pub color_type: ColorType,
}

impl ColorSettings {
    pub fn for_color_space(color_space: ColorSpace) -> Self {
        let color_type = if color_space.is_srgb() {
            ColorType::Rgba8888
        } else {
            ColorType::RgbaF16
        };
        Self {
            color_space,
            color_type,
        }
    }
}

/// Display configuration requested by the application
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayParams {
    /// Backbuffer width in physical pixels
    pub width: u32,
    /// Backbuffer height in physical pixels
    pub height: u32,
    /// MSAA sample count (1 = no multisampling)
    pub msaa_sample_count: u32,
    /// Stencil buffer depth in bits
    pub stencil_bits: u32,
    /// Backbuffer color space
    pub color_space: ColorSpace,
    /// Present without waiting for vertical sync
    pub disable_vsync: bool,
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            msaa_sample_count: 1,
            stencil_bits: 8,
            color_space: ColorSpace::Srgb,
            disable_vsync: false,
        }
    }
}

#[derive(Deserialize)]
struct DisplayConfigFile {
    #[serde(default)]
    display: DisplayParams,
}

impl DisplayParams {
    /// Set the backbuffer size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the MSAA sample count
    pub fn msaa(mut self, samples: u32) -> Self {
        self.msaa_sample_count = samples;
        self
    }

    /// Set the stencil depth
    pub fn stencil_bits(mut self, bits: u32) -> Self {
        self.stencil_bits = bits;
        self
    }

    /// Set the color space
    pub fn color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    /// Set whether vsync is disabled
    pub fn disable_vsync(mut self, disable: bool) -> Self {
        self.disable_vsync = disable;
        self
    }

    /// Surface format implied by the color space
    pub fn color_settings(&self) -> ColorSettings {
        ColorSettings::for_color_space(self.color_space)
    }

    /// Parse the `[display]` table of a TOML document
    ///
    /// A missing table or missing keys fall back to [`DisplayParams::default`].
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: DisplayConfigFile = toml::from_str(source)?;
        Ok(file.display)
    }

    /// Read display parameters from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let params = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), ?params, "loaded display params");
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatformError;
    use std::io::Write;

    #[test]
    fn test_color_settings_follow_color_space() {
        assert_eq!(
            ColorSettings::for_color_space(ColorSpace::Srgb).color_type,
            ColorType::Rgba8888
        );
        assert_eq!(
            ColorSettings::for_color_space(ColorSpace::DisplayP3).color_type,
            ColorType::RgbaF16
        );
        assert_eq!(
            ColorSettings::for_color_space(ColorSpace::LinearSrgb).color_type,
            ColorType::RgbaF16
        );
    }

    #[test]
    fn test_from_toml_fills_defaults() {
        let params = DisplayParams::from_toml_str(
            r#"
            [display]
            width = 1280
            color_space = "display_p3"
            "#,
        )
        .unwrap();

        assert_eq!(params.width, 1280);
        assert_eq!(params.height, 600);
        assert_eq!(params.msaa_sample_count, 1);
        assert_eq!(params.color_space, ColorSpace::DisplayP3);
    }

    #[test]
    fn test_from_toml_without_table() {
        let params = DisplayParams::from_toml_str("").unwrap();
        assert_eq!(params, DisplayParams::default());
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        let err = DisplayParams::from_toml_str("[display]\nwidth = \"wide\"\n").unwrap_err();
        assert!(matches!(err, PlatformError::Config(_)));

        let err = DisplayParams::from_toml_str("[display]\ncolor_space = \"cmyk\"\n").unwrap_err();
        assert!(matches!(err, PlatformError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nmsaa_sample_count = 4\nstencil_bits = 0").unwrap();

        let params = DisplayParams::load(file.path()).unwrap();
        assert_eq!(params.msaa_sample_count, 4);
        assert_eq!(params.stencil_bits, 0);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DisplayParams::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, PlatformError::Io(_)));
    }
}
