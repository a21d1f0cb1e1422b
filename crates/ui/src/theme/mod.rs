use anyhow::{Context as _, Result};
use gpui::{App, Global, Hsla, Pixels, px, rgb, white};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub fn init(cx: &mut App) {
    cx.set_global(ProgressTheme::default());
}

pub trait ActiveProgressTheme {
    fn progress_theme(&self) -> &ProgressTheme;
}

impl ActiveProgressTheme for App {
    #[inline(always)]
    fn progress_theme(&self) -> &ProgressTheme {
        ProgressTheme::global(self)
    }
}

/// The spacing scale used by the progress indicators, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Spacing {
    pub xxxs: f32,
    pub xxs: f32,
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            xxxs: 2.,
            xxs: 4.,
            xs: 8.,
            sm: 12.,
            md: 16.,
        }
    }
}

impl Spacing {
    #[inline]
    pub fn xxxs(&self) -> Pixels {
        px(self.xxxs)
    }

    #[inline]
    pub fn xxs(&self) -> Pixels {
        px(self.xxs)
    }

    #[inline]
    pub fn xs(&self) -> Pixels {
        px(self.xs)
    }

    #[inline]
    pub fn sm(&self) -> Pixels {
        px(self.sm)
    }

    #[inline]
    pub fn md(&self) -> Pixels {
        px(self.md)
    }
}

/// Colors and spacing for the progress indicators.
///
/// Colors are written as hex strings in JSON, e.g. `"#1e90ff"`. Every field is
/// optional in a theme file, missing fields keep their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProgressTheme {
    /// The static background ring of the circular indicator.
    pub outer_ring: Hsla,
    /// The animated arc of the circular indicator.
    pub progress_ring: Hsla,
    /// The percentage label inside the ring.
    pub label: Hsla,
    /// Track of the linear indicator.
    pub linear_track: Hsla,
    /// Filled segment of the linear indicator.
    pub linear_fill: Hsla,
    /// Text next to the linear indicator.
    pub linear_text: Hsla,
    pub spacing: Spacing,
}

impl Default for ProgressTheme {
    fn default() -> Self {
        Self {
            outer_ring: white(),
            progress_ring: rgb(0x1e90ff).into(),
            label: white(),
            linear_track: rgb(0x0e1829).into(),
            linear_fill: rgb(0x1d3255).into(),
            linear_text: rgb(0x9ca3af).into(),
            spacing: Spacing::default(),
        }
    }
}

impl Global for ProgressTheme {}

impl ProgressTheme {
    /// Returns the global theme reference
    #[inline(always)]
    pub fn global(cx: &App) -> &ProgressTheme {
        cx.global::<ProgressTheme>()
    }

    /// Returns the global theme mutable reference
    #[inline(always)]
    pub fn global_mut(cx: &mut App) -> &mut ProgressTheme {
        cx.global_mut::<ProgressTheme>()
    }

    /// Parse a theme from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<ProgressTheme>(json)?)
    }

    /// Read a theme from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("failed to parse theme file: {}", path.display()))
    }

    /// Load a theme file and install it as the global theme.
    ///
    /// The current theme is kept if the file can't be loaded. Windows pick up
    /// the new colors on their next render.
    pub fn apply_file(path: impl AsRef<Path>, cx: &mut App) -> Result<()> {
        match Self::load(path) {
            Ok(theme) => {
                *Self::global_mut(cx) = theme;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to load progress theme: {:?}", err);
                Err(err)
            }
        }
    }

    /// Returns the JSON schema of the theme file.
    pub fn schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(ProgressTheme)).unwrap_or_default()
    }
}
