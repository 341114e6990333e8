use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::color::{BLUES, BOLD, GREENS, Palette};

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "RENT_EXPLORER_CONFIG";

/// Settings file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "rent-explorer.json";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// User configuration. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of bins in the rent distribution chart.
    pub histogram_bins: usize,
    /// Dataset loaded at startup.
    pub dataset: Option<PathBuf>,
    pub rent_palette: Vec<String>,
    pub rooms_palette: Vec<String>,
    pub city_palette: Vec<String>,
    pub window_size: [f32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        let owned = |p: &[&str]| -> Vec<String> { p.iter().map(|s| s.to_string()).collect() };
        Self {
            histogram_bins: 30,
            dataset: None,
            rent_palette: owned(BLUES),
            rooms_palette: owned(GREENS),
            city_palette: owned(BOLD),
            window_size: [1200.0, 800.0],
        }
    }
}

/// Palettes parsed once from [`Settings`].
#[derive(Debug, Clone)]
pub struct Palettes {
    pub rent: Palette,
    pub rooms: Palette,
    pub city: Palette,
}

impl Settings {
    /// Load from `$RENT_EXPLORER_CONFIG`, else `./rent-explorer.json`, else defaults.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            bail!("histogram_bins must be at least 1");
        }
        self.palettes()?;
        Ok(())
    }

    pub fn palettes(&self) -> Result<Palettes> {
        Ok(Palettes {
            rent: Palette::from_hex("rent", self.rent_palette.as_slice())?,
            rooms: Palette::from_hex("rooms", self.rooms_palette.as_slice())?,
            city: Palette::from_hex("city", self.city_palette.as_slice())?,
        })
    }
}
