use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use eframe::egui::Color32;
use palette::Srgb;

use crate::error::{PipelineError, PipelineResult};

// ---------------------------------------------------------------------------
// Built-in palette assets (hex, light → dark for the sequential ones)
// ---------------------------------------------------------------------------

pub const BLUES: &[&str] = &[
    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
    "#08306b",
];

pub const GREENS: &[&str] = &[
    "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c",
    "#00441b",
];

/// Qualitative palette for categories (cities).
pub const BOLD: &[&str] = &[
    "#7f3c8d", "#11a579", "#3969ac", "#f2b701", "#e73f74", "#80ba5a", "#e68310", "#008695",
    "#cf1c90", "#f97b72", "#4b4b8f", "#a5aa99",
];

// ---------------------------------------------------------------------------
// Palette: an ordered colour sequence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub colors: Vec<Color32>,
}

impl Palette {
    /// Parse a palette from `#rrggbb` / `#rgb` strings.
    pub fn from_hex<S: AsRef<str>>(name: &str, hex: &[S]) -> Result<Self> {
        if hex.is_empty() {
            bail!("Palette '{name}' has no colours");
        }
        let colors = hex
            .iter()
            .map(|h| {
                let h = h.as_ref();
                let rgb = Srgb::<u8>::from_str(h)
                    .with_context(|| format!("Palette '{name}': '{h}' is not a hex colour"))?;
                Ok(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Palette { colors })
    }

    /// `n` colours spread over this palette, see [`gradient`].
    pub fn gradient(&self, n: usize, reversed: bool) -> PipelineResult<Vec<Color32>> {
        gradient(&self.colors, n, reversed)
    }
}

// ---------------------------------------------------------------------------
// Colour scale mapping
// ---------------------------------------------------------------------------

/// Spread `n` positions over `palette` by nearest index.
///
/// Position `i` takes `palette[round(i * (len - 1) / (n - 1))]`; a single
/// position takes the first colour. `reversed` flips the resulting sequence.
pub fn gradient<T: Clone>(palette: &[T], n: usize, reversed: bool) -> PipelineResult<Vec<T>> {
    if n == 0 {
        return Err(PipelineError::InvalidArgument(
            "gradient needs at least one position".to_string(),
        ));
    }
    if palette.is_empty() {
        return Err(PipelineError::InvalidArgument(
            "gradient palette is empty".to_string(),
        ));
    }

    let last = palette.len() - 1;
    let mut colors: Vec<T> = if n == 1 {
        vec![palette[0].clone()]
    } else {
        (0..n)
            .map(|i| {
                let idx = (i as f64 * last as f64 / (n - 1) as f64).round() as usize;
                palette[idx.min(last)].clone()
            })
            .collect()
    };
    if reversed {
        colors.reverse();
    }
    Ok(colors)
}

// ---------------------------------------------------------------------------
// Category colours: city → Color32
// ---------------------------------------------------------------------------

/// Assigns each category a colour from a qualitative palette, cycling when
/// there are more categories than colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Colours are assigned in the order of `categories`.
    pub fn new<S: AsRef<str>>(categories: &[S], palette: &Palette) -> Self {
        let mapping = categories
            .iter()
            .zip(palette.colors.iter().cycle())
            .map(|(c, color)| (c.as_ref().to_string(), *color))
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}
