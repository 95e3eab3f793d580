use crate::error::ConfigError;
use crate::sampling::Sampler;
use glam::Vec4;
use std::fmt::Debug;

/// Chooses a new particle's color.
pub trait ColorDistribution: Debug {
    /// Draw an RGBA color.
    fn sample(&self, rng: &mut Sampler) -> Vec4;
}

/// Same color for every particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantColor(pub Vec4);

impl ColorDistribution for ConstantColor {
    fn sample(&self, _rng: &mut Sampler) -> Vec4 {
        self.0
    }
}

/// Base color scaled by a brightness drawn around `brightness`.
///
/// All four channels are scaled, glow included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalColor {
    pub base: Vec4,
    pub brightness: f32,
    pub sigma: f32,
}

impl NormalColor {
    /// `base` scaled by a brightness around `brightness` with spread `sigma`.
    pub fn new(base: Vec4, brightness: f32, sigma: f32) -> Self {
        Self {
            base,
            brightness,
            sigma,
        }
    }
}

impl ColorDistribution for NormalColor {
    fn sample(&self, rng: &mut Sampler) -> Vec4 {
        self.base * rng.approx_normal(self.brightness, self.sigma)
    }
}

/// Uniform pick from a fixed, non-empty set of colors.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteColor {
    colors: Vec<Vec4>,
}

impl PaletteColor {
    /// Build a palette. An empty palette is rejected here so that sampling
    /// never has to handle it.
    pub fn new(colors: impl IntoIterator<Item = Vec4>) -> Result<Self, ConfigError> {
        let colors: Vec<Vec4> = colors.into_iter().collect();
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Colors the palette picks from.
    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }
}

impl ColorDistribution for PaletteColor {
    fn sample(&self, rng: &mut Sampler) -> Vec4 {
        self.colors[rng.index(self.colors.len())]
    }
}
