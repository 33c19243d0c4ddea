use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use lumen_grid::LINSIZE;
use lumen_lighting::{DrainOrder, EmitterSeeding};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LumenConfig {
    #[serde(default)]
    pub chunk: Chunk,
    #[serde(default)]
    pub propagation: Propagation,
    #[serde(default)]
    pub fill: Fill,
    #[serde(default)]
    pub bench: Bench,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Chunk {
    #[serde(default = "default_side")]
    pub side: usize,
}
fn default_side() -> usize {
    LINSIZE
}
impl Default for Chunk {
    fn default() -> Self {
        Self { side: default_side() }
    }
}

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Fifo,
    Dial,
}

impl From<Order> for DrainOrder {
    fn from(o: Order) -> Self {
        match o {
            Order::Fifo => DrainOrder::Fifo,
            Order::Dial => DrainOrder::Dial,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Emitters {
    #[default]
    Prime,
    Literal,
}

impl From<Emitters> for EmitterSeeding {
    fn from(e: Emitters) -> Self {
        match e {
            Emitters::Prime => EmitterSeeding::Prime,
            Emitters::Literal => EmitterSeeding::Literal,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Propagation {
    #[serde(default)]
    pub order: Order,
    #[serde(default)]
    pub emitters: Emitters,
}

/// Random interior fill. Each cell draws `r` in `[0, range)`: below
/// `emitter_weight` it emits `[0, max_strength]` (0 reads as a free medium),
/// the next `dense_weight` draws cost `dense_cost`, the rest cost `medium_cost`.
#[derive(Clone, Debug, Deserialize)]
pub struct Fill {
    #[serde(default = "default_range")]
    pub range: u32,
    #[serde(default = "default_emitter_weight")]
    pub emitter_weight: u32,
    #[serde(default)]
    pub dense_weight: u32,
    #[serde(default = "default_max_strength")]
    pub max_strength: u16,
    #[serde(default = "default_medium_cost")]
    pub medium_cost: u16,
    #[serde(default = "default_dense_cost")]
    pub dense_cost: u16,
}
fn default_range() -> u32 {
    65521
}
fn default_emitter_weight() -> u32 {
    1000
}
fn default_max_strength() -> u16 {
    15
}
fn default_medium_cost() -> u16 {
    1
}
fn default_dense_cost() -> u16 {
    2
}
impl Default for Fill {
    fn default() -> Self {
        Self {
            range: default_range(),
            emitter_weight: default_emitter_weight(),
            dense_weight: 0,
            max_strength: default_max_strength(),
            medium_cost: default_medium_cost(),
            dense_cost: default_dense_cost(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Bench {
    #[serde(default = "default_samples")]
    pub samples: usize,
}
fn default_samples() -> usize {
    10000
}
impl Default for Bench {
    fn default() -> Self {
        Self { samples: default_samples() }
    }
}

pub fn load_config_from_str(s: &str) -> Result<LumenConfig, Box<dyn Error>> {
    let cfg: LumenConfig = toml::from_str(s)?;
    Ok(cfg)
}

pub fn load_config_from_path(path: &Path) -> Result<LumenConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    load_config_from_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = load_config_from_str("").unwrap();
        assert_eq!(cfg.chunk.side, 20);
        assert_eq!(cfg.propagation.order, Order::Fifo);
        assert_eq!(cfg.propagation.emitters, Emitters::Prime);
        assert_eq!(cfg.fill.range, 65521);
        assert_eq!(cfg.fill.emitter_weight, 1000);
        assert_eq!(cfg.fill.dense_weight, 0);
        assert_eq!(cfg.bench.samples, 10000);
    }

    #[test]
    fn sections_override_fields() {
        let cfg = load_config_from_str(
            r#"
            [chunk]
            side = 12

            [propagation]
            order = "dial"
            emitters = "literal"

            [fill]
            max_strength = 9
            dense_weight = 50
            "#,
        )
        .unwrap();
        assert_eq!(cfg.chunk.side, 12);
        assert_eq!(DrainOrder::from(cfg.propagation.order), DrainOrder::Dial);
        assert_eq!(EmitterSeeding::from(cfg.propagation.emitters), EmitterSeeding::Literal);
        assert_eq!(cfg.fill.max_strength, 9);
        assert_eq!(cfg.fill.dense_weight, 50);
        assert_eq!(cfg.fill.medium_cost, 1);
    }

    #[test]
    fn unknown_order_is_an_error() {
        assert!(load_config_from_str("[propagation]\norder = \"lifo\"").is_err());
    }
}
