//! Level description
//!
//! A level is a RON or TOML file holding the collision configuration, the
//! solid geometry, pickups and named trigger zones. Solids may also come from
//! a binary blob of box records next to the level file.

use sector_collide::assets::boxes_from_bytes;
use sector_collide::config::{CollisionConfig, Config};
use sector_collide::physics::AABB;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::DemoError;

/// A named trigger volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneDesc {
    /// Name reported when the hero enters or leaves
    pub name: String,
    /// `[x0, y0, x1, y1]` in meters
    pub bounds: [f32; 4],
}

/// Everything needed to build a level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDesc {
    /// Collision system parameters
    pub collision: CollisionConfig,
    /// Display pixels per meter
    pub pixels_per_meter: f32,
    /// Hero box `[x0, y0, x1, y1]`
    pub hero: [f32; 4],
    /// Inline solid boxes
    pub solids: Vec<[f32; 4]>,
    /// Optional blob of extra solid boxes, relative to the level file
    pub solids_blob: Option<String>,
    /// Coin top-left corners; every coin is half a meter square
    pub coins: Vec<[f32; 2]>,
    /// Number of extra coins scattered above the floor
    pub random_coins: usize,
    /// Trigger zones
    pub zones: Vec<ZoneDesc>,
}

impl Default for LevelDesc {
    fn default() -> Self {
        Self {
            collision: CollisionConfig::with_capacities(256, 512, 128),
            pixels_per_meter: 16.0,
            hero: [1.0, 6.0, 1.8, 7.5],
            solids: vec![
                [-1.0, 10.0, 41.0, 11.0],
                [-1.0, 0.0, 0.0, 10.0],
                [40.0, 0.0, 41.0, 10.0],
                [10.0, 8.0, 14.0, 8.5],
                [18.0, 7.0, 19.0, 10.0],
                [26.0, 6.5, 30.0, 7.0],
            ],
            solids_blob: None,
            coins: vec![[5.0, 9.0], [12.0, 7.0], [22.0, 9.0]],
            random_coins: 4,
            zones: vec![
                ZoneDesc {
                    name: "water".to_string(),
                    bounds: [20.0, 9.0, 24.0, 10.0],
                },
                ZoneDesc {
                    name: "exit".to_string(),
                    bounds: [36.0, 7.0, 40.0, 10.0],
                },
            ],
        }
    }
}

impl Config for LevelDesc {}

impl LevelDesc {
    /// Load a level file, or the built-in level when no path is given
    pub fn load(path: Option<&str>) -> Result<Self, DemoError> {
        match path {
            Some(path) => {
                log::info!("Loading level from {}", path);
                Ok(Self::load_from_file(path)?)
            }
            None => {
                log::info!("Using built-in level");
                Ok(Self::default())
            }
        }
    }

    /// Hero box
    pub fn hero_box(&self) -> AABB {
        to_aabb(self.hero)
    }

    /// Inline solids plus any blob solids
    pub fn solid_boxes(&self, level_path: Option<&str>) -> Result<Vec<AABB>, DemoError> {
        let mut boxes: Vec<AABB> = self.solids.iter().copied().map(to_aabb).collect();

        if let Some(blob) = &self.solids_blob {
            let base = level_path
                .and_then(|p| Path::new(p).parent())
                .unwrap_or_else(|| Path::new("."));
            let bytes = std::fs::read(base.join(blob))?;
            let extra = boxes_from_bytes(&bytes)?;
            log::info!("Loaded {} solids from {}", extra.len(), blob);
            boxes.extend(extra);
        }
        Ok(boxes)
    }
}

/// Convert a `[x0, y0, x1, y1]` array into a box
pub fn to_aabb(b: [f32; 4]) -> AABB {
    AABB::from_coords(b[0], b[1], b[2], b[3])
}
