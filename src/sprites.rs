//! Sprite footprints
//!
//! Pure size lookup for obstacle kinds and skier poses. Sizes are the
//! on-screen dimensions (source images are drawn at half resolution).

use serde::{Deserialize, Serialize};

use crate::sim::{ObstacleKind, SkierState};

/// Width/height of an entity's visual and collision bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Footprint table for every sprite the simulation knows about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteCatalog {
    pub skier_crash: Footprint,
    pub skier_left: Footprint,
    pub skier_left_down: Footprint,
    pub skier_down: Footprint,
    pub skier_right_down: Footprint,
    pub skier_right: Footprint,
    pub tree: Footprint,
    pub tree_cluster: Footprint,
    pub rock1: Footprint,
    pub rock2: Footprint,
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        Self {
            skier_crash: Footprint::new(28, 31),
            skier_left: Footprint::new(17, 34),
            skier_left_down: Footprint::new(21, 35),
            skier_down: Footprint::new(17, 35),
            skier_right_down: Footprint::new(21, 35),
            skier_right: Footprint::new(17, 34),
            tree: Footprint::new(24, 41),
            tree_cluster: Footprint::new(48, 46),
            rock1: Footprint::new(23, 14),
            rock2: Footprint::new(29, 16),
        }
    }
}

impl SpriteCatalog {
    /// Every sprite the same size (handy for geometry tests)
    pub fn uniform(footprint: Footprint) -> Self {
        Self {
            skier_crash: footprint,
            skier_left: footprint,
            skier_left_down: footprint,
            skier_down: footprint,
            skier_right_down: footprint,
            skier_right: footprint,
            tree: footprint,
            tree_cluster: footprint,
            rock1: footprint,
            rock2: footprint,
        }
    }

    pub fn obstacle(&self, kind: ObstacleKind) -> Footprint {
        match kind {
            ObstacleKind::Tree => self.tree,
            ObstacleKind::TreeCluster => self.tree_cluster,
            ObstacleKind::Rock1 => self.rock1,
            ObstacleKind::Rock2 => self.rock2,
        }
    }

    pub fn skier(&self, state: SkierState) -> Footprint {
        match state {
            SkierState::Crashed => self.skier_crash,
            SkierState::FacingLeft => self.skier_left,
            SkierState::DiagonalLeftDown => self.skier_left_down,
            SkierState::StraightDown => self.skier_down,
            SkierState::DiagonalRightDown => self.skier_right_down,
            SkierState::FacingRight => self.skier_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_catalog() {
        let fp = Footprint::new(10, 20);
        let catalog = SpriteCatalog::uniform(fp);
        for kind in ObstacleKind::ALL {
            assert_eq!(catalog.obstacle(kind), fp);
        }
        assert_eq!(catalog.skier(SkierState::Crashed), fp);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let catalog: SpriteCatalog =
            serde_json::from_str(r#"{"tree": {"width": 5, "height": 6}}"#).unwrap();
        assert_eq!(catalog.tree, Footprint::new(5, 6));
        assert_eq!(catalog.rock1, SpriteCatalog::default().rock1);
    }
}
