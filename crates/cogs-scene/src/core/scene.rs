use crate::api::types::{Color, GearId};
use crate::components::gear::Gear;

/// Scene graph for the backdrop: a background color and an ordered set of
/// gears. Draw order is insertion order.
pub struct Scene {
    background: Color,
    gears: Vec<Gear>,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            gears: Vec::with_capacity(4),
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Add a gear to the scene.
    pub fn spawn(&mut self, gear: Gear) {
        self.gears.push(gear);
    }

    /// Get a reference to a gear by ID.
    pub fn get(&self, id: GearId) -> Option<&Gear> {
        self.gears.iter().find(|g| g.id() == id)
    }

    /// Iterate over all gears in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Gear> {
        self.gears.iter()
    }

    /// Advance every gear by one frame tick, in order.
    pub fn advance(&mut self, elapsed_ms: f64) {
        for gear in &mut self.gears {
            gear.advance(elapsed_ms);
        }
    }

    /// Number of gears in the scene.
    pub fn len(&self) -> usize {
        self.gears.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.gears.is_empty()
    }

    /// Remove all gears.
    pub fn clear(&mut self) {
        self.gears.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}
