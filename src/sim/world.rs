//! The scene, its named roles and the game state, bundled

use super::layer::{Roles, Scene, stock_scene};
use super::state::GameState;

/// Everything the driver mutates and the main loop draws
#[derive(Debug, Clone)]
pub struct World {
    pub scene: Scene,
    pub roles: Roles,
    pub state: GameState,
}

impl World {
    /// Stock playfield in the intro phase; the fence comes from the field outline
    pub fn new() -> Self {
        let (scene, roles) = stock_scene();
        let fence = scene.bounds(roles.field);
        Self {
            scene,
            roles,
            state: GameState::new(fence),
        }
    }

    /// Fresh match: stock layers, zeroed scores, serve held, full repaint
    pub fn reset(&mut self) {
        let (scene, roles) = stock_scene();
        self.scene = scene;
        self.roles = roles;
        self.state.reset();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
