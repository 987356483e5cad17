//! Layers, moving layers and the scene that orders them
//!
//! Layers live in an arena and are addressed by [`LayerId`]. The draw list is
//! an ordered sequence of ids: when shapes overlap, the layer that appears
//! first in the list owns the pixel. Moving layers pair a layer with a
//! velocity and are addressed by [`MoverId`].

use glam::IVec2;

use super::shape::{Region, Shape};
use crate::consts::*;
use crate::renderer::Color;

/// Index of a shape in the scene's shape table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(usize);

/// Index of a layer in the scene arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

/// Index of a moving layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoverId(usize);

/// A positioned, colored shape with double-buffered position
#[derive(Debug, Clone)]
pub struct Layer {
    pub shape: ShapeId,
    /// What is on screen
    pub pos: IVec2,
    /// What was on screen before the last swap
    pub pos_last: IVec2,
    /// Where the layer goes at the next swap
    pub pos_next: IVec2,
    pub color: Color,
}

impl Layer {
    pub fn new(shape: ShapeId, pos: IVec2, color: Color) -> Self {
        Self {
            shape,
            pos,
            pos_last: pos,
            pos_next: pos,
            color,
        }
    }

    /// Promote the pending position to the on-screen one
    pub fn swap(&mut self) {
        self.pos_last = self.pos;
        self.pos = self.pos_next;
    }
}

/// A layer paired with a velocity
#[derive(Debug, Clone)]
pub struct MovingLayer {
    pub layer: LayerId,
    pub velocity: IVec2,
}

/// Arena of layers plus the draw list and the moving-layer list
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    layers: Vec<Layer>,
    draw_order: Vec<LayerId>,
    movers: Vec<MovingLayer>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.shapes.push(shape);
        ShapeId(self.shapes.len() - 1)
    }

    /// Add a layer at the back of the draw list
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        debug_assert!(layer.shape.0 < self.shapes.len(), "layer uses an unknown shape");
        self.layers.push(layer);
        let id = LayerId(self.layers.len() - 1);
        self.draw_order.push(id);
        id
    }

    /// Bind a layer to a velocity. A layer may back at most one mover.
    pub fn add_mover(&mut self, layer: LayerId, velocity: IVec2) -> MoverId {
        debug_assert!(
            self.movers.iter().all(|m| m.layer != layer),
            "layer {layer:?} already moves"
        );
        self.movers.push(MovingLayer { layer, velocity });
        MoverId(self.movers.len() - 1)
    }

    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.0]
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id.0]
    }

    pub fn mover(&self, id: MoverId) -> &MovingLayer {
        &self.movers[id.0]
    }

    pub fn mover_mut(&mut self, id: MoverId) -> &mut MovingLayer {
        &mut self.movers[id.0]
    }

    /// Layer backing a mover
    pub fn mover_layer(&self, id: MoverId) -> &Layer {
        self.layer(self.mover(id).layer)
    }

    pub fn mover_layer_mut(&mut self, id: MoverId) -> &mut Layer {
        let layer = self.mover(id).layer;
        self.layer_mut(layer)
    }

    /// Every mover, in simulation order
    pub fn mover_ids(&self) -> impl Iterator<Item = MoverId> + use<> {
        (0..self.movers.len()).map(MoverId)
    }

    /// Layers in draw order
    pub fn draw_order(&self) -> &[LayerId] {
        &self.draw_order
    }

    /// Shape of a layer, anchored at an arbitrary point
    pub fn bounds_at(&self, id: LayerId, center: IVec2) -> Region {
        self.shape(self.layer(id).shape).bounds(center)
    }

    /// On-screen bounding box of a layer
    pub fn bounds(&self, id: LayerId) -> Region {
        self.bounds_at(id, self.layer(id).pos)
    }

    /// Color of the first layer in draw order painting `point`
    pub fn probe(&self, point: IVec2) -> Option<Color> {
        self.draw_order
            .iter()
            .map(|&id| self.layer(id))
            .find(|l| self.shape(l.shape).contains(l.pos, point))
            .map(|l| l.color)
    }

    /// Swap next into current for every given mover
    pub fn swap_positions(&mut self, movers: &[MoverId]) {
        for &m in movers {
            self.mover_layer_mut(m).swap();
        }
    }

    /// Reset every layer's last and next position to its current one
    pub fn settle(&mut self) {
        for layer in &mut self.layers {
            layer.pos_last = layer.pos;
            layer.pos_next = layer.pos;
        }
    }
}

/// Named handles into the stock scene
#[derive(Debug, Clone)]
pub struct Roles {
    pub ball: MoverId,
    pub paddle_one: MoverId,
    pub paddle_two: MoverId,
    pub field: LayerId,
    /// Movers advanced by the resolver
    pub simulated: Vec<MoverId>,
    /// Movers repainted each frame
    pub animated: Vec<MoverId>,
}

impl Roles {
    pub fn paddle(&self, player: super::state::Player) -> MoverId {
        match player {
            super::state::Player::One => self.paddle_one,
            super::state::Player::Two => self.paddle_two,
        }
    }
}

/// Build the playfield: paddle one, ball, paddle two, divider, outline
pub fn stock_scene() -> (Scene, Roles) {
    let mut scene = Scene::new();

    let paddle = scene.add_shape(Shape::Rect { half: PADDLE_HALF });
    let ball = scene.add_shape(Shape::Circle {
        radius: BALL_RADIUS,
    });
    let divider = scene.add_shape(Shape::Rect {
        half: CENTER_LINE_HALF,
    });
    let outline = scene.add_shape(Shape::RectOutline {
        half: FIELD_OUTLINE_HALF,
    });

    let paddle_one = scene.add_layer(Layer::new(paddle, PADDLE_ONE_START, Color::WHITE));
    let ball_layer = scene.add_layer(Layer::new(ball, FIELD_CENTER, Color::WHITE));
    let paddle_two = scene.add_layer(Layer::new(paddle, PADDLE_TWO_START, Color::WHITE));
    scene.add_layer(Layer::new(divider, FIELD_OUTLINE_CENTER, Color::WHITE));
    let field = scene.add_layer(Layer::new(outline, FIELD_OUTLINE_CENTER, Color::WHITE));

    let ball = scene.add_mover(ball_layer, BALL_START_VELOCITY);
    let paddle_one = scene.add_mover(paddle_one, BALL_START_VELOCITY);
    let paddle_two = scene.add_mover(paddle_two, BALL_START_VELOCITY);

    let roles = Roles {
        ball,
        paddle_one,
        paddle_two,
        field,
        simulated: vec![ball],
        animated: vec![ball, paddle_one, paddle_two],
    };
    (scene, roles)
}
