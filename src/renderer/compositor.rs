//! Per-pixel compositing
//!
//! For each pixel of a dirty region the draw list is probed in order and the
//! first layer whose shape contains the pixel supplies the color; uncovered
//! pixels get the background. This is O(pixels x layers), which the tiny
//! panel and the five-layer scene afford.

use super::{Color, Display};
use crate::platform::{InterruptMask, without_interrupts};
use crate::sim::{MoverId, Region, Scene};

/// Paint `region` from the scene
pub fn paint_region(scene: &Scene, region: Region, bg: Color, display: &mut impl Display) {
    display.set_window(region.top_left, region.bot_right);
    for pixel in region.pixels() {
        display.write_pixel(scene.probe(pixel).unwrap_or(bg));
    }
}

/// Repaint every layer's on-screen box, back of the draw list first
pub fn draw_all(scene: &Scene, bg: Color, display: &mut impl Display) {
    for &id in scene.draw_order().iter().rev() {
        paint_region(scene, scene.bounds(id), bg, display);
    }
}

/// Promote pending positions and repaint what the movers touched
///
/// The swap runs with the periodic interrupt masked so the driver never sees
/// half of it. Each mover's old and new boxes are repainted as one region,
/// erasing the old footprint and drawing the new one.
pub fn composite_movers<M>(
    scene: &mut Scene,
    movers: &[MoverId],
    bg: Color,
    display: &mut impl Display,
    mask: &mut M,
) where
    M: InterruptMask + ?Sized,
{
    without_interrupts(mask, || scene.swap_positions(movers));

    for &mover in movers {
        let layer_id = scene.mover(mover).layer;
        let layer = scene.layer(layer_id);
        let dirty = scene
            .bounds_at(layer_id, layer.pos_last)
            .union(&scene.bounds(layer_id));
        paint_region(scene, dirty, bg, display);
    }
}
