//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use crate::sim::Rect;

/// Outline of a star with `spikes` points, alternating outer and inner
/// radius. The first point is straight up before rotation.
pub fn star_points(
    center: Vec2,
    spikes: u32,
    outer_radius: f32,
    inner_radius: f32,
    rotation: f32,
) -> Vec<Vec2> {
    let spikes = spikes.max(2);
    let step = PI / spikes as f32;
    let mut points = Vec::with_capacity((spikes * 2) as usize);

    // -90 degrees puts the first spike on top (y grows downward)
    let mut theta = -PI / 2.0 + rotation;
    for _ in 0..spikes {
        points.push(center + Vec2::new(theta.cos(), theta.sin()) * outer_radius);
        theta += step;
        points.push(center + Vec2::new(theta.cos(), theta.sin()) * inner_radius);
        theta += step;
    }

    points
}

/// Left-aligned fill of a bar for a fraction in [0, 1]
pub fn progress_fill(bar: &Rect, fraction: f32) -> Rect {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    Rect::from_pos_size(bar.pos, Vec2::new(bar.size.x * fraction, bar.size.y))
}
