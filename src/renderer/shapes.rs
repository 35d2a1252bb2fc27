//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned rectangle
///
/// `pos` is the top-left corner in court coordinates (y down).
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    // Two triangles per quad
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a vertical dashed line centered on `x`
///
/// Dashes run from `y_start` down to `y_end` in a dash/gap repeat,
/// with the final dash truncated at `y_end`.
pub fn dashed_vline(
    x: f32,
    y_start: f32,
    y_end: f32,
    width: f32,
    dash_len: f32,
    gap_len: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if dash_len <= 0.0 {
        return vertices;
    }

    let half = width / 2.0;
    let mut y = y_start;
    while y < y_end {
        let dash_end = (y + dash_len).min(y_end);
        vertices.extend(rect(
            Vec2::new(x - half, y),
            Vec2::new(width, dash_end - y),
            color,
        ));
        y += dash_len + gap_len;
    }

    vertices
}
