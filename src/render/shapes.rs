//! Procedural icon drawer
//!
//! Draws the fallback icons (triangle, heart, explosion) and the two hotteok
//! token icons straight from geometry, with no font involved. All
//! coordinates are fractions of the canvas size.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_polygon_mut};
use imageproc::point::Point;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::constants::*;
use crate::error::RenderError;

/// Shapes the drawer knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Triangle,
    Heart,
    Explosion,
    SugarToken,
    SeedToken,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Triangle,
        ShapeKind::Heart,
        ShapeKind::Explosion,
        ShapeKind::SugarToken,
        ShapeKind::SeedToken,
    ];

    /// Tokens carry their own palette and ignore the fill color
    pub fn has_fixed_palette(self) -> bool {
        matches!(self, ShapeKind::SugarToken | ShapeKind::SeedToken)
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShapeKind::Triangle => "triangle",
            ShapeKind::Heart => "heart",
            ShapeKind::Explosion => "explosion",
            ShapeKind::SugarToken => "sugar_token",
            ShapeKind::SeedToken => "seed_token",
        };
        write!(f, "{}", name)
    }
}

/// Seed positions on the 64px design grid
const SEED_POSITIONS: [(f32, f32); 5] = [
    (20.0, 25.0),
    (35.0, 20.0),
    (25.0, 35.0),
    (40.0, 40.0),
    (30.0, 45.0),
];
const SEED_RADIUS: f32 = 2.0;
const DESIGN_GRID: f32 = 64.0;

/// Render a shape onto a transparent canvas
pub fn render_shape(
    kind: ShapeKind,
    canvas_size: u32,
    fill: Rgba<u8>,
) -> Result<RgbaImage, RenderError> {
    render_shape_on(kind, canvas_size, fill, TRANSPARENT)
}

/// Render a shape onto a canvas pre-filled with `background`
pub fn render_shape_on(
    kind: ShapeKind,
    canvas_size: u32,
    fill: Rgba<u8>,
    background: Rgba<u8>,
) -> Result<RgbaImage, RenderError> {
    if canvas_size == 0 {
        return Err(RenderError::InvalidCanvas(canvas_size));
    }

    let mut img = RgbaImage::from_pixel(canvas_size, canvas_size, background);
    let s = canvas_size as f32;
    let c = (canvas_size / 2) as f32;

    match kind {
        ShapeKind::Triangle => {
            fill_polygon(
                &mut img,
                &[(c, s * 0.2), (s * 0.2, s * 0.8), (s * 0.8, s * 0.8)],
                fill,
            );
        }
        ShapeKind::Heart => {
            // Two lobes plus a downward triangle
            fill_ellipse_in(&mut img, (s * 0.2, s * 0.25), (s * 0.5, s * 0.55), fill);
            fill_ellipse_in(&mut img, (s * 0.5, s * 0.25), (s * 0.8, s * 0.55), fill);
            fill_polygon(
                &mut img,
                &[(c, s * 0.8), (s * 0.25, s * 0.5), (s * 0.75, s * 0.5)],
                fill,
            );
        }
        ShapeKind::Explosion => {
            fill_polygon(&mut img, &explosion_vertices(canvas_size), fill);
        }
        ShapeKind::SugarToken => {
            draw_token_base(&mut img, SUGAR_CRUST, SUGAR_FILLING);
            fill_ellipse_in(&mut img, (s * 0.3125, s * 0.3125), (s * 0.4375, s * 0.4375), SUGAR_SHINE);
        }
        ShapeKind::SeedToken => {
            draw_token_base(&mut img, SEED_CRUST, SEED_FILLING);
            let scale = s / DESIGN_GRID;
            let r = SEED_RADIUS * scale;
            for (x, y) in SEED_POSITIONS {
                let (x, y) = (x * scale, y * scale);
                fill_ellipse_in(&mut img, (x - r, y - r), (x + r, y + r), SEED_DOT);
            }
        }
    }

    Ok(img)
}

/// Vertices of the 8-point explosion star.
///
/// Vertex `i` sits at angle `i·π/4`; even vertices reach 0.4 of the canvas,
/// odd vertices 0.2.
pub fn explosion_vertices(canvas_size: u32) -> Vec<(f32, f32)> {
    let s = canvas_size as f32;
    let c = (canvas_size / 2) as f32;

    (0..8)
        .map(|i| {
            let angle = i as f32 * PI / 4.0;
            let r = if i % 2 == 0 { s * 0.4 } else { s * 0.2 };
            (c + r * angle.cos(), c + r * angle.sin())
        })
        .collect()
}

/// Crust and filling discs shared by both tokens
fn draw_token_base(img: &mut RgbaImage, crust: Rgba<u8>, filling: Rgba<u8>) {
    let s = img.width() as f32;
    fill_ellipse_in(img, (s * 0.125, s * 0.125), (s * 0.875, s * 0.875), crust);
    fill_ellipse_in(img, (s * 0.1875, s * 0.1875), (s * 0.8125, s * 0.8125), filling);
}

/// Fill the ellipse inscribed in the box `top_left`..`bottom_right`
fn fill_ellipse_in(
    img: &mut RgbaImage,
    top_left: (f32, f32),
    bottom_right: (f32, f32),
    color: Rgba<u8>,
) {
    let (x0, y0) = top_left;
    let (x1, y1) = bottom_right;
    let center = (((x0 + x1) / 2.0).round() as i32, ((y0 + y1) / 2.0).round() as i32);
    let rx = ((x1 - x0) / 2.0).round() as i32;
    let ry = ((y1 - y0) / 2.0).round() as i32;
    draw_filled_ellipse_mut(img, center, rx, ry, color);
}

/// Fill a polygon given in canvas coordinates.
///
/// Vertices are snapped to the pixel grid. On tiny canvases several vertices
/// can land on the same pixel, so duplicates are collapsed first (the
/// polygon filler rejects an explicitly closed outline).
fn fill_polygon(img: &mut RgbaImage, vertices: &[(f32, f32)], color: Rgba<u8>) {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(vertices.len());
    for &(x, y) in vertices {
        let p = Point::new(x.round() as i32, y.round() as i32);
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    match points.as_slice() {
        [] => {}
        [p] => {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < img.width() && (p.y as u32) < img.height() {
                img.put_pixel(p.x as u32, p.y as u32, color);
            }
        }
        _ => draw_polygon_mut(img, &points, color),
    }
}
