//! Frame producers
//!
//! The engine treats a frame as an opaque byte buffer. Two producers are
//! provided: a raw RGBA raster (what a browser canvas consumes directly) and a
//! plain-text map for terminals and logs.

use std::fmt::Write as _;
use std::sync::Arc;

use super::animation::AnimationController;
use super::grid::GridModel;
use super::types::{AnimationState, Coord};

/// Raster width in pixels
pub const FRAME_WIDTH: usize = 800;
/// Raster height in pixels
pub const FRAME_HEIGHT: usize = 600;
/// Edge length of one grid cell in pixels, for grids that fit the frame
pub const CELL_SIZE: usize = 40;

const BYTES_PER_PIXEL: usize = 4;
const FAILURE_BORDER: usize = 8;

type Rgba = [u8; 4];

const WHITE: Rgba = [255, 255, 255, 255];
const BLACK: Rgba = [0, 0, 0, 255];
const OBSTACLE: Rgba = [90, 90, 90, 255];
const EXIT: Rgba = [0, 200, 0, 255];
const PLAYER: Rgba = [0, 0, 255, 255];
const TRAIL: Rgba = [170, 200, 255, 255];
const RED: Rgba = [255, 0, 0, 255];

/// An immutable rendered snapshot
///
/// Cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Arc<[u8]>,
    tick: u64,
    content_type: &'static str,
}

impl Frame {
    pub fn new(bytes: Vec<u8>, tick: u64, content_type: &'static str) -> Self {
        Self {
            bytes: bytes.into(),
            tick,
            content_type,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Tick on which this frame was rendered
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }
}

/// Everything a renderer may look at
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub grid: &'a GridModel,
    pub controller: &'a AnimationController,
    pub tick: u64,
}

impl Scene<'_> {
    /// Where the player is drawn: the cursor cell, or the start when idle
    pub fn player(&self) -> Coord {
        self.controller
            .position()
            .unwrap_or_else(|| self.grid.start())
    }
}

/// Turns grid + animation state into a frame
pub trait FrameRenderer: Send + Sync {
    fn render(&self, scene: &Scene<'_>) -> Frame;
}

/// Which frame producer to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RendererKind {
    /// Raw 800x600 RGBA bytes
    #[default]
    Rgba,
    /// UTF-8 text map
    Ascii,
}

impl RendererKind {
    pub fn build(self) -> Arc<dyn FrameRenderer> {
        match self {
            RendererKind::Rgba => Arc::new(RgbaRenderer),
            RendererKind::Ascii => Arc::new(AsciiRenderer),
        }
    }
}

/// Raw RGBA raster renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbaRenderer;

impl RgbaRenderer {
    pub const CONTENT_TYPE: &'static str = "application/octet-stream";
}

impl FrameRenderer for RgbaRenderer {
    fn render(&self, scene: &Scene<'_>) -> Frame {
        let grid = scene.grid;
        let cell = cell_size_for(grid.rows(), grid.cols());
        let mut canvas = Canvas::new(FRAME_WIDTH, FRAME_HEIGHT, cell, WHITE);

        for coord in grid.obstacles() {
            canvas.fill_cell(coord, 0, OBSTACLE);
        }
        for coord in scene.controller.trail() {
            canvas.fill_cell(*coord, cell / 4, TRAIL);
        }
        canvas.fill_cell(grid.exit(), 0, EXIT);
        canvas.fill_cell(scene.player(), cell * 3 / 20, PLAYER);

        // Cell outlines on top so every cell stays visible
        if cell >= 4 {
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    canvas.outline(col * cell, row * cell, cell, cell, BLACK);
                }
            }
        }

        if scene.controller.state() == AnimationState::Failed {
            canvas.border(FAILURE_BORDER, RED);
        }

        Frame::new(canvas.into_bytes(), scene.tick, Self::CONTENT_TYPE)
    }
}

/// Plain-text renderer
///
/// Legend: `P` player, `E` exit, `#` obstacle, `*` walked, `.` free.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    pub const CONTENT_TYPE: &'static str = "text/plain; charset=utf-8";
}

impl FrameRenderer for AsciiRenderer {
    fn render(&self, scene: &Scene<'_>) -> Frame {
        let grid = scene.grid;
        let controller = scene.controller;
        let player = scene.player();
        let trail = controller.trail();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "tick {} | {} | step {}/{}",
            scene.tick,
            controller.state(),
            controller.cursor(),
            controller.path().moves()
        );

        for row in 0..grid.rows() {
            let line: String = (0..grid.cols())
                .map(|col| {
                    let coord = Coord::new(row, col);
                    if coord == player {
                        'P'
                    } else if coord == grid.exit() {
                        'E'
                    } else if grid.is_obstacle(coord) {
                        '#'
                    } else if trail.contains(&coord) {
                        '*'
                    } else {
                        '.'
                    }
                })
                .collect();
            out.push_str(&line);
            out.push('\n');
        }

        if let Some(failure) = controller.last_failure() {
            let _ = writeln!(out, "GAME OVER: {}", failure);
        }

        Frame::new(out.into_bytes(), scene.tick, Self::CONTENT_TYPE)
    }
}

/// Minimal RGBA pixel buffer with clipped drawing
struct Canvas {
    width: usize,
    height: usize,
    cell: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize, cell: usize, background: Rgba) -> Self {
        let pixels = background
            .iter()
            .copied()
            .cycle()
            .take(width * height * BYTES_PER_PIXEL)
            .collect();
        Self {
            width,
            height,
            cell,
            pixels,
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgba) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                let offset = (py * self.width + px) * BYTES_PER_PIXEL;
                self.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color);
            }
        }
    }

    fn outline(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgba) {
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h.saturating_sub(1), w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w.saturating_sub(1), y, 1, h, color);
    }

    /// Fill a grid cell, shrunk by `inset` pixels on every side
    fn fill_cell(&mut self, coord: Coord, inset: usize, color: Rgba) {
        let size = self.cell.saturating_sub(inset * 2).max(1);
        self.fill_rect(
            coord.col * self.cell + inset,
            coord.row * self.cell + inset,
            size,
            size,
            color,
        );
    }

    fn border(&mut self, thickness: usize, color: Rgba) {
        let (w, h) = (self.width, self.height);
        self.fill_rect(0, 0, w, thickness, color);
        self.fill_rect(0, h.saturating_sub(thickness), w, thickness, color);
        self.fill_rect(0, 0, thickness, h, color);
        self.fill_rect(w.saturating_sub(thickness), 0, thickness, h, color);
    }

    fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }
}

/// Pixel edge of one cell when drawing a `rows` x `cols` grid
///
/// Grids that fit use [`CELL_SIZE`]; larger ones shrink to fit the frame, down
/// to one pixel per cell.
pub fn cell_size_for(rows: usize, cols: usize) -> usize {
    CELL_SIZE
        .min(FRAME_WIDTH / cols.max(1))
        .min(FRAME_HEIGHT / rows.max(1))
        .max(1)
}

/// Pixel at (x, y) of an RGBA frame, if in range
pub fn rgba_pixel(frame: &Frame, x: usize, y: usize) -> Option<[u8; 4]> {
    if x >= FRAME_WIDTH || y >= FRAME_HEIGHT {
        return None;
    }
    let offset = (y * FRAME_WIDTH + x) * BYTES_PER_PIXEL;
    let bytes = frame.as_bytes().get(offset..offset + BYTES_PER_PIXEL)?;
    let mut pixel = [0u8; 4];
    pixel.copy_from_slice(bytes);
    Some(pixel)
}
