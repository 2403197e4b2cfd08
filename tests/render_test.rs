//! Frame renderers

use pathfinder_sim::simulation::{
    cell_size_for, rgba_pixel, shortest_path, AnimationController, AsciiRenderer, Coord,
    FrameRenderer, GridModel, Path, ProblemCatalog, RendererKind, RgbaRenderer, Scene, CELL_SIZE,
    FRAME_HEIGHT, FRAME_WIDTH,
};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const OBSTACLE: [u8; 4] = [90, 90, 90, 255];
const EXIT: [u8; 4] = [0, 200, 0, 255];
const PLAYER: [u8; 4] = [0, 0, 255, 255];

fn cell_center(row: usize, col: usize) -> (usize, usize) {
    (col * CELL_SIZE + CELL_SIZE / 2, row * CELL_SIZE + CELL_SIZE / 2)
}

fn first_problem() -> GridModel {
    ProblemCatalog::builtin().grid(0).expect("builtin problem")
}

#[test]
fn test_rgba_frame_dimensions() {
    let grid = first_problem();
    let controller = AnimationController::new();
    let frame = RgbaRenderer.render(&Scene {
        grid: &grid,
        controller: &controller,
        tick: 7,
    });

    assert_eq!(frame.len(), FRAME_WIDTH * FRAME_HEIGHT * 4);
    assert_eq!(frame.tick(), 7);
    assert_eq!(frame.content_type(), "application/octet-stream");
    assert!(rgba_pixel(&frame, FRAME_WIDTH, 0).is_none());
}

#[test]
fn test_rgba_idle_scene_colors() {
    let grid = first_problem();
    let controller = AnimationController::new();
    let frame = RgbaRenderer.render(&Scene {
        grid: &grid,
        controller: &controller,
        tick: 1,
    });

    let (x, y) = cell_center(0, 0);
    assert_eq!(rgba_pixel(&frame, x, y), Some(PLAYER));
    let (x, y) = cell_center(1, 1);
    assert_eq!(rgba_pixel(&frame, x, y), Some(OBSTACLE));
    let (x, y) = cell_center(4, 4);
    assert_eq!(rgba_pixel(&frame, x, y), Some(EXIT));
    let (x, y) = cell_center(2, 3);
    assert_eq!(rgba_pixel(&frame, x, y), Some(WHITE));

    // Beyond the grid the canvas stays blank
    assert_eq!(rgba_pixel(&frame, 700, 500), Some(WHITE));
}

#[test]
fn test_rgba_player_follows_cursor() {
    let mut grid = first_problem();
    let route = shortest_path(&mut grid);
    let mut controller = AnimationController::new();
    controller.start(route);
    controller.tick(&grid);
    controller.tick(&grid);

    let frame = RgbaRenderer.render(&Scene {
        grid: &grid,
        controller: &controller,
        tick: 3,
    });
    let (x, y) = cell_center(0, 2);
    assert_eq!(rgba_pixel(&frame, x, y), Some(PLAYER));
    let (x, y) = cell_center(0, 0);
    assert_ne!(rgba_pixel(&frame, x, y), Some(PLAYER));
}

#[test]
fn test_rgba_failure_border() {
    let grid = first_problem();
    let mut controller = AnimationController::new();
    controller.start(Path::unreachable());

    let frame = RgbaRenderer.render(&Scene {
        grid: &grid,
        controller: &controller,
        tick: 1,
    });
    assert_eq!(rgba_pixel(&frame, 2, 300), Some(RED));
    assert_eq!(rgba_pixel(&frame, FRAME_WIDTH - 1, FRAME_HEIGHT - 1), Some(RED));
}

#[test]
fn test_ascii_idle_map() {
    let grid = first_problem();
    let controller = AnimationController::new();
    let frame = AsciiRenderer.render(&Scene {
        grid: &grid,
        controller: &controller,
        tick: 0,
    });

    let text = String::from_utf8(frame.as_bytes().to_vec()).expect("utf-8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "tick 0 | idle | step 0/0",
            "P....",
            ".#...",
            "..#..",
            "...#.",
            "....E",
        ]
    );
    assert_eq!(frame.content_type(), "text/plain; charset=utf-8");
}

#[test]
fn test_ascii_shows_trail_and_failure() {
    let grid = GridModel::new(3, 3, Coord::new(0, 0), Coord::new(0, 2), [Coord::new(1, 1)])
        .expect("valid grid");
    let mut controller = AnimationController::new();
    controller.start(Path::new(vec![
        Coord::new(0, 0),
        Coord::new(0, 1),
        Coord::new(1, 1),
        Coord::new(0, 2),
    ]));
    controller.tick(&grid);
    controller.tick(&grid);

    let frame = AsciiRenderer.render(&Scene {
        grid: &grid,
        controller: &controller,
        tick: 2,
    });
    let text = String::from_utf8_lossy(frame.as_bytes());
    assert!(text.starts_with("tick 2 | failed | step 1/3\n"));
    assert!(text.contains("*PE\n"));
    assert!(text.contains("GAME OVER: invalid step encountered"));
}

#[test]
fn test_renderer_kind_builds_matching_renderer() {
    let grid = first_problem();
    let controller = AnimationController::new();
    let scene = Scene {
        grid: &grid,
        controller: &controller,
        tick: 0,
    };

    assert_eq!(
        RendererKind::Rgba.build().render(&scene).content_type(),
        RgbaRenderer::CONTENT_TYPE
    );
    assert_eq!(
        RendererKind::Ascii.build().render(&scene).content_type(),
        AsciiRenderer::CONTENT_TYPE
    );
    assert_eq!(RendererKind::default(), RendererKind::Rgba);
}

#[test]
fn test_cell_size_shrinks_for_large_grids() {
    assert_eq!(cell_size_for(5, 5), CELL_SIZE);
    assert_eq!(cell_size_for(15, 20), CELL_SIZE);
    assert_eq!(cell_size_for(30, 30), 20);
    assert_eq!(cell_size_for(10, 100), 8);
    assert_eq!(cell_size_for(2000, 1), 1);
}

#[test]
fn test_rgba_large_grid_fits_frame() {
    let grid = GridModel::new(30, 30, Coord::new(0, 0), Coord::new(29, 29), [Coord::new(15, 15)])
        .expect("valid grid");
    let controller = AnimationController::new();
    let frame = RgbaRenderer.render(&Scene {
        grid: &grid,
        controller: &controller,
        tick: 1,
    });

    // 20px cells: the far corner lands inside the 600px frame
    assert_eq!(rgba_pixel(&frame, 29 * 20 + 10, 29 * 20 + 10), Some(EXIT));
    assert_eq!(rgba_pixel(&frame, 15 * 20 + 10, 15 * 20 + 10), Some(OBSTACLE));
    assert_eq!(rgba_pixel(&frame, 10, 10), Some(PLAYER));
    assert_eq!(rgba_pixel(&frame, 700, 300), Some(WHITE));
}
