use embedded_graphics::prelude::Point;
use watchface_raster::{
    fill_rotated_rect, Argb2222, DisplayShape, FrameGuard, Framebuffer, RenderError, RotatedRect,
    SineTable, TRIG_MAX_ANGLE,
};

const SIZE: u32 = 180;
const CENTER: Point = Point::new(90, 90);
const QUARTER: i32 = TRIG_MAX_ANGLE / 4;

fn hand(angle: i32) -> RotatedRect {
    RotatedRect::new(Point::new(-2, -60), Point::new(2, 20), CENTER, angle, Argb2222::WHITE)
}

/// Paint one rectangle on a fresh 180x180 buffer filled with `background`.
fn render(shape: DisplayShape, background: Argb2222, rect: &RotatedRect) -> Vec<u8> {
    let mut bytes = vec![background.argb(); (SIZE * SIZE) as usize];
    let mut fb = Framebuffer::new(&mut bytes, SIZE, SIZE, shape).unwrap();
    {
        let mut guard = FrameGuard::acquire(&mut fb).unwrap();
        guard.fill_rotated_rect(&SineTable::new(), rect).unwrap();
    }
    assert!(!fb.is_captured());
    bytes
}

fn at(bytes: &[u8], x: i32, y: i32) -> Argb2222 {
    Argb2222::from_argb(bytes[(y * SIZE as i32 + x) as usize])
}

/// Check an axis-aligned footprint pixel by pixel: the outermost ring keeps
/// the background (zero coverage), everything strictly inside is `fill`.
fn assert_footprint(bytes: &[u8], x0: i32, x1: i32, y0: i32, y1: i32, bg: Argb2222, fill: Argb2222) {
    for y in 0..SIZE as i32 {
        for x in 0..SIZE as i32 {
            let inside = (x0..=x1).contains(&x) && (y0..=y1).contains(&y);
            let on_edge = x == x0 || x == x1 || y == y0 || y == y1;
            let expected = if inside && !on_edge { fill } else { bg };
            assert_eq!(at(bytes, x, y), expected, "pixel ({x},{y})");
        }
    }
}

#[test_log::test]
fn twelve_oclock_bar_matches_closed_form() {
    let bg = Argb2222::from_rgb(1, 1, 1);
    let mut bytes = vec![bg.argb(); (SIZE * SIZE) as usize];
    let mut fb = Framebuffer::new(&mut bytes, SIZE, SIZE, DisplayShape::Rect).unwrap();
    let stats = fill_rotated_rect(&mut fb, &SineTable::new(), &hand(0)).unwrap();

    // 5 x 81 pixels inside; only the center column deeper than one pixel, minus two rows each end
    assert_eq!(stats.rows_scanned, 81);
    assert_eq!(stats.painted(), 405);
    assert_eq!(stats.solid, 77);
    assert_eq!(stats.blended, 328);

    assert_footprint(&bytes, 88, 92, 30, 110, bg, Argb2222::WHITE);
}

#[test_log::test]
fn quarter_turn_lays_the_bar_along_x() {
    let bytes = render(DisplayShape::Rect, Argb2222::BLACK, &hand(QUARTER));
    // clockwise on screen: the long end points to 3 o'clock
    assert_footprint(&bytes, 70, 150, 88, 92, Argb2222::BLACK, Argb2222::WHITE);
}

#[test_log::test]
fn three_quarter_turn_points_to_nine() {
    let bytes = render(DisplayShape::Rect, Argb2222::BLACK, &hand(3 * QUARTER));
    assert_footprint(&bytes, 30, 110, 88, 92, Argb2222::BLACK, Argb2222::WHITE);
}

#[test_log::test]
fn full_turn_is_bit_identical() {
    for angle in [0, 0x1555, 0x2000, 0x7123] {
        let once = render(DisplayShape::Rect, Argb2222::BLACK, &hand(angle));
        let again = render(DisplayShape::Rect, Argb2222::BLACK, &hand(angle + TRIG_MAX_ANGLE));
        assert!(once == again, "angle {angle:#x} differs after a full turn");
    }
}

#[test_log::test]
fn opposite_angles_mirror_the_footprint() {
    for angle in [0x0A00, 0x1555, 0x2D00] {
        let fwd = render(DisplayShape::Rect, Argb2222::BLACK, &hand(angle));
        let back = render(DisplayShape::Rect, Argb2222::BLACK, &hand(TRIG_MAX_ANGLE - angle));
        let neg = render(DisplayShape::Rect, Argb2222::BLACK, &hand(-angle));
        assert!(back == neg);

        let mut painted = 0;
        for y in 0..SIZE as i32 {
            for x in 1..SIZE as i32 {
                let mirrored = 2 * CENTER.x - x;
                assert_eq!(at(&fwd, x, y), at(&back, mirrored, y), "({x},{y}) at {angle:#x}");
                if at(&fwd, x, y) != Argb2222::BLACK {
                    painted += 1;
                }
            }
        }
        assert!(painted > 250, "only {painted} pixels painted at {angle:#x}");
    }
}

#[test_log::test]
fn rotated_bar_stays_near_its_true_outline() {
    // 45 degrees: the bar runs toward the upper right
    let bytes = render(DisplayShape::Rect, Argb2222::BLACK, &hand(TRIG_MAX_ANGLE / 8));
    let tip = (CENTER.x + 40, CENTER.y - 40);
    assert_eq!(at(&bytes, tip.0, tip.1), Argb2222::WHITE);
    let tail = (CENTER.x - 12, CENTER.y + 12);
    assert_eq!(at(&bytes, tail.0, tail.1), Argb2222::WHITE);
    // beyond the tip and well off to the side
    assert_eq!(at(&bytes, CENTER.x + 44, CENTER.y - 44), Argb2222::BLACK);
    assert_eq!(at(&bytes, CENTER.x + 10, CENTER.y + 10), Argb2222::BLACK);
}

#[test_log::test]
fn partial_coverage_blends_toward_the_background() {
    let bytes = render(DisplayShape::Rect, Argb2222::BLACK, &hand(TRIG_MAX_ANGLE / 12));
    let mut partial = 0;
    for px in bytes.iter().map(|&b| Argb2222::from_argb(b)) {
        if px != Argb2222::BLACK && px != Argb2222::WHITE {
            assert!(px.is_opaque());
            assert_eq!(px.r(), px.g());
            assert_eq!(px.g(), px.b());
            partial += 1;
        }
    }
    assert!(partial > 0, "a 30 degree edge should leave gray pixels");
}

#[test_log::test]
fn rectangle_off_the_surface_leaves_buffer_untouched() {
    let bg = Argb2222::from_rgb(0, 1, 2);
    let away = RotatedRect::new(
        Point::new(-2, -60),
        Point::new(2, 20),
        Point::new(-300, 400),
        0x1234,
        Argb2222::WHITE,
    );
    let bytes = render(DisplayShape::Rect, bg, &away);
    assert!(bytes.iter().all(|&b| b == bg.argb()));
}

#[test_log::test]
fn round_mask_corners_are_never_written() {
    let corner = RotatedRect::new(
        Point::new(-3, -3),
        Point::new(3, 3),
        Point::new(6, 6),
        0x0800,
        Argb2222::WHITE,
    );
    let bytes = render(DisplayShape::Round, Argb2222::CLEAR, &corner);
    assert!(bytes.iter().all(|&b| b == 0));

    let everything = RotatedRect::new(
        Point::new(-130, -130),
        Point::new(130, 130),
        CENTER,
        0x1000,
        Argb2222::WHITE,
    );
    let mut bytes = vec![0u8; (SIZE * SIZE) as usize];
    let mut fb = Framebuffer::new(&mut bytes, SIZE, SIZE, DisplayShape::Round).unwrap();
    fill_rotated_rect(&mut fb, &SineTable::new(), &everything).unwrap();
    for y in 0..SIZE as i32 {
        let (min_x, max_x) = fb.row_extent(y).unwrap();
        for x in 0..SIZE as i32 {
            let expected = if (min_x..=max_x).contains(&x) {
                Argb2222::WHITE
            } else {
                Argb2222::CLEAR
            };
            assert_eq!(fb.pixel(x, y), Some(expected), "({x},{y})");
        }
    }
}

#[test_log::test]
fn rectangle_beyond_sixteen_bits_is_refused_quickly() {
    for center in [CENTER, Point::new(90, 100_000)] {
        let tall = RotatedRect::new(
            Point::new(-2, -60),
            Point::new(2, i32::MAX - 1000),
            center,
            0,
            Argb2222::WHITE,
        );
        let mut bytes = vec![0u8; (SIZE * SIZE) as usize];
        let mut fb = Framebuffer::new(&mut bytes, SIZE, SIZE, DisplayShape::Rect).unwrap();
        assert_eq!(
            fill_rotated_rect(&mut fb, &SineTable::new(), &tall),
            Err(RenderError::CoordinateRange)
        );
        assert!(bytes.iter().all(|&b| b == 0));
    }
}
