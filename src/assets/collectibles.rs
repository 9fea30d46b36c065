//! Glowing pickups and the graffiti wall tag.

use crate::error::Result;
use crate::render::{dither_fill, radial_gradient, Band};
use crate::types::{Canvas, Colour, Rect};

use super::{hex, plot};

const CENTRE: (f32, f32) = (7.5, 7.5);

/// A golden orb with sparkles at the compass points.
pub fn grandma_memory(_seed: u64) -> Result<Canvas> {
    const BANDS: [Band; 7] = [
        Band::solid(1.5, Colour::new(255, 255, 220, 255)),
        Band::solid(2.5, Colour::new(255, 232, 136, 255)),
        Band::solid(3.5, Colour::new(221, 187, 68, 255)),
        Band::solid(4.8, Colour::new(204, 170, 51, 230)),
        Band::solid(6.0, Colour::new(170, 136, 34, 180)),
        Band::solid(7.5, Colour::new(140, 110, 28, 100)),
        Band::solid(9.0, Colour::new(120, 95, 22, 50)),
    ];
    const BRIGHT: Colour = Colour::new(255, 245, 200, 220);
    const GLINT: Colour = Colour::new(255, 255, 255, 160);

    let mut canvas = Canvas::new(16, 16)?;
    radial_gradient(&mut canvas, CENTRE, &BANDS)?;

    plot(
        &mut canvas,
        &[(7, 1), (8, 1), (7, 14), (8, 14), (1, 7), (1, 8), (14, 7), (14, 8)],
        Colour::WHITE,
    );
    plot(
        &mut canvas,
        &[(7, 0), (8, 0), (7, 15), (8, 15), (0, 7), (0, 8), (15, 7), (15, 8)],
        BRIGHT,
    );
    plot(&mut canvas, &[(3, 3), (12, 3), (3, 12), (12, 12)], GLINT);

    Ok(canvas)
}

/// A bench inside a warm glow.
pub fn safe_spot(_seed: u64) -> Result<Canvas> {
    const BANDS: [Band; 4] = [
        Band::solid(2.5, Colour::new(255, 238, 136, 200)),
        Band::solid(4.5, Colour::new(221, 204, 85, 150)),
        Band::solid(6.5, Colour::new(170, 153, 51, 100)),
        Band::solid(8.5, Colour::new(140, 125, 40, 50)),
    ];
    const BENCH: Colour = hex(0x7B5B3A);
    const BENCH_SHADOW: Colour = hex(0x5A3A20);
    const BENCH_HIGHLIGHT: Colour = hex(0x9B7B5A);
    const DIM: Colour = Colour::new(255, 255, 220, 180);

    let mut canvas = Canvas::new(16, 16)?;
    radial_gradient(&mut canvas, CENTRE, &BANDS)?;

    // Backrest
    canvas.hline(5, 6, 7, BENCH_SHADOW);
    canvas.hline(5, 7, 7, BENCH);
    plot(&mut canvas, &[(5, 7), (6, 6)], BENCH_HIGHLIGHT);

    // Seat
    canvas.hline(5, 8, 7, BENCH_HIGHLIGHT);
    canvas.hline(5, 9, 7, BENCH);

    // Legs
    canvas.vline(5, 10, 2, BENCH_SHADOW);
    canvas.vline(11, 10, 2, BENCH_SHADOW);
    plot(&mut canvas, &[(6, 10), (10, 10)], BENCH);

    plot(&mut canvas, &[(3, 2), (12, 4), (10, 2), (11, 13)], Colour::WHITE);
    plot(&mut canvas, &[(2, 10), (13, 6), (5, 13), (1, 5)], DIM);

    Ok(canvas)
}

/// A spray-painted heart on grey brick.
pub fn graffiti(_seed: u64) -> Result<Canvas> {
    const BRICK: Colour = Colour::rgb(112, 112, 112);
    const BRICK_SHADOW: Colour = Colour::rgb(96, 96, 96);
    const BRICK_DARK: Colour = Colour::rgb(88, 88, 88);
    const MORTAR: Colour = Colour::rgb(136, 136, 136);
    const PAINT: Colour = hex(0xDD44AA);
    const PAINT_HIGHLIGHT: Colour = hex(0xFF66CC);
    const PAINT_SHADOW: Colour = hex(0xBB2288);
    // (y, first x, length)
    const HEART: [(i32, i32, i32); 9] = [
        (3, 5, 2),
        (3, 9, 2),
        (4, 4, 8),
        (5, 4, 8),
        (6, 4, 8),
        (7, 5, 6),
        (8, 6, 4),
        (9, 7, 2),
        (10, 7, 1),
    ];

    let mut canvas = Canvas::new(16, 16)?;

    // Courses of running bond, offset by half a brick every other row
    dither_fill(
        &mut canvas,
        Rect::new(0, 0, 16, 16),
        &[BRICK, MORTAR, BRICK_SHADOW, BRICK_DARK],
        &mut |x: i32, y: i32| -> Option<usize> {
            let joint = if (y / 4) % 2 == 0 { 0 } else { 4 };
            let (bx, by) = (x % 8, y % 4);
            Some(if by == 0 || bx == joint {
                1
            } else if bx < 2 && by < 2 {
                2
            } else if bx > 5 && by > 2 {
                3
            } else {
                0
            })
        },
    )?;

    for (y, x0, len) in HEART {
        canvas.hline(x0, y, len, PAINT);
    }

    plot(
        &mut canvas,
        &[(5, 3), (6, 3), (4, 4), (5, 4), (9, 3), (10, 3), (5, 5), (6, 4)],
        PAINT_HIGHLIGHT,
    );
    plot(
        &mut canvas,
        &[(10, 7), (9, 8), (8, 9), (7, 10), (11, 5), (11, 6), (10, 6)],
        PAINT_SHADOW,
    );

    // Drips
    plot(&mut canvas, &[(7, 11), (9, 9), (9, 10)], PAINT.with_alpha(200));
    plot(&mut canvas, &[(7, 12), (9, 11)], PAINT.with_alpha(140));

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grandma_memory_core_and_sparkles() {
        let canvas = grandma_memory(0).unwrap();

        assert_eq!(canvas.get(7, 7), Colour::new(255, 255, 220, 255));
        assert_eq!(canvas.get(7, 1), Colour::WHITE);
        assert_eq!(canvas.get(0, 8), Colour::new(255, 245, 200, 220));
        assert_eq!(canvas.get(3, 3).a, 160);
    }

    #[test]
    fn test_grandma_memory_is_symmetric() {
        let canvas = grandma_memory(0).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(canvas.get(x, y), canvas.get(15 - x, y), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_safe_spot_glow_fades_out() {
        let canvas = safe_spot(0).unwrap();

        assert_eq!(canvas.get(7, 4).a, 150);
        // Corners are beyond the last band
        assert!(canvas.get(0, 0).is_transparent());
        assert_eq!(canvas.get(8, 9), hex(0x7B5B3A));
    }

    #[test]
    fn test_graffiti_heart() {
        let canvas = graffiti(0).unwrap();

        assert_eq!(canvas.get(7, 5), hex(0xDD44AA));
        assert_eq!(canvas.get(5, 3), hex(0xFF66CC));
        assert_eq!(canvas.get(7, 10), hex(0xBB2288));
        assert_eq!(canvas.get(7, 12).a, 140);
        assert_eq!(canvas.get(0, 0), Colour::rgb(136, 136, 136));
    }
}
