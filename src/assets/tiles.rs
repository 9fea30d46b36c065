//! 16x16 floor and wall textures, plus the round tree and fountain tiles.

use rand::Rng;

use crate::error::Result;
use crate::render::{dither_fill, radial_gradient, scatter, Band, Noise};
use crate::types::{Canvas, Colour, Rect};

use super::{checker_noise, hex, plot, seeded};

const SIZE: u32 = 16;
const FULL: Rect = Rect::new(0, 0, 16, 16);

fn blank() -> Result<Canvas> {
    Canvas::filled(SIZE, SIZE, Colour::BLACK)
}

pub fn floor_wood(seed: u64) -> Result<Canvas> {
    const BASE: Colour = hex(0x8B6B4A);
    const HIGHLIGHT: Colour = hex(0xA08060);
    const SHADOW: Colour = hex(0x6B4B2A);
    const DEEP: Colour = hex(0x5A3A1A);
    const GRAIN: Colour = hex(0x9B7B5A);
    const KNOT: Colour = hex(0x7B5B3A);
    const NAIL: Colour = hex(0x4A3A2A);
    const PLANKS: [(i32, i32); 3] = [(0, 4), (5, 9), (10, 15)];

    let mut canvas = blank()?;
    let mut rng = seeded(seed);

    for &(top, bottom) in &PLANKS {
        let plank = Rect::new(0, top, 16, bottom - top + 1);
        dither_fill(&mut canvas, plank, &[BASE, GRAIN, KNOT], &mut |x: i32, y: i32| -> Option<usize> {
            Some(if (x + y) % 7 == 0 {
                1
            } else if (3 * x + 5 * y) % 11 == 0 {
                2
            } else {
                0
            })
        })?;

        for x in 0..16 {
            if rng.gen::<f32>() > 0.15 {
                canvas.set(x, top, HIGHLIGHT);
            }
            if (x + top) % 5 == 0 {
                canvas.set(x, top, GRAIN);
            }
        }

        for x in 0..16 {
            canvas.set(x, bottom, if x % 2 == 0 { DEEP } else { SHADOW });
        }
    }

    // Loose grain, never on a groove row
    for _ in 0..20 {
        let x = rng.gen_range(0..16);
        let y = rng.gen_range(0..16);
        if !PLANKS.iter().any(|&(_, bottom)| bottom == y) {
            canvas.set(x, y, GRAIN);
        }
    }

    for (i, &(top, bottom)) in PLANKS.iter().enumerate() {
        let y = top + (bottom - top) / 2;
        for x in 0..16 {
            if (x + i as i32) % 4 == 0 {
                canvas.set(x, y, GRAIN);
            }
        }
        plot(&mut canvas, &[(1, top + 1), (14, top + 1)], NAIL);
    }

    Ok(canvas)
}

pub fn floor_tile_kitchen(_seed: u64) -> Result<Canvas> {
    const LIGHT: Colour = hex(0xD4C8B0);
    const DARK: Colour = hex(0xC4B8A0);
    const LIGHT_SHADE: Colour = hex(0xCCC0A8);
    const DARK_SHADE: Colour = hex(0xBCB098);
    const GROUT: Colour = hex(0xAAA090);

    let mut canvas = blank()?;

    for (x, y) in FULL.points() {
        let (lx, ly) = (x % 8, y % 8);
        let light = (x / 8 + y / 8) % 2 == 0;
        let (base, shade) = if light {
            (LIGHT, LIGHT_SHADE)
        } else {
            (DARK, DARK_SHADE)
        };

        let colour = if lx == 0 || ly == 0 {
            GROUT
        } else if (lx <= 1 || lx >= 6 || ly <= 1 || ly >= 6) && (x + y) % 2 == 0 {
            shade
        } else if (3 * x + 7 * y) % 13 == 0 {
            shade
        } else {
            base
        };
        canvas.set(x, y, colour);
    }

    Ok(canvas)
}

pub fn floor_grass(seed: u64) -> Result<Canvas> {
    const BASE: Colour = hex(0x4A8B3A);
    const DARK: Colour = hex(0x3A6B2A);
    const LIGHT: Colour = hex(0x6AAB5A);
    const MID: Colour = hex(0x408030);
    const YELLOW: Colour = hex(0xDDCC44);
    const WHITE: Colour = hex(0xF0F0F0);

    let mut canvas = blank()?;
    let mut rng = checker_noise(&mut canvas, FULL, &[BASE, DARK], &[0.4, 0.6], seeded(seed))?;

    scatter(&mut canvas, &mut rng, 18, FULL, LIGHT);
    scatter(&mut canvas, &mut rng, 12, FULL, MID);

    plot(
        &mut canvas,
        &[(2, 3), (3, 3), (8, 11), (9, 11), (13, 6), (14, 6), (5, 14), (1, 9)],
        DARK,
    );
    plot(&mut canvas, &[(4, 7), (1, 13)], YELLOW);
    plot(&mut canvas, &[(11, 2), (14, 10)], WHITE);

    Ok(canvas)
}

pub fn floor_concrete(seed: u64) -> Result<Canvas> {
    const BASE: Colour = hex(0xB0B0B0);
    const TEXTURE: Colour = hex(0xA0A0A0);
    const CRACK: Colour = hex(0x888888);
    const CRACK_EDGE: Colour = hex(0x909090);
    const SPOT: Colour = hex(0xC0C0C0);
    const DARK_SPOT: Colour = hex(0x989898);

    let mut canvas = blank()?;
    let mut rng = checker_noise(&mut canvas, FULL, &[BASE, TEXTURE], &[0.5, 0.5], seeded(seed))?;

    scatter(&mut canvas, &mut rng, 15, FULL, DARK_SPOT);
    scatter(&mut canvas, &mut rng, 12, FULL, SPOT);

    for i in 0..16 {
        canvas.set(i, i, CRACK);
        if i + 1 < 16 && rng.gen::<f32>() > 0.5 {
            canvas.set(i + 1, i, CRACK_EDGE);
        }
    }

    Ok(canvas)
}

pub fn floor_asphalt(seed: u64) -> Result<Canvas> {
    const BASE: Colour = hex(0x505050);
    const LIGHT: Colour = hex(0x585858);
    const DARK: Colour = hex(0x484848);
    const VERY_DARK: Colour = hex(0x404040);
    const SPECK: Colour = hex(0x606060);
    const PIT: Colour = hex(0x3A3A3A);

    let mut canvas = blank()?;
    let mut noise = Noise::new(seeded(seed), &[0.40, 0.25, 0.20, 0.15])?;
    dither_fill(&mut canvas, FULL, &[BASE, LIGHT, DARK, VERY_DARK], &mut noise)?;

    let mut rng = noise.rng;
    scatter(&mut canvas, &mut rng, 8, FULL, SPECK);
    scatter(&mut canvas, &mut rng, 5, FULL, PIT);

    Ok(canvas)
}

pub fn floor_dirt(seed: u64) -> Result<Canvas> {
    const BASE: Colour = hex(0x9B7B5A);
    const TEXTURE: Colour = hex(0x8B6B4A);
    const MID: Colour = hex(0x907050);
    const PEBBLE_DARK: Colour = hex(0x7B5B3A);
    const PEBBLE_LIGHT: Colour = hex(0xB09070);
    const TWIG: Colour = hex(0x5A3A1A);

    let mut canvas = blank()?;
    checker_noise(
        &mut canvas,
        FULL,
        &[BASE, TEXTURE, MID],
        &[0.25, 0.5, 0.25],
        seeded(seed),
    )?;

    plot(
        &mut canvas,
        &[(3, 5), (10, 2), (7, 12), (14, 8), (1, 14), (12, 14)],
        PEBBLE_DARK,
    );
    plot(
        &mut canvas,
        &[(5, 9), (13, 4), (2, 11), (9, 7), (0, 3), (15, 1)],
        PEBBLE_LIGHT,
    );
    plot(&mut canvas, &[(6, 6), (7, 6), (8, 7)], TWIG);

    Ok(canvas)
}

pub fn floor_classroom(seed: u64) -> Result<Canvas> {
    const BASE: Colour = hex(0xC8B898);
    const TEXTURE: Colour = hex(0xC0B090);
    const SHINE: Colour = hex(0xD8C8A8);
    const DARK: Colour = hex(0xB8A888);

    let mut canvas = blank()?;
    let mut rng = checker_noise(&mut canvas, FULL, &[BASE, TEXTURE], &[0.6, 0.4], seeded(seed))?;

    // Wax shine every eight rows
    for y in [0, 8] {
        for x in 0..16 {
            if rng.gen::<f32>() > 0.2 {
                canvas.set(x, y, SHINE);
            }
        }
    }

    scatter(&mut canvas, &mut rng, 8, FULL, DARK);

    Ok(canvas)
}

pub fn wall_house(seed: u64) -> Result<Canvas> {
    const WALL: Colour = hex(0xD8C8A8);
    const WALL_TEXTURE: Colour = hex(0xD0C0A0);
    const WALL_DOT: Colour = hex(0xC8B898);
    const BOARD: Colour = hex(0x8B7B5B);
    const BOARD_SHADOW: Colour = hex(0x6B5B3B);
    const BOARD_HIGHLIGHT: Colour = hex(0xA08B6B);

    let wall = Rect::new(0, 0, 16, 14);
    let mut canvas = blank()?;
    let mut rng = checker_noise(&mut canvas, wall, &[WALL, WALL_TEXTURE], &[0.55, 0.45], seeded(seed))?;

    scatter(&mut canvas, &mut rng, 10, wall, WALL_DOT);

    canvas.hline(0, 14, 16, BOARD_HIGHLIGHT);
    for x in 0..16 {
        let shadow = (x + 15) % 3 == 0 || x % 4 == 0;
        canvas.set(x, 15, if shadow { BOARD_SHADOW } else { BOARD });
    }

    Ok(canvas)
}

pub fn wall_brick(_seed: u64) -> Result<Canvas> {
    const MORTAR: Colour = hex(0xC0B090);

    let mut canvas = Canvas::filled(SIZE, SIZE, MORTAR)?;

    for brick in [
        Rect::new(0, 1, 7, 6),
        Rect::new(8, 1, 7, 6),
        Rect::new(4, 9, 7, 6),
        Rect::new(-3, 9, 6, 6),
        Rect::new(12, 9, 7, 6),
    ] {
        draw_brick(&mut canvas, brick);
    }

    for y in [0, 7, 8, 15] {
        canvas.hline(0, y, 16, MORTAR);
    }
    for x in [7, 15] {
        canvas.vline(x, 1, 6, MORTAR);
    }
    for x in [3, 11] {
        canvas.vline(x, 9, 6, MORTAR);
    }

    Ok(canvas)
}

/// One brick, lit from the top left. Wraps around the tile edges so the
/// texture repeats seamlessly.
fn draw_brick(canvas: &mut Canvas, brick: Rect) {
    const BASE: Colour = hex(0x8B4513);
    const HIGHLIGHT: Colour = hex(0xA05520);
    const SHADOW: Colour = hex(0x6B3510);
    const MID: Colour = hex(0x7B3A10);

    for (bx, by) in brick.points() {
        let (wx, wy) = (bx.rem_euclid(16), by.rem_euclid(16));
        let (lx, ly) = (bx - brick.x, by - brick.y);

        let colour = if lx == 0 || ly == 0 {
            HIGHLIGHT
        } else if lx == brick.width - 1 || ly == brick.height - 1 {
            SHADOW
        } else if (wx + wy) % 3 == 0 {
            MID
        } else if (wx + wy) % 5 == 0 {
            HIGHLIGHT
        } else {
            BASE
        };
        canvas.set(wx, wy, colour);
    }
}

pub fn wall_school(_seed: u64) -> Result<Canvas> {
    const BASE: Colour = hex(0xA0A8B8);
    const STRIPE: Colour = hex(0x98A0B0);
    const LIGHT: Colour = hex(0xA8B0C0);
    const BOARD: Colour = hex(0x707880);
    const BOARD_HIGHLIGHT: Colour = hex(0x808890);

    let mut canvas = blank()?;
    dither_fill(
        &mut canvas,
        Rect::new(0, 0, 16, 14),
        &[BASE, STRIPE, LIGHT],
        &mut |x: i32, y: i32| -> Option<usize> {
            let even = (x + y) % 2 == 0;
            Some(match x % 4 {
                0 | 1 if even => 1,
                0 => 0,
                _ if (x + y) % 7 == 0 => 2,
                _ => 0,
            })
        },
    )?;

    canvas.hline(0, 14, 16, BOARD_HIGHLIGHT);
    canvas.hline(0, 15, 16, BOARD);

    Ok(canvas)
}

pub fn wall_dark(seed: u64) -> Result<Canvas> {
    const BASE: Colour = hex(0x2A2A30);
    const BRICK: Colour = hex(0x323238);
    const DRIP: Colour = hex(0x222228);
    const MORTAR: Colour = hex(0x252530);
    const HIGHLIGHT: Colour = hex(0x38383E);

    let mut canvas = blank()?;
    checker_noise(&mut canvas, FULL, &[BASE, BRICK], &[0.4, 0.6], seeded(seed))?;

    for y in [0, 7, 15] {
        canvas.hline(0, y, 16, MORTAR);
    }
    for x in [7, 15] {
        canvas.vline(x, 1, 6, MORTAR);
    }
    for x in [3, 11] {
        canvas.vline(x, 8, 7, MORTAR);
    }

    canvas.vline(5, 3, 5, DRIP);
    canvas.vline(12, 10, 4, DRIP);
    plot(&mut canvas, &[(2, 3), (10, 10)], HIGHLIGHT);

    Ok(canvas)
}

/// Round canopy over a short trunk, on a transparent tile.
pub fn tree(seed: u64) -> Result<Canvas> {
    const TRUNK: Colour = hex(0x5B3B1A);
    const TRUNK_SHADOW: Colour = hex(0x4A2A10);
    const TRUNK_HIGHLIGHT: Colour = hex(0x6B4B2A);
    const CANOPY: Colour = hex(0x3A7B2A);
    const CANOPY_SHADOW: Colour = hex(0x2A5B1A);
    const CANOPY_HIGHLIGHT: Colour = hex(0x5A9B4A);
    const CANOPY_MID: Colour = hex(0x307020);

    let mut canvas = Canvas::new(SIZE, SIZE)?;
    let distance = |x: i32, y: i32| (((x - 7) * (x - 7) + (y - 7) * (y - 7)) as f32).sqrt();

    // Lit from the top left, shaded to the bottom right
    for (x, y) in Rect::new(0, 0, 15, 15).points() {
        if distance(x, y) > 7.5 {
            continue;
        }
        let diagonal = (x - 7) + (y - 7);
        let colour = if diagonal < -3 {
            CANOPY_HIGHLIGHT
        } else if diagonal > 3 {
            if (x + y) % 2 == 0 {
                CANOPY_SHADOW
            } else {
                CANOPY_MID
            }
        } else if (x + y) % 3 == 0 {
            CANOPY_MID
        } else {
            CANOPY
        };
        canvas.set(x, y, colour);
    }

    // Dithered rim
    for (x, y) in Rect::new(1, 1, 13, 13).points() {
        let d = distance(x, y);
        if d > 6.5 && d <= 7.5 && (x + y) % 2 == 0 {
            canvas.set(x, y, CANOPY_SHADOW);
        }
    }

    canvas.vline(6, 11, 5, TRUNK_SHADOW);
    canvas.vline(7, 11, 5, TRUNK);
    canvas.vline(8, 11, 5, TRUNK_HIGHLIGHT);
    canvas.vline(9, 11, 5, TRUNK_SHADOW);
    canvas.hline(5, 11, 6, CANOPY_SHADOW);

    let mut rng = seeded(seed);
    for _ in 0..10 {
        let x = rng.gen_range(2..=12);
        let y = rng.gen_range(1..=9);
        if distance(x, y) <= 6.0 {
            canvas.set(x, y, CANOPY_HIGHLIGHT);
        }
    }

    Ok(canvas)
}

/// Stone basin ringed around rippling water.
pub fn fountain(_seed: u64) -> Result<Canvas> {
    const STONE: Colour = hex(0x808888);
    const STONE_SHADOW: Colour = hex(0x606868);
    const STONE_HIGHLIGHT: Colour = hex(0xA0A8A8);
    const STONE_DARK: Colour = hex(0x505858);
    const WATER: Colour = hex(0x4488CC);
    const WATER_SHADOW: Colour = hex(0x2266AA);
    const WATER_HIGHLIGHT: Colour = hex(0x66AADD);
    const SPLASH: Colour = Colour::rgb(200, 220, 240);

    let mut canvas = Canvas::new(SIZE, SIZE)?;

    let mut water = Canvas::new(SIZE, SIZE)?;
    dither_fill(
        &mut water,
        FULL,
        &[WATER_SHADOW, WATER, WATER_HIGHLIGHT],
        &mut |x: i32, y: i32| -> Option<usize> {
            Some(if (x + y) % 3 == 0 {
                2
            } else if (x + y) % 2 == 0 {
                1
            } else {
                0
            })
        },
    )?;

    // Water inside, stone ring outside
    let mut disc = Canvas::new(SIZE, SIZE)?;
    radial_gradient(
        &mut disc,
        (7.5, 7.5),
        &[Band::solid(5.5, WATER), Band::solid(7.5, STONE)],
    )?;

    for (x, y) in FULL.points() {
        let shade = (x as f32 - 7.5) + (y as f32 - 7.5);
        let colour = match disc.get(x, y) {
            c if c == WATER => water.get(x, y),
            c if c == STONE && shade < -2.0 => STONE_HIGHLIGHT,
            c if c == STONE && shade > 2.0 => STONE_SHADOW,
            c => c,
        };
        canvas.set(x, y, colour);
    }

    // Inner lip, lit on the near side
    for (x, y) in Rect::new(3, 3, 10, 10).points() {
        let (dx, dy) = (x as f32 - 7.5, y as f32 - 7.5);
        let d = (dx * dx + dy * dy).sqrt();
        if (5.0..=5.8).contains(&d) {
            if dx + dy < 0.0 {
                canvas.set(x, y, STONE_HIGHLIGHT);
            } else if dx + dy > 0.0 {
                canvas.set(x, y, STONE_DARK);
            }
        }
    }

    for x in 5..11 {
        for y in [7, 9] {
            if !canvas.get(x, y).is_transparent() {
                canvas.set(x, y, WATER_HIGHLIGHT);
            }
        }
    }

    plot(&mut canvas, &[(7, 7), (8, 7)], WATER_HIGHLIGHT);
    canvas.set(7, 8, SPLASH);

    Ok(canvas)
}
