//! Procedural generators.
//!
//! Textures that are noise rather than layout (floors, walls, glows) are
//! painted in code. Each generator is a pure function of its seed; the
//! ones without randomness ignore it.

mod collectibles;
mod tiles;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::AssetGroup;
use crate::error::Result;
use crate::render::{dither_fill, DitherRule, Noise};
use crate::types::{Canvas, Colour, Rect};

/// Signature shared by every procedural generator.
pub type Generator = fn(u64) -> Result<Canvas>;

/// A procedural asset and its default seed.
#[derive(Debug, Clone, Copy)]
pub struct Procedural {
    pub name: &'static str,
    pub group: AssetGroup,
    pub size: (u32, u32),
    /// `None` for generators that use no randomness.
    pub seed: Option<u64>,
    pub generate: Generator,
}

const fn tile(name: &'static str, seed: Option<u64>, generate: Generator) -> Procedural {
    Procedural {
        name,
        group: AssetGroup::Tiles,
        size: (16, 16),
        seed,
        generate,
    }
}

const fn collectible(name: &'static str, generate: Generator) -> Procedural {
    Procedural {
        name,
        group: AssetGroup::Collectibles,
        size: (16, 16),
        seed: None,
        generate,
    }
}

/// Every procedural asset, in build order.
pub const PROCEDURAL: &[Procedural] = &[
    tile("floor_wood", Some(100), tiles::floor_wood),
    tile("floor_tile_kitchen", None, tiles::floor_tile_kitchen),
    tile("floor_grass", Some(77), tiles::floor_grass),
    tile("floor_concrete", Some(33), tiles::floor_concrete),
    tile("floor_asphalt", Some(55), tiles::floor_asphalt),
    tile("floor_dirt", Some(44), tiles::floor_dirt),
    tile("floor_classroom", Some(22), tiles::floor_classroom),
    tile("wall_house", Some(88), tiles::wall_house),
    tile("wall_brick", None, tiles::wall_brick),
    tile("wall_school", None, tiles::wall_school),
    tile("wall_dark", Some(13), tiles::wall_dark),
    tile("tree", Some(111), tiles::tree),
    tile("fountain", None, tiles::fountain),
    collectible("grandma_memory", collectibles::grandma_memory),
    collectible("safe_spot", collectibles::safe_spot),
    collectible("graffiti", collectibles::graffiti),
];

/// Opaque colour from a `0xRRGGBB` literal.
pub(crate) const fn hex(rgb: u32) -> Colour {
    Colour::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub(crate) fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Checkerboard base texture: even cells take `palette[0]`, odd cells draw
/// from `palette` with `odd_weights`. Hands the generator back so the
/// caller can keep drawing from the same stream.
pub(crate) fn checker_noise(
    canvas: &mut Canvas,
    region: Rect,
    palette: &[Colour],
    odd_weights: &[f32],
    rng: ChaCha8Rng,
) -> Result<ChaCha8Rng> {
    let mut noise = Noise::new(rng, odd_weights)?;
    {
        let mut rule = |x: i32, y: i32| {
            if (x + y).rem_euclid(2) == 0 {
                Some(0)
            } else {
                noise.pick(x, y)
            }
        };
        dither_fill(canvas, region, palette, &mut rule)?;
    }
    Ok(noise.rng)
}

/// Set every listed point to one colour.
pub(crate) fn plot(canvas: &mut Canvas, points: &[(i32, i32)], colour: Colour) {
    for &(x, y) in points {
        canvas.set(x, y, colour);
    }
}
