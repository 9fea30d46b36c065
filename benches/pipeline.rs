//! Benchmarks for the spritegen pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spritegen::catalog::{AssetSource, Catalog, Layout};
use spritegen::parser::parse_sprite_file;
use spritegen::{write_png, Config};

const PLAYER: &str = include_str!("../art/player.sprite.md");
const TILES: &str = include_str!("../art/tiles.sprite.md");

// -- Parsing benchmarks --

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    group.bench_function("parse_player", |b| {
        b.iter(|| parse_sprite_file(black_box(PLAYER)).unwrap())
    });

    group.bench_function("parse_tiles", |b| {
        b.iter(|| parse_sprite_file(black_box(TILES)).unwrap())
    });

    group.bench_function("load_builtin_catalog", |b| {
        b.iter(|| Catalog::builtin().unwrap())
    });

    group.finish();
}

// -- Rendering benchmarks --

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    let catalog = Catalog::builtin().unwrap();
    let (procedural, descriptors): (Vec<_>, Vec<_>) = catalog
        .assets()
        .iter()
        .partition(|a| matches!(a.source, AssetSource::Procedural { .. }));

    group.bench_function("render_descriptors", |b| {
        b.iter(|| {
            for asset in &descriptors {
                black_box(catalog.render(asset, None).unwrap());
            }
        })
    });

    group.bench_function("render_procedural", |b| {
        b.iter(|| {
            for asset in &procedural {
                black_box(catalog.render(asset, None).unwrap());
            }
        })
    });

    let tree = catalog
        .assets()
        .iter()
        .find(|a| a.name == "tree")
        .unwrap();
    group.bench_function("render_tree_reseeded", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            catalog.render(black_box(tree), Some(seed)).unwrap()
        })
    });

    group.finish();
}

// -- Full build benchmark --

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(20);

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        output: dir.path().to_path_buf(),
        ..Default::default()
    };
    let catalog = config.catalog().unwrap();
    let layout: Layout = config.layout();
    for group_name in spritegen::AssetGroup::ALL {
        std::fs::create_dir_all(layout.dir(group_name)).unwrap();
    }

    group.bench_function("write_all_pngs", |b| {
        b.iter(|| {
            for asset in catalog.assets() {
                let canvas = catalog.render(asset, None).unwrap();
                write_png(&canvas, &catalog.output_path(asset, &layout), 1).unwrap();
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_rendering, bench_build);
criterion_main!(benches);
