//! End-to-end generation tests: descriptors and generators through to PNG
//! files on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use walkdir::WalkDir;

use spritegen::catalog::{AssetSource, Catalog, Layout};
use spritegen::cli::{build, verify};
use spritegen::output::Printer;
use spritegen::parser::parse_sprite_file;
use spritegen::{mirror_horizontal, read_png, validate_catalog, write_png, AssetGroup, Canvas, Colour, Config};

fn config_for(output: &Path) -> Config {
    Config {
        output: output.to_path_buf(),
        ..Default::default()
    }
}

fn read_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e.path().strip_prefix(root).unwrap().to_path_buf();
            (relative, fs::read(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn full_build_is_byte_identical_across_runs() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    let written = build::build(&config_for(&first), &[], &[], &Printer::plain()).unwrap();
    build::build(&config_for(&second), &[], &[], &Printer::plain()).unwrap();

    let a = read_tree(&first);
    let b = read_tree(&second);
    assert_eq!(a.len(), written.len());
    assert_eq!(a.keys().collect::<Vec<_>>(), b.keys().collect::<Vec<_>>());
    for (path, bytes) in &a {
        assert!(bytes == &b[path], "{} differs between runs", path.display());
    }
}

#[test]
fn filled_tile_is_solid_red_after_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("red.png");
    let red = Colour::rgb(255, 0, 0);

    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.fill_rect(0, 0, 16, 16, red);
    write_png(&canvas, &path, 1).unwrap();

    let reloaded = read_png(&path).unwrap();
    assert_eq!(reloaded.size(), (16, 16));
    assert!(reloaded.pixels().iter().all(|&c| c == red));
}

#[test]
fn heart_mask_keeps_its_pixels_through_png() {
    let grid = "........\n.XX..XX.\nXXXXXXXX\n.XXXXXX.\n.XXXXXX.\n..XXXX..\n........\n........\n";
    assert_eq!(grid.matches('X').count(), 28);

    let source = format!(
        "---\nname: heart\nsize: 8x8\n---\n\n```px\n{}```\n\n---\nX: #E02020\n",
        grid
    );
    let file = parse_sprite_file(&source).unwrap();
    let catalog = Catalog::from_files(vec![(AssetGroup::Ui, file)]).unwrap();
    let heart = catalog.get(AssetGroup::Ui, "heart").unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("heart.png");
    write_png(&catalog.render(heart, None).unwrap(), &path, 1).unwrap();

    let reloaded = read_png(&path).unwrap();
    assert_eq!(reloaded.size(), (8, 8));
    assert_eq!(reloaded.opaque_count(), 28);
    assert!(reloaded.get(0, 0).is_transparent());
    assert_eq!(reloaded.get(1, 1), Colour::rgb(0xE0, 0x20, 0x20));
}

#[test]
fn corner_pixel_mirrors_to_opposite_corner() {
    let row = format!("P{}", ".".repeat(15));
    let source = format!(
        "---\nname: look_left\nsize: 16x1\n---\n\n```px\n{}\n```\n\n---\nP: #FFFFFF\n\n---\nname: look_right\nmirror: look_left\n---\n",
        row
    );
    let file = parse_sprite_file(&source).unwrap();
    let catalog = Catalog::from_files(vec![(AssetGroup::Player, file)]).unwrap();

    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path());
    fs::create_dir_all(layout.dir(AssetGroup::Player)).unwrap();

    let right = catalog.get(AssetGroup::Player, "look_right").unwrap();
    let path = catalog.output_path(right, &layout);
    write_png(&catalog.render(right, None).unwrap(), &path, 1).unwrap();

    let reloaded = read_png(&path).unwrap();
    assert_eq!(reloaded.get(15, 0), Colour::WHITE);
    assert_eq!(reloaded.opaque_count(), 1);
}

#[test]
fn builtin_mirrors_match_their_sources() {
    let catalog = Catalog::builtin().unwrap();
    let mut pairs = 0;

    for asset in catalog.assets() {
        let AssetSource::Descriptor(def) = &asset.source else {
            continue;
        };
        let Some(source_name) = def.mirror_source() else {
            continue;
        };
        let source = catalog.get(asset.group, source_name).unwrap();

        let mirrored = catalog.render(asset, None).unwrap();
        let original = catalog.render(source, None).unwrap();

        assert_eq!(asset.size, source.size, "{}", asset.name);
        assert!(mirrored == mirror_horizontal(&original), "{}", asset.name);
        assert!(mirror_horizontal(&mirrored) == original, "{}", asset.name);
        pairs += 1;
    }

    assert!(pairs > 0);
}

#[test]
fn builtin_catalog_validates_cleanly() {
    let result = validate_catalog(&Catalog::builtin().unwrap());
    let errors: Vec<String> = result
        .iter()
        .filter(|d| d.is_error())
        .map(|d| d.to_string())
        .collect();

    assert_eq!(errors, Vec::<String>::new());
}

#[test]
fn cli_build_then_verify() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("spritegen.yaml");
    fs::write(
        &config_path,
        "scale: 2\ngroups:\n  tiles: tileset\n",
    )
    .unwrap();
    let output = dir.path().join("out");

    build::run(
        build::BuildArgs {
            names: vec![],
            output: Some(output.clone()),
            groups: vec![AssetGroup::Tiles, AssetGroup::Ui],
            scale: None,
            seed: Some(42),
            config: Some(config_path.clone()),
            watch: false,
        },
        &Printer::plain(),
    )
    .unwrap();

    let tree = read_png(&output.join("tileset/tree.png")).unwrap();
    assert_eq!(tree.size(), (32, 32));
    assert!(output.join("sprites/ui").is_dir());
    assert!(!output.join("sprites/player").exists());

    let verify_args = || verify::VerifyArgs {
        output: Some(output.clone()),
        scale: None,
        config: Some(config_path.clone()),
    };

    // Only two groups were built, so the rest are missing.
    assert!(verify::run(verify_args(), &Printer::plain()).is_err());

    build::run(
        build::BuildArgs {
            names: vec![],
            output: Some(output.clone()),
            groups: vec![],
            scale: None,
            seed: None,
            config: Some(config_path.clone()),
            watch: false,
        },
        &Printer::plain(),
    )
    .unwrap();

    verify::run(verify_args(), &Printer::plain()).unwrap();
}
