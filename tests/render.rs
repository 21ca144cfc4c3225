use chromatrace::output::save_image;
use chromatrace::random::new_rng;
use chromatrace::scene::DEFAULT_BACKGROUND;
use chromatrace::{load_scene, parse_scene, Sampler, TraceError};

const RED_SPHERE_SCENE: &str = r#"{
    "antialias": 1,
    "light": [0.5, -0.5, 3.0],
    "camera": [0.5, -1.0, 0.5],
    "objects": [
        {"type": "sphere", "color": [255, 0, 0], "reflectivity": 0,
         "center": [0.5, 0, 0.5], "radius": 0.2},
        {"type": "plane", "color": [200, 200, 200], "reflectivity": 0.3,
         "point": [0, 0, -10], "normal": [0, 0, 1], "checkerboard": true,
         "color2": [40, 40, 40], "orientation": [1, 0, 0]}
    ]
}"#;

fn background_rgba() -> [u8; 4] {
    [
        DEFAULT_BACKGROUND.x as u8,
        DEFAULT_BACKGROUND.y as u8,
        DEFAULT_BACKGROUND.z as u8,
        255,
    ]
}

#[test]
fn test_red_sphere_over_ground() {
    let desc = parse_scene(RED_SPHERE_SCENE).unwrap();
    let mut sampler = Sampler::new(8, 8, desc.antialias, new_rng(Some(2024)));
    let image = sampler.render(&desc.scene);
    assert_eq!(image.dimensions(), (8, 8));

    // The upper half looks up and away from both shapes.
    for x in 0..8 {
        assert_eq!(image.get_pixel(x, 0).0, background_rgba(), "top row, x = {x}");
    }
    for y in 0..3 {
        assert_eq!(image.get_pixel(0, y).0, background_rgba(), "left column, y = {y}");
        assert_eq!(image.get_pixel(7, y).0, background_rgba(), "right column, y = {y}");
    }

    // The central pixels sample points inside the sphere's silhouette.
    for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        assert!(r > g, "pixel ({x}, {y}) is not red-tinted: {r} {g} {b}");
        assert_eq!(g, b, "pixel ({x}, {y})");
        assert_eq!(a, 255);
    }

    // Rows looking down reach the ground plane instead of the sky.
    assert_ne!(image.get_pixel(0, 7).0, background_rgba());
}

#[test]
fn test_fixed_seed_is_reproducible() {
    let json = RED_SPHERE_SCENE.replace("\"antialias\": 1", "\"antialias\": 4");
    let desc = parse_scene(&json).unwrap();
    assert_eq!(desc.antialias, 4);

    let a = Sampler::new(8, 8, desc.antialias, new_rng(Some(7))).render(&desc.scene);
    let b = Sampler::new(8, 8, desc.antialias, new_rng(Some(7))).render(&desc.scene);
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn test_load_render_save() {
    let dir = tempfile::tempdir().unwrap();
    let scene_path = dir.path().join("scene.json");
    let image_path = dir.path().join("out.png");
    std::fs::write(&scene_path, RED_SPHERE_SCENE).unwrap();

    let desc = load_scene(&scene_path).unwrap();
    let image = Sampler::new(8, 8, desc.antialias, new_rng(Some(1))).render(&desc.scene);
    save_image(&image, &image_path).unwrap();

    let written = image::open(&image_path).unwrap().to_rgba8();
    assert_eq!(written.as_raw(), image.as_raw());
}

#[test]
fn test_unknown_shape_fails_before_rendering() {
    let json = RED_SPHERE_SCENE.replace("\"type\": \"sphere\"", "\"type\": \"cone\"");
    let err = parse_scene(&json).unwrap_err();
    assert!(matches!(err, TraceError::SceneFormat(_)));
    assert!(err.to_string().contains("cone"));
}
