//! A complete editing session without a window.
//!
//! Builds a small scene store and heightmap on disk, loads them, simulates
//! the input for a pick-and-drag, undoes it, and saves everything back.
//!
//! Run with: `cargo run --example headless_session`

use anyhow::Context;
use glam::Vec2;
use loam::{
    ButtonState, ChunkRecord, DialogState, Editor, JsonSceneStore, Key, MouseButton,
    SceneObjectRecord, TERRAIN_RESOLUTION, Viewport,
};

const DT: f32 = 1.0 / 60.0;

fn tick(editor: &mut Editor) {
    editor.tick(DialogState::Closed, DT);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let dir = std::env::temp_dir().join("loam_headless_session");
    std::fs::create_dir_all(&dir).context("create session dir")?;

    // A flat heightmap with a gentle ramp on one edge.
    let heightmap_path = dir.join("chunk0.raw");
    let mut samples = vec![0u8; TERRAIN_RESOLUTION * TERRAIN_RESOLUTION];
    for (row, chunk) in samples.chunks_mut(TERRAIN_RESOLUTION).enumerate() {
        for (col, sample) in chunk.iter_mut().enumerate() {
            *sample = ((row + col) / 4).min(255) as u8;
        }
    }
    std::fs::write(&heightmap_path, &samples).context("write heightmap")?;

    // One crate-sized object sitting on the origin.
    let object = SceneObjectRecord {
        id: 1,
        name: "crate_small".into(),
        model_path: "models/crate_small.cmo".into(),
        tex_diffuse_path: "textures/crate_small.dds".into(),
        sca_x: 1.0,
        sca_y: 1.0,
        sca_z: 1.0,
        editor_render: 1,
        ..Default::default()
    };
    let chunk = ChunkRecord {
        id: 0,
        name: "chunk0".into(),
        chunk_x_size_metres: 512,
        chunk_y_size_metres: 512,
        chunk_base_resolution: TERRAIN_RESOLUTION as i32,
        heightmap_path: heightmap_path.display().to_string(),
        tex_diffuse_tiling: 1,
        ..Default::default()
    };

    let store = JsonSceneStore::create(
        dir.join("scene.json"),
        &loam::persist::SceneDocument {
            objects: vec![object],
            chunk: Some(chunk),
        },
    )?;

    let mut editor = Editor::new(Box::new(store), Viewport::new(1280.0, 720.0));
    editor.load();
    log::info!(
        "session up: {} objects, terrain {}x{}",
        editor.registry.len(),
        editor.terrain.resolution(),
        editor.terrain.resolution()
    );

    // Aim down at the origin so the screen center ray lands on the object.
    editor.camera.position = glam::Vec3::new(0.0, 10.0, 10.0);
    editor.camera.yaw_degrees = 0.0;
    editor.camera.pitch_degrees = -45.0;

    // Click the screen center: picks object 1 and starts a drag.
    let center = Vec2::new(640.0, 360.0);
    editor.input.inject_mouse_position(center.x, center.y);
    editor.input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
    tick(&mut editor);
    log::info!("picked object {:?}", editor.selection());

    // Drag right, then release.
    editor.input.inject_mouse_position(center.x + 200.0, center.y);
    tick(&mut editor);
    editor.input.inject_mouse_button(MouseButton::Left, ButtonState::Released);
    tick(&mut editor);

    let moved = editor.registry.get(1).context("object 1 missing")?;
    log::info!("object 1 now at {:?}", moved.transform.position);

    // One ctrl+Z puts the whole drag back.
    editor.input.inject_key(Key::ControlLeft, ButtonState::Pressed);
    editor.input.inject_key(Key::Z, ButtonState::Pressed);
    tick(&mut editor);
    editor.input.inject_key(Key::ControlLeft, ButtonState::Released);
    editor.input.inject_key(Key::Z, ButtonState::Released);
    tick(&mut editor);

    let restored = editor.registry.get(1).context("object 1 missing")?;
    log::info!("after undo, object 1 at {:?}", restored.transform.position);

    editor.save_scene()?;
    editor.save_terrain()?;
    log::info!("scene and terrain saved under {}", dir.display());

    Ok(())
}
