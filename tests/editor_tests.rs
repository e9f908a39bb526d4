//! Editor Tick Tests
//!
//! End-to-end: a MemoryStore-backed editor driven purely through the input
//! snapshot — load, click-to-pick, drag, undo, save, dialog highlight
//! reconciliation, and the degraded-start failure mode.

use glam::{Vec2, Vec3};
use loam::persist::{ChunkRecord, MemoryStore, SceneObjectRecord};
use loam::{
    ButtonState, DialogState, Editor, Key, MouseButton, TERRAIN_RESOLUTION, Viewport,
};

const DT: f32 = 1.0 / 60.0;
const CENTER: Vec2 = Vec2::new(400.0, 300.0);

fn object_record(id: i32, x: f64, z: f64) -> SceneObjectRecord {
    SceneObjectRecord {
        id,
        name: format!("object_{id}"),
        pos_x: x,
        pos_z: z,
        sca_x: 1.0,
        sca_y: 1.0,
        sca_z: 1.0,
        editor_render: 1,
        ..Default::default()
    }
}

fn chunk_record(heightmap_path: &std::path::Path) -> ChunkRecord {
    ChunkRecord {
        id: 0,
        name: "chunk0".into(),
        chunk_x_size_metres: 512,
        chunk_y_size_metres: 512,
        chunk_base_resolution: TERRAIN_RESOLUTION as i32,
        heightmap_path: heightmap_path.display().to_string(),
        tex_diffuse_tiling: 1,
        ..Default::default()
    }
}

/// Editor over a shared-handle store, camera aimed down at the origin so
/// the screen-center ray lands on an object at (0, 0, 0).
fn editor_with(objects: Vec<SceneObjectRecord>, chunk: Option<ChunkRecord>) -> (Editor, MemoryStore) {
    let store = MemoryStore::new(objects, chunk);
    let handle = store.share();

    let mut editor = Editor::new(Box::new(store), Viewport::new(800.0, 600.0));
    editor.load();

    editor.camera.position = Vec3::new(0.0, 10.0, 10.0);
    editor.camera.yaw_degrees = 0.0;
    editor.camera.pitch_degrees = -45.0;

    (editor, handle)
}

fn tick(editor: &mut Editor) {
    editor.tick(DialogState::Closed, DT);
}

fn click_at(editor: &mut Editor, screen: Vec2) {
    editor.input.inject_mouse_position(screen.x, screen.y);
    editor.input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
    tick(editor);
}

fn release_mouse(editor: &mut Editor) {
    editor.input.inject_mouse_button(MouseButton::Left, ButtonState::Released);
    tick(editor);
}

fn chord(editor: &mut Editor, key: Key) {
    editor.input.inject_key(Key::ControlLeft, ButtonState::Pressed);
    editor.input.inject_key(key, ButtonState::Pressed);
    tick(editor);
    editor.input.inject_key(Key::ControlLeft, ButtonState::Released);
    editor.input.inject_key(key, ButtonState::Released);
    tick(editor);
}

// ============================================================================
// Load
// ============================================================================

#[test]
fn load_builds_registry_from_store() {
    let (editor, _) = editor_with(vec![object_record(1, 0.0, 0.0), object_record(2, 30.0, 0.0)], None);
    assert_eq!(editor.registry.len(), 2);
    assert_eq!(editor.selection(), None);
}

#[test]
fn unavailable_store_degrades_to_empty_scene() {
    let store = loam::JsonSceneStore::new("/nowhere/scene.json");
    // Load must not panic and must leave an empty registry.
    let mut editor = Editor::new(Box::new(store), Viewport::new(800.0, 600.0));
    editor.load();

    assert!(editor.registry.is_empty());
    assert_eq!(editor.selection(), None);
}

#[test]
fn load_pulls_chunk_and_heightmap() {
    let path = std::env::temp_dir().join("loam_test_editor_chunk.raw");
    std::fs::write(&path, vec![64u8; TERRAIN_RESOLUTION * TERRAIN_RESOLUTION]).unwrap();

    let (editor, _) = editor_with(vec![], Some(chunk_record(&path)));

    assert_eq!(editor.terrain.resolution(), TERRAIN_RESOLUTION);
    let vertex = editor.terrain.vertex(10, 10);
    assert!((vertex.position.y - 16.0).abs() < 1e-4);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_heightmap_leaves_terrain_flat_but_running() {
    let path = std::env::temp_dir().join("loam_test_editor_chunk_missing.raw");
    let (editor, _) = editor_with(vec![object_record(1, 0.0, 0.0)], Some(chunk_record(&path)));

    // Scene is intact and the terrain kept its zeroed samples.
    assert_eq!(editor.registry.len(), 1);
    assert!(editor.terrain.positions().iter().all(|p| p.y.abs() < 1e-6));
}

// ============================================================================
// Pick, Drag, Undo
// ============================================================================

#[test]
fn click_selects_object_under_cursor() {
    let (mut editor, _) = editor_with(vec![object_record(1, 0.0, 0.0)], None);

    click_at(&mut editor, CENTER);
    assert_eq!(editor.selection(), Some(1));
    assert_eq!(editor.selection_sentinel(), 1);

    release_mouse(&mut editor);
}

#[test]
fn click_on_empty_space_clears_selection() {
    let (mut editor, _) = editor_with(vec![object_record(1, 200.0, 200.0)], None);

    click_at(&mut editor, CENTER);
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.selection_sentinel(), loam::NO_OBJECT);
}

#[test]
fn drag_moves_object_and_undo_restores_it() {
    let (mut editor, _) = editor_with(vec![object_record(1, 0.0, 0.0)], None);

    click_at(&mut editor, CENTER);
    assert_eq!(editor.selection(), Some(1));

    // Drag right across several frames.
    for step in 1..=5 {
        editor
            .input
            .inject_mouse_position(CENTER.x + (step as f32) * 30.0, CENTER.y);
        tick(&mut editor);
    }
    release_mouse(&mut editor);

    let moved = editor.registry.get(1).unwrap().transform.position;
    assert!(moved.x > 0.5, "drag should pull the object along +x, got {moved:?}");
    assert!(moved.y.abs() < 1e-9, "drag stays in the horizontal plane");

    // The whole drag is one history entry.
    assert_eq!(editor.edit_log().history_len(), 1);

    chord(&mut editor, Key::Z);
    let restored = editor.registry.get(1).unwrap().transform.position;
    assert!(restored.x.abs() < 1e-9);

    chord(&mut editor, Key::Y);
    let redone = editor.registry.get(1).unwrap().transform.position;
    assert!((redone.x - moved.x).abs() < 1e-9);
}

#[test]
fn delete_key_removes_selection_once() {
    let (mut editor, _) = editor_with(vec![object_record(1, 0.0, 0.0)], None);

    editor.set_selection(Some(1));
    editor.input.inject_key(Key::Delete, ButtonState::Pressed);
    tick(&mut editor);

    assert!(editor.registry.is_empty());
    assert_eq!(editor.selection(), None, "selection clears with the object");

    // Held delete must not eat the undo history with repeat fires.
    tick(&mut editor);
    tick(&mut editor);
    assert_eq!(editor.edit_log().history_len(), 1);
}

#[test]
fn copy_paste_through_the_keyboard() {
    let (mut editor, _) = editor_with(vec![object_record(1, 0.0, 0.0)], None);

    click_at(&mut editor, CENTER);
    release_mouse(&mut editor);

    chord(&mut editor, Key::C);
    chord(&mut editor, Key::V);

    assert_eq!(editor.registry.len(), 2);
    let ids: Vec<i32> = editor.registry.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

// ============================================================================
// Save
// ============================================================================

#[test]
fn ctrl_s_saves_through_the_store() {
    let (mut editor, handle) = editor_with(vec![object_record(1, 0.0, 0.0)], None);

    // Move the object, then save with the keyboard.
    click_at(&mut editor, CENTER);
    editor.input.inject_mouse_position(CENTER.x + 120.0, CENTER.y);
    tick(&mut editor);
    release_mouse(&mut editor);

    editor.input.inject_key(Key::ControlLeft, ButtonState::Pressed);
    editor.input.inject_key(Key::S, ButtonState::Pressed);
    tick(&mut editor);

    let saved = handle.objects();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].pos_x > 0.5, "persisted row reflects the move");

    // The save flow cleared its chord keys.
    assert!(!editor.input.key(Key::ControlLeft));
    assert!(!editor.input.key(Key::S));
}

#[test]
fn save_is_a_full_table_replace() {
    let (mut editor, handle) =
        editor_with(vec![object_record(1, 0.0, 0.0), object_record(2, 30.0, 0.0)], None);

    click_at(&mut editor, CENTER);
    release_mouse(&mut editor);
    editor.input.inject_key(Key::Delete, ButtonState::Pressed);
    tick(&mut editor);
    editor.input.inject_key(Key::Delete, ButtonState::Released);

    editor.save_scene().unwrap();
    let saved = handle.objects();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, 2);
}

// ============================================================================
// Dialog
// ============================================================================

#[test]
fn dialog_highlight_follows_live_selection() {
    let (mut editor, _) = editor_with(
        vec![object_record(1, 0.0, 0.0), object_record(2, 30.0, 0.0)],
        None,
    );

    editor.set_selection(Some(2));
    editor.tick(
        DialogState::Open {
            previous_highlight: Some(1),
        },
        DT,
    );

    assert!(!editor.registry.get(1).unwrap().highlighted());
    assert!(editor.registry.get(2).unwrap().highlighted());
}

#[test]
fn clicks_do_not_pick_while_dialog_open() {
    let (mut editor, _) = editor_with(vec![object_record(1, 0.0, 0.0)], None);

    editor.input.inject_mouse_position(CENTER.x, CENTER.y);
    editor.input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
    editor.tick(
        DialogState::Open {
            previous_highlight: None,
        },
        DT,
    );

    assert_eq!(editor.selection(), None);
}

#[test]
fn set_selection_rejects_unknown_ids() {
    let (mut editor, _) = editor_with(vec![object_record(1, 0.0, 0.0)], None);

    editor.set_selection(Some(99));
    assert_eq!(editor.selection(), None);

    editor.set_selection(Some(1));
    assert_eq!(editor.selection(), Some(1));
}

// ============================================================================
// Wireframe
// ============================================================================

#[test]
fn digit_one_toggles_wireframe_once_per_press() {
    let (mut editor, _) = editor_with(vec![], None);
    assert!(!editor.wireframe());

    editor.input.inject_key(Key::Key1, ButtonState::Pressed);
    tick(&mut editor);
    tick(&mut editor);
    assert!(editor.wireframe(), "held key toggles exactly once");
    assert!(editor.terrain.render_wireframe);

    editor.input.inject_key(Key::Key1, ButtonState::Released);
    tick(&mut editor);
    editor.input.inject_key(Key::Key1, ButtonState::Pressed);
    tick(&mut editor);
    assert!(!editor.wireframe());
}
