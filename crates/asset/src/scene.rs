//! Scene description files: a JSON document naming objects, their assets
//! and their initial placement.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level scene document.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SceneDesc {
    pub objects: Vec<ObjectDesc>,
}

/// One object entry. Asset paths are relative to the scene file's directory;
/// resolving them is the caller's job.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDesc {
    pub object_path: String,
    pub material_path: String,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub rotate_x: bool,
    #[serde(default)]
    pub rotate_y: bool,
    #[serde(default)]
    pub rotate_z: bool,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Bezier control points; fewer than four leave the object static.
    #[serde(default)]
    pub trajectory: Vec<[f32; 3]>,
}

fn default_scale() -> f32 {
    1.0
}

fn default_speed() -> f32 {
    0.01
}

/// Load and deserialize a scene description.
pub fn load_scene_from_path(path: impl AsRef<Path>) -> Result<SceneDesc> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
    let scene = load_scene_from_str(&text)
        .with_context(|| format!("Failed to parse scene file: {}", path.display()))?;
    log::info!(
        "Loaded scene with {} object(s) from {}",
        scene.objects.len(),
        path.display()
    );
    Ok(scene)
}

/// Deserialize a scene description from JSON text.
pub fn load_scene_from_str(contents: &str) -> Result<SceneDesc> {
    Ok(serde_json::from_str(contents)?)
}
