//! Entry point for Zorya3D.
//! A2: logging + CLI flags, headless scene walk: load a scene description,
//! build vertex buffers and trajectories, then step the animation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asset::flatten::{self, VertexBuffer, VertexLayout};
use asset::scene::ObjectDesc;
use asset::{mtl, obj};
use corelib::Vec3;
use corelib::curve::Trajectory;
use corelib::scene::{Renderable, Scene, SceneObject};
use corelib::transform::Transform;

fn parse_scene_arg() -> PathBuf {
    // Accept: --scene=path/to/scene.json
    let mut path = PathBuf::from("assets/scene.json");
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--scene=") {
            path = PathBuf::from(val);
        }
    }
    path
}

fn parse_layout_arg() -> VertexLayout {
    // Accept: --vertex-layout=pos-uv|pos-uv-normal, по умолчанию pos-uv-normal
    let mut layout = VertexLayout::PositionUvNormal;
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--vertex-layout=") {
            layout = match val.to_ascii_lowercase().as_str() {
                "pos-uv" => VertexLayout::PositionUv,
                "pos-uv-normal" => VertexLayout::PositionUvNormal,
                other => {
                    eprintln!("[warn] Unknown vertex layout '{}', keeping pos-uv-normal.", other);
                    VertexLayout::PositionUvNormal
                }
            };
        }
    }
    layout
}

fn parse_ticks_arg() -> u32 {
    let mut ticks = 300;
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--ticks=") {
            if let Ok(parsed) = val.parse::<u32>() {
                ticks = parsed;
            }
        }
    }
    ticks
}

fn parse_dt_arg() -> f32 {
    let mut dt = 1.0 / 60.0;
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--dt=") {
            if let Ok(parsed) = val.parse::<f32>() {
                if parsed > 0.0 {
                    dt = parsed;
                }
            }
        }
    }
    dt
}

/// Build the runtime object and vertex buffer for one scene entry.
fn setup_object(
    base_dir: &Path,
    desc: &ObjectDesc,
    layout: VertexLayout,
    buffer_index: usize,
) -> Result<(SceneObject, VertexBuffer)> {
    let obj_path = base_dir.join(&desc.object_path);
    let mesh = obj::load_obj_from_path(&obj_path)?;

    let buffer = flatten::flatten(&mesh, layout)
        .with_context(|| format!("Failed to flatten {}", obj_path.display()))?;
    log::info!(
        "{}: {} bytes ({} vertices emitted, {} sized for the draw call)",
        desc.object_path,
        buffer.as_bytes().len(),
        buffer.emitted_vertex_count(),
        flatten::draw_vertex_count(&mesh)
    );

    let mtl_path = base_dir.join(&desc.material_path);
    let material = mtl::load_mtl_from_path(&mtl_path)?;
    if let Some(texture) = material.resolve_diffuse(mtl_path.parent().unwrap_or(base_dir)) {
        log::info!("{}: diffuse texture {}", desc.material_path, texture.display());
    }

    let control: Vec<Vec3> = desc.trajectory.iter().copied().map(Vec3::from).collect();
    let trajectory = Trajectory::from_control_points(&control, desc.speed);
    if !control.is_empty() && trajectory.is_none() {
        log::warn!(
            "{}: trajectory with {} point(s) stays inactive",
            desc.object_path,
            control.len()
        );
    }

    let object = SceneObject {
        transform: Transform::from_trs(
            Vec3::from(desc.position),
            Vec3::from(desc.rotation),
            desc.scale,
        ),
        spin: [desc.rotate_x, desc.rotate_y, desc.rotate_z],
        trajectory,
        renderable: Some(Renderable { buffer: buffer_index }),
    };
    Ok((object, buffer))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene_path = parse_scene_arg();
    let layout = parse_layout_arg();
    let ticks = parse_ticks_arg();
    let dt = parse_dt_arg();
    log::info!(
        "Starting Zorya3D. scene={}, layout={:?}, ticks={}, dt={:.4}",
        scene_path.display(),
        layout,
        ticks,
        dt
    );

    let desc = asset::scene::load_scene_from_path(&scene_path)?;
    let base_dir = scene_path.parent().unwrap_or(Path::new(".")).to_path_buf();

    let mut objects = Vec::with_capacity(desc.objects.len());
    let mut buffers = Vec::with_capacity(desc.objects.len());
    for (index, entry) in desc.objects.iter().enumerate() {
        let (object, buffer) = setup_object(&base_dir, entry, layout, index)?;
        objects.push(object);
        buffers.push(buffer);
    }
    let total_bytes: usize = buffers.iter().map(|b| b.as_bytes().len()).sum();
    log::info!("{} vertex buffer(s), {} bytes total", buffers.len(), total_bytes);

    let mut scene = Scene::new(objects);
    // Watch the last object; in the sample scene that is the traveling one.
    scene.select(scene.len().saturating_sub(1));
    for tick in 0..ticks {
        scene.advance(dt);
        if tick % 60 == 0 {
            if let Some(object) = scene.selected() {
                let p = object.transform.translation;
                log::info!(
                    "tick {:>4}: object {} at [{:.3}, {:.3}, {:.3}]",
                    tick,
                    scene.selected_index() + 1,
                    p.x,
                    p.y,
                    p.z
                );
            }
        }
    }

    if let Some(object) = scene.selected() {
        let p = object.transform.translation;
        log::info!(
            "Finished after {} ticks; object {} at [{:.3}, {:.3}, {:.3}]",
            ticks,
            scene.selected_index() + 1,
            p.x,
            p.y,
            p.z
        );
    }
    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
