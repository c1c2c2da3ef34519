//! Asset parsing (meshes, materials, scene descriptions).
//! E1: OBJ/MTL text in, face-indexed mesh data and material records out.
//! E2: flat interleaved vertex buffers for GPU upload.

pub mod flatten;
pub mod mesh;
pub mod mtl;
pub mod obj;
pub mod scene;
