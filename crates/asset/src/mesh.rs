//! CPU-side mesh representation used by loaders.

/// One corner of a face: indices into the mesh attribute arrays (0-based).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

impl FaceVertex {
    pub fn new(position: usize, texcoord: Option<usize>, normal: Option<usize>) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

/// A polygon face in source winding order. Not triangulated.
pub type Face = Vec<FaceVertex>;

/// Face-indexed mesh: flat attribute arrays plus faces referencing them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub faces: Vec<Face>,
}

impl MeshData {
    /// Returns `true` if the mesh has geometry and every face index resolves
    /// within its attribute array.
    pub fn is_valid(&self) -> bool {
        if self.positions.is_empty() || self.faces.is_empty() {
            return false;
        }
        self.faces.iter().flatten().all(|corner| {
            corner.position < self.positions.len()
                && corner.texcoord.is_none_or(|i| i < self.texcoords.len())
                && corner.normal.is_none_or(|i| i < self.normals.len())
        })
    }
}
