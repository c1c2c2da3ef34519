//! Flat vertex-buffer production from face-indexed mesh data.

use anyhow::{Result, anyhow};

use crate::mesh::MeshData;

/// Interleaved attribute layouts understood by the draw pipelines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexLayout {
    /// position.xyz + texcoord.uv
    PositionUv,
    /// position.xyz + texcoord.uv + normal.xyz
    PositionUvNormal,
}

impl VertexLayout {
    /// Floats emitted per vertex.
    #[inline]
    pub const fn floats_per_vertex(self) -> usize {
        match self {
            Self::PositionUv => 5,
            Self::PositionUvNormal => 8,
        }
    }

    /// Byte stride of one vertex in the flat buffer.
    #[inline]
    pub const fn stride(self) -> usize {
        self.floats_per_vertex() * std::mem::size_of::<f32>()
    }
}

/// Flat interleaved vertex data, ready for a GPU buffer upload.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexBuffer {
    pub layout: VertexLayout,
    pub data: Vec<f32>,
}

impl VertexBuffer {
    /// Number of vertices actually emitted into the buffer.
    #[inline]
    pub fn emitted_vertex_count(&self) -> usize {
        self.data.len() / self.layout.floats_per_vertex()
    }

    /// Raw bytes for the upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Emit the mesh face-by-face, vertex-by-vertex in face order.
///
/// Faces are written out verbatim: no fan expansion happens here, so a draw
/// call sized with [`draw_vertex_count`] matches this buffer only when every
/// face is already a triangle. A missing texcoord index (or missing normal
/// index for [`VertexLayout::PositionUvNormal`]) is fatal; nothing is
/// substituted.
pub fn flatten(mesh: &MeshData, layout: VertexLayout) -> Result<VertexBuffer> {
    let corners: usize = mesh.faces.iter().map(Vec::len).sum();
    let mut data = Vec::with_capacity(corners * layout.floats_per_vertex());

    for (face_no, face) in mesh.faces.iter().enumerate() {
        for corner in face {
            let position = mesh.positions.get(corner.position).ok_or_else(|| {
                anyhow!(
                    "Position index {} out of bounds in face {}",
                    corner.position,
                    face_no + 1
                )
            })?;
            data.extend_from_slice(position);

            let uv_index = corner.texcoord.ok_or_else(|| {
                anyhow!("Face {} has no texture coordinate index", face_no + 1)
            })?;
            let uv = mesh.texcoords.get(uv_index).ok_or_else(|| {
                anyhow!(
                    "Texcoord index {} out of bounds in face {}",
                    uv_index,
                    face_no + 1
                )
            })?;
            data.extend_from_slice(uv);

            if layout == VertexLayout::PositionUvNormal {
                let normal_index = corner
                    .normal
                    .ok_or_else(|| anyhow!("Face {} has no normal index", face_no + 1))?;
                let normal = mesh.normals.get(normal_index).ok_or_else(|| {
                    anyhow!(
                        "Normal index {} out of bounds in face {}",
                        normal_index,
                        face_no + 1
                    )
                })?;
                data.extend_from_slice(normal);
            }
        }
    }

    Ok(VertexBuffer { layout, data })
}

/// Vertex count for sizing the draw call, assuming faces get fan-triangulated:
/// 3 per triangle, 6 per quad, 3 * (n - 2) for an n-gon. Degenerate faces
/// contribute nothing.
///
/// [`flatten`] does not perform that expansion, so the two numbers agree only
/// for fully triangulated meshes.
pub fn draw_vertex_count(mesh: &MeshData) -> usize {
    mesh.faces
        .iter()
        .map(|face| match face.len() {
            0..=2 => 0,
            n => 3 * (n - 2),
        })
        .sum()
}
