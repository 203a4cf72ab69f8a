use glam::Vec3;
use std::ops::Range;

/// Flat `[x0, y0, z0, x1, y1, z1, ...]` position storage with an upload flag.
///
/// Writes happen in place and set `needs_upload`; the renderer clears it with
/// [`PositionBuffer::mark_uploaded`] once it has copied the data.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionBuffer {
    data: Vec<f32>,
    needs_upload: bool,
}

impl PositionBuffer {
    /// A buffer for `count` points, all at the origin. Starts dirty so the
    /// first frame uploads it.
    pub fn zeroed(count: usize) -> Self {
        Self {
            data: vec![0.0; count * 3],
            needs_upload: true,
        }
    }

    /// Number of floats (three per point).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn particle_count(&self) -> usize {
        self.data.len() / 3
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        let xyz = self.data.get(point_range(index)?)?;
        Some(Vec3::new(xyz[0], xyz[1], xyz[2]))
    }

    /// Overwrite point `index`. Out-of-range writes are ignored and return `false`.
    pub fn set(&mut self, index: usize, position: Vec3) -> bool {
        match point_range(index).and_then(|r| self.data.get_mut(r)) {
            Some(xyz) => {
                xyz.copy_from_slice(&position.to_array());
                self.needs_upload = true;
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw bytes for a GPU vertex upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.data
            .chunks_exact(3)
            .map(|xyz| Vec3::new(xyz[0], xyz[1], xyz[2]))
    }

    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    pub fn mark_uploaded(&mut self) {
        self.needs_upload = false;
    }
}

fn point_range(index: usize) -> Option<Range<usize>> {
    let start = index.checked_mul(3)?;
    Some(start..start.checked_add(3)?)
}
