use glam::Vec3;
use spellbook_common::ObjectId;
use std::collections::BTreeMap;

/// A point cloud. Positions are local to `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    pub position: Vec3,
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub size: f32,
    /// Bumped on every upload so a GPU backend knows when to re-copy.
    pub version: u64,
}

impl Points {
    pub fn new(position: Vec3, size: f32) -> Self {
        Self {
            position,
            positions: Vec::new(),
            colors: Vec::new(),
            size,
            version: 0,
        }
    }

    /// Replace the vertex positions with raw native-endian `f32` bytes, as a
    /// GPU buffer write would. The allocation is reused when the length is
    /// unchanged. Returns `false` and leaves the points untouched when `bytes`
    /// is not a whole number of floats.
    pub fn upload(&mut self, bytes: &[u8]) -> bool {
        if bytes.len() % size_of::<f32>() != 0 {
            return false;
        }
        self.positions.resize(bytes.len() / size_of::<f32>(), 0.0);
        bytemuck::cast_slice_mut::<f32, u8>(&mut self.positions).copy_from_slice(bytes);
        self.version += 1;
        true
    }

    pub fn point_count(&self) -> usize {
        self.positions.len() / 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MeshMaterial {
    Standard { color: Vec3 },
    /// Procedural material evaluated in a shader from elapsed time.
    Shader { name: String, time: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub position: Vec3,
    pub scale: Vec3,
    pub material: MeshMaterial,
}

/// Everything the scene graph can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    Points(Points),
    PointLight(PointLight),
    DirectionalLight(DirectionalLight),
    Mesh(Mesh),
}

impl SceneObject {
    pub fn position(&self) -> Vec3 {
        match self {
            Self::Points(p) => p.position,
            Self::PointLight(l) => l.position,
            Self::DirectionalLight(l) => l.position,
            Self::Mesh(m) => m.position,
        }
    }

    fn position_mut(&mut self) -> &mut Vec3 {
        match self {
            Self::Points(p) => &mut p.position,
            Self::PointLight(l) => &mut l.position,
            Self::DirectionalLight(l) => &mut l.position,
            Self::Mesh(m) => &mut m.position,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Points(_) => "points",
            Self::PointLight(_) => "point_light",
            Self::DirectionalLight(_) => "directional_light",
            Self::Mesh(_) => "mesh",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub visible: bool,
    pub object: SceneObject,
}

/// Retained scene graph.
///
/// Objects are keyed by [`ObjectId`] and iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<ObjectId, SceneNode>,
    order: Vec<ObjectId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visible object and return its id.
    pub fn add(&mut self, name: impl Into<String>, object: SceneObject) -> ObjectId {
        let id = ObjectId::new();
        let node = SceneNode {
            name: name.into(),
            visible: true,
            object,
        };
        tracing::debug!(
            id = %id.short(),
            name = %node.name,
            kind = node.object.kind(),
            "scene object added"
        );
        self.nodes.insert(id, node);
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneNode> {
        let node = self.nodes.remove(&id)?;
        self.order.retain(|o| *o != id);
        Some(node)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn set_position(&mut self, id: ObjectId, position: Vec3) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                *node.object.position_mut() = position;
                true
            }
            None => false,
        }
    }

    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn is_visible(&self, id: ObjectId) -> Option<bool> {
        self.nodes.get(&id).map(|n| n.visible)
    }

    pub fn points(&self, id: ObjectId) -> Option<&Points> {
        match self.nodes.get(&id).map(|n| &n.object) {
            Some(SceneObject::Points(p)) => Some(p),
            _ => None,
        }
    }

    pub fn points_mut(&mut self, id: ObjectId) -> Option<&mut Points> {
        match self.nodes.get_mut(&id).map(|n| &mut n.object) {
            Some(SceneObject::Points(p)) => Some(p),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self, id: ObjectId) -> Option<&mut Mesh> {
        match self.nodes.get_mut(&id).map(|n| &mut n.object) {
            Some(SceneObject::Mesh(m)) => Some(m),
            _ => None,
        }
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneNode)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.nodes.get(id).map(|n| (*id, n)))
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.iter().find(|(_, n)| n.name == name).map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
