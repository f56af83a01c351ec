use glam::Mat4;

use crate::rendering::scene::Object;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    object: Object,
    parent: Option<NodeId>,
}

/// Arena of scene objects. Children are always inserted after their parent,
/// so a single forward pass composes world transforms.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, object: Object) -> NodeId {
        self.push(object, None)
    }

    pub fn add_child(&mut self, parent: NodeId, object: Object) -> NodeId {
        self.push(object, Some(parent))
    }

    fn push(&mut self, object: Object, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { object, parent });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn object(&self, id: NodeId) -> &Object {
        &self.nodes[id.0].object
    }

    pub fn object_mut(&mut self, id: NodeId) -> &mut Object {
        &mut self.nodes[id.0].object
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.object.name == name)
            .map(NodeId)
    }

    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        let local = node.object.local_transform();
        match node.parent {
            Some(parent) => self.world_transform(parent) * local,
            None => local,
        }
    }

    /// World transform of every node, indexed like the arena.
    pub fn world_transforms(&self) -> Vec<Mat4> {
        let mut world: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.object.local_transform();
            let transform = match node.parent {
                Some(parent) => world[parent.0] * local,
                None => local,
            };
            world.push(transform);
        }
        world
    }

    /// Visible objects that carry a shape, with their world transform.
    /// A hidden node hides its whole subtree.
    pub fn drawables(&self) -> Vec<(&Object, Mat4)> {
        let world = self.world_transforms();
        let mut shown: Vec<bool> = Vec::with_capacity(self.nodes.len());
        let mut out = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            let visible = node.object.visible && node.parent.map_or(true, |p| shown[p.0]);
            shown.push(visible);
            if visible && node.object.shape.is_some() {
                out.push((&node.object, world[index]));
            }
        }
        out
    }
}
