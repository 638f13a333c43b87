/// Retained-mode scene graph: a flat arena of nodes linked by indices
use nalgebra::{Matrix4, Vector3};

use crate::config::Rgb;
use crate::geometry::Mesh;
use crate::transform::{RotationState, Transform};

/// Opaque handle to a node inside a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Appearance tag attached to every node that carries a mesh
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub color: Rgb,
    pub opacity: f32,
    pub wireframe: bool,
    pub double_sided: bool,
}

impl Material {
    /// Opaque lit surface
    pub fn standard(color: Rgb) -> Self {
        Self {
            color,
            opacity: 1.0,
            wireframe: false,
            double_sided: false,
        }
    }

    /// See-through filled surface, lit from both sides
    pub fn translucent(color: Rgb, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            wireframe: false,
            double_sided: true,
        }
    }

    /// Translucent outline-only rendering
    pub fn wire(color: Rgb, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            wireframe: true,
            double_sided: true,
        }
    }
}

/// One rigid part: an optional mesh plus a local transform.
/// Group nodes carry no mesh and exist only to compose transforms.
#[derive(Debug)]
pub struct Node {
    pub mesh: Option<Mesh>,
    pub material: Material,
    pub position: Vector3<f32>,
    pub rotation: RotationState,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn group() -> Self {
        Self {
            mesh: None,
            material: Material::standard(Rgb::new(1.0, 1.0, 1.0)),
            position: Vector3::zeros(),
            rotation: RotationState::zero(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn mesh(mesh: Mesh, material: Material) -> Self {
        Self {
            mesh: Some(mesh),
            material,
            ..Self::group()
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = RotationState::new(x, y, z);
        self
    }

    /// Local transform: translation then rotation, composed by the parent
    /// chain during traversal
    pub fn local_matrix(&self) -> Matrix4<f32> {
        Transform::local_matrix(&self.position, &self.rotation)
    }
}

/// The scene itself. Structure is append-only: parts are attached once at
/// construction and never reparented or removed, only their local rotations
/// change afterwards.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `node` sits somewhere below `ancestor` in the hierarchy
    pub fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.nodes[node.0].parent;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    /// World matrix of a node: the product of every local matrix from the
    /// root down to the node
    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        let mut matrix = self.nodes[id.0].local_matrix();
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            matrix = self.nodes[parent.0].local_matrix() * matrix;
            current = self.nodes[parent.0].parent;
        }
        matrix
    }

    /// Depth-first traversal from every root, handing each node its
    /// accumulated world matrix
    pub fn visit<'a, F: FnMut(&'a Node, Matrix4<f32>)>(&'a self, mut f: F) {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.parent.is_none() {
                self.visit_from(NodeId(index), Matrix4::identity(), &mut f);
            }
        }
    }

    fn visit_from<'a, F: FnMut(&'a Node, Matrix4<f32>)>(
        &'a self,
        id: NodeId,
        parent_world: Matrix4<f32>,
        f: &mut F,
    ) {
        let node = &self.nodes[id.0];
        let world = parent_world * node.local_matrix();
        f(node, world);
        for &child in &node.children {
            self.visit_from(child, world, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_parent_links() {
        let mut scene = Scene::new();
        let root = scene.add_root(Node::group());
        let head = scene.add_child(root, Node::group());
        let wing = scene.add_child(head, Node::group());

        assert_eq!(scene.parent(wing), Some(head));
        assert_eq!(scene.children(root), &[head]);
        assert!(scene.is_descendant(wing, root));
        assert!(scene.is_descendant(wing, head));
        assert!(!scene.is_descendant(head, wing));
    }

    #[test]
    fn test_world_matrix_composes_translations() {
        let mut scene = Scene::new();
        let root = scene.add_root(Node::group().at(0.0, 0.0, 10.0));
        let child = scene.add_child(root, Node::group().at(0.0, 3.0, 0.0));

        let p = scene.world_matrix(child).transform_point(&Point3::origin());
        assert!((p - Point3::new(0.0, 3.0, 10.0)).norm() < 1e-6);
    }

    #[test]
    fn test_parent_yaw_carries_child() {
        // A yawing head must carry its blade group with it: rotate the
        // parent a quarter turn about Y and a child point on the +Z axis
        // swings onto the +X axis.
        let mut scene = Scene::new();
        let head = scene.add_root(Node::group().rotated(0.0, FRAC_PI_2, 0.0));
        let wing = scene.add_child(head, Node::group().at(0.0, 3.0, 0.0));

        let p = scene
            .world_matrix(wing)
            .transform_point(&Point3::new(0.0, 0.0, 0.65));
        assert!((p - Point3::new(0.65, 3.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_visit_accumulates_matrices() {
        let mut scene = Scene::new();
        let root = scene.add_root(Node::group().at(1.0, 0.0, 0.0));
        scene.add_child(root, Node::group().at(0.0, 2.0, 0.0));

        let mut origins = Vec::new();
        scene.visit(|_, world| origins.push(world.transform_point(&Point3::origin())));

        assert_eq!(origins.len(), 2);
        assert!((origins[0] - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
        assert!((origins[1] - Point3::new(1.0, 2.0, 0.0)).norm() < 1e-6);
    }
}
