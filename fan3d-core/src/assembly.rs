/// Construction of the fan's rigid-body hierarchy
use std::f32::consts::PI;

use crate::config::FanConfig;
use crate::geometry::Mesh;
use crate::scene::{Material, Node, NodeId, Scene};

pub const BLADE_COUNT: usize = 4;

const BLADE_INNER_RADIUS: f32 = 0.2;
const BLADE_OUTER_RADIUS: f32 = 0.7;
/// Half-angle of the two cage shells
const CAGE_ANGLE: f32 = PI / 5.0;
const RADIAL_SEGMENTS: usize = 32;
const CAGE_RINGS: usize = 8;

/// The assembled fan: one scene plus handles to the two groups the
/// controller animates. Built exactly once; the structure never changes
/// afterwards, only the local rotations of `head` and `wing`.
///
/// `wing` is a child of `head`, so blade spin is evaluated inside the
/// oscillating frame and the sweeping head carries the spinning blades.
pub struct FanAssembly {
    pub scene: Scene,
    pub root: NodeId,
    /// Everything that yaws during oscillation: motor, shaft, cage shells,
    /// rim, hub cap, badge and the blade group
    pub head: NodeId,
    /// The blade set alone, spinning about the fan's forward axis
    pub wing: NodeId,
}

impl FanAssembly {
    pub fn build(config: &FanConfig) -> Self {
        let body = Material::standard(config.palette.body);
        let accent = Material::standard(config.palette.accent);
        let cage = Material::wire(config.palette.body, 0.2);
        let blade = Material::translucent(config.palette.body, 0.8);

        let mut scene = Scene::new();
        let root = scene.add_root(Node::group().at(
            config.fan_offset.x,
            config.fan_offset.y,
            config.fan_offset.z,
        ));

        // Base
        scene.add_child(
            root,
            Node::mesh(Mesh::cylinder(0.8, 0.8, 0.1, RADIAL_SEGMENTS), body).at(0.0, 0.05, 0.0),
        );
        scene.add_child(
            root,
            Node::mesh(Mesh::plane(0.5, 0.2), accent)
                .at(0.0, 0.11, 0.4)
                .rotated(-PI / 2.0, 0.0, 0.0),
        );
        scene.add_child(
            root,
            Node::mesh(Mesh::cylinder(0.15, 0.15, 1.6, RADIAL_SEGMENTS), body).at(0.0, 0.8, 0.0),
        );
        scene.add_child(
            root,
            Node::mesh(Mesh::cylinder(0.1, 0.1, 3.0, RADIAL_SEGMENTS), body).at(0.0, 1.5, 0.0),
        );

        // Head group sits at the top of the pole. Its local origin stays on
        // the pole axis so yaw sweeps the whole head around it.
        let head = scene.add_child(root, Node::group());

        scene.add_child(
            head,
            Node::mesh(Mesh::cylinder(0.3, 0.3, 0.8, RADIAL_SEGMENTS), body)
                .at(0.0, 3.0, 0.0)
                .rotated(PI / 2.0, 0.0, 0.0),
        );
        scene.add_child(
            head,
            Node::mesh(Mesh::cylinder(0.05, 0.05, 0.3, RADIAL_SEGMENTS), body)
                .at(0.0, 3.0, 0.5)
                .rotated(PI / 2.0, 0.0, 0.0),
        );
        scene.add_child(
            head,
            Node::mesh(
                Mesh::spherical_cap(1.5, RADIAL_SEGMENTS, CAGE_RINGS, CAGE_ANGLE),
                cage,
            )
            .at(0.0, 3.0, 1.86)
            .rotated(-PI / 2.0, 0.0, 0.0),
        );
        scene.add_child(
            head,
            Node::mesh(Mesh::torus(0.9, 0.02, 16, 100), accent).at(0.0, 3.0, 0.65),
        );

        let wing = scene.add_child(head, Node::group().at(0.0, 3.0, 0.0));
        for i in 1..=BLADE_COUNT {
            // Each blade sweeps pi*i radians; the quirky non-uniform
            // silhouette is part of the source design and kept as-is.
            let sweep = PI * i as f32;
            let placement = PI * (i - 1) as f32 / 2.0;
            scene.add_child(
                wing,
                Node::mesh(
                    Mesh::annular_sector(
                        BLADE_INNER_RADIUS,
                        BLADE_OUTER_RADIUS,
                        RADIAL_SEGMENTS,
                        sweep,
                    ),
                    blade,
                )
                .at(0.0, 0.0, 0.65)
                .rotated(0.0, 0.0, placement),
            );
        }

        scene.add_child(
            head,
            Node::mesh(Mesh::cylinder(0.2, 0.2, 0.1, RADIAL_SEGMENTS), body)
                .at(0.0, 3.0, 0.65)
                .rotated(PI / 2.0, 0.0, 0.0),
        );
        scene.add_child(
            head,
            Node::mesh(
                Mesh::spherical_cap(1.5, RADIAL_SEGMENTS, CAGE_RINGS, CAGE_ANGLE),
                cage,
            )
            .at(0.0, 3.0, -0.55)
            .rotated(PI / 2.0, 0.0, 0.0),
        );
        scene.add_child(
            head,
            Node::mesh(Mesh::cylinder(0.2, 0.2, 0.01, RADIAL_SEGMENTS), accent)
                .at(0.0, 3.0, 0.95)
                .rotated(PI / 2.0, 0.0, 0.0),
        );

        Self {
            scene,
            root,
            head,
            wing,
        }
    }

    /// Current yaw of the head group about the vertical axis, in radians
    pub fn head_yaw(&self) -> f32 {
        self.scene.node(self.head).rotation.y
    }

    /// Current spin of the blade group about the forward axis, in radians
    pub fn wing_spin(&self) -> f32 {
        self.scene.node(self.wing).rotation.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wing_nested_inside_head() {
        let fan = FanAssembly::build(&FanConfig::default());
        assert_eq!(fan.scene.parent(fan.wing), Some(fan.head));
        assert!(fan.scene.is_descendant(fan.wing, fan.root));
    }

    #[test]
    fn test_blade_count_and_placement() {
        let fan = FanAssembly::build(&FanConfig::default());
        let blades = fan.scene.children(fan.wing);
        assert_eq!(blades.len(), BLADE_COUNT);
        for (index, &blade) in blades.iter().enumerate() {
            let expected = PI * index as f32 / 2.0;
            assert!((fan.scene.node(blade).rotation.z - expected).abs() < 1e-6);
            assert!((fan.scene.node(blade).position.z - 0.65).abs() < 1e-6);
        }
    }

    #[test]
    fn test_blade_sweep_grows_with_index() {
        let fan = FanAssembly::build(&FanConfig::default());
        let blades = fan.scene.children(fan.wing);
        // Triangle count is constant per blade, but the angular step between
        // consecutive sector quads is sweep / segments, so blade i must step
        // by pi * i / RADIAL_SEGMENTS.
        for (index, &blade) in blades.iter().enumerate() {
            let mesh = fan.scene.node(blade).mesh.as_ref().unwrap();
            let expected_step = PI * (index + 1) as f32 / RADIAL_SEGMENTS as f32;
            // First triangle of each quad starts with the inner vertex at
            // that quad's start angle.
            let a0 = mesh.triangles[0].vertices[0];
            let a1 = mesh.triangles[2].vertices[0];
            let angle0 = a0.position.y.atan2(a0.position.x);
            let angle1 = a1.position.y.atan2(a1.position.x);
            let mut step = angle1 - angle0;
            if step < 0.0 {
                step += 2.0 * PI;
            }
            assert!(
                (step - expected_step).abs() < 1e-5,
                "blade {} step {} expected {}",
                index,
                step,
                expected_step
            );
        }
    }

    #[test]
    fn test_root_offset() {
        let config = FanConfig::default();
        let fan = FanAssembly::build(&config);
        assert_eq!(fan.scene.node(fan.root).position, config.fan_offset);
    }

    #[test]
    fn test_cage_shells_are_translucent_wireframe() {
        let fan = FanAssembly::build(&FanConfig::default());
        let wire_count = fan
            .scene
            .children(fan.head)
            .iter()
            .filter(|&&id| fan.scene.node(id).material.wireframe)
            .count();
        assert_eq!(wire_count, 2);
        for &id in fan.scene.children(fan.head) {
            let material = fan.scene.node(id).material;
            if material.wireframe {
                assert!((material.opacity - 0.2).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_structure_is_complete() {
        let fan = FanAssembly::build(&FanConfig::default());
        // root: stand, nameplate, strut, pipe, head
        assert_eq!(fan.scene.children(fan.root).len(), 5);
        // head: motor, shaft, rear cage, rim, wing, cap, front cage, badge
        assert_eq!(fan.scene.children(fan.head).len(), 8);
    }
}
