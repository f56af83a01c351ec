use glam::{EulerRot, Quat, Vec3};

use crate::rendering::materials::Material;
use crate::rendering::mesh::Geometry;
use crate::rendering::scene::{NodeId, Object, SceneGraph, Shape};
use crate::world::avatar::FigureState;

/// Named attachment points the controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Root,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Joint {
    pub const ALL: [Joint; 6] = [
        Joint::Root,
        Joint::Head,
        Joint::LeftArm,
        Joint::RightArm,
        Joint::LeftLeg,
        Joint::RightLeg,
    ];
}

/// One rigid part of the figure, positioned relative to its parent.
#[derive(Debug, Clone)]
pub struct RigNode {
    pub name: &'static str,
    pub offset: Vec3,
    pub part: Option<(Geometry, Material)>,
    pub joint: Option<Joint>,
    pub casts_shadow: bool,
    pub children: Vec<RigNode>,
}

impl RigNode {
    fn group(
        name: &'static str,
        offset: Vec3,
        joint: Option<Joint>,
        children: Vec<RigNode>,
    ) -> Self {
        Self {
            name,
            offset,
            part: None,
            joint,
            casts_shadow: false,
            children,
        }
    }

    fn part(name: &'static str, offset: Vec3, geometry: Geometry, material: Material) -> Self {
        Self {
            name,
            offset,
            part: Some((geometry, material)),
            joint: None,
            casts_shadow: false,
            children: Vec::new(),
        }
    }

    fn casting_shadow(mut self) -> Self {
        self.casts_shadow = true;
        self
    }

    /// Depth-first walk over this node and all descendants.
    pub fn walk(&self) -> Vec<&RigNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}

fn limb_material() -> Material {
    Material::standard(0x3a7bc8).metalness(0.6).roughness(0.4)
}

fn extremity_material() -> Material {
    Material::standard(0x2a5a9e).metalness(0.7)
}

fn arm(name: &'static str, side: f32, joint: Joint, segments: u32) -> RigNode {
    RigNode::group(
        name,
        Vec3::new(side * 0.5, 0.9, 0.0),
        Some(joint),
        vec![
            RigNode::part(
                "upper",
                Vec3::new(0.0, -0.3, 0.0),
                Geometry::cuboid(0.2, 0.8, 0.2),
                limb_material(),
            )
            .casting_shadow(),
            RigNode::part(
                "hand",
                Vec3::new(0.0, -0.8, 0.0),
                Geometry::sphere(0.12, segments),
                extremity_material(),
            ),
        ],
    )
}

fn leg(name: &'static str, side: f32, joint: Joint) -> RigNode {
    RigNode::group(
        name,
        Vec3::new(side * 0.25, 0.1, 0.0),
        Some(joint),
        vec![
            RigNode::part(
                "thigh",
                Vec3::new(0.0, -0.4, 0.0),
                Geometry::cuboid(0.25, 0.9, 0.25),
                limb_material(),
            )
            .casting_shadow(),
            RigNode::part(
                "foot",
                Vec3::new(0.0, -0.9, 0.1),
                Geometry::cuboid(0.3, 0.1, 0.4),
                extremity_material(),
            ),
        ],
    )
}

/// The robot: body, head with eyes and antenna, two arms, two legs.
pub fn robot(segments: u32) -> RigNode {
    let eye = |name, x| {
        RigNode::part(
            name,
            Vec3::new(x, 0.1, 0.31),
            Geometry::sphere(0.08, segments),
            Material::standard(0xffffff).emissive(0x00ff00, 0.8),
        )
    };

    let head = RigNode::group(
        "head",
        Vec3::new(0.0, 1.7, 0.0),
        Some(Joint::Head),
        vec![
            RigNode::part(
                "skull",
                Vec3::ZERO,
                Geometry::cuboid(0.6, 0.6, 0.6),
                Material::standard(0x5ba3f5).metalness(0.7).roughness(0.3),
            )
            .casting_shadow(),
            eye("left_eye", -0.15),
            eye("right_eye", 0.15),
            RigNode::part(
                "antenna",
                Vec3::new(0.0, 0.4, 0.0),
                Geometry::cylinder(0.03, 0.3, 8),
                Material::standard(0xff6b6b).metalness(0.8),
            ),
            RigNode::part(
                "antenna_tip",
                Vec3::new(0.0, 0.6, 0.0),
                Geometry::sphere(0.08, segments),
                Material::standard(0xff6b6b).emissive(0xff0000, 1.0),
            ),
        ],
    );

    RigNode::group(
        "robot",
        Vec3::new(0.0, -1.0, 0.0),
        Some(Joint::Root),
        vec![
            RigNode::part(
                "body",
                Vec3::new(0.0, 0.8, 0.0),
                Geometry::cuboid(0.8, 1.2, 0.5),
                Material::standard(0x4a90e2).metalness(0.6).roughness(0.4),
            )
            .casting_shadow(),
            head,
            arm("left_arm", -1.0, Joint::LeftArm, segments),
            arm("right_arm", 1.0, Joint::RightArm, segments),
            leg("left_leg", -1.0, Joint::LeftLeg),
            leg("right_leg", 1.0, Joint::RightLeg),
        ],
    )
}

/// Scene nodes of an instantiated rig, addressed by joint.
#[derive(Debug, Clone)]
pub struct Rig {
    root: NodeId,
    head: NodeId,
    left_arm: NodeId,
    right_arm: NodeId,
    left_leg: NodeId,
    right_leg: NodeId,
}

#[derive(Debug, thiserror::Error)]
#[error("rig definition has no `{0:?}` joint")]
pub struct MissingJoint(pub Joint);

impl Rig {
    /// Instantiate `definition` as a new root in `graph`.
    pub fn build(graph: &mut SceneGraph, definition: &RigNode) -> Result<Self, MissingJoint> {
        let mut joints = Vec::new();
        insert(graph, None, definition, &mut joints);

        let lookup = |joint: Joint| {
            joints
                .iter()
                .find(|(j, _)| *j == joint)
                .map(|(_, id)| *id)
                .ok_or(MissingJoint(joint))
        };
        Ok(Self {
            root: lookup(Joint::Root)?,
            head: lookup(Joint::Head)?,
            left_arm: lookup(Joint::LeftArm)?,
            right_arm: lookup(Joint::RightArm)?,
            left_leg: lookup(Joint::LeftLeg)?,
            right_leg: lookup(Joint::RightLeg)?,
        })
    }

    pub fn node(&self, joint: Joint) -> NodeId {
        match joint {
            Joint::Root => self.root,
            Joint::Head => self.head,
            Joint::LeftArm => self.left_arm,
            Joint::RightArm => self.right_arm,
            Joint::LeftLeg => self.left_leg,
            Joint::RightLeg => self.right_leg,
        }
    }

    /// Write the figure's pose into the scene: position and yaw on the root,
    /// yaw/pitch on the head, pitch on each limb.
    pub fn apply(&self, graph: &mut SceneGraph, state: &FigureState) {
        let root = graph.object_mut(self.root);
        root.position = state.position;
        root.rotation = Quat::from_rotation_y(state.facing);

        let joints = &state.joints;
        graph.object_mut(self.head).rotation =
            Quat::from_euler(EulerRot::XYZ, joints.head_pitch, joints.head_yaw, 0.0);

        let limbs = [self.left_leg, self.right_leg, self.left_arm, self.right_arm];
        for (node, pitch) in limbs.into_iter().zip(joints.limb_pitches()) {
            graph.object_mut(node).rotation = Quat::from_rotation_x(pitch);
        }
    }
}

fn insert(
    graph: &mut SceneGraph,
    parent: Option<NodeId>,
    node: &RigNode,
    joints: &mut Vec<(Joint, NodeId)>,
) {
    let object = match &node.part {
        Some((geometry, material)) => {
            Object::mesh(node.name, node.offset, Shape::new(*geometry, *material))
        }
        None => Object::pivot(node.name, node.offset),
    }
    .casting_shadow(node.casts_shadow);
    let id = match parent {
        Some(parent) => graph.add_child(parent, object),
        None => graph.add_root(object),
    };
    if let Some(joint) = node.joint {
        joints.push((joint, id));
    }
    for child in &node.children {
        insert(graph, Some(id), child, joints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::avatar::JointAngles;

    #[test]
    fn test_robot_part_set() {
        let robot = robot(16);
        let parts: Vec<_> = robot
            .walk()
            .into_iter()
            .filter(|n| n.part.is_some())
            .map(|n| n.name)
            .collect();
        assert_eq!(
            parts,
            vec![
                "body", "skull", "left_eye", "right_eye", "antenna", "antenna_tip",
                "upper", "hand", "upper", "hand", "thigh", "foot", "thigh", "foot",
            ]
        );
        let joints: Vec<_> = robot.walk().into_iter().filter_map(|n| n.joint).collect();
        assert_eq!(joints, Joint::ALL.to_vec());
    }

    #[test]
    fn test_solid_parts_cast_shadows() {
        let mut graph = SceneGraph::new();
        Rig::build(&mut graph, &robot(8)).unwrap();
        let casters: Vec<_> = graph
            .drawables()
            .into_iter()
            .filter(|(object, _)| object.casts_shadow)
            .map(|(object, _)| object.name.as_str())
            .collect();
        assert_eq!(casters, vec!["body", "skull", "upper", "upper", "thigh", "thigh"]);
    }

    #[test]
    fn test_build_registers_every_joint() {
        let mut graph = SceneGraph::new();
        let rig = Rig::build(&mut graph, &robot(8)).unwrap();
        assert_eq!(graph.len(), robot(8).walk().len());
        assert_eq!(graph.object(rig.node(Joint::Head)).name, "head");
        assert_eq!(graph.object(rig.node(Joint::RightLeg)).position, Vec3::new(0.25, 0.1, 0.0));
    }

    #[test]
    fn test_missing_joint_is_reported() {
        let mut graph = SceneGraph::new();
        let stub = RigNode::group("lonely", Vec3::ZERO, Some(Joint::Root), Vec::new());
        let err = Rig::build(&mut graph, &stub).unwrap_err();
        assert!(matches!(err, MissingJoint(Joint::Head)));
    }

    #[test]
    fn test_apply_pose() {
        let mut graph = SceneGraph::new();
        let rig = Rig::build(&mut graph, &robot(8)).unwrap();
        let state = FigureState {
            position: Vec3::new(2.0, -1.0, 3.0),
            facing: std::f32::consts::FRAC_PI_2,
            walking: true,
            joints: JointAngles { left_leg: 0.5, head_yaw: 0.25, ..JointAngles::default() },
        };
        rig.apply(&mut graph, &state);

        let root = graph.find("robot").unwrap();
        assert_eq!(graph.object(root).position, state.position);

        // The left leg pivot sits at (-0.25, 0.1, 0) in the figure frame; a quarter
        // turn about Y carries it onto +Z.
        let leg = graph.find("left_leg").unwrap();
        let pivot = graph.world_transform(leg).transform_point3(Vec3::ZERO);
        assert!(pivot.distance(Vec3::new(2.0, -0.9, 3.25)) < 1e-5);

        let (_, yaw, _) = graph.object(rig.node(Joint::Head)).rotation.to_euler(EulerRot::XYZ);
        assert!((yaw - 0.25).abs() < 1e-5);
    }
}
