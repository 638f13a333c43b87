/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles.
///
/// The fan only ever needs five primitive kinds, so each gets an explicit
/// parametric constructor with an exact, predictable triangle count.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    fn add_quad(&mut self, v0: Vertex, v1: Vertex, v2: Vertex, v3: Vertex) {
        self.add_triangle(Triangle::new(v0, v1, v2));
        self.add_triangle(Triangle::new(v0, v2, v3));
    }

    /// Cylinder along the Y axis, centered on the origin. Different top and
    /// bottom radii produce a truncated cone. `segments * 4` triangles
    /// (2 per side quad, plus a fan on each cap).
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: usize) -> Self {
        let mut mesh = Self::with_capacity(segments * 4);
        let half = height / 2.0;
        // Side normals tilt with the slope of the wall
        let slope = (radius_bottom - radius_top) / height;

        for i in 0..segments {
            let theta0 = std::f32::consts::TAU * i as f32 / segments as f32;
            let theta1 = std::f32::consts::TAU * (i + 1) as f32 / segments as f32;
            let (c0, s0) = (theta0.cos(), theta0.sin());
            let (c1, s1) = (theta1.cos(), theta1.sin());

            let n0 = Vector3::new(c0, slope, s0).normalize();
            let n1 = Vector3::new(c1, slope, s1).normalize();

            mesh.add_quad(
                Vertex::new(radius_bottom * c0, -half, radius_bottom * s0, n0.x, n0.y, n0.z),
                Vertex::new(radius_bottom * c1, -half, radius_bottom * s1, n1.x, n1.y, n1.z),
                Vertex::new(radius_top * c1, half, radius_top * s1, n1.x, n1.y, n1.z),
                Vertex::new(radius_top * c0, half, radius_top * s0, n0.x, n0.y, n0.z),
            );

            // Caps
            mesh.add_triangle(Triangle::new(
                Vertex::new(0.0, half, 0.0, 0.0, 1.0, 0.0),
                Vertex::new(radius_top * c1, half, radius_top * s1, 0.0, 1.0, 0.0),
                Vertex::new(radius_top * c0, half, radius_top * s0, 0.0, 1.0, 0.0),
            ));
            mesh.add_triangle(Triangle::new(
                Vertex::new(0.0, -half, 0.0, 0.0, -1.0, 0.0),
                Vertex::new(radius_bottom * c0, -half, radius_bottom * s0, 0.0, -1.0, 0.0),
                Vertex::new(radius_bottom * c1, -half, radius_bottom * s1, 0.0, -1.0, 0.0),
            ));
        }

        mesh
    }

    /// Flat rectangle in the XY plane facing +Z. 2 triangles.
    pub fn plane(width: f32, height: f32) -> Self {
        let mut mesh = Self::with_capacity(2);
        let (hw, hh) = (width / 2.0, height / 2.0);
        mesh.add_quad(
            Vertex::new(-hw, -hh, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(hw, -hh, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(hw, hh, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(-hw, hh, 0.0, 0.0, 0.0, 1.0),
        );
        mesh
    }

    /// Polar cap of a sphere: full longitude, latitude from the +Y pole down
    /// to `cap_angle` radians. `segments * rings * 2` triangles; the band at
    /// the pole degenerates into a fan, which the rasterizer handles fine.
    pub fn spherical_cap(radius: f32, segments: usize, rings: usize, cap_angle: f32) -> Self {
        let mut mesh = Self::with_capacity(segments * rings * 2);

        let point = |phi: f32, theta: f32| -> Vertex {
            let x = radius * phi.sin() * theta.cos();
            let y = radius * phi.cos();
            let z = radius * phi.sin() * theta.sin();
            // Normal of a sphere is the radial direction
            Vertex::new(x, y, z, x / radius, y / radius, z / radius)
        };

        for j in 0..rings {
            let phi0 = cap_angle * j as f32 / rings as f32;
            let phi1 = cap_angle * (j + 1) as f32 / rings as f32;
            for i in 0..segments {
                let theta0 = std::f32::consts::TAU * i as f32 / segments as f32;
                let theta1 = std::f32::consts::TAU * (i + 1) as f32 / segments as f32;
                mesh.add_quad(
                    point(phi0, theta0),
                    point(phi0, theta1),
                    point(phi1, theta1),
                    point(phi1, theta0),
                );
            }
        }

        mesh
    }

    /// Torus in the XY plane around the Z axis.
    /// `radial_segments * tubular_segments * 2` triangles.
    pub fn torus(radius: f32, tube_radius: f32, radial_segments: usize, tubular_segments: usize) -> Self {
        let mut mesh = Self::with_capacity(radial_segments * tubular_segments * 2);

        let point = |u: f32, v: f32| -> Vertex {
            // u runs around the main ring, v around the tube cross-section
            let n = Vector3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin());
            let center = Vector3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let p = center + tube_radius * n;
            Vertex::new(p.x, p.y, p.z, n.x, n.y, n.z)
        };

        for j in 0..tubular_segments {
            let u0 = std::f32::consts::TAU * j as f32 / tubular_segments as f32;
            let u1 = std::f32::consts::TAU * (j + 1) as f32 / tubular_segments as f32;
            for i in 0..radial_segments {
                let v0 = std::f32::consts::TAU * i as f32 / radial_segments as f32;
                let v1 = std::f32::consts::TAU * (i + 1) as f32 / radial_segments as f32;
                mesh.add_quad(point(u0, v0), point(u1, v0), point(u1, v1), point(u0, v1));
            }
        }

        mesh
    }

    /// Partial flat ring in the XY plane facing +Z, swept counter-clockwise
    /// from angle 0 through `sweep` radians. `segments * 2` triangles.
    pub fn annular_sector(inner_radius: f32, outer_radius: f32, segments: usize, sweep: f32) -> Self {
        let mut mesh = Self::with_capacity(segments * 2);

        for i in 0..segments {
            let theta0 = sweep * i as f32 / segments as f32;
            let theta1 = sweep * (i + 1) as f32 / segments as f32;
            let (c0, s0) = (theta0.cos(), theta0.sin());
            let (c1, s1) = (theta1.cos(), theta1.sin());
            mesh.add_quad(
                Vertex::new(inner_radius * c0, inner_radius * s0, 0.0, 0.0, 0.0, 1.0),
                Vertex::new(outer_radius * c0, outer_radius * s0, 0.0, 0.0, 0.0, 1.0),
                Vertex::new(outer_radius * c1, outer_radius * s1, 0.0, 0.0, 0.0, 1.0),
                Vertex::new(inner_radius * c1, inner_radius * s1, 0.0, 0.0, 0.0, 1.0),
            );
        }

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_triangle_count() {
        let mesh = Mesh::cylinder(0.8, 0.8, 0.1, 32);
        assert_eq!(mesh.triangles.len(), 32 * 4);
    }

    #[test]
    fn test_plane_triangle_count() {
        let mesh = Mesh::plane(0.5, 0.2);
        assert_eq!(mesh.triangles.len(), 2);
    }

    #[test]
    fn test_spherical_cap_triangle_count() {
        let mesh = Mesh::spherical_cap(1.5, 32, 8, std::f32::consts::PI / 5.0);
        assert_eq!(mesh.triangles.len(), 32 * 8 * 2);
    }

    #[test]
    fn test_torus_triangle_count() {
        let mesh = Mesh::torus(0.9, 0.02, 16, 100);
        assert_eq!(mesh.triangles.len(), 16 * 100 * 2);
    }

    #[test]
    fn test_annular_sector_radii() {
        let mesh = Mesh::annular_sector(0.2, 0.7, 32, std::f32::consts::PI);
        assert_eq!(mesh.triangles.len(), 32 * 2);
        for triangle in &mesh.triangles {
            for vertex in &triangle.vertices {
                let r = (vertex.position.x.powi(2) + vertex.position.y.powi(2)).sqrt();
                assert!(r >= 0.2 - 1e-5 && r <= 0.7 + 1e-5);
                assert_eq!(vertex.position.z, 0.0);
            }
        }
    }

    #[test]
    fn test_face_normal_of_flat_quad() {
        let mesh = Mesh::plane(1.0, 1.0);
        for triangle in &mesh.triangles {
            let normal = triangle.calculate_normal();
            assert!((normal - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
        }
    }

    #[test]
    fn test_unit_normals() {
        let meshes = [
            Mesh::cylinder(0.3, 0.3, 0.8, 16),
            Mesh::spherical_cap(1.5, 16, 4, std::f32::consts::PI / 5.0),
            Mesh::torus(0.9, 0.02, 8, 24),
        ];
        for mesh in &meshes {
            for triangle in &mesh.triangles {
                for vertex in &triangle.vertices {
                    assert!((vertex.normal.norm() - 1.0).abs() < 1e-5);
                }
            }
        }
    }
}
