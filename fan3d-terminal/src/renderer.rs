/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use fan3d_core::{Camera, LightConfig, Material, Scene, Triangle};
use nalgebra::{Matrix4, Point3};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// ASCII renderer that converts the scene graph to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
        }
    }

    /// Rasterize every mesh-carrying node in the scene with its accumulated
    /// world matrix.
    pub fn render_scene(&mut self, scene: &Scene, camera: &Camera, light: &LightConfig) {
        let mut jobs: Vec<(Matrix4<f32>, Material, &Triangle)> = Vec::new();
        scene.visit(|node, world| {
            if let Some(mesh) = &node.mesh {
                for triangle in &mesh.triangles {
                    jobs.push((world, node.material, triangle));
                }
            }
        });
        for (world, material, triangle) in jobs {
            self.render_triangle(triangle, &material, &world, camera, light);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        material: &Material,
        world: &Matrix4<f32>,
        camera: &Camera,
        light: &LightConfig,
    ) {
        // Project vertices to screen space
        let mut screen_coords = Vec::new();
        let mut world_points = Vec::new();
        for vertex in &triangle.vertices {
            if let Some((x, y, z)) = camera.project_to_screen(
                &vertex.position,
                world,
                self.width as u32,
                self.height as u32,
            ) {
                screen_coords.push((x, y, z));
                world_points.push(world.transform_point(&vertex.position));
            } else {
                return; // Triangle is clipped
            }
        }

        if screen_coords.len() != 3 {
            return;
        }

        // Face normal in world space, so lighting follows the animated parts
        let edge1 = world_points[1] - world_points[0];
        let edge2 = world_points[2] - world_points[0];
        let cross = edge1.cross(&edge2);
        if cross.norm() < 1e-9 {
            return; // Degenerate (pole fans of the cage shells)
        }
        let normal = cross.normalize();

        let light_dir = light.direction.normalize();
        let facing = if material.double_sided {
            normal.dot(&light_dir).abs()
        } else {
            normal.dot(&light_dir).max(0.0)
        };
        let brightness = (light.ambient + light.intensity * facing)
            * material.opacity
            * material.color.luminance();
        let brightness = brightness.clamp(0.0, 1.0);

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        if material.wireframe {
            // Outline only: the cage shells draw as a faint mesh of lines
            self.plot_line(screen_coords[0], screen_coords[1], character);
            self.plot_line(screen_coords[1], screen_coords[2], character);
            self.plot_line(screen_coords[2], screen_coords[0], character);
        } else {
            self.rasterize_triangle(&screen_coords, character);
        }
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32)], character: char) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x, y, depth, character);
                    }
                }
            }
        }
    }

    /// Depth-tested line between two projected points
    fn plot_line(&mut self, a: (f32, f32, f32), b: (f32, f32, f32), character: char) {
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = a.0 + (b.0 - a.0) * t;
            let y = a.1 + (b.1 - a.1) * t;
            let depth = a.2 + (b.2 - a.2) * t;
            self.plot(x.round() as i32, y.round() as i32, depth, character);
        }
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, character: char) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
        }
    }

    /// Dotted ground grid on the y = 0 plane, the terminal counterpart of
    /// the usual scene-debugging grid helper. Points are projected one by
    /// one so lines running out of the frustum simply fade out.
    pub fn draw_grid(&mut self, camera: &Camera, size: f32, divisions: u32) {
        let identity = Matrix4::identity();
        let half = size / 2.0;
        let samples = (self.width * 2).max(64);

        for line in 0..=divisions {
            let offset = -half + size * line as f32 / divisions as f32;
            for i in 0..=samples {
                let along = -half + size * i as f32 / samples as f32;
                for point in [
                    Point3::new(offset, 0.0, along),
                    Point3::new(along, 0.0, offset),
                ] {
                    if let Some((x, y, depth)) = camera.project_to_screen(
                        &point,
                        &identity,
                        self.width as u32,
                        self.height as u32,
                    ) {
                        self.plot(x.round() as i32, y.round() as i32, depth, '.');
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barycentric_centroid() {
        let weights = barycentric((0.0, 0.0), (3.0, 0.0), (0.0, 3.0), (1.0, 1.0))
            .expect("non-degenerate triangle");
        assert!((weights.0 + weights.1 + weights.2 - 1.0).abs() < 1e-6);
        assert!(weights.0 > 0.0 && weights.1 > 0.0 && weights.2 > 0.0);
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_plot_respects_depth() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.plot(1, 1, 5.0, '@');
        renderer.plot(1, 1, 9.0, '.');
        assert_eq!(renderer.char_buffer[5], '@');
        renderer.plot(1, 1, 1.0, '#');
        assert_eq!(renderer.char_buffer[5], '#');
    }
}
