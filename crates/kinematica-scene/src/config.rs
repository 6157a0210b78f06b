use std::path::{Path, PathBuf};

use kinematica_robot::Robot;

/// Render offset given to planar poses lifted to 3D, to keep them off the ground plane.
pub const DEFAULT_SE2_Z_OFFSET: f64 = 0.01;

/// Settings of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Directory the robot mesh directories live in.
    pub mesh_root: PathBuf,
    /// Height given to SE(2), SO(2) and U(1) poses.
    pub se2_z_offset: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            mesh_root: PathBuf::from("meshes"),
            se2_z_offset: DEFAULT_SE2_Z_OFFSET,
        }
    }
}

impl SceneConfig {
    /// Set the mesh root directory.
    pub fn with_mesh_root(mut self, mesh_root: impl AsRef<Path>) -> Self {
        self.mesh_root = mesh_root.as_ref().to_path_buf();
        self
    }

    /// Set the planar pose height.
    pub fn with_se2_z_offset(mut self, offset: f64) -> Self {
        self.se2_z_offset = offset;
        self
    }

    /// The full path of a link mesh, `<mesh_root>/<mesh_directory>/<file>`.
    ///
    /// Returns `None` for links without geometry or out of range.
    pub fn mesh_path(&self, robot: &Robot, link: usize) -> Option<PathBuf> {
        let file = robot.links().get(link)?.mesh.as_ref()?;
        Some(self.mesh_root.join(robot.mesh_directory()).join(file))
    }
}

/// An RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Color {
    /// Pure red, used for x axes.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure green, used for y axes.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Pure blue, used for z axes.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// White.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a color.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// How link frames are drawn when a robot pose is updated.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDrawConfig {
    /// Draw the x, y and z axes of every link frame.
    pub draw_axes: bool,
    /// Length of the drawn axes.
    pub axis_length: f64,
    /// Width of the drawn axes.
    pub axis_width: f64,
    /// Draw a sphere at every link origin.
    pub draw_link_spheres: bool,
    /// Radius of the link spheres.
    pub sphere_radius: f64,
    /// Color of the link spheres.
    pub sphere_color: Color,
}

impl Default for FrameDrawConfig {
    fn default() -> Self {
        Self {
            draw_axes: false,
            axis_length: 0.1,
            axis_width: 0.005,
            draw_link_spheres: false,
            sphere_radius: 0.01,
            sphere_color: Color::WHITE,
        }
    }
}

impl FrameDrawConfig {
    /// Enable or disable the axes.
    pub fn with_axes(mut self, draw: bool) -> Self {
        self.draw_axes = draw;
        self
    }

    /// Set the axis length and width.
    pub fn with_axis_size(mut self, length: f64, width: f64) -> Self {
        self.axis_length = length;
        self.axis_width = width;
        self
    }

    /// Enable or disable the link spheres.
    pub fn with_link_spheres(mut self, draw: bool) -> Self {
        self.draw_link_spheres = draw;
        self
    }

    /// Set the link sphere radius.
    pub fn with_sphere_radius(mut self, radius: f64) -> Self {
        self.sphere_radius = radius;
        self
    }
}
