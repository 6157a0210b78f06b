use std::{future::Future, path::Path};

use crate::{config::Color, error::SceneError};

/// An opaque handle to an object owned by the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// The operations a rendering engine provides to the scene.
///
/// Only mesh loading may suspend. Every other call is a plain update of engine state.
pub trait SceneBackend: Send + Sync {
    /// Load a mesh file, returning one handle per object in the file.
    ///
    /// # Arguments
    ///
    /// * `path` - The mesh file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded.
    fn load_mesh(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Vec<MeshHandle>, SceneError>> + Send;

    /// Replace the vertex positions of an object.
    fn update_vertex_positions(
        &self,
        handle: MeshHandle,
        points: &[[f64; 3]],
    ) -> Result<(), SceneError>;

    /// Show or hide an object.
    fn set_visibility(&self, handle: MeshHandle, visible: bool) -> Result<(), SceneError>;

    /// Draw a line segment for the current frame.
    fn draw_debug_vector(
        &self,
        start: [f64; 3],
        end: [f64; 3],
        width: f64,
        color: Color,
    ) -> Result<(), SceneError>;

    /// Draw a sphere for the current frame.
    fn draw_debug_sphere(
        &self,
        center: [f64; 3],
        radius: f64,
        color: Color,
    ) -> Result<(), SceneError>;

    /// Move an object.
    fn set_object_position(
        &self,
        handle: MeshHandle,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), SceneError>;

    /// Rotate an object by a unit quaternion.
    fn set_object_rotation_from_quaternion(
        &self,
        handle: MeshHandle,
        w: f64,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), SceneError>;
}
