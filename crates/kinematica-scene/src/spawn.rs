use std::sync::atomic::{AtomicU8, Ordering};

use kinematica_robot::Robot;
use tokio::sync::OnceCell;

use crate::{
    backend::{MeshHandle, SceneBackend},
    config::SceneConfig,
    error::SceneError,
};

/// The mesh lifecycle of a robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SpawnState {
    /// No meshes are loaded.
    NotLoaded,
    /// A spawn is in progress.
    Loading,
    /// Every link mesh is loaded.
    Loaded,
}

impl SpawnState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => SpawnState::Loading,
            2 => SpawnState::Loaded,
            _ => SpawnState::NotLoaded,
        }
    }
}

/// Resets the state to [`SpawnState::NotLoaded`] when a load ends without finishing,
/// either through an error or because the spawn future was dropped.
struct LoadingGuard<'a> {
    state: &'a AtomicU8,
    armed: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(state: &'a AtomicU8) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.store(SpawnState::NotLoaded as u8, Ordering::Release);
        }
    }
}

/// The backend handles of a spawned robot, indexed by link.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedRobot {
    robot_name: String,
    link_handles: Vec<Vec<MeshHandle>>,
}

impl SpawnedRobot {
    /// The name of the spawned robot.
    pub fn robot_name(&self) -> &str {
        &self.robot_name
    }

    /// The number of links.
    pub fn num_links(&self) -> usize {
        self.link_handles.len()
    }

    /// The handles of one link, empty for links without geometry.
    pub fn handles(&self, link: usize) -> &[MeshHandle] {
        self.link_handles.get(link).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every handle of every link.
    pub fn all_handles(&self) -> impl Iterator<Item = MeshHandle> + '_ {
        self.link_handles.iter().flatten().copied()
    }
}

/// Loads the meshes of a robot exactly once.
///
/// Concurrent calls to [`RobotSpawner::spawn`] share one load. A failed load leaves the
/// spawner in [`SpawnState::NotLoaded`] and may be retried, as does dropping a spawn
/// future before it completes.
pub struct RobotSpawner {
    robot: Robot,
    config: SceneConfig,
    state: AtomicU8,
    spawned: OnceCell<SpawnedRobot>,
}

impl RobotSpawner {
    /// Create a spawner for a robot.
    pub fn new(robot: Robot, config: SceneConfig) -> Self {
        Self {
            robot,
            config,
            state: AtomicU8::new(SpawnState::NotLoaded as u8),
            spawned: OnceCell::new(),
        }
    }

    /// The robot.
    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    /// The scene settings.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SpawnState {
        SpawnState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// The handles, once loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NotSpawned`] before a spawn has completed.
    pub fn spawned(&self) -> Result<&SpawnedRobot, SceneError> {
        self.spawned
            .get()
            .ok_or_else(|| SceneError::NotSpawned(self.robot.name().to_string()))
    }

    /// Load every link mesh, parents first.
    ///
    /// Returns the existing handles if the robot is already spawned, and waits for the
    /// running load if another call started one.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MeshLoad`] naming the first mesh that failed.
    pub async fn spawn<B: SceneBackend>(&self, backend: &B) -> Result<&SpawnedRobot, SceneError> {
        self.spawned
            .get_or_try_init(|| async {
                self.set_state(SpawnState::Loading);
                let guard = LoadingGuard::new(&self.state);
                let spawned = self.load_all(backend).await?;
                guard.disarm();
                self.set_state(SpawnState::Loaded);
                Ok(spawned)
            })
            .await
    }

    fn set_state(&self, state: SpawnState) {
        self.state.store(state as u8, Ordering::Release);
    }

    async fn load_all<B: SceneBackend>(&self, backend: &B) -> Result<SpawnedRobot, SceneError> {
        log::info!("spawning robot {}", self.robot.name());

        let mut link_handles = vec![Vec::new(); self.robot.num_links()];
        for link in self.robot.links_in_hierarchy_order() {
            let Some(path) = self.config.mesh_path(&self.robot, link) else {
                continue;
            };
            match backend.load_mesh(&path).await {
                Ok(handles) => {
                    log::debug!("loaded {} ({} objects)", path.display(), handles.len());
                    link_handles[link] = handles;
                }
                Err(e) => {
                    log::warn!("failed to load {}: {e}", path.display());
                    return Err(SceneError::MeshLoad {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let spawned = SpawnedRobot {
            robot_name: self.robot.name().to_string(),
            link_handles,
        };
        log::info!(
            "spawned robot {} with {} objects",
            self.robot.name(),
            spawned.all_handles().count()
        );
        Ok(spawned)
    }
}
