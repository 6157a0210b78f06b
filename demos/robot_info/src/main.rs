use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use argh::FromArgs;

use kinematica::{
    lie::se3::se3_translation,
    robot::RobotKind,
    scene::{
        update_robot_pose, Color, FrameDrawConfig, MeshHandle, RobotSpawner, SceneBackend,
        SceneConfig, SceneError,
    },
};

#[derive(FromArgs, Debug)]
/// Inspect one of the built-in robots and spawn it into a logging scene.
struct Args {
    /// robot to load: panda, go1 or go1_z1
    #[argh(option, short = 'r', default = "String::from(\"panda\")")]
    robot: String,

    /// directory holding the robot mesh directories
    #[argh(option, default = "PathBuf::from(\"meshes\")")]
    mesh_root: PathBuf,

    /// print the robot description as JSON and exit
    #[argh(switch)]
    json: bool,

    /// print the world frame of every link at the zero state
    #[argh(switch)]
    frames: bool,
}

/// A backend that logs every call instead of rendering.
#[derive(Default)]
struct LoggingBackend {
    next_handle: AtomicU64,
}

impl SceneBackend for LoggingBackend {
    async fn load_mesh(&self, path: &Path) -> Result<Vec<MeshHandle>, SceneError> {
        if !path.exists() {
            log::warn!("{} not found, using an empty object", path.display());
        }
        let handle = MeshHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        log::info!("load {} -> {:?}", path.display(), handle);
        Ok(vec![handle])
    }

    fn update_vertex_positions(
        &self,
        handle: MeshHandle,
        points: &[[f64; 3]],
    ) -> Result<(), SceneError> {
        log::debug!("{handle:?}: {} vertices", points.len());
        Ok(())
    }

    fn set_visibility(&self, handle: MeshHandle, visible: bool) -> Result<(), SceneError> {
        log::debug!("{handle:?}: visible={visible}");
        Ok(())
    }

    fn draw_debug_vector(
        &self,
        start: [f64; 3],
        end: [f64; 3],
        width: f64,
        color: Color,
    ) -> Result<(), SceneError> {
        log::debug!("vector {start:?} -> {end:?} width={width} {color:?}");
        Ok(())
    }

    fn draw_debug_sphere(
        &self,
        center: [f64; 3],
        radius: f64,
        color: Color,
    ) -> Result<(), SceneError> {
        log::debug!("sphere {center:?} r={radius} {color:?}");
        Ok(())
    }

    fn set_object_position(
        &self,
        handle: MeshHandle,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), SceneError> {
        log::debug!("{handle:?}: position [{x:.4}, {y:.4}, {z:.4}]");
        Ok(())
    }

    fn set_object_rotation_from_quaternion(
        &self,
        handle: MeshHandle,
        w: f64,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), SceneError> {
        log::debug!("{handle:?}: rotation [{w:.4}, {x:.4}, {y:.4}, {z:.4}]");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let robot = args.robot.parse::<RobotKind>()?.build()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&robot)?);
        return Ok(());
    }

    println!(
        "{}: {} links, {} joints, {} dofs",
        robot.name(),
        robot.num_links(),
        robot.num_joints(),
        robot.num_dofs()
    );
    for (depth, layer) in robot.hierarchy().iter().enumerate() {
        let names: Vec<&str> = layer
            .iter()
            .map(|&link| robot.links()[link].name.as_str())
            .collect();
        println!("  layer {depth}: {}", names.join(", "));
    }

    let spawner = RobotSpawner::new(robot, SceneConfig::default().with_mesh_root(&args.mesh_root));
    let backend = LoggingBackend::default();
    let spawned = spawner.spawn(&backend).await?;

    let robot = spawner.robot();
    let draw = FrameDrawConfig::default()
        .with_axes(args.frames)
        .with_link_spheres(args.frames);
    let frames = update_robot_pose(&backend, spawned, robot, &robot.zero_state(), &draw)?;

    if args.frames {
        for link in robot.links_in_hierarchy_order() {
            let [x, y, z] = se3_translation(&frames[link])?;
            println!(
                "  {:<20} [{x:>8.4}, {y:>8.4}, {z:>8.4}]",
                robot.links()[link].name
            );
        }
    }

    Ok(())
}
