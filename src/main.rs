mod scene;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use cubit_geom::{BlockPos, Direction, Space};
use cubit_region::Region;

use crate::scene::Scene;

const MAX_LISTED_CHUNKS: usize = 256;

#[derive(Parser)]
#[command(name = "cubit", about = "Inspect voxel regions and detect block structures")]
struct Cli {
    /// Log filter (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the geometry of the box between two corners
    Info {
        #[arg(long, default_value = scene::DEFAULT_SPACE)]
        space: String,
        /// First corner as x,y,z
        #[arg(long, value_parser = parse_pos, allow_hyphen_values = true)]
        from: BlockPos,
        /// Second corner as x,y,z
        #[arg(long, value_parser = parse_pos, allow_hyphen_values = true)]
        to: BlockPos,
        /// Chunk width used for the covered chunk list
        #[arg(long, default_value_t = 16)]
        chunk_width: u32,
    },
    /// Shrink a box to the non-empty blocks of a scene
    Contract {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long, value_parser = parse_pos, allow_hyphen_values = true)]
        from: BlockPos,
        #[arg(long, value_parser = parse_pos, allow_hyphen_values = true)]
        to: BlockPos,
        /// Contract a single face (north, south, east, west, up, down)
        #[arg(long, value_parser = parse_direction)]
        direction: Option<Direction>,
        /// Defaults to the scene's space
        #[arg(long)]
        space: Option<String>,
    },
    /// List the structures completed by the block at a position
    Check {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long, value_parser = parse_pos, allow_hyphen_values = true)]
        at: BlockPos,
        #[arg(long)]
        space: Option<String>,
    },
    /// Re-run `check` every time the scene file changes
    Watch {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long, value_parser = parse_pos, allow_hyphen_values = true)]
        at: BlockPos,
        #[arg(long)]
        space: Option<String>,
    },
}

fn parse_pos(s: &str) -> Result<BlockPos, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got '{s}'"));
    };
    let num = |v: &str| {
        v.parse::<i32>()
            .map_err(|e| format!("bad coordinate '{v}': {e}"))
    };
    Ok(BlockPos::new(num(*x)?, num(*y)?, num(*z)?))
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    Direction::parse(s).ok_or_else(|| format!("unknown direction '{s}'"))
}

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    let _ = builder.try_init();
}

fn info(space: &str, from: BlockPos, to: BlockPos, chunk_width: u32) {
    let r = Region::new(space, from, to);
    println!("{r}");
    println!("size: {} x {} x {}", r.size_x(), r.size_y(), r.size_z());
    println!("volume: {}", r.volume());
    let c = r.center();
    println!("center: ({:.1}, {:.1}, {:.1})", c.x, c.y, c.z);
    let corners: Vec<String> = r.corners().iter().map(|p| p.to_string()).collect();
    println!("corners: {}", corners.join(" "));
    // Listing stops early; a world-sized box can cover billions of columns.
    let mut chunks = r.chunk_columns(chunk_width);
    let shown: Vec<String> = chunks
        .by_ref()
        .take(MAX_LISTED_CHUNKS)
        .map(|c| format!("[{}, {}]", c.cx, c.cz))
        .collect();
    let more = if chunks.next().is_some() { " ..." } else { "" };
    println!("chunks: {}{more}", shown.join(" "));
}

fn contract(
    path: &Path,
    from: BlockPos,
    to: BlockPos,
    direction: Option<Direction>,
    space: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let scene = Scene::load(path)?;
    let space = space.map(Space::new).unwrap_or_else(|| scene.space.clone());
    let region = Region::new(space, from, to);
    let result = match direction {
        Some(dir) => Some(region.contract_toward(&scene.grid, dir)),
        None => region.contract(&scene.grid),
    };
    match result {
        Some(r) => print!("{}", toml::to_string(&r.to_record())?),
        None => println!("{region} contains only air"),
    }
    Ok(())
}

fn check(scene: &Scene, at: BlockPos, space: Option<&str>) {
    let space = space.map(Space::new).unwrap_or_else(|| scene.space.clone());
    let material = scene.grid.get(&space, at);
    let name = scene.catalog.name(material).unwrap_or("?");
    let done = scene.structures.observe(&scene.grid, &space, at, material);
    if done.is_empty() {
        println!("{name} at {at} in {space} completes nothing");
        return;
    }
    for c in done {
        println!("{} complete at origin {} (via {name} at {at})", c.name, c.origin);
    }
}

// Saves that replace the file by rename would orphan a watch on the file
// itself, so the directory is watched and events are filtered by name.
fn touches_scene(event: &notify::Event, scene: &Path) -> bool {
    use notify::EventKind;
    let relevant = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) | EventKind::Any
    );
    relevant
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == scene.file_name())
}

fn watch(path: &Path, at: BlockPos, space: Option<&str>) -> Result<(), Box<dyn Error>> {
    let (tx, rx) = mpsc::channel::<()>();
    let watched = path.to_path_buf();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::thread::spawn(move || {
        use notify::{RecursiveMode, Watcher};
        match notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            match res {
                Ok(event) if touches_scene(&event, &watched) => {
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(e) => log::warn!("watch error: {e}"),
            }
        }) {
            Ok(mut watcher) => {
                if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
                    log::error!("cannot watch {}: {e}", dir.display());
                    return;
                }
                loop {
                    std::thread::sleep(Duration::from_secs(3600));
                }
            }
            Err(e) => log::error!("file watcher unavailable: {e}"),
        }
    });

    loop {
        match Scene::load(path) {
            Ok(scene) => check(&scene, at, space),
            Err(e) => log::error!("reload of {} failed: {e}", path.display()),
        }
        // Exits when the watcher thread gives up and drops the sender.
        rx.recv()?;
        // Editors emit bursts of events per save.
        std::thread::sleep(Duration::from_millis(50));
        while rx.try_recv().is_ok() {}
        log::info!("{} changed, re-checking", path.display());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Command::Info {
            space,
            from,
            to,
            chunk_width,
        } => info(&space, from, to, chunk_width),
        Command::Contract {
            scene,
            from,
            to,
            direction,
            space,
        } => contract(&scene, from, to, direction, space)?,
        Command::Check { scene, at, space } => {
            let scene = Scene::load(&scene)?;
            check(&scene, at, space.as_deref());
        }
        Command::Watch { scene, at, space } => watch(&scene, at, space.as_deref())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_parse_with_negatives_and_spaces() {
        assert_eq!(parse_pos("1,-2, 3"), Ok(BlockPos::new(1, -2, 3)));
        assert!(parse_pos("1,2").is_err());
        assert!(parse_pos("1,2,z").is_err());
    }

    #[test]
    fn cli_parses_contract() {
        let cli = Cli::parse_from([
            "cubit",
            "--log-level",
            "debug",
            "contract",
            "--scene",
            "scene.toml",
            "--from",
            "-4,0,-4",
            "--to",
            "4,8,4",
            "--direction",
            "Up",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        let Command::Contract {
            from, direction, ..
        } = cli.command
        else {
            panic!("expected contract");
        };
        assert_eq!(from, BlockPos::new(-4, 0, -4));
        assert_eq!(direction, Some(Direction::Up));
    }

    #[test]
    fn scene_events_are_matched_by_file_name() {
        use notify::event::{CreateKind, ModifyKind};
        use notify::{Event, EventKind};

        let scene = Path::new("scenes/portal.toml");
        let saved = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/work/scenes/portal.toml"));
        assert!(touches_scene(&saved, scene));

        // Editors that write a temp file and rename it over the scene.
        let renamed = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/work/scenes/portal.toml"));
        assert!(touches_scene(&renamed, scene));

        let sibling = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/work/scenes/other.toml"));
        assert!(!touches_scene(&sibling, scene));

        let opened = Event::new(EventKind::Access(notify::event::AccessKind::Any))
            .add_path(PathBuf::from("/work/scenes/portal.toml"));
        assert!(!touches_scene(&opened, scene));
    }

    #[test]
    fn cli_rejects_unknown_direction() {
        let res = Cli::try_parse_from([
            "cubit", "contract", "--scene", "s.toml", "--from", "0,0,0", "--to", "1,1,1",
            "--direction", "sideways",
        ]);
        assert!(res.is_err());
    }
}
