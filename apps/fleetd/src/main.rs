//! fleetd — a simulated robot taxi fleet on a small grid.
//!
//! Robots are tokio tasks.  Each one decodes the mission commands addressed
//! to it, drives the fewest-hop path to the commanded node one intersection
//! per step, and reports every intersection it reaches.  A seeded generator
//! submits customer requests.  One robot goes silent halfway through so the
//! timeout sweep evicts it and its request is served by another robot.
//!
//! Usage: `fleetd [--json-logs] [config.toml]`.  Without a file the demo uses
//! short timeouts so an eviction happens within a few seconds.
//! `--json-logs` switches log output to one JSON object per line.

mod network;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use fd_core::{DispatchConfig, NodeId, RobotName};
use fd_dispatch::DispatcherBuilder;
use fd_runtime::{
    ChannelCommandSink, ChannelLocationSource, CommandCodec, EncodedCommand, FleetRuntime,
    JsonCodec, LocationReport, LogStatusSink, RuntimeHandle, TokioClock, logging,
};
use fd_spatial::{RoadNetwork, shortest_path};

use network::build_grid;

// ── Constants ─────────────────────────────────────────────────────────────────

const GRID_COLS:        u32      = 5;
const GRID_ROWS:        u32      = 4;
const ROBOT_COUNT:      usize    = 4;
const REQUEST_COUNT:    usize    = 12;
const SEED:             u64      = 42;
const STEP:             Duration = Duration::from_millis(250);
const REQUEST_INTERVAL: Duration = Duration::from_millis(900);
/// Robot 0 stops reporting after this many steps.
const SILENT_AFTER:     u32      = 24;
const RUN_FOR:          Duration = Duration::from_secs(25);

// ── Simulated robot ───────────────────────────────────────────────────────────

struct RobotStats {
    name:     RobotName,
    hops:     u32,
    missions: u32,
    silent:   bool,
}

/// Drive one robot until its command channel closes or it goes silent.
async fn simulate_robot(
    name:         RobotName,
    start:        NodeId,
    network:      Arc<RoadNetwork>,
    mut commands: mpsc::Receiver<Vec<u8>>,
    reports:      mpsc::Sender<LocationReport>,
    silent_after: Option<u32>,
) -> RobotStats {
    let mut stats = RobotStats { name: name.clone(), hops: 0, missions: 0, silent: false };
    let mut here = start;
    let mut route: VecDeque<NodeId> = VecDeque::new();
    let mut steps = 0u32;

    let mut ticker = time::interval(STEP);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            payload = commands.recv() => {
                let Some(payload) = payload else { break };
                let command = match JsonCodec.decode(&payload) {
                    Ok(command) => command,
                    Err(err) => {
                        warn!(robot = %name, %err, "undecodable mission command");
                        continue;
                    }
                };
                stats.missions += 1;
                route = shortest_path(&*network, here, command.target)
                    .map(|path| path.into_iter().skip(1).collect())
                    .unwrap_or_default();
                debug!(robot = %name, target = %command.target, hops = route.len(), "new mission");
            }
            _ = ticker.tick() => {
                steps += 1;
                if silent_after.is_some_and(|n| steps > n) {
                    info!(robot = %name, "robot goes silent");
                    stats.silent = true;
                    break;
                }
                if let Some(next) = route.pop_front() {
                    here = next;
                    stats.hops += 1;
                }
                let report = LocationReport { robot: name.clone(), node: here, next: route.front().copied() };
                if reports.send(report).await.is_err() {
                    break;
                }
            }
        }
    }
    stats
}

/// Deliver encoded commands to the robot they are addressed to.
async fn route_commands(
    mut encoded: mpsc::UnboundedReceiver<EncodedCommand>,
    robots:      HashMap<RobotName, mpsc::Sender<Vec<u8>>>,
) {
    while let Some(EncodedCommand { robot, payload }) = encoded.recv().await {
        let Some(tx) = robots.get(&robot) else {
            warn!(robot = %robot, "command for unknown robot dropped");
            continue;
        };
        if tx.send(payload).await.is_err() {
            debug!(robot = %robot, "robot stopped; command dropped");
        }
    }
}

/// Submit `REQUEST_COUNT` random requests between distinct nodes.
async fn generate_requests(handle: RuntimeHandle, nodes: Vec<NodeId>) -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(SEED);
    for _ in 0..REQUEST_COUNT {
        time::sleep(REQUEST_INTERVAL).await;
        let start = nodes[rng.gen_range(0..nodes.len())];
        let mut target = nodes[rng.gen_range(0..nodes.len())];
        while target == start {
            target = nodes[rng.gen_range(0..nodes.len())];
        }
        let id = handle.submit_request(start, target).await?;
        debug!(request = %id, %start, %target, "customer request submitted");
    }
    Ok(())
}

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config:    Option<String>,
    json_logs: bool,
}

/// Parse the arguments after the program name.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    for arg in args {
        match arg.as_str() {
            "--json-logs" => cli.json_logs = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ if cli.config.is_some() => bail!("more than one config file given"),
            _ => cli.config = Some(arg),
        }
    }
    Ok(cli)
}

fn load_config(path: Option<&str>) -> Result<DispatchConfig> {
    match path {
        Some(path) => DispatchConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {path}")),
        None => Ok(DispatchConfig { timeout_secs: 3, sweep_interval_secs: 1, ..DispatchConfig::default() }),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_args(std::env::args().skip(1))?;
    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }
    let config = load_config(cli.config.as_deref())?;

    println!("=== fleetd — fleet dispatcher demo ===");
    println!(
        "Robots: {ROBOT_COUNT}  |  Requests: {REQUEST_COUNT}  |  Seed: {SEED}  |  Timeout: {} s",
        config.timeout_secs
    );

    // 1. Road network.
    let (network, nodes) = build_grid(GRID_COLS, GRID_ROWS)?;
    println!("Road network: {} nodes, {} edges", network.node_count(), network.edge_count());
    println!();
    let network = Arc::new(network);

    // 2. Dispatcher and runtime.
    let (command_sink, encoded) = ChannelCommandSink::channel(Arc::new(JsonCodec));
    let dispatcher = DispatcherBuilder::new(network.clone())
        .config(config)
        .clock(TokioClock::new())
        .command_sink(command_sink)
        .status_sink(LogStatusSink)
        .build()?;

    let (reports_tx, locations) = ChannelLocationSource::channel(64);
    let (runtime, handle) = FleetRuntime::new(dispatcher);
    let runtime_task = tokio::spawn(runtime.with_location_source(locations).run());

    // 3. Robots, spread along the top row.
    let mut inboxes = HashMap::new();
    let mut robot_tasks = Vec::with_capacity(ROBOT_COUNT);
    for i in 0..ROBOT_COUNT {
        let name = RobotName::new(format!("taxi-{i}"));
        let (tx, rx) = mpsc::channel(8);
        inboxes.insert(name.clone(), tx);
        let start = nodes[i % nodes.len()];
        let silent_after = (i == 0).then_some(SILENT_AFTER);
        robot_tasks.push(tokio::spawn(simulate_robot(
            name,
            start,
            network.clone(),
            rx,
            reports_tx.clone(),
            silent_after,
        )));
    }
    drop(reports_tx);
    let router_task = tokio::spawn(route_commands(encoded, inboxes));

    // 4. Customers.
    let generator = tokio::spawn(generate_requests(handle.clone(), nodes));

    time::sleep(RUN_FOR).await;
    generator.await??;
    handle.shutdown().await?;
    let summary = runtime_task.await??;
    router_task.abort();

    // 5. Summary.
    println!("{summary}");
    println!();
    println!("{:<10} {:>8} {:>6} {:<8}", "Robot", "Missions", "Hops", "Status");
    println!("{}", "-".repeat(36));
    // Robots stop on their own once the runtime no longer takes reports.
    for task in robot_tasks {
        let Ok(stats) = task.await else { continue };
        println!(
            "{:<10} {:>8} {:>6} {:<8}",
            stats.name.as_str(),
            stats.missions,
            stats.hops,
            if stats.silent { "silent" } else { "active" },
        );
    }

    Ok(())
}
