//! BridgeWatch Console
//!
//! Interactive operator console for the maritime collision-risk dashboard:
//! - Debounced candidate-ship lookups per vessel type
//! - Display / own-ship-domain / collision-risk operations
//! - Alert banding with live failure reporting
//! - Console rendering of the geospatial overlay

use anyhow::Result;
use chrono::NaiveDateTime;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bridgewatch::render::{ConsoleRenderer, Renderer, TileSelector};
use bridgewatch::session::{DashboardEvent, RiskAssessment};
use bridgewatch::{
    DashboardConfig, DashboardState, HttpRiskEngine, LookupController, RiskEngine,
    RiskOrchestrator,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("\n{}", "═".repeat(60));
    println!("⚓ BridgeWatch v0.2.0 - Vessel Collision-Risk Console");
    println!("{}", "═".repeat(60));
    println!("Features: Debounced Lookups | Risk Orchestration | Alert Bands");
    println!("{}\n", "═".repeat(60));

    let config = DashboardConfig::from_env();
    info!("risk engine at {}", config.engine_url);

    let state = Arc::new(DashboardState::new());
    let engine: Arc<dyn RiskEngine> = Arc::new(HttpRiskEngine::new(&config));
    let lookup = LookupController::new(engine.clone(), state.clone(), config.debounce_window);
    let orchestrator = RiskOrchestrator::new(engine, state.clone());
    let mut tiles = TileSelector::new();
    let mut renderer = ConsoleRenderer::new();

    // Surface catalog updates, alerts, and failures as they arrive
    let mut events = state.events().subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                DashboardEvent::CatalogUpdated { ship_type, count } => {
                    println!("\n📋 {count} candidate ship(s) for type '{ship_type}'");
                }
                DashboardEvent::LookupFailed { ship_type, error } => {
                    println!("\n⚠ ship-id lookup failed for '{ship_type}': {error}");
                }
                DashboardEvent::ComputationFailed { step, error } => {
                    println!("\n⚠ {step} failed: {error} (keeping last results)");
                }
                _ => {}
            }
        }
    });

    print_help();
    let stdin = io::stdin();
    loop {
        print!("bridgewatch> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => print_help(),
            "type" => {
                let value = (!rest.is_empty()).then(|| rest.to_string());
                lookup.set_ship_type(value).await;
            }
            "own" => {
                let value = (!rest.is_empty()).then(|| rest.to_string());
                state.set_own_ship(value).await;
            }
            "target" => {
                if rest.is_empty() {
                    println!("usage: target <ship-id>");
                    continue;
                }
                let targets = state.toggle_target(rest).await;
                println!("targets: {}", targets.join(", "));
            }
            "time" => match parse_datetime(rest) {
                Some(at) => state.set_observation_time(Some(at)).await,
                None => println!("usage: time YYYY-MM-DDTHH:MM[:SS] (local)"),
            },
            "window" => {
                let kept = state.set_window_length(rest).await;
                match kept {
                    Some(units) => println!("window: {units} × 10 min"),
                    None => println!("window: unset"),
                }
            }
            "ids" => {
                let catalog = state.catalog().await;
                match catalog.ship_type {
                    Some(ship_type) => {
                        println!("{} id(s) for '{}': {}", catalog.ids.len(), ship_type, catalog.ids.join(", "))
                    }
                    None => println!("no catalog (select a ship type first)"),
                }
            }
            "display" => {
                if report(orchestrator.display().await) {
                    renderer.render(&state.overlay().await, tiles.current());
                }
            }
            "domain" => {
                if report(orchestrator.own_ship_domain().await) {
                    renderer.render(&state.overlay().await, tiles.current());
                }
            }
            "risk" => {
                if report(orchestrator.collision_risk().await) {
                    renderer.render(&state.overlay().await, tiles.current());
                }
                print_stats(&state.risk().await);
            }
            "stats" => print_stats(&state.risk().await),
            "tiles" => {
                println!("tile layer: {}", tiles.toggle().name);
            }
            "state" => {
                let selection = state.selection().await;
                println!("{}", serde_json::to_string_pretty(&selection)?);
            }
            _ => println!("unknown command (try 'help')"),
        }
    }

    println!("goodbye");
    Ok(())
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Print the outcome of an operation; true when the overlay was updated.
fn report(result: Result<(), bridgewatch::risk::OrchestratorError>) -> bool {
    use bridgewatch::risk::OrchestratorError;
    match result {
        Ok(()) => true,
        Err(OrchestratorError::Validation(message)) => {
            println!("✗ {message}");
            false
        }
        Err(OrchestratorError::Busy) => {
            println!("✗ an operation is still running");
            false
        }
        // already logged and published; the overlay keeps its last state
        Err(OrchestratorError::Engine(_)) => false,
    }
}

fn print_stats(risk: &RiskAssessment) {
    let vector = &risk.vector;
    println!("┌─ Risk Assessment ─────────────────────────");
    println!("│ VO     {:>12.5}  velocity obstacles region (TS) (km²)", vector.vo_area);
    println!("│ VR     {:>12.5}  velocity region (OS) (km²)", vector.v_area);
    println!("│ VO-CRI {:>12.5}  collision risk index", vector.vo_cri);
    println!("│ TCR    {:>12.5}  time-varying collision risk (%)", vector.tcr_percent());
    println!("│ TCPA   {:>12.5}  time to closest point of approach (min)", vector.tcpa);
    println!("└───────────────────────────────────────────");

    match risk.band() {
        Some(band) => println!("{} - {}", band, band.message()),
        None => println!("no computation yet"),
    }
}

fn print_help() {
    println!("commands:");
    println!("  type <vessel-type>    select ship type (cargo, passenger, ...); empty clears");
    println!("  time <YYYY-MM-DDTHH:MM>  set observation time (local)");
    println!("  own <ship-id>         select own ship (OS)");
    println!("  target <ship-id>      toggle a target ship (TS)");
    println!("  window <n>            time window in 10-minute units");
    println!("  ids                   show candidate ship ids");
    println!("  display               fetch and render vessel positions");
    println!("  domain                fetch and render the own-ship domain");
    println!("  risk                  run the collision-risk computation");
    println!("  stats                 show the latest risk vector");
    println!("  tiles                 toggle the map tile layer");
    println!("  state                 show the current selection");
    println!("  quit                  exit");
}
