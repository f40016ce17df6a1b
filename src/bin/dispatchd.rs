use std::path::PathBuf;

use clap::Parser;
use elevator_dispatch::services::{DispatchService, InputLayer, Response, spawn_clock};
use elevator_dispatch::{Config, Dispatcher, FleetEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tower::{Service, ServiceBuilder, ServiceExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Elevator dispatcher reading requests from stdin")]
struct Args {
    /// TOML config file; built-in defaults are used when absent.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    cars: Option<u32>,

    #[arg(long)]
    bottom: Option<i32>,

    #[arg(long)]
    top: Option<i32>,

    /// Milliseconds per floor.
    #[arg(long)]
    tick_ms: Option<u64>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(cars) = self.cars {
            config.fleet.cars = cars;
        }
        if let Some(bottom) = self.bottom {
            config.fleet.bottom_floor = bottom;
        }
        if let Some(top) = self.top {
            config.fleet.top_floor = top;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.clock.tick_interval_ms = tick_ms;
        }
        config.validate()?;
        Ok(config)
    }
}

fn print_response(response: Response) {
    match response {
        Response::Cars(cars) => {
            for car in cars {
                println!(
                    "car {} floor {} {} stops {:?}",
                    car.id, car.current_floor, car.direction, car.pending_stops
                );
            }
        }
        Response::Pending(calls) => {
            if calls.is_empty() {
                println!("no pending hall calls");
            }
            for call in calls {
                println!("{call}");
            }
        }
        Response::Hall(assignment) => println!("{assignment:?}"),
        Response::Cab(outcome) => println!("{outcome:?}"),
        Response::Advanced(_) | Response::Released => {}
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Args::parse().into_config()?;
    info!(
        cars = config.fleet.cars,
        bottom = config.fleet.bottom_floor,
        top = config.fleet.top_floor,
        "starting dispatcher"
    );

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<FleetEvent>();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            info!(target: "fleet", "{event}");
        }
    });

    let dispatcher = Dispatcher::from_config(&config.fleet)?.with_events(tx);
    let dispatch = DispatchService::new(dispatcher);
    let mut clock = spawn_clock(dispatch.clone(), config.clock.tick_interval());

    let mut svc = ServiceBuilder::new().layer(InputLayer).service(dispatch);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed, shutting down");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                if let Some(response) = svc.ready().await?.call(line).await? {
                    print_response(response);
                }
            }
            result = &mut clock => {
                result??;
                warn!("clock finished unexpectedly");
                break;
            }
        }
    }

    clock.abort();
    Ok(())
}
