use clap::Parser;
use elevator_dispatch::config::{DEFAULT_NUM_CARS, DEFAULT_NUM_FLOORS};
use elevator_dispatch::{
    DispatchConfig, DispatchRequest, DispatchResponse, DispatchService, Dispatcher, Direction,
    Floor, FloorValidation, Ticker,
};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tower::{ServiceBuilder, ServiceExt};

const HELP: &str = "commands: U<f> call up, D<f> call down, P<car>:<f> select floor, \
                    T step, S status, E emergency recall";

#[derive(Parser, Debug)]
#[command(about = "Multi-car elevator dispatch simulator")]
struct Args {
    /// Number of cars in the bank
    #[arg(long, default_value_t = DEFAULT_NUM_CARS)]
    cars: usize,

    /// Number of floors, numbered from 0
    #[arg(long, default_value_t = DEFAULT_NUM_FLOORS)]
    floors: Floor,

    /// Milliseconds between simulation steps
    #[arg(long, default_value_t = 200)]
    tick_ms: u64,

    /// Read commands from stdin while a background ticker steps the fleet
    #[arg(long)]
    interactive: bool,
}

async fn print_status(svc: &DispatchService, label: &str) {
    println!("{label}:");
    for car in svc.status().await {
        println!("  {car}");
    }
}

async fn scripted(svc: &DispatchService, config: &DispatchConfig) -> anyhow::Result<()> {
    let top = config.num_floors - 1;

    let car = svc.call_elevator(0, Direction::Up).await?;
    println!("Assigned car: {car}");
    svc.select_floor(car, top.min(5)).await?;

    for tick in 0..7 {
        print_status(svc, &format!("Tick {tick}")).await;
        svc.step().await;
        tokio::time::sleep(config.tick).await;
    }

    let car = svc.call_elevator(top.min(7), Direction::Down).await?;
    println!("Assigned car: {car}");
    svc.select_floor(car, top.min(2)).await?;
    for _ in 0..10 {
        svc.step().await;
    }
    print_status(svc, "Final").await;
    Ok(())
}

async fn interactive(svc: DispatchService, config: &DispatchConfig) -> anyhow::Result<()> {
    let ticker = Ticker::spawn(svc.clone(), config.tick);
    let mut stack = ServiceBuilder::new()
        .filter(FloorValidation::new(config.num_floors))
        .service(svc.clone());

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let request = match DispatchRequest::try_from(line.as_str()) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("Invalid command: {e:#}");
                continue;
            }
        };

        match (&mut stack).oneshot(request).await {
            Ok(DispatchResponse::Assigned(car)) => println!("Assigned car: {car}"),
            Ok(DispatchResponse::Status(status)) => {
                for car in status {
                    println!("  {car}");
                }
            }
            Ok(DispatchResponse::Accepted | DispatchResponse::Stepped) => println!("ok"),
            Err(e) => eprintln!("Rejected: {e}"),
        }
    }

    let ticks = ticker.stop().await?;
    println!("Ran {ticks} ticks");
    print_status(&svc, "Final").await;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = DispatchConfig {
        num_cars: args.cars,
        num_floors: args.floors,
        tick: Duration::from_millis(args.tick_ms),
    };
    let svc = DispatchService::from_config(&config)?;

    if args.interactive {
        interactive(svc, &config).await
    } else {
        scripted(&svc, &config).await
    }
}
