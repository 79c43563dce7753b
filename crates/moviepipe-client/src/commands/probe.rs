//! The `probe` subcommand.

use crate::error::ClientResult;
use crate::gateway::HttpGateway;
use crate::selector::{TransportSelector, WorkerStatus};

pub async fn run(gateway_url: &str) -> ClientResult<()> {
    let gateway = HttpGateway::new(gateway_url)?;
    let mut selector = TransportSelector::new(gateway);

    match selector.probe().await {
        WorkerStatus::Available => println!("Worker status: available"),
        WorkerStatus::Unavailable => println!("Worker status: unavailable"),
        // probe() always records an outcome.
        WorkerStatus::Unknown => println!("Worker status: unknown"),
    }

    Ok(())
}
