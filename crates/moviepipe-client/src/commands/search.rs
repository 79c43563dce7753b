//! The `search` subcommand.

use moviepipe_core::Movie;

use crate::error::ClientResult;
use crate::gateway::HttpGateway;
use crate::selector::{SearchParams, Transport, TransportSelector};

pub async fn run(
    gateway_url: &str,
    transport: Transport,
    params: SearchParams,
) -> ClientResult<()> {
    let gateway = HttpGateway::new(gateway_url)?;
    let mut selector = TransportSelector::new(gateway);

    let movies = selector.search(transport, &params).await?;

    if movies.is_empty() {
        println!("No movies found.");
        return Ok(());
    }

    println!("Found {} movie(s):", movies.len());
    for (i, movie) in movies.iter().enumerate() {
        println!();
        print_movie(i + 1, movie);
    }

    Ok(())
}

fn print_movie(index: usize, movie: &Movie) {
    println!("{index}. {} [{}]", movie.title, movie.genre.join(", "));
    println!("   Director: {}", movie.director);
    println!("   Starring: {}", movie.lead_actors.join(", "));
    println!(
        "   Released: {}, runtime: {}",
        movie.release_date, movie.runtime
    );
    println!("   {}", movie.description);
}
