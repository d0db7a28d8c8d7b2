use config::HostConfig;
use tracing::{error, info, Level};

mod config;
mod spa;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_max_level(Level::INFO)
		.init();

	let config = match HostConfig::from_env() {
		Ok(config) => config,
		Err(err) => {
			error!("Can't start: {err}");
			return Err(err.into());
		}
	};

	info!(dist_dir = %config.dist_dir.display(), "Serving frontend bundle");

	let app = spa::router(&config.dist_dir);
	let listener = tokio::net::TcpListener::bind(config.addr).await?;

	info!(addr = %config.addr, "Listening");

	axum::serve(listener, app).await?;

	Ok(())
}
