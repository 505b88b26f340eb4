//! Serves the pages in `demo_content/` over HTTP.
//!
//! ```bash
//! cargo run --example serve_home
//! cargo run --example serve_home -- my-config.json
//! ```
//!
//! Then visit <http://127.0.0.1:8080/>.

use tinyserve::{FsContent, Server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tinyserve=debug")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_json_file(path)?,
        None => ServerConfig::default(),
    };

    let server = Server::bind(&config, FsContent::new("demo_content")).await?;
    println!("Listening on http://{}", server.local_addr());
    server.run().await?;
    Ok(())
}
