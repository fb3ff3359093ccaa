use path_engine::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let mut config = ServerConfig::from_env();

    // First argument overrides the port
    if let Some(port) = env::args().nth(1) {
        config.port = port.parse()?;
    }

    println!("Starting path engine web server");
    println!("   Port: {}", config.port);
    println!("   Static files: {}", config.static_dir);
    println!("   CORS enabled: {}", config.enable_cors);
    println!("   Max sessions: {}", config.max_sessions);
    println!("   Max request nodes: {}", config.max_request_nodes);

    start_server_with_config(config).await?;

    Ok(())
}
