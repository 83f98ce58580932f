use tokio::net::TcpListener;

use tictacgo::config::Config;
use tictacgo::startup::create_web_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    std_logger::Config::logfmt().init();

    let config = Config::get()?;
    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address).await?;

    create_web_server(config, listener).await?;
    Ok(())
}
