use dotenv::dotenv;
use taskman::commands::Cli;
use taskman::libs::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    logging::init();

    Cli::menu().await
}
