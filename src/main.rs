use anyhow::Result;
use bedside::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
