use anyhow::Result;
use polydapp::app::handler;

#[tokio::main]
async fn main() -> Result<()> {
    handler::init().await
}
