use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    hubcal::tui::run().await
}
