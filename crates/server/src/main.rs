#[tokio::main]
async fn main() -> anyhow::Result<()> {
    workflow_importer_server::start().await
}
