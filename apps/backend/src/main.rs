#[tokio::main]
async fn main() -> anyhow::Result<()> {
    farsiflow_backend::run().await
}
