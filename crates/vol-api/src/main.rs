#[tokio::main]
async fn main() {
    if let Err(err) = vol_api::run().await {
        tracing::error!(error = %err, "vol-api failed");
        std::process::exit(1);
    }
}
