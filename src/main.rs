#[tokio::main]
async fn main() {
    if let Err(e) = medsafe_lib::run().await {
        tracing::error!("MedSafe failed: {e}");
        eprintln!("medsafe: {e}");
        std::process::exit(1);
    }
}
