#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    promo_events_backend::run().await
}
