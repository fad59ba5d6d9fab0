#[tokio::main]
async fn main() -> Result<(), emedic_lib::StartupError> {
    emedic_lib::run().await
}
