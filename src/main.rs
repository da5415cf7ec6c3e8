#[tokio::main]
async fn main() -> std::io::Result<()> {
    arena_sim::run_with_config().await
}
