use verillm_mock::mock::{MockLLMServer, DEFAULT_ADDR};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let server = MockLLMServer::start(DEFAULT_ADDR).await?;
    println!("mock llm running on {}", server.address());

    tokio::signal::ctrl_c().await?;
    server.shutdown().await;

    Ok(())
}
