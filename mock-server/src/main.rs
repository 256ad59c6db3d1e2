use mock_server::MockOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    // Emulates the upstream sometimes returning the detail record inside an array.
    let wrap_detail = std::env::var("MOCK_WRAP_DETAIL").is_ok_and(|v| v == "1" || v == "true");

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, wrap_detail, "listening");
    mock_server::run_with(listener, MockOptions { wrap_detail }).await
}
