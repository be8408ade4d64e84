use employee_records_backend::routes::make_app;
use std::error::Error;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let (app, config) = make_app().await?;
    let listener = TcpListener::bind(&config.bind_addr).await?;
    println!("🚀 Server started successfully");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
