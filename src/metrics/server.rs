use std::net::SocketAddr;

use prometheus::{Encoder, TextEncoder};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Start the Prometheus metrics endpoint in the background
pub async fn start_metrics_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(
        "Starting Prometheus metrics server on http://{}/metrics",
        addr
    );

    let listener = TcpListener::bind(addr).await?;

    tokio::spawn(async move {
        serve_metrics(listener).await;
    });

    Ok(())
}

async fn serve_metrics(listener: TcpListener) {
    loop {
        let mut stream = match listener.accept().await {
            Ok((stream, _)) => stream,
            Err(e) => {
                warn!("Metrics server failed to accept connection: {}", e);
                continue;
            }
        };

        tokio::spawn(async move {
            // Any request on this port is answered with the metrics page
            let mut buffer = [0; 1024];
            if let Err(e) = stream.read(&mut buffer).await {
                error!("Failed to read metrics request: {}", e);
                return;
            }

            let encoder = TextEncoder::new();
            let mut body = Vec::new();
            if let Err(e) = encoder.encode(&prometheus::gather(), &mut body) {
                error!("Failed to encode metrics: {}", e);
                return;
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain; version=0.0.4\r\nContent-Length: {}\r\n\r\n",
                body.len()
            );

            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.write_all(&body).await;
        });
    }
}
