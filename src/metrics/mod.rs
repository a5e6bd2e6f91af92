pub mod listener_metrics;
pub mod server;

pub use listener_metrics::ListenerMetrics;
pub use server::start_metrics_server;
