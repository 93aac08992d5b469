//! rfidlog main entrypoint.

use rfidlog::{ErrorKind, run};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        let code = match e.kind() {
            ErrorKind::InvalidInput => 2,
            ErrorKind::NotFound => 3,
            _ => 1,
        };
        std::process::exit(code);
    }
}
