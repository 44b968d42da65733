//! Command line and environment configuration for the server.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

/// The REST API server for the expense tracker.
///
/// Every option can also be set with an environment variable, or in a `.env`
/// file in the working directory.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database.
    #[arg(long, env = "DB_PATH", default_value = "expenses.db")]
    pub db_path: String,

    /// The address to serve the API from.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Browser origins allowed to call the API, separated by commas.
    #[arg(
        long = "cors-origin",
        env = "CORS_ORIGIN",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub cors_origins: Vec<String>,
}

impl Config {
    /// The socket address to bind the server to.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
