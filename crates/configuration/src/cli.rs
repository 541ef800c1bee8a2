use crate::settings::ServerSettings;
use clap::Args;

/// Command-line overrides for the listen address.
#[derive(Debug, Clone, Default, Args)]
pub struct ServerOverrides {
    /// Address to bind the JSON API to (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind the JSON API to (overrides `server.port`).
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServerOverrides {
    pub fn apply(&self, server: &mut ServerSettings) {
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
    }
}
