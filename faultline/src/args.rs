use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;

pub const DEFAULT_CONFIG: &str = "faultline.toml";

/// Faultline API server
#[derive(Debug, Parser)]
#[command(name = "faultline", about = "Serves the error-code catalog behind the fault boundary")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG, env = "FAULTLINE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "FAULTLINE_LISTEN")]
    pub listen: Option<SocketAddr>,
}

impl Args {
    /// Whether the configuration path was left at its default
    pub fn uses_default_config(&self) -> bool {
        self.config == Path::new(DEFAULT_CONFIG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["faultline"]).unwrap();
        assert!(args.uses_default_config());
        assert!(args.listen.is_none());
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from(["faultline", "-c", "/etc/faultline.toml", "--listen", "127.0.0.1:9000"]).unwrap();
        assert!(!args.uses_default_config());
        assert_eq!(args.listen, Some("127.0.0.1:9000".parse().unwrap()));
    }
}
