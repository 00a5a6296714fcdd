use axum::http::HeaderValue;
use clap::Parser;
use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

/// Signing secret used when none is configured. Only suitable for local
/// development.
pub const FALLBACK_JWT_SECRET: &str = "fallback_secret";

/// bcrypt hash of the dashboard password shipped with the service. Override
/// it with `ADMIN_PASSWORD_HASH` (see `mcontrolctl hash-password`).
pub const DEFAULT_PASSWORD_HASH: &str =
    "$2b$10$CZnYpw5w1nQD0gRB9dpApuwznADD10MG1x0PCX2Cj0E7nggFHpU2K";

#[derive(Clone, Debug, Parser)]
#[command(name = "mcontrol-api", version, about = "Machine control dashboard API")]
pub struct McontrolApiConfig {
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[clap(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    #[clap(long, default_value_t = false)]
    pub dump_openapi: bool,

    #[clap(
        long,
        env = "MONGODB_URI",
        default_value = "mongodb://localhost:27017/machine-control"
    )]
    pub mongodb_uri: String,

    /// Secret used to sign and verify session tokens (HS256).
    ///
    /// The fallback value is public; always set this outside of local
    /// development.
    #[clap(long, env = "JWT_SECRET", default_value = FALLBACK_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// bcrypt hash of the single dashboard password.
    #[clap(long, env = "ADMIN_PASSWORD_HASH", default_value = DEFAULT_PASSWORD_HASH)]
    pub password_hash: String,

    /// Deployment environment name. Only reported in the startup log.
    #[clap(long, env = "NODE_ENV", default_value = "development")]
    pub node_env: String,

    /// Restrict CORS to this origin. Any origin is allowed when unset.
    #[clap(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<HeaderValue>,

    /// Serve the dashboard front-end from this directory. Paths outside
    /// `/api` fall back to `index.html`.
    #[clap(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

impl McontrolApiConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn uses_fallback_secret(&self) -> bool {
        self.jwt_secret == FALLBACK_JWT_SECRET
    }
}
