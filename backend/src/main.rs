//! Server entry-point: loads configuration, initialises tracing and runs the
//! shell API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use homestead::inbound::http::health::HealthState;
use homestead::inbound::http::session_config::{BuildMode, SessionSettings};
use homestead::settings::ShellSettings;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ShellSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let session = SessionSettings::from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    session.log_summary();

    let config = ServerConfig::new(&settings, session);
    info!(
        bind_addr = %config.bind_addr(),
        otp_acceptance = ?settings.otp_acceptance(),
        guard_mode = ?settings.guard_mode(),
        "starting homestead shell"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
