//! BenDan API 서버.
//!
//! 설정을 읽고 서명 컨텍스트를 한 번 만든 뒤 로그인 엔드포인트를 제공합니다.
//! 서명 비밀 키가 없거나 너무 짧으면 시작하지 않습니다.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use bendan_api::{create_router, AppState};
use bendan_auth::{SigningContext, TokenAuthority};
use bendan_core::{init_logging, AppConfig, LogConfig};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env는 없어도 됩니다.
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::load_default().context("설정 로드 실패")?;

    init_logging(LogConfig::from_config(&config.logging)).context("로깅 초기화 실패")?;

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded .env file");
    }
    info!("Starting BenDan API server...");
    info!(
        issuer = %config.auth.issuer,
        roles = ?config.auth.roles,
        policies = config.auth.policies.len(),
        "Configuration loaded"
    );

    let addr = config.server.socket_addr().map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. BENDAN__SERVER__HOST, BENDAN__SERVER__PORT를 확인하세요."
        );
        e
    })?;

    let context = SigningContext::from_config(&config.auth).map_err(|e| {
        error!(error = %e, "서명 컨텍스트를 만들 수 없습니다. BENDAN__AUTH__SECRET을 확인하세요.");
        e
    })?;

    let authority = Arc::new(TokenAuthority::new(Arc::new(context), &config.auth));
    let state = AppState::new(authority.clone(), &config.auth);

    info!(
        version = %state.version,
        issuer = authority.context().issuer(),
        audience = authority.context().audience(),
        policies = ?authority.policies().names().collect::<Vec<_>>(),
        "Token authority initialized"
    );

    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} 바인딩 실패"))?;
    info!(%addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("서버 실행 실패")?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
