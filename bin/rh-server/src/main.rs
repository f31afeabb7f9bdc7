//! RH Server
//!
//! Employee REST API with an audit trail of every change.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RH_CONFIG` | - | Path to a TOML config file |
//! | `RH_HTTP_HOST` | `0.0.0.0` | Bind address |
//! | `RH_HTTP_PORT` | `8080` | HTTP port |
//! | `RH_CORS_ORIGINS` | - | Comma separated allowed origins (any when empty) |
//! | `RH_DATABASE_URL` | `sqlite://rh.db?mode=rwc` | Employee database (`sqlite:` or `postgres:`) |
//! | `RH_DATABASE_MAX_CONNECTIONS` | `5` | Pool size |
//! | `RH_AUDIT_BACKEND` | `mongodb` | `mongodb` or `memory` |
//! | `RH_AUDIT_CONNECTION_STRING` | `mongodb://localhost:27017` | Audit store connection string |
//! | `RH_AUDIT_DATABASE` | `rh` | Audit store database |
//! | `RH_AUDIT_TABLE_NAME` | `FuncionarioLog` | Audit table (collection) name |
//! | `RUST_LOG` | `info` | Log level |
//! | `LOG_FORMAT` | `text` | `json` for structured output |

use std::sync::Arc;

use anyhow::Result;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use rh_config::AppConfig;
use rh_platform::{audit, build_app, employee, EmployeeService};

#[tokio::main]
async fn main() -> Result<()> {
    rh_common::init_logging("rh-server");

    info!("Starting RH Server");

    let config = AppConfig::load()?;
    config.validate()?;

    // Employee database; schema provisioned once here
    let employees = employee::repository::connect(&config.database).await?;
    employees.init_schema().await?;
    info!("Employee database ready");

    // Audit store; table provisioned once here
    let audit = audit::store::connect(&config.audit).await?;
    audit.ensure_table().await?;
    info!(table = %config.audit.table_name, "Audit log store ready");

    let service = Arc::new(EmployeeService::new(employees, audit));
    let app = build_app(service, &config.http);

    let addr = config.http.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("RH Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
