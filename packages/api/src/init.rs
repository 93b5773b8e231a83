//! Server initialization for the queue admin.

use std::sync::LazyLock;

use actors::{RpcReplyPort, SupervisorMessage, global_registry, start_supervisor};
use db::{DbConfig, init as init_db};
use dioxus::prelude::ServerFnError;
use queue_core::QueueId;
use tokio::sync::OnceCell;

static INITIALIZED: LazyLock<OnceCell<()>> = LazyLock::new(OnceCell::new);

/// Initialize the database, start the supervisor and seed demo data.
///
/// This should be called once at server startup before handling requests.
pub async fn init_queue_admin() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!("Initializing queue admin...");

    init_db(DbConfig::from_env()).await?;

    let (supervisor, _handle) = start_supervisor().await?;
    global_registry().register_supervisor(supervisor);

    if crate::seed::should_seed().await? {
        crate::seed::seed_demo_data().await?;
    }

    crate::realtime::spawn_event_logger();

    tracing::info!("Queue admin initialized");
    Ok(())
}

/// Run [`init_queue_admin`] once; later calls wait for or reuse the result.
pub async fn ensure_initialized() -> Result<(), String> {
    INITIALIZED
        .get_or_try_init(|| async { init_queue_admin().await.map_err(|e| e.to_string()) })
        .await
        .map(|_| ())
}

/// Initialize if needed, then send a request to the supervisor and wait
/// for its reply.
pub(crate) async fn ask_supervisor<T: Send + 'static>(
    build: impl FnOnce(RpcReplyPort<T>) -> SupervisorMessage,
) -> Result<T, ServerFnError> {
    ensure_initialized()
        .await
        .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))?;

    let supervisor = global_registry()
        .get_supervisor()
        .ok_or_else(|| ServerFnError::new("Supervisor not available"))?;

    let (tx, rx) = actors::concurrency::oneshot();
    supervisor
        .send_message(build(tx.into()))
        .map_err(|e| ServerFnError::new(format!("Failed to send message: {}", e)))?;

    rx.await
        .map_err(|_| ServerFnError::new("Failed to receive response"))
}

pub(crate) fn parse_queue_id(id: &str) -> Result<QueueId, ServerFnError> {
    QueueId::parse(id.trim()).map_err(|e| ServerFnError::new(format!("Invalid queue ID: {}", e)))
}
