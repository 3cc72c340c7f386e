//! # Parameter Store Controller
//!
//! A Kubernetes controller that mirrors AWS Systems Manager Parameter Store
//! parameters into Kubernetes Secrets.
//!
//! Each `ParameterStore` resource names one parameter or path, plus a list of
//! individually keyed parameters. The controller resolves them and keeps a
//! Secret of the same name in sync, recording unresolvable list entries as
//! `ssm.aws/<name>_error` annotations on the Secret.
//!
//! ## Environment
//!
//! - `LOCAL_STACK_ENDPOINT`: Send Parameter Store calls to a LocalStack endpoint
//! - `METRICS_PORT`: Port for `/metrics`, `/healthz` and `/readyz` (default 5000)
//! - `RECONCILE_INTERVAL_SECS`: Resync period after a successful reconciliation
//! - `BACKOFF_MIN_MINUTES` / `BACKOFF_MAX_MINUTES`: Retry backoff bounds
//! - `RUST_LOG`: Log filter (default `parameter_store_controller=info`)

use anyhow::Result;
use parameter_store_controller::runtime::initialization::initialize;
use parameter_store_controller::runtime::watch_loop::run_watch_loop;

#[tokio::main]
async fn main() -> Result<()> {
    let init = initialize().await?;

    run_watch_loop(init.client, init.reconciler, init.server_state).await;

    Ok(())
}
