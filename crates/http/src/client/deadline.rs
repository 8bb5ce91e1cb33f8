//! Per-call deadline for the browser build
//!
//! reqwest's fetch backend has no client-level timeout, so the call is raced against a
//! timer instead. Native builds let reqwest enforce the same limit.

use super::error::ClientError;
use futures::future::{Either, select};
use std::future::Future;
use std::pin::pin;
use std::time::Duration;

/// Resolve `call`, or fail with [`ClientError::Timeout`] once `deadline` fires first
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) async fn race<T>(
    call: impl Future<Output = Result<T, ClientError>>,
    deadline: impl Future<Output = ()>,
    timeout: Duration,
) -> Result<T, ClientError> {
    match select(pin!(call), pin!(deadline)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ClientError::Timeout(timeout)),
    }
}

/// Bound `call` by `timeout` using a browser timer
#[cfg(target_arch = "wasm32")]
pub(crate) async fn with_timeout<T>(
    call: impl Future<Output = Result<T, ClientError>>,
    timeout: Duration,
) -> Result<T, ClientError> {
    let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
    race(call, gloo_timers::future::TimeoutFuture::new(millis), timeout).await
}
