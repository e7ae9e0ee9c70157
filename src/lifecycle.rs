//! Post-construction lifecycle hook invocation

use crate::{error::Error, AfterInit, Token};

/// Runs the post-construction hook of a freshly built instance
/// and waits for it to complete.
///
/// Called exactly once per physical construction, never on cache hits.
pub(crate) async fn after_construct<T: AfterInit>(token: &Token, instance: &mut T) -> Result<(), Error> {
    #[cfg(feature = "tracing")]
    tracing::trace!(%token, "running post-construction hook");

    let result = instance.after_init().await;

    #[cfg(feature = "tracing")]
    if let Err(ref err) = result {
        tracing::error!(%token, "post-construction hook failed: {err:#}");
    }
    #[cfg(not(feature = "tracing"))]
    let _ = token;

    result
}
