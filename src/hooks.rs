//! Ordered interceptor chains for request and response processing.
//!
//! A [`HookChain`] is a typed registry of async interceptors: one ordered list
//! per event kind, invoked strictly sequentially so that each hook sees the
//! previous hook's output. The same mechanism serves both value-transforming
//! interceptors and plain observers (a hook that returns its input unchanged).
//!
//! Hook failures are deliberately non-fatal: a hook that returns an error is
//! logged and the chain continues with the value it would have received, so a
//! single misbehaving interceptor can never abort a request.

use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The error type hooks may return.
///
/// Hook errors are logged and swallowed by [`HookChain::dispatch`]; they never
/// surface to the caller, so any error type convertible to a boxed error works.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// A registered interceptor: an async function from `T` to `T`.
///
/// `Hook` is a cheap clonable handle. Clones compare equal for the purposes of
/// [`HookChain::unregister`], which matches by pointer identity — keep a clone
/// of the handle you registered if you intend to remove it later.
///
/// # Examples
///
/// ```
/// use wicket::{Hook, RequestContext};
///
/// let hook = Hook::new(|mut ctx: RequestContext| async move {
///     ctx.path = format!("/v2{}", ctx.path);
///     Ok(ctx)
/// });
/// ```
pub struct Hook<T> {
    f: Arc<dyn Fn(T) -> BoxFuture<'static, Result<T, HookError>> + Send + Sync>,
}

impl<T> Clone for Hook<T> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<T> Hook<T> {
    /// Wraps an async function as a hook.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, HookError>> + Send + 'static,
    {
        Self {
            f: Arc::new(move |value| Box::pin(f(value))),
        }
    }

    async fn invoke(&self, value: T) -> Result<T, HookError> {
        (self.f)(value).await
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}

/// An ordered list of hooks for one event kind.
///
/// Registration order is invocation order. The list is shared, read-mostly
/// state: [`dispatch`](HookChain::dispatch) works on a snapshot taken when it
/// starts, so registrations made while a dispatch is in flight are not
/// observed by that dispatch.
pub struct HookChain<T> {
    hooks: RwLock<Vec<Hook<T>>>,
}

impl<T> HookChain<T> {
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(Vec::new()),
        }
    }

    /// Appends a hook. Duplicate registrations are allowed and the hook runs
    /// once per registration.
    pub fn register(&self, hook: Hook<T>) {
        self.write().push(hook);
    }

    /// Removes hooks.
    ///
    /// With `Some(hook)`, removes **all** registrations of that hook (matched
    /// by pointer identity). With `None`, clears the chain entirely.
    pub fn unregister(&self, hook: Option<&Hook<T>>) {
        let mut hooks = self.write();
        match hook {
            Some(target) => hooks.retain(|existing| !existing.ptr_eq(target)),
            None => hooks.clear(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Hook<T>>> {
        self.hooks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Hook<T>>> {
        self.hooks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> HookChain<T> {
    /// Runs every registered hook in order, sequentially, feeding each hook's
    /// output to the next.
    ///
    /// Returns the last hook's output, or `initial` unchanged when the chain
    /// is empty. A hook that returns an error is logged and skipped: the next
    /// hook receives the value the failed hook was given.
    pub async fn dispatch(&self, initial: T) -> T {
        let snapshot: Vec<Hook<T>> = self.read().clone();
        let mut value = initial;
        for hook in &snapshot {
            match hook.invoke(value.clone()).await {
                Ok(next) => value = next,
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        "Hook failed; continuing with previous value"
                    );
                }
            }
        }
        value
    }
}

impl<T> Default for HookChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HookChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookChain").field("len", &self.len()).finish()
    }
}
