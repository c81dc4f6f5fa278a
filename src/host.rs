use std::fmt;
use std::sync::Arc;

use crate::config::GuardConfig;
use crate::error::{DenialKind, Error};

/// A host-supplied fallback producing the response for a denied request.
pub type Fallback<R> = Arc<dyn Fn() -> R + Send + Sync>;

/// The host application's side of the guards: fallbacks and configuration.
///
/// A `GuardHost` can only be obtained from [`GuardHostBuilder::build`], which
/// checks that every fallback is present. Request handling therefore never
/// meets a missing fallback.
///
/// # Examples
///
/// ```
/// use access_guard::{DenialKind, GuardConfig, GuardHost};
///
/// let host = GuardHost::builder()
///     .unauthenticated(|| "302 /login")
///     .unauthorized(|| "403")
///     .unconfirmed_email(|| "302 /confirm")
///     .config(GuardConfig::default())
///     .build()
///     .expect("all fallbacks registered");
///
/// assert_eq!(host.fallback(DenialKind::Unauthorized), "403");
/// ```
pub struct GuardHost<R> {
    unauthenticated: Fallback<R>,
    unauthorized: Fallback<R>,
    unconfirmed_email: Fallback<R>,
    config: GuardConfig,
}

impl<R> GuardHost<R> {
    /// Starts building a host.
    pub fn builder() -> GuardHostBuilder<R> {
        GuardHostBuilder::new()
    }

    /// Returns the guard configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Invokes the fallback registered for `kind`.
    pub fn fallback(&self, kind: DenialKind) -> R {
        match kind {
            DenialKind::Unauthenticated => (self.unauthenticated)(),
            DenialKind::Unauthorized => (self.unauthorized)(),
            DenialKind::UnconfirmedEmail => (self.unconfirmed_email)(),
        }
    }
}

impl<R> Clone for GuardHost<R> {
    fn clone(&self) -> Self {
        Self {
            unauthenticated: Arc::clone(&self.unauthenticated),
            unauthorized: Arc::clone(&self.unauthorized),
            unconfirmed_email: Arc::clone(&self.unconfirmed_email),
            config: self.config,
        }
    }
}

impl<R> fmt::Debug for GuardHost<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardHost")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`GuardHost`].
pub struct GuardHostBuilder<R> {
    unauthenticated: Option<Fallback<R>>,
    unauthorized: Option<Fallback<R>>,
    unconfirmed_email: Option<Fallback<R>>,
    config: GuardConfig,
}

impl<R> GuardHostBuilder<R> {
    /// Creates a builder with no fallbacks and the default configuration.
    pub fn new() -> Self {
        Self {
            unauthenticated: None,
            unauthorized: None,
            unconfirmed_email: None,
            config: GuardConfig::default(),
        }
    }

    /// Sets the fallback for requests without an authenticated principal.
    pub fn unauthenticated<F>(mut self, fallback: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.unauthenticated = Some(Arc::new(fallback));
        self
    }

    /// Sets the fallback for principals missing a required role.
    pub fn unauthorized<F>(mut self, fallback: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.unauthorized = Some(Arc::new(fallback));
        self
    }

    /// Sets the fallback for principals without a confirmed email.
    pub fn unconfirmed_email<F>(mut self, fallback: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.unconfirmed_email = Some(Arc::new(fallback));
        self
    }

    /// Sets the guard configuration.
    pub fn config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the host after checking that every fallback is registered.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingFallback` naming the first absent fallback.
    pub fn build(self) -> Result<GuardHost<R>, Error> {
        Ok(GuardHost {
            unauthenticated: registered(self.unauthenticated, DenialKind::Unauthenticated)?,
            unauthorized: registered(self.unauthorized, DenialKind::Unauthorized)?,
            unconfirmed_email: registered(self.unconfirmed_email, DenialKind::UnconfirmedEmail)?,
            config: self.config,
        })
    }
}

fn registered<R>(fallback: Option<Fallback<R>>, kind: DenialKind) -> Result<Fallback<R>, Error> {
    fallback.ok_or_else(|| {
        tracing::error!(%kind, "guard host is missing a fallback");
        Error::MissingFallback(kind)
    })
}

impl<R> Default for GuardHostBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
