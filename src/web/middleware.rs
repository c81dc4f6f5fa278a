//! Route table that puts a guard in front of every registered handler.
//!
//! Routes are registered once at startup; registration is where setup
//! errors surface. Dispatching a request only ever yields the handler's
//! result or a host fallback, plus `UnknownRoute` for unregistered paths.
//!
//! # Integration Flow
//!
//! ```text
//! HTTP Request
//!   ↓
//! Framework-specific code builds RequestAdapter (or implements ExtractRequest)
//!   ↓
//! GuardedRoutes::dispatch()
//!   ↓
//! Guard::check() against the extracted principal
//!   ↓
//! Handler result, or the host fallback for the denial
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::context::RequestContext;
use crate::error::Error;
use crate::guard::{Guard, Guarded};
use crate::host::GuardHost;

use super::ExtractRequest;

type Handler<Req, R> = Box<dyn Fn(&Req) -> R + Send + Sync>;

/// Guarded routes keyed by path.
///
/// # Examples
///
/// ```
/// use access_guard::web::{GuardedRoutes, RequestAdapter};
/// use access_guard::{Guard, GuardHost, Principal};
///
/// let host = GuardHost::builder()
///     .unauthenticated(|| "302 /login".to_string())
///     .unauthorized(|| "403".to_string())
///     .unconfirmed_email(|| "302 /confirm".to_string())
///     .build()
///     .unwrap();
///
/// let mut routes = GuardedRoutes::new(host);
/// routes
///     .route("/profile", Guard::LoginRequired, |_req: &RequestAdapter| "200 profile".to_string())
///     .unwrap();
///
/// let anonymous = RequestAdapter::new("req-1", "/profile");
/// assert_eq!(routes.dispatch(&anonymous).unwrap(), "302 /login");
///
/// let mut signed_in = RequestAdapter::new("req-2", "/profile");
/// signed_in.set_principal(Some(Principal::authenticated("u1", "Alice")));
/// assert_eq!(routes.dispatch(&signed_in).unwrap(), "200 profile");
/// ```
pub struct GuardedRoutes<Req, R> {
    host: GuardHost<R>,
    routes: HashMap<String, Guarded<Handler<Req, R>>>,
}

impl<Req, R> GuardedRoutes<Req, R> {
    /// Creates an empty route table answering denials with `host`'s fallbacks.
    pub fn new(host: GuardHost<R>) -> Self {
        Self {
            host,
            routes: HashMap::new(),
        }
    }

    /// Registers `handler` at `path` behind `guard`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateRoute` if `path` is already registered.
    pub fn route<F>(
        &mut self,
        path: impl Into<String>,
        guard: impl Into<Guard>,
        handler: F,
    ) -> Result<&mut Self, Error>
    where
        F: Fn(&Req) -> R + Send + Sync + 'static,
    {
        let path = path.into();
        if self.routes.contains_key(&path) {
            return Err(Error::DuplicateRoute(path));
        }

        let guard = guard.into();
        tracing::debug!(%path, %guard, "registered guarded route");
        let handler: Handler<Req, R> = Box::new(handler);
        self.routes.insert(path, guard.wrap(handler));
        Ok(self)
    }

    /// Returns the guard registered for `path`.
    pub fn guard_for(&self, path: &str) -> Option<&Guard> {
        self.routes.get(path).map(Guarded::guard)
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes `request` through its guard.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownRoute` if no route matches the request path.
    /// Guard denials are not errors; they produce the fallback's result.
    pub fn dispatch(&self, request: &Req) -> Result<R, Error>
    where
        Req: ExtractRequest,
    {
        let route = self.routes.get(request.path()).ok_or_else(|| {
            tracing::warn!(
                request_id = %request.request_id(),
                path = %request.path(),
                "no route registered"
            );
            Error::UnknownRoute(request.path().to_string())
        })?;

        let principal = request.extract_principal();
        let ctx = RequestContext::new(request.request_id(), &principal);
        Ok(route.call(&self.host, &ctx, request))
    }
}

impl<Req, R> fmt::Debug for GuardedRoutes<Req, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedRoutes")
            .field("host", &self.host)
            .field("routes", &self.routes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::roles_required;
    use crate::principal::Principal;
    use crate::web::RequestAdapter;

    fn host() -> GuardHost<String> {
        GuardHost::builder()
            .unauthenticated(|| "login".to_string())
            .unauthorized(|| "forbidden".to_string())
            .unconfirmed_email(|| "confirm".to_string())
            .build()
            .expect("complete host")
    }

    fn request(path: &str, principal: Option<Principal>) -> RequestAdapter {
        let mut adapter = RequestAdapter::new("req-mw", path);
        adapter.set_principal(principal);
        adapter
    }

    #[test]
    fn duplicate_route_is_rejected() {
        let mut routes = GuardedRoutes::new(host());
        routes
            .route("/a", Guard::LoginRequired, |_: &RequestAdapter| "a".to_string())
            .unwrap();

        let err = routes
            .route("/a", Guard::ConfirmEmailRequired, |_: &RequestAdapter| {
                "b".to_string()
            })
            .unwrap_err();
        assert_eq!(err, Error::DuplicateRoute("/a".to_string()));
        assert_eq!(routes.guard_for("/a"), Some(&Guard::LoginRequired));
    }

    #[test]
    fn unknown_route_is_an_error() {
        let routes: GuardedRoutes<RequestAdapter, String> = GuardedRoutes::new(host());
        assert!(routes.is_empty());

        let err = routes.dispatch(&request("/missing", None)).unwrap_err();
        assert_eq!(err, Error::UnknownRoute("/missing".to_string()));
    }

    #[test]
    fn handler_sees_the_request() {
        let mut routes = GuardedRoutes::new(host());
        routes
            .route("/users", Guard::LoginRequired, |req: &RequestAdapter| {
                format!("user {}", req.path_param("id").unwrap_or("?"))
            })
            .unwrap();

        let mut req = request("/users", Some(Principal::authenticated("u1", "Alice")));
        req.add_path_param("id", "42");
        assert_eq!(routes.dispatch(&req).unwrap(), "user 42");
    }

    #[test]
    fn routes_accept_role_decorators() {
        let mut routes = GuardedRoutes::new(host());
        routes
            .route("/admin", roles_required(["admin"]), |_: &RequestAdapter| {
                "admin".to_string()
            })
            .unwrap();
        assert_eq!(routes.len(), 1);

        let viewer = Principal::authenticated("u2", "Bob").with_role("viewer");
        assert_eq!(
            routes.dispatch(&request("/admin", Some(viewer))).unwrap(),
            "forbidden"
        );

        let admin = Principal::authenticated("u1", "Alice").with_role("admin");
        assert_eq!(
            routes.dispatch(&request("/admin", Some(admin))).unwrap(),
            "admin"
        );
    }
}
