//! Extraction boundary trait for web integration.
//!
//! This module defines how framework-specific request types hand the guard
//! layer what it needs: a request ID, the routed path and the current
//! principal.

use crate::principal::CurrentPrincipal;

/// Maps a framework request onto the inputs of a guard.
///
/// Integrations implement this once per framework request type. The
/// principal is extracted on every call, so each request sees the
/// authentication state at the time it is dispatched.
///
/// # Examples
///
/// ```
/// use access_guard::web::ExtractRequest;
/// use access_guard::Principal;
///
/// struct MyFrameworkRequest {
///     id: String,
///     uri: String,
///     user: Option<String>,
/// }
///
/// impl ExtractRequest for MyFrameworkRequest {
///     type Principal = Option<Principal>;
///
///     fn request_id(&self) -> &str {
///         &self.id
///     }
///
///     fn path(&self) -> &str {
///         &self.uri
///     }
///
///     fn extract_principal(&self) -> Option<Principal> {
///         self.user.as_ref().map(|u| Principal::authenticated(u.clone(), u.clone()))
///     }
/// }
/// ```
pub trait ExtractRequest {
    /// Principal type produced by the integration.
    type Principal: CurrentPrincipal;

    /// Unique identifier for this request.
    fn request_id(&self) -> &str;

    /// Path used to look up the route.
    fn path(&self) -> &str;

    /// Resolves the principal making this request.
    fn extract_principal(&self) -> Self::Principal;
}
