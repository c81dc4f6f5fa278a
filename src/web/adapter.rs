//! Request adapter for mapping HTTP requests to guard inputs.

use std::collections::HashMap;

use crate::principal::Principal;

use super::ExtractRequest;

/// Framework-agnostic view of an incoming request.
///
/// This type holds simple owned data so it does not couple to any specific
/// framework's request types. Integrations fill it from their own request
/// and session types.
///
/// # Examples
///
/// ```
/// use access_guard::web::{ExtractRequest, RequestAdapter};
/// use access_guard::{CurrentPrincipal, Principal};
///
/// let mut adapter = RequestAdapter::new("req-12345", "/admin");
/// adapter.set_principal(Some(Principal::authenticated("user-1", "Alice")));
/// adapter.add_path_param("id", "42");
///
/// assert_eq!(adapter.request_id(), "req-12345");
/// assert!(adapter.extract_principal().is_authenticated());
/// assert_eq!(adapter.path_param("id"), Some("42"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    request_id: String,
    path: String,
    principal: Option<Principal>,
    path_params: HashMap<String, String>,
}

impl RequestAdapter {
    /// Creates an adapter for an anonymous request to `path`.
    pub fn new(request_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            path: path.into(),
            principal: None,
            path_params: HashMap::new(),
        }
    }

    /// Sets the principal resolved by the host's authentication layer.
    pub fn set_principal(&mut self, principal: Option<Principal>) {
        self.principal = principal;
    }

    /// Adds a path parameter from routing.
    pub fn add_path_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.path_params.insert(key.into(), value.into());
    }

    /// Returns a path parameter, if present.
    pub fn path_param(&self, key: &str) -> Option<&str> {
        self.path_params.get(key).map(String::as_str)
    }

    /// Returns a reference to the principal, if present.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

impl ExtractRequest for RequestAdapter {
    type Principal = Option<Principal>;

    fn request_id(&self) -> &str {
        &self.request_id
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn extract_principal(&self) -> Option<Principal> {
        self.principal.clone()
    }
}
