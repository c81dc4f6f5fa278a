use crate::logging::GuardLog;
use crate::principal::CurrentPrincipal;

/// Per-request input to a guard: the request id and the current principal.
///
/// Hosts build one of these for every request and pass it to
/// [`Guarded::call`](crate::Guarded::call). Nothing is looked up from global
/// state.
///
/// # Examples
///
/// ```
/// use access_guard::{CurrentPrincipal, Principal, RequestContext};
///
/// let principal = Principal::authenticated("user-1", "Alice");
/// let ctx = RequestContext::new("req-123", &principal);
///
/// assert_eq!(ctx.request_id(), "req-123");
/// assert!(ctx.principal().is_authenticated());
/// ```
#[derive(Debug)]
pub struct RequestContext<'a, P> {
    request_id: &'a str,
    principal: &'a P,
}

impl<'a, P: CurrentPrincipal> RequestContext<'a, P> {
    /// Creates a context for one request.
    pub fn new(request_id: &'a str, principal: &'a P) -> Self {
        Self {
            request_id,
            principal,
        }
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &'a str {
        self.request_id
    }

    /// Returns the principal making the request.
    pub fn principal(&self) -> &'a P {
        self.principal
    }

    /// Returns a logger that tags every event with this request's ID.
    pub fn log(&self) -> GuardLog<'a> {
        GuardLog::new(self.request_id)
    }
}

impl<P> Clone for RequestContext<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for RequestContext<'_, P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::Principal;

    #[test]
    fn context_exposes_request_id_and_principal() {
        let principal = Principal::authenticated("user-7", "Eve").with_role("admin");
        let ctx = RequestContext::new("req-ctx", &principal);

        assert_eq!(ctx.request_id(), "req-ctx");
        assert_eq!(ctx.principal().id, "user-7");
    }

    #[test]
    fn context_is_copy_for_any_principal() {
        let principal: Option<Principal> = None;
        let ctx = RequestContext::new("req-copy", &principal);
        let copy = ctx;

        assert_eq!(ctx.request_id(), copy.request_id());
        assert!(!copy.principal().is_authenticated());
    }

    #[test]
    fn log_carries_request_id() {
        let principal = Principal::anonymous();
        let ctx = RequestContext::new("req-log", &principal);
        assert_eq!(ctx.log().request_id(), "req-log");
    }
}
