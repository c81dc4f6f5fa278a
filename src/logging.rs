use crate::error::Denial;
use crate::guard::Guard;

/// Request-scoped logger for guard decisions.
///
/// `GuardLog` is obtained from [`RequestContext::log`](crate::RequestContext::log)
/// and is lifetime-bound to the request it describes. Every event carries
/// the request ID.
#[derive(Debug, Clone, Copy)]
pub struct GuardLog<'a> {
    request_id: &'a str,
}

impl<'a> GuardLog<'a> {
    pub(crate) fn new(request_id: &'a str) -> Self {
        Self { request_id }
    }

    /// Returns the request ID associated with this logger.
    pub fn request_id(&self) -> &str {
        self.request_id
    }

    /// Records that `guard` let the request through.
    pub fn allowed(&self, guard: &Guard) {
        tracing::debug!(
            request_id = %self.request_id,
            guard = guard.name(),
            "guard passed"
        );
    }

    /// Records that `guard` denied the request.
    pub fn denied(&self, guard: &Guard, denial: &Denial) {
        tracing::info!(
            request_id = %self.request_id,
            guard = guard.name(),
            kind = %denial.kind,
            reason = %denial.message,
            "guard denied request"
        );
    }
}
