//! Web framework integration surface.
//!
//! This module is the boundary between HTTP frameworks and the guards. It
//! handles:
//! - Mapping framework requests to guard inputs ([`ExtractRequest`])
//! - A framework-agnostic request view ([`RequestAdapter`])
//! - Registering guarded handlers per route ([`GuardedRoutes`])
//!
//! No framework is a dependency. Integrations implement [`ExtractRequest`]
//! for their request type, or fill a [`RequestAdapter`], and dispatch
//! through a [`GuardedRoutes`] table built at startup.

mod adapter;
mod extract;
mod middleware;

pub use adapter::RequestAdapter;
pub use extract::ExtractRequest;
pub use middleware::GuardedRoutes;
