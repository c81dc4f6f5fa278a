//! Access guards for web route handlers.
//!
//! This crate decides whether a request may reach a handler:
//! - **Login**: the principal must be authenticated
//! - **Roles**: the principal must satisfy a conjunction of role terms
//! - **Email confirmation**: the principal must have a confirmed email
//!
//! A failed check never raises an error. The guard calls one of the host's
//! fallbacks (unauthenticated, unauthorized, unconfirmed email) and returns
//! its result instead of the handler's.
//!
//! # Core Types
//!
//! - [`CurrentPrincipal`]: What a guard reads about the user making the request
//! - [`RoleRequirement`]: Conjunction of [`RoleTerm`]s
//! - [`Guard`]: A precondition, and [`Guarded`]: a handler behind one
//! - [`GuardHost`]: Host fallbacks plus [`GuardConfig`]
//! - [`RequestContext`]: Request ID and principal passed on every call
//!
//! # Examples
//!
//! ```
//! use access_guard::{
//!     login_required, roles_required, GuardHost, Principal, RequestContext, RoleTerm,
//! };
//!
//! let host = GuardHost::builder()
//!     .unauthenticated(|| "302 /login".to_string())
//!     .unauthorized(|| "403 forbidden".to_string())
//!     .unconfirmed_email(|| "302 /confirm".to_string())
//!     .build()
//!     .expect("all fallbacks registered");
//!
//! let dashboard = login_required(|name: &str| format!("200 hello {}", name));
//! let reports = roles_required([RoleTerm::from("staff"), RoleTerm::from(["finance", "audit"])])
//!     .wrap(|_: ()| "200 reports".to_string());
//!
//! let anonymous = Principal::anonymous();
//! let ctx = RequestContext::new("req-1", &anonymous);
//! assert_eq!(dashboard.call(&host, &ctx, "guest"), "302 /login");
//!
//! let alice = Principal::authenticated("u1", "Alice").with_roles(["staff", "audit"]);
//! let ctx = RequestContext::new("req-2", &alice);
//! assert_eq!(dashboard.call(&host, &ctx, "alice"), "200 hello alice");
//! assert_eq!(reports.call(&host, &ctx, ()), "200 reports");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
pub mod email;
mod error;
mod guard;
mod host;
mod logging;
mod principal;
mod role;
pub mod web;

pub use config::{GuardConfig, ENABLE_CONFIRM_EMAIL_VAR, ENABLE_EMAIL_VAR};
pub use context::RequestContext;
pub use email::user_has_confirmed_email;
pub use error::{Denial, DenialKind, Error};
pub use guard::{
    confirm_email_required, login_required, roles_required, Guard, Guarded, RolesRequired,
};
pub use host::{Fallback, GuardHost, GuardHostBuilder};
pub use logging::GuardLog;
pub use principal::{CurrentPrincipal, Principal};
pub use role::{Role, RoleRequirement, RoleTerm};
