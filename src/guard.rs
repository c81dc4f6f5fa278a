use std::fmt;

use crate::config::GuardConfig;
use crate::context::RequestContext;
use crate::error::{Denial, DenialKind};
use crate::host::GuardHost;
use crate::principal::CurrentPrincipal;
use crate::role::{RoleRequirement, RoleTerm};

/// A precondition checked before a handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// The principal must be authenticated
    LoginRequired,
    /// The principal must be authenticated and satisfy the requirement
    RolesRequired(RoleRequirement),
    /// The principal must be authenticated and, when confirmation is
    /// enabled, have a confirmed email
    ConfirmEmailRequired,
}

impl Guard {
    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Guard::LoginRequired => "login_required",
            Guard::RolesRequired(_) => "roles_required",
            Guard::ConfirmEmailRequired => "confirm_email_required",
        }
    }

    /// Decides whether `principal` may proceed.
    ///
    /// Authentication is always checked before roles. The email guard
    /// reports an unauthenticated principal as [`DenialKind::UnconfirmedEmail`],
    /// so hosts answer both cases with the same fallback.
    ///
    /// # Errors
    ///
    /// Returns a [`Denial`] naming the fallback that should answer the request.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_guard::{DenialKind, Guard, GuardConfig, Principal, RoleRequirement};
    ///
    /// let guard = Guard::RolesRequired(RoleRequirement::new().require("admin"));
    /// let config = GuardConfig::default();
    ///
    /// let anonymous = Principal::anonymous();
    /// assert_eq!(guard.check(&anonymous, &config).unwrap_err().kind, DenialKind::Unauthenticated);
    ///
    /// let bob = Principal::authenticated("u2", "Bob");
    /// assert_eq!(guard.check(&bob, &config).unwrap_err().kind, DenialKind::Unauthorized);
    ///
    /// let alice = Principal::authenticated("u1", "Alice").with_role("admin");
    /// assert!(guard.check(&alice, &config).is_ok());
    /// ```
    pub fn check<P>(&self, principal: &P, config: &GuardConfig) -> Result<(), Denial>
    where
        P: CurrentPrincipal + ?Sized,
    {
        match self {
            Guard::LoginRequired => require_authenticated(principal),
            Guard::RolesRequired(requirement) => {
                require_authenticated(principal)?;
                if !principal.has_roles(requirement) {
                    return Err(Denial::new(
                        DenialKind::Unauthorized,
                        format!("Requires roles {}", requirement),
                    ));
                }
                Ok(())
            }
            Guard::ConfirmEmailRequired => {
                if principal.is_authenticated()
                    && (!config.requires_confirmed_email() || principal.has_confirmed_email())
                {
                    return Ok(());
                }
                Err(Denial::new(
                    DenialKind::UnconfirmedEmail,
                    "A confirmed email is required",
                ))
            }
        }
    }

    /// Wraps `handler` so it only runs when this guard passes.
    pub fn wrap<H>(self, handler: H) -> Guarded<H> {
        Guarded {
            guard: self,
            handler,
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::RolesRequired(requirement) => write!(f, "roles_required({})", requirement),
            other => f.write_str(other.name()),
        }
    }
}

fn require_authenticated<P>(principal: &P) -> Result<(), Denial>
where
    P: CurrentPrincipal + ?Sized,
{
    if principal.is_authenticated() {
        Ok(())
    } else {
        Err(Denial::new(
            DenialKind::Unauthenticated,
            "Authentication required",
        ))
    }
}

/// A handler behind a [`Guard`].
///
/// Calling a `Guarded` handler never changes it; the same principal and
/// arguments always produce the same routing decision.
#[derive(Clone)]
pub struct Guarded<H> {
    guard: Guard,
    handler: H,
}

impl<H> Guarded<H> {
    /// Returns the guard in front of the handler.
    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    /// Runs the guard and then either the handler or the host fallback.
    ///
    /// The handler receives `args` unchanged and its result is returned
    /// as-is. On denial the handler is not invoked and the fallback's result
    /// is returned instead.
    pub fn call<P, A, R>(&self, host: &GuardHost<R>, ctx: &RequestContext<'_, P>, args: A) -> R
    where
        H: Fn(A) -> R,
        P: CurrentPrincipal,
    {
        let log = ctx.log();
        match self.guard.check(ctx.principal(), host.config()) {
            Ok(()) => {
                log.allowed(&self.guard);
                (self.handler)(args)
            }
            Err(denial) => {
                log.denied(&self.guard, &denial);
                host.fallback(denial.kind)
            }
        }
    }
}

impl<H> fmt::Debug for Guarded<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guarded")
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

/// Requires an authenticated principal before `handler` runs.
///
/// Unauthenticated requests get the host's unauthenticated fallback.
pub fn login_required<H>(handler: H) -> Guarded<H> {
    Guard::LoginRequired.wrap(handler)
}

/// Requires an authenticated principal with every role term in `terms`.
///
/// Each term is either a single role, which the principal must hold, or a
/// set of roles, of which the principal must hold at least one. No terms
/// means any authenticated principal passes.
///
/// The requirement is built once here; the returned decorator can wrap any
/// number of handlers.
///
/// # Examples
///
/// ```
/// use access_guard::{roles_required, RoleTerm};
///
/// // 'a' AND ('b' OR 'c') AND 'd'
/// let decorator = roles_required([
///     RoleTerm::from("a"),
///     RoleTerm::from(["b", "c"]),
///     RoleTerm::from("d"),
/// ]);
/// let guarded = decorator.wrap(|page: u32| page + 1);
/// assert_eq!(guarded.guard().to_string(), "roles_required(a & (b | c) & d)");
/// ```
pub fn roles_required<I, T>(terms: I) -> RolesRequired
where
    I: IntoIterator<Item = T>,
    T: Into<RoleTerm>,
{
    RolesRequired {
        requirement: RoleRequirement::from_terms(terms),
    }
}

/// Requires an authenticated principal with a confirmed email before
/// `handler` runs.
///
/// Confirmation is skipped when the host disables email or email
/// confirmation. Both the unauthenticated and the unconfirmed case get the
/// host's unconfirmed-email fallback.
pub fn confirm_email_required<H>(handler: H) -> Guarded<H> {
    Guard::ConfirmEmailRequired.wrap(handler)
}

/// Decorator returned by [`roles_required`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolesRequired {
    requirement: RoleRequirement,
}

impl RolesRequired {
    /// Returns the requirement this decorator enforces.
    pub fn requirement(&self) -> &RoleRequirement {
        &self.requirement
    }

    /// Wraps `handler` behind the role requirement.
    pub fn wrap<H>(&self, handler: H) -> Guarded<H> {
        Guard::RolesRequired(self.requirement.clone()).wrap(handler)
    }
}

impl From<RolesRequired> for Guard {
    fn from(decorator: RolesRequired) -> Self {
        Guard::RolesRequired(decorator.requirement)
    }
}
