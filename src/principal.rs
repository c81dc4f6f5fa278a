use std::collections::BTreeSet;

use crate::email::{user_has_confirmed_email, DataAdapter, UserRecord};
use crate::role::{Role, RoleRequirement};

/// The view of "the user making this request" that guards read.
///
/// Hosts implement this over whatever their authentication layer produces.
/// Guards never hold on to a principal; it is passed in on every call.
pub trait CurrentPrincipal {
    /// Returns true if the request carries an authenticated user.
    fn is_authenticated(&self) -> bool;

    /// Returns true if the principal satisfies every term of `requirement`.
    fn has_roles(&self, requirement: &RoleRequirement) -> bool;

    /// Returns true if the principal has at least one confirmed email.
    fn has_confirmed_email(&self) -> bool;
}

/// A resolved principal: identity, roles and email-confirmation status.
///
/// # Examples
///
/// ```
/// use access_guard::{CurrentPrincipal, Principal, RoleRequirement};
///
/// let alice = Principal::authenticated("user-1", "Alice")
///     .with_role("admin")
///     .with_confirmed_email(true);
///
/// assert!(alice.is_authenticated());
/// assert!(alice.has_roles(&RoleRequirement::new().require(["admin", "ops"])));
/// assert!(!Principal::anonymous().is_authenticated());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    /// Unique identifier for this principal
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the authentication layer accepted this principal
    pub authenticated: bool,
    /// Roles held by this principal
    pub roles: BTreeSet<Role>,
    /// Whether at least one email is confirmed
    pub confirmed_email: bool,
}

impl Principal {
    /// An unauthenticated principal with no roles.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated principal with no roles and no confirmed email.
    pub fn authenticated(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            authenticated: true,
            ..Self::default()
        }
    }

    /// Resolves an authenticated principal for a stored user record.
    ///
    /// Confirmation status is looked up through the data adapter; adapter
    /// errors are returned as-is. The user id doubles as the display name,
    /// since [`UserRecord`] carries no name.
    pub fn for_user<U, A>(user: &U, adapter: &A) -> Result<Self, A::Error>
    where
        U: UserRecord,
        A: DataAdapter,
    {
        let confirmed = user_has_confirmed_email(adapter, user)?;
        Ok(Self::authenticated(user.id(), user.id()).with_confirmed_email(confirmed))
    }

    /// Adds a role.
    pub fn with_role(mut self, role: impl Into<Role>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Adds several roles.
    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Sets the email-confirmation status.
    pub fn with_confirmed_email(mut self, confirmed: bool) -> Self {
        self.confirmed_email = confirmed;
        self
    }

    /// Returns true if the principal holds `role`.
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}

impl CurrentPrincipal for Principal {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn has_roles(&self, requirement: &RoleRequirement) -> bool {
        requirement.is_satisfied_by(|role| self.has_role(role))
    }

    fn has_confirmed_email(&self) -> bool {
        self.confirmed_email
    }
}

// A missing principal is an anonymous one.
impl<P: CurrentPrincipal> CurrentPrincipal for Option<P> {
    fn is_authenticated(&self) -> bool {
        self.as_ref().is_some_and(P::is_authenticated)
    }

    fn has_roles(&self, requirement: &RoleRequirement) -> bool {
        self.as_ref().is_some_and(|p| p.has_roles(requirement))
    }

    fn has_confirmed_email(&self) -> bool {
        self.as_ref().is_some_and(P::has_confirmed_email)
    }
}

impl<P: CurrentPrincipal + ?Sized> CurrentPrincipal for &P {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }

    fn has_roles(&self, requirement: &RoleRequirement) -> bool {
        (**self).has_roles(requirement)
    }

    fn has_confirmed_email(&self) -> bool {
        (**self).has_confirmed_email()
    }
}
