use std::borrow::Cow;
use std::fmt;

/// Role identifier checked by [`RoleRequirement`].
///
/// Roles are opaque names; whatever stores them (session, database) is the
/// host's concern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Creates a role from a name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the role name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Role {
    fn from(name: &'static str) -> Self {
        Role::new(name)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Role::new(name)
    }
}

/// One term of a role requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleTerm {
    /// The principal must hold this role
    Atom(Role),
    /// The principal must hold at least one of these roles
    AnyOf(Vec<Role>),
}

impl RoleTerm {
    /// Builds an `AnyOf` term, dropping repeated roles.
    pub fn any_of<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        let mut set: Vec<Role> = Vec::new();
        for role in roles {
            let role = role.into();
            if !set.contains(&role) {
                set.push(role);
            }
        }
        RoleTerm::AnyOf(set)
    }

    /// Evaluates the term against a role-membership predicate.
    ///
    /// An `AnyOf` with no roles is never satisfied.
    pub fn is_satisfied_by<F>(&self, holds: F) -> bool
    where
        F: Fn(&Role) -> bool,
    {
        match self {
            RoleTerm::Atom(role) => holds(role),
            RoleTerm::AnyOf(roles) => roles.iter().any(holds),
        }
    }
}

impl fmt::Display for RoleTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleTerm::Atom(role) => write!(f, "{}", role),
            RoleTerm::AnyOf(roles) => {
                f.write_str("(")?;
                for (i, role) in roles.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}", role)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<Role> for RoleTerm {
    fn from(role: Role) -> Self {
        RoleTerm::Atom(role)
    }
}

impl From<&'static str> for RoleTerm {
    fn from(name: &'static str) -> Self {
        RoleTerm::Atom(Role::from(name))
    }
}

impl From<String> for RoleTerm {
    fn from(name: String) -> Self {
        RoleTerm::Atom(Role::from(name))
    }
}

impl<const N: usize> From<[&'static str; N]> for RoleTerm {
    fn from(names: [&'static str; N]) -> Self {
        RoleTerm::any_of(names)
    }
}

impl From<Vec<Role>> for RoleTerm {
    fn from(roles: Vec<Role>) -> Self {
        RoleTerm::any_of(roles)
    }
}

/// A conjunction of [`RoleTerm`]s.
///
/// Built once when a route is registered and never modified afterwards.
/// An empty requirement is satisfied by every principal.
///
/// # Examples
///
/// ```
/// use access_guard::{Role, RoleRequirement};
///
/// // 'a' AND ('b' OR 'c') AND 'd'
/// let req = RoleRequirement::new()
///     .require("a")
///     .require(["b", "c"])
///     .require("d");
///
/// let held = ["a", "c", "d"];
/// assert!(req.is_satisfied_by(|role: &Role| held.contains(&role.as_str())));
///
/// let held = ["a", "d"];
/// assert!(!req.is_satisfied_by(|role: &Role| held.contains(&role.as_str())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleRequirement {
    terms: Vec<RoleTerm>,
}

impl RoleRequirement {
    /// Creates an empty requirement.
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Builds a requirement from a sequence of terms.
    pub fn from_terms<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RoleTerm>,
    {
        terms
            .into_iter()
            .fold(Self::new(), |req, term| req.require(term))
    }

    /// Adds a term, skipping it if an identical term is already present.
    pub fn require(mut self, term: impl Into<RoleTerm>) -> Self {
        let term = term.into();
        if !self.terms.contains(&term) {
            self.terms.push(term);
        }
        self
    }

    /// Returns the terms in registration order.
    pub fn terms(&self) -> &[RoleTerm] {
        &self.terms
    }

    /// Returns true if the requirement has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if every term is satisfied.
    pub fn is_satisfied_by<F>(&self, holds: F) -> bool
    where
        F: Fn(&Role) -> bool,
    {
        self.first_unmet(holds).is_none()
    }

    /// Returns the first term the predicate does not satisfy.
    pub fn first_unmet<F>(&self, holds: F) -> Option<&RoleTerm>
    where
        F: Fn(&Role) -> bool,
    {
        self.terms.iter().find(|term| !term.is_satisfied_by(&holds))
    }
}

impl fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("<none>");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}
