//! Email-confirmation lookup over the host's data-access adapter.
//!
//! Users either own a collection of email records ([`EmailModel::Multiple`])
//! or carry a single confirmation timestamp themselves
//! ([`EmailModel::Single`]). The adapter decides which.

use std::convert::Infallible;
use std::fmt;

use chrono::{DateTime, Utc};

/// A stored user, as far as email confirmation is concerned.
pub trait UserRecord {
    /// The user's primary key.
    fn id(&self) -> &str;

    /// When the user's single email was confirmed, if ever.
    ///
    /// Only consulted under [`EmailModel::Single`].
    fn confirmed_at(&self) -> Option<DateTime<Utc>>;
}

/// One email owned by a user under [`EmailModel::Multiple`].
pub trait EmailRecord {
    /// When this address was confirmed, if ever.
    fn confirmed_at(&self) -> Option<DateTime<Utc>>;
}

/// How the data layer stores email addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailModel {
    /// One email per user, confirmation timestamp on the user record
    Single,
    /// Any number of email records per user
    Multiple,
}

impl fmt::Display for EmailModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailModel::Single => write!(f, "single"),
            EmailModel::Multiple => write!(f, "multiple"),
        }
    }
}

/// The host's data-access layer.
pub trait DataAdapter {
    /// Email record type returned by [`DataAdapter::find_user_emails`].
    type Email: EmailRecord;
    /// Error raised by the underlying store.
    type Error;

    /// Which email model the store uses.
    fn email_model(&self) -> EmailModel;

    /// Returns every email record owned by `user_id`.
    fn find_user_emails(&self, user_id: &str) -> Result<Vec<Self::Email>, Self::Error>;
}

/// Returns true if `user` has at least one confirmed email.
///
/// Under [`EmailModel::Multiple`] the user's email records are searched and
/// the search stops at the first confirmed one. Under [`EmailModel::Single`]
/// the user's own `confirmed_at` decides. Store errors are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use access_guard::email::{user_has_confirmed_email, EmailModel, InMemoryAdapter, StoredUser};
/// use chrono::Utc;
///
/// let mut adapter = InMemoryAdapter::new(EmailModel::Multiple);
/// adapter.add_email("u1", "old@example.com", None);
/// adapter.add_email("u1", "new@example.com", Some(Utc::now()));
///
/// let user = StoredUser::new("u1");
/// assert_eq!(user_has_confirmed_email(&adapter, &user), Ok(true));
/// ```
pub fn user_has_confirmed_email<A, U>(adapter: &A, user: &U) -> Result<bool, A::Error>
where
    A: DataAdapter,
    U: UserRecord + ?Sized,
{
    let model = adapter.email_model();
    let confirmed = match model {
        EmailModel::Multiple => adapter
            .find_user_emails(user.id())?
            .iter()
            .any(|email| email.confirmed_at().is_some()),
        EmailModel::Single => user.confirmed_at().is_some(),
    };

    tracing::trace!(user_id = %user.id(), %model, confirmed, "resolved email confirmation");
    Ok(confirmed)
}

/// A user row held by [`InMemoryAdapter`] hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    id: String,
    confirmed_at: Option<DateTime<Utc>>,
}

impl StoredUser {
    /// Creates an unconfirmed user.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            confirmed_at: None,
        }
    }

    /// Marks the user's single email as confirmed at `at`.
    pub fn confirmed(mut self, at: DateTime<Utc>) -> Self {
        self.confirmed_at = Some(at);
        self
    }
}

impl UserRecord for StoredUser {
    fn id(&self) -> &str {
        &self.id
    }

    fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }
}

/// An email row held by [`InMemoryAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEmail {
    /// Owning user
    pub user_id: String,
    /// The address itself
    pub address: String,
    /// Confirmation time, if confirmed
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl EmailRecord for StoredEmail {
    fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }
}

/// In-memory data adapter for tests and small hosts.
#[derive(Debug, Clone)]
pub struct InMemoryAdapter {
    model: EmailModel,
    emails: Vec<StoredEmail>,
}

impl InMemoryAdapter {
    /// Creates an empty adapter using `model`.
    pub fn new(model: EmailModel) -> Self {
        Self {
            model,
            emails: Vec::new(),
        }
    }

    /// Stores an email record for `user_id`.
    pub fn add_email(
        &mut self,
        user_id: impl Into<String>,
        address: impl Into<String>,
        confirmed_at: Option<DateTime<Utc>>,
    ) {
        self.emails.push(StoredEmail {
            user_id: user_id.into(),
            address: address.into(),
            confirmed_at,
        });
    }

    /// Returns the number of stored email records.
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Returns true if no email records are stored.
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl DataAdapter for InMemoryAdapter {
    type Email = StoredEmail;
    type Error = Infallible;

    fn email_model(&self) -> EmailModel {
        self.model
    }

    fn find_user_emails(&self, user_id: &str) -> Result<Vec<StoredEmail>, Infallible> {
        Ok(self
            .emails
            .iter()
            .filter(|email| email.user_id == user_id)
            .cloned()
            .collect())
    }
}
