//! Guard configuration flags.

use crate::error::Error;

/// Environment variable toggling email support.
pub const ENABLE_EMAIL_VAR: &str = "ACCESS_GUARD_ENABLE_EMAIL";

/// Environment variable toggling email confirmation.
pub const ENABLE_CONFIRM_EMAIL_VAR: &str = "ACCESS_GUARD_ENABLE_CONFIRM_EMAIL";

/// Host configuration read by the email-confirmation guard.
///
/// Both flags default to `true`. Confirmation is only enforced when both
/// are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardConfig {
    /// Whether the application manages user emails at all
    pub enable_email: bool,
    /// Whether users must confirm an email before reaching guarded routes
    pub enable_confirm_email: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            enable_email: true,
            enable_confirm_email: true,
        }
    }
}

impl GuardConfig {
    /// Sets `enable_email`.
    pub fn with_email(mut self, enabled: bool) -> Self {
        self.enable_email = enabled;
        self
    }

    /// Sets `enable_confirm_email`.
    pub fn with_confirm_email(mut self, enabled: bool) -> Self {
        self.enable_confirm_email = enabled;
        self
    }

    /// Returns true if guarded routes require a confirmed email.
    pub fn requires_confirmed_email(&self) -> bool {
        self.enable_email && self.enable_confirm_email
    }

    /// Reads the flags from the process environment.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for a value that is not a boolean.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the flags through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENABLE_EMAIL_VAR) {
            config.enable_email = parse_flag(ENABLE_EMAIL_VAR, &value)?;
        }
        if let Some(value) = lookup(ENABLE_CONFIRM_EMAIL_VAR) {
            config.enable_confirm_email = parse_flag(ENABLE_CONFIRM_EMAIL_VAR, &value)?;
        }
        tracing::debug!(
            enable_email = config.enable_email,
            enable_confirm_email = config.enable_confirm_email,
            "loaded guard configuration"
        );
        Ok(config)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(Error::InvalidConfig {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_require_confirmation() {
        let config = GuardConfig::default();
        assert!(config.enable_email);
        assert!(config.enable_confirm_email);
        assert!(config.requires_confirmed_email());
    }

    #[test]
    fn either_flag_off_disables_confirmation() {
        assert!(!GuardConfig::default().with_email(false).requires_confirmed_email());
        assert!(!GuardConfig::default()
            .with_confirm_email(false)
            .requires_confirmed_email());
    }

    #[test]
    fn missing_variables_keep_defaults() {
        let config = GuardConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = GuardConfig::from_lookup(lookup_from(&[
            (ENABLE_EMAIL_VAR, "Yes"),
            (ENABLE_CONFIRM_EMAIL_VAR, " 0 "),
        ]))
        .unwrap();
        assert!(config.enable_email);
        assert!(!config.enable_confirm_email);
    }

    #[test]
    fn invalid_value_is_rejected() {
        let result = GuardConfig::from_lookup(lookup_from(&[(ENABLE_EMAIL_VAR, "sometimes")]));
        assert_eq!(
            result,
            Err(Error::InvalidConfig {
                key: ENABLE_EMAIL_VAR,
                value: "sometimes".to_string(),
            })
        );
    }

    #[test]
    fn on_and_off_are_not_flags() {
        for value in ["on", "off"] {
            let result = GuardConfig::from_lookup(lookup_from(&[(ENABLE_EMAIL_VAR, value)]));
            assert_eq!(
                result,
                Err(Error::InvalidConfig {
                    key: ENABLE_EMAIL_VAR,
                    value: value.to_string(),
                })
            );
        }
    }
}
