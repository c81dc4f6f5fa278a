//! Property tests for guard decisions.
//!
//! These tests check the routing invariants over arbitrary principals and
//! role requirements.

use std::cell::Cell;
use std::collections::BTreeSet;

use access_guard::{
    login_required, roles_required, CurrentPrincipal, DenialKind, Guard, GuardConfig, GuardHost,
    Principal, RequestContext, Role, RoleRequirement, RoleTerm,
};
use proptest::prelude::*;

const ROLE_NAMES: [&str; 6] = ["admin", "editor", "viewer", "staff", "audit", "ops"];

fn arb_role() -> impl Strategy<Value = Role> {
    prop::sample::select(ROLE_NAMES.to_vec()).prop_map(Role::from)
}

fn arb_term() -> impl Strategy<Value = RoleTerm> {
    prop_oneof![
        arb_role().prop_map(RoleTerm::Atom),
        prop::collection::vec(arb_role(), 1..4).prop_map(RoleTerm::any_of),
    ]
}

fn arb_requirement() -> impl Strategy<Value = Vec<RoleTerm>> {
    prop::collection::vec(arb_term(), 0..5)
}

fn arb_principal() -> impl Strategy<Value = Principal> {
    (
        any::<bool>(),
        prop::collection::btree_set(arb_role(), 0..4),
        any::<bool>(),
    )
        .prop_map(|(authenticated, roles, confirmed)| Principal {
            id: "user-prop".to_string(),
            name: "Prop".to_string(),
            authenticated,
            roles,
            confirmed_email: confirmed,
        })
}

fn arb_config() -> impl Strategy<Value = GuardConfig> {
    (any::<bool>(), any::<bool>()).prop_map(|(email, confirm)| {
        GuardConfig::default()
            .with_email(email)
            .with_confirm_email(confirm)
    })
}

// Reference evaluation: every term holds, any role within a set suffices.
fn expected(terms: &[RoleTerm], held: &BTreeSet<Role>) -> bool {
    terms.iter().all(|term| match term {
        RoleTerm::Atom(role) => held.contains(role),
        RoleTerm::AnyOf(roles) => roles.iter().any(|r| held.contains(r)),
    })
}

fn host(config: GuardConfig) -> GuardHost<Option<DenialKind>> {
    GuardHost::builder()
        .unauthenticated(|| Some(DenialKind::Unauthenticated))
        .unauthorized(|| Some(DenialKind::Unauthorized))
        .unconfirmed_email(|| Some(DenialKind::UnconfirmedEmail))
        .config(config)
        .build()
        .expect("all fallbacks registered")
}

proptest! {
    /// Property: anonymous principals never reach login- or role-guarded handlers
    #[test]
    fn proptest_unauthenticated_never_invokes_handler(
        terms in arb_requirement(),
        principal in arb_principal(),
        config in arb_config(),
    ) {
        let mut principal = principal;
        principal.authenticated = false;
        let calls = Cell::new(0);
        let handler = |_: ()| {
            calls.set(calls.get() + 1);
            None
        };
        let host = host(config);
        let ctx = RequestContext::new("req-prop", &principal);

        prop_assert_eq!(
            login_required(handler).call(&host, &ctx, ()),
            Some(DenialKind::Unauthenticated)
        );
        prop_assert_eq!(
            roles_required(terms).wrap(handler).call(&host, &ctx, ()),
            Some(DenialKind::Unauthenticated)
        );
        prop_assert_eq!(calls.get(), 0);
    }

    /// Property: role evaluation is a conjunction of disjunctions
    #[test]
    fn proptest_role_requirement_matches_reference(
        terms in arb_requirement(),
        principal in arb_principal(),
    ) {
        let requirement = RoleRequirement::from_terms(terms.clone());
        prop_assert_eq!(
            requirement.is_satisfied_by(|role| principal.roles.contains(role)),
            expected(&terms, &principal.roles)
        );
    }

    /// Property: roles_required allows exactly authenticated principals meeting the requirement
    #[test]
    fn proptest_roles_required_routing(
        terms in arb_requirement(),
        principal in arb_principal(),
    ) {
        let host = host(GuardConfig::default());
        let ctx = RequestContext::new("req-prop", &principal);
        let outcome = roles_required(terms.clone())
            .wrap(|_: ()| None)
            .call(&host, &ctx, ());

        let want = if !principal.authenticated {
            Some(DenialKind::Unauthenticated)
        } else if !expected(&terms, &principal.roles) {
            Some(DenialKind::Unauthorized)
        } else {
            None
        };
        prop_assert_eq!(outcome, want);
    }

    /// Property: the email guard admits exactly the authenticated principals
    /// that are confirmed or exempt by configuration
    #[test]
    fn proptest_confirm_email_routing(
        principal in arb_principal(),
        config in arb_config(),
    ) {
        let result = Guard::ConfirmEmailRequired.check(&principal, &config);
        let admitted = principal.is_authenticated()
            && (!config.enable_email
                || !config.enable_confirm_email
                || principal.has_confirmed_email());

        prop_assert_eq!(result.is_ok(), admitted);
        if let Err(denial) = result {
            prop_assert_eq!(denial.kind, DenialKind::UnconfirmedEmail);
        }
    }

    /// Property: identical inputs always produce identical decisions
    #[test]
    fn proptest_decisions_are_repeatable(
        terms in arb_requirement(),
        principal in arb_principal(),
        config in arb_config(),
    ) {
        let guards = [
            Guard::LoginRequired,
            Guard::RolesRequired(RoleRequirement::from_terms(terms)),
            Guard::ConfirmEmailRequired,
        ];
        for guard in guards {
            let first = guard.check(&principal, &config);
            let second = guard.check(&principal, &config);
            prop_assert_eq!(first, second);
        }
    }
}
