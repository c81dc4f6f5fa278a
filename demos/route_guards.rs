//! Route guard demonstration.
//!
//! This example registers three guarded routes and dispatches a handful of
//! simulated requests through them:
//! 1. Build the host with its fallbacks
//! 2. Register routes behind guards
//! 3. Resolve principals through a data adapter
//! 4. Dispatch requests and print the responses
//!
//! Run with: `cargo run --example route_guards`

use access_guard::email::{EmailModel, InMemoryAdapter, StoredUser};
use access_guard::web::{GuardedRoutes, RequestAdapter};
use access_guard::{roles_required, Guard, GuardConfig, GuardHost, Principal, RoleTerm};
use chrono::Utc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let host = GuardHost::builder()
        .unauthenticated(|| "302 -> /login".to_string())
        .unauthorized(|| "403 forbidden".to_string())
        .unconfirmed_email(|| "302 -> /confirm-email".to_string())
        .config(GuardConfig::from_env()?)
        .build()?;

    let mut routes = GuardedRoutes::new(host);
    routes
        .route("/profile", Guard::LoginRequired, |req: &RequestAdapter| {
            let name = req.principal().map(|p| p.name.as_str()).unwrap_or("?");
            format!("200 profile of {}", name)
        })?
        .route(
            "/reports",
            roles_required([RoleTerm::from("staff"), RoleTerm::from(["finance", "audit"])]),
            |_: &RequestAdapter| "200 quarterly reports".to_string(),
        )?
        .route(
            "/billing",
            Guard::ConfirmEmailRequired,
            |_: &RequestAdapter| "200 billing".to_string(),
        )?;

    let mut adapter = InMemoryAdapter::new(EmailModel::Multiple);
    adapter.add_email("alice", "alice@example.com", Some(Utc::now()));
    adapter.add_email("bob", "bob@example.com", None);

    let alice = Principal::for_user(&StoredUser::new("alice"), &adapter)
        .unwrap_or_else(|never| match never {})
        .with_roles(["staff", "audit"]);
    let bob = Principal::for_user(&StoredUser::new("bob"), &adapter)
        .unwrap_or_else(|never| match never {})
        .with_role("staff");

    let visitors = [("anonymous", None), ("alice", Some(alice)), ("bob", Some(bob))];
    let mut counter = 0;
    for (label, principal) in visitors {
        for path in ["/profile", "/reports", "/billing"] {
            counter += 1;
            let mut request = RequestAdapter::new(format!("req-{:04}", counter), path);
            request.set_principal(principal.clone());

            let response = routes.dispatch(&request)?;
            println!("{:<10} {:<9} {}", label, path, response);
        }
    }

    Ok(())
}
