//! Session commands
//!
//! Drive the session adapter the coordinators observe. These stand in for
//! the identity provider callbacks of a real shell.

use std::time::Instant;

use waypoint_domain::{Identity, Result as DomainResult, WaypointError};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

pub fn sign_in(ctx: &AppContext, user_id: &str, provider: Option<&str>) -> DomainResult<()> {
    let command_name = "session::sign_in";
    let start = Instant::now();

    let result = if user_id.trim().is_empty() {
        Err(WaypointError::InvalidInput("user id must not be empty".to_string()))
    } else {
        let identity = Identity::new(user_id.trim());
        let identity = match provider {
            Some(provider) => identity.with_provider(provider),
            None => identity,
        };
        ctx.auth.sign_in(identity);
        Ok(())
    };

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

pub fn sign_out(ctx: &AppContext) {
    let start = Instant::now();
    ctx.auth.sign_out();
    log_command_execution("session::sign_out", start.elapsed(), true);
}

/// Put the session back into loading while tokens are refreshed.
///
/// Decisions already committed stay put; a bootstrap still waiting keeps
/// waiting until [`finish_session_refresh`] or its deadline.
pub fn refresh_session(ctx: &AppContext) {
    let start = Instant::now();
    ctx.auth.begin_refresh();
    log_command_execution("session::refresh_session", start.elapsed(), true);
}

pub fn finish_session_refresh(ctx: &AppContext) {
    let start = Instant::now();
    ctx.auth.finish_refresh();
    log_command_execution("session::finish_session_refresh", start.elapsed(), true);
}

/// Record a payment so the subscription gate stops sending the user to the
/// paywall.
pub fn record_payment(ctx: &AppContext, user_id: &str) -> DomainResult<()> {
    let command_name = "session::record_payment";
    let start = Instant::now();

    let result = if user_id.trim().is_empty() {
        Err(WaypointError::InvalidInput("user id must not be empty".to_string()))
    } else {
        ctx.subscriptions.mark_paid(user_id.trim());
        Ok(())
    };

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}
