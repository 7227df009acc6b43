//! Application context - dependency injection container

use std::sync::Arc;

use waypoint_common::time::{Clock, SystemClock};
use waypoint_core::{
    AuthSource, BootstrapController, BootstrapTiming, GateChain, Navigator, ProfileChecker,
    RouteGate, SubscriptionGate, SubscriptionState,
};
use waypoint_domain::{Result, RoutePath, WaypointConfig};
use waypoint_infra::{
    HistoryNavigator, HttpProfileChecker, InMemorySubscriptionStore, WatchAuthSource,
};

/// Application context holding every adapter and both coordinators.
///
/// The bootstrap controller and the gate chain share the same session,
/// profile and navigator instances so a sign-in seen by one is seen by the
/// other.
pub struct AppContext {
    pub config: WaypointConfig,
    pub auth: Arc<WatchAuthSource>,
    pub profiles: Arc<dyn ProfileChecker>,
    pub subscriptions: Arc<InMemorySubscriptionStore>,
    pub navigator: Arc<HistoryNavigator>,
    pub bootstrap: BootstrapController,
    pub gates: GateChain,
}

impl AppContext {
    /// Wire the production adapters from configuration.
    pub fn new(config: WaypointConfig) -> Result<Self> {
        tracing::info!(
            profile_service = %config.profile_service.base_url,
            "Initializing AppContext"
        );

        let profiles: Arc<dyn ProfileChecker> =
            Arc::new(HttpProfileChecker::new(&config.profile_service)?);

        Ok(Self::from_parts(config, profiles, Arc::new(SystemClock)))
    }

    /// Wire the context around an injected profile checker and clock.
    ///
    /// The history starts at the root route; the session starts loading.
    pub fn from_parts(
        config: WaypointConfig,
        profiles: Arc<dyn ProfileChecker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let auth = Arc::new(WatchAuthSource::new());
        let subscriptions = Arc::new(InMemorySubscriptionStore::with_clock(&config.trial, clock));
        let navigator = Arc::new(HistoryNavigator::starting_at(RoutePath::root()));

        let auth_port: Arc<dyn AuthSource> = auth.clone();
        let navigator_port: Arc<dyn Navigator> = navigator.clone();
        let subscription_port: Arc<dyn SubscriptionState> = subscriptions.clone();
        let gate_deadline = config.timing.gate_hard_deadline();

        let bootstrap =
            BootstrapController::new(auth_port.clone(), profiles.clone(), navigator_port.clone())
                .with_routes(config.routes.clone())
                .with_timing(BootstrapTiming::from(&config.timing));

        let route_gate = RouteGate::new(auth_port.clone(), profiles.clone())
            .with_routes(config.routes.clone())
            .with_hard_deadline(gate_deadline);
        let subscription_gate = SubscriptionGate::new(auth_port, subscription_port)
            .with_routes(config.routes.clone())
            .with_deadline(gate_deadline);

        let gates = GateChain::new(navigator_port)
            .with_gate(Arc::new(route_gate))
            .with_gate(Arc::new(subscription_gate));

        tracing::debug!(gates = ?gates.gate_names(), "AppContext wired");

        Self { config, auth, profiles, subscriptions, navigator, bootstrap, gates }
    }
}
