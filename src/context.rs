//! Application-wide context, created once at startup and passed to views

use log::info;

use crate::auth::{AuthSession, HttpAuthProvider, Role, SessionStore};
use crate::error::{Error, Result};
use crate::navigation::{AnalyticsEvent, DataLayer, NavigationBus, NavigationEvent, Subscription};
use crate::routes::{Access, Route};
use crate::PgStay;

/// Everything a view may read: the API client, the signed-in session,
/// navigation and analytics. Lives for the whole application run.
pub struct AppContext {
    client: PgStay,
    navigation: NavigationBus,
    data_layer: DataLayer,
    _page_views: Subscription,
}

impl AppContext {
    pub fn new(client: PgStay) -> Self {
        let navigation = NavigationBus::new();
        let data_layer = DataLayer::default();

        let layer = data_layer.clone();
        let page_views = navigation.subscribe(move |event: &NavigationEvent| {
            layer.push(AnalyticsEvent::page_view(&event.to));
        });

        Self {
            client,
            navigation,
            data_layer,
            _page_views: page_views,
        }
    }

    pub fn client(&self) -> &PgStay {
        &self.client
    }

    pub fn auth(&self) -> HttpAuthProvider {
        self.client.auth()
    }

    pub fn session_store(&self) -> &SessionStore {
        self.client.session()
    }

    pub fn session(&self) -> Option<AuthSession> {
        self.session_store().get()
    }

    pub fn role(&self) -> Option<Role> {
        self.session_store().role()
    }

    pub fn navigation(&self) -> &NavigationBus {
        &self.navigation
    }

    pub fn data_layer(&self) -> &DataLayer {
        &self.data_layer
    }

    /// Check the current session against a route's access rule
    pub fn authorize(&self, route: &Route) -> Result<()> {
        let role = self.role();
        if route.allows(role) {
            return Ok(());
        }
        match (route.access(), role) {
            (Access::Roles(_), Some(role)) => Err(Error::auth(format!(
                "Your {} account cannot open {}",
                role, route
            ))),
            _ => Err(Error::auth(format!("Please sign in to open {}", route))),
        }
    }

    /// Move to `route` if the session may open it, notifying listeners
    pub fn navigate(&self, route: Route) -> Result<NavigationEvent> {
        self.authorize(&route)?;
        Ok(self.navigation.publish(route))
    }

    /// Forget the session and go back to the home page
    pub fn sign_out(&self) -> NavigationEvent {
        info!("signing out");
        self.session_store().clear();
        self.data_layer.push(AnalyticsEvent::new("logout"));
        self.navigation.publish(Route::Home)
    }
}
