//! Pages of the rental frontend and who may open them

use std::fmt;

use crate::auth::Role;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Contact,
    Properties,
    PropertyDetail(i64),
    Booking { room_id: i64 },
    SignIn,
    SignUp,
    ForgotPassword,
    ResetPassword,
    AdminDashboard,
    AdminMealTariffs,
    AdminRoomFilters,
}

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    SignedIn,
    Roles(&'static [Role]),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Properties => "/properties".to_string(),
            Route::PropertyDetail(id) => format!("/properties/{}", id),
            Route::Booking { room_id } => format!("/booking/{}", room_id),
            Route::SignIn => "/signin".to_string(),
            Route::SignUp => "/signup".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword => "/reset-password".to_string(),
            Route::AdminDashboard => "/admin".to_string(),
            Route::AdminMealTariffs => "/admin/meal-tariffs".to_string(),
            Route::AdminRoomFilters => "/admin/room-filters".to_string(),
        }
    }

    /// Route for a browser path; query string and trailing slash are ignored
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            ["properties"] => Route::Properties,
            ["properties", id] => Route::PropertyDetail(id.parse().ok()?),
            ["booking", id] => Route::Booking {
                room_id: id.parse().ok()?,
            },
            ["signin"] => Route::SignIn,
            ["signup"] => Route::SignUp,
            ["forgot-password"] => Route::ForgotPassword,
            ["reset-password"] => Route::ResetPassword,
            ["admin"] => Route::AdminDashboard,
            ["admin", "meal-tariffs"] => Route::AdminMealTariffs,
            ["admin", "room-filters"] => Route::AdminRoomFilters,
            _ => return None,
        };
        Some(route)
    }

    pub fn access(&self) -> Access {
        match self {
            Route::AdminDashboard => Access::Roles(&[Role::Admin, Role::Employee]),
            Route::AdminMealTariffs | Route::AdminRoomFilters => Access::Roles(&[Role::Admin]),
            Route::Booking { .. } => Access::SignedIn,
            _ => Access::Public,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Route::AdminDashboard | Route::AdminMealTariffs | Route::AdminRoomFilters
        )
    }

    /// Whether a visitor with `role` (`None` when signed out) may open this route
    pub fn allows(&self, role: Option<Role>) -> bool {
        match (self.access(), role) {
            (Access::Public, _) => true,
            (Access::SignedIn, role) => role.is_some(),
            (Access::Roles(roles), Some(role)) => roles.contains(&role),
            (Access::Roles(_), None) => false,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Home,
            Route::PropertyDetail(42),
            Route::Booking { room_id: 7 },
            Route::AdminMealTariffs,
            Route::ResetPassword,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn parse_ignores_query_and_trailing_slash() {
        assert_eq!(Route::parse("/properties/3/?tab=rooms"), Some(Route::PropertyDetail(3)));
        assert_eq!(Route::parse("/reset-password?token=abc"), Some(Route::ResetPassword));
        assert_eq!(Route::parse("/properties/abc"), None);
        assert_eq!(Route::parse("/nowhere"), None);
    }

    #[test]
    fn role_gating() {
        assert!(Route::Properties.allows(None));
        assert!(!Route::Booking { room_id: 1 }.allows(None));
        assert!(Route::Booking { room_id: 1 }.allows(Some(Role::Tenant)));

        assert!(!Route::AdminDashboard.allows(Some(Role::Tenant)));
        assert!(Route::AdminDashboard.allows(Some(Role::Employee)));
        assert!(!Route::AdminMealTariffs.allows(Some(Role::Employee)));
        assert!(Route::AdminMealTariffs.allows(Some(Role::Admin)));
        assert!(!Route::AdminRoomFilters.allows(None));
    }
}
