//! The device location collaborator consumed by the ranking operations.
//!
//! The platform owns permission prompts and position updates. The core only
//! reads the best-known coordinate, re-reading it on every query, and treats
//! an unknown or denied authorisation as "no reference coordinate".

use geo::Coord;

/// Whether the user has allowed location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationState {
    /// The user has not been asked yet.
    #[default]
    NotDetermined,
    /// The user refused access.
    Denied,
    /// Access is granted.
    Authorized,
}

/// Source of the user's best-known position.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use tpl_core::{AuthorizationState, LocationProvider, reference_coordinate};
///
/// struct Denied;
///
/// impl LocationProvider for Denied {
///     fn request_permission(&self) {}
///     fn current_coordinate(&self) -> Option<Coord<f64>> {
///         Some(Coord { x: -79.38, y: 43.65 })
///     }
///     fn authorization_state(&self) -> AuthorizationState {
///         AuthorizationState::Denied
///     }
/// }
///
/// assert_eq!(reference_coordinate(&Denied), None);
/// ```
pub trait LocationProvider {
    /// Ask the platform for permission. Implementations must not block.
    fn request_permission(&self);

    /// Most recent fix, if one exists.
    fn current_coordinate(&self) -> Option<Coord<f64>>;

    /// Current authorisation state.
    fn authorization_state(&self) -> AuthorizationState;
}

/// Coordinate to rank against, or `None` unless access is authorised and a
/// fix exists.
pub fn reference_coordinate<P>(provider: &P) -> Option<Coord<f64>>
where
    P: LocationProvider + ?Sized,
{
    match provider.authorization_state() {
        AuthorizationState::Authorized => provider.current_coordinate(),
        AuthorizationState::Denied | AuthorizationState::NotDetermined => None,
    }
}

/// Ask for permission when the user has not been asked yet.
///
/// Returns the state observed afterwards. Providers that were already
/// authorised or denied are not prompted again.
pub fn request_if_undetermined<P>(provider: &P) -> AuthorizationState
where
    P: LocationProvider + ?Sized,
{
    if provider.authorization_state() == AuthorizationState::NotDetermined {
        provider.request_permission();
    }
    provider.authorization_state()
}

/// Provider reporting one fixed, authorised coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation {
    coordinate: Coord<f64>,
}

impl FixedLocation {
    /// Build a provider for `latitude`/`longitude` in decimal degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinate: Coord {
                x: longitude,
                y: latitude,
            },
        }
    }
}

impl LocationProvider for FixedLocation {
    fn request_permission(&self) {}

    fn current_coordinate(&self) -> Option<Coord<f64>> {
        Some(self.coordinate)
    }

    fn authorization_state(&self) -> AuthorizationState {
        AuthorizationState::Authorized
    }
}

/// Provider for environments without any location source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn request_permission(&self) {
        log::debug!("location permission requested but no provider is available");
    }

    fn current_coordinate(&self) -> Option<Coord<f64>> {
        None
    }

    fn authorization_state(&self) -> AuthorizationState {
        AuthorizationState::NotDetermined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    struct Scripted {
        state: Cell<AuthorizationState>,
        fix: Option<Coord<f64>>,
        requests: Cell<usize>,
    }

    impl Scripted {
        fn new(state: AuthorizationState, fix: Option<Coord<f64>>) -> Self {
            Self {
                state: Cell::new(state),
                fix,
                requests: Cell::new(0),
            }
        }
    }

    impl LocationProvider for Scripted {
        fn request_permission(&self) {
            self.requests.set(self.requests.get() + 1);
            if self.state.get() == AuthorizationState::NotDetermined {
                self.state.set(AuthorizationState::Authorized);
            }
        }

        fn current_coordinate(&self) -> Option<Coord<f64>> {
            self.fix
        }

        fn authorization_state(&self) -> AuthorizationState {
            self.state.get()
        }
    }

    #[rstest]
    #[case(AuthorizationState::NotDetermined)]
    #[case(AuthorizationState::Denied)]
    fn unauthorised_states_hide_the_fix(#[case] state: AuthorizationState) {
        let provider = Scripted::new(state, Some(Coord { x: -79.4, y: 43.7 }));
        assert_eq!(reference_coordinate(&provider), None);
    }

    #[rstest]
    fn provider_is_reread_on_each_query() {
        let provider = Scripted::new(
            AuthorizationState::NotDetermined,
            Some(Coord { x: -79.4, y: 43.7 }),
        );
        assert_eq!(reference_coordinate(&provider), None);
        provider.request_permission();
        assert_eq!(
            reference_coordinate(&provider),
            Some(Coord { x: -79.4, y: 43.7 })
        );
    }

    #[rstest]
    fn authorised_without_fix_is_unknown() {
        let provider = Scripted::new(AuthorizationState::Authorized, None);
        assert_eq!(reference_coordinate(&provider), None);
    }

    #[rstest]
    fn undetermined_provider_is_asked_once() {
        let provider = Scripted::new(
            AuthorizationState::NotDetermined,
            Some(Coord { x: -79.4, y: 43.7 }),
        );
        assert_eq!(
            request_if_undetermined(&provider),
            AuthorizationState::Authorized
        );
        assert_eq!(
            request_if_undetermined(&provider),
            AuthorizationState::Authorized
        );
        assert_eq!(provider.requests.get(), 1);
        assert!(reference_coordinate(&provider).is_some());
    }

    #[rstest]
    #[case(AuthorizationState::Denied)]
    #[case(AuthorizationState::Authorized)]
    fn decided_providers_are_not_asked(#[case] state: AuthorizationState) {
        let provider = Scripted::new(state, None);
        assert_eq!(request_if_undetermined(&provider), state);
        assert_eq!(provider.requests.get(), 0);
    }

    #[rstest]
    fn fixed_location_stores_lon_lat() {
        let provider = FixedLocation::new(43.65, -79.38);
        assert_eq!(
            reference_coordinate(&provider),
            Some(Coord { x: -79.38, y: 43.65 })
        );
        assert_eq!(reference_coordinate(&NoLocation), None);
    }
}
