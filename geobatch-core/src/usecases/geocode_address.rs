use super::prelude::*;

/// The result of geocoding a single address.
#[derive(Debug)]
pub enum GeocodeOutcome {
    /// The first candidate of the service.
    Resolved(Coordinates),
    /// The service did not return any candidate.
    NotFound,
    /// The request itself failed.
    CallFailed(GeocodingError),
    /// No geocoding client is available.
    NoClient,
}

impl GeocodeOutcome {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::Resolved(pos) => Some(*pos),
            Self::NotFound | Self::CallFailed(_) | Self::NoClient => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Resolve a single address with at most one request.
///
/// Errors of the gateway are logged and turned into
/// [`GeocodeOutcome::CallFailed`], they never leave this function.
pub fn geocode_address<G>(gateway: Option<&G>, query: &str) -> GeocodeOutcome
where
    G: GeoCodingGateway + ?Sized,
{
    let Some(gw) = gateway else {
        return GeocodeOutcome::NoClient;
    };
    match gw.geocode(query) {
        Ok(candidates) => match candidates.into_iter().next() {
            Some(Candidate {
                location,
                formatted_address,
            }) => {
                log::debug!(
                    "Resolved address '{query}' ({}): {location}",
                    formatted_address.as_deref().unwrap_or("-")
                );
                GeocodeOutcome::Resolved(location)
            }
            None => {
                log::warn!("Address not found: '{query}'");
                GeocodeOutcome::NotFound
            }
        },
        Err(err) => {
            log::error!("Failed to geocode address '{query}': {err}");
            GeocodeOutcome::CallFailed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{capture_logs, captured_logs, MockGeocoder},
        *,
    };
    use log::Level;

    #[test]
    fn resolve_single_candidate() {
        let gw = MockGeocoder::default().with_candidates(
            "Av. Paulista, 1000, São Paulo",
            vec![Coordinates::new(-23.5, -46.6).into()],
        );
        let outcome = geocode_address(Some(&gw), "Av. Paulista, 1000, São Paulo");
        assert!(outcome.is_resolved());
        let pos = outcome.coordinates().unwrap();
        assert_eq!(pos.lat, -23.5);
        assert_eq!(pos.lng, -46.6);
        assert_eq!(gw.calls.borrow().len(), 1);
    }

    #[test]
    fn take_the_first_of_many_candidates() {
        let gw = MockGeocoder::default().with_candidates(
            "Springfield",
            vec![
                Candidate {
                    location: Coordinates::new(39.8, -89.6),
                    formatted_address: Some("Springfield, IL, USA".into()),
                },
                Candidate {
                    location: Coordinates::new(37.2, -93.3),
                    formatted_address: Some("Springfield, MO, USA".into()),
                },
            ],
        );
        let pos = geocode_address(Some(&gw), "Springfield")
            .coordinates()
            .unwrap();
        assert_eq!(pos, Coordinates::new(39.8, -89.6));
    }

    #[test]
    fn not_found() {
        capture_logs();
        let gw = MockGeocoder::default();
        let outcome = geocode_address(Some(&gw), "Nowhere 42");
        assert!(matches!(outcome, GeocodeOutcome::NotFound));
        assert!(outcome.coordinates().is_none());
        let logs = captured_logs();
        assert!(logs
            .iter()
            .any(|(level, msg)| *level == Level::Warn && msg.contains("Nowhere 42")));
    }

    #[test]
    fn absorb_failed_call() {
        capture_logs();
        let gw = MockGeocoder::default().failing("Rua X", "OVER_QUERY_LIMIT");
        let outcome = geocode_address(Some(&gw), "Rua X");
        assert!(matches!(outcome, GeocodeOutcome::CallFailed(_)));
        assert!(outcome.coordinates().is_none());
        let logs = captured_logs();
        assert!(logs.iter().any(|(level, msg)| *level == Level::Error
            && msg.contains("Rua X")
            && msg.contains("OVER_QUERY_LIMIT")));
    }

    #[test]
    fn without_client() {
        let outcome = geocode_address(None::<&MockGeocoder>, "Av. Paulista");
        assert!(matches!(outcome, GeocodeOutcome::NoClient));
        assert!(outcome.coordinates().is_none());
    }

    #[test]
    fn geocode_empty_query_as_is() {
        let gw = MockGeocoder::default();
        let outcome = geocode_address(Some(&gw), "");
        assert!(matches!(outcome, GeocodeOutcome::NotFound));
        assert_eq!(*gw.calls.borrow(), vec![String::new()]);
    }
}
