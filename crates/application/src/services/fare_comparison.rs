//! Fare comparison service
//!
//! Quotes every ride-hailing provider for a trip using the straight-line
//! distance between the endpoints.

use domain::{Coordinate, FareComparison, FareProvider, fare};
use tracing::{debug, instrument};

/// Service comparing ride-hailing fares
#[derive(Debug, Clone, Copy, Default)]
pub struct FareComparisonService;

impl FareComparisonService {
    /// Create a new fare comparison service
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Distance, time and one quote per provider
    #[instrument(
        skip(self, origin, destination),
        fields(origin = %origin, destination = %destination)
    )]
    #[must_use]
    pub fn compare(&self, origin: &Coordinate, destination: &Coordinate) -> FareComparison {
        let comparison = fare::quote_all(origin, destination);
        debug!(
            distance_km = comparison.estimate.distance_km,
            time_min = comparison.estimate.estimated_time_min,
            "Fares quoted"
        );
        comparison
    }

    /// Like [`compare`](Self::compare), keeping only `providers`
    ///
    /// An empty filter keeps every provider. Quotes stay in table order.
    #[must_use]
    pub fn compare_providers(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        providers: &[FareProvider],
    ) -> FareComparison {
        let mut comparison = self.compare(origin, destination);
        if !providers.is_empty() {
            comparison
                .quotes
                .retain(|quote| providers.contains(&quote.provider));
        }
        comparison
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_bangalore_trip() {
        let service = FareComparisonService::new();
        let comparison = service.compare(&Coordinate::bangalore(), &Coordinate::koramangala());

        assert!((comparison.estimate.distance_km - 4.59).abs() < 1e-9);
        assert!((comparison.estimate.estimated_time_min - 9.0).abs() < 1e-9);
        assert_eq!(comparison.quotes.len(), 4);

        let uber = &comparison.quotes[0];
        assert_eq!(uber.provider, FareProvider::Uber);
        assert!((uber.amount - 118.58).abs() < 1e-6);
        assert!((uber.rounded_amount() - 119.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compare_cheapest_is_rapido() {
        let service = FareComparisonService::new();
        let comparison = service.compare(&Coordinate::bangalore(), &Coordinate::koramangala());
        assert_eq!(comparison.cheapest().unwrap().provider, FareProvider::Rapido);
    }

    #[test]
    fn test_same_point_yields_minimum_fares() {
        let service = FareComparisonService::new();
        let here = Coordinate::bangalore();
        let comparison = service.compare(&here, &here);

        assert!(comparison.estimate.distance_km.abs() < f64::EPSILON);
        for quote in &comparison.quotes {
            let minimum = quote.provider.parameters().minimum_fare;
            assert!((quote.amount - minimum).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_provider_filter_keeps_table_order() {
        let service = FareComparisonService::new();
        let (a, b) = (Coordinate::bangalore(), Coordinate::koramangala());
        let filtered = service.compare_providers(
            &a,
            &b,
            &[FareProvider::NammaYatri, FareProvider::Ola],
        );
        let all = service.compare(&a, &b);

        assert_eq!(filtered.estimate, all.estimate);
        let providers: Vec<_> = filtered.quotes.iter().map(|q| q.provider).collect();
        assert_eq!(providers, vec![FareProvider::Ola, FareProvider::NammaYatri]);
        assert_eq!(Some(&filtered.quotes[0]), all.quotes.get(1));
    }

    #[test]
    fn test_empty_provider_filter_keeps_all() {
        let service = FareComparisonService::new();
        let (a, b) = (Coordinate::bangalore(), Coordinate::koramangala());
        assert_eq!(
            service.compare_providers(&a, &b, &[]),
            service.compare(&a, &b)
        );
    }
}
