//! Ride-hailing fare estimation
//!
//! Fares are estimated from the straight-line distance between two endpoints,
//! not from the transit route, so quotes are an approximation that does not
//! depend on the directions provider.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::Coordinate;

/// Assumed average road speed used to derive travel time
pub const AVERAGE_SPEED_KMH: f64 = 30.0;

/// Pricing parameters of one provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareQuoteParameters {
    /// Flat booking price
    pub base_price: f64,
    /// Price per kilometer
    pub per_km_rate: f64,
    /// Price per minute of travel
    pub per_minute_rate: f64,
    /// Floor applied to every quote
    pub minimum_fare: f64,
    /// Static demand multiplier
    pub surge_multiplier: f64,
}

impl FareQuoteParameters {
    /// Check that all rates are finite and non-negative
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValidationError`] naming the first bad field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("base_price", self.base_price),
            ("per_km_rate", self.per_km_rate),
            ("per_minute_rate", self.per_minute_rate),
            ("minimum_fare", self.minimum_fare),
            ("surge_multiplier", self.surge_multiplier),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::ValidationError(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

const UBER: FareQuoteParameters = FareQuoteParameters {
    base_price: 50.0,
    per_km_rate: 12.0,
    per_minute_rate: 1.5,
    minimum_fare: 60.0,
    surge_multiplier: 1.0,
};

const OLA: FareQuoteParameters = FareQuoteParameters {
    base_price: 48.0,
    per_km_rate: 11.5,
    per_minute_rate: 1.25,
    minimum_fare: 55.0,
    surge_multiplier: 1.0,
};

const RAPIDO: FareQuoteParameters = FareQuoteParameters {
    base_price: 30.0,
    per_km_rate: 10.0,
    per_minute_rate: 1.0,
    minimum_fare: 40.0,
    surge_multiplier: 1.0,
};

const NAMMA_YATRI: FareQuoteParameters = FareQuoteParameters {
    base_price: 45.0,
    per_km_rate: 11.0,
    per_minute_rate: 1.0,
    minimum_fare: 50.0,
    surge_multiplier: 1.0,
};

/// Ride-hailing providers with a static pricing table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FareProvider {
    /// Uber
    Uber,
    /// Ola
    Ola,
    /// Rapido
    Rapido,
    /// Namma Yatri
    NammaYatri,
}

impl FareProvider {
    /// All providers in table order
    pub const ALL: [Self; 4] = [Self::Uber, Self::Ola, Self::Rapido, Self::NammaYatri];

    /// Pricing parameters for this provider
    #[must_use]
    pub const fn parameters(self) -> &'static FareQuoteParameters {
        match self {
            Self::Uber => &UBER,
            Self::Ola => &OLA,
            Self::Rapido => &RAPIDO,
            Self::NammaYatri => &NAMMA_YATRI,
        }
    }

    /// Table key, e.g. "NAMMA_YATRI"
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Uber => "UBER",
            Self::Ola => "OLA",
            Self::Rapido => "RAPIDO",
            Self::NammaYatri => "NAMMA_YATRI",
        }
    }

    /// Display name, e.g. "NAMMA YATRI"
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Uber => "UBER",
            Self::Ola => "OLA",
            Self::Rapido => "RAPIDO",
            Self::NammaYatri => "NAMMA YATRI",
        }
    }
}

impl fmt::Display for FareProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for FareProvider {
    type Err = DomainError;

    /// Accepts the table key or display name in any case, e.g. "namma-yatri"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn fold(name: &str) -> String {
            name.chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .collect()
        }

        let wanted = fold(s);
        Self::ALL
            .into_iter()
            .find(|provider| fold(provider.key()) == wanted)
            .ok_or_else(|| DomainError::ValidationError(format!("Unknown fare provider: {s}")))
    }
}

/// Straight-line trip metrics between two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripEstimate {
    /// Great-circle distance, rounded to 2 decimals
    pub distance_km: f64,
    /// Travel time at [`AVERAGE_SPEED_KMH`], rounded to whole minutes
    pub estimated_time_min: f64,
}

/// A fare quote for one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    /// Provider the quote belongs to
    pub provider: FareProvider,
    /// Display name of the provider
    pub provider_name: String,
    /// Estimated fare, never below the provider's minimum fare
    pub amount: f64,
    /// Provider's per-kilometer rate, shown alongside the quote
    pub per_km_rate: f64,
}

impl FareQuote {
    /// Amount rounded to whole currency units for display
    #[must_use]
    pub fn rounded_amount(&self) -> f64 {
        self.amount.round()
    }
}

/// Trip metrics plus one quote per provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareComparison {
    /// Distance and time the quotes are based on
    pub estimate: TripEstimate,
    /// Quotes in provider table order
    pub quotes: Vec<FareQuote>,
}

impl FareComparison {
    /// The lowest quote, if any
    #[must_use]
    pub fn cheapest(&self) -> Option<&FareQuote> {
        self.quotes
            .iter()
            .min_by(|a, b| a.amount.total_cmp(&b.amount))
    }
}

/// Estimate distance and travel time between two coordinates
///
/// Distance is the haversine great-circle distance rounded to 2 decimals. Time
/// assumes a constant [`AVERAGE_SPEED_KMH`] and is rounded to whole minutes,
/// computed from the unrounded distance.
#[must_use]
pub fn estimate_distance(origin: &Coordinate, destination: &Coordinate) -> TripEstimate {
    let distance = origin.distance_km(destination);
    let minutes = distance / AVERAGE_SPEED_KMH * 60.0;

    TripEstimate {
        distance_km: (distance * 100.0).round() / 100.0,
        estimated_time_min: minutes.round(),
    }
}

/// Apply the linear fare formula with a minimum-fare floor
///
/// `max(minimum_fare, (base_price + distance * per_km + time * per_minute) * surge)`
#[must_use]
pub fn estimate_fare(distance_km: f64, time_min: f64, params: &FareQuoteParameters) -> f64 {
    let subtotal = distance_km.mul_add(
        params.per_km_rate,
        time_min.mul_add(params.per_minute_rate, params.base_price),
    );
    (subtotal * params.surge_multiplier).max(params.minimum_fare)
}

/// Quote a single provider for a trip estimate
#[must_use]
pub fn quote(provider: FareProvider, estimate: &TripEstimate) -> FareQuote {
    let params = provider.parameters();
    FareQuote {
        provider,
        provider_name: provider.display_name().to_string(),
        amount: estimate_fare(estimate.distance_km, estimate.estimated_time_min, params),
        per_km_rate: params.per_km_rate,
    }
}

/// Quote every provider for a trip between two coordinates
#[must_use]
pub fn quote_all(origin: &Coordinate, destination: &Coordinate) -> FareComparison {
    let estimate = estimate_distance(origin, destination);
    let quotes = FareProvider::ALL
        .iter()
        .map(|provider| quote(*provider, &estimate))
        .collect();
    FareComparison { estimate, quotes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_table_is_valid() {
        for provider in FareProvider::ALL {
            assert!(provider.parameters().validate().is_ok(), "{provider}");
        }
    }

    #[test]
    fn test_uber_parameters() {
        let params = FareProvider::Uber.parameters();
        assert!((params.base_price - 50.0).abs() < f64::EPSILON);
        assert!((params.per_km_rate - 12.0).abs() < f64::EPSILON);
        assert!((params.per_minute_rate - 1.5).abs() < f64::EPSILON);
        assert!((params.minimum_fare - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let params = FareQuoteParameters {
            per_km_rate: -1.0,
            ..*FareProvider::Ola.parameters()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("per_km_rate"));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let params = FareQuoteParameters {
            surge_multiplier: f64::NAN,
            ..*FareProvider::Ola.parameters()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("uber".parse::<FareProvider>().unwrap(), FareProvider::Uber);
        assert_eq!("OLA".parse::<FareProvider>().unwrap(), FareProvider::Ola);
        assert_eq!(
            "namma_yatri".parse::<FareProvider>().unwrap(),
            FareProvider::NammaYatri
        );
        assert_eq!(
            "Namma Yatri".parse::<FareProvider>().unwrap(),
            FareProvider::NammaYatri
        );
        assert_eq!(
            "namma-yatri".parse::<FareProvider>().unwrap(),
            FareProvider::NammaYatri
        );
        assert!("lyft".parse::<FareProvider>().is_err());
        assert!("".parse::<FareProvider>().is_err());
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(FareProvider::NammaYatri.key(), "NAMMA_YATRI");
        assert_eq!(FareProvider::NammaYatri.to_string(), "NAMMA YATRI");
    }

    #[test]
    fn test_provider_serde_uses_table_key() {
        let json = serde_json::to_string(&FareProvider::NammaYatri).unwrap();
        assert_eq!(json, "\"NAMMA_YATRI\"");
    }

    #[test]
    fn test_zero_distance() {
        let point = Coordinate::bangalore();
        let estimate = estimate_distance(&point, &point);
        assert_eq!(
            estimate,
            TripEstimate {
                distance_km: 0.0,
                estimated_time_min: 0.0
            }
        );
    }

    #[test]
    fn test_zero_distance_quotes_minimum_fare() {
        let point = Coordinate::bangalore();
        let comparison = quote_all(&point, &point);
        for quote in &comparison.quotes {
            let minimum = quote.provider.parameters().minimum_fare;
            assert!((quote.amount - minimum).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_bangalore_scenario() {
        let estimate = estimate_distance(&Coordinate::bangalore(), &Coordinate::koramangala());
        assert!((estimate.distance_km - 4.59).abs() < f64::EPSILON);
        assert!((estimate.estimated_time_min - 9.0).abs() < f64::EPSILON);

        let fare = estimate_fare(
            estimate.distance_km,
            estimate.estimated_time_min,
            FareProvider::Uber.parameters(),
        );
        // 50 + 4.59 * 12 + 9 * 1.5
        assert!((fare - 118.58).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::bangalore();
        let b = Coordinate::koramangala();
        assert_eq!(estimate_distance(&a, &b), estimate_distance(&b, &a));
    }

    #[test]
    fn test_minimum_fare_applies() {
        let fare = estimate_fare(0.5, 1.0, FareProvider::Rapido.parameters());
        assert!((fare - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_surge_multiplier_applies() {
        let params = FareQuoteParameters {
            surge_multiplier: 2.0,
            ..*FareProvider::Uber.parameters()
        };
        let fare = estimate_fare(10.0, 20.0, &params);
        // (50 + 120 + 30) * 2
        assert!((fare - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_quote_all_preserves_table_order() {
        let comparison = quote_all(&Coordinate::bangalore(), &Coordinate::koramangala());
        let providers: Vec<_> = comparison.quotes.iter().map(|q| q.provider).collect();
        assert_eq!(providers, FareProvider::ALL.to_vec());
        assert_eq!(comparison.quotes[3].provider_name, "NAMMA YATRI");
    }

    #[test]
    fn test_cheapest_quote() {
        let comparison = quote_all(&Coordinate::bangalore(), &Coordinate::koramangala());
        let cheapest = comparison.cheapest().unwrap();
        assert_eq!(cheapest.provider, FareProvider::Rapido);
    }

    #[test]
    fn test_rounded_amount() {
        let quote = FareQuote {
            provider: FareProvider::Uber,
            provider_name: "UBER".to_string(),
            amount: 118.58,
            per_km_rate: 12.0,
        };
        assert!((quote.rounded_amount() - 119.0).abs() < f64::EPSILON);
    }
}
