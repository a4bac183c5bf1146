//! Regional pricing for moodforge.
//!
//! This module defines the static pricing table and the best-effort region
//! detection used to pick a tier. Detection is a heuristic over timezone
//! names, not authoritative geolocation; it is injected behind the
//! [`RegionDetector`] trait so a deployment can swap in a real geo service.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A pricing region.
///
/// `Global` is the mandatory default entry: lookups for unknown codes and
/// detection failures resolve to it, so tier resolution is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegionCode {
    /// United States.
    Us,

    /// India (PPP-adjusted pricing).
    In,

    /// United Kingdom.
    Uk,

    /// Europe.
    Eu,

    /// Fallback region when detection yields nothing.
    Global,
}

impl RegionCode {
    /// The region code as a string (`"US"`, `"IN"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::In => "IN",
            Self::Uk => "UK",
            Self::Eu => "EU",
            Self::Global => "default",
        }
    }

    /// Parse a region code. Unknown input maps to `Global`, never fails.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "US" => Self::Us,
            "IN" => Self::In,
            "UK" | "GB" => Self::Uk,
            "EU" => Self::Eu,
            _ => Self::Global,
        }
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A currency/price bundle for one region.
#[derive(Debug, Clone, Serialize)]
pub struct PricingTier {
    /// The region this tier belongs to.
    pub region: RegionCode,

    /// Currency symbol for display ("$", "₹", ...).
    pub symbol: &'static str,

    /// Monthly price of the basic plan, in display units.
    pub basic_price: f64,

    /// Monthly price of the pro plan, in display units.
    pub pro_price: f64,

    /// ISO currency code ("USD", "INR", ...).
    pub currency: &'static str,

    /// Display name for the region.
    pub display_name: &'static str,
}

/// The static regional pricing table.
///
/// Keyed by region code with a mandatory default tier; [`PricingTable::tier`]
/// always resolves.
#[derive(Debug, Clone)]
pub struct PricingTable {
    tiers: HashMap<RegionCode, PricingTier>,
    default_tier: PricingTier,
}

impl Default for PricingTable {
    fn default() -> Self {
        let mut tiers = HashMap::new();

        tiers.insert(
            RegionCode::Us,
            PricingTier {
                region: RegionCode::Us,
                symbol: "$",
                basic_price: 9.99,
                pro_price: 19.99,
                currency: "USD",
                display_name: "United States",
            },
        );
        tiers.insert(
            RegionCode::In,
            PricingTier {
                region: RegionCode::In,
                symbol: "₹",
                basic_price: 299.0,
                pro_price: 699.0,
                currency: "INR",
                display_name: "India",
            },
        );
        tiers.insert(
            RegionCode::Uk,
            PricingTier {
                region: RegionCode::Uk,
                symbol: "£",
                basic_price: 8.99,
                pro_price: 15.99,
                currency: "GBP",
                display_name: "United Kingdom",
            },
        );
        tiers.insert(
            RegionCode::Eu,
            PricingTier {
                region: RegionCode::Eu,
                symbol: "€",
                basic_price: 9.99,
                pro_price: 18.99,
                currency: "EUR",
                display_name: "Europe",
            },
        );

        Self {
            tiers,
            default_tier: PricingTier {
                region: RegionCode::Global,
                symbol: "$",
                basic_price: 9.99,
                pro_price: 19.99,
                currency: "USD",
                display_name: "Global",
            },
        }
    }
}

impl PricingTable {
    /// Look up the tier for a region. Total: missing regions resolve to the
    /// default tier.
    #[must_use]
    pub fn tier(&self, region: RegionCode) -> &PricingTier {
        self.tiers.get(&region).unwrap_or(&self.default_tier)
    }

    /// Look up the tier for a raw region-code string. Never fails.
    #[must_use]
    pub fn tier_for_code(&self, code: &str) -> &PricingTier {
        self.tier(RegionCode::from_code(code))
    }
}

/// Resolve a region from a timezone identifier.
///
/// Ordered heuristic substring matching: India-identifying zone names first,
/// then the UK, then the broader EU metropolitan set, else US. Empty input
/// resolves to the default region.
#[must_use]
pub fn resolve_region(timezone: &str) -> RegionCode {
    let timezone = timezone.trim();
    if timezone.is_empty() {
        return RegionCode::Global;
    }

    if timezone.contains("Calcutta") || timezone.contains("Kolkata") || timezone.contains("Colombo")
    {
        return RegionCode::In;
    }

    if timezone.contains("London") {
        return RegionCode::Uk;
    }

    const EU_HINTS: [&str; 6] = ["Berlin", "Paris", "Amsterdam", "Madrid", "Rome", "Europe"];
    if EU_HINTS.iter().any(|hint| timezone.contains(hint)) {
        return RegionCode::Eu;
    }

    RegionCode::Us
}

/// A pluggable region-detection capability.
///
/// The pricing table is decoupled from how a region is found; the timezone
/// heuristic is only the default implementation.
pub trait RegionDetector: Send + Sync {
    /// Detect the region for the current session.
    fn detect(&self) -> RegionCode;
}

/// Default detector: the timezone-name heuristic.
#[derive(Debug, Clone)]
pub struct TimezoneHeuristic {
    timezone: String,
}

impl TimezoneHeuristic {
    /// Create a detector over the given timezone identifier.
    #[must_use]
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            timezone: timezone.into(),
        }
    }
}

impl RegionDetector for TimezoneHeuristic {
    fn detect(&self) -> RegionCode {
        resolve_region(&self.timezone)
    }
}

/// Detector pinned to a fixed region (configuration override, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedRegion(pub RegionCode);

impl RegionDetector for FixedRegion {
    fn detect(&self) -> RegionCode {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kolkata_resolves_to_india_tier() {
        let region = resolve_region("Asia/Kolkata");
        assert_eq!(region, RegionCode::In);

        let table = PricingTable::default();
        let tier = table.tier(region);
        assert_eq!(tier.symbol, "₹");
        assert!((tier.basic_price - 299.0).abs() < f64::EPSILON);
        assert!((tier.pro_price - 699.0).abs() < f64::EPSILON);
        assert_eq!(tier.currency, "INR");
    }

    #[test]
    fn india_checks_run_before_broader_matches() {
        assert_eq!(resolve_region("Asia/Calcutta"), RegionCode::In);
        assert_eq!(resolve_region("Asia/Colombo"), RegionCode::In);
    }

    #[test]
    fn london_resolves_to_uk() {
        assert_eq!(resolve_region("Europe/London"), RegionCode::Uk);
    }

    #[test]
    fn eu_metropolitan_zones() {
        assert_eq!(resolve_region("Europe/Berlin"), RegionCode::Eu);
        assert_eq!(resolve_region("Europe/Paris"), RegionCode::Eu);
        assert_eq!(resolve_region("Europe/Madrid"), RegionCode::Eu);
    }

    #[test]
    fn unmatched_zones_default_to_us() {
        assert_eq!(resolve_region("America/New_York"), RegionCode::Us);
        assert_eq!(resolve_region("Australia/Sydney"), RegionCode::Us);
    }

    #[test]
    fn empty_timezone_resolves_to_global() {
        assert_eq!(resolve_region(""), RegionCode::Global);
        assert_eq!(resolve_region("   "), RegionCode::Global);
    }

    #[test]
    fn tier_lookup_is_total() {
        let table = PricingTable::default();
        for code in ["US", "IN", "UK", "EU", "", "XX", "banana"] {
            let tier = table.tier_for_code(code);
            assert!(!tier.symbol.is_empty());
            assert!(!tier.currency.is_empty());
            assert!(tier.basic_price > 0.0);
            assert!(tier.pro_price > 0.0);
        }
    }

    #[test]
    fn unknown_code_gets_default_tier() {
        let table = PricingTable::default();
        let tier = table.tier_for_code("ZZ");
        assert_eq!(tier.region, RegionCode::Global);
        assert_eq!(tier.display_name, "Global");
        assert_eq!(tier.currency, "USD");
    }

    #[test]
    fn detectors_are_pluggable() {
        let heuristic = TimezoneHeuristic::new("Asia/Kolkata");
        assert_eq!(heuristic.detect(), RegionCode::In);

        let fixed = FixedRegion(RegionCode::Eu);
        assert_eq!(fixed.detect(), RegionCode::Eu);
    }
}
