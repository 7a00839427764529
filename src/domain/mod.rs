// Domain layer - Weather data, display lookups and chart state
pub mod chart;
pub mod formatting;
pub mod weather;
