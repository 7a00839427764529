// Synthetic weather sensor feeding the demo backend
use crate::domain::weather::{Reading, WeatherCondition};
use crate::infrastructure::reading_store::ReadingStore;
use chrono::{Local, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const INITIAL_PRESSURE: f64 = 1013.25;
const WIND_SPEED_MEAN: f64 = 10.0;
const WIND_SPEED_STD_DEV: f64 = 5.0;

pub struct SensorSimulator<R> {
    rng: R,
    wind: Normal<f64>,
    previous_pressure: f64,
}

impl SensorSimulator<StdRng> {
    pub fn from_entropy() -> Result<Self, NormalError> {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SensorSimulator<R> {
    pub fn new(rng: R) -> Result<Self, NormalError> {
        Ok(Self {
            rng,
            wind: Normal::new(WIND_SPEED_MEAN, WIND_SPEED_STD_DEV)?,
            previous_pressure: INITIAL_PRESSURE,
        })
    }

    /// A full reading for the given local hour of day.
    pub fn next_reading(&mut self, hour: u32) -> Reading {
        let temperature = self.temperature(hour);
        let humidity = self.humidity(temperature);
        let pressure = self.pressure();
        let wind_speed = self.wind_speed();
        let wind_direction = f64::from(self.rng.gen_range(0..=360u16));
        let weather_condition = self.condition(temperature, humidity);

        Reading {
            temperature,
            humidity,
            pressure,
            wind_speed,
            wind_direction,
            weather_condition,
        }
    }

    /// Daily sine peaking mid-afternoon, plus noise.
    fn temperature(&mut self, hour: u32) -> f64 {
        let base = 15.0 + 10.0 * (2.0 * PI * (f64::from(hour) - 6.0) / 24.0).sin();
        let value = base + self.rng.gen_range(-3.0..=3.0);
        round2(value.clamp(-50.0, 50.0))
    }

    fn humidity(&mut self, temperature: f64) -> f64 {
        let value = 80.0 - temperature * 1.5 + self.rng.gen_range(-10.0..=10.0);
        round2(value.clamp(0.0, 100.0))
    }

    /// Random walk, so consecutive readings drift rather than jump.
    fn pressure(&mut self) -> f64 {
        let next = self.previous_pressure + self.rng.gen_range(-2.0..=2.0);
        self.previous_pressure = next.clamp(950.0, 1050.0);
        round2(self.previous_pressure)
    }

    fn wind_speed(&mut self) -> f64 {
        let speed: f64 = self.wind.sample(&mut self.rng);
        let speed = speed.abs();
        round2(speed.clamp(0.0, 50.0))
    }

    fn condition(&mut self, temperature: f64, humidity: f64) -> WeatherCondition {
        if humidity > 80.0 && temperature < 5.0 {
            WeatherCondition::Snowy
        } else if humidity > 70.0 {
            WeatherCondition::Rainy
        } else if humidity < 40.0 {
            WeatherCondition::Sunny
        } else if humidity < 60.0 {
            if self.rng.gen_bool(0.5) {
                WeatherCondition::Sunny
            } else {
                WeatherCondition::PartlyCloudy
            }
        } else if self.rng.gen_bool(0.5) {
            WeatherCondition::Cloudy
        } else {
            WeatherCondition::PartlyCloudy
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Append a fresh reading to `store` every `interval` until the task is
/// aborted.
pub fn spawn_generator(
    store: Arc<ReadingStore>,
    mut simulator: SensorSimulator<StdRng>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Weather data generator started, interval {:?}", interval);
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let reading = simulator.next_reading(Local::now().hour());
            tracing::info!(
                "Generated: {}°C, {}%, {} hPa, {} m/s, {}",
                reading.temperature,
                reading.humidity,
                reading.pressure,
                reading.wind_speed,
                reading.weather_condition.code()
            );
            store.insert(reading, Utc::now()).await;
            tracing::debug!("Store holds {} readings", store.len().await);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator(seed: u64) -> SensorSimulator<StdRng> {
        SensorSimulator::new(StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_readings_stay_in_physical_ranges() {
        let mut sim = simulator(7);
        for i in 0..2000 {
            let r = sim.next_reading(i % 24);
            assert!((-50.0..=50.0).contains(&r.temperature));
            assert!((0.0..=100.0).contains(&r.humidity));
            assert!((950.0..=1050.0).contains(&r.pressure));
            assert!((0.0..=50.0).contains(&r.wind_speed));
            assert!((0.0..=360.0).contains(&r.wind_direction));
            assert!(!matches!(r.weather_condition, WeatherCondition::Other(_)));
        }
    }

    #[test]
    fn test_temperature_follows_time_of_day() {
        let mut sim = simulator(1);
        // sine peaks at 12:00 (25 ± 3) and bottoms at 00:00 (5 ± 3)
        for _ in 0..100 {
            let noon = sim.temperature(12);
            let midnight = sim.temperature(0);
            assert!((22.0..=28.0).contains(&noon), "noon {}", noon);
            assert!((2.0..=8.0).contains(&midnight), "midnight {}", midnight);
        }
    }

    #[test]
    fn test_pressure_walks_in_small_steps() {
        let mut sim = simulator(3);
        let mut previous = INITIAL_PRESSURE;
        for _ in 0..500 {
            let p = sim.pressure();
            assert!((p - previous).abs() <= 2.02, "{} -> {}", previous, p);
            previous = p;
        }
    }

    #[test]
    fn test_condition_rules() {
        let mut sim = simulator(5);
        assert_eq!(sim.condition(0.0, 90.0), WeatherCondition::Snowy);
        assert_eq!(sim.condition(10.0, 90.0), WeatherCondition::Rainy);
        assert_eq!(sim.condition(10.0, 75.0), WeatherCondition::Rainy);
        assert_eq!(sim.condition(25.0, 30.0), WeatherCondition::Sunny);
        for _ in 0..50 {
            let mild = sim.condition(15.0, 50.0);
            assert!(matches!(mild, WeatherCondition::Sunny | WeatherCondition::PartlyCloudy));
            let damp = sim.condition(15.0, 65.0);
            assert!(matches!(damp, WeatherCondition::Cloudy | WeatherCondition::PartlyCloudy));
        }
    }

    #[test]
    fn test_wind_speed_centred_on_mean() {
        let mut sim = simulator(13);
        let samples: Vec<f64> = (0..5000).map(|_| sim.wind_speed()).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        // |N(10, 5)| folds a little mass above the mean
        assert!((9.5..=11.0).contains(&mean), "mean {}", mean);
        assert!(samples.iter().all(|s| *s >= 0.0));
    }

    #[test]
    fn test_values_rounded_to_two_decimals() {
        let mut sim = simulator(11);
        let r = sim.next_reading(9);
        assert_eq!(round2(r.temperature), r.temperature);
        assert_eq!(round2(r.humidity), r.humidity);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generator_fills_store() {
        let store = Arc::new(ReadingStore::new(48));
        let handle = spawn_generator(store.clone(), simulator(9), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(11)).await;
        handle.abort();

        // ticks at 0s, 5s and 10s
        assert_eq!(store.len().await, 3);
    }
}
