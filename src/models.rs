//! Frontend Models
//!
//! Data structures for widget state and the weather endpoint body.

use serde::{Deserialize, Serialize};

/// A single to-do entry. Identity is positional within the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub text: String,
    pub completed: bool,
}

/// Weather endpoint response body. Transient, replaced wholesale on
/// each successful fetch, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub name: String,
    pub main: WeatherMain,
    pub wind: Wind,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
    pub icon: String,
}
