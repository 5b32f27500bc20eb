//! Pure mapping from weather data to presentation hints.
//!
//! Condition descriptions are trimmed and lower-cased before every table
//! lookup, so "Clear Sky " and "clear sky" select the same images.

use crate::model::WeatherReading;

pub const DEFAULT_BACKGROUND: &str = "/images/default-bg.jpg";
pub const DEFAULT_ICON: &str = "/images/default.png";

const BACKGROUNDS: &[(&str, &str)] = &[
    ("clear sky", "/images/clears-sky.jpg"),
    ("scattered clouds", "/images/cloudy-sky.jpg"),
    ("overcast clouds", "/images/overcast-sky.jpg"),
    ("rain", "/images/rainy-sky.jpg"),
    ("light rain", "/images/rainy-sky.jpg"),
    ("snow", "/images/snowy-sky.jpg"),
];

const ICONS: &[(&str, &str)] = &[
    ("clear sky", "/images/clear-sky.png"),
    ("scattered clouds", "/images/cloud.png"),
    ("overcast clouds", "/images/overcast.png"),
    ("rain", "/images/rain.png"),
    ("light rain", "/images/rain.png"),
    ("snow", "/images/snow.png"),
];

fn normalize(description: &str) -> String {
    description.trim().to_lowercase()
}

fn lookup(table: &'static [(&'static str, &'static str)], description: &str) -> Option<&'static str> {
    let key = normalize(description);
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn background_image(description: &str) -> &'static str {
    lookup(BACKGROUNDS, description).unwrap_or(DEFAULT_BACKGROUND)
}

pub fn icon_image(description: &str) -> &'static str {
    lookup(ICONS, description).unwrap_or(DEFAULT_ICON)
}

/// Background for the page as a whole; the default when nothing has been looked up.
pub fn page_background(reading: Option<&WeatherReading>) -> &'static str {
    reading.map_or(DEFAULT_BACKGROUND, |r| background_image(&r.description))
}

/// Color treatment for a temperature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureTone {
    /// Strictly below zero.
    Freezing,
    Warm,
}

impl TemperatureTone {
    pub fn of(celsius: f64) -> Self {
        if celsius < 0.0 {
            TemperatureTone::Freezing
        } else {
            TemperatureTone::Warm
        }
    }
}

pub fn format_temperature(celsius: f64) -> String {
    // Negative zero prints as "-0.0" but is not freezing.
    let celsius = if celsius == 0.0 { 0.0 } else { celsius };
    format!("{celsius:.1}°C")
}

/// Everything needed to draw the weather card for one reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingDisplay {
    pub city: String,
    pub description: String,
    pub temperature: String,
    pub tone: TemperatureTone,
    pub background: &'static str,
    pub icon: &'static str,
}

impl From<&WeatherReading> for ReadingDisplay {
    fn from(reading: &WeatherReading) -> Self {
        Self {
            city: reading.city.clone(),
            description: reading.description.clone(),
            temperature: format_temperature(reading.temperature),
            tone: TemperatureTone::of(reading.temperature),
            background: background_image(&reading.description),
            icon: icon_image(&reading.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(city: &str, description: &str, temperature: f64) -> WeatherReading {
        WeatherReading {
            city: city.into(),
            description: description.into(),
            temperature,
        }
    }

    #[test]
    fn paris_clear_sky_card() {
        let card = ReadingDisplay::from(&reading("Paris", "clear sky", 18.5));

        assert_eq!(card.temperature, "18.5°C");
        assert_eq!(card.tone, TemperatureTone::Warm);
        assert_eq!(card.background, "/images/clears-sky.jpg");
        assert_eq!(card.icon, "/images/clear-sky.png");
    }

    #[test]
    fn oslo_below_zero_is_freezing() {
        let card = ReadingDisplay::from(&reading("Oslo", "snow", -3.2));

        assert_eq!(card.temperature, "-3.2°C");
        assert_eq!(card.tone, TemperatureTone::Freezing);
    }

    #[test]
    fn zero_is_warm() {
        assert_eq!(TemperatureTone::of(0.0), TemperatureTone::Warm);
        assert_eq!(TemperatureTone::of(-0.01), TemperatureTone::Freezing);
    }

    #[test]
    fn both_tables_ignore_case_and_padding() {
        assert_eq!(background_image("  Light Rain "), "/images/rainy-sky.jpg");
        assert_eq!(icon_image("  Light Rain "), "/images/rain.png");
        assert_eq!(icon_image("OVERCAST CLOUDS"), "/images/overcast.png");
    }

    #[test]
    fn unknown_condition_falls_back() {
        assert_eq!(background_image("volcanic ash"), DEFAULT_BACKGROUND);
        assert_eq!(icon_image("volcanic ash"), DEFAULT_ICON);
        assert_eq!(icon_image(""), DEFAULT_ICON);
    }

    #[test]
    fn page_background_without_reading() {
        assert_eq!(page_background(None), DEFAULT_BACKGROUND);

        let r = reading("Oslo", "snow", -1.0);
        assert_eq!(page_background(Some(&r)), "/images/snowy-sky.jpg");
    }

    #[test]
    fn negative_zero_renders_as_zero() {
        let card = ReadingDisplay::from(&reading("Reykjavik", "snow", -0.0));

        assert_eq!(card.temperature, "0.0°C");
        assert_eq!(card.tone, TemperatureTone::Warm);
        assert_eq!(format_temperature(0.0), "0.0°C");
    }

    #[test]
    fn temperature_rounds_to_one_decimal() {
        assert_eq!(format_temperature(21.0), "21.0°C");
        assert_eq!(format_temperature(7.26), "7.3°C");
        assert_eq!(format_temperature(-12.46), "-12.5°C");
    }
}
