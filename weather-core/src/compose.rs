use crate::{
    classify::{classify, kelvin_to_celsius},
    error::WeatherError,
    model::{ClassifiedWeather, UpstreamWeatherResponse},
};

/// Turn a decoded provider payload into the outward response body.
///
/// Only the first reported condition is used. An empty condition list is a
/// malformed payload, not a default.
pub fn compose(upstream: &UpstreamWeatherResponse) -> Result<ClassifiedWeather, WeatherError> {
    let condition = upstream.weather.first().ok_or(WeatherError::EmptyConditions)?;

    let celsius = kelvin_to_celsius(upstream.main.temp);

    Ok(ClassifiedWeather {
        weather_condition: condition.main.clone(),
        temperature: format!("{celsius:.2}°C"),
        temperature_condition: classify(celsius),
    })
}
