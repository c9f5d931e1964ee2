use weather_core::{ErrorResult, WeatherResult, WeatherView};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Render the full page for `view`.
pub fn page(view: &WeatherView) -> String {
    let mut body = String::new();

    if let Some(weather) = &view.weather {
        body.push_str(&weather_card(weather));
    }
    if let Some(error) = &view.error {
        body.push_str(&error_banner(error));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Weather</title>
</head>
<body style="font-family:sans-serif;max-width:32rem;margin:2rem auto">
<h1>Weather</h1>
<form action="/weather" method="post">
<input type="text" name="city" placeholder="Enter a city" required>
<button type="submit">Get weather</button>
</form>
{body}</body>
</html>
"#
    )
}

fn weather_card(w: &WeatherResult) -> String {
    let city = escape(&w.city);
    let country = escape(&w.country);
    let icon = escape(&w.icon);
    let description = escape(&w.description);
    let sunrise = escape(&w.sunrise);
    let sunset = escape(&w.sunset);

    format!(
        r#"<section class="weather">
<h2>{city}, {country}</h2>
<img src="{ICON_BASE_URL}/{icon}@2x.png" alt="{description}">
<p class="temperature">{temperature}°C</p>
<p class="description">{description}</p>
<ul>
<li>Feels like: {feels_like}°C</li>
<li>Humidity: {humidity}%</li>
<li>Wind: {wind} m/s</li>
<li>Pressure: {pressure} hPa</li>
<li>Sunrise: {sunrise}</li>
<li>Sunset: {sunset}</li>
<li>Coordinates: {lat}, {lon}</li>
</ul>
</section>
"#,
        temperature = w.temperature,
        feels_like = w.feels_like,
        humidity = w.humidity,
        wind = w.wind,
        pressure = w.pressure,
        lat = w.coordinates.lat,
        lon = w.coordinates.lon,
    )
}

fn error_banner(error: &ErrorResult) -> String {
    format!("<p class=\"error\">{}</p>\n", escape(&error.message))
}

/// Minimal HTML escaping for text and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
