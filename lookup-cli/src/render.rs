//! Text rendering: conditions block, forecast cards, temperature chart,
//! history list.

use std::fmt::Write as _;

use lookup_core::{CurrentConditions, ForecastEntry, QueryOutcome};

const BAR_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn outcome(outcome: &QueryOutcome) {
    match outcome {
        QueryOutcome::Idle => {}
        QueryOutcome::Pending => println!("Loading..."),
        QueryOutcome::Success { conditions, daily } => {
            print!("{}", conditions_block(conditions));
            if !daily.is_empty() {
                print!("{}", forecast_block(daily));
            }
        }
        QueryOutcome::Failure(message) => println!("{message}"),
    }
}

pub fn history(terms: &[String]) {
    if terms.is_empty() {
        println!("No recent searches.");
        return;
    }

    for term in terms {
        println!("{term}");
    }
}

fn conditions_block(conditions: &CurrentConditions) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}, {}", conditions.place, conditions.country);
    let _ = writeln!(
        out,
        "{} {}°C  {}",
        icon_glyph(&conditions.icon),
        conditions.temperature_c.round(),
        conditions.description,
    );
    let _ = writeln!(
        out,
        "humidity {}%  wind {} m/s",
        conditions.humidity_pct, conditions.wind_speed_mps,
    );

    out
}

fn forecast_block(daily: &[ForecastEntry]) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    for entry in daily {
        let _ = writeln!(
            out,
            "{}  {:>3}°C  {}",
            entry.at.format("%a %Y-%m-%d"),
            entry.temperature_c.round(),
            entry.description,
        );
    }
    let _ = writeln!(out, "temp {}", chart_line(daily));

    out
}

/// One block glyph per day, scaled over the daily temperature range.
fn chart_line(daily: &[ForecastEntry]) -> String {
    let min = daily.iter().map(|e| e.temperature_c).fold(f64::INFINITY, f64::min);
    let max = daily.iter().map(|e| e.temperature_c).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    daily
        .iter()
        .map(|entry| {
            let idx = if span < f64::EPSILON {
                3
            } else {
                (((entry.temperature_c - min) / span) * 7.0).round() as usize
            };
            BAR_GLYPHS[idx.min(7)]
        })
        .collect()
}

/// Maps the backend's icon identifiers (day/night suffix ignored) to a glyph.
fn icon_glyph(icon: &str) -> &'static str {
    match icon.get(..2).unwrap_or("") {
        "01" => "☀",
        "02" => "⛅",
        "03" | "04" => "☁",
        "09" | "10" => "🌧",
        "11" => "⛈",
        "13" => "🌨",
        "50" => "🌫",
        _ => "·",
    }
}
