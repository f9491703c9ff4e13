//! Renders a forecast series as one report line per day.
//!
//! The intensity indicator is relative to the whole forecast window, so
//! rendering is two-pass: normalize every day's max temperature to the
//! display unit and fold out the window's min/max, then emit the lines.

use chrono::NaiveDateTime;

use crate::model::{DayForecast, ForecastOptions, ForecastSeries};

/// Width of the indicator column; a day renders between 1 and WIDTH marks.
const INDICATOR_WIDTH: usize = 5;

/// Timestamp layout used by the provider for sunrise/sunset.
const PROVIDER_TIMESTAMP: &str = "%Y-%m-%dT%H:%M";

/// Lazily produces the formatted report lines, one per day, in series order.
pub fn render<'a>(
    series: &'a ForecastSeries,
    options: &'a ForecastOptions,
) -> impl Iterator<Item = String> + 'a {
    let temps: Vec<f64> = series
        .days
        .iter()
        .map(|day| to_display_unit(day.temperature_max, options.fahrenheit))
        .collect();

    let (min, max) = temps
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
            (lo.min(t), hi.max(t))
        });

    series
        .days
        .iter()
        .zip(temps)
        .map(move |(day, temp)| render_day(day, temp, min, max, options))
}

fn to_display_unit(celsius: f64, fahrenheit: bool) -> f64 {
    if fahrenheit {
        celsius * 9.0 / 5.0 + 32.0
    } else {
        celsius
    }
}

/// Relative intensity of one day within the window, clamped to [1, WIDTH].
///
/// A day at the window minimum still renders one mark; the empty indicator
/// is reserved for "no data". A flat window renders every day at the
/// maximum instead of dividing by zero.
fn intensity(temp: f64, min: f64, max: f64) -> usize {
    let span = max - min;
    if span == 0.0 {
        return INDICATOR_WIDTH;
    }

    let raw = ((temp - min) / span * INDICATOR_WIDTH as f64).floor() as i64;
    raw.clamp(1, INDICATOR_WIDTH as i64) as usize
}

/// `marks` filled positions padded with blanks to the fixed width.
fn indicator(marks: usize) -> String {
    format!("{:<width$}", "*".repeat(marks), width = INDICATOR_WIDTH)
}

fn render_day(
    day: &DayForecast,
    temp: f64,
    min: f64,
    max: f64,
    options: &ForecastOptions,
) -> String {
    let unit = if options.fahrenheit { "F" } else { "C" };

    let mut line = format!(
        "{} {:02} °{} | {}",
        indicator(intensity(temp, min, max)),
        temp as i64,
        unit,
        day.date,
    );

    for segment in optional_segments(day, options) {
        line.push_str(" | ");
        line.push_str(&segment);
    }

    line
}

/// The enabled optional segments of one line, evaluated in declared order.
/// A producer whose source value is missing yields nothing and the segment
/// is silently omitted.
fn optional_segments(day: &DayForecast, options: &ForecastOptions) -> Vec<String> {
    type Producer<'a> = Box<dyn Fn() -> Option<String> + 'a>;

    let producers: [(bool, Producer<'_>); 4] = [
        (
            options.sunrise,
            Box::new(|| {
                day.sunrise
                    .as_deref()
                    .and_then(clock_time)
                    .map(|t| format!("Sunrise: {t}"))
            }),
        ),
        (
            options.sunset,
            Box::new(|| {
                day.sunset
                    .as_deref()
                    .and_then(clock_time)
                    .map(|t| format!("Sunset: {t}"))
            }),
        ),
        (
            options.precipitation,
            Box::new(|| day.precipitation_sum.map(|mm| format!("Precip: {mm:.2} mm"))),
        ),
        (
            options.uv_index,
            Box::new(|| day.uv_index_max.map(|uv| format!("UV Index: {uv:.1}"))),
        ),
    ];

    producers
        .iter()
        .filter(|(enabled, _)| *enabled)
        .filter_map(|(_, produce)| produce())
        .collect()
}

/// Local clock time of a provider timestamp, e.g. "2024-07-15T05:31" → "05:31".
fn clock_time(stamp: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(stamp, PROVIDER_TIMESTAMP)
        .map(|t| t.format("%H:%M").to_string())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(date: &str, max: f64) -> DayForecast {
        DayForecast {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            temperature_max: max,
            temperature_min: None,
            precipitation_sum: None,
            uv_index_max: None,
            sunrise: None,
            sunset: None,
        }
    }

    fn series(temps: &[f64]) -> ForecastSeries {
        let days = temps
            .iter()
            .enumerate()
            .map(|(i, &t)| day(&format!("2024-07-{:02}", i + 1), t))
            .collect();
        ForecastSeries { days }
    }

    #[test]
    fn ramp_renders_expected_intensities() {
        let series = series(&[10.0, 15.0, 20.0]);
        let lines: Vec<String> = render(&series, &ForecastOptions::default()).collect();

        assert_eq!(lines[0], "*     10 °C | 2024-07-01");
        assert_eq!(lines[1], "**    15 °C | 2024-07-02");
        assert_eq!(lines[2], "***** 20 °C | 2024-07-03");
    }

    #[test]
    fn flat_window_renders_full_indicator() {
        let series = series(&[7.5, 7.5, 7.5, 7.5]);
        for line in render(&series, &ForecastOptions::default()) {
            assert!(line.starts_with("***** "));
        }
    }

    #[test]
    fn intensity_stays_in_bounds() {
        for temps in [
            vec![0.0, 100.0],
            vec![-40.0, -39.9, 35.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
        ] {
            let series = series(&temps);
            for line in render(&series, &ForecastOptions::default()) {
                let marks = line.chars().take_while(|&c| c == '*').count();
                assert!((1..=5).contains(&marks), "bad indicator in {line:?}");
            }
        }
    }

    #[test]
    fn celsius_values_pass_through_unchanged() {
        assert_eq!(to_display_unit(21.7, false), 21.7);
        assert_eq!(to_display_unit(0.0, true), 32.0);
        assert_eq!(to_display_unit(100.0, true), 212.0);
    }

    #[test]
    fn fahrenheit_conversion_is_client_side() {
        let series = series(&[0.0, 10.0, 20.0]);
        let options = ForecastOptions {
            fahrenheit: true,
            ..Default::default()
        };
        let lines: Vec<String> = render(&series, &options).collect();

        assert!(lines[0].contains("32 °F"));
        assert!(lines[1].contains("50 °F"));
        assert!(lines[2].contains("68 °F"));
    }

    #[test]
    fn missing_sunrise_is_silently_omitted() {
        let mut s = series(&[10.0, 20.0]);
        s.days[0].sunrise = Some("2024-07-01T05:31".to_string());
        // day 2 has no sunrise entry at all

        let options = ForecastOptions {
            sunrise: true,
            ..Default::default()
        };
        let lines: Vec<String> = render(&s, &options).collect();

        assert!(lines[0].ends_with("| Sunrise: 05:31"));
        assert!(!lines[1].contains("Sunrise"));
    }

    #[test]
    fn unparseable_timestamp_omits_the_segment() {
        let mut s = series(&[10.0]);
        s.days[0].sunset = Some("not-a-timestamp".to_string());

        let options = ForecastOptions {
            sunset: true,
            ..Default::default()
        };
        let line = render(&s, &options).next().unwrap();
        assert!(!line.contains("Sunset"));
    }

    #[test]
    fn segments_follow_declared_order() {
        let mut s = series(&[10.0]);
        s.days[0].sunrise = Some("2024-07-01T05:31".to_string());
        s.days[0].sunset = Some("2024-07-01T21:48".to_string());
        s.days[0].precipitation_sum = Some(1.25);
        s.days[0].uv_index_max = Some(6.45);

        let options = ForecastOptions {
            precipitation: true,
            sunrise: true,
            sunset: true,
            uv_index: true,
            fahrenheit: false,
        };
        let line = render(&s, &options).next().unwrap();

        assert_eq!(
            line,
            "***** 10 °C | 2024-07-01 | Sunrise: 05:31 | Sunset: 21:48 | Precip: 1.25 mm | UV Index: 6.5"
        );
    }

    #[test]
    fn disabled_fields_never_render() {
        let mut s = series(&[10.0]);
        s.days[0].precipitation_sum = Some(3.0);
        s.days[0].uv_index_max = Some(2.0);

        let line = render(&s, &ForecastOptions::default()).next().unwrap();
        assert!(!line.contains("Precip"));
        assert!(!line.contains("UV Index"));
    }

    #[test]
    fn empty_series_renders_nothing() {
        let series = ForecastSeries::default();
        assert_eq!(render(&series, &ForecastOptions::default()).count(), 0);
    }
}
