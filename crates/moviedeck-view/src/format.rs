//! Display formatting for optional movie fields.

/// Placeholder shown for any missing value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a vote average to one decimal, rounding half away from zero.
///
/// A missing or non-finite average yields [`NOT_AVAILABLE`]; `0` is shown
/// as `"0.0"`.
#[must_use]
pub fn rating_text(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(v) if v.is_finite() => {
            let tenths = (v * 10.0).round() / 10.0;
            format!("{tenths:.1}")
        }
        _ => String::from(NOT_AVAILABLE),
    }
}

/// Card overlay variant of [`rating_text`]: TMDB reports unrated movies as
/// `0`, so a non-positive average also yields [`NOT_AVAILABLE`].
#[must_use]
pub fn card_rating_text(vote_average: Option<f64>) -> String {
    rating_text(vote_average.filter(|v| *v > 0.0))
}

/// Extracts the year from a release date: everything before the first `-`.
///
/// `None` and empty strings yield [`NOT_AVAILABLE`].
#[must_use]
pub fn year_text(release_date: Option<&str>) -> String {
    release_date
        .and_then(|date| date.split('-').next())
        .filter(|year| !year.is_empty())
        .map_or_else(|| String::from(NOT_AVAILABLE), String::from)
}

/// Formats a runtime in minutes (e.g. `"130 min"`).
#[must_use]
pub fn runtime_text(runtime: Option<u32>) -> String {
    runtime.map_or_else(|| String::from(NOT_AVAILABLE), |minutes| format!("{minutes} min"))
}

/// Upper-cases an ISO 639-1 language code for display.
#[must_use]
pub fn language_text(original_language: &str) -> String {
    if original_language.is_empty() {
        String::from(NOT_AVAILABLE)
    } else {
        original_language.to_uppercase()
    }
}
