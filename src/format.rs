//! Display helpers shared by the terminal views.

use crate::model::Brewery;

/// `"micro"` -> `"Micro"`.
pub fn type_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ten-digit numbers render as `(303) 555-0100`; anything else is returned
/// unchanged. Missing numbers render as `N/A`.
pub fn format_phone(phone: Option<&str>) -> String {
    let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) else {
        return "N/A".to_string();
    };

    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        phone.to_string()
    }
}

/// `City, State Postal, Country` with missing parts skipped.
pub fn location_line(brewery: &Brewery) -> String {
    let region = [brewery.state(), brewery.postal_code.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    [brewery.city(), Some(region.as_str()), brewery.country()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn map_url(brewery: &Brewery) -> Option<String> {
    let (lat, lon) = brewery.coordinates()?;
    Some(format!("https://www.google.com/maps?q={},{}", lat, lon))
}

/// Truncates to `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
