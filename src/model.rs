//! Directory records and filter criteria.
//!
//! [`Brewery`] mirrors one entry of the Open Brewery DB directory as the
//! service returns it. [`FilterCriteria`] is the set of facet values a user
//! has selected; two criteria that compare equal scope the same result list.

use crate::error::{Result, TaproomError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Facility type of a brewery.
///
/// The directory uses a small, known vocabulary but occasionally returns
/// values outside it; those are kept verbatim in [`BreweryType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BreweryType {
    Micro,
    Nano,
    Regional,
    Brewpub,
    Large,
    Planning,
    Bar,
    Contract,
    Proprietor,
    Closed,
    Other(String),
}

impl BreweryType {
    /// Every type the directory documents, in menu order.
    pub const KNOWN: [BreweryType; 10] = [
        BreweryType::Micro,
        BreweryType::Nano,
        BreweryType::Regional,
        BreweryType::Brewpub,
        BreweryType::Large,
        BreweryType::Planning,
        BreweryType::Bar,
        BreweryType::Contract,
        BreweryType::Proprietor,
        BreweryType::Closed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BreweryType::Micro => "micro",
            BreweryType::Nano => "nano",
            BreweryType::Regional => "regional",
            BreweryType::Brewpub => "brewpub",
            BreweryType::Large => "large",
            BreweryType::Planning => "planning",
            BreweryType::Bar => "bar",
            BreweryType::Contract => "contract",
            BreweryType::Proprietor => "proprietor",
            BreweryType::Closed => "closed",
            BreweryType::Other(other) => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BreweryType::Other(_))
    }
}

impl From<String> for BreweryType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "micro" => BreweryType::Micro,
            "nano" => BreweryType::Nano,
            "regional" => BreweryType::Regional,
            "brewpub" => BreweryType::Brewpub,
            "large" => BreweryType::Large,
            "planning" => BreweryType::Planning,
            "bar" => BreweryType::Bar,
            "contract" => BreweryType::Contract,
            "proprietor" => BreweryType::Proprietor,
            "closed" => BreweryType::Closed,
            _ => BreweryType::Other(value),
        }
    }
}

impl From<&str> for BreweryType {
    fn from(value: &str) -> Self {
        BreweryType::from(value.to_string())
    }
}

impl From<BreweryType> for String {
    fn from(value: BreweryType) -> Self {
        match value {
            BreweryType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BreweryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brewery {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brewery_type: Option<BreweryType>,
    #[serde(default)]
    pub address_1: Option<String>,
    #[serde(default)]
    pub address_2: Option<String>,
    #[serde(default)]
    pub address_3: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_province: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}

impl Brewery {
    /// Minimal record, mostly useful for tests and benchmarks.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brewery_type: None,
            address_1: None,
            address_2: None,
            address_3: None,
            street: None,
            city: None,
            state_province: None,
            state: None,
            postal_code: None,
            country: None,
            longitude: None,
            latitude: None,
            phone: None,
            website_url: None,
        }
    }

    pub fn state(&self) -> Option<&str> {
        non_empty(self.state.as_deref())
    }

    pub fn city(&self) -> Option<&str> {
        non_empty(self.city.as_deref())
    }

    pub fn country(&self) -> Option<&str> {
        non_empty(self.country.as_deref())
    }

    /// First street line, preferring `address_1` over the legacy `street`.
    pub fn street_address(&self) -> Option<&str> {
        non_empty(self.address_1.as_deref()).or_else(|| non_empty(self.street.as_deref()))
    }

    pub fn has_website(&self) -> bool {
        non_empty(self.website_url.as_deref()).is_some()
    }

    pub fn has_phone(&self) -> bool {
        non_empty(self.phone.as_deref()).is_some()
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Metadata endpoint payload. Only `total` is relied upon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(deserialize_with = "de_count")]
    pub total: u64,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub per_page: Option<u64>,
}

/// Field the directory can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    BreweryType,
    State,
    City,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::BreweryType => "brewery_type",
            SortField::State => "state",
            SortField::City => "city",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Sort parameter in the directory's `field:order` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortKey {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.as_str(), self.order.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TaproomError;

    /// Parses `name`, `name:asc`, `brewery_type:desc`, ... (`type` is
    /// accepted for `brewery_type`; a missing order means ascending).
    fn from_str(s: &str) -> Result<Self> {
        let (field, order) = match s.trim().split_once(':') {
            Some((field, order)) => (field, Some(order)),
            None => (s.trim(), None),
        };

        let field = match field.to_ascii_lowercase().as_str() {
            "name" => SortField::Name,
            "brewery_type" | "type" => SortField::BreweryType,
            "state" => SortField::State,
            "city" => SortField::City,
            other => {
                return Err(TaproomError::InvalidCriteria(format!(
                    "unknown sort field '{}'",
                    other
                )));
            }
        };

        let order = match order.map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            Some(other) => {
                return Err(TaproomError::InvalidCriteria(format!(
                    "unknown sort order '{}'",
                    other
                )));
            }
        };

        Ok(SortKey { field, order })
    }
}

/// User-selected facet values.
///
/// Empty strings and `None` mean the same thing: the facet is not applied.
/// Use [`FilterCriteria::normalized`] before comparing criteria that came
/// from user input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub brewery_type: Option<BreweryType>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

impl FilterCriteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_type(mut self, brewery_type: impl Into<BreweryType>) -> Self {
        self.brewery_type = Some(brewery_type.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Trims every text field and turns empty values into `None`.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            search: self.search.trim().to_string(),
            brewery_type: self
                .brewery_type
                .map(|t| BreweryType::from(t.as_str().trim()))
                .filter(|t| !t.as_str().is_empty()),
            state: clean(self.state),
            city: clean(self.city),
            country: clean(self.country),
            sort: self.sort,
        }
    }

    pub fn search_text(&self) -> Option<&str> {
        non_empty(Some(self.search.as_str()))
    }

    pub fn type_filter(&self) -> Option<&str> {
        non_empty(self.brewery_type.as_ref().map(BreweryType::as_str))
    }

    pub fn state_filter(&self) -> Option<&str> {
        non_empty(self.state.as_deref())
    }

    pub fn city_filter(&self) -> Option<&str> {
        non_empty(self.city.as_deref())
    }

    pub fn country_filter(&self) -> Option<&str> {
        non_empty(self.country.as_deref())
    }

    /// True when no facet, search text or sort is applied.
    pub fn is_unfiltered(&self) -> bool {
        self.search_text().is_none()
            && self.type_filter().is_none()
            && self.state_filter().is_none()
            && self.city_filter().is_none()
            && self.country_filter().is_none()
            && self.sort.is_none()
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Float(f64),
    Text(String),
}

fn de_opt_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Float(value)) => Some(value),
        Some(NumberOrString::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

fn de_opt_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Float(value)) if value >= 0.0 && value.fract() == 0.0 => {
            Ok(Some(value as u64))
        }
        Some(NumberOrString::Float(value)) => {
            Err(D::Error::custom(format!("invalid count {}", value)))
        }
        Some(NumberOrString::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid count '{}'", text))),
        None => Ok(None),
    }
}

fn de_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    de_opt_count(deserializer)?.ok_or_else(|| D::Error::custom("missing count"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_brewery_type_is_kept_verbatim() {
        let parsed: BreweryType = serde_json::from_str("\"taproom\"").unwrap();
        assert_eq!(parsed, BreweryType::Other("taproom".into()));
        assert!(!parsed.is_known());
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"taproom\"");

        let micro: BreweryType = serde_json::from_str("\"micro\"").unwrap();
        assert_eq!(micro, BreweryType::Micro);
    }

    #[test]
    fn brewery_accepts_string_coordinates_and_nulls() {
        let json = r#"{
            "id": "b-1",
            "name": "Ale House",
            "brewery_type": null,
            "city": "Denver",
            "state": null,
            "longitude": "-104.99",
            "latitude": 39.74,
            "phone": ""
        }"#;
        let brewery: Brewery = serde_json::from_str(json).unwrap();
        assert_eq!(brewery.brewery_type, None);
        assert_eq!(brewery.coordinates(), Some((39.74, -104.99)));
        assert_eq!(brewery.state(), None);
        assert!(!brewery.has_phone());
        assert!(!brewery.has_website());
    }

    #[test]
    fn metadata_total_accepts_numeric_strings() {
        let meta: Metadata =
            serde_json::from_str(r#"{"total": "8034", "page": "1", "per_page": "50"}"#).unwrap();
        assert_eq!(meta.total, 8034);
        assert_eq!(meta.per_page, Some(50));

        let meta: Metadata = serde_json::from_str(r#"{"total": 12}"#).unwrap();
        assert_eq!(meta.total, 12);

        assert!(serde_json::from_str::<Metadata>(r#"{"page": 1}"#).is_err());
    }

    #[test]
    fn sort_key_parses_wire_form() {
        let key: SortKey = "name:desc".parse().unwrap();
        assert_eq!(key, SortKey::new(SortField::Name, SortOrder::Desc));
        assert_eq!(key.to_string(), "name:desc");

        let key: SortKey = "type".parse().unwrap();
        assert_eq!(key.to_string(), "brewery_type:asc");

        assert!("rating:asc".parse::<SortKey>().is_err());
        assert!("name:sideways".parse::<SortKey>().is_err());
    }

    #[test]
    fn normalized_criteria_compare_equal() {
        let a = FilterCriteria::default().with_state("  ").with_search(" ale ");
        let b = FilterCriteria::default().with_search("ale");
        assert_ne!(a, b);
        assert_eq!(a.normalized(), b.normalized());
    }

    #[test]
    fn default_criteria_are_unfiltered() {
        assert!(FilterCriteria::default().is_unfiltered());
        assert!(!FilterCriteria::default().with_city("Austin").is_unfiltered());
        assert!(FilterCriteria::default().with_city("").is_unfiltered());
    }
}
