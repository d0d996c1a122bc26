//! Summary statistics and chart-ready distributions.
//!
//! A [`Report`] borrows the accumulated records and never mutates them.
//! Everything is recomputed on each call.

use crate::format::type_label;
use crate::model::Brewery;
use serde::Serialize;

/// Key used in distributions for records without a facility type.
pub const NO_TYPE: &str = "unknown";

/// Counts keyed by value, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    entries: Vec<(String, usize)>,
}

impl Distribution {
    fn add(&mut self, key: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key.to_string(), 1)),
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Highest count; ties go to the entry inserted first.
    pub fn max(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (key, count) in self.iter() {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((key, count));
            }
        }
        best
    }

    /// Entries sorted by descending count. The sort is stable, so equal
    /// counts keep insertion order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// One bar or slice of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub key: String,
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// All dashboard statistics in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_loaded: usize,
    pub server_total: u64,
    pub distinct_states: usize,
    pub distinct_cities: usize,
    pub most_common_type: Option<(String, usize)>,
    pub website_percentage: f64,
    pub phone_percentage: f64,
    pub average_name_length: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    records: &'a [Brewery],
    server_total: u64,
}

impl<'a> Report<'a> {
    /// `server_total` is the count reported by the metadata endpoint, or 0
    /// when unknown.
    pub fn new(records: &'a [Brewery], server_total: u64) -> Self {
        Self {
            records,
            server_total,
        }
    }

    pub fn total_loaded(&self) -> usize {
        self.records.len()
    }

    pub fn server_total(&self) -> u64 {
        self.server_total
    }

    pub fn distinct_state_count(&self) -> usize {
        self.state_distribution().len()
    }

    pub fn distinct_city_count(&self) -> usize {
        let mut cities = Distribution::default();
        for city in self.records.iter().filter_map(Brewery::city) {
            cities.add(city);
        }
        cities.len()
    }

    /// Facility type counts. Records without a type are counted under
    /// [`NO_TYPE`].
    pub fn type_distribution(&self) -> Distribution {
        let mut types = Distribution::default();
        for brewery in self.records {
            let key = brewery
                .brewery_type
                .as_ref()
                .map(|t| t.as_str())
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(NO_TYPE);
            types.add(key);
        }
        types
    }

    pub fn state_distribution(&self) -> Distribution {
        let mut states = Distribution::default();
        for state in self.records.iter().filter_map(Brewery::state) {
            states.add(state);
        }
        states
    }

    pub fn most_common_type(&self) -> Option<(String, usize)> {
        self.type_distribution()
            .max()
            .map(|(key, count)| (key.to_string(), count))
    }

    /// Share of records matching `selector`, in percent. 0 for an empty list.
    pub fn percentage_with_field<F>(&self, selector: F) -> f64
    where
        F: Fn(&Brewery) -> bool,
    {
        let total = self.total_loaded();
        if total == 0 {
            return 0.0;
        }
        let matching = self.records.iter().filter(|b| selector(b)).count();
        100.0 * matching as f64 / total as f64
    }

    /// Mean name length in characters. 0 for an empty list.
    pub fn average_name_length(&self) -> f64 {
        let total = self.total_loaded();
        if total == 0 {
            return 0.0;
        }
        let chars: usize = self.records.iter().map(|b| b.name.chars().count()).sum();
        chars as f64 / total as f64
    }

    pub fn top_n_states_by_count(&self, n: usize) -> Vec<(String, usize)> {
        self.state_distribution()
            .ranked()
            .into_iter()
            .take(n)
            .map(|(state, count)| (state.to_string(), count))
            .collect()
    }

    /// Type chart rows sorted by count, at most `limit` of them.
    pub fn type_chart(&self, limit: usize) -> Vec<ChartRow> {
        let total = self.total_loaded();
        self.type_distribution()
            .ranked()
            .into_iter()
            .take(limit)
            .map(|(key, count)| ChartRow {
                key: key.to_string(),
                label: type_label(key),
                count,
                percentage: percentage(count, total),
            })
            .collect()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_loaded: self.total_loaded(),
            server_total: self.server_total,
            distinct_states: self.distinct_state_count(),
            distinct_cities: self.distinct_city_count(),
            most_common_type: self.most_common_type(),
            website_percentage: self.percentage_with_field(Brewery::has_website),
            phone_percentage: self.percentage_with_field(Brewery::has_phone),
            average_name_length: self.average_name_length(),
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}
