// Request descriptor construction: endpoint selection, facet inclusion and
// URL encoding.

use taproom::{Endpoint, FilterCriteria, RequestDescriptor, SortField, SortKey, SortOrder};

#[test]
fn search_text_selects_search_endpoint_and_drops_city() {
    let criteria = FilterCriteria::default()
        .with_search("ale")
        .with_state("CA")
        .with_city("Denver");

    let descriptor = RequestDescriptor::page(&criteria, 1, 50);

    assert_eq!(descriptor.endpoint, Endpoint::Search);
    assert_eq!(descriptor.param("query"), Some("ale"));
    assert_eq!(descriptor.param("by_state"), Some("CA"));
    assert!(!descriptor.has_param("by_city"));
}

#[test]
fn browse_includes_only_non_empty_facets() {
    let criteria = FilterCriteria::default()
        .with_type("micro")
        .with_state("")
        .with_city("Austin");

    let descriptor = RequestDescriptor::page(&criteria, 1, 50);

    assert_eq!(descriptor.endpoint, Endpoint::Browse);
    assert_eq!(descriptor.param("by_type"), Some("micro"));
    assert_eq!(descriptor.param("by_city"), Some("Austin"));
    assert!(!descriptor.has_param("by_state"));
    assert!(!descriptor.has_param("query"));
}

#[test]
fn search_drops_country_and_sort_but_keeps_type() {
    let criteria = FilterCriteria::default()
        .with_search("hop")
        .with_type("brewpub")
        .with_country("Ireland")
        .with_sort(SortKey::new(SortField::Name, SortOrder::Desc));

    let descriptor = RequestDescriptor::page(&criteria, 3, 25);

    assert_eq!(descriptor.endpoint, Endpoint::Search);
    assert_eq!(descriptor.param("by_type"), Some("brewpub"));
    assert_eq!(descriptor.param("page"), Some("3"));
    assert_eq!(descriptor.param("per_page"), Some("25"));
    assert!(!descriptor.has_param("by_country"));
    assert!(!descriptor.has_param("sort"));
}

#[test]
fn whitespace_only_search_is_browse() {
    let criteria = FilterCriteria::default().with_search("   ").with_country("Scotland");
    let descriptor = RequestDescriptor::page(&criteria, 1, 50);

    assert_eq!(descriptor.endpoint, Endpoint::Browse);
    assert_eq!(descriptor.param("by_country"), Some("Scotland"));
}

#[test]
fn browse_carries_sort_and_page() {
    let criteria = FilterCriteria::default().with_sort(SortKey::new(SortField::City, SortOrder::Asc));
    let descriptor = RequestDescriptor::page(&criteria, 4, 50);

    assert_eq!(descriptor.page, Some(4));
    assert_eq!(descriptor.param("sort"), Some("city:asc"));
    assert_eq!(
        descriptor.params.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
        vec!["per_page", "page", "sort"]
    );
}

#[test]
fn search_values_are_percent_encoded() {
    let criteria = FilterCriteria::default()
        .with_search("dog & duck")
        .with_state("New Mexico");

    let url = RequestDescriptor::page(&criteria, 1, 50).to_url("https://api.openbrewerydb.org/v1");

    assert_eq!(
        url,
        "https://api.openbrewerydb.org/v1/breweries/search?query=dog%20%26%20duck\
         &per_page=50&page=1&by_state=New%20Mexico"
    );
}

#[test]
fn metadata_keeps_only_type_and_state() {
    let criteria = FilterCriteria::default()
        .with_search("ale")
        .with_type("nano")
        .with_state("Oregon")
        .with_city("Bend")
        .with_country("United States");

    let descriptor = RequestDescriptor::metadata(&criteria);

    assert_eq!(descriptor.endpoint, Endpoint::Meta);
    assert_eq!(
        descriptor.params,
        vec![("by_type", "nano".to_string()), ("by_state", "Oregon".to_string())]
    );
}

#[test]
fn building_is_pure() {
    let criteria = FilterCriteria::default().with_type("large");
    assert_eq!(
        RequestDescriptor::page(&criteria, 2, 50),
        RequestDescriptor::page(&criteria, 2, 50)
    );
}

#[test]
fn random_and_detail_have_no_params() {
    assert_eq!(RequestDescriptor::random().to_url("http://h/v1"), "http://h/v1/breweries/random");
    assert_eq!(
        RequestDescriptor::detail("5128df48-79fc").to_url("http://h/v1"),
        "http://h/v1/breweries/5128df48-79fc"
    );
}
