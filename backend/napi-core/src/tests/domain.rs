// Unit tests for the object-type registry and query descriptors

use crate::domain::query::DEFAULT_PAGE_SIZE;
use crate::domain::{ObjectType, Page, Query};
use crate::error::LookupTarget;
use crate::service;

use url::Url;

/// **VALUE**: Verifies names resolve the way callers write them.
///
/// **WHY THIS MATTERS**: CMS plugins pass lower-camel names (`"event"`,
/// `"institutionType"`). Only the first letter is capitalised before lookup.
///
/// **BUG THIS CATCHES**: Would catch a case-insensitive lookup accepting names the
/// registry never promised, or a lookup that forgets to capitalise.
#[test]
fn given_type_names_when_resolved_then_only_first_letter_is_capitalised() {
    assert_eq!(ObjectType::from_name("event"), Some(ObjectType::Event));
    assert_eq!(ObjectType::from_name("Event"), ObjectType::from_name("event"));
    assert_eq!(
        ObjectType::from_name("institutionType"),
        Some(ObjectType::InstitutionType)
    );
    assert_eq!(ObjectType::from_name("EVENT"), None);
    assert_eq!(ObjectType::from_name("institutiontype"), None);
    assert_eq!(ObjectType::from_name("doesnotexist"), None);
    assert_eq!(ObjectType::from_name(""), None);
}

#[test]
fn given_every_object_type_when_resolved_by_name_then_round_trips() {
    for object_type in ObjectType::ALL {
        assert_eq!(ObjectType::from_name(object_type.name()), Some(object_type));
        assert!(!object_type.endpoint().is_empty());
    }
}

#[test]
fn given_known_name_when_query_requested_then_returns_fresh_query() {
    let query = service::query("person").unwrap();

    assert_eq!(query.object_type(), ObjectType::Person);
    assert_eq!(query.page_number(), 1);
    assert_eq!(query.page_size(), DEFAULT_PAGE_SIZE);
    assert_eq!(query.include(), None);
}

#[test]
fn given_unknown_name_when_query_requested_then_returns_lookup_error() {
    let err = service::query("doesnotexist").unwrap_err();

    assert!(err.is_lookup());
    assert_eq!(err.lookup_target(), Some(LookupTarget::Query));
    assert_eq!(err.code(), 1_495_179_007);
    assert!(
        err.to_string()
            .starts_with("Configuration error - unknown object doesnotexist")
    );
}

/// **VALUE**: Verifies the query parameters written into the request URL.
///
/// **WHY THIS MATTERS**: Page number, page size and include are the only knobs the
/// paginator turns. If they don't reach the URL every page returns page 1.
#[test]
fn given_query_with_include_and_filter_when_applied_then_url_carries_parameters() {
    // GIVEN: A query for page 2 with includes and a filter
    let mut query = Query::new(ObjectType::Event);
    query
        .set_page_number(2)
        .set_page_size(10)
        .set_include(["region", "address"])
        .set_filter("category", "7");
    let mut url = Url::parse("https://napi.example.org/api/v1/events").unwrap();

    // WHEN: Applying it
    query.apply_to(&mut url);

    // THEN: Every parameter is present (decoded)
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("page[number]".to_string(), "2".to_string()),
            ("page[size]".to_string(), "10".to_string()),
            ("include".to_string(), "region,address".to_string()),
            ("filter[category]".to_string(), "7".to_string()),
        ]
    );
}

#[test]
fn given_query_without_include_when_applied_then_include_parameter_is_absent() {
    let query = Query::new(ObjectType::Category);
    let mut url = Url::parse("https://napi.example.org/api/v1/categories").unwrap();

    query.apply_to(&mut url);

    assert!(url.query_pairs().all(|(k, _)| k != "include"));
}

#[test]
fn given_page_when_iterated_then_preserves_item_order() {
    let page = Page::new(vec!["a", "b", "c"], 4);

    let by_ref: Vec<&&str> = (&page).into_iter().collect();
    assert_eq!(by_ref, vec![&"a", &"b", &"c"]);
    assert_eq!(page.page_count(), 4);
    assert_eq!(page.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}
