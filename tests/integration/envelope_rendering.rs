//! Envelope skeleton, request echo and rendering determinism.

use crate::common::backends::ScriptedBackend;
use crate::common::fixtures::{self, DC_PAYLOAD};
use crate::common::xml::parse;
use crate::common::{request, server};
use chrono::{Duration, TimeZone, Utc};
use oai_pmh_server::backend::RecordList;
use oai_pmh_server::envelope::{
    EnvelopeBody, OAI_NAMESPACE, ResponseEnvelope, SCHEMA_LOCATION, VerbResponse, XSI_NAMESPACE,
};
use oai_pmh_server::{EnvelopeError, ErrorCode, RequestContext, build_error, build_success};
use std::collections::BTreeMap;

#[test]
fn test_root_skeleton() {
    let context = request(&[("verb", "Identify")]);
    let root = parse(&build_error(&context, &[ErrorCode::BadVerb]).unwrap());

    assert_eq!(root.name, "OAI-PMH");
    assert_eq!(root.attributes["xmlns"], OAI_NAMESPACE);
    assert_eq!(root.attributes["xmlns:xsi"], XSI_NAMESPACE);
    assert_eq!(root.attributes["xsi:schemaLocation"], SCHEMA_LOCATION);
    assert_eq!(root.child_names(), vec!["responseDate", "request", "error"]);
}

#[test]
fn test_request_echo_matches_parameters() {
    let pairs = [
        ("verb", "ListRecords"),
        ("metadataPrefix", "oai_dc"),
        ("from", "2001-01-01"),
        ("set", "a&b"),
    ];
    let context = request(&pairs);
    let root = parse(&build_error(&context, &[ErrorCode::NoRecordsMatch]).unwrap());

    let echoed = root.child("request").expect("request element");
    let expected: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(echoed.attributes, expected);
    assert_eq!(echoed.text, "http://localhost:1337/");
}

#[test]
fn test_request_echo_on_bad_verb_keeps_all_arguments() {
    let context = request(&[("verb", "Frobnicate"), ("junk", "1")]);
    let root = parse(&build_error(&context, &[ErrorCode::BadVerb]).unwrap());

    let echoed = root.child("request").unwrap();
    assert_eq!(echoed.attributes["verb"], "Frobnicate");
    assert_eq!(echoed.attributes["junk"], "1");
}

#[test]
fn test_canonical_url_adds_separator() {
    let context = RequestContext::new([("verb", "Identify")]).with_origin(
        "https",
        "repo.example.org",
        "oai",
    );
    let root = parse(&build_error(&context, &[ErrorCode::BadArgument]).unwrap());
    assert_eq!(root.child_text("request"), Some("https://repo.example.org/oai"));
}

#[test]
fn test_missing_origin_fails() {
    let context = RequestContext::new([("verb", "Identify")]);
    let result = build_error(&context, &[ErrorCode::BadVerb]);
    assert!(matches!(result, Err(EnvelopeError::MissingScheme)));

    let context = RequestContext::new([("verb", "Identify")]).with_origin("http", "", "/");
    let result = build_error(&context, &[ErrorCode::BadVerb]);
    assert!(matches!(result, Err(EnvelopeError::MissingHost)));
}

#[test]
fn test_empty_error_list_is_rejected() {
    let context = request(&[("verb", "Identify")]);
    assert!(matches!(
        build_error(&context, &[]),
        Err(EnvelopeError::EmptyErrorList)
    ));
}

#[test]
fn test_error_order_and_duplicates_preserved() {
    let codes = [
        ErrorCode::NoSetHierarchy,
        ErrorCode::BadArgument,
        ErrorCode::NoSetHierarchy,
    ];
    let context = request(&[("verb", "ListSets")]);
    let root = parse(&build_error(&context, &codes).unwrap());

    let rendered: Vec<_> = root
        .children_named("error")
        .map(|e| (e.attributes["code"].clone(), e.text.clone()))
        .collect();
    let expected: Vec<_> = codes
        .iter()
        .map(|c| (c.as_str().to_string(), c.message().to_string()))
        .collect();
    assert_eq!(rendered, expected);
}

#[test]
fn test_envelopes_differ_only_in_response_date() {
    let context = request(&[("verb", "GetRecord"), ("identifier", "x")]);
    let first_instant = Utc.with_ymd_and_hms(2020, 5, 1, 12, 0, 0).unwrap();
    let second_instant = first_instant + Duration::seconds(90);

    let first = ResponseEnvelope::error(&context, &[ErrorCode::BadArgument])
        .unwrap()
        .at(first_instant)
        .to_xml()
        .unwrap();
    let second = ResponseEnvelope::error(&context, &[ErrorCode::BadArgument])
        .unwrap()
        .at(second_instant)
        .to_xml()
        .unwrap();

    assert_ne!(first, second);
    assert!(first.contains("<responseDate>2020-05-01T12:00:00Z</responseDate>"));
    assert!(second.contains("<responseDate>2020-05-01T12:01:30Z</responseDate>"));
    assert_eq!(
        first.replace("2020-05-01T12:00:00Z", "DATE"),
        second.replace("2020-05-01T12:01:30Z", "DATE")
    );
}

#[test]
fn test_response_date_is_utc_seconds() {
    let context = request(&[("verb", "Identify")]);
    let root = parse(&build_error(&context, &[ErrorCode::BadVerb]).unwrap());
    let date = root.child_text("responseDate").unwrap();

    assert_eq!(date.len(), "YYYY-MM-DDThh:mm:ssZ".len());
    assert!(date.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok());
}

#[test]
fn test_success_body_follows_header() {
    let context = request(&[("verb", "ListMetadataFormats")]);
    let content = VerbResponse::ListMetadataFormats(vec![fixtures::oai_dc_format()]);
    let envelope = ResponseEnvelope::success(&context, &content).unwrap();

    assert!(!envelope.is_error());
    assert!(matches!(envelope.body(), EnvelopeBody::Success(_)));

    let root = parse(&envelope.to_xml().unwrap());
    assert_eq!(
        root.child_names(),
        vec!["responseDate", "request", "ListMetadataFormats"]
    );
    assert!(root.child("error").is_none());
}

#[test]
fn test_raw_metadata_inserted_verbatim() {
    let context = request(&[("verb", "ListRecords"), ("metadataPrefix", "oai_dc")]);
    let content = VerbResponse::ListRecords(RecordList::complete(fixtures::records()));
    let xml = build_success(&context, &content).unwrap();

    let expected = format!("<metadata>{DC_PAYLOAD}</metadata>");
    assert!(xml.contains(&expected), "{xml}");
    assert_eq!(xml.matches("<metadata>").count(), 1);
}

#[test]
fn test_text_is_escaped() {
    let mut sets = fixtures::sets();
    sets[0].name = "Physics <& Astronomy>".to_string();
    let context = request(&[("verb", "ListSets")]);
    let content = VerbResponse::ListSets(sets);
    let xml = build_success(&context, &content).unwrap();

    assert!(xml.contains("Physics &lt;&amp; Astronomy&gt;"));
    let root = parse(&xml);
    let name = root
        .child("ListSets")
        .and_then(|l| l.child("set"))
        .and_then(|s| s.child_text("setName"));
    assert_eq!(name, Some("Physics <& Astronomy>"));
}

#[tokio::test]
async fn test_server_responses_share_skeleton() {
    let server = server(ScriptedBackend::default());

    for pairs in [
        &[("verb", "Identify")][..],
        &[("verb", "ListSets")][..],
        &[("verb", "Nope")][..],
    ] {
        let response = server.handle_request(&request(pairs)).await;
        assert!(response.body.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        let root = parse(&response.body);
        assert_eq!(root.name, "OAI-PMH");
        assert_eq!(&root.child_names()[..2], &["responseDate", "request"]);
    }
}

#[tokio::test]
async fn test_success_round_trip_echoes_parameters() {
    let pairs = [
        ("verb", "ListRecords"),
        ("metadataPrefix", "oai_dc"),
        ("from", "2001-01-01"),
        ("until", "2002-12-31"),
        ("set", "physics"),
    ];
    let server = server(ScriptedBackend::default());
    let response = server.handle_request(&request(&pairs)).await;
    assert_eq!(response.status, 200);

    let root = parse(&response.body);
    assert_eq!(root.attributes["xmlns"], OAI_NAMESPACE);
    assert!(root.child("ListRecords").is_some());

    let expected: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(root.child("request").unwrap().attributes, expected);
}

#[tokio::test]
async fn test_unusable_argument_names_keep_document_well_formed() {
    let server = server(ScriptedBackend::default());

    for name in ["", "a b", "a\"b", "xmlns", "x:y"] {
        let response = server
            .handle_request(&request(&[("verb", "Identify"), (name, "x")]))
            .await;

        let root = crate::assert_protocol_errors!(response, [ErrorCode::BadArgument]);
        let echoed = root.child("request").unwrap();
        assert_eq!(echoed.attributes.get("verb").map(String::as_str), Some("Identify"));
        assert!(!echoed.attributes.contains_key(name), "{name:?} echoed");
        assert_eq!(root.attributes["xmlns"], OAI_NAMESPACE);
    }

    let response = server
        .handle_request(&request(&[("verb", "Frobnicate"), ("a b", "1"), ("junk", "2")]))
        .await;
    let root = crate::assert_protocol_errors!(response, [ErrorCode::BadVerb]);
    let echoed = root.child("request").unwrap();
    assert_eq!(echoed.attributes.len(), 2);
    assert_eq!(echoed.attributes["junk"], "2");
}

#[tokio::test]
async fn test_control_characters_are_not_echoed() {
    let server = server(ScriptedBackend::default());
    let response = server
        .handle_request(&request(&[
            ("verb", "GetRecord"),
            ("identifier", "oai:example.org:\u{1}404"),
            ("metadataPrefix", "oai_dc"),
        ]))
        .await;

    let root = crate::assert_protocol_errors!(response, [ErrorCode::IdDoesNotExist]);
    assert!(!response.body.contains('\u{1}'));
    assert_eq!(
        root.child("request").unwrap().attributes["identifier"],
        "oai:example.org:404"
    );
}
