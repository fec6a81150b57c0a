#![allow(missing_docs)]

use clawrest_core::{Endpoint, Method, ParamKind, ParamValue, Request, RequestError, classify};
use rstest::rstest;

mod common;
pub use self::common::*;

const PULLS: &str = "/repos/{owner}/{repo}/pulls";

#[rstest]
fn test_request_from_object(orange: ListPulls) -> anyhow::Result<()> {
    let request = Request::from_object(PULLS, &orange)?;

    assert_eq!(request.path(), PULLS);
    assert_eq!(request.method(), None);
    assert_eq!(
        normalize_uri(&request.uri()?),
        "/repos/tomitribe/orange/pulls?base=orange&direction=asc&head=cabeza&sort=long-running&state=closed"
    );

    assert_eq!(
        request.path_params().keys().collect::<Vec<_>>(),
        ["owner", "repo"]
    );
    assert_eq!(
        request.query_params().get("sort"),
        Some(&ParamValue::from("long-running"))
    );
    insta::assert_debug_snapshot!(request.header_params(), @r#"
    {
        "link": ParamValue(
            String("http://foo.example.com/"),
        ),
    }
    "#);
    insta::assert_snapshot!(request.body().unwrap_or_default(), @r#"
    {
      "draft": true
    }
    "#);

    Ok(())
}

#[rstest]
fn test_null_values_are_skipped(mut orange: ListPulls) -> anyhow::Result<()> {
    orange.state = None;
    orange.head = None;
    orange.link = None;

    let request = Request::from_object(PULLS, &orange)?;

    assert!(!request.query_params().contains_key("state"));
    assert!(!request.query_params().contains_key("head"));
    assert!(request.header_params().is_empty());

    Ok(())
}

#[rstest]
fn test_null_body_field_still_produces_body(mut orange: ListPulls) -> anyhow::Result<()> {
    orange.draft = None;

    let request = Request::from_object(PULLS, &orange)?;

    insta::assert_snapshot!(request.body().unwrap_or_default(), @r#"
    {
      "draft": null
    }
    "#);

    Ok(())
}

#[rstest]
fn test_no_body_field_means_no_body() -> anyhow::Result<()> {
    init_tracing();
    let search = SearchPulls {
        owner: "tomitribe".to_string(),
        state: Some(State::Open),
    };

    let request = Request::from_object("/repos/{owner}/pulls", &search)?;

    assert!(request.body().is_none());
    assert!(request.entity().is_none());
    insta::assert_snapshot!(request.uri()?, @"/repos/tomitribe/pulls?state=open");

    Ok(())
}

#[rstest]
fn test_untagged_field_is_rejected() {
    init_tracing();
    let untagged = Untagged {
        owner: "tomitribe".to_string(),
        color: "orange".to_string(),
    };

    let result = Request::from_object("/repos/{owner}", &untagged);

    let Err(error) = result else {
        panic!("an untagged field should be rejected");
    };
    assert!(matches!(error, RequestError::UnrecognizedField { .. }));
    insta::assert_snapshot!(error, @"Field 'Untagged::color' must be tagged with one of path, query, header or body");
}

#[rstest]
fn test_classify_lists_every_field(orange: ListPulls) -> anyhow::Result<()> {
    let params = classify(&orange)?;

    let kinds = params
        .iter()
        .map(|param| (param.name.as_str(), param.kind))
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        [
            ("owner", ParamKind::Path),
            ("repo", ParamKind::Path),
            ("state", ParamKind::Query),
            ("head", ParamKind::Query),
            ("base", ParamKind::Query),
            ("sort", ParamKind::Query),
            ("direction", ParamKind::Query),
            ("link", ParamKind::Header),
            ("draft", ParamKind::Body),
        ]
    );

    Ok(())
}

#[rstest]
fn test_http_request_from_object(orange: ListPulls) -> anyhow::Result<()> {
    let endpoint = Endpoint::builder()
        .with_base_url("https://api.github.com")?
        .build();
    let request = Request::from_object(PULLS, &orange)?.with_method(Method::Post);

    let http_request = request.to_http_request(&endpoint)?;

    assert_eq!(http_request.method(), http::Method::POST);
    assert_eq!(
        http_request.headers().get("link").map(|it| it.as_bytes()),
        Some("http://foo.example.com/".as_bytes())
    );
    assert_eq!(
        http_request.headers().get(http::header::CONTENT_TYPE).map(|it| it.as_bytes()),
        Some("application/json".as_bytes())
    );
    assert_eq!(
        normalize_uri(&http_request.uri().to_string()),
        "https://api.github.com:443/repos/tomitribe/orange/pulls?base=orange&direction=asc&head=cabeza&sort=long-running&state=closed"
    );

    Ok(())
}

#[derive(Debug, serde::Serialize, clawrest_core::Annotated)]
struct TwoQueries {
    #[param(query = "q")]
    first: String,
    #[param(query = "q")]
    second: String,
}

#[rstest]
fn test_duplicated_tag_name_is_rejected() {
    init_tracing();
    let search = TwoQueries {
        first: "1".to_string(),
        second: "2".to_string(),
    };

    let result = Request::from_object("/search", &search);

    let Err(error) = result else {
        panic!("a duplicated query name should be rejected");
    };
    assert!(matches!(
        error,
        RequestError::DuplicateParameter {
            kind: ParamKind::Query,
            ..
        }
    ));
}

#[rstest]
fn test_dashed_path_variable_is_bound() -> anyhow::Result<()> {
    init_tracing();
    let request = Request::target("/repos/{repo-name}", ["orange"])?;

    assert_eq!(request.uri()?, "/repos/orange");

    Ok(())
}
