#![allow(dead_code)]

use clawrest_core::Annotated;
use rstest::fixture;
use serde::Serialize;
use tracing::info;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Open,
    Closed,
    All,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    Created,
    Updated,
    Popularity,
    LongRunning,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// List the pull requests of a repository.
#[derive(Debug, Clone, Serialize, Annotated)]
pub struct ListPulls {
    #[serde(skip)]
    #[param(path = "owner")]
    pub owner: String,

    #[serde(skip)]
    #[param(path = "repo")]
    pub repo: String,

    #[serde(skip)]
    #[param(query = "state")]
    pub state: Option<State>,

    #[serde(skip)]
    #[param(query = "head")]
    pub head: Option<String>,

    #[serde(skip)]
    #[param(query = "base")]
    pub base: Option<String>,

    #[serde(skip)]
    #[param(query = "sort")]
    pub sort: Option<Sort>,

    #[serde(skip)]
    #[param(query = "direction")]
    pub direction: Option<Direction>,

    #[serde(skip)]
    #[param(header = "link")]
    pub link: Option<String>,

    #[param(body = "draft")]
    pub draft: Option<bool>,
}

/// Same as [`ListPulls`], without body.
#[derive(Debug, Clone, Serialize, Annotated)]
pub struct SearchPulls {
    #[serde(skip)]
    #[param(path = "owner")]
    pub owner: String,

    #[serde(skip)]
    #[param(query = "state")]
    pub state: Option<State>,
}

/// A struct with one field missing its tag.
#[derive(Debug, Clone, Serialize, Annotated)]
pub struct Untagged {
    #[param(path = "owner")]
    pub owner: String,

    pub color: String,
}

#[fixture]
pub fn orange() -> ListPulls {
    init_tracing();
    ListPulls {
        owner: "tomitribe".to_string(),
        repo: "orange".to_string(),
        state: Some(State::Closed),
        head: Some("cabeza".to_string()),
        base: Some("orange".to_string()),
        sort: Some(Sort::LongRunning),
        direction: Some(Direction::Asc),
        link: Some("http://foo.example.com/".to_string()),
        draft: Some(true),
    }
}

/// Sorts the query pairs so URIs compare regardless of parameter order.
pub fn normalize_uri(uri: &str) -> String {
    match uri.split_once('?') {
        Some((path, query)) => {
            let mut pairs = query.split('&').collect::<Vec<_>>();
            pairs.sort_unstable();
            format!("{path}?{}", pairs.join("&"))
        }
        None => uri.to_string(),
    }
}
