//! GitHub Gist remote.
//!
//! - Read: `GET {api_base}/gists/{id}`; the response's `files` object is kept in
//!   response order and the first file holds the collection.
//! - Write: `PATCH {api_base}/gists/{id}` with `{"files": {name: {"content": ...}}}`.
//!
//! Both carry `Authorization: token <pat>`.

use super::{RemoteContainer, RemoteFile, RemoteStore, SyncTarget};
use crate::error::{LinkboardError, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Deserialize)]
struct GistResponse {
    #[serde(default)]
    files: Map<String, Value>,
}

#[derive(Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
}

pub struct GistRemote {
    client: Client,
    api_base: String,
}

impl GistRemote {
    pub fn new(api_base: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("linkboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.into(),
        })
    }

    fn gist_url(&self, gist_id: &str) -> String {
        format!("{}/gists/{}", self.api_base.trim_end_matches('/'), gist_id)
    }
}

impl RemoteStore for GistRemote {
    fn fetch(&self, target: &SyncTarget) -> Result<RemoteContainer> {
        let url = self.gist_url(&target.gist_id);
        debug!(%url, "fetching gist");
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", target.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LinkboardError::Remote(format!(
                "Gist fetch failed: {}",
                status
            )));
        }
        parse_gist(&response.text()?)
    }

    fn write_file(&self, target: &SyncTarget, file_name: &str, content: &str) -> Result<()> {
        let url = self.gist_url(&target.gist_id);
        debug!(%url, file = file_name, "patching gist");
        let response = self
            .client
            .patch(&url)
            .header(AUTHORIZATION, format!("token {}", target.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(&patch_body(file_name, content))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LinkboardError::Remote(format!(
                "Gist update failed: {}",
                status
            )));
        }
        Ok(())
    }
}

fn parse_gist(body: &str) -> Result<RemoteContainer> {
    let gist: GistResponse = serde_json::from_str(body)?;
    let files = gist
        .files
        .into_iter()
        .map(|(name, value)| {
            // A file entry we can't read counts as a file without content.
            let content = serde_json::from_value::<GistFile>(value)
                .ok()
                .and_then(|f| f.content);
            RemoteFile { name, content }
        })
        .collect();
    Ok(RemoteContainer { files })
}

fn patch_body(file_name: &str, content: &str) -> Value {
    let mut files = Map::new();
    files.insert(file_name.to_string(), json!({ "content": content }));
    json!({ "files": files })
}
