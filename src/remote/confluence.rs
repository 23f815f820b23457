//! Confluence Cloud REST client.
//!
//! All calls go through [`HttpClient`], which returns any HTTP status as a
//! value and reserves the error channel for transport failures. The lookup
//! methods require exactly one match; ambiguous results never pick a winner.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::remote::{ApiResponse, Remote, RemoteError, ShortcutItem};

/// Build the request headers for Basic auth against the Cloud API.
pub fn auth_headers(email: &str, token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let credentials = BASE64.encode(format!("{email}:{token}"));
    let value = HeaderValue::from_str(&format!("Basic {credentials}"))
        .expect("base64 output is always a valid header value");
    headers.insert(AUTHORIZATION, value);

    headers
}

/// Blocking HTTP wrapper that never raises on HTTP status.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(email: &str, token: &str) -> Result<Self> {
        let client = Client::builder()
            .default_headers(auth_headers(email, token))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// GET `url` with query parameters.
    pub fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .with_context(|| format!("GET {url} failed"))?;
        Ok(Self::capture(response))
    }

    /// POST a JSON body to `url`.
    pub fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<ApiResponse> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .with_context(|| format!("POST {url} failed"))?;
        Ok(Self::capture(response))
    }

    fn capture(response: reqwest::blocking::Response) -> ApiResponse {
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        ApiResponse { status, body }
    }
}

#[derive(Debug, Deserialize)]
struct SpaceLookup {
    results: Vec<SpaceRow>,
}

#[derive(Debug, Deserialize)]
struct SpaceRow {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PageLookup {
    results: Vec<PageRow>,
}

#[derive(Debug, Deserialize)]
struct PageRow {
    #[serde(rename = "_links")]
    links: PageLinks,
}

#[derive(Debug, Deserialize)]
struct PageLinks {
    webui: String,
}

/// Confluence Cloud implementation of [`Remote`].
pub struct ConfluenceRemote {
    http: HttpClient,
    /// `https://{domain}/wiki`
    base_url: String,
}

impl ConfluenceRemote {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(&config.email, &config.api_token)?,
            base_url: config.base_url(),
        })
    }

    fn transport(context: &'static str, err: anyhow::Error) -> RemoteError {
        RemoteError::Transport {
            context,
            detail: format!("{err:#}"),
        }
    }
}

impl Remote for ConfluenceRemote {
    fn resolve_space_id(&self, key: &str) -> Result<String, RemoteError> {
        let url = format!("{}/api/v2/spaces", self.base_url);
        let response = self
            .http
            .get(&url, &[("keys", key)])
            .map_err(|err| Self::transport("space lookup", err))?;

        let fail = |detail: String| RemoteError::SpaceLookup {
            key: key.to_string(),
            detail,
        };

        if !response.is_ok() {
            return Err(fail(format!("status {}: {}", response.status, response.body)));
        }

        let lookup: SpaceLookup = serde_json::from_str(&response.body)
            .map_err(|err| fail(format!("unparseable response: {err}")))?;

        match lookup.results.as_slice() {
            [space] => Ok(space.id.clone()),
            results => Err(fail(format!(
                "expected exactly one match, found {}",
                results.len()
            ))),
        }
    }

    fn resolve_page_url(&self, space_id: &str, title: &str) -> Result<String, RemoteError> {
        let url = format!("{}/api/v2/pages", self.base_url);
        let response = self
            .http
            .get(&url, &[("space-id", space_id), ("title", title)])
            .map_err(|err| Self::transport("page lookup", err))?;

        let fail = |detail: String| RemoteError::PageLookup {
            space_id: space_id.to_string(),
            title: title.to_string(),
            detail,
        };

        if !response.is_ok() {
            return Err(fail(format!("status {}: {}", response.status, response.body)));
        }

        let lookup: PageLookup = serde_json::from_str(&response.body)
            .map_err(|err| fail(format!("unparseable response: {err}")))?;

        match lookup.results.as_slice() {
            [page] => Ok(format!("{}{}", self.base_url, page.links.webui)),
            results => Err(fail(format!(
                "expected exactly one match, found {}",
                results.len()
            ))),
        }
    }

    fn push_shortcuts(&self, space_key: &str, items: &[ShortcutItem]) -> Result<(), RemoteError> {
        // Existence check for the container space; the id itself is unused.
        self.resolve_space_id(space_key)
            .map_err(|source| RemoteError::ContainerSpace {
                key: space_key.to_string(),
                source: Box::new(source),
            })?;

        let url = format!("{}/rest/ia/1.0/space", self.base_url);
        let payload = json!({
            "spaceKey": space_key,
            "quickLinks": items,
        });

        let response = self
            .http
            .post_json(&url, &payload)
            .map_err(|err| Self::transport("shortcut batch write", err))?;

        if !response.is_ok() {
            return Err(RemoteError::Api {
                context: "shortcut batch write",
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }

    fn create_template(&self, name: &str, content: &str) -> Result<(), RemoteError> {
        let url = format!("{}/rest/api/template", self.base_url);
        let payload = json!({
            "name": name,
            "templateType": "page",
            "body": {
                "storage": {
                    "value": content,
                    "representation": "view",
                },
            },
        });

        let response = self
            .http
            .post_json(&url, &payload)
            .map_err(|err| Self::transport("template creation", err))?;

        if !response.is_ok() {
            return Err(RemoteError::Api {
                context: "template creation",
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }
}
