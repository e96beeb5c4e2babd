//! SearchTool: web search through SerpAPI's DuckDuckGo engine.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{parse_args, Tool, ToolDescriptor};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SEARCH_URL: &str = "https://serpapi.com/search.json";

static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "serpapi_search",
    description: "Search the web for information using DuckDuckGo search engine via SerpAPI",
    args_schema: r#"{"type":"object","properties":{"query":{"type":"string", "description": "the search query to be used"}}}"#,
};

#[derive(Deserialize)]
struct SearchArgs {
    #[serde(default)]
    query: String,
}

pub struct SearchTool {
    api_key: Option<String>,
    client: Client,
    endpoint: String,
}

impl SearchTool {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            client: Client::new(),
            endpoint: SEARCH_URL.to_string(),
        }
    }

    /// Point at a different endpoint. Used by tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Serialize organic results as title/link pairs, wrapped in the hint
    /// that steers the model to fetch the pages next.
    fn format_results(query: &str, body: &serde_json::Value) -> String {
        let results = body
            .get("organic_results")
            .and_then(|r| r.as_array())
            .map(|r| r.as_slice())
            .unwrap_or_default();

        if results.is_empty() {
            return format!("No results for: {}", query);
        }

        let mut lines = Vec::new();
        for result in results {
            let title = result.get("title").and_then(|t| t.as_str()).unwrap_or("");
            let link = result.get("link").and_then(|l| l.as_str()).unwrap_or("");
            lines.push(format!("title: {}\nlink: {}", title, link));
        }
        format!(
            "Search results: {}, I need to use the tool RequestsTool to get the content of the search results",
            lines.join("\n")
        )
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &DESCRIPTOR
    }

    async fn invoke(&self, raw_args: &str) -> String {
        let args: SearchArgs = match parse_args(raw_args) {
            Ok(args) => args,
            Err(observation) => return observation,
        };

        if args.query.is_empty() {
            return "Error: query parameter is required".to_string();
        }
        let Some(api_key) = self.api_key.as_deref() else {
            return "Error: SERPAPI_API_KEY environment variable not set".to_string();
        };

        debug!("web search: {}", args.query);

        let response = self
            .client
            .get(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("engine", "duckduckgo"),
                ("q", args.query.as_str()),
                ("kl", "us-en"),
                ("api_key", api_key),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => return format!("SerpAPI search failed: {}", e),
        };
        let status = response.status();
        if !status.is_success() {
            return format!("SerpAPI search failed: status {}", status);
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => Self::format_results(&args.query, &body),
            Err(e) => format!("SerpAPI search failed: {}", e),
        }
    }
}
