//! RequestsTool: fetch a URL and extract readable text from HTML.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Node, Selector};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{parse_args, Tool, ToolDescriptor};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Subtrees dropped before text extraction.
const SKIP_TAGS: &[&str] = &[
    "header", "footer", "script", "style", "nav", "iframe", "noscript",
];

static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "RequestsTool",
    description: "A portal to the internet. Use this when you need to get specific content from a website. Input should be a url (i.e. https://www.kubernetes.io/releases). The output will be the text response of the GET request.",
    args_schema: r#"{"type":"object","properties":{"url":{"type":"string", "description": "the url to be accessed, e.g. https://www.kubernetes.io/releases"}}}"#,
};

#[derive(Deserialize)]
struct RequestsArgs {
    #[serde(default)]
    url: String,
}

pub struct RequestsTool {
    client: Client,
}

impl RequestsTool {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for RequestsTool {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_text(node: ego_tree::NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Element(element) => {
            if SKIP_TAGS.contains(&element.name()) {
                return;
            }
            for child in node.children() {
                collect_text(child, out);
            }
        }
        Node::Text(text) => out.push_str(text),
        _ => {}
    }
}

/// Extract the body text of an HTML document, minus the skip-list
/// subtrees. `None` when nothing useful could be extracted.
pub fn extract_body_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").ok()?;
    let body = document.select(&body_selector).next()?;

    let mut out = String::new();
    for child in body.children() {
        collect_text(child, &mut out);
    }

    let text = out.trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl Tool for RequestsTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &DESCRIPTOR
    }

    async fn invoke(&self, raw_args: &str) -> String {
        let args: RequestsArgs = match parse_args(raw_args) {
            Ok(args) => args,
            Err(observation) => return observation,
        };

        debug!("fetching url: {}", args.url);

        let response = match self
            .client
            .get(&args.url)
            .header("User-Agent", USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return format!("Failed to make request: {}", e),
        };

        let status = response.status();
        if !status.is_success() {
            return format!("Request failed with status code: {}", status);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return format!("Failed to read response body: {}", e),
        };

        match extract_body_text(&body) {
            Some(text) => format!("Request results: {}", text),
            // Raw content is still better than nothing for the model.
            None => format!("Failed to parse HTML (returning raw content): {}", body),
        }
    }
}
