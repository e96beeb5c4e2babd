//! CreateTool: generate a manifest with the model and submit it.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use kubepilot_provider::{Message, Provider};

use super::{parse_args, Tool, ToolDescriptor};
use crate::prompt::MANIFEST_PROMPT;
use crate::resource::ResourceClient;

static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "CreateTool",
    description: "Used to create a specified Kubernetes resource in a specified namespace, such as creating a pod etc.",
    args_schema: r#"{"type":"object","properties":{"prompt":{"type":"string", "description": "Put the user's prompt for creating a resource exactly here, without any changes"},"resource":{"type":"string", "description": "The specified Kubernetes resource type, such as pod, service etc."}}}"#,
};

#[derive(Deserialize)]
struct CreateArgs {
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    resource: String,
}

/// Envelope returned by the resource API.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: String,
    #[serde(default)]
    error: String,
}

pub struct CreateTool {
    provider: Arc<dyn Provider>,
    model: String,
    api: ResourceClient,
}

impl CreateTool {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, api: ResourceClient) -> Self {
        Self {
            provider,
            model: model.into(),
            api,
        }
    }
}

/// Remove markdown code-fence markers from a generated manifest.
pub fn strip_code_fences(content: &str) -> String {
    content
        .replace("```yaml", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[async_trait]
impl Tool for CreateTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &DESCRIPTOR
    }

    async fn invoke(&self, raw_args: &str) -> String {
        let args: CreateArgs = match parse_args(raw_args) {
            Ok(args) => args,
            Err(observation) => return observation,
        };

        // Second, independent model call to produce the manifest.
        let messages = [
            Message::system(MANIFEST_PROMPT),
            Message::user(args.prompt.as_str()),
        ];
        let reply = match self.provider.chat(&self.model, &messages).await {
            Ok(reply) => reply,
            Err(e) => return e.to_string(),
        };

        let manifest = strip_code_fences(&reply.content);
        debug!("generated manifest for {}: {} bytes", args.resource, manifest.len());

        let body = match self.api.create(&args.resource, &manifest).await {
            Ok(body) => body,
            Err(e) => return e.to_string(),
        };

        match serde_json::from_str::<ApiResponse>(&body) {
            Ok(response) => {
                if response.data.is_empty() {
                    response.error
                } else {
                    response.data
                }
            }
            Err(e) => e.to_string(),
        }
    }
}
