//! ListTool: read resources of one type from the resource API.

use async_trait::async_trait;
use serde::Deserialize;

use super::{parse_args, Tool, ToolDescriptor};
use crate::resource::ResourceClient;

static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "ListTool",
    description: "Used to list the specified Kubernetes resources in a specified namespace, such as pod list etc.",
    args_schema: r#"{"type":"object","properties":{"resource":{"type":"string", "description": "The specified Kubernetes resource type, such as pod, service etc."}, "namespace":{"type":"string", "description": "The specified Kubernetes namespace"}}}"#,
};

#[derive(Deserialize)]
struct ListArgs {
    #[serde(default)]
    resource: String,
    #[serde(default)]
    namespace: String,
}

pub struct ListTool {
    api: ResourceClient,
}

impl ListTool {
    pub fn new(api: ResourceClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for ListTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &DESCRIPTOR
    }

    async fn invoke(&self, raw_args: &str) -> String {
        let args: ListArgs = match parse_args(raw_args) {
            Ok(args) => args,
            Err(observation) => return observation,
        };

        let namespace = if args.namespace.is_empty() {
            "default"
        } else {
            args.namespace.as_str()
        };
        let resource = args.resource.to_lowercase();

        match self.api.list(&resource, namespace).await {
            Ok(body) => body,
            Err(e) => format!("Error listing resources: {}", e),
        }
    }
}
