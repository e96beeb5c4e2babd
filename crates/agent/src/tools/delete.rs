//! DeleteTool: remove one resource instance through the resource API.

use async_trait::async_trait;
use serde::Deserialize;

use super::{parse_args, Tool, ToolDescriptor};
use crate::resource::ResourceClient;

static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "DeleteTool",
    description: "Used to delete a specified Kubernetes resource in a specified namespace, such as deleting a pod etc.",
    args_schema: r#"{"type":"object","properties":{"resource":{"type":"string", "description": "The specified Kubernetes resource type, such as pod, service etc."}, "name":{"type":"string", "description": "The name of the specified Kubernetes resource instance"}, "namespace":{"type":"string", "description": "The namespace of the specified Kubernetes resource"}}}"#,
};

#[derive(Deserialize)]
struct DeleteArgs {
    #[serde(default)]
    resource: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    namespace: String,
}

pub struct DeleteTool {
    api: ResourceClient,
}

impl DeleteTool {
    pub fn new(api: ResourceClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for DeleteTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &DESCRIPTOR
    }

    async fn invoke(&self, raw_args: &str) -> String {
        let args: DeleteArgs = match parse_args(raw_args) {
            Ok(args) => args,
            Err(observation) => return observation,
        };

        let resource = args.resource.to_lowercase();
        match self
            .api
            .delete(&resource, &args.namespace, &args.name)
            .await
        {
            Ok(()) => "Resource deleted successfully".to_string(),
            Err(e) => format!("Delete failed: {}", e),
        }
    }
}
