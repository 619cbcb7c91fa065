// In-memory DHIS2 stand-in used by tests
use crate::application::dhis2_resources::Dhis2Resources;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeResources {
    resources: HashMap<String, Value>,
    namespaces: HashMap<String, Vec<(String, Value)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeResources {
    pub fn with_resource(mut self, resource: &str, value: Value) -> Self {
        self.resources.insert(resource.to_string(), value);
        self
    }

    pub fn with_entry(mut self, namespace: &str, key: &str, value: Value) -> Self {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .push((key.to_string(), value));
        self
    }

    /// Requests made so far, as `resource?params` or `dataStore/ns[/key]`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Dhis2Resources for FakeResources {
    async fn get_resource(&self, resource: &str, params: &[(&str, &str)]) -> anyhow::Result<Value> {
        let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        self.record(format!("{}?{}", resource, query.join("&")));

        self.resources
            .get(resource)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404 Not Found: {}", resource))
    }

    async fn get_namespace_data(&self, namespace: &str) -> anyhow::Result<Vec<Value>> {
        self.record(format!("dataStore/{}", namespace));

        Ok(self
            .namespaces
            .get(namespace)
            .map(|entries| entries.iter().map(|(_, v)| v.clone()).collect())
            .unwrap_or_default())
    }

    async fn get_namespace_key_data(&self, namespace: &str, key: &str) -> anyhow::Result<Value> {
        self.record(format!("dataStore/{}/{}", namespace, key));

        self.namespaces
            .get(namespace)
            .and_then(|entries| entries.iter().find(|(k, _)| k == key))
            .map(|(_, v)| v.clone())
            .ok_or_else(|| anyhow::anyhow!("404 Not Found: dataStore/{}/{}", namespace, key))
    }
}
