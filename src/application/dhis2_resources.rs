// Fetch capability for the remote DHIS2 instance
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait Dhis2Resources: Send + Sync {
    /// Fetch a single API resource, e.g. `categoryCombos/abc.json`
    async fn get_resource(&self, resource: &str, params: &[(&str, &str)]) -> anyhow::Result<Value>;

    /// List every entry stored in a data store namespace
    async fn get_namespace_data(&self, namespace: &str) -> anyhow::Result<Vec<Value>>;

    /// Fetch the entry stored under `key` in a data store namespace
    async fn get_namespace_key_data(&self, namespace: &str, key: &str) -> anyhow::Result<Value>;

    /// Fetch a resource and return the list found under `resource_key`
    async fn get_resources(
        &self,
        resource: &str,
        resource_key: &str,
        params: &[(&str, &str)],
    ) -> anyhow::Result<Vec<Value>> {
        let mut response = self.get_resource(resource, params).await?;

        match response.get_mut(resource_key).map(Value::take) {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => anyhow::bail!(
                "Expected a list under '{}' in {}, got {}",
                resource_key,
                resource,
                other
            ),
        }
    }
}
