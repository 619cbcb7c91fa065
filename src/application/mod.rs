// Application layer - use cases over the DHIS2 fetch capability
pub mod dashboard_service;
pub mod dhis2_resources;
pub mod queries;
pub mod query_cache;
pub mod visualization_service;

#[cfg(test)]
pub mod fake_resources;
