// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod dhis2_repository;
pub mod error;
