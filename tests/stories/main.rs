//! Integration tests: catalog loading, persisted user state, and story queries.

mod loading;
mod queries;
