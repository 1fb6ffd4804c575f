// Module layout (Clean Architecture style)
// - bootstrap: configuration and the shared AppContext
// - infrastructure: Postgres repositories
// - presentation: HTTP handlers, extractors and wire shapes
// - application: ports, use cases and service errors
// - domain: core models and their rules

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub mod testing;
