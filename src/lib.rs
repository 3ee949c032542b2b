// Atrium server library
// Exposes the bootstrap/run lifecycle so integration tests can assemble
// the same application the binary runs.

pub mod lifecycle;
pub mod logging;
pub mod middleware;
