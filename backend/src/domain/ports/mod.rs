//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_gateway;
mod profile_directory;

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{AuthGateway, AuthGatewayError, DEFAULT_GATEWAY_DELAY, FixtureAuthGateway};
#[cfg(test)]
pub use profile_directory::MockProfileDirectory;
pub use profile_directory::{FixtureProfileDirectory, ProfileDirectory, ProfileDirectoryError};
