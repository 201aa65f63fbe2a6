//! Driven ports for the hexagonal boundary.
//!
//! Store containers depend on these traits only; adapters in
//! [`crate::outbound`] implement them.

mod macros;
pub(crate) use macros::define_port_error;

mod application_gateway;
mod auth_gateway;
mod candidate_gateway;
mod employer_gateway;
mod gateway_error;
mod job_gateway;
mod session_store;

#[cfg(test)]
pub use application_gateway::MockApplicationGateway;
pub use application_gateway::ApplicationGateway;
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::AuthGateway;
#[cfg(test)]
pub use candidate_gateway::MockCandidateGateway;
pub use candidate_gateway::CandidateGateway;
#[cfg(test)]
pub use employer_gateway::MockEmployerGateway;
pub use employer_gateway::EmployerGateway;
pub use gateway_error::GatewayError;
#[cfg(test)]
pub use job_gateway::MockJobGateway;
pub use job_gateway::JobGateway;
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
