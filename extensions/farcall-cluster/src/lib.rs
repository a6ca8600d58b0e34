pub mod balancer;
mod error;
pub mod retry;
pub mod tolerant;
mod transport_interface;

pub use error::CallError;
pub use transport_interface::CallTransport;
