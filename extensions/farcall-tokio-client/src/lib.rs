mod service_caller;
mod tcp_call_transport;

pub use service_caller::ServiceCaller;
pub use tcp_call_transport::{DEFAULT_RESPONSE_TIMEOUT, TcpCallTransport};
