mod rpc_request;
mod rpc_response;
mod service_metadata;

pub use rpc_request::RpcRequest;
pub use rpc_response::RpcResponse;
pub use service_metadata::ServiceMetadata;
