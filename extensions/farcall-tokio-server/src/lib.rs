mod request_dispatcher;
mod rpc_server;
pub mod utils;

pub use request_dispatcher::dispatch_frame;
pub use rpc_server::RpcServer;
