mod consistent_hash_load_balancer;
pub mod load_balancer_factory;
mod load_balancer_interface;
mod random_load_balancer;
mod round_robin_load_balancer;

pub use consistent_hash_load_balancer::ConsistentHashLoadBalancer;
pub use load_balancer_interface::LoadBalancer;
pub use random_load_balancer::RandomLoadBalancer;
pub use round_robin_load_balancer::RoundRobinLoadBalancer;
