use crate::balancer::LoadBalancer;
use farcall::model::{RpcRequest, ServiceMetadata};
use std::collections::BTreeMap;
use xxhash_rust::xxh3::xxh3_64;

/// Ring positions generated per real candidate; more virtual nodes smooth
/// the key distribution across instances.
const VIRTUAL_NODE_COUNT: usize = 100;

/// Consistent-hash selection over a ring of virtual nodes.
///
/// The ring is rebuilt from the candidate list on every call: more CPU per
/// selection, but the topology is always current and no stale ring can
/// outlive a membership change. The request's method name is hashed to a
/// point on the ring and the first virtual node at or past that point
/// wins, wrapping to the smallest hash when the point falls beyond the
/// largest.
pub struct ConsistentHashLoadBalancer;

impl LoadBalancer for ConsistentHashLoadBalancer {
    fn select(
        &self,
        request: &RpcRequest,
        candidates: &[ServiceMetadata],
    ) -> Option<ServiceMetadata> {
        match candidates {
            [] => None,
            [only] => Some(only.clone()),
            _ => {
                let mut ring: BTreeMap<u64, &ServiceMetadata> = BTreeMap::new();
                for candidate in candidates {
                    let address = candidate.service_address();
                    for virtual_index in 0..VIRTUAL_NODE_COUNT {
                        let hash = xxh3_64(format!("{address}#{virtual_index}").as_bytes());
                        ring.insert(hash, candidate);
                    }
                }

                let point = xxh3_64(request.method_name.as_bytes());
                ring.range(point..)
                    .next()
                    .or_else(|| ring.iter().next())
                    .map(|(_, candidate)| (*candidate).clone())
            }
        }
    }
}
