use farcall::model::ServiceMetadata;
use farcall_registry::ServiceCache;

fn instance(port: u16) -> ServiceMetadata {
    ServiceMetadata::new("Echo", "127.0.0.1", port)
}

#[test]
fn read_returns_what_was_written() {
    let cache = ServiceCache::new();
    cache.write("Echo:1.0", vec![instance(8080), instance(8081)]);

    let cached = cache.read("Echo:1.0").expect("expected a cache hit");
    assert_eq!(cached, vec![instance(8080), instance(8081)]);
}

#[test]
fn read_misses_for_an_unknown_service() {
    let cache = ServiceCache::new();
    assert!(cache.read("Unknown:1.0").is_none());
}

#[test]
fn write_replaces_the_entry_wholesale() {
    let cache = ServiceCache::new();
    cache.write("Echo:1.0", vec![instance(8080), instance(8081)]);
    cache.write("Echo:1.0", vec![instance(9090)]);

    let cached = cache.read("Echo:1.0").expect("expected a cache hit");
    assert_eq!(cached, vec![instance(9090)]);
}

#[test]
fn clear_drops_every_entry() {
    let cache = ServiceCache::new();
    cache.write("Echo:1.0", vec![instance(8080)]);
    cache.write("Sum:1.0", vec![instance(8081)]);

    cache.clear();

    assert!(cache.read("Echo:1.0").is_none());
    assert!(cache.read("Sum:1.0").is_none());
}
