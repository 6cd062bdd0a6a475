use log::{info, warn};
use rand::Rng;
use ring_hash::{simple_partition, HashRing, Node, Server, DEFAULT_REPLICAS};

fn env_or(name: &str, default: usize) -> usize {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("ignoring {}={:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn main() {
    ring_hash::log::init_logger();
    let servers = env_or("RING_SERVERS", 4);
    let replicas = env_or("RING_REPLICAS", DEFAULT_REPLICAS);
    let clients = env_or("RING_CLIENTS", 10_000);

    let mut ring = HashRing::with_replicas(replicas);
    for i in 0..servers {
        ring.add_server(Server::new(format!("server-{}", i)));
    }
    print!("{}", ring);

    let mut rng = rand::rng();
    let keys: Vec<String> = (0..clients)
        .map(|_| format!("{:032x}", rng.random::<u128>()))
        .collect();

    let before = ring.distribution(&keys);
    let mut counts: Vec<_> = before.iter().collect();
    counts.sort();
    for (id, n) in counts {
        println!("{}: {}", id, n);
    }

    let resolved: Vec<Option<Server>> = keys.iter().map(|k| ring.resolve(k).cloned()).collect();
    let newcomer = Server::new(format!("server-{}", servers));
    ring.add_server(newcomer.clone());
    let moved = keys
        .iter()
        .zip(&resolved)
        .filter(|(k, old)| ring.resolve(k) != old.as_ref())
        .count();
    info!(
        "adding {} moved {} of {} keys",
        newcomer.id(),
        moved,
        keys.len()
    );
    println!("ring: {} of {} keys moved after adding a server", moved, keys.len());

    let modulo_moved = keys
        .iter()
        .filter(|k| {
            simple_partition(servers as u64, k) != simple_partition(servers as u64 + 1, k)
        })
        .count();
    println!(
        "modulo: {} of {} keys moved after adding a partition",
        modulo_moved,
        keys.len()
    );
}
