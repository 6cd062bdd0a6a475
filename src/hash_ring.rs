use std::{collections::HashMap, fmt, marker::PhantomData};

use log::{debug, trace};

use crate::digest::{Md5Digest, PositionDigest, PositionKey};

/// Virtual nodes per server when none is configured.
pub const DEFAULT_REPLICAS: usize = 2;

/// Anything that can be placed on the ring. Identity is the id string.
pub trait Node: Clone + fmt::Debug {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Server {
    id: String,
}

impl Server {
    pub fn new(id: impl Into<String>) -> Self {
        Server { id: id.into() }
    }
}

impl Node for Server {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Node for String {
    fn id(&self) -> &str {
        self
    }
}

/// Consistent hashing ring with a fixed number of virtual nodes per server.
///
/// Each server owns `replicas` positions, `digest(id + "-" + r)`. A client
/// key is served by the owner of the first position at or after the digest
/// of the key, wrapping to the smallest position past the end of the ring.
///
/// The ring does no locking of its own, see [`crate::shared::SharedHashRing`].
#[derive(Debug, Clone)]
pub struct HashRing<S: Node, D = Md5Digest> {
    servers: Vec<S>,
    // ascending; duplicates kept when a server is added twice
    positions: Vec<PositionKey>,
    owners: HashMap<PositionKey, S>,
    replicas: usize,
    _digest: PhantomData<fn() -> D>,
}

impl<S: Node> Default for HashRing<S> {
    fn default() -> Self {
        HashRing::empty(DEFAULT_REPLICAS)
    }
}

impl<S: Node> HashRing<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replicas(replicas: usize) -> Self {
        HashRing::empty(replicas)
    }
}

impl<S: Node, D: PositionDigest> HashRing<S, D> {
    /// An empty ring using digest `D`.
    pub fn empty(replicas: usize) -> Self {
        HashRing {
            servers: Vec::new(),
            positions: Vec::new(),
            owners: HashMap::new(),
            replicas,
            _digest: PhantomData,
        }
    }

    pub fn add_server(&mut self, server: S) -> &mut Self {
        self.add_server_with_replicas(server, self.replicas)
    }

    /// Places `replicas` virtual nodes for `server` on the ring.
    ///
    /// Adding a server that is already present is not rejected: it shows up
    /// twice in [`servers`](Self::servers) and its positions are duplicated.
    pub fn add_server_with_replicas(&mut self, server: S, replicas: usize) -> &mut Self {
        for replica in 0..replicas {
            let key = position_of::<D>(server.id(), replica);
            self.positions.push(key.clone());
            self.owners.insert(key, server.clone());
        }
        self.positions.sort_unstable();
        debug!(
            "Server added: [{}] replicas = {} positions = {} | {:?}",
            server.id(),
            replicas,
            self.positions.len(),
            server
        );
        self.servers.push(server);
        self
    }

    pub fn remove_server(&mut self, server: &S) -> &mut Self {
        self.remove_server_with_replicas(server, self.replicas)
    }

    /// Removes every entry for `server` and its first `replicas` positions.
    ///
    /// `replicas` must match the count the server was added with. Positions
    /// beyond it are left on the ring and keep resolving to the old server.
    /// Removing an unknown server does nothing.
    pub fn remove_server_with_replicas(&mut self, server: &S, replicas: usize) -> &mut Self {
        let id = server.id();
        self.servers.retain(|s| s.id() != id);

        for replica in 0..replicas {
            let key = position_of::<D>(id, replica);
            self.owners.remove(&key);
            let start = self.positions.partition_point(|p| p < &key);
            let end = start + self.positions[start..].partition_point(|p| p == &key);
            self.positions.drain(start..end);
        }
        debug!(
            "Server removed: [{}] replicas = {} positions = {}",
            id,
            replicas,
            self.positions.len()
        );
        self
    }

    /// Finds the server responsible for `client`, `None` on an empty ring.
    pub fn resolve(&self, client: &str) -> Option<&S> {
        let hash = D::position(client);
        let idx = self.positions.partition_point(|p| p < &hash);
        // past the last position wraps around to the first
        let key = self.positions.get(idx).or_else(|| self.positions.first())?;
        let server = self.owners.get(key);
        trace!("Resolved: {} [{}] -> [{}] {:?}", client, hash, key, server);
        server
    }

    /// Resolves every key and counts how many land on each server id.
    pub fn distribution<I, K>(&self, clients: I) -> HashMap<String, usize>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut counts = HashMap::new();
        for client in clients {
            if let Some(server) = self.resolve(client.as_ref()) {
                *counts.entry(server.id().to_string()).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn servers(&self) -> &[S] {
        &self.servers
    }

    pub fn positions(&self) -> &[PositionKey] {
        &self.positions
    }

    pub fn owner_of(&self, key: &PositionKey) -> Option<&S> {
        self.owners.get(key)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.servers.iter().any(|s| s.id() == id)
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Number of registered servers, counting duplicates.
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// True when there is no position left to resolve to.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn mapping_len(&self) -> usize {
        self.owners.len()
    }
}

impl<S: Node, D: PositionDigest> fmt::Display for HashRing<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "replicas: {}, servers: {}, positions: {}",
            self.replicas,
            self.servers.len(),
            self.positions.len()
        )?;
        for key in &self.positions {
            let owner = self.owners.get(key).map(|s| s.id()).unwrap_or("?");
            writeln!(f, "  {} -> {}", key, owner)?;
        }
        Ok(())
    }
}

fn position_of<D: PositionDigest>(id: &str, replica: usize) -> PositionKey {
    D::position(&format!("{}-{}", id, replica))
}
