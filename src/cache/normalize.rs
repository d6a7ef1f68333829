//! Load-time repair of cached networks
//!
//! The evaluation engine only tracks value changes at propositions, so an
//! internal gate must not fan out directly into several other internal
//! gates. Networks fresh from the builder respect this; networks decoded
//! from a cache entry are rebuilt without it and have to be repaired:
//!
//! ```text
//!   AND ──► OR          AND ──► anon ──► OR
//!    └────► OR    =>               └───► OR
//! ```
//!
//! Each offending source gets one anonymous pass-through proposition shared
//! by all of its rewritten edges. Decoded names are also re-interned so that
//! equal names are pointer-equal across the process.

use crate::network::{Component, ComponentId, Network, Role, ANONYMOUS_NAME};
use crate::symbol::Interner;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Which internal-to-internal edges get a pass-through proposition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BufferPolicy {
    /// Only sources feeding two or more internal gates
    #[default]
    FanOut,
    /// Every internal gate feeding another internal gate
    EveryEdge,
}

impl BufferPolicy {
    /// Minimum number of internal consumers that makes a source offend
    fn threshold(self) -> usize {
        match self {
            Self::FanOut => 2,
            Self::EveryEdge => 1,
        }
    }
}

impl fmt::Display for BufferPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FanOut => f.write_str("fan-out"),
            Self::EveryEdge => f.write_str("every-edge"),
        }
    }
}

/// What a normalization pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub buffers_inserted: usize,
    pub edges_rewritten: usize,
    pub names_interned: usize,
    pub roles_interned: usize,
}

/// Repairs decoded networks against an injected symbol pool
pub struct GraphNormalizer<'a> {
    pool: &'a dyn Interner,
    policy: BufferPolicy,
}

impl<'a> GraphNormalizer<'a> {
    pub fn new(pool: &'a dyn Interner) -> Self {
        Self {
            pool,
            policy: BufferPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: BufferPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> BufferPolicy {
        self.policy
    }

    /// Repair `network` and return the result
    ///
    /// Must only be given a network nobody else can observe yet.
    pub fn normalize(&self, network: Network) -> Network {
        self.normalize_with_report(network).0
    }

    pub fn normalize_with_report(&self, mut network: Network) -> (Network, NormalizeReport) {
        let mut report = NormalizeReport::default();

        // Pass 1: detach offending edges. Outputs are snapshotted per source
        // and buffers are only staged, so the arena is not grown while walked.
        let original: Vec<ComponentId> = network.component_ids().collect();
        let mut staged: Vec<(ComponentId, Vec<ComponentId>)> = Vec::new();

        for source in original {
            let targets = offending_outputs(&network, source, self.policy);
            if targets.is_empty() {
                continue;
            }
            for &target in &targets {
                network.disconnect(source, target);
            }
            report.edges_rewritten += targets.len();
            staged.push((source, targets));
        }

        // Pass 2: buffers get arena handles only now.
        for (source, targets) in staged {
            let buffer =
                network.add_component(Component::Proposition(self.pool.intern(ANONYMOUS_NAME)));
            network.connect(source, buffer);
            for target in targets {
                network.connect(buffer, target);
            }
            report.buffers_inserted += 1;
        }

        // Pass 3: swap decoded names for the pool's canonical instances.
        let ids: Vec<ComponentId> = network.component_ids().collect();
        for id in ids {
            if let Some(Component::Proposition(name)) = network.component_mut(id) {
                let canonical = self.pool.intern(name.as_str());
                *name = canonical;
                report.names_interned += 1;
            }
        }

        let (roles, graph) = network.into_parts();
        let roles: Vec<Role> = roles
            .iter()
            .map(|role| Role::interned(self.pool, role.name()))
            .collect();
        report.roles_interned = roles.len();

        if report.buffers_inserted > 0 {
            info!(
                "Inserted {} pass-through propositions for {} edges",
                report.buffers_inserted, report.edges_rewritten
            );
        }
        debug!(
            "Interned {} proposition names and {} roles",
            report.names_interned, report.roles_interned
        );

        (Network::from_parts(roles, graph), report)
    }
}

/// Internal consumers of `source` that must go through a buffer
fn offending_outputs(
    network: &Network,
    source: ComponentId,
    policy: BufferPolicy,
) -> Vec<ComponentId> {
    if is_terminal(network, source) {
        return Vec::new();
    }

    let consumers: Vec<ComponentId> = network
        .outputs(source)
        .into_iter()
        .filter(|&out| !is_terminal(network, out))
        .collect();

    if consumers.len() < policy.threshold() {
        return Vec::new();
    }
    consumers
}

fn is_terminal(network: &Network, id: ComponentId) -> bool {
    network.component(id).is_some_and(Component::is_terminal)
}

/// Edges that break the buffering invariant under `policy`
pub fn fan_out_violations(
    network: &Network,
    policy: BufferPolicy,
) -> Vec<(ComponentId, ComponentId)> {
    network
        .component_ids()
        .flat_map(|source| {
            offending_outputs(network, source, policy)
                .into_iter()
                .map(move |target| (source, target))
        })
        .collect()
}
