//! Propositional networks
//!
//! A `Network` owns its components in an arena (a petgraph `DiGraph`).
//! Components refer to each other only through `ComponentId` handles, so
//! the graph can hold cycles without shared ownership. Node indices are
//! stable: components are never removed from a network.

mod component;
mod role;

pub use component::{Component, ANONYMOUS_NAME};
pub use role::Role;

use crate::error::{PropnetError, PropnetResult};
use crate::symbol::Symbol;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Stable handle of a component within one network
pub type ComponentId = NodeIndex;

/// Compiled rule graph plus the roles it was compiled for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    roles: Vec<Role>,
    graph: DiGraph<Component, ()>,
}

impl Network {
    /// Create an empty network for the given roles
    pub fn new(roles: Vec<Role>) -> Self {
        Self {
            roles,
            graph: DiGraph::new(),
        }
    }

    pub(crate) fn from_parts(roles: Vec<Role>, graph: DiGraph<Component, ()>) -> Self {
        Self { roles, graph }
    }

    pub(crate) fn into_parts(self) -> (Vec<Role>, DiGraph<Component, ()>) {
        (self.roles, self.graph)
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Add a component, returning its handle
    pub fn add_component(&mut self, component: Component) -> ComponentId {
        self.graph.add_node(component)
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.graph.node_weight(id)
    }

    pub(crate) fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.graph.node_weight_mut(id)
    }

    /// All component handles, in arena order
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.graph.node_indices()
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> + '_ {
        self.graph
            .node_indices()
            .map(move |id| (id, &self.graph[id]))
    }

    /// Terminal components only
    pub fn propositions(&self) -> impl Iterator<Item = (ComponentId, &Symbol)> + '_ {
        self.components()
            .filter_map(|(id, c)| c.name().map(|name| (id, name)))
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Connect `from -> to`; connecting twice is a no-op
    pub fn connect(&mut self, from: ComponentId, to: ComponentId) {
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Remove the edge `from -> to`, returning whether it existed
    pub fn disconnect(&mut self, from: ComponentId, to: ComponentId) -> bool {
        match self.graph.find_edge(from, to) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    pub fn is_connected(&self, from: ComponentId, to: ComponentId) -> bool {
        self.graph.find_edge(from, to).is_some()
    }

    /// Snapshot of the components feeding `id`, sorted by handle
    pub fn inputs(&self, id: ComponentId) -> Vec<ComponentId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Snapshot of the components `id` feeds, sorted by handle
    pub fn outputs(&self, id: ComponentId) -> Vec<ComponentId> {
        self.neighbors(id, Direction::Outgoing)
    }

    fn neighbors(&self, id: ComponentId, direction: Direction) -> Vec<ComponentId> {
        let mut ids: Vec<_> = self.graph.neighbors_directed(id, direction).collect();
        ids.sort_unstable();
        ids
    }

    /// Edge set as plain index pairs, for structural comparison
    pub fn edges(&self) -> BTreeSet<(usize, usize)> {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }

    /// Reject parallel edges in a network from an untrusted source
    ///
    /// Edges pointing past the arena never get this far: petgraph refuses
    /// them while deserializing.
    pub fn validate(&self) -> PropnetResult<()> {
        let mut seen = HashSet::with_capacity(self.graph.edge_count());
        for edge in self.graph.edge_references() {
            let (source, target) = (edge.source().index(), edge.target().index());
            if !seen.insert((source, target)) {
                return Err(PropnetError::NetworkInvalid(format!(
                    "duplicate edge {} -> {}",
                    source, target
                )));
            }
        }
        Ok(())
    }

    /// Component counts by kind, for display
    pub fn stats(&self) -> NetworkStats {
        let mut kinds = BTreeMap::new();
        for (_, component) in self.components() {
            *kinds.entry(component.kind()).or_insert(0usize) += 1;
        }
        NetworkStats {
            roles: self.roles.iter().map(|r| r.name().to_string()).collect(),
            components: self.len(),
            edges: self.edge_count(),
            kinds,
        }
    }
}

/// Summary of a network's shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub roles: Vec<String>,
    pub components: usize,
    pub edges: usize,
    pub kinds: BTreeMap<&'static str, usize>,
}
