//! Service dependency graph and its inverse
//!
//! - **Forward**: `service → [dependency]`, exactly as declared in manifests
//! - **Inverted**: `dependency → [service]`, one hop, no closure
//!
//! Services and shared libraries live in one namespace: a dependency name
//! is just a string and may or may not be a service itself.
//!
//! Both maps keep insertion order (`IndexMap`) so inversion output is
//! deterministic for a given load order.

use indexmap::IndexMap;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

/// Forward graph: service name → declared dependency names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
  services: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set a service's dependencies; a repeated name overwrites (last writer wins).
  ///
  /// Returns the previous dependency list, if the name was already present.
  pub fn insert(&mut self, service: impl Into<String>, dependencies: Vec<String>) -> Option<Vec<String>> {
    self.services.insert(service.into(), dependencies)
  }

  pub fn dependencies_of(&self, service: &str) -> Option<&[String]> {
    self.services.get(service).map(Vec::as_slice)
  }

  pub fn len(&self) -> usize {
    self.services.len()
  }

  pub fn is_empty(&self) -> bool {
    self.services.is_empty()
  }

  /// `(service, dependencies)` in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.services.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
  }

  /// Dependency cycles among declared names.
  ///
  /// Uses Tarjan's SCC on a graph with an edge `service → dependency` for
  /// every declaration. A component is a cycle when it has more than one
  /// member or a service lists itself. Members are sorted, cycles are sorted.
  pub fn find_cycles(&self) -> Vec<Vec<String>> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();

    for (service, deps) in &self.services {
      let from = node_for(&mut graph, &mut index, service);
      for dep in deps {
        let to = node_for(&mut graph, &mut index, dep);
        graph.update_edge(from, to, ());
      }
    }

    let mut cycles: Vec<Vec<String>> = algo::tarjan_scc(&graph)
      .into_iter()
      .filter(|component| component.len() > 1 || graph.contains_edge(component[0], component[0]))
      .map(|component| {
        let mut names: Vec<String> = component.into_iter().map(|idx| graph[idx].to_string()).collect();
        names.sort();
        names
      })
      .collect();
    cycles.sort();
    cycles
  }
}

fn node_for<'a>(graph: &mut DiGraph<&'a str, ()>, index: &mut HashMap<&'a str, NodeIndex>, name: &'a str) -> NodeIndex {
  *index.entry(name).or_insert_with(|| graph.add_node(name))
}

impl<K, V, S> FromIterator<(K, V)> for DependencyGraph
where
  K: Into<String>,
  V: IntoIterator<Item = S>,
  S: Into<String>,
{
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    let mut graph = Self::new();
    for (service, deps) in iter {
      graph.insert(service, deps.into_iter().map(Into::into).collect());
    }
    graph
  }
}

/// Inverted graph: dependency name → services that declare it.
///
/// Never holds an empty list: a name with no dependents is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvertedGraph {
  dependents: IndexMap<String, Vec<String>>,
}

impl InvertedGraph {
  /// Services depending on `dependency`; empty when there are none.
  pub fn dependents_of(&self, dependency: &str) -> &[String] {
    self.dependents.get(dependency).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn contains(&self, dependency: &str) -> bool {
    self.dependents.contains_key(dependency)
  }

  pub fn len(&self) -> usize {
    self.dependents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.dependents.is_empty()
  }

  /// `(dependency, dependents)` in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.dependents.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
  }
}

impl<K, V, S> FromIterator<(K, V)> for InvertedGraph
where
  K: Into<String>,
  V: IntoIterator<Item = S>,
  S: Into<String>,
{
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    let mut dependents: IndexMap<String, Vec<String>> = IndexMap::new();
    for (dependency, services) in iter {
      dependents
        .entry(dependency.into())
        .or_default()
        .extend(services.into_iter().map(Into::into));
    }
    dependents.retain(|_, services| !services.is_empty());
    Self { dependents }
  }
}

/// Invert a dependency graph: `inverted[dep]` lists every service declaring `dep`.
///
/// Order follows the forward graph's insertion order, then each service's
/// dependency order.
pub fn invert_graph(graph: &DependencyGraph) -> InvertedGraph {
  let mut dependents: IndexMap<String, Vec<String>> = IndexMap::new();

  for (service, deps) in graph.iter() {
    for dep in deps {
      dependents.entry(dep.clone()).or_default().push(service.to_string());
    }
  }

  InvertedGraph { dependents }
}
