//! Applying dependency advice to project graphs.
//!
//! # Overview
//!
//! For each project with advice:
//!
//! 1. Resolve the project's base graph through a [`ProjectGraphProvider`].
//!    Projects without a graph are skipped; advice may name projects outside
//!    the current build view.
//! 2. Add an edge `project → dependency` for every add-advice.
//! 3. Remove `project → dependency` for every remove-advice and prune
//!    whatever is no longer reachable from the project.
//!
//! The per-project results are then unioned into one build-wide graph.
//! Union is insensitive to order because edge insertion is idempotent.

use tracing::{debug, info, instrument, warn};

use crate::advice::ProjectAdvice;
use crate::error::GraphError;
use crate::graph::DependencyGraph;
use crate::provider::ProjectGraphProvider;

/// Apply `advice` to a copy of `base`.
///
/// `base` is not modified.
///
/// # Errors
///
/// Returns [`GraphError::MissingNode`] if there is remove-advice and the
/// project node is absent from the graph after the adds.
pub fn trim_project(
    base: &DependencyGraph,
    advice: &ProjectAdvice,
) -> Result<DependencyGraph, GraphError> {
    let project = advice.project_path.as_str();
    let (adds, removes) = advice.partition();

    let mut working = base.copy();
    for add in &adds {
        working.add_edge(project, add.identifier());
    }

    let pairs: Vec<(&str, &str)> = removes
        .iter()
        .map(|removal| (project, removal.identifier()))
        .collect();

    let trimmed = working.remove_edges(project, &pairs)?;
    debug!(
        project,
        adds = adds.len(),
        removes = removes.len(),
        nodes_before = base.node_count(),
        nodes_after = trimmed.node_count(),
        edges_before = base.edge_count(),
        edges_after = trimmed.edge_count(),
        "trimmed project graph"
    );
    Ok(trimmed)
}

/// Union every graph into the first one.
///
/// Returns `None` for an empty input: a merge of nothing has no meaning.
pub fn merge_all(graphs: impl IntoIterator<Item = DependencyGraph>) -> Option<DependencyGraph> {
    graphs.into_iter().reduce(|mut acc, graph| {
        acc.merge(&graph);
        acc
    })
}

// ---------------------------------------------------------------------------
// GraphTrimmer
// ---------------------------------------------------------------------------

/// Turns a build-wide advice list plus per-project graphs into the graph
/// the build would have if all advice were followed.
pub struct GraphTrimmer<'a, P> {
    advice: &'a [ProjectAdvice],
    provider: &'a mut P,
}

impl<'a, P: ProjectGraphProvider> GraphTrimmer<'a, P> {
    #[must_use]
    pub fn new(advice: &'a [ProjectAdvice], provider: &'a mut P) -> Self {
        Self { advice, provider }
    }

    /// Trim each advised project and return the per-project results, in
    /// advice order. Unresolvable projects are left out.
    ///
    /// # Errors
    ///
    /// Propagates provider failures and per-project lookup errors.
    pub fn trim_each(&mut self) -> Result<Vec<(String, DependencyGraph)>, GraphError> {
        let mut trimmed = Vec::with_capacity(self.advice.len());
        for project_advice in self.advice {
            let project = &project_advice.project_path;
            let Some(base) = self.provider.project_graph(project)? else {
                warn!(project = %project, "no graph for advised project; skipping");
                continue;
            };
            trimmed.push((project.clone(), trim_project(&base, project_advice)?));
        }
        Ok(trimmed)
    }

    /// The merged, trimmed build graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NothingToMerge`] if no advised project resolved
    /// to a graph, and propagates [`trim_each`](Self::trim_each) errors.
    #[instrument(skip_all, fields(projects = self.advice.len()))]
    pub fn trim(mut self) -> Result<DependencyGraph, GraphError> {
        let trimmed = self.trim_each()?;
        let resolved = trimmed.len();
        let graph = merge_all(trimmed.into_iter().map(|(_, graph)| graph))
            .ok_or(GraphError::NothingToMerge)?;
        info!(
            resolved,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "merged trimmed graph"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::DependencyAdvice;
    use crate::graph::Edge;

    fn graph_from(pairs: &[(&str, &str)]) -> DependencyGraph {
        DependencyGraph::from_edges(pairs.iter().map(|(a, b)| Edge::new(*a, *b)))
    }

    #[test]
    fn add_advice_introduces_edge() {
        let base = graph_from(&[("lib", "moshi-kotlin"), ("moshi-kotlin", "moshi")]);
        let advice = ProjectAdvice::new("lib", vec![DependencyAdvice::add("okio", "implementation")]);

        let trimmed = trim_project(&base, &advice).expect("trim");
        assert_eq!(
            trimmed,
            graph_from(&[("lib", "moshi-kotlin"), ("moshi-kotlin", "moshi"), ("lib", "okio")])
        );
        assert_eq!(base.edge_count(), 2, "base untouched");
    }

    #[test]
    fn remove_advice_prunes_orphaned_subtree() {
        let base = graph_from(&[
            ("lib", "moshi-kotlin"),
            ("moshi-kotlin", "moshi"),
            ("moshi", "okio"),
        ]);
        let advice = ProjectAdvice::new(
            "lib",
            vec![DependencyAdvice::remove("moshi-kotlin", "implementation")],
        );

        let trimmed = trim_project(&base, &advice).expect("trim");
        let mut expected = DependencyGraph::new();
        expected.add_node("lib");
        assert_eq!(trimmed, expected);
    }

    #[test]
    fn redundant_add_is_noop() {
        let base = graph_from(&[("lib", "okio")]);
        let advice = ProjectAdvice::new("lib", vec![DependencyAdvice::add("okio", "api")]);
        assert_eq!(trim_project(&base, &advice).expect("trim"), base);
    }

    #[test]
    fn remove_of_missing_edge_still_prunes() {
        let mut base = graph_from(&[("lib", "okio")]);
        base.add_node("stray");
        let advice = ProjectAdvice::new("lib", vec![DependencyAdvice::remove("gson", "api")]);
        assert_eq!(trim_project(&base, &advice).expect("trim"), graph_from(&[("lib", "okio")]));
    }

    #[test]
    fn merge_all_of_nothing_is_none() {
        assert!(merge_all(Vec::new()).is_none());
    }

    #[test]
    fn merge_all_is_order_insensitive() {
        let one = graph_from(&[(":app", ":lib"), (":lib", "okio")]);
        let two = graph_from(&[(":lib", "okio"), ("okio", "kotlin-stdlib")]);
        let forward = merge_all([one.copy(), two.copy()]).expect("non-empty");
        let backward = merge_all([two, one]).expect("non-empty");
        assert_eq!(forward, backward);
        assert_eq!(forward.edge_count(), 3);
    }

    #[test]
    fn unresolvable_projects_are_skipped() {
        let advice = vec![
            ProjectAdvice::new(":ghost", vec![DependencyAdvice::remove("okio", "api")]),
            ProjectAdvice::new(":app", vec![]),
        ];
        let mut provider = |path: &str| (path == ":app").then(|| graph_from(&[(":app", ":lib")]));

        let graph = GraphTrimmer::new(&advice, &mut provider).trim().expect("trim");
        assert_eq!(graph, graph_from(&[(":app", ":lib")]));
    }

    #[test]
    fn nothing_resolved_is_nothing_to_merge() {
        let advice = vec![ProjectAdvice::new(":ghost", vec![])];
        let mut provider = |_: &str| -> Option<DependencyGraph> { None };
        assert!(matches!(
            GraphTrimmer::new(&advice, &mut provider).trim(),
            Err(GraphError::NothingToMerge)
        ));
    }

    #[test]
    fn trim_each_keeps_advice_order() {
        let advice = vec![ProjectAdvice::new(":b", vec![]), ProjectAdvice::new(":a", vec![])];
        let mut provider = |path: &str| Some(graph_from(&[(path, "okio")]));
        let each = GraphTrimmer::new(&advice, &mut provider)
            .trim_each()
            .expect("trim");
        let order: Vec<&str> = each.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(order, [":b", ":a"]);
    }
}
