//! Static checks over the prerequisite graph.
use std::collections::HashMap;

use super::ConventionModule;

/// Detect cycles in the prerequisite graph using Kahn's algorithm.
///
/// Prerequisites naming modules outside `modules` are ignored; see
/// [`dangling_prerequisites`]. Returns `true` if the graph contains at least
/// one cycle.
pub fn has_cycle(modules: &[&dyn ConventionModule]) -> bool {
    let id_to_idx: HashMap<&str, usize> = modules
        .iter()
        .enumerate()
        .map(|(i, m)| (m.id(), i))
        .collect();

    let mut in_degree: Vec<usize> = modules
        .iter()
        .map(|m| {
            m.prerequisites()
                .iter()
                .filter(|p| id_to_idx.contains_key(*p))
                .count()
        })
        .collect();

    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); modules.len()];
    for (i, m) in modules.iter().enumerate() {
        for prereq in m.prerequisites() {
            if let Some(&prereq_idx) = id_to_idx.get(prereq)
                && let Some(d) = dependents.get_mut(prereq_idx)
            {
                d.push(i);
            }
        }
    }

    let mut queue: Vec<usize> = in_degree
        .iter()
        .enumerate()
        .filter_map(|(i, &d)| if d == 0 { Some(i) } else { None })
        .collect();
    let mut processed = 0usize;

    while let Some(idx) = queue.pop() {
        processed += 1;
        if let Some(next) = dependents.get(idx) {
            for &dep in next {
                if let Some(count) = in_degree.get_mut(dep) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push(dep);
                    }
                }
            }
        }
    }

    processed != modules.len()
}

/// Prerequisites that name no module in `modules`, as
/// `(module id, missing prerequisite)` pairs.
pub fn dangling_prerequisites(modules: &[&dyn ConventionModule]) -> Vec<(&'static str, &'static str)> {
    let known: Vec<&str> = modules.iter().map(|m| m.id()).collect();
    modules
        .iter()
        .flat_map(|m| {
            m.prerequisites()
                .iter()
                .filter(|p| !known.contains(*p))
                .map(|p| (m.id(), *p))
                .collect::<Vec<_>>()
        })
        .collect()
}
