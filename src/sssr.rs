//! Smallest-set-of-smallest-rings (SSSR) computation, shared by the
//! aromatic-bond finalizer (§4.5, which runs on the [`crate::read::Parsed`]
//! intermediate, before the external molecule graph exists) and
//! [`crate::graph::Molecule::sssr`] (exposed to callers as the graph's own
//! ring basis, per the external-collaborator contract of §6).
//!
//! Method (§9 design notes / SPEC_FULL §4.5): enumerate one candidate ring
//! per edge (the shortest path between its endpoints with that edge
//! excluded, plus the edge itself), sort candidates by size ascending, and
//! greedily keep a candidate only if it is linearly independent over GF(2)
//! (edges-as-bits) of the rings already kept, stopping once
//! `edges - atoms + components` rings have been chosen.

use std::collections::VecDeque;

/// Computes the SSSR basis of an undirected graph with `n_atoms` vertices
/// and the given `edges` (vertex index pairs). Returns one ring per basis
/// member as the sorted set of edge indices (into `edges`) that make it up.
pub fn compute(n_atoms: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    if n_atoms == 0 || edges.is_empty() {
        return Vec::new();
    }

    let adjacency = adjacency_list(n_atoms, edges);
    let components = component_count(n_atoms, &adjacency);
    let target = edges.len().saturating_sub(n_atoms).saturating_add(components);

    if target == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<Vec<usize>> = (0..edges.len())
        .filter_map(|edge_idx| {
            let (beg, end) = edges[edge_idx];
            shortest_cycle_through(edge_idx, beg, end, edges, &adjacency)
        })
        .collect();
    candidates.sort_by_key(Vec::len);

    let mut basis: Vec<Vec<bool>> = Vec::new();
    let mut selected = Vec::new();

    for candidate in candidates {
        if selected.len() == target {
            break;
        }

        let mut vector = vec![false; edges.len()];
        for &e in &candidate {
            vector[e] = true;
        }

        for row in &basis {
            let leading = row.iter().position(|&bit| bit).expect("nonzero basis row");
            if vector[leading] {
                for (v, r) in vector.iter_mut().zip(row.iter()) {
                    *v ^= *r;
                }
            }
        }

        if vector.iter().any(|&bit| bit) {
            basis.push(vector);
            selected.push(candidate);
        }
    }

    selected
}

fn adjacency_list(n_atoms: usize, edges: &[(usize, usize)]) -> Vec<Vec<(usize, usize)>> {
    let mut adjacency = vec![Vec::new(); n_atoms];
    for (edge_idx, &(beg, end)) in edges.iter().enumerate() {
        adjacency[beg].push((end, edge_idx));
        adjacency[end].push((beg, edge_idx));
    }
    adjacency
}

fn component_count(n_atoms: usize, adjacency: &[Vec<(usize, usize)>]) -> usize {
    let mut seen = vec![false; n_atoms];
    let mut components = 0;

    for start in 0..n_atoms {
        if seen[start] {
            continue;
        }
        components += 1;
        seen[start] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(atom) = queue.pop_front() {
            for &(next, _) in &adjacency[atom] {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
    }

    components
}

/// Shortest path between `beg` and `end` with `excluded` removed from the
/// graph, plus `excluded` itself, forming one ring candidate as a set of
/// edge indices.
fn shortest_cycle_through(
    excluded: usize,
    beg: usize,
    end: usize,
    edges: &[(usize, usize)],
    adjacency: &[Vec<(usize, usize)>],
) -> Option<Vec<usize>> {
    let mut prev: Vec<Option<(usize, usize)>> = vec![None; adjacency.len()];
    let mut seen = vec![false; adjacency.len()];
    let mut queue = VecDeque::from([beg]);
    seen[beg] = true;

    while let Some(atom) = queue.pop_front() {
        if atom == end {
            break;
        }
        for &(next, edge_idx) in &adjacency[atom] {
            if edge_idx == excluded || seen[next] {
                continue;
            }
            seen[next] = true;
            prev[next] = Some((atom, edge_idx));
            queue.push_back(next);
        }
    }

    if !seen[end] {
        return None;
    }

    let mut path_edges = vec![excluded];
    let mut cursor = end;
    while cursor != beg {
        let (from, edge_idx) = prev[cursor]?;
        path_edges.push(edge_idx);
        cursor = from;
    }

    let _ = edges;
    Some(path_edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_rings_in_a_chain() {
        let edges = [(0, 1), (1, 2), (2, 3)];
        assert!(compute(4, &edges).is_empty());
    }

    #[test]
    fn single_triangle() {
        let edges = [(0, 1), (1, 2), (2, 0)];
        let rings = compute(3, &edges);

        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 3);
    }

    #[test]
    fn fused_bicyclics_yield_two_smallest_rings() {
        // Two fused triangles sharing an edge: 0-1-2-0 and 1-3-2-1.
        let edges = [(0, 1), (1, 2), (2, 0), (1, 3), (3, 2)];
        let rings = compute(4, &edges);

        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn disconnected_components_each_contribute_rings() {
        let edges = [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)];
        let rings = compute(6, &edges);

        assert_eq!(rings.len(), 2);
    }

    #[test]
    fn a_bridge_is_never_part_of_a_ring() {
        // Triangle 0-1-2-0 plus a pendant bridge 2-3.
        let edges = [(0, 1), (1, 2), (2, 0), (2, 3)];
        let rings = compute(4, &edges);

        assert_eq!(rings.len(), 1);
        assert!(!rings[0].contains(&3));
    }
}
