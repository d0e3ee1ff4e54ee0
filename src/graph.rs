use std::collections::BTreeSet;

/// Enumerates simple cycles of exactly `length` nodes in an undirected graph.
///
/// Runs a bounded-depth search from every start node over an explicit stack
/// (high-valence graphs must not grow the call stack). A path of `length`
/// distinct nodes whose tail connects back to its head is a cycle; a visited
/// node may only be revisited on that closing step. Cycles are deduplicated
/// by vertex-set equality, so each face of a planar graph is reported once,
/// in traversal order.
pub fn enumerate_cycles<N, F>(
    nodes: impl IntoIterator<Item = N>,
    neighbors: F,
    length: usize,
) -> Vec<Vec<N>>
where
    N: Copy + Eq + Ord,
    F: Fn(N) -> Vec<N>,
{
    let mut cycles = Vec::new();
    if length < 3 {
        return cycles;
    }

    let mut seen: BTreeSet<Vec<N>> = BTreeSet::new();
    for start in nodes {
        let mut stack: Vec<Vec<N>> = vec![vec![start]];
        while let Some(path) = stack.pop() {
            let Some(&last) = path.last() else {
                continue;
            };
            if path.len() == length {
                if neighbors(last).contains(&start) {
                    let mut key = path.clone();
                    key.sort_unstable();
                    if seen.insert(key) {
                        cycles.push(path);
                    }
                }
                continue;
            }
            for next in neighbors(last) {
                if !path.contains(&next) {
                    let mut extended = path.clone();
                    extended.push(next);
                    stack.push(extended);
                }
            }
        }
    }
    cycles
}
