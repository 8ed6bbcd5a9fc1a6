//! Cycle detection and depth over the field-expansion graph.
//!
//! Nodes are type indices in registration order; each node's edges are listed
//! in field declaration order. Both functions are deterministic for a given
//! adjacency list.

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Returns the first cycle found by a depth-first walk from each node in
/// order, as the nodes on the loop starting at the revisited one.
pub(crate) fn find_cycle(adjacency: &[Vec<usize>]) -> Option<Vec<usize>> {
    let mut mark = vec![Mark::Unvisited; adjacency.len()];
    // (node, index of the next edge to follow)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..adjacency.len() {
        if mark[root] != Mark::Unvisited {
            continue;
        }
        mark[root] = Mark::OnPath;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let (node, edge) = *top;
            let Some(&next) = adjacency[node].get(edge) else {
                mark[node] = Mark::Done;
                stack.pop();
                continue;
            };
            top.1 += 1;
            match mark[next] {
                Mark::OnPath => {
                    let start = stack.iter().position(|&(n, _)| n == next).unwrap_or(0);
                    return Some(stack[start..].iter().map(|&(n, _)| n).collect());
                }
                Mark::Unvisited => {
                    mark[next] = Mark::OnPath;
                    stack.push((next, 0));
                }
                Mark::Done => {}
            }
        }
    }
    None
}

/// Longest expansion chain from each node, counting the node itself (a type
/// with no nested projections has depth 1). The graph must be acyclic.
pub(crate) fn depths(adjacency: &[Vec<usize>]) -> Vec<usize> {
    // 0 marks a node whose depth is not known yet
    let mut depth = vec![0; adjacency.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..adjacency.len() {
        if depth[root] != 0 {
            continue;
        }
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let (node, edge) = *top;
            if let Some(&next) = adjacency[node].get(edge) {
                top.1 += 1;
                if depth[next] == 0 {
                    stack.push((next, 0));
                }
                continue;
            }
            let deepest = adjacency[node].iter().map(|&n| depth[n]).max().unwrap_or(0);
            depth[node] = deepest + 1;
            stack.pop();
        }
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_has_no_cycle() {
        assert_eq!(find_cycle(&[]), None);
    }

    #[test]
    fn self_loop_is_one_node_cycle() {
        assert_eq!(find_cycle(&[vec![0]]), Some(vec![0]));
    }

    #[test]
    fn two_node_cycle_starts_at_revisited_node() {
        // 0 -> 1 -> 0
        assert_eq!(find_cycle(&[vec![1], vec![0]]), Some(vec![0, 1]));
    }

    #[test]
    fn cycle_below_acyclic_prefix_excludes_prefix() {
        // 0 -> 1 -> 2 -> 1
        assert_eq!(find_cycle(&[vec![1], vec![2], vec![1]]), Some(vec![1, 2]));
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        let g = vec![vec![1, 2], vec![3], vec![3], vec![]];
        assert_eq!(find_cycle(&g), None);
        assert_eq!(depths(&g), vec![3, 2, 2, 1]);
    }

    #[test]
    fn depth_of_chain() {
        let g = vec![vec![1], vec![2], vec![]];
        assert_eq!(depths(&g), vec![3, 2, 1]);
    }

    #[test]
    fn very_long_chain_does_not_exhaust_the_stack() {
        const LEN: usize = 200_000;
        let g: Vec<Vec<usize>> = (0..LEN)
            .map(|i| if i + 1 < LEN { vec![i + 1] } else { vec![] })
            .collect();
        assert_eq!(find_cycle(&g), None);
        let d = depths(&g);
        assert_eq!(d[0], LEN);
        assert_eq!(d[LEN - 1], 1);
    }

    #[test]
    fn depth_of_shared_leaf_reached_from_later_root() {
        // 2 -> 0 -> 1, and 2 -> 1 directly
        let g = vec![vec![1], vec![], vec![0, 1]];
        assert_eq!(depths(&g), vec![2, 1, 3]);
    }
}
