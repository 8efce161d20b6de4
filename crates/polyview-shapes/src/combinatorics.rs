//! Permutations, sign patterns and binary trees used by the generators.

/// All distinct permutations of `items`, in lexicographic order.
///
/// Repeated values produce each arrangement once, so the orbit of
/// `[1, 2, 2, 3]` has 12 elements rather than 24.
pub fn permutations(items: &[f64]) -> Vec<Vec<f64>> {
    let mut current = items.to_vec();
    current.sort_by(|a, b| a.total_cmp(b));
    let mut out = vec![current.clone()];
    while next_permutation(&mut current) {
        out.push(current.clone());
    }
    out
}

fn next_permutation(v: &mut [f64]) -> bool {
    let Some(i) = (1..v.len()).rev().find(|&i| v[i - 1] < v[i]) else {
        return false;
    };
    let pivot = i - 1;
    let Some(j) = (i..v.len()).rev().find(|&j| v[j] > v[pivot]) else {
        return false;
    };
    v.swap(pivot, j);
    v[i..].reverse();
    true
}

/// Every permutation of `items` combined with every sign pattern.
///
/// Zero entries are not doubled, so `(0, 1)` yields four points, not eight.
pub fn signed_permutations(items: &[f64]) -> Vec<Vec<f64>> {
    let mut out: Vec<Vec<f64>> = Vec::new();
    for perm in permutations(items) {
        for signed in sign_patterns(&perm) {
            if !out.contains(&signed) {
                out.push(signed);
            }
        }
    }
    out
}

/// `v` with every combination of signs applied to its non-zero entries.
pub fn sign_patterns(v: &[f64]) -> Vec<Vec<f64>> {
    let mut out = vec![Vec::with_capacity(v.len())];
    for &x in v {
        if x == 0.0 {
            out.iter_mut().for_each(|p| p.push(0.0));
            continue;
        }
        out = out
            .into_iter()
            .flat_map(|p| {
                let mut neg = p.clone();
                let mut pos = p;
                pos.push(x);
                neg.push(-x);
                [pos, neg]
            })
            .collect();
    }
    out
}

/// Cyclic shifts of a 3-vector: `(a, b, c)`, `(b, c, a)`, `(c, a, b)`.
pub fn cyclic_shifts(v: [f64; 3]) -> [[f64; 3]; 3] {
    [v, [v[1], v[2], v[0]], [v[2], v[0], v[1]]]
}

/// A full binary tree: every internal node has exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryTree {
    Leaf,
    Node(Box<BinaryTree>, Box<BinaryTree>),
}

impl BinaryTree {
    pub fn leaves(&self) -> usize {
        match self {
            BinaryTree::Leaf => 1,
            BinaryTree::Node(l, r) => l.leaves() + r.leaves(),
        }
    }

    /// Internal nodes in inorder (left subtree, node, right subtree).
    pub fn internal_nodes(&self) -> Vec<&BinaryTree> {
        let mut out = Vec::new();
        self.collect_inorder(&mut out);
        out
    }

    fn collect_inorder<'a>(&'a self, out: &mut Vec<&'a BinaryTree>) {
        if let BinaryTree::Node(l, r) = self {
            l.collect_inorder(out);
            out.push(self);
            r.collect_inorder(out);
        }
    }

    /// Loday coordinates: for each internal node in inorder, the product of
    /// the leaf counts of its two subtrees.
    pub fn loday_vector(&self) -> Vec<f64> {
        self.internal_nodes()
            .into_iter()
            .filter_map(|n| match n {
                BinaryTree::Node(l, r) => Some((l.leaves() * r.leaves()) as f64),
                BinaryTree::Leaf => None,
            })
            .collect()
    }
}

/// All full binary trees with `leaves` leaves (a Catalan number of them).
pub fn full_binary_trees(leaves: usize) -> Vec<BinaryTree> {
    match leaves {
        0 => Vec::new(),
        1 => vec![BinaryTree::Leaf],
        n => {
            let mut out = Vec::new();
            for left in 1..n {
                for l in full_binary_trees(left) {
                    for r in full_binary_trees(n - left) {
                        out.push(BinaryTree::Node(Box::new(l.clone()), Box::new(r)));
                    }
                }
            }
            out
        }
    }
}
