//! Threshold-graph clustering.
//!
//! Edge `(i, j)` iff `cosine(vᵢ, vⱼ) >= threshold`. Connected components are
//! found with union-find (union by size, iterative path compression).
//! O(n²) comparisons; the trend window never exceeds 30 records.

use std::collections::HashMap;

use crate::similarity::cosine_similarity;

/// Disjoint-set forest over `0..n`.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Root of `x`. Every node on the walked path is re-pointed at the root.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets holding `a` and `b`. Returns false if already merged.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }

    /// Components as lists of member indices, each list ascending, the lists
    /// ordered by their first member.
    pub fn components(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        let mut components: Vec<Vec<usize>> = Vec::new();
        for i in 0..n {
            let root = self.find(i);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[slot].push(i);
        }
        components
    }
}

/// Result of clustering one window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterSummary {
    /// Member indices per component, ordered by first member.
    pub clusters: Vec<Vec<usize>>,
    /// Index into `clusters` of the largest component. `None` for empty input.
    pub dominant: Option<usize>,
    /// Labels of the largest component, in input order.
    pub dominant_labels: Vec<String>,
    pub cluster_count: usize,
    /// `|dominant| / |total|`, 0.0 for empty input.
    pub dominant_ratio: f64,
}

impl ClusterSummary {
    /// Input indices of the dominant component.
    pub fn dominant_members(&self) -> &[usize] {
        self.dominant
            .and_then(|d| self.clusters.get(d))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Group connected components of the similarity graph over `vectors`.
pub fn cluster_indices(vectors: &[&[f32]], threshold: f64) -> Vec<Vec<usize>> {
    let n = vectors.len();
    let mut uf = UnionFind::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if cosine_similarity(vectors[i], vectors[j]) >= threshold {
                uf.union(i, j);
            }
        }
    }
    uf.components()
}

/// Cluster `(label, vector)` pairs and pick the dominant component.
///
/// Ties for largest go to the component whose first member comes first.
pub fn cluster_labels(items: &[(String, Vec<f32>)], threshold: f64) -> ClusterSummary {
    if items.is_empty() {
        return ClusterSummary::default();
    }

    let vectors: Vec<&[f32]> = items.iter().map(|(_, v)| v.as_slice()).collect();
    let clusters = cluster_indices(&vectors, threshold);

    // Components are ordered by first member, so a strict `>` keeps the earliest on ties.
    let mut dominant = 0;
    for (idx, cluster) in clusters.iter().enumerate() {
        if cluster.len() > clusters[dominant].len() {
            dominant = idx;
        }
    }

    let dominant_labels = clusters[dominant]
        .iter()
        .map(|&i| items[i].0.clone())
        .collect();
    let dominant_ratio = clusters[dominant].len() as f64 / items.len() as f64;

    ClusterSummary {
        cluster_count: clusters.len(),
        clusters,
        dominant: Some(dominant),
        dominant_labels,
        dominant_ratio,
    }
}
