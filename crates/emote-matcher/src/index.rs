//! Arena-backed suffix index over emote names.
//!
//! Every suffix of every lower-cased emote name is inserted as a character
//! path, and the bookkeeping of each node along the path is updated. A node
//! reached by some path therefore holds every asset whose name contains
//! that path as a substring, which is what makes partial and substring
//! queries a plain walk from the root.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::AssetInfo;
use crate::matcher::MatchOptions;

const ROOT: usize = 0;

/// Bookkeeping for every insertion chain that has touched a node.
#[derive(Debug, Clone)]
struct NodeData {
    highest_priority: u32,
    /// Most-preferred asset first; never empty.
    assets: Vec<Arc<AssetInfo>>,
    /// True while exactly one insertion chain has reached this node;
    /// permanently false afterwards.
    unique_path: bool,
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: HashMap<char, usize>,
    data: Option<NodeData>,
}

/// Character trie of suffixes, stored as a flat arena.
///
/// Nodes are addressed by index so traversal is iterative; pathologically
/// long names cannot exhaust the stack.
#[derive(Debug, Clone)]
pub(crate) struct SuffixIndex {
    nodes: Vec<Node>,
}

impl SuffixIndex {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Index one asset under every suffix of its lower-cased name.
    pub(crate) fn insert_all_suffixes(&mut self, asset: &Arc<AssetInfo>, priority: u32) {
        let lowered: Vec<char> = asset.name.to_lowercase().chars().collect();
        for start in 0..lowered.len() {
            let mut node = ROOT;
            for &ch in &lowered[start..] {
                node = self.child_or_insert(node, ch);
                self.touch(node, asset, priority);
            }
        }
    }

    fn child_or_insert(&mut self, node: usize, ch: char) -> usize {
        if let Some(&child) = self.nodes[node].children.get(&ch) {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(Node::default());
        self.nodes[node].children.insert(ch, child);
        child
    }

    /// Record one insertion chain passing through `node`.
    ///
    /// A strictly higher priority puts the asset at the front of the list;
    /// anything else appends, so `assets[0]` is always the preferred match.
    fn touch(&mut self, node: usize, asset: &Arc<AssetInfo>, priority: u32) {
        match &mut self.nodes[node].data {
            None => {
                self.nodes[node].data = Some(NodeData {
                    highest_priority: priority,
                    assets: vec![Arc::clone(asset)],
                    unique_path: true,
                });
            }
            Some(data) => {
                data.unique_path = false;
                if priority > data.highest_priority {
                    data.highest_priority = priority;
                    data.assets.insert(0, Arc::clone(asset));
                } else {
                    data.assets.push(Arc::clone(asset));
                }
            }
        }
    }

    /// Walk the lower-cased query; `None` when the path is absent.
    fn descend(&self, lowered: &str) -> Option<usize> {
        let mut node = ROOT;
        for ch in lowered.chars() {
            node = *self.nodes[node].children.get(&ch)?;
        }
        Some(node)
    }

    fn data_at(&self, lowered: &str) -> Option<&NodeData> {
        self.nodes[self.descend(lowered)?].data.as_ref()
    }

    /// Best single match for a possibly partial, possibly miscased query.
    ///
    /// An exact-cased name beats a case-insensitive one, which beats plain
    /// ingestion priority: `Foo` typed as-is should win over a
    /// higher-priority `foo`.
    pub(crate) fn query_single(&self, query: &str) -> Option<Arc<AssetInfo>> {
        let lowered = query.to_lowercase();
        let data = self.data_at(&lowered)?;
        if let Some(asset) = data.assets.iter().find(|a| a.name == query) {
            return Some(Arc::clone(asset));
        }
        if let Some(asset) = data.assets.iter().find(|a| a.name.to_lowercase() == lowered) {
            return Some(Arc::clone(asset));
        }
        data.assets.first().map(Arc::clone)
    }

    /// Every asset whose name contains the query, filtered, sorted and
    /// re-ranked; `None` when nothing survives.
    pub(crate) fn query_array(
        &self,
        query: &str,
        options: &MatchOptions,
    ) -> Option<Vec<Arc<AssetInfo>>> {
        let lowered = query.to_lowercase();
        let terminal = self.descend(&lowered)?;

        // The terminal node's assets first (already priority-ordered), then
        // every completion below it. The same asset reaches a node once per
        // suffix of its name, so dedup by identity.
        let mut seen: HashSet<*const AssetInfo> = HashSet::new();
        let mut found: Vec<Arc<AssetInfo>> = Vec::new();
        let mut stack = vec![terminal];
        while let Some(node) = stack.pop() {
            if let Some(data) = &self.nodes[node].data {
                for asset in &data.assets {
                    if asset.name.to_lowercase().contains(&lowered)
                        && seen.insert(Arc::as_ptr(asset))
                    {
                        found.push(Arc::clone(asset));
                    }
                }
            }
            stack.extend(self.nodes[node].children.values().copied());
        }

        if let Some(platform) = options.platform {
            found.retain(|a| a.platform == platform);
        }
        if let Some(animated) = options.animated {
            found.retain(|a| a.animated == animated);
        }
        if let Some(zero_width) = options.zero_width {
            found.retain(|a| a.zero_width == zero_width);
        }

        if options.sort_by_date_added {
            // Newest first; undated assets sort after every dated one,
            // keeping their relative order.
            found.sort_by(|a, b| match (a.timestamp, b.timestamp) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        } else if options.sort_by_name {
            found.sort_by(|a, b| a.name.cmp(&b.name));
        }

        // Preferred matches move to the front: exact-cased name, then
        // case-insensitive exact name, then prefix matches. Pulling in
        // reverse keeps that sequence while each pull stays stable.
        pull_to_front(&mut found, |a| a.name.to_lowercase().starts_with(&lowered));
        pull_to_front(&mut found, |a| a.name.to_lowercase() == lowered);
        pull_to_front(&mut found, |a| a.name == query);

        if let Some(max) = options.max {
            found.truncate(max);
        }
        if found.is_empty() { None } else { Some(found) }
    }

    /// True iff the query's path has been reached by exactly one insertion
    /// chain, and that chain belongs to the emote named `full_name`.
    pub(crate) fn query_unique(&self, query: &str, full_name: &str) -> bool {
        match self.data_at(&query.to_lowercase()) {
            Some(data) => data.unique_path && data.assets[0].name == full_name,
            None => false,
        }
    }

    /// True iff some indexed asset's name equals the query byte-for-byte.
    pub(crate) fn query_exact(&self, query: &str) -> bool {
        self.data_at(&query.to_lowercase())
            .is_some_and(|data| data.assets.iter().any(|a| a.name == query))
    }

    /// Number of assets recorded at the query's node, duplicates included.
    #[cfg(test)]
    pub(crate) fn asset_count_at(&self, query: &str) -> usize {
        self.data_at(&query.to_lowercase())
            .map_or(0, |data| data.assets.len())
    }
}

/// Stable partition moving every matching asset to the front.
fn pull_to_front<F>(assets: &mut Vec<Arc<AssetInfo>>, pred: F)
where
    F: Fn(&AssetInfo) -> bool,
{
    let mut front = Vec::with_capacity(assets.len());
    let mut back = Vec::new();
    for asset in assets.drain(..) {
        if pred(&asset) {
            front.push(asset);
        } else {
            back.push(asset);
        }
    }
    front.extend(back);
    *assets = front;
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
