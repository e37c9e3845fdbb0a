//! Query target selection.
//!
//! Each selector maps a vertex count to one vertex so that every shape built
//! at a given size is queried from a comparable position.

use std::fmt;

use rand::Rng;

use crate::graph::{GENESIS, VertexId};

/// Named rule choosing the vertex a reachability query starts from.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TargetSelector {
    /// The newest vertex.
    Latest,
    /// The vertex halfway between genesis and the newest vertex.
    Middle,
    /// A vertex two steps above genesis.
    NearGenesis,
    /// A uniformly random non-genesis vertex.
    Random,
}

impl TargetSelector {
    /// Every selector in canonical order.
    pub const ALL: [Self; 4] = [Self::Latest, Self::Middle, Self::NearGenesis, Self::Random];

    /// Returns the stable identifier used in job names and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Middle => "middle",
            Self::NearGenesis => "near_genesis",
            Self::Random => "random",
        }
    }

    /// Parses the identifier returned by [`TargetSelector::as_str`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|selector| selector.as_str() == name)
    }

    /// Picks the target vertex for a graph of `vertex_count` vertices.
    ///
    /// Only [`TargetSelector::Random`] consumes randomness from `rng`.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use txdag_core::TargetSelector;
    ///
    /// let mut rng = SmallRng::seed_from_u64(0);
    /// assert_eq!(TargetSelector::Latest.select(6, &mut rng), 5);
    /// assert_eq!(TargetSelector::Middle.select(6, &mut rng), 2);
    /// assert_eq!(TargetSelector::NearGenesis.select(6, &mut rng), 2);
    /// ```
    pub fn select<R: Rng + ?Sized>(self, vertex_count: usize, rng: &mut R) -> VertexId {
        match self {
            Self::Latest => latest(vertex_count),
            Self::Middle => middle(vertex_count),
            Self::NearGenesis => near_genesis(vertex_count),
            Self::Random => random_target(vertex_count, rng),
        }
    }
}

impl fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest-indexed vertex, or genesis for genesis-only graphs.
#[must_use]
pub const fn latest(vertex_count: usize) -> VertexId {
    vertex_count.saturating_sub(1)
}

/// Vertex at `(n - 1) / 2`, or genesis for genesis-only graphs.
#[must_use]
pub const fn middle(vertex_count: usize) -> VertexId {
    vertex_count.saturating_sub(1) / 2
}

/// Vertex at `min(2, n - 1)`, or genesis for genesis-only graphs.
#[must_use]
pub const fn near_genesis(vertex_count: usize) -> VertexId {
    let last = vertex_count.saturating_sub(1);
    if last < 2 { last } else { 2 }
}

/// Uniformly random vertex in `1..n`, or genesis for genesis-only graphs.
pub fn random_target<R: Rng + ?Sized>(vertex_count: usize, rng: &mut R) -> VertexId {
    if vertex_count <= 1 {
        return GENESIS;
    }
    rng.gen_range(1..vertex_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[rstest]
    #[case::empty(0, 0, 0, 0)]
    #[case::genesis_only(1, 0, 0, 0)]
    #[case::two(2, 1, 0, 1)]
    #[case::three(3, 2, 1, 2)]
    #[case::six(6, 5, 2, 2)]
    #[case::thousand(1_000, 999, 499, 2)]
    fn deterministic_selectors(
        #[case] vertex_count: usize,
        #[case] expected_latest: VertexId,
        #[case] expected_middle: VertexId,
        #[case] expected_near: VertexId,
    ) {
        assert_eq!(latest(vertex_count), expected_latest);
        assert_eq!(middle(vertex_count), expected_middle);
        assert_eq!(near_genesis(vertex_count), expected_near);
    }

    #[test]
    fn every_selector_returns_genesis_for_genesis_only_graphs() {
        let mut rng = SmallRng::seed_from_u64(99);
        for selector in TargetSelector::ALL {
            assert_eq!(selector.select(1, &mut rng), GENESIS, "{selector}");
        }
    }

    #[test]
    fn random_target_never_picks_genesis() {
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..500 {
            let picked = random_target(3, &mut rng);
            assert!((1..3).contains(&picked));
        }
    }

    #[test]
    fn selector_names_round_trip() {
        for selector in TargetSelector::ALL {
            assert_eq!(TargetSelector::from_name(selector.as_str()), Some(selector));
        }
        assert_eq!(TargetSelector::from_name("oldest"), None);
    }
}
