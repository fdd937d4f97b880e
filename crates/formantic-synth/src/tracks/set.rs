//! Named collections of tracks that play concurrently.

use std::collections::BTreeMap;
use std::time::Duration;

use super::{mix_into, ToneTrack, Track, TrackNode};

/// A composite track owning named children.
///
/// Children run side by side: the set lasts as long as its longest child and
/// renders to the sum of every child. Children are kept in name order so the
/// summation order is fixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSet {
    children: BTreeMap<String, TrackNode>,
}

impl TrackSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a child, builder style.
    pub fn with(mut self, name: impl Into<String>, track: impl Into<TrackNode>) -> Self {
        self.insert(name, track);
        self
    }

    /// Adds or replaces a child.
    pub fn insert(&mut self, name: impl Into<String>, track: impl Into<TrackNode>) {
        self.children.insert(name.into(), track.into());
    }

    /// Returns a child by name.
    pub fn get(&self, name: &str) -> Option<&TrackNode> {
        self.children.get(name)
    }

    /// Returns a child by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut TrackNode> {
        self.children.get_mut(name)
    }

    /// Returns a tone child by name.
    pub fn tone(&self, name: &str) -> Option<&ToneTrack> {
        self.get(name).and_then(TrackNode::as_tone)
    }

    /// Returns a tone child by name, mutably.
    pub fn tone_mut(&mut self, name: &str) -> Option<&mut ToneTrack> {
        self.get_mut(name).and_then(TrackNode::as_tone_mut)
    }

    /// Returns a nested set by name.
    pub fn set(&self, name: &str) -> Option<&TrackSet> {
        self.get(name).and_then(TrackNode::as_set)
    }

    /// Returns a nested set by name, mutably.
    pub fn set_mut(&mut self, name: &str) -> Option<&mut TrackSet> {
        self.get_mut(name).and_then(TrackNode::as_set_mut)
    }

    /// Child names in iteration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Iterates over children.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrackNode)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if the set has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// A view over every child except `names`.
    pub fn exclude<'a>(&'a mut self, names: &[&str]) -> ExcludedTracks<'a> {
        let excluded = names.iter().map(|name| name.to_string()).collect();
        ExcludedTracks {
            set: self,
            excluded,
        }
    }

    /// Pads every child, recursively, to the set's duration.
    ///
    /// Shorter children are continued with their current sound, so rendered
    /// content up to their old end is unchanged.
    pub fn even_out(&mut self) {
        let duration = self.duration();
        self.pad_to(duration);
    }

    pub(crate) fn pad_to(&mut self, duration: Duration) {
        for child in self.children.values_mut() {
            match child {
                TrackNode::Set(set) => set.pad_to(duration),
                other => {
                    let own = other.duration();
                    if own < duration {
                        other.continue_for(duration - own);
                    }
                }
            }
        }
    }

    /// Visits every leaf with its slash-separated path (e.g. `"Turbulence/H/F1"`).
    pub fn for_each_leaf_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&str, &mut TrackNode),
    {
        self.visit_leaves("", f);
    }

    fn visit_leaves<F>(&mut self, prefix: &str, f: &mut F)
    where
        F: FnMut(&str, &mut TrackNode),
    {
        for (name, child) in self.children.iter_mut() {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", prefix, name)
            };
            match child {
                TrackNode::Set(set) => set.visit_leaves(&path, f),
                leaf => f(&path, leaf),
            }
        }
    }
}

impl Track for TrackSet {
    fn duration(&self) -> Duration {
        self.children
            .values()
            .map(Track::duration)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    fn continue_for(&mut self, duration: Duration) {
        for child in self.children.values_mut() {
            child.continue_for(duration);
        }
    }

    fn volume(&self) -> f64 {
        if self.children.is_empty() {
            return 0.0;
        }
        let total: f64 = self.children.values().map(Track::volume).sum();
        total / self.children.len() as f64
    }

    fn adjust_volume(&mut self, volume: f64, duration: Duration) {
        for child in self.children.values_mut() {
            child.adjust_volume(volume, duration);
        }
    }

    fn render(&self, sample_rate: u32) -> Vec<f64> {
        let mut mixed = Vec::new();
        for child in self.children.values() {
            mix_into(&mut mixed, &child.render(sample_rate));
        }
        mixed
    }
}

impl FromIterator<(String, TrackNode)> for TrackSet {
    fn from_iter<I: IntoIterator<Item = (String, TrackNode)>>(iter: I) -> Self {
        Self {
            children: iter.into_iter().collect(),
        }
    }
}

/// Mutable view of a [`TrackSet`] with some children hidden.
///
/// Broadcast operations skip the excluded children.
#[derive(Debug)]
pub struct ExcludedTracks<'a> {
    set: &'a mut TrackSet,
    excluded: Vec<String>,
}

impl ExcludedTracks<'_> {
    fn for_each_visible<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut TrackNode),
    {
        for (name, node) in self.set.children.iter_mut() {
            if !self.excluded.contains(name) {
                f(node);
            }
        }
    }

    /// Names of the visible children.
    pub fn names(&self) -> Vec<&str> {
        self.set
            .names()
            .filter(|name| !self.excluded.iter().any(|e| e.as_str() == *name))
            .collect()
    }

    /// Extends every visible child.
    pub fn continue_for(&mut self, duration: Duration) {
        self.for_each_visible(|child| child.continue_for(duration));
    }

    /// Ramps every visible child's volume.
    pub fn adjust_volume(&mut self, volume: f64, duration: Duration) {
        self.for_each_visible(|child| child.adjust_volume(volume, duration));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn sample_set() -> TrackSet {
        TrackSet::new()
            .with("A", ToneTrack::new(100.0, 0.2, 0.0))
            .with("B", ToneTrack::new(200.0, 0.4, 0.0))
            .with(
                "Nested",
                TrackSet::new().with("C", ToneTrack::new(300.0, 0.0, 0.0)),
            )
    }

    #[test]
    fn test_duration_is_max_not_sum() {
        let mut set = sample_set();
        set.tone_mut("A").unwrap().continue_for(ms(30));
        set.tone_mut("B").unwrap().continue_for(ms(50));
        assert_eq!(set.duration(), ms(50));
    }

    #[test]
    fn test_empty_set() {
        let set = TrackSet::new();
        assert_eq!(set.duration(), Duration::ZERO);
        assert_eq!(set.volume(), 0.0);
        assert!(set.render(44_100).is_empty());
    }

    #[test]
    fn test_volume_is_average() {
        let set = sample_set();
        // (0.2 + 0.4 + 0.0) / 3
        assert!((set.volume() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_even_out_pads_nested_children() {
        let mut set = sample_set();
        set.tone_mut("B").unwrap().adjust_volume(0.0, ms(40));
        set.even_out();
        assert_eq!(set.tone("A").unwrap().duration(), ms(40));
        assert_eq!(set.set("Nested").unwrap().tone("C").unwrap().duration(), ms(40));
    }

    #[test]
    fn test_exclude_skips_named_children() {
        let mut set = sample_set();
        set.exclude(&["A"]).adjust_volume(0.0, ms(10));
        assert_eq!(set.tone("A").unwrap().volume(), 0.2);
        assert_eq!(set.tone("A").unwrap().duration(), Duration::ZERO);
        assert_eq!(set.tone("B").unwrap().volume(), 0.0);
        assert_eq!(set.duration(), ms(10));
    }

    #[test]
    fn test_exclude_view_names() {
        let mut set = sample_set();
        let view = set.exclude(&["B", "Missing"]);
        assert_eq!(view.names(), vec!["A", "Nested"]);
    }

    #[test]
    fn test_render_zero_pads_shorter_children() {
        let mut set = TrackSet::new()
            .with("Long", ToneTrack::new(1_000.0, 0.5, 0.0))
            .with("Short", ToneTrack::new(1_000.0, 0.5, 0.0));
        set.tone_mut("Long").unwrap().continue_for(ms(4));
        set.tone_mut("Short").unwrap().continue_for(ms(2));

        let rendered = set.render(8_000);
        let long = set.tone("Long").unwrap().render(8_000);
        let short = set.tone("Short").unwrap().render(8_000);
        assert_eq!(rendered.len(), 32);
        for i in 0..rendered.len() {
            let expected = long[i] + short.get(i).copied().unwrap_or(0.0);
            assert!((rendered[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_leaf_paths() {
        let mut set = sample_set();
        let mut paths = Vec::new();
        set.for_each_leaf_mut(&mut |path: &str, _: &mut TrackNode| {
            paths.push(path.to_string())
        });
        assert_eq!(paths, vec!["A", "B", "Nested/C"]);
    }
}
