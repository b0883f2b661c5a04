//! Frequency tally of a snapshot and the opacity mapping used by the grid.

use super::emotions::{index_of, Quadrant, EMOTIONS, EMOTION_COUNT, GRID_SIDE};
use super::entry::MoodEntry;

/// Opacity of a cell nobody picked, so the whole meter stays visible.
pub const MIN_OPACITY: f64 = 0.1;

/// Render-ready description of one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub index: usize,
    pub label: &'static str,
    pub frequency: u32,
    pub opacity: f64,
    pub quadrant: Quadrant,
}

impl GridCell {
    pub fn row(&self) -> usize {
        self.index / GRID_SIDE
    }

    pub fn col(&self) -> usize {
        self.index % GRID_SIDE
    }

    pub fn background(&self) -> String {
        self.quadrant.rgba(self.opacity)
    }
}

/// Per-label frequencies for one snapshot. Recomputed from scratch on every
/// snapshot; it has no identity of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionGrid {
    frequencies: [u32; EMOTION_COUNT],
    max_frequency: u32,
    total_entries: usize,
    unrecognized: usize,
}

impl Default for EmotionGrid {
    fn default() -> Self {
        Self {
            frequencies: [0; EMOTION_COUNT],
            max_frequency: 1,
            total_entries: 0,
            unrecognized: 0,
        }
    }
}

impl EmotionGrid {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a MoodEntry>,
    {
        let mut grid = Self::default();

        for entry in entries {
            grid.total_entries += 1;
            match index_of(&entry.mood) {
                Some(index) => {
                    grid.frequencies[index] = grid.frequencies[index].saturating_add(1);
                }
                None => grid.unrecognized += 1,
            }
        }

        // Guarded so an all-zero tally never divides by zero.
        grid.max_frequency = grid.frequencies.iter().copied().max().unwrap_or(0).max(1);
        grid
    }

    pub fn frequency(&self, label: &str) -> u32 {
        index_of(label).map_or(0, |index| self.frequencies[index])
    }

    pub fn frequency_at(&self, index: usize) -> u32 {
        self.frequencies.get(index).copied().unwrap_or(0)
    }

    pub fn max_frequency(&self) -> u32 {
        self.max_frequency
    }

    pub fn opacity(&self, label: &str) -> f64 {
        index_of(label).map_or(MIN_OPACITY, |index| self.opacity_at(index))
    }

    pub fn opacity_at(&self, index: usize) -> f64 {
        match self.frequency_at(index) {
            0 => MIN_OPACITY,
            frequency => frequency as f64 / self.max_frequency as f64,
        }
    }

    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    pub fn recognized_entries(&self) -> usize {
        self.total_entries - self.unrecognized
    }

    /// Entries whose mood is not one of the 100 grid labels.
    pub fn unrecognized_entries(&self) -> usize {
        self.unrecognized
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries == 0
    }

    pub fn cells(&self) -> Vec<GridCell> {
        EMOTIONS
            .iter()
            .enumerate()
            .map(|(index, label)| GridCell {
                index,
                label: *label,
                frequency: self.frequencies[index],
                opacity: self.opacity_at(index),
                quadrant: Quadrant::for_index(index),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(moods: &[&str]) -> Vec<MoodEntry> {
        moods
            .iter()
            .enumerate()
            .map(|(i, mood)| MoodEntry::new(format!("k{i}"), "abc123", *mood))
            .collect()
    }

    #[test]
    fn happy_happy_calm_scenario() {
        let snapshot = entries(&["Happy", "Happy", "Calm"]);
        let grid = EmotionGrid::from_entries(&snapshot);

        assert_eq!(grid.frequency("Happy"), 2);
        assert_eq!(grid.frequency("Calm"), 1);
        assert_eq!(grid.max_frequency(), 2);
        assert_eq!(grid.opacity("Happy"), 1.0);
        assert_eq!(grid.opacity("Calm"), 0.5);

        for label in EMOTIONS.iter().filter(|l| **l != "Happy" && **l != "Calm") {
            assert_eq!(grid.opacity(label), MIN_OPACITY, "{label}");
        }
    }

    #[test]
    fn frequencies_sum_to_recognized_entries() {
        let snapshot = entries(&[
            "Tense", "Tense", "Sleepy", "Proud", "At Ease", "Tense", "Serene",
        ]);
        let grid = EmotionGrid::from_entries(&snapshot);
        let sum: u32 = EMOTIONS.iter().map(|label| grid.frequency(label)).sum();

        assert_eq!(sum as usize, snapshot.len());
        assert_eq!(grid.recognized_entries(), snapshot.len());
    }

    #[test]
    fn most_frequent_label_is_fully_opaque() {
        let snapshot = entries(&["Sad", "Bored", "Bored", "Calm"]);
        let grid = EmotionGrid::from_entries(&snapshot);
        let full: Vec<_> = grid
            .cells()
            .into_iter()
            .filter(|cell| cell.opacity == 1.0)
            .map(|cell| cell.label)
            .collect();
        assert_eq!(full, vec!["Bored"]);
    }

    #[test]
    fn unknown_moods_are_counted_apart() {
        let snapshot = entries(&["Hungry", "happy", "Calm"]);
        let grid = EmotionGrid::from_entries(&snapshot);

        assert_eq!(grid.total_entries(), 3);
        assert_eq!(grid.unrecognized_entries(), 2);
        assert_eq!(grid.max_frequency(), 1);
        assert_eq!(grid.opacity("Calm"), 1.0);
        assert_eq!(grid.opacity("Hungry"), MIN_OPACITY);
    }

    #[test]
    fn empty_snapshot_keeps_max_guarded() {
        let none: Vec<MoodEntry> = Vec::new();
        let grid = EmotionGrid::from_entries(&none);
        assert!(grid.is_empty());
        assert_eq!(grid.max_frequency(), 1);
        assert!(grid.cells().iter().all(|cell| cell.opacity == MIN_OPACITY));
    }

    #[test]
    fn colours_are_stable_across_recomputations() {
        let snapshot = entries(&["Happy", "Enraged", "Serene"]);
        let first = EmotionGrid::from_entries(&snapshot).cells();
        let second = EmotionGrid::from_entries(&snapshot).cells();

        assert_eq!(first, second);
        assert_eq!(first[0].background(), "rgba(255,0,0,1)");
        assert_eq!(first[37].background(), "rgba(255,255,0,1)");
        assert_eq!(first[99].background(), "rgba(0,128,0,1)");
        assert_eq!(first[50].background(), "rgba(0,0,255,0.1)");
        assert_eq!((first[37].row(), first[37].col()), (3, 7));
    }
}
