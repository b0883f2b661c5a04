//! The fixed mood meter layout: 100 emotion labels on a 10×10 grid, split into
//! four energy/pleasantness quadrants.

use std::collections::HashMap;

use dioxus::logger::tracing::error;
use once_cell::sync::Lazy;

/// Cells per grid row (and rows per grid).
pub const GRID_SIDE: usize = 10;

/// Number of emotion labels on the meter.
pub const EMOTION_COUNT: usize = GRID_SIDE * GRID_SIDE;

/// Emotion labels in row-major grid order.
///
/// Rows 0–4 are high energy, rows 5–9 low energy; columns 0–4 unpleasant,
/// columns 5–9 pleasant.
#[rustfmt::skip]
pub const EMOTIONS: [&str; EMOTION_COUNT] = [
    "Enraged", "Panicked", "Stressed", "Jittery", "Shocked", "Surprised", "Upbeat", "Festive", "Exhilarated", "Ecstatic",
    "Livid", "Furious", "Frustrated", "Tense", "Stunned", "Hyper", "Cheerful", "Motivated", "Inspired", "Elated",
    "Fuming", "Frightened", "Angry", "Nervous", "Restless", "Energized", "Lively", "Excited", "Optimistic", "Enthusiastic",
    "Anxious", "Apprehensive", "Worried", "Irritated", "Annoyed", "Pleased", "Focused", "Happy", "Proud", "Thrilled",
    "Repulsed", "Troubled", "Concerned", "Uneasy", "Peeved", "Pleasant", "Joyful", "Hopeful", "Playful", "Blissful",
    "Disgusted", "Glum", "Disappointed", "Down", "Apathetic", "At Ease", "Easygoing", "Content", "Loving", "Fulfilled",
    "Pessimistic", "Morose", "Discouraged", "Sad", "Bored", "Calm", "Secure", "Satisfied", "Grateful", "Touched",
    "Alienated", "Miserable", "Lonely", "Disheartened", "Tired", "Relaxed", "Chill", "Restful", "Blessed", "Balanced",
    "Despondent", "Depressed", "Sullen", "Exhausted", "Fatigued", "Mellow", "Thoughtful", "Peaceful", "Comfortable", "Carefree",
    "Despairing", "Hopeless", "Desolate", "Spent", "Drained", "Sleepy", "Complacent", "Tranquil", "Cozy", "Serene",
];

static INDEX_BY_LABEL: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    EMOTIONS
        .iter()
        .enumerate()
        .map(|(index, label)| (*label, index))
        .collect()
});

/// Grid position of `label`, if it is one of the known emotions (exact match).
pub fn index_of(label: &str) -> Option<usize> {
    INDEX_BY_LABEL.get(label).copied()
}

/// Colour family of a grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// High energy, unpleasant.
    Red,
    /// High energy, pleasant.
    Yellow,
    /// Low energy, unpleasant.
    Blue,
    /// Low energy, pleasant.
    Green,
    /// Outside the 10×10 layout. Only reachable through a layout bug.
    Unmapped,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Red,
        Quadrant::Yellow,
        Quadrant::Blue,
        Quadrant::Green,
    ];

    pub fn for_index(index: usize) -> Self {
        if index >= EMOTION_COUNT {
            error!("grid index {index} lies outside the {GRID_SIDE}x{GRID_SIDE} mood meter");
            return Self::Unmapped;
        }

        let half = GRID_SIDE / 2;
        let high_energy = index / GRID_SIDE < half;
        let unpleasant = index % GRID_SIDE < half;

        match (high_energy, unpleasant) {
            (true, true) => Self::Red,
            (true, false) => Self::Yellow,
            (false, true) => Self::Blue,
            (false, false) => Self::Green,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Red => (255, 0, 0),
            Self::Yellow => (255, 255, 0),
            Self::Blue => (0, 0, 255),
            Self::Green => (0, 128, 0),
            Self::Unmapped => (255, 255, 255),
        }
    }

    /// CSS `rgba(...)` colour with the given alpha (clamped to `0..=1`).
    pub fn rgba(self, alpha: f64) -> String {
        let (r, g, b) = self.rgb();
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        format!("rgba({r},{g},{b},{alpha})")
    }

    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Red => "mood-grid__cell--red",
            Self::Yellow => "mood-grid__cell--yellow",
            Self::Blue => "mood-grid__cell--blue",
            Self::Green => "mood-grid__cell--green",
            Self::Unmapped => "mood-grid__cell--unmapped",
        }
    }
}
