//! Canned health tips served over SMS

use rand::seq::IndexedRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipCategory {
    General,
    Nutrition,
    Exercise,
}

pub const GENERAL_TIPS: [&str; 5] = [
    "Drink at least 8 glasses of water daily to stay hydrated.",
    "Include fruits and vegetables in every meal for essential vitamins.",
    "Regular handwashing helps prevent the spread of diseases.",
    "Aim for at least 30 minutes of physical activity daily.",
    "Ensure you get 7-8 hours of sleep for proper rest and recovery.",
];

pub const NUTRITION_TIPS: [&str; 5] = [
    "Eat a variety of colorful fruits and vegetables daily.",
    "Choose whole grains over refined grains for more nutrients.",
    "Include protein sources like beans, fish, or lean meat in your diet.",
    "Limit processed foods high in salt, sugar, and unhealthy fats.",
    "Small, frequent meals can help maintain energy throughout the day.",
];

pub const EXERCISE_TIPS: [&str; 5] = [
    "Start with a 10-minute walk daily and gradually increase duration.",
    "Incorporate strength training exercises at least twice a week.",
    "Stretching improves flexibility and reduces risk of injury.",
    "Find activities you enjoy to make exercise a sustainable habit.",
    "Exercise with friends or family to stay motivated and accountable.",
];

impl TipCategory {
    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            TipCategory::General => &GENERAL_TIPS,
            TipCategory::Nutrition => &NUTRITION_TIPS,
            TipCategory::Exercise => &EXERCISE_TIPS,
        }
    }

    /// Pick one tip at random
    pub fn random_tip(&self) -> &'static str {
        self.tips()
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(GENERAL_TIPS[0])
    }
}
