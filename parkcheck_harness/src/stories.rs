//! The story catalog.

/// Story identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryId {
    /// Story 0: the turn counter restarts at 1 after a reset
    TurnCounterReset,

    /// Story 1: four turns advance in sequence, then a reset rewinds to 1
    MultiTurnReset,

    /// Story 2: a delivery rides the next shipment and expires on schedule
    ResourceDelivery,

    /// Story 3: creation validation and ranked listings across turn boundaries
    DinosaurValidation,

    /// Story 4: fifteen turns of feeding and starvation against a fixed ledger
    FeedingAndSurvival,

    /// Story 5: untouched stock ages out over eleven turns
    ResourceExpiration,

    /// Story 6: the smallest dinosaurs still draw a full ration
    MinimalConsumption,
}

impl StoryId {
    /// Returns every story in registration order. Positions in this list
    /// are the story indices the CLI accepts.
    pub fn all() -> Vec<StoryId> {
        vec![
            StoryId::TurnCounterReset,
            StoryId::MultiTurnReset,
            StoryId::ResourceDelivery,
            StoryId::DinosaurValidation,
            StoryId::FeedingAndSurvival,
            StoryId::ResourceExpiration,
            StoryId::MinimalConsumption,
        ]
    }

    /// Looks a story up by its registration index.
    pub fn from_index(index: usize) -> Option<StoryId> {
        StoryId::all().get(index).copied()
    }

    /// Returns the story name.
    pub fn name(&self) -> &'static str {
        match self {
            StoryId::TurnCounterReset => "turn_counter_reset",
            StoryId::MultiTurnReset => "multi_turn_reset",
            StoryId::ResourceDelivery => "resource_delivery",
            StoryId::DinosaurValidation => "dinosaur_validation",
            StoryId::FeedingAndSurvival => "feeding_and_survival",
            StoryId::ResourceExpiration => "resource_expiration",
            StoryId::MinimalConsumption => "minimal_consumption",
        }
    }

    /// Returns a description of the story.
    pub fn description(&self) -> &'static str {
        match self {
            StoryId::TurnCounterReset => "turn counter restarts at 1 after a reset",
            StoryId::MultiTurnReset => "four turns in sequence, then a reset rewinds to 1",
            StoryId::ResourceDelivery => {
                "a delivery rides the next shipment and expires on schedule"
            }
            StoryId::DinosaurValidation => {
                "creation validation and ranked listings across turn boundaries"
            }
            StoryId::FeedingAndSurvival => {
                "fifteen turns of feeding and starvation against a fixed ledger"
            }
            StoryId::ResourceExpiration => "untouched stock ages out over eleven turns",
            StoryId::MinimalConsumption => "the smallest dinosaurs still draw a full ration",
        }
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
