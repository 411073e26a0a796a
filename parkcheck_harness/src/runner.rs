//! Story runner - replays conformance stories against a live server.

use crate::stories::StoryId;
use parkcheck_client::{CheckError, ParkClient};
use parkcheck_model::{
    ranked_by_force, ApiErrorKind, Dinosaur, Gender, ResourceAdjustment, ResourceBundle,
    ResourceSnapshot, Species,
};
use tracing::info;

/// Outcome of a single story.
///
/// A `Failed` story hit an assertion mismatch; an `Errored` one hit any
/// other fault, such as an unreachable server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryOutcome {
    Passed,
    Failed(String),
    Errored(String),
}

impl StoryOutcome {
    /// Returns true only for a pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, StoryOutcome::Passed)
    }

    /// Returns the outcome label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            StoryOutcome::Passed => "PASSED",
            StoryOutcome::Failed(_) => "FAILED",
            StoryOutcome::Errored(_) => "ERRORED",
        }
    }

    /// Returns the failure or error detail, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            StoryOutcome::Passed => None,
            StoryOutcome::Failed(reason) | StoryOutcome::Errored(reason) => Some(reason),
        }
    }
}

/// Result of running one story.
#[derive(Debug, Clone)]
pub struct StoryReport {
    /// Story that was run
    pub story: StoryId,

    /// How it went
    pub outcome: StoryOutcome,
}

/// Runs conformance stories.
pub struct StoryRunner {
    client: ParkClient,
}

impl StoryRunner {
    /// Creates a runner targeting the server at `endpoint`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: ParkClient::new(endpoint),
        }
    }

    /// Runs a story and returns its report. A fault inside the story is
    /// folded into the report, so the caller can always continue with
    /// the next story.
    pub async fn run(&self, story: StoryId) -> StoryReport {
        info!("Starting story: {}", story.name());

        let result = match story {
            StoryId::TurnCounterReset => self.run_turn_counter_reset().await,
            StoryId::MultiTurnReset => self.run_multi_turn_reset().await,
            StoryId::ResourceDelivery => self.run_resource_delivery().await,
            StoryId::DinosaurValidation => self.run_dinosaur_validation().await,
            StoryId::FeedingAndSurvival => self.run_feeding_and_survival().await,
            StoryId::ResourceExpiration => self.run_resource_expiration().await,
            StoryId::MinimalConsumption => self.run_minimal_consumption().await,
        };

        let outcome = match result {
            Ok(()) => StoryOutcome::Passed,
            Err(fault) if fault.is_assertion() => StoryOutcome::Failed(fault.to_string()),
            Err(fault) => StoryOutcome::Errored(fault.to_string()),
        };
        StoryReport { story, outcome }
    }

    /// Story 0: the turn counter restarts at 1 after a reset.
    async fn run_turn_counter_reset(&self) -> Result<(), CheckError> {
        self.client.heartbeat().await?;
        self.client.reset().await?;
        self.client.advance_turn(1).await?;
        self.client.reset().await?;
        self.client.advance_turn(1).await?;
        Ok(())
    }

    /// Story 1: turns advance one by one and a reset rewinds the counter.
    async fn run_multi_turn_reset(&self) -> Result<(), CheckError> {
        self.client.heartbeat().await?;
        self.client.reset().await?;
        for turn in 1..=4 {
            self.client.advance_turn(turn).await?;
        }
        self.client.reset().await?;
        self.client.advance_turn(1).await?;
        Ok(())
    }

    /// Story 2: a delivery stays invisible until the next turn, joins the
    /// scheduled shipment, and expires two turns after going on display.
    async fn run_resource_delivery(&self) -> Result<(), CheckError> {
        self.client.reset().await?;

        let delivery = ResourceAdjustment::new(Some(1), None, None)?;
        self.client.adjust_resources(&delivery, None).await?;
        self.client
            .read_resources(&ResourceSnapshot::empty())
            .await?;

        self.client.advance_turn(1).await?;
        self.client
            .read_resources(&ResourceSnapshot::new(
                ResourceBundle::new(101, 250, 10_000),
                ResourceBundle::zero(),
                ResourceBundle::zero(),
            ))
            .await?;

        for turn in 2..=5 {
            self.client.advance_turn(turn).await?;
        }
        self.client
            .read_resources(&ResourceSnapshot::new(
                ResourceBundle::new(400, 750, 50_000),
                ResourceBundle::new(101, 500, 0),
                ResourceBundle::zero(),
            ))
            .await?;
        Ok(())
    }

    /// Story 3: creation validation and the ranked listing.
    ///
    /// New animals only show up in the park once a turn has elapsed, and
    /// the listing reports them strongest first.
    async fn run_dinosaur_validation(&self) -> Result<(), CheckError> {
        let alpha = Dinosaur::new("Alpha", 1000, Gender::Male, Species::Allosaurus);
        let bravo = Dinosaur::new("Bravo", 2000, Gender::Female, Species::TyrannosaurusRex);
        let charlie = Dinosaur::new("Charlie", 3000, Gender::Male, Species::Triceratops);

        self.client.heartbeat().await?;
        self.client.reset().await?;
        self.client.read_dinosaurs(&[]).await?;

        self.client.create_dinosaur(&alpha, None).await?;
        self.client.read_dinosaurs(&[]).await?;
        self.client.advance_turn(1).await?;
        self.client.read_dinosaur(&alpha).await?;
        self.client.read_dinosaurs(&[alpha.clone()]).await?;

        let bad_gender = Dinosaur::new("Alpha", 1000, Gender::Invalid, Species::Allosaurus);
        let bad_weight = Dinosaur::new("Alpha", -1000, Gender::Male, Species::Allosaurus);
        let bad_species = Dinosaur::new("Alpha", 1000, Gender::Male, Species::Invalid);
        self.client
            .create_dinosaur(&bad_gender, Some(ApiErrorKind::InvalidGender))
            .await?;
        self.client
            .create_dinosaur(&bad_weight, Some(ApiErrorKind::InvalidWeight))
            .await?;
        self.client
            .create_dinosaur(&bad_species, Some(ApiErrorKind::InvalidSpecies))
            .await?;

        self.client.create_dinosaur(&bravo, None).await?;
        self.client.create_dinosaur(&charlie, None).await?;
        self.client.read_dinosaurs(&[alpha.clone()]).await?;
        self.client.advance_turn(2).await?;

        let ranked = ranked_by_force(vec![alpha.clone(), bravo, charlie]);
        self.client.read_dinosaurs(&ranked).await?;
        self.client
            .create_dinosaur(&alpha, Some(ApiErrorKind::DuplicateName))
            .await?;
        self.client.read_dinosaurs(&ranked).await?;
        self.client.advance_turn(3).await?;
        Ok(())
    }

    /// Story 4: fifteen turns of feeding and starvation.
    ///
    /// Tracks the full resource ledger while the park feeds one, then
    /// three, then one animal, and finally stands empty.
    async fn run_feeding_and_survival(&self) -> Result<(), CheckError> {
        // Once the park is empty the consumed column freezes and only
        // production and aging move the ledger.
        const AFTERMATH: [(u32, (u32, u32, u32), (u32, u32, u32)); 12] = [
            (4, (250, 702, 0), (0, 0, 0)),
            (5, (350, 802, 10_000), (0, 150, 0)),
            (6, (418, 802, 20_000), (32, 400, 0)),
            (7, (418, 802, 30_000), (132, 650, 0)),
            (8, (418, 802, 40_000), (232, 900, 0)),
            (9, (418, 802, 50_000), (332, 1_150, 0)),
            (10, (418, 802, 60_000), (432, 1_400, 0)),
            (11, (418, 802, 70_000), (532, 1_650, 0)),
            (12, (418, 802, 80_000), (632, 1_900, 0)),
            (13, (418, 802, 90_000), (732, 2_150, 0)),
            (14, (418, 802, 100_000), (832, 2_400, 0)),
            (15, (418, 802, 100_000), (932, 2_650, 10_000)),
        ];

        let alpha = Dinosaur::new("Alpha", 8000, Gender::Male, Species::Allosaurus);
        let bravo = Dinosaur::new("Bravo", 30_000, Gender::Female, Species::TyrannosaurusRex);
        let charlie = Dinosaur::new("Charlie", 40_000, Gender::Male, Species::Triceratops);

        self.client.reset().await?;
        self.client.create_dinosaur(&alpha, None).await?;
        self.client.advance_turn(1).await?;

        let restock = ResourceAdjustment::new(None, Some(2), Some(100_000))?;
        self.client.adjust_resources(&restock, None).await?;
        let burgers = ResourceAdjustment::new(Some(2), None, None)?;
        self.client.adjust_resources(&burgers, None).await?;
        self.client.create_dinosaur(&bravo, None).await?;
        self.client.create_dinosaur(&charlie, None).await?;

        // Alpha fed alone on the first turn.
        self.client
            .read_resources(&ResourceSnapshot::new(
                ResourceBundle::new(84, 250, 400),
                ResourceBundle::zero(),
                ResourceBundle::new(16, 0, 9_600),
            ))
            .await?;
        self.client.read_dinosaurs(&[alpha.clone()]).await?;

        // All three feed on the second.
        self.client.advance_turn(2).await?;
        self.client
            .read_resources(&ResourceSnapshot::new(
                ResourceBundle::new(118, 302, 21_600),
                ResourceBundle::zero(),
                ResourceBundle::new(84, 200, 98_400),
            ))
            .await?;
        let herd = ranked_by_force(vec![alpha, bravo.clone(), charlie]);
        self.client.read_dinosaurs(&herd).await?;

        // The water shortage on the third turn kills everyone but Bravo.
        self.client.advance_turn(3).await?;
        self.client
            .read_resources(&ResourceSnapshot::new(
                ResourceBundle::new(180, 452, 0),
                ResourceBundle::zero(),
                ResourceBundle::new(122, 300, 130_000),
            ))
            .await?;
        self.client.read_dinosaurs(&[bravo]).await?;

        for (turn, fresh, expired) in AFTERMATH {
            self.client.advance_turn(turn).await?;
            self.client
                .read_resources(&ResourceSnapshot::new(
                    ResourceBundle::new(fresh.0, fresh.1, fresh.2),
                    ResourceBundle::new(expired.0, expired.1, expired.2),
                    ResourceBundle::new(152, 300, 140_000),
                ))
                .await?;
            self.client.read_dinosaurs(&[]).await?;
        }
        Ok(())
    }

    /// Story 5: stock that nobody eats expires on schedule.
    async fn run_resource_expiration(&self) -> Result<(), CheckError> {
        self.client.reset().await?;
        for turn in 1..=11 {
            self.client.advance_turn(turn).await?;
        }
        self.client
            .read_resources(&ResourceSnapshot::new(
                ResourceBundle::new(400, 750, 100_000),
                ResourceBundle::new(700, 2_000, 10_000),
                ResourceBundle::zero(),
            ))
            .await?;
        Ok(())
    }

    /// Story 6: the smallest dinosaurs still draw a full ration.
    async fn run_minimal_consumption(&self) -> Result<(), CheckError> {
        let alpha = Dinosaur::new("Alpha", 1, Gender::Male, Species::Allosaurus);
        let charlie = Dinosaur::new("Charlie", 1, Gender::Male, Species::Triceratops);

        self.client.reset().await?;
        self.client.create_dinosaur(&alpha, None).await?;
        self.client.create_dinosaur(&charlie, None).await?;
        self.client.advance_turn(1).await?;
        self.client
            .read_resources(&ResourceSnapshot::new(
                ResourceBundle::new(98, 248, 9_996),
                ResourceBundle::zero(),
                ResourceBundle::new(2, 2, 4),
            ))
            .await?;
        self.client.read_dinosaurs(&[alpha, charlie]).await?;
        Ok(())
    }
}
