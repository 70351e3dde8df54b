use alloc::vec::Vec;
use core::time::Duration;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    InProgress,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Feeds both hazard placement and cascade budgets.
    pub seed: u64,
    pub cascade: CascadeLimits,
}

impl SessionOptions {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// A single game from start to finish.
///
/// Victory requires collecting every reward; safe cells left hidden do not matter. Revealing a hazard loses the game
/// and surfaces every remaining hazard. Either way the timer freezes and no further moves are accepted.
#[derive(Clone, Debug)]
pub struct Session<C = InstantClock> {
    difficulty: Option<Difficulty>,
    grid: Grid,
    rng: SmallRng,
    cascade: CascadeLimits,
    clock: C,
    phase: Phase,
    rewards_collected: CellCount,
    total_rewards: CellCount,
    cells_revealed: CellCount,
    total_safe_cells: CellCount,
    started_at: Duration,
    ended_at: Option<Duration>,
    triggered_hazard: Option<Coord3>,
}

impl Session<InstantClock> {
    pub fn new_game(difficulty: Difficulty, options: SessionOptions) -> Result<Self> {
        Self::new_game_with_clock(difficulty, options, InstantClock::new())
    }
}

impl<C: Clock> Session<C> {
    pub fn new_game_with_clock(difficulty: Difficulty, options: SessionOptions, clock: C) -> Result<Self> {
        let mut session = Self::with_config(difficulty.config(), options, clock)?;
        session.difficulty = Some(difficulty);
        log::debug!("New {} game", difficulty);
        Ok(session)
    }

    /// Starts a game with an arbitrary shape, best times are not tracked for it.
    pub fn with_config(config: GameConfig, options: SessionOptions, clock: C) -> Result<Self> {
        let grid = ShuffleGenerator::new(options.seed).generate(config)?;
        Ok(Self::from_grid(grid, options, clock))
    }

    /// Starts a game on an already built grid.
    pub fn from_grid(grid: Grid, options: SessionOptions, clock: C) -> Self {
        use rand::prelude::*;

        let started_at = clock.now();
        log::debug!("started at {:?}", started_at);
        Self {
            difficulty: None,
            total_rewards: grid.reward_count(),
            total_safe_cells: grid.safe_cell_count(),
            grid,
            // separate stream from the placement shuffle
            rng: SmallRng::seed_from_u64(!options.seed),
            cascade: options.cascade,
            clock,
            phase: Phase::InProgress,
            rewards_collected: 0,
            cells_revealed: 0,
            started_at,
            ended_at: None,
            triggered_hazard: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn side(&self) -> Coord {
        self.grid.side()
    }

    pub fn rewards_collected(&self) -> CellCount {
        self.rewards_collected
    }

    pub fn total_rewards(&self) -> CellCount {
        self.total_rewards
    }

    pub fn cells_revealed(&self) -> CellCount {
        self.cells_revealed
    }

    pub fn total_safe_cells(&self) -> CellCount {
        self.total_safe_cells
    }

    pub fn triggered_hazard(&self) -> Option<Coord3> {
        self.triggered_hazard
    }

    /// What the player should see at `coords`; every hazard shows once the game is lost.
    pub fn cell_view(&self, coords: Coord3) -> Result<CellView> {
        let cell = self.grid.cell(coords).ok_or(GameError::OutOfBounds)?;
        Ok(match self.phase {
            Phase::Lost if cell.is_hazard() => CellView::Hazard,
            _ => cell.view(),
        })
    }

    /// Final hazard layout, only available once the game is over.
    pub fn hazard_layout(&self) -> Option<Vec<Coord3>> {
        self.phase
            .is_finished()
            .then(|| self.grid.hazard_coords())
    }

    /// Time since the game started, frozen once it ends.
    pub fn elapsed(&self) -> Duration {
        self.ended_at
            .unwrap_or_else(|| self.clock.now())
            .saturating_sub(self.started_at)
    }

    pub fn reveal(&mut self, coords: Coord3) -> Result<Reveal> {
        use RevealOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        if self.phase.is_finished() {
            return Err(GameError::AlreadyEnded);
        }

        let budget = self.cascade.sample(&mut self.rng);
        let mut reveal = self.grid.reveal(coords, budget)?;
        self.cells_revealed = self.cells_revealed.saturating_add(reveal.revealed_count());

        match reveal.outcome {
            HitHazard => {
                self.triggered_hazard = Some(coords);
                self.on_defeat();
                reveal.changes.extend(self.grid.exposed_hazards());
            }
            FoundReward => {
                self.rewards_collected += 1;
                self.check_victory();
            }
            RevealedEmpty(_) => {
                self.check_victory();
            }
            AlreadyRevealed => {}
        }

        Ok(reveal)
    }

    /// Ends the game as won once every reward is collected, returns whether the game is won.
    pub fn check_victory(&mut self) -> bool {
        if self.phase == Phase::InProgress && self.rewards_collected >= self.total_rewards {
            self.on_victory();
        }
        self.phase == Phase::Won
    }

    /// Offers the winning time to `store`, returns whether it became the new best.
    pub fn record_best_time(&self, store: &mut impl BestTimeStore) -> bool {
        match (self.phase, self.difficulty) {
            (Phase::Won, Some(difficulty)) => store.offer(difficulty, self.elapsed()),
            _ => false,
        }
    }

    fn on_victory(&mut self) {
        self.phase = Phase::Won;
        self.stop_timer();
    }

    fn on_defeat(&mut self) {
        self.phase = Phase::Lost;
        self.stop_timer();
    }

    fn stop_timer(&mut self) {
        let now = self.clock.now();
        self.ended_at.replace(now);
        log::debug!("ended at {:?} as {:?}", now, self.phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(hazards: &[Coord3], rewards: &[Coord3]) -> (Session<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let grid = Grid::from_coords(3, hazards, rewards).unwrap();
        let session = Session::from_grid(grid, SessionOptions::default(), clock.clone());
        (session, clock)
    }

    #[test]
    fn collecting_every_reward_wins() {
        let (mut session, _) = session(&[(0, 0, 0)], &[(2, 2, 2), (2, 0, 2)]);

        assert_eq!(session.reveal((2, 2, 2)).unwrap().outcome, RevealOutcome::FoundReward);
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.reveal((2, 0, 2)).unwrap().outcome, RevealOutcome::FoundReward);

        assert_eq!(session.phase(), Phase::Won);
        assert_eq!(session.rewards_collected(), 2);
        assert_eq!(session.cells_revealed(), 2);
        assert_eq!(session.reveal((1, 1, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn hitting_a_hazard_loses_and_exposes_the_rest() {
        let (mut session, clock) = session(&[(0, 0, 0), (2, 2, 2)], &[(1, 1, 1)]);
        clock.advance(Duration::from_secs(5));

        let reveal = session.reveal((0, 0, 0)).unwrap();

        assert_eq!(reveal.outcome, RevealOutcome::HitHazard);
        assert_eq!(
            reveal.changes,
            [
                CellChange::new((0, 0, 0), CellUpdate::Detonated),
                CellChange::new((2, 2, 2), CellUpdate::Exposed),
            ]
        );
        assert_eq!(session.phase(), Phase::Lost);
        assert_eq!(session.triggered_hazard(), Some((0, 0, 0)));
        assert_eq!(session.cell_view((2, 2, 2)), Ok(CellView::Hazard));
        assert_eq!(session.hazard_layout(), Some(alloc::vec![(0, 0, 0), (2, 2, 2)]));

        clock.advance(Duration::from_secs(60));
        assert_eq!(session.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn elapsed_runs_while_in_progress() {
        let (mut session, clock) = session(&[(0, 0, 0)], &[(1, 1, 1)]);

        clock.advance(Duration::from_secs(2));
        assert_eq!(session.elapsed(), Duration::from_secs(2));
        assert_eq!(session.hazard_layout(), None);

        session.reveal((1, 1, 1)).unwrap();
        clock.advance(Duration::from_secs(2));
        assert_eq!(session.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn out_of_bounds_leaves_state_untouched() {
        let (mut session, _) = session(&[(0, 0, 0)], &[(1, 1, 1)]);

        assert_eq!(session.reveal((3, 0, 0)), Err(GameError::OutOfBounds));
        assert_eq!(session.cells_revealed(), 0);
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.cell_view((0, 0, 9)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn repeated_reveal_does_not_recount() {
        let (mut session, _) = session(&[(0, 0, 0)], &[(2, 2, 2), (1, 1, 1)]);

        session.reveal((2, 2, 2)).unwrap();
        let again = session.reveal((2, 2, 2)).unwrap();

        assert_eq!(again.outcome, RevealOutcome::AlreadyRevealed);
        assert_eq!(session.rewards_collected(), 1);
        assert_eq!(session.cells_revealed(), 1);
    }

    #[test]
    fn best_time_only_recorded_for_won_presets() {
        let clock = ManualClock::new();
        let mut store = MemoryBestTimes::new();
        let mut session =
            Session::new_game_with_clock(Difficulty::Easy, SessionOptions::with_seed(11), clock.clone()).unwrap();
        assert!(!session.record_best_time(&mut store));

        let rewards: Vec<Coord3> = session
            .grid()
            .iter()
            .filter(|(_, cell)| cell.kind() == CellKind::Reward)
            .map(|(coords, _)| coords)
            .collect();
        clock.advance(Duration::from_secs(30));
        for coords in rewards {
            session.reveal(coords).unwrap();
        }

        assert_eq!(session.phase(), Phase::Won);
        assert!(session.record_best_time(&mut store));
        assert_eq!(store.best_time(Difficulty::Easy), Some(Duration::from_secs(30)));

        let custom = Session::from_grid(session.grid().clone(), SessionOptions::default(), clock);
        assert_eq!(custom.difficulty(), None);
    }
}
