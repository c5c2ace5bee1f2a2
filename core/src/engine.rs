use chrono::prelude::*;

use crate::*;

/// Hints handed out in order as the player burns through moves.
static HINTS: [&str; 3] = [
    "Follow the beam from its source and find the first cell where it drifts off course.",
    "Work backwards from the target: the last bend has to send the beam straight into it.",
    "Check every mirror on the route: 45 and 225 degrees bend one way, 135 and 315 the other, and prisms recolor white beams.",
];

/// Move counts at which the later hints unlock.
const HINT_THRESHOLDS: [u32; 2] = [5, 15];

/// Seed step between regenerating resets of the same session (splitmix64
/// increment, so successive seeds stay well spread).
const RESET_SEED_INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;

fn hint_for(move_count: u32) -> &'static str {
    let unlocked = HINT_THRESHOLDS
        .iter()
        .filter(|&&limit| move_count >= limit)
        .count();
    HINTS[unlocked]
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PuzzleStatus {
    Active,
    Completed,
}

impl PuzzleStatus {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Indicates the puzzle has been solved and no moves are accepted anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl Default for PuzzleStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Where the session's starting position came from, which decides what a
/// reset does.
#[derive(Clone, Debug)]
enum ResetOrigin {
    /// Seeded sessions regenerate a fresh board on reset.
    Generated { seed: u64 },
    /// Hand-built sessions restore their initial layout.
    Handmade { layout: PuzzleLayout },
}

/// One puzzle session from creation to completion.
///
/// The session owns the board, the traced paths, and the play clock. Paths
/// are recomputed from scratch after every accepted mutation; the goal is
/// only ever evaluated against that fresh trace.
#[derive(Clone, Debug)]
pub struct Puzzle {
    kind: PuzzleKind,
    difficulty: Difficulty,
    board: Board,
    goal: Goal,
    paths: Vec<LightPath>,
    move_count: u32,
    status: PuzzleStatus,
    score: Option<u32>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    origin: ResetOrigin,
}

impl Puzzle {
    /// Creates a session over a freshly generated board. Every kind other
    /// than the light puzzle is rejected as not implemented.
    pub fn generate(kind: PuzzleKind, difficulty: Difficulty, seed: u64) -> Result<Puzzle> {
        if !kind.is_implemented() {
            return Err(PuzzleError::NotImplemented(kind));
        }
        let layout = RandomBoardGenerator::new(seed).generate(difficulty)?;
        Ok(Self::from_parts(
            kind,
            difficulty,
            layout,
            ResetOrigin::Generated { seed },
        ))
    }

    /// Creates a session over a hand-built layout after validating it.
    pub fn from_layout(layout: PuzzleLayout, difficulty: Difficulty) -> Result<Puzzle> {
        layout.validate()?;
        let origin = ResetOrigin::Handmade {
            layout: layout.clone(),
        };
        Ok(Self::from_parts(
            PuzzleKind::Light,
            difficulty,
            layout,
            origin,
        ))
    }

    fn from_parts(
        kind: PuzzleKind,
        difficulty: Difficulty,
        layout: PuzzleLayout,
        origin: ResetOrigin,
    ) -> Puzzle {
        let paths = trace_board(&layout.board);
        Puzzle {
            kind,
            difficulty,
            board: layout.board,
            goal: layout.goal,
            paths,
            move_count: 0,
            status: Default::default(),
            score: None,
            started_at: Utc::now(),
            completed_at: None,
            origin,
        }
    }

    pub fn kind(&self) -> PuzzleKind {
        self.kind
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    /// The beams traced on the current board, one per source.
    pub fn paths(&self) -> &[LightPath] {
        &self.paths
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn status(&self) -> PuzzleStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_final()
    }

    /// The final score, fixed at completion time.
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// How many seconds the session has been running, frozen at completion.
    pub fn elapsed_secs(&self) -> u32 {
        (self.completed_at.unwrap_or_else(Utc::now) - self.started_at)
            .num_seconds()
            .max(0) as u32
    }

    /// The hint matching the current move count. Purely informational and
    /// free: asking does not count as a move.
    pub fn hint(&self) -> &'static str {
        hint_for(self.move_count)
    }

    /// Relocates an element. Rejected operations, including anything after
    /// completion, leave the session untouched and report `NoChange`.
    pub fn move_element(&mut self, from: Coord2, to: Coord2) -> MoveOutcome {
        if self.status.is_final() {
            return MoveOutcome::NoChange;
        }
        if !self.board.move_element(from, to) {
            return MoveOutcome::NoChange;
        }
        self.after_mutation()
    }

    /// Rotates an element in place by a signed number of degrees.
    pub fn rotate_element(&mut self, coords: Coord2, delta_deg: i16) -> MoveOutcome {
        if self.status.is_final() {
            return MoveOutcome::NoChange;
        }
        if !self.board.rotate_element(coords, delta_deg) {
            return MoveOutcome::NoChange;
        }
        self.after_mutation()
    }

    /// Discards the current position and starts the session over: seeded
    /// sessions draw a new board, hand-built sessions return to their
    /// initial layout.
    pub fn reset(&mut self) -> Result<()> {
        let layout = match &mut self.origin {
            ResetOrigin::Generated { seed } => {
                *seed = seed.wrapping_add(RESET_SEED_INCREMENT);
                RandomBoardGenerator::new(*seed).generate(self.difficulty)?
            }
            ResetOrigin::Handmade { layout } => layout.clone(),
        };

        log::debug!("Resetting puzzle after {} moves", self.move_count);
        self.paths = trace_board(&layout.board);
        self.board = layout.board;
        self.goal = layout.goal;
        self.move_count = 0;
        self.status = PuzzleStatus::Active;
        self.score = None;
        self.started_at = Utc::now();
        self.completed_at = None;
        Ok(())
    }

    /// Book-keeping shared by accepted mutations: count the move, retrace
    /// every beam, and check the goal.
    fn after_mutation(&mut self) -> MoveOutcome {
        self.move_count += 1;
        self.paths = trace_board(&self.board);
        if self.goal.is_satisfied(&self.paths) {
            self.complete();
            MoveOutcome::Completed
        } else {
            MoveOutcome::Applied
        }
    }

    fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
        self.status = PuzzleStatus::Completed;
        let score = compute_score(self.difficulty, self.elapsed_secs(), self.move_count);
        self.score = Some(score);
        log::debug!(
            "Puzzle completed after {} moves in {}s, score {}",
            self.move_count,
            self.elapsed_secs(),
            score
        );
    }
}
