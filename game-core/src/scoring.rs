use game_types::{LevelPayload, ScoreSubmission, ScoreSummary, ScoringType};

/// Local projection of a game's score card.
///
/// The board never talks to the network: the widget feeds it the remote
/// summary (or a fallback) and asks it what, if anything, needs flushing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    scoring_type: ScoringType,
    current: i32,
    remote_total: i32,
    remote_highest: Option<i32>,
    last_flushed: Option<i32>,
}

impl ScoreBoard {
    pub fn new(scoring_type: ScoringType) -> Self {
        Self {
            scoring_type,
            current: 0,
            remote_total: 0,
            remote_highest: None,
            last_flushed: None,
        }
    }

    pub fn scoring_type(&self) -> ScoringType {
        self.scoring_type
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn set_current(&mut self, score: i32) {
        self.current = score;
    }

    pub fn apply_remote(&mut self, summary: &ScoreSummary) {
        self.remote_total = summary.total_score.unwrap_or(0);
        self.remote_highest = summary.high_score;
    }

    /// Unauthenticated or failed fetch: treat remote state as zero.
    pub fn fall_back_to_zero(&mut self) {
        self.remote_total = 0;
        self.remote_highest = None;
    }

    pub fn display_value(&self) -> i32 {
        match self.scoring_type {
            ScoringType::Session | ScoringType::Highest => self.current,
            ScoringType::Persistent => self.remote_total.saturating_add(self.current),
        }
    }

    /// Remote high score, shown next to (never combined with) the local value.
    pub fn high_score(&self) -> Option<i32> {
        match self.scoring_type {
            ScoringType::Highest => self.remote_highest.filter(|score| *score > 0),
            _ => None,
        }
    }

    /// The submission due on the next tick. A value already flushed is not resent.
    pub fn pending_flush(&self) -> Option<ScoreSubmission> {
        if self.current == 0 || self.last_flushed == Some(self.current) {
            return None;
        }
        Some(ScoreSubmission {
            score: self.current,
            scoring_type: self.scoring_type,
        })
    }

    pub fn mark_flushed(&mut self, submitted: i32, reply: &ScoreSummary) {
        self.last_flushed = Some(submitted);
        if self.scoring_type == ScoringType::Highest {
            if let Some(high_score) = reply.high_score {
                self.remote_highest = Some(high_score);
            }
        }
    }

    pub fn last_flushed(&self) -> Option<i32> {
        self.last_flushed
    }
}

/// Local projection of a game's level card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelBoard {
    current: i32,
    remote: Option<i32>,
    max_level: i32,
    last_flushed: Option<i32>,
}

impl LevelBoard {
    pub fn new(current: i32, max_level: i32) -> Self {
        Self {
            current,
            remote: None,
            max_level,
            last_flushed: None,
        }
    }

    pub fn set_current(&mut self, level: i32) {
        self.current = level;
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max_level(&self) -> i32 {
        self.max_level
    }

    /// A remote level of 0 means the backend has nothing stored yet.
    pub fn apply_remote(&mut self, payload: &LevelPayload) {
        self.remote = (payload.level > 0).then_some(payload.level);
    }

    pub fn fall_back_to_local(&mut self) {
        self.remote = None;
    }

    pub fn display_level(&self) -> i32 {
        self.remote.map_or(self.current, |remote| remote.max(self.current))
    }

    /// Progress bar width, clamped to 100%.
    pub fn progress_percent(&self) -> f64 {
        if self.max_level <= 0 {
            return 0.0;
        }
        let ratio = f64::from(self.display_level()) / f64::from(self.max_level);
        ratio.clamp(0.0, 1.0) * 100.0
    }

    pub fn pending_flush(&self) -> Option<LevelPayload> {
        if self.current <= 0 || self.last_flushed == Some(self.current) {
            return None;
        }
        Some(LevelPayload { level: self.current })
    }

    pub fn mark_flushed(&mut self, level: i32) {
        self.last_flushed = Some(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: i32, high: i32) -> ScoreSummary {
        ScoreSummary {
            total_score: Some(total),
            high_score: Some(high),
            last_score: None,
        }
    }

    #[test]
    fn test_session_mode_ignores_remote_total() {
        let mut board = ScoreBoard::new(ScoringType::Session);
        board.apply_remote(&summary(500, 90));
        board.set_current(30);

        assert_eq!(board.display_value(), 30);
        assert_eq!(board.high_score(), None);
    }

    #[test]
    fn test_persistent_mode_adds_remote_total() {
        let mut board = ScoreBoard::new(ScoringType::Persistent);
        board.apply_remote(&summary(500, 90));
        board.set_current(30);
        assert_eq!(board.display_value(), 530);

        board.fall_back_to_zero();
        assert_eq!(board.display_value(), 30);
    }

    #[test]
    fn test_highest_mode_shows_high_score_alongside() {
        let mut board = ScoreBoard::new(ScoringType::Highest);
        board.apply_remote(&summary(500, 90));
        board.set_current(30);

        assert_eq!(board.display_value(), 30);
        assert_eq!(board.high_score(), Some(90));

        board.mark_flushed(30, &ScoreSummary { high_score: Some(120), ..Default::default() });
        assert_eq!(board.high_score(), Some(120));
        assert_eq!(board.display_value(), 30);
    }

    #[test]
    fn test_score_flush_only_when_changed_and_non_zero() {
        let mut board = ScoreBoard::new(ScoringType::Persistent);
        assert_eq!(board.pending_flush(), None);

        board.set_current(-10);
        let submission = board.pending_flush().unwrap();
        assert_eq!(submission.score, -10);
        assert_eq!(submission.scoring_type, ScoringType::Persistent);

        board.mark_flushed(-10, &ScoreSummary::default());
        assert_eq!(board.pending_flush(), None);

        board.set_current(20);
        assert_eq!(board.pending_flush().map(|s| s.score), Some(20));
    }

    #[test]
    fn test_level_display_and_progress() {
        let mut board = LevelBoard::new(2, 10);
        assert_eq!(board.display_level(), 2);
        assert_eq!(board.progress_percent(), 20.0);

        board.apply_remote(&LevelPayload { level: 7 });
        assert_eq!(board.display_level(), 7);

        board.set_current(12);
        assert_eq!(board.display_level(), 12);
        assert_eq!(board.progress_percent(), 100.0);

        board.apply_remote(&LevelPayload { level: 0 });
        board.set_current(3);
        assert_eq!(board.display_level(), 3);
    }

    #[test]
    fn test_level_zero_max_has_no_progress() {
        let board = LevelBoard::new(4, 0);
        assert_eq!(board.progress_percent(), 0.0);
    }

    #[test]
    fn test_level_flush_tracking() {
        let mut board = LevelBoard::new(1, 10);
        assert_eq!(board.pending_flush(), Some(LevelPayload { level: 1 }));
        board.mark_flushed(1);
        assert_eq!(board.pending_flush(), None);
        board.set_current(2);
        assert_eq!(board.pending_flush(), Some(LevelPayload { level: 2 }));
    }
}
