// src/session.rs
//
// Presentation-tier state machine for one timed test attempt. The type is
// pure and I/O-free: the host (a UI event loop) forwards user actions and
// one tick per wall-clock second, and performs the actual submission when
// the machine hands it the answer vector. The machine hands that vector
// out at most once per attempt unless the host reports a failed submit.

use crate::models::attempt::TestResult;

/// Lifecycle of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Question set not available yet. The session stays here indefinitely
    /// if loading never completes; every operation is a no-op.
    Loading,
    InProgress,
    /// Answer vector handed to the host; waiting for the grading outcome.
    Submitting,
    Completed,
}

/// Per-question status. Statuses are exclusive: a question is in exactly
/// one of them at any time, and marking a question for review overwrites
/// an earlier `Answered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    NotVisited,
    Visited,
    Answered,
    Marked,
}

/// One entry of the attempt's answer map.
#[derive(Debug, Clone, Copy)]
pub struct AnswerSlot {
    pub selected_option: Option<usize>,
    pub status: QuestionStatus,
}

/// Navigator panel counts, recomputed from the answer map on demand.
/// Every question lands in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub answered: usize,
    pub not_visited: usize,
    pub marked: usize,
    /// Visited but neither answered nor marked.
    pub visited: usize,
}

/// State of one in-progress attempt. Created per test-taking session and
/// discarded afterwards; never persisted or shared between sessions.
#[derive(Debug, Clone)]
pub struct TestSession {
    phase: SessionPhase,
    current_index: usize,
    slots: Vec<AnswerSlot>,
    remaining_seconds: u32,
    result: Option<TestResult>,
}

impl TestSession {
    /// Starts a session in `Loading` with the test's time limit.
    pub fn new(duration_minutes: u32) -> Self {
        TestSession {
            phase: SessionPhase::Loading,
            current_index: 0,
            slots: Vec::new(),
            remaining_seconds: duration_minutes * 60,
            result: None,
        }
    }

    /// Called when the question set finishes loading. Initializes the
    /// answer map: the first question starts `Visited`, the rest
    /// `NotVisited`.
    pub fn questions_loaded(&mut self, count: usize) {
        if self.phase != SessionPhase::Loading || count == 0 {
            return;
        }
        self.slots = (0..count)
            .map(|index| AnswerSlot {
                selected_option: None,
                status: if index == 0 {
                    QuestionStatus::Visited
                } else {
                    QuestionStatus::NotVisited
                },
            })
            .collect();
        self.current_index = 0;
        self.phase = SessionPhase::InProgress;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn slots(&self) -> &[AnswerSlot] {
        &self.slots
    }

    pub fn result(&self) -> Option<&TestResult> {
        self.result.as_ref()
    }

    /// Records the selected option for a question. Correctness is never
    /// known client-side; this is a pure local mutation.
    pub fn select_option(&mut self, question: usize, option: usize) {
        if self.phase != SessionPhase::InProgress || question >= self.slots.len() {
            return;
        }
        self.slots[question] = AnswerSlot {
            selected_option: Some(option),
            status: QuestionStatus::Answered,
        };
    }

    /// Moves to the next question; no-op at the last one.
    pub fn go_next(&mut self) {
        self.jump_to(self.current_index.saturating_add(1).min(self.last_index()));
    }

    /// Moves to the previous question; no-op at the first one.
    pub fn go_previous(&mut self) {
        self.jump_to(self.current_index.saturating_sub(1));
    }

    /// Navigates to an arbitrary question (navigator panel click).
    /// Arriving at a `NotVisited` question promotes it to `Visited`;
    /// already-visited questions keep their status.
    pub fn jump_to(&mut self, question: usize) {
        if self.phase != SessionPhase::InProgress || question >= self.slots.len() {
            return;
        }
        self.current_index = question;
        if self.slots[question].status == QuestionStatus::NotVisited {
            self.slots[question].status = QuestionStatus::Visited;
        }
    }

    /// Flags a question for review. Overwrites `Answered`: the selected
    /// option is kept but the status no longer records that it was
    /// answered.
    pub fn mark_for_review(&mut self, question: usize) {
        if self.phase != SessionPhase::InProgress || question >= self.slots.len() {
            return;
        }
        self.slots[question].status = QuestionStatus::Marked;
    }

    /// Clears the selected option. Status drops back to `Visited` only if
    /// it was `Answered`; a question never returns to `NotVisited`.
    pub fn clear_response(&mut self, question: usize) {
        if self.phase != SessionPhase::InProgress || question >= self.slots.len() {
            return;
        }
        let slot = &mut self.slots[question];
        slot.selected_option = None;
        if slot.status == QuestionStatus::Answered {
            slot.status = QuestionStatus::Visited;
        }
    }

    /// Advances the countdown by one second. Returns the answer vector
    /// when the timer hits zero, triggering auto-submission. Ticks
    /// delivered while `Submitting` or `Completed` are ignored, so a
    /// manual submit racing the timeout still yields exactly one vector.
    pub fn tick(&mut self) -> Option<Vec<Option<usize>>> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.begin_submit()
        } else {
            None
        }
    }

    /// Transitions to `Submitting` and hands out the answer vector (nulls
    /// preserved for unattempted questions). Returns `None` unless the
    /// session is `InProgress`, which deduplicates double-clicks and the
    /// timeout/manual race.
    pub fn begin_submit(&mut self) -> Option<Vec<Option<usize>>> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        self.phase = SessionPhase::Submitting;
        Some(self.slots.iter().map(|slot| slot.selected_option).collect())
    }

    /// Stores the grading outcome and completes the attempt. The result is
    /// never re-requested or mutated afterwards.
    pub fn submit_succeeded(&mut self, result: TestResult) {
        if self.phase == SessionPhase::Submitting {
            self.result = Some(result);
            self.phase = SessionPhase::Completed;
        }
    }

    /// Reverts a failed submission so the user can retry. Local answers
    /// are preserved; this is the only retryable path.
    pub fn submit_failed(&mut self) {
        if self.phase == SessionPhase::Submitting {
            self.phase = SessionPhase::InProgress;
        }
    }

    /// Status-count projection for the navigator panel. A `Marked`
    /// question is excluded from the visited count even if it carries a
    /// selected option.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            answered: 0,
            not_visited: 0,
            marked: 0,
            visited: 0,
        };
        for slot in &self.slots {
            match slot.status {
                QuestionStatus::Answered => counts.answered += 1,
                QuestionStatus::NotVisited => counts.not_visited += 1,
                QuestionStatus::Marked => counts.marked += 1,
                QuestionStatus::Visited => counts.visited += 1,
            }
        }
        counts
    }

    fn last_index(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_progress(count: usize, duration_minutes: u32) -> TestSession {
        let mut session = TestSession::new(duration_minutes);
        session.questions_loaded(count);
        assert_eq!(session.phase(), SessionPhase::InProgress);
        session
    }

    #[test]
    fn test_loading_until_questions_arrive() {
        let mut session = TestSession::new(30);
        assert_eq!(session.phase(), SessionPhase::Loading);

        // Operations before load are no-ops.
        session.select_option(0, 1);
        session.go_next();
        assert!(session.tick().is_none());
        assert_eq!(session.phase(), SessionPhase::Loading);

        session.questions_loaded(5);
        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(session.slots()[0].status, QuestionStatus::Visited);
        for slot in &session.slots()[1..] {
            assert_eq!(slot.status, QuestionStatus::NotVisited);
        }
    }

    #[test]
    fn test_status_never_returns_to_not_visited() {
        let mut session = in_progress(3, 30);

        session.jump_to(1);
        assert_eq!(session.slots()[1].status, QuestionStatus::Visited);

        session.select_option(1, 2);
        assert_eq!(session.slots()[1].status, QuestionStatus::Answered);

        session.clear_response(1);
        assert_eq!(session.slots()[1].status, QuestionStatus::Visited);

        session.mark_for_review(1);
        session.clear_response(1);
        // Clearing a marked question keeps the mark.
        assert_eq!(session.slots()[1].status, QuestionStatus::Marked);
    }

    #[test]
    fn test_mark_for_review_overwrites_answered() {
        let mut session = in_progress(2, 30);

        session.select_option(0, 1);
        session.mark_for_review(0);
        assert_eq!(session.slots()[0].status, QuestionStatus::Marked);
        // The selection itself survives.
        assert_eq!(session.slots()[0].selected_option, Some(1));
    }

    #[test]
    fn test_status_counts_partition_all_questions() {
        let mut session = in_progress(6, 30);

        session.select_option(0, 1); // answered
        session.jump_to(2); // visited
        session.select_option(3, 0);
        session.mark_for_review(3); // marked, previously answered
        session.jump_to(4);
        session.mark_for_review(4); // marked

        let counts = session.status_counts();
        assert_eq!(counts.answered, 1);
        assert_eq!(counts.marked, 2);
        assert_eq!(counts.visited, 1);
        assert_eq!(counts.not_visited, 2);
        assert_eq!(
            counts.answered + counts.not_visited + counts.marked + counts.visited,
            6
        );
    }

    #[test]
    fn test_navigation_clamps_at_boundaries() {
        let mut session = in_progress(3, 30);

        session.go_previous();
        assert_eq!(session.current_index(), 0);

        session.go_next();
        session.go_next();
        assert_eq!(session.current_index(), 2);
        session.go_next();
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn test_navigation_promotes_not_visited() {
        let mut session = in_progress(3, 30);

        session.go_next();
        assert_eq!(session.slots()[1].status, QuestionStatus::Visited);

        // Moving back onto an answered question leaves its status alone.
        session.select_option(0, 2);
        session.go_previous();
        assert_eq!(session.slots()[0].status, QuestionStatus::Answered);
    }

    #[test]
    fn test_jump_to_out_of_range_is_ignored() {
        let mut session = in_progress(3, 30);
        session.jump_to(7);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_timer_auto_submits_exactly_once() {
        let mut session = in_progress(2, 30);
        session.select_option(0, 1);

        // Drain the timer down to one remaining second.
        for _ in 0..(30 * 60 - 1) {
            assert!(session.tick().is_none());
        }

        let vector = session.tick().expect("timeout should hand out the vector");
        assert_eq!(vector, vec![Some(1), None]);
        assert_eq!(session.phase(), SessionPhase::Submitting);

        // A manual submit racing the timeout gets nothing.
        assert!(session.begin_submit().is_none());
        // Further ticks are ignored once submitting.
        assert!(session.tick().is_none());
    }

    #[test]
    fn test_manual_submit_wins_race_against_timer() {
        let mut session = in_progress(1, 1);

        let vector = session.begin_submit().expect("first submit hands out the vector");
        assert_eq!(vector, vec![None]);
        // The pending tick arrives a moment later and must not re-submit.
        assert!(session.tick().is_none());
    }

    #[test]
    fn test_failed_submit_is_retryable() {
        let mut session = in_progress(2, 30);
        session.select_option(1, 3);

        assert!(session.begin_submit().is_some());
        session.submit_failed();
        assert_eq!(session.phase(), SessionPhase::InProgress);
        // Answers survive the failed round trip.
        assert_eq!(session.slots()[1].selected_option, Some(3));

        let vector = session.begin_submit().expect("retry allowed after failure");
        assert_eq!(vector, vec![None, Some(3)]);

        session.submit_succeeded(TestResult {
            score: 1.0,
            total_marks: 2.0,
            percentage: 50,
            correct_answers: vec![0, 3],
        });
        assert_eq!(session.phase(), SessionPhase::Completed);
        assert_eq!(session.result().unwrap().percentage, 50);

        // Completed is terminal.
        assert!(session.begin_submit().is_none());
        assert!(session.tick().is_none());
    }
}
