//! Priority scoring: four factors combined by strategy weights.
//!
//! Factors:
//! - urgency: deadline proximity, maximal once overdue
//! - importance: the user's 1-10 rating, divided by 10
//! - effort: favors quick wins
//! - dependencies: how many tasks in the same batch wait on this one
//!
//! Two behaviors are kept deliberately even though they look odd:
//! - the decay branches of urgency (8-9 days out) and effort (8-10 hours)
//!   return values above the preceding step, e.g. 10/8 = 1.25;
//! - a task with no dependencies of its own gets a flat 0.5 dependency score,
//!   however many tasks it blocks. Only tasks that declare dependencies earn
//!   the blocking bonus, and with no blockers that bonus is 0.0.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ParseError;
use crate::strategy::Weights;
use crate::task::Task;
use crate::time::DueDate;

/// Dependency score for tasks that declare no dependencies.
pub const NEUTRAL_DEPENDENCY_SCORE: f64 = 0.5;

/// Bonus per task blocked, capped at 1.0.
pub const BLOCKING_WEIGHT: f64 = 0.3;

/// Urgency for a due date `days` away from today (negative when overdue).
pub fn urgency_for_days(days: i64) -> f64 {
    match days {
        d if d < 0 => 1.0,
        0 => 0.9,
        1 => 0.8,
        2..=3 => 0.6,
        4..=7 => 0.4,
        d => (10.0 / d as f64).max(0.1),
    }
}

/// Urgency of a due date relative to `today`.
///
/// Text dates must be strict `YYYY-MM-DD`.
pub fn urgency_score(due: impl Into<DueDate>, today: NaiveDate) -> Result<f64, ParseError> {
    let due = due.into().resolve()?;
    Ok(urgency_for_days((due - today).num_days()))
}

/// Effort score; shorter tasks score higher. Assumes `hours > 0`.
pub fn effort_score(hours: f64) -> f64 {
    if hours <= 1.0 {
        1.0
    } else if hours <= 4.0 {
        0.7
    } else if hours <= 8.0 {
        0.4
    } else {
        (8.0 / hours).max(0.1)
    }
}

/// Dependency score by scanning the batch.
///
/// `dependencies` is the task's own list and only decides whether the
/// blocking count applies at all.
pub fn dependency_score(dependencies: &[String], all_tasks: &[Task], current_id: &str) -> f64 {
    if dependencies.is_empty() {
        return NEUTRAL_DEPENDENCY_SCORE;
    }
    let blocking = all_tasks
        .iter()
        .filter(|t| t.dependencies.iter().any(|d| d == current_id))
        .count();
    blocking_bonus(blocking)
}

fn blocking_bonus(blocking: usize) -> f64 {
    (blocking as f64 * BLOCKING_WEIGHT).min(1.0)
}

/// Per-batch count of how many tasks list each id as a dependency.
///
/// Built once so scoring a batch is linear instead of quadratic; gives the
/// same answers as [`dependency_score`].
#[derive(Debug, Default, Clone)]
pub struct BlockingIndex {
    counts: HashMap<String, usize>,
}

impl BlockingIndex {
    pub fn build(tasks: &[Task]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for t in tasks {
            // A task naming the same id twice still blocks on it once.
            let unique: HashSet<&str> = t.dependencies.iter().map(String::as_str).collect();
            for id in unique {
                *counts.entry(id.to_string()).or_default() += 1;
            }
        }
        Self { counts }
    }

    /// Number of tasks in the batch that depend on `id`.
    pub fn blocking_count(&self, id: &str) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn dependency_score(&self, task: &Task) -> f64 {
        if task.dependencies.is_empty() {
            return NEUTRAL_DEPENDENCY_SCORE;
        }
        blocking_bonus(self.blocking_count(task.key()))
    }
}

/// Factor values behind one total, for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependencies: f64,
    /// Weighted sum, rounded to 2 decimals.
    pub total: f64,
}

/// Scores tasks for one strategy on one evaluation day.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    weights: Weights,
    today: NaiveDate,
}

impl Scorer {
    pub fn new(weights: Weights, today: NaiveDate) -> Self {
        Self { weights, today }
    }

    pub fn breakdown(&self, task: &Task, index: &BlockingIndex) -> ScoreBreakdown {
        let urgency = urgency_for_days((task.due_date - self.today).num_days());
        let importance = task.importance / 10.0;
        let effort = effort_score(task.estimated_hours);
        let dependencies = index.dependency_score(task);

        let w = &self.weights;
        let total = urgency * w.urgency
            + importance * w.importance
            + effort * w.effort
            + dependencies * w.dependencies;

        ScoreBreakdown {
            urgency,
            importance,
            effort,
            dependencies,
            total: round2(total),
        }
    }

    /// Total for `task` within `all_tasks`, using the linear scan.
    pub fn total_score(&self, task: &Task, all_tasks: &[Task]) -> f64 {
        total_score(task, all_tasks, self.weights, self.today)
    }
}

/// Weighted total for one task, rounded to 2 decimals.
pub fn total_score(task: &Task, all_tasks: &[Task], weights: Weights, today: NaiveDate) -> f64 {
    let urgency = urgency_for_days((task.due_date - today).num_days());
    let importance = task.importance / 10.0;
    let effort = effort_score(task.estimated_hours);
    let dependencies = dependency_score(&task.dependencies, all_tasks, task.key());

    round2(
        urgency * weights.urgency
            + importance * weights.importance
            + effort * weights.effort
            + dependencies * weights.dependencies,
    )
}

/// Round to 2 decimals from the exact binary value, ties to even.
///
/// `(x * 100.0).round()` would round twice and push values such as
/// 0.40499999999999997 up to 0.41.
pub fn round2(x: f64) -> f64 {
    format!("{x:.2}").parse().unwrap_or(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::resolve_weights;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn due_in(days: i64) -> NaiveDate {
        today() + Duration::days(days)
    }

    #[test]
    fn test_urgency_overdue_is_flat_max() {
        for days in [1, 2, 30, 400] {
            assert_eq!(urgency_score(today() - Duration::days(days), today()).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_urgency_steps() {
        assert_eq!(urgency_score(due_in(0), today()).unwrap(), 0.9);
        assert_eq!(urgency_score(due_in(1), today()).unwrap(), 0.8);
        assert_eq!(urgency_score(due_in(2), today()).unwrap(), 0.6);
        assert_eq!(urgency_score(due_in(3), today()).unwrap(), 0.6);
        assert_eq!(urgency_score(due_in(4), today()).unwrap(), 0.4);
        assert_eq!(urgency_score(due_in(7), today()).unwrap(), 0.4);
    }

    #[test]
    fn test_urgency_decay_beyond_a_week() {
        let mut prev = f64::INFINITY;
        for days in 8..=100 {
            let u = urgency_for_days(days);
            assert_eq!(u, (10.0 / days as f64).max(0.1));
            assert!(u < prev, "not decreasing at {days}");
            prev = u;
        }
        assert_eq!(urgency_for_days(8), 1.25);
        assert_eq!(urgency_for_days(100), 0.1);
        assert_eq!(urgency_for_days(365), 0.1);
    }

    #[test]
    fn test_urgency_accepts_text_dates() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(urgency_score("2025-12-01", today()), urgency_score(day, today()));
        assert!(urgency_score("12/01/2025", today()).is_err());
    }

    #[test]
    fn test_effort_steps() {
        assert_eq!(effort_score(0.5), 1.0);
        assert_eq!(effort_score(1.0), 1.0);
        assert_eq!(effort_score(4.0), 0.7);
        assert_eq!(effort_score(8.0), 0.4);
        assert_eq!(effort_score(20.0), 0.4);
        assert_eq!(effort_score(16.0), 0.5);
        assert_eq!(effort_score(200.0), 0.1);
    }

    fn batch() -> Vec<Task> {
        vec![
            Task::new("1", "Task 1", today()).with_dependencies(["B"]),
            Task::new("2", "Task 2", today()).with_dependencies(["B"]),
            Task::new("B", "Base", today()),
        ]
    }

    #[test]
    fn test_no_own_dependencies_is_neutral() {
        let tasks = batch();
        assert_eq!(dependency_score(&[], &tasks, "B"), 0.5);
        assert_eq!(dependency_score(&[], &[], "anything"), 0.5);
        assert_eq!(BlockingIndex::build(&tasks).dependency_score(&tasks[2]), 0.5);
    }

    #[test]
    fn test_blocking_bonus_needs_own_dependencies() {
        let tasks = batch();
        let own = vec!["x".to_string()];
        assert!((dependency_score(&own, &tasks, "B") - 0.6).abs() < 1e-12);
        // Declares dependencies but blocks nobody.
        assert_eq!(dependency_score(&own, &tasks, "1"), 0.0);
    }

    #[test]
    fn test_blocking_bonus_caps_at_one() {
        let mut tasks: Vec<Task> = (0..5)
            .map(|i| Task::new(i.to_string(), "w", today()).with_dependencies(["hub"]))
            .collect();
        tasks.push(Task::new("hub", "hub", today()).with_dependencies(["other"]));

        let index = BlockingIndex::build(&tasks);
        assert_eq!(index.blocking_count("hub"), 5);
        assert_eq!(index.dependency_score(&tasks[5]), 1.0);
    }

    #[test]
    fn test_index_matches_scan() {
        let mut tasks = batch();
        tasks.push(Task::new("3", "dup", today()).with_dependencies(["1", "1", "B"]));
        tasks.push(Task::new("4", "self", today()).with_dependencies(["4"]));
        tasks.push(Task::new("5", "anon", today()).without_id().with_dependencies(["temp_id"]));

        let index = BlockingIndex::build(&tasks);
        for t in &tasks {
            assert_eq!(
                index.dependency_score(t),
                dependency_score(&t.dependencies, &tasks, t.key()),
                "task {}",
                t.key()
            );
        }
        assert_eq!(index.blocking_count("1"), 1);
    }

    #[test]
    fn test_total_high_priority() {
        let t = Task::new("hp1", "Critical", due_in(-1)).with_hours(1.0).with_importance(10.0);
        let score = total_score(&t, std::slice::from_ref(&t), resolve_weights("smart"), today());
        // 0.4 + 0.3 + 0.2 + 0.05
        assert_eq!(score, 0.95);
    }

    #[test]
    fn test_total_low_priority() {
        let t = Task::new("lp1", "Nice to have", due_in(365)).with_hours(40.0).with_importance(1.0);
        let score = total_score(&t, std::slice::from_ref(&t), resolve_weights("smart"), today());
        assert!(score < 0.3, "{score}");
    }

    #[test]
    fn test_total_is_rounded_and_bounded() {
        let tasks = vec![
            Task::new("1", "Urgent", due_in(0)).with_hours(2.0).with_importance(9.0),
            Task::new("2", "Future", due_in(10)).with_hours(8.0).with_importance(6.0),
            Task::new("3", "Bug", due_in(30)).with_hours(2.0).with_importance(9.0),
            Task::new("4", "Docs", due_in(5)).with_hours(4.0).with_importance(6.0),
        ];
        let scorer = Scorer::new(resolve_weights("smart"), today());
        for t in &tasks {
            let s = scorer.total_score(t, &tasks);
            assert!((0.0..=1.0).contains(&s), "{s}");
            assert_eq!(s, round2(s));
        }
    }

    #[test]
    fn test_round2_uses_exact_value() {
        assert_eq!(round2(0.40499999999999997), 0.40);
        assert_eq!(round2(0.355), 0.35);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(0.956), 0.96);
        assert_eq!(round2(1.25), 1.25);
    }

    #[test]
    fn test_total_rounds_down_below_half() {
        // 0.4 * 0.3125 + 0.3 * 0.1 + 0.2 * 1.0 + 0.1 * 0.5 sums to 0.40499999999999997.
        let t = Task::new("r", "Far off", due_in(32)).with_hours(1.0).with_importance(1.0);
        let score = total_score(&t, std::slice::from_ref(&t), resolve_weights("smart"), today());
        assert_eq!(score, 0.40);
    }

    #[test]
    fn test_breakdown_agrees_with_total() {
        let tasks = batch();
        let scorer = Scorer::new(resolve_weights("deadline"), today());
        let index = BlockingIndex::build(&tasks);
        for t in &tasks {
            let b = scorer.breakdown(t, &index);
            assert_eq!(b.total, scorer.total_score(t, &tasks));
            assert_eq!(b.importance, t.importance / 10.0);
        }
    }
}
