//! The compiled-in study plan.
//!
//! The plan is constant data: weeks group days, days carry base tasks.
//! Completion of a base task is stored separately as a task record keyed by
//! the day and the task's position within the day.

/// A task every user gets on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseTask {
    pub kind: &'static str,
    pub desc: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanDay {
    pub day: u32,
    pub base_tasks: &'static [BaseTask],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanWeek {
    pub title: &'static str,
    pub goal: &'static str,
    pub days: &'static [PlanDay],
}

/// An immutable schedule of weeks -> days -> base tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub weeks: &'static [PlanWeek],
}

const SPRINT_WEEKS: &[PlanWeek] = &[PlanWeek {
    title: "Week 1: Building the Foundation",
    goal: "Establish a rock-solid routine.",
    days: &[PlanDay {
        day: 1,
        base_tasks: &[
            BaseTask {
                kind: "Apti",
                desc: "Percentages",
            },
            BaseTask {
                kind: "DSA",
                desc: "C++ Tutorial & 1 Array-Easy Problem",
            },
        ],
    }],
}];

impl Plan {
    /// The built-in sprint plan
    pub const fn builtin() -> Plan {
        Plan {
            weeks: SPRINT_WEEKS,
        }
    }

    /// Iterate over every day of every week, in plan order
    pub fn days(&self) -> impl Iterator<Item = &'static PlanDay> + '_ {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    /// Find the entry for a day number
    pub fn day(&self, day: u32) -> Option<&'static PlanDay> {
        self.days().find(|d| d.day == day)
    }

    /// Base tasks for a day (empty when the plan has no entry)
    pub fn base_tasks(&self, day: u32) -> &'static [BaseTask] {
        self.day(day).map(|d| d.base_tasks).unwrap_or(&[])
    }

    /// The week containing a day, if any
    pub fn week_of(&self, day: u32) -> Option<&'static PlanWeek> {
        self.weeks
            .iter()
            .find(|w| w.days.iter().any(|d| d.day == day))
    }
}

impl Default for Plan {
    fn default() -> Self {
        Plan::builtin()
    }
}
