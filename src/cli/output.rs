use serde::Serialize;

use crate::model::{Plan, PlanWeek, Resource, TaskRecord};
use crate::ops::materialize::BaseKey;
use crate::ops::progress::ProgressSummary;
use crate::util::unicode::pad_to_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct StatusJson {
    #[serde(flatten)]
    pub summary: ProgressSummary,
    pub assessment_date: String,
    pub countdown: String,
}

#[derive(Serialize)]
pub struct DayJson {
    pub day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<String>,
    pub tasks: Vec<TaskRecord>,
}

#[derive(Serialize)]
pub struct ChangeJson {
    pub id: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct ImportJson {
    pub imported: usize,
}

#[derive(Serialize)]
pub struct PlanJson {
    pub weeks: Vec<WeekJson>,
}

#[derive(Serialize)]
pub struct WeekJson {
    pub title: String,
    pub goal: String,
    pub days: Vec<DayJson>,
}

pub fn plan_to_json(plan: &Plan) -> PlanJson {
    PlanJson {
        weeks: plan.weeks.iter().map(week_to_json).collect(),
    }
}

fn week_to_json(week: &PlanWeek) -> WeekJson {
    WeekJson {
        title: week.title.to_string(),
        goal: week.goal.to_string(),
        days: week
            .days
            .iter()
            .map(|d| DayJson {
                day: d.day,
                week: None,
                tasks: d
                    .base_tasks
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        TaskRecord::new(
                            BaseKey::new(d.day, i).id(),
                            d.day,
                            t.desc.to_string(),
                            t.kind.to_string(),
                        )
                    })
                    .collect(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `[x] base_1_0  Apti  Percentages`
pub fn format_task_line(task: &TaskRecord, id_width: usize, kind_width: usize) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!(
        "[{}] {}  {}  {}",
        mark,
        pad_to_width(&task.id, id_width),
        pad_to_width(&task.kind, kind_width),
        task.desc
    )
}

/// Format a day's tasks with aligned id and type columns
pub fn format_task_list(tasks: &[TaskRecord]) -> Vec<String> {
    let id_w = tasks.iter().map(|t| t.id.len()).max().unwrap_or(0);
    let kind_w = tasks.iter().map(|t| t.kind.len()).max().unwrap_or(0);
    tasks
        .iter()
        .map(|t| format_task_line(t, id_w, kind_w))
        .collect()
}

pub fn format_status(summary: &ProgressSummary, countdown: &str) -> Vec<String> {
    let rows = [
        ("Sprint Day", summary.day.to_string()),
        (
            "Today's Progress",
            format!("{}/{}", summary.today_done, summary.today_total),
        ),
        ("Current Streak", format!("{} Days", summary.streak)),
        ("Total Completed", summary.total_completed.to_string()),
        ("Assessments", countdown.to_string()),
    ];
    rows.iter()
        .map(|(label, value)| format!("{}  {}", pad_to_width(label, 16), value))
        .collect()
}

pub fn format_plan(plan: &Plan) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, week) in plan.weeks.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(week.title.to_string());
        lines.push(format!("  {}", week.goal));
        for day in week.days {
            lines.push(format!("  Day {}", day.day));
            for (j, task) in day.base_tasks.iter().enumerate() {
                lines.push(format!(
                    "    {}  [{}] {}",
                    BaseKey::new(day.day, j),
                    task.kind,
                    task.desc
                ));
            }
        }
    }
    lines
}

pub fn format_resource(resource: &Resource) -> Vec<String> {
    let mut lines = vec![resource.title.clone(), format!("  {}", resource.url)];
    if !resource.desc.is_empty() {
        lines.push(format!("  {}", resource.desc));
    }
    lines
}
