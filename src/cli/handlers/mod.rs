use std::path::Path;

use chrono::{Local, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::identity::{AnonymousIdentity, IdentityProvider};
use crate::io::paths::DataPaths;
use crate::io::store::FileStore;
use crate::io::sync::SyncChannel;
use crate::model::{AppConfig, Plan, SprintState, TaskRecord};
use crate::ops::countdown::{assessment_instant, countdown};
use crate::ops::day::current_day;
use crate::ops::materialize::materialize;
use crate::ops::progress::ProgressSummary;
use crate::ops::{import, task_ops};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run one subcommand against the sprint document in `paths`
pub fn dispatch(command: Commands, json: bool, paths: &DataPaths) -> CmdResult {
    let mut session = Session::open(paths)?;
    match command {
        // Read commands
        Commands::Status => cmd_status(&session, json),
        Commands::Today(args) => cmd_today(&session, args, json),
        Commands::Plan => cmd_plan(&session, json),
        Commands::Resources => cmd_resources(&session, json),

        // Write commands
        Commands::Check(args) => cmd_set_completed(&mut session, &args.id, true, json),
        Commands::Uncheck(args) => cmd_set_completed(&mut session, &args.id, false, json),
        Commands::Add(args) => cmd_add(&mut session, args, json),
        Commands::Import(args) => cmd_import(&mut session, args, json),
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Everything a one-shot command needs: config, the signed-in sync channel
/// and the current sprint document.
struct Session {
    config: AppConfig,
    plan: Plan,
    sync: SyncChannel,
    state: SprintState,
}

impl Session {
    fn open(paths: &DataPaths) -> Result<Session, Box<dyn std::error::Error>> {
        let config = config_io::read_config(&paths.config_file())?;
        let identity = AnonymousIdentity::new(paths.identity_file()).sign_in()?;
        let store = FileStore::open(&paths.documents_dir())?;
        let mut sync = SyncChannel::new(Box::new(store));
        sync.sign_in(identity);
        let state = sync.load(Local::now().date_naive())?;
        Ok(Session {
            config,
            plan: Plan::builtin(),
            sync,
            state,
        })
    }

    fn today(&self) -> u32 {
        current_day(&Local::now(), self.state.start_date)
    }

    /// Persist a new task list. Write failures are errors here, unlike in
    /// the TUI.
    fn save(&mut self, tasks: Vec<TaskRecord>) -> CmdResult {
        self.sync.replace_all(&tasks).into_result()?;
        self.state.tasks = tasks;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_status(session: &Session, json: bool) -> CmdResult {
    let summary = ProgressSummary::compute(session.today(), &session.plan, &session.state.tasks);
    let date = session.config.sprint.assessment_date;
    let remaining = countdown(Utc::now(), assessment_instant(date)).to_string();

    if json {
        let output = StatusJson {
            summary,
            assessment_date: date.to_string(),
            countdown: remaining,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in format_status(&summary, &remaining) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_today(session: &Session, args: TodayArgs, json: bool) -> CmdResult {
    let day = args.day.unwrap_or_else(|| session.today());
    let tasks = materialize(day, &session.plan, &session.state.tasks);
    let week = session.plan.week_of(day);

    if json {
        let output = DayJson {
            day,
            week: week.map(|w| w.title.to_string()),
            tasks,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match week {
        Some(w) => println!("Day {} - {}", day, w.title),
        None => println!("Day {}", day),
    }
    if tasks.is_empty() {
        if args.day.is_some() {
            println!("No tasks for day {}.", day);
        } else {
            println!("No tasks for today.");
        }
    }
    for line in format_task_list(&tasks) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_plan(session: &Session, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&plan_to_json(&session.plan))?);
    } else {
        for line in format_plan(&session.plan) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_resources(session: &Session, json: bool) -> CmdResult {
    let resources = &session.state.resources;
    if json {
        println!("{}", serde_json::to_string_pretty(resources)?);
        return Ok(());
    }
    if resources.is_empty() {
        println!("No resources.");
    }
    for resource in resources {
        for line in format_resource(resource) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_set_completed(session: &mut Session, id: &str, completed: bool, json: bool) -> CmdResult {
    let tasks = task_ops::set_completed(id, completed, &session.plan, &session.state.tasks)?;
    session.save(tasks)?;

    if json {
        let output = ChangeJson {
            id: id.to_string(),
            completed,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if completed {
        println!("checked {}", id);
    } else {
        println!("unchecked {}", id);
    }
    Ok(())
}

fn cmd_add(session: &mut Session, args: AddArgs, json: bool) -> CmdResult {
    let (tasks, id) = task_ops::add_task(args.day, &args.desc, &args.kind, &session.state.tasks)?;
    session.save(tasks)?;

    if json {
        let output = ChangeJson {
            id,
            completed: false,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_import(session: &mut Session, args: ImportArgs, json: bool) -> CmdResult {
    let bytes = std::fs::read(Path::new(&args.file))
        .map_err(|e| format!("could not read {}: {}", args.file, e))?;
    let result = import::import_tasks(&session.state.tasks, &bytes)?;
    let accepted = result.accepted;
    session.save(result.tasks)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ImportJson { imported: accepted })?
        );
    } else {
        println!("{}", import::imported_message(accepted));
    }
    Ok(())
}
