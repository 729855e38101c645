//! `campo task`: manage sacred tasks.

use clap::Subcommand;

use campo_core::{
    Config, IdealTime, KvTaskRepository, PrayerAnchor, SacredTask, TaskCategory, TaskKind,
    TaskRepository, TaskUpdate,
};

use super::common::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task name
        name: String,
        /// Priority, 1 (highest) to 10
        #[arg(short, long, default_value_t = 5)]
        priority: u8,
        /// Energy required, 1-10
        #[arg(short, long, default_value_t = 5)]
        energy: u8,
        /// Explicit id (defaults to a UUID)
        #[arg(long)]
        id: Option<String>,
        /// spiritual, physical, work, family, learning or rest
        #[arg(long, default_value = "work")]
        category: TaskCategory,
        /// daily, weekly or one-off
        #[arg(long, default_value = "daily")]
        kind: TaskKind,
        /// Preferred hour, 0-23
        #[arg(long)]
        hour: Option<u8>,
        /// Preferred minute (with --hour)
        #[arg(long, default_value_t = 0)]
        minute: u8,
        /// Expected duration in minutes (with --hour)
        #[arg(long, default_value_t = 0)]
        duration: u32,
        #[arg(long)]
        non_negotiable: bool,
        /// Id of a task this one depends on (repeatable)
        #[arg(long = "depends-on")]
        depends_on: Vec<String>,
        /// Prayer this task is anchored to
        #[arg(long)]
        prayer: Option<PrayerAnchor>,
    },
    /// List tasks
    List {
        /// Include inactive tasks
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one task as JSON
    Show { id: String },
    /// Update task fields
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        priority: Option<u8>,
        #[arg(short, long)]
        energy: Option<u8>,
        #[arg(long)]
        category: Option<TaskCategory>,
        #[arg(long)]
        kind: Option<TaskKind>,
        /// New preferred hour (minute and duration reset to 0)
        #[arg(long, conflicts_with = "clear_time")]
        hour: Option<u8>,
        /// Remove the preferred time
        #[arg(long)]
        clear_time: bool,
        #[arg(long)]
        non_negotiable: Option<bool>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Remove a task
    Remove { id: String },
}

pub fn run(action: TaskAction) -> CliResult {
    let config = Config::load()?;
    let mut repo = KvTaskRepository::new(open_store(&config)?);

    match action {
        TaskAction::Add {
            name,
            priority,
            energy,
            id,
            category,
            kind,
            hour,
            minute,
            duration,
            non_negotiable,
            depends_on,
            prayer,
        } => {
            let mut task = match id {
                Some(id) => SacredTask::with_id(id, name, priority, energy)?,
                None => SacredTask::new(name, priority, energy)?,
            }
            .with_category(category)
            .with_kind(kind)
            .non_negotiable(non_negotiable)
            .with_dependencies(depends_on);
            if let Some(hour) = hour {
                task = task.with_ideal_time(IdealTime::new(hour, minute, duration)?);
            }
            if let Some(anchor) = prayer {
                task = task.with_prayer_anchor(anchor);
            }
            let saved = repo.save(task)?;
            println!("{}", saved.id);
        }
        TaskAction::List { all, json } => {
            let tasks = if all {
                repo.find_all()?
            } else {
                repo.find_available()?
            };
            if json {
                print_json(&tasks)?;
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                for task in &tasks {
                    let time = task
                        .ideal_time
                        .map(|t| format!("{:02}:{:02}", t.hour, t.minute))
                        .unwrap_or_else(|| "--:--".into());
                    println!(
                        "{:<36}  P{:<2} E{:<2} {}  {}{}",
                        task.id,
                        task.priority,
                        task.energy_required,
                        time,
                        task.name,
                        if task.non_negotiable { " *" } else { "" }
                    );
                }
            }
        }
        TaskAction::Show { id } => match repo.find_by_id(&id)? {
            Some(task) => print_json(&task)?,
            None => return Err(format!("task not found: {id}").into()),
        },
        TaskAction::Update {
            id,
            name,
            priority,
            energy,
            category,
            kind,
            hour,
            clear_time,
            non_negotiable,
            active,
        } => {
            let ideal_time = match (hour, clear_time) {
                (Some(hour), _) => Some(Some(IdealTime::new(hour, 0, 0)?)),
                (None, true) => Some(None),
                (None, false) => None,
            };
            let update = TaskUpdate {
                name,
                category,
                kind,
                priority,
                energy_required: energy,
                non_negotiable,
                ideal_time,
                active,
                ..Default::default()
            };
            let task = repo.update(&id, &update)?;
            print_json(&task)?;
        }
        TaskAction::Remove { id } => {
            if repo.delete(&id)? {
                println!("removed {id}");
            } else {
                return Err(format!("task not found: {id}").into());
            }
        }
    }
    Ok(())
}
