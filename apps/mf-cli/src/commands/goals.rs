// goals.rs — Goals subcommands: list, toggle.

use clap::Subcommand;
use mf_goal::{Clock, FocusConfig, Goal, GoalError, GoalStore, KeyValueStore, RefreshNotifier};

#[derive(Subcommand)]
pub enum GoalsCommands {
    /// List this month's goals.
    List {
        /// Include goals from every month.
        #[arg(long)]
        all: bool,
        /// Print the goals as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Flip a goal between done and not done.
    Toggle {
        /// Goal ID.
        id: String,
    },
}

pub fn execute(cmd: &GoalsCommands, config: &FocusConfig) -> anyhow::Result<()> {
    let store = super::open_store(config)?;

    match cmd {
        GoalsCommands::List { all, json } => {
            let goals = collect_goals(&store, *all)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&goals)?);
            } else if goals.is_empty() {
                println!("No goals found.");
            } else {
                print!("{}", format_goal_table(&goals));
                println!("\n{} goal(s) total.", goals.len());
            }
            Ok(())
        }
        GoalsCommands::Toggle { id } => {
            println!("{}", toggle(&store, id)?);
            Ok(())
        }
    }
}

/// Goals to list. Nothing stored yet is an empty list; undecodable data is
/// reported rather than hidden.
fn collect_goals<S, N, C>(store: &GoalStore<S, N, C>, all: bool) -> anyhow::Result<Vec<Goal>>
where
    S: KeyValueStore,
    N: RefreshNotifier,
    C: Clock,
{
    let result = if all {
        store.try_load_all()
    } else {
        store.try_load_current_month_goals()
    };
    match result {
        Ok(goals) => Ok(goals),
        Err(GoalError::NoData { .. }) => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Toggle `id` and describe what happened.
///
/// An unknown id or an empty container is a no-op, not a failure.
fn toggle<S, N, C>(store: &GoalStore<S, N, C>, id: &str) -> anyhow::Result<String>
where
    S: KeyValueStore,
    N: RefreshNotifier,
    C: Clock,
{
    match store.try_toggle_goal(id) {
        Ok(goal) => Ok(format!(
            "{} '{}' ({})",
            if goal.is_completed {
                "Completed"
            } else {
                "Reopened"
            },
            goal.title,
            goal.id
        )),
        Err(GoalError::NotFound(_)) => Ok(format!("No goal with id '{}'; nothing changed.", id)),
        Err(GoalError::NoData { key }) => Ok(format!(
            "No goals stored under '{}'; nothing changed.",
            key
        )),
        Err(e) => Err(e.into()),
    }
}

fn format_goal_table(goals: &[Goal]) -> String {
    let mut out = format!("{:<12} {:<32} {:<8} {:<6}\n", "ID", "TITLE", "MONTH", "DONE");
    out.push_str(&"-".repeat(61));
    out.push('\n');
    for g in goals {
        out.push_str(&format!(
            "{:<12} {:<32} {:<8} {:<6}\n",
            truncate(&g.id, 12),
            truncate(&g.title, 32),
            g.year_month().to_string(),
            if g.is_completed { "yes" } else { "no" },
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}
