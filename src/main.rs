use std::sync::Arc;

use chrono::NaiveDate;
use tokio::io::{AsyncBufReadExt, BufReader};

use routine_tracker::config::TrackerConfig;
use routine_tracker::feedback::{
    FeedbackBackend, FeedbackConfig, FeedbackRequester, PromptOptions, create_model,
};
use routine_tracker::metrics;
use routine_tracker::model::{FocusPatch, GoalPatch, TaskPatch};
use routine_tracker::repository::Repository;
use routine_tracker::store::JsonFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = TrackerConfig::from_env()?;

    // Feedback is optional: without an API key the tracker still runs, only
    // the `feedback` command is unavailable.
    let requester = build_requester(&config);

    let store = Arc::new(JsonFileStore::new(&config.data_dir)?);
    let mut repo = Repository::open(store).await;

    let mut current_date = chrono::Local::now().date_naive();

    eprintln!("⚡ Routine Tracker v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Data dir: {}", config.data_dir.display());
    eprintln!(
        "   Feedback: {}",
        if requester.is_some() {
            "enabled"
        } else {
            "disabled (set ANTHROPIC_API_KEY or OPENAI_API_KEY)"
        }
    );
    eprintln!("   Type 'help' for commands. 'quit' to exit.\n");

    print_day(&repo, current_date);

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        let (command, rest) = split_word(line);
        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "date" => match rest.parse::<NaiveDate>() {
                Ok(date) => {
                    current_date = date;
                    print_day(&repo, current_date);
                }
                Err(_) => println!("Expected a date like 2024-05-01"),
            },
            "list" => print_day(&repo, current_date),
            "add" => {
                if rest.is_empty() {
                    repo.add_task(current_date).await?;
                } else {
                    repo.add_task_named(rest, current_date).await?;
                }
                print_day(&repo, current_date);
            }
            "pull" => match parse_index(rest) {
                Some(index) => {
                    if repo.add_task_from_label(index, current_date).await?.is_none() {
                        println!("No quick label #{}", rest);
                    }
                    print_day(&repo, current_date);
                }
                None => println!("Usage: pull <label#>"),
            },
            "rm" => {
                if let Some(id) = task_id_at(&repo, current_date, rest) {
                    repo.remove_task(id).await?;
                    print_day(&repo, current_date);
                }
            }
            "done" => {
                if let Some(id) = task_id_at(&repo, current_date, rest) {
                    repo.toggle_task_status(id).await?;
                    print_day(&repo, current_date);
                }
            }
            "hours" | "worked" => {
                let (index, value) = split_word(rest);
                if let Some(id) = task_id_at(&repo, current_date, index) {
                    // Bad numbers coerce to zero rather than rejecting the edit.
                    let value: f64 = value.parse().unwrap_or(0.0);
                    let patch = if command == "hours" {
                        TaskPatch {
                            hours: Some(value),
                            ..TaskPatch::default()
                        }
                    } else {
                        TaskPatch {
                            working_hours: Some(value),
                            ..TaskPatch::default()
                        }
                    };
                    repo.update_task(id, patch).await?;
                    print_day(&repo, current_date);
                }
            }
            "desc" | "time" | "note" | "reason" => {
                let (index, text) = split_word(rest);
                if let Some(id) = task_id_at(&repo, current_date, index) {
                    let text = text.to_string();
                    let patch = match command {
                        "desc" => TaskPatch {
                            description: Some(text),
                            ..TaskPatch::default()
                        },
                        "time" => TaskPatch {
                            time_range: Some(text),
                            ..TaskPatch::default()
                        },
                        "note" => TaskPatch {
                            notes: Some(text),
                            ..TaskPatch::default()
                        },
                        _ => TaskPatch {
                            reason: Some(text),
                            ..TaskPatch::default()
                        },
                    };
                    repo.update_task(id, patch).await?;
                    print_day(&repo, current_date);
                }
            }
            "labels" => print_labels(&repo),
            "label" => {
                let (sub, arg) = split_word(rest);
                match sub {
                    "add" if !arg.is_empty() => {
                        repo.add_quick_label(arg).await?;
                        print_labels(&repo);
                    }
                    "rm" => match parse_index(arg) {
                        Some(index) => {
                            repo.remove_quick_label(index).await?;
                            print_labels(&repo);
                        }
                        None => println!("Usage: label rm <label#>"),
                    },
                    _ => println!("Usage: label add <text> | label rm <label#>"),
                }
            }
            "focus" => {
                let (sub, arg) = split_word(rest);
                match sub {
                    "" => print_focus(&repo),
                    "add" => {
                        let id = repo.add_focus_item().await?;
                        if !arg.is_empty() {
                            repo.update_focus_item(
                                id,
                                FocusPatch {
                                    description: Some(arg.to_string()),
                                    ..FocusPatch::default()
                                },
                            )
                            .await?;
                        }
                        print_focus(&repo);
                    }
                    "rm" => {
                        if let Some(id) = focus_id_at(&repo, arg) {
                            repo.remove_focus_item(id).await?;
                            print_focus(&repo);
                        }
                    }
                    "status" => {
                        let (index, text) = split_word(arg);
                        if let Some(id) = focus_id_at(&repo, index) {
                            repo.update_focus_item(
                                id,
                                FocusPatch {
                                    status: Some(text.to_string()),
                                    ..FocusPatch::default()
                                },
                            )
                            .await?;
                            print_focus(&repo);
                        }
                    }
                    _ => println!("Usage: focus | focus add [text] | focus rm <#> | focus status <#> <text>"),
                }
            }
            "goals" => print_goals(&repo),
            "goal" => {
                let (sub, arg) = split_word(rest);
                match sub {
                    "add" => {
                        repo.add_goal(current_date).await?;
                        print_goals(&repo);
                    }
                    "rm" => {
                        if let Some(id) = goal_id_at(&repo, arg) {
                            repo.remove_goal(id).await?;
                            print_goals(&repo);
                        }
                    }
                    "cycle" => {
                        if let Some(id) = goal_id_at(&repo, arg) {
                            repo.cycle_goal_priority(id).await?;
                            print_goals(&repo);
                        }
                    }
                    "progress" => {
                        let (index, value) = split_word(arg);
                        if let Some(id) = goal_id_at(&repo, index) {
                            let progress: i32 = value.parse().unwrap_or(0);
                            repo.update_goal(
                                id,
                                GoalPatch {
                                    progress: Some(progress),
                                    ..GoalPatch::default()
                                },
                            )
                            .await?;
                            print_goals(&repo);
                        }
                    }
                    "title" => {
                        let (index, text) = split_word(arg);
                        if let Some(id) = goal_id_at(&repo, index) {
                            repo.update_goal(
                                id,
                                GoalPatch {
                                    title: Some(text.to_string()),
                                    ..GoalPatch::default()
                                },
                            )
                            .await?;
                            print_goals(&repo);
                        }
                    }
                    _ => println!(
                        "Usage: goal add | goal rm <#> | goal cycle <#> | goal progress <#> <pct> | goal title <#> <text>"
                    ),
                }
            }
            "summary" => print_summary(&repo, current_date),
            "week" => print_week(&repo, current_date),
            "month" => print_month(&repo, current_date),
            "feedback" => match &requester {
                Some(requester) => {
                    eprintln!("🧠 Asking the mentor...");
                    let tasks = repo.tasks_for(current_date);
                    let outcome = requester.daily_feedback(&tasks).await;
                    println!("\n\"{}\"\n", outcome.text());
                }
                None => println!("Feedback is disabled — set ANTHROPIC_API_KEY or OPENAI_API_KEY."),
            },
            _ => println!("Unknown command {command:?}. Type 'help'."),
        }
        eprint!("> ");
    }

    Ok(())
}

/// Build the feedback requester from the environment, if a key is present.
fn build_requester(config: &TrackerConfig) -> Option<FeedbackRequester> {
    let (backend, key_var, default_model) =
        match std::env::var("ROUTINE_FEEDBACK_BACKEND").as_deref() {
            Ok("openai") => (FeedbackBackend::OpenAi, "OPENAI_API_KEY", "gpt-4o"),
            _ => (
                FeedbackBackend::Anthropic,
                "ANTHROPIC_API_KEY",
                "claude-sonnet-4-20250514",
            ),
        };

    let api_key = std::env::var(key_var).ok()?;
    let model = std::env::var("ROUTINE_FEEDBACK_MODEL")
        .unwrap_or_else(|_| default_model.to_string());

    let feedback_config = FeedbackConfig {
        backend,
        api_key: secrecy::SecretString::from(api_key),
        model,
    };
    match create_model(&feedback_config) {
        Ok(model) => Some(FeedbackRequester::new(model).with_options(PromptOptions {
            language: config.feedback_language.clone(),
            word_limit: config.feedback_word_limit,
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Feedback model unavailable");
            None
        }
    }
}

/// Split off the first whitespace-delimited word; the remainder is trimmed.
fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (input, ""),
    }
}

/// Parse a 1-based index argument into a 0-based one.
fn parse_index(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok().filter(|n| *n >= 1).map(|n| n - 1)
}

fn task_id_at(repo: &Repository, date: NaiveDate, arg: &str) -> Option<uuid::Uuid> {
    let index = match parse_index(arg) {
        Some(index) => index,
        None => {
            println!("Expected a task number (see 'list')");
            return None;
        }
    };
    let tasks = repo.tasks_for(date);
    match tasks.get(index) {
        Some(task) => Some(task.id),
        None => {
            println!("No task #{} on {}", index + 1, date);
            None
        }
    }
}

fn focus_id_at(repo: &Repository, arg: &str) -> Option<uuid::Uuid> {
    parse_index(arg)
        .and_then(|index| repo.focus_items().get(index))
        .map(|item| item.id)
        .or_else(|| {
            println!("Expected a focus item number (see 'focus')");
            None
        })
}

fn goal_id_at(repo: &Repository, arg: &str) -> Option<uuid::Uuid> {
    parse_index(arg)
        .and_then(|index| repo.goals().get(index))
        .map(|goal| goal.id)
        .or_else(|| {
            println!("Expected a goal number (see 'goals')");
            None
        })
}

fn print_help() {
    println!(
        "\
Tasks (for the selected date):
  list                       show the day's schedule
  add [description]          add a task
  pull <label#>              add a task from a quick label
  done <#>                   toggle completed
  hours <#> <h>              set planned hours
  worked <#> <h>             set worked hours
  desc|time|note|reason <#> <text>
  rm <#>                     delete a task
Quick labels:
  labels | label add <text> | label rm <#>
Focus items:
  focus | focus add [text] | focus rm <#> | focus status <#> <text>
Monthly goals:
  goals | goal add | goal rm <#> | goal cycle <#>
  goal progress <#> <pct> | goal title <#> <text>
Views:
  summary | week | month
Other:
  date <YYYY-MM-DD>          switch the selected date
  feedback                   ask the AI mentor about the day
  quit"
    );
}

fn print_day(repo: &Repository, date: NaiveDate) {
    let tasks = repo.tasks_for(date);
    println!("\n{date} — {} task(s)", tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        let mark = if task.status.is_completed() { "✓" } else { "·" };
        println!(
            "  {:>2}. {mark} [{}] {} — {}h planned, {}h done ({:.0}%)",
            i + 1,
            task.time_range,
            task.description,
            task.hours,
            task.working_hours,
            metrics::efficiency_ratio(task),
        );
        if let Some(notes) = task.notes.as_deref().filter(|n| !n.is_empty()) {
            println!("        notes: {notes}");
        }
        if let Some(reason) = task.reason.as_deref().filter(|r| !r.is_empty()) {
            println!("        reason: {reason}");
        }
    }
}

fn print_summary(repo: &Repository, date: NaiveDate) {
    let summary = metrics::daily_summary(repo.tasks(), date);
    let quotient = if summary.total_hours > 0.0 {
        (summary.worked_hours / summary.total_hours * 100.0).round()
    } else {
        0.0
    };
    println!("\n{date}");
    println!("  Total capacity  {}h ({}m)", summary.total_hours, summary.total_minutes);
    println!("  Net worked      {}h ({}m)", summary.worked_hours, summary.worked_minutes);
    println!("  Focus quotient  {quotient}%");
}

fn print_week(repo: &Repository, end: NaiveDate) {
    println!("\nWeek ending {end}");
    for point in metrics::weekly_series(repo.tasks(), end) {
        println!(
            "  {:<3} target {:>5.1}h  done {:>5.1}h  score {:>3}%",
            point.label, point.target, point.done, point.score
        );
    }
}

fn print_month(repo: &Repository, end: NaiveDate) {
    println!("\n30 days ending {end}");
    for point in metrics::monthly_series(repo.tasks(), end) {
        println!("  {}  {:>6.1}%", point.day, point.efficiency);
    }
}

fn print_labels(repo: &Repository) {
    println!("\nQuick labels:");
    for (i, label) in repo.quick_labels().iter().enumerate() {
        println!("  {:>2}. {label}", i + 1);
    }
}

fn print_focus(repo: &Repository) {
    let items = repo.focus_items();
    println!("\nImmediate focus — {} item(s)", items.len());
    for (i, item) in items.iter().enumerate() {
        println!("  {:>2}. {} [{}]", i + 1, item.description, item.status);
    }
}

fn print_goals(repo: &Repository) {
    let goals = repo.goals();
    println!("\nMonthly goals — {} goal(s)", goals.len());
    for (i, goal) in goals.iter().enumerate() {
        println!(
            "  {:>2}. {} — {:?} priority, {}% complete, deadline {}",
            i + 1,
            goal.title,
            goal.priority,
            goal.progress,
            goal.deadline
        );
    }
}
