//! Demo for the task list.
//!
//! Walks a seeded mock backend through fetch, add, toggle, delete and a
//! filter change, printing the list after each step.

use anyhow::Context;
use taskstore::{Filter, Task, TaskId, TaskList, TasksConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_tasks(heading: &str, tasks: &[Task]) {
    println!("\n{heading}");
    if tasks.is_empty() {
        println!("  (none)");
    }
    for task in tasks {
        let status = if task.completed { "x" } else { " " };
        println!("  {:>3} [{status}] {}", task.id.get(), task.title);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskstore=debug,taskstore_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TasksConfig::from_env().context("loading configuration")?;
    tracing::info!(?config, "starting task list demo");

    println!("=== Task List ===");
    let (list, api) = TaskList::from_config(&config);

    list.fetch_all().await?;
    print_tasks("Fetched:", &list.tasks().await);

    list.add_one("Buy milk").await?;
    print_tasks("After adding 'Buy milk':", &list.tasks().await);

    list.toggle_one(TaskId::new(2)).await?;
    print_tasks("After toggling #2:", &list.tasks().await);

    list.delete_one(TaskId::new(1)).await?;
    print_tasks("After deleting #1:", &list.tasks().await);

    for filter in Filter::ALL {
        list.set_filter(filter).await?;
        print_tasks(&format!("Filter '{filter}':"), &list.filtered_view().await);
    }

    let state = list.snapshot().await;
    println!(
        "\nCompleted: {}/{}  loading: {}",
        state.completed_count(),
        state.count(),
        state.is_loading()
    );
    println!("Backend holds {} task(s)", api.snapshot().len());
    println!(
        "\nState:\n{}",
        serde_json::to_string_pretty(&state).context("serializing state")?
    );

    Ok(())
}
