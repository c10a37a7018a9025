//! End-to-end flow over a real on-disk store: plan a day, record work,
//! derive metrics, restart, and confirm everything survives.

use std::sync::Arc;

use routine_tracker::metrics;
use routine_tracker::model::{GoalPatch, TaskPatch, TaskStatus};
use routine_tracker::repository::Repository;
use routine_tracker::store::{BucketStore, JsonFileStore};

fn date(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn plan_work_measure_restart() {
    let dir = tempfile::tempdir().unwrap();
    let may1 = date("2024-05-01");

    let (task_id, goal_id) = {
        let store: Arc<dyn BucketStore> = Arc::new(JsonFileStore::new(dir.path()).unwrap());
        let mut repo = Repository::open(store).await;
        assert!(repo.tasks().is_empty());

        // Plan the day.
        let task_id = repo.add_task_named("Deep Work", may1).await.unwrap();
        repo.update_task(
            task_id,
            TaskPatch {
                hours: Some(2.0),
                working_hours: Some(1.5),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap();

        // Track the month.
        let goal_id = repo.add_goal(may1).await.unwrap();
        repo.update_goal(
            goal_id,
            GoalPatch {
                title: Some("Finish the thesis draft".to_string()),
                progress: Some(25),
                ..GoalPatch::default()
            },
        )
        .await
        .unwrap();

        let focus_id = repo.add_focus_item().await.unwrap();
        repo.add_quick_label("Evening Review").await.unwrap();

        // Derived metrics over the live collection.
        let totals = metrics::daily_totals(repo.tasks(), may1);
        assert_eq!(totals.allocated, 2.0);
        assert_eq!(totals.worked, 1.5);
        assert_eq!(metrics::efficiency_ratio(repo.task(task_id).unwrap()), 75.0);

        let week = metrics::weekly_series(repo.tasks(), may1);
        assert_eq!(week.len(), 7);
        assert_eq!(week.last().unwrap().score, 75);

        let month = metrics::monthly_series(repo.tasks(), may1);
        assert_eq!(month.len(), 30);
        assert_eq!(month.last().unwrap().day, "01");

        repo.toggle_task_status(task_id).await.unwrap();
        assert!(repo.focus_items().iter().any(|i| i.id == focus_id));
        (task_id, goal_id)
    };

    // Fresh store handle over the same directory: a process restart.
    let store: Arc<dyn BucketStore> = Arc::new(JsonFileStore::new(dir.path()).unwrap());
    let repo = Repository::open(store).await;

    let task = repo.task(task_id).expect("task survived restart");
    assert_eq!(task.description, "Deep Work");
    assert_eq!(task.hours, 2.0);
    assert_eq!(task.working_hours, 1.5);
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.date, may1);

    let goal = repo.goals().iter().find(|g| g.id == goal_id).unwrap();
    assert_eq!(goal.title, "Finish the thesis draft");
    assert_eq!(goal.progress, 25);

    assert_eq!(repo.focus_items().len(), 1);
    assert!(repo.quick_labels().contains(&"Evening Review".to_string()));

    // The day's snapshot still reads in insertion order.
    let day = repo.tasks_for(may1);
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].description, "Deep Work");
}
