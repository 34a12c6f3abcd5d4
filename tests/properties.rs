use std::collections::HashSet;

use proptest::prelude::*;

use taskflow::{
    aggregate, filter_tasks, Choice, FilterCriteria, Priority, Task, TaskDraft, TaskStatus,
};

fn status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::NotStarted),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
        Just(TaskStatus::Unrecognized("Blocked".to_string())),
    ]
}

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::Low), Just(Priority::Medium), Just(Priority::High)]
}

fn category_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Work".to_string()),
        Just("Personal".to_string()),
        Just("Health".to_string()),
        Just(String::new()),
    ]
}

fn task_strategy() -> impl Strategy<Value = Task> {
    (
        "[a-zA-Z ]{1,12}",
        proptest::option::of("[a-zA-Z ]{0,12}"),
        status_strategy(),
        priority_strategy(),
        category_strategy(),
    )
        .prop_map(|(title, description, status, priority, category)| {
            let mut task = Task::from_draft(TaskDraft::new(title), None);
            task.description = description;
            task.status = status;
            task.priority = priority;
            task.category = category;
            task
        })
}

fn criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        proptest::option::of(status_strategy()),
        proptest::option::of(priority_strategy()),
        proptest::option::of(category_strategy()),
        "[a-zA-Z]{0,3}",
    )
        .prop_map(|(status, priority, category, search_text)| FilterCriteria {
            status: status.map_or(Choice::All, Choice::Only),
            priority: priority.map_or(Choice::All, Choice::Only),
            category: category.map_or(Choice::All, Choice::Only),
            search_text,
        })
}

/// True when `sub` appears in `full` in the same relative order.
fn is_ordered_subset(sub: &[Task], full: &[Task]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|s| rest.any(|f| f.id == s.id))
}

proptest! {
    #[test]
    fn filter_of_empty_is_empty(criteria in criteria_strategy()) {
        prop_assert!(filter_tasks(&[], &criteria).is_empty());
    }

    #[test]
    fn filter_is_ordered_subset(
        tasks in proptest::collection::vec(task_strategy(), 0..20),
        criteria in criteria_strategy(),
    ) {
        let result = filter_tasks(&tasks, &criteria);
        prop_assert!(result.len() <= tasks.len());
        prop_assert!(is_ordered_subset(&result, &tasks));
    }

    #[test]
    fn default_criteria_is_identity(tasks in proptest::collection::vec(task_strategy(), 0..20)) {
        prop_assert_eq!(filter_tasks(&tasks, &FilterCriteria::default()), tasks);
    }

    #[test]
    fn filter_is_idempotent(
        tasks in proptest::collection::vec(task_strategy(), 0..20),
        criteria in criteria_strategy(),
    ) {
        let once = filter_tasks(&tasks, &criteria);
        let twice = filter_tasks(&once, &criteria);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn search_ignores_case(
        tasks in proptest::collection::vec(task_strategy(), 0..20),
        needle in "[a-z]{1,3}",
    ) {
        let lower = filter_tasks(&tasks, &FilterCriteria::new().with_search(needle.clone()));
        let upper = filter_tasks(&tasks, &FilterCriteria::new().with_search(needle.to_uppercase()));
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn aggregate_partitions_categorized_tasks(
        tasks in proptest::collection::vec(task_strategy(), 0..30),
    ) {
        let projects = aggregate(&tasks);
        let categorized = tasks.iter().filter(|t| !t.category.is_empty()).count();
        let counted: usize = projects.iter().map(|p| p.task_count).sum();
        prop_assert_eq!(counted, categorized);

        for project in &projects {
            prop_assert!(!project.name.is_empty());
            prop_assert!(project.status_counts.total() <= project.task_count);
            prop_assert!(project.completion_percentage() <= 100);
        }

        let names: HashSet<_> = projects.iter().map(|p| p.name.as_str()).collect();
        prop_assert_eq!(names.len(), projects.len());
    }
}

#[test]
fn completed_filter_scenario() {
    let mut run = Task::from_draft(TaskDraft::new("Run"), None);
    run.status = TaskStatus::Completed;
    run.priority = Priority::Low;
    run.category = "Health".to_string();
    let mut report = Task::from_draft(TaskDraft::new("Report"), None);
    report.status = TaskStatus::NotStarted;
    report.priority = Priority::High;
    report.category = "Work".to_string();
    let tasks = vec![run.clone(), report];

    let result = filter_tasks(&tasks, &FilterCriteria::new().with_status(TaskStatus::Completed));
    assert_eq!(result, vec![run]);
}
