use courier::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_warnings_alone_are_not_a_failure() {
	let store = NotificationStore::new();
	store.add(&Warning::new("Stock is running low")).await;

	assert!(!store.has_notifications().await);
	assert!(store.has_warnings().await);
	assert!(store.has_notifications_with(NotificationFilter::FAILURES.warnings(true)).await);
}

#[tokio::test]
async fn test_notification_is_a_failure() {
	let store = NotificationStore::new();
	store.add(&Notification::new("Name is required")).await;
	assert!(store.has_notifications().await);
}

#[tokio::test]
async fn test_system_error_is_a_failure_unless_filtered_out() {
	let store = NotificationStore::new();
	store.add(&SystemError::new("connection refused")).await;

	assert!(store.has_notifications().await);
	assert!(store.has_system_errors().await);
	assert!(!store.has_notifications_with(NotificationFilter::FAILURES.system_errors(false)).await);
}

#[tokio::test]
async fn test_logs_never_count_as_failure() {
	let store = NotificationStore::new();
	store.add(&Log::new("started")).await;

	assert!(store.has_logs().await);
	assert!(!store.has_notifications().await);
	assert!(!store.has_notifications_with(NotificationFilter::ALL).await);
}

#[tokio::test]
async fn test_get_all_merges_in_creation_order() {
	let store = NotificationStore::new();
	// Created before it is added, so it sorts first even though it is stored last.
	let early = Warning::new("first");
	tokio::time::sleep(Duration::from_millis(2)).await;
	let second = Notification::new("second");
	tokio::time::sleep(Duration::from_millis(2)).await;
	let third = Log::new("third");

	store.add(&second).await;
	store.add(&third).await;
	store.add(&early).await;

	let all = store.get_all(NotificationFilter::ALL).await;
	let messages: Vec<&str> = all.iter().map(|r| r.notification().message()).collect();
	assert_eq!(messages, vec!["first", "second", "third"]);
	assert!(all.windows(2).all(|pair| pair[0].created_at() <= pair[1].created_at()));

	let without_logs = store.get_all(NotificationFilter::ALL.logs(false)).await;
	assert_eq!(without_logs.len(), 2);
	assert!(without_logs.iter().all(|r| !matches!(r, NotificationRecord::Log(_))));
}

#[tokio::test]
async fn test_find_filters_records() {
	let store = NotificationStore::new();
	store.add(&Notification::new("Name is required").with_code("NAME")).await;
	store.add(&Notification::new("Email is required").with_code("EMAIL")).await;
	store.add(&Warning::new("Name looks odd").with_code("NAME")).await;

	let by_code = store.find(|r| r.notification().code() == Some("NAME"), NotificationFilter::ALL).await;
	assert_eq!(by_code.len(), 2);

	let failures_only = store.find(|r| r.notification().code() == Some("NAME"), NotificationFilter::FAILURES).await;
	assert_eq!(failures_only.len(), 1);
	assert_eq!(failures_only[0].to_string(), "[NAME] Name is required");
}

#[tokio::test]
async fn test_clear_is_idempotent() {
	let store = NotificationStore::new();
	store.clear().await;

	store.add(&Notification::new("n")).await;
	store.add(&Warning::new("w")).await;
	store.add(&SystemError::new("e")).await;
	store.add(&Log::new("l")).await;
	assert_eq!(store.len().await, 4);

	store.clear().await;
	store.clear().await;
	assert!(store.is_empty().await);
	assert!(!store.has_notifications_with(NotificationFilter::ALL).await);
}

#[tokio::test]
async fn test_only_notification_kinds_are_stored() {
	let store = NotificationStore::new();
	assert!(!store.add(&StoredEvent::new(None)).await);
	assert!(!store.add(&EnqueueWorksEvent::new(vec![])).await);
	assert!(store.is_empty().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_are_all_kept() {
	let store = Arc::new(NotificationStore::new());

	let tasks: Vec<_> = (0..64)
		.map(|i| {
			let store = Arc::clone(&store);
			tokio::spawn(async move {
				match i % 2 {
					0 => store.add(&Notification::new(format!("n{i}"))).await,
					_ => store.add(&Warning::new(format!("w{i}"))).await,
				}
			})
		})
		.collect();
	for task in tasks {
		assert!(task.await.unwrap());
	}

	assert_eq!(store.notifications().await.len(), 32);
	assert_eq!(store.warnings().await.len(), 32);
}
