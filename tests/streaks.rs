mod common;

use common::{date, test_pool};

use focusday_api::models::focus::FocusCategory;
use focusday_api::models::streak::StreakKind;
use focusday_api::store::streaks::{self, StreakFields};

fn fields(name: &str, frequency_per_week: i64) -> StreakFields {
    StreakFields {
        icon: "🔥".into(),
        name: name.into(),
        frequency_per_week,
        kind: StreakKind::Simple,
        focus_id: None,
        associated_focus_ids: Vec::new(),
    }
}

// Nov 9 2025 is a Sunday; the week containing Nov 12 runs Nov 9 .. Nov 16.

#[tokio::test]
async fn week_quota_met_with_enough_completions() {
    let pool = test_pool().await;
    let streak = streaks::add_streak(&pool, fields("Gym", 3)).await.unwrap();

    for d in [date(2025, 11, 10), date(2025, 11, 11), date(2025, 11, 12)] {
        streaks::mark_complete(&pool, streak.id, Some(d), None).await.unwrap();
    }

    let (completed, target) = streaks::week_progress(&pool, &streak, date(2025, 11, 12))
        .await
        .unwrap();
    assert_eq!((completed, target), (3, 3));
    assert!(streaks::is_complete_for_week(&pool, &streak, date(2025, 11, 12)).await.unwrap());
}

#[tokio::test]
async fn week_quota_not_met_with_too_few_completions() {
    let pool = test_pool().await;
    let streak = streaks::add_streak(&pool, fields("Gym", 3)).await.unwrap();

    for d in [date(2025, 11, 10), date(2025, 11, 11)] {
        streaks::mark_complete(&pool, streak.id, Some(d), None).await.unwrap();
    }

    assert!(!streaks::is_complete_for_week(&pool, &streak, date(2025, 11, 12)).await.unwrap());
}

#[tokio::test]
async fn completions_outside_the_week_do_not_count() {
    let pool = test_pool().await;
    let streak = streaks::add_streak(&pool, fields("Reading", 2)).await.unwrap();

    // Sat Nov 8 is in the previous Sunday-based week; Sun Nov 16 in the next
    streaks::mark_complete(&pool, streak.id, Some(date(2025, 11, 8)), None).await.unwrap();
    streaks::mark_complete(&pool, streak.id, Some(date(2025, 11, 16)), None).await.unwrap();
    streaks::mark_complete(&pool, streak.id, Some(date(2025, 11, 12)), None).await.unwrap();

    let (completed, _) = streaks::week_progress(&pool, &streak, date(2025, 11, 12))
        .await
        .unwrap();
    assert_eq!(completed, 1);
}

#[tokio::test]
async fn marking_complete_twice_counts_twice() {
    // The data layer is append-only; same-day double submission is not
    // deduplicated here, the client disables the button instead.
    let pool = test_pool().await;
    let streak = streaks::add_streak(&pool, fields("Water", 7)).await.unwrap();

    streaks::mark_complete(&pool, streak.id, Some(date(2025, 11, 12)), None).await.unwrap();
    streaks::mark_complete(&pool, streak.id, Some(date(2025, 11, 12)), None).await.unwrap();

    let (completed, _) = streaks::week_progress(&pool, &streak, date(2025, 11, 12))
        .await
        .unwrap();
    assert_eq!(completed, 2);
}

#[tokio::test]
async fn deleting_a_streak_purges_its_completions() {
    let pool = test_pool().await;
    let kept = streaks::add_streak(&pool, fields("Kept", 1)).await.unwrap();
    let doomed = streaks::add_streak(&pool, fields("Doomed", 1)).await.unwrap();

    streaks::mark_complete(&pool, kept.id, Some(date(2025, 11, 10)), None).await.unwrap();
    streaks::mark_complete(&pool, doomed.id, Some(date(2025, 11, 10)), None).await.unwrap();
    streaks::mark_complete(&pool, doomed.id, Some(date(2025, 11, 11)), None).await.unwrap();

    assert!(streaks::delete_streak(&pool, doomed.id).await.unwrap());

    assert!(streaks::completions_for(&pool, doomed.id).await.unwrap().is_empty());
    assert_eq!(streaks::completions_for(&pool, kept.id).await.unwrap().len(), 1);
    assert!(streaks::get_streak(&pool, doomed.id).await.unwrap().is_none());
}

#[tokio::test]
async fn completed_on_matches_the_exact_calendar_day() {
    let pool = test_pool().await;
    let streak = streaks::add_streak(&pool, fields("Meditate", 5)).await.unwrap();

    streaks::mark_complete(&pool, streak.id, Some(date(2025, 11, 12)), None).await.unwrap();

    assert!(streaks::is_completed_on(&pool, streak.id, date(2025, 11, 12)).await.unwrap());
    assert!(!streaks::is_completed_on(&pool, streak.id, date(2025, 11, 13)).await.unwrap());
}

#[tokio::test]
async fn removing_a_completion_updates_progress() {
    let pool = test_pool().await;
    let streak = streaks::add_streak(&pool, fields("Run", 2)).await.unwrap();

    let completion = streaks::mark_complete(&pool, streak.id, Some(date(2025, 11, 12)), None)
        .await
        .unwrap();
    assert!(streaks::remove_completion(&pool, completion.id).await.unwrap());
    assert!(!streaks::remove_completion(&pool, completion.id).await.unwrap());

    let (completed, _) = streaks::week_progress(&pool, &streak, date(2025, 11, 12))
        .await
        .unwrap();
    assert_eq!(completed, 0);
}

#[tokio::test]
async fn streaks_sort_by_most_recent_completion() {
    let pool = test_pool().await;
    let older = streaks::add_streak(&pool, fields("Older activity", 1)).await.unwrap();
    let newer = streaks::add_streak(&pool, fields("Newer activity", 1)).await.unwrap();

    streaks::mark_complete(&pool, older.id, Some(date(2025, 11, 10)), None).await.unwrap();
    streaks::mark_complete(&pool, newer.id, Some(date(2025, 11, 12)), None).await.unwrap();

    let sorted = streaks::list_streaks_sorted(&pool).await.unwrap();
    assert_eq!(sorted[0].id, newer.id);
    assert_eq!(sorted[1].id, older.id);
}

#[tokio::test]
async fn never_completed_streaks_fall_back_to_creation_date() {
    let pool = test_pool().await;
    let completed_long_ago = streaks::add_streak(&pool, fields("Dormant", 1)).await.unwrap();
    let fresh = streaks::add_streak(&pool, fields("Fresh", 1)).await.unwrap();

    // Dormant's last completion predates Fresh's creation (today)
    streaks::mark_complete(&pool, completed_long_ago.id, Some(date(2020, 1, 1)), None)
        .await
        .unwrap();

    let sorted = streaks::list_streaks_sorted(&pool).await.unwrap();
    assert_eq!(sorted[0].id, fresh.id);
    assert_eq!(sorted[1].id, completed_long_ago.id);
}

#[tokio::test]
async fn update_replaces_fields() {
    let pool = test_pool().await;
    let streak = streaks::add_streak(&pool, fields("Draft", 1)).await.unwrap();

    let updated = streaks::update_streak(
        &pool,
        streak.id,
        StreakFields {
            icon: "🏋️".into(),
            name: "Lift".into(),
            frequency_per_week: 4,
            kind: StreakKind::SpecificFocus,
            focus_id: Some(FocusCategory::Fitness),
            associated_focus_ids: vec![FocusCategory::Fitness, FocusCategory::Balance],
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.id, streak.id);
    assert_eq!(updated.name, "Lift");
    assert_eq!(updated.frequency_per_week, 4);
    assert_eq!(updated.kind, StreakKind::SpecificFocus);
    assert_eq!(updated.focus_id, Some(FocusCategory::Fitness));
    assert_eq!(
        updated.associated_focus_ids,
        vec![FocusCategory::Fitness, FocusCategory::Balance]
    );
}

#[tokio::test]
async fn update_of_unknown_streak_is_none() {
    let pool = test_pool().await;
    let result = streaks::update_streak(&pool, uuid::Uuid::new_v4(), fields("Ghost", 1))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn corrupt_focus_ids_degrade_to_empty_and_are_counted() {
    let pool = test_pool().await;
    let streak = streaks::add_streak(&pool, fields("Broken", 1)).await.unwrap();

    sqlx::query("UPDATE streaks SET associated_focus_ids = 'not json' WHERE id = ?1")
        .bind(streak.id)
        .execute(&pool)
        .await
        .unwrap();

    let before = focusday_api::store::decode_failures();
    let loaded = streaks::get_streak(&pool, streak.id).await.unwrap().unwrap();
    assert!(loaded.associated_focus_ids.is_empty());
    assert!(focusday_api::store::decode_failures() > before);
}
