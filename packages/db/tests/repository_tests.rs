#![allow(clippy::disallowed_methods)]

mod common;

use chrono::NaiveDate;
use queue_core::{
    AssignmentStatus, AssignmentStore, GenreFamily, Member, Queue, QueueEditor, QueueStatus, Session, Subgenre,
    Submission, SubmissionStatus,
};
use std::error::Error;
use std::sync::Arc;

use db::repositories::{
    AssignmentRepository, GenreRepository, MemberRepository, NewAssignment, QueueRepository,
    SettingsRepository, SubmissionFilter, SubmissionRepository,
};
use db::{DbError, SurrealAssignmentStore};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, d).expect("valid date")
}

// One runtime for the whole binary: the in-memory connection lives in a
// process-wide cell and is bound to the runtime that opened it.
#[tokio::test]
async fn test_repositories() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    check_queues().await?;
    check_members_submissions_and_genres().await?;
    check_assignments().await?;
    check_editor_over_surreal_store().await?;
    check_settings().await?;

    Ok(())
}

async fn check_queues() -> Result<(), Box<dyn Error>> {
    common::reset_db().await?;

    // create/get/update_status/update/delete/exists
    let mut queue = Queue::new(day(1), 20).with_notes("opening day");
    let created = QueueRepository::create(&queue).await?;
    assert_eq!(created.date, day(1));
    assert_eq!(created.status, QueueStatus::Draft);
    assert_eq!(created.notes.as_deref(), Some("opening day"));

    let loaded = QueueRepository::get(queue.id).await?;
    assert_eq!(loaded.id, queue.id);
    assert_eq!(loaded.total_slots, 20);

    let approved = QueueRepository::update_status(queue.id, QueueStatus::Approved).await?;
    assert_eq!(approved.status, QueueStatus::Approved);

    queue.total_slots = 25;
    queue.notes = None;
    let updated = QueueRepository::update(&queue).await?;
    assert_eq!(updated.total_slots, 25);
    assert_eq!(updated.notes, None);

    assert!(QueueRepository::exists(queue.id).await?);
    QueueRepository::delete(queue.id).await?;
    assert!(!QueueRepository::exists(queue.id).await?);

    let missing = QueueRepository::get(queue.id).await;
    assert!(matches!(missing, Err(DbError::NotFound(_))));

    // list ordering, lookup by date, status filter, one queue per day
    common::reset_db().await?;
    let older = Queue::new(day(2), 10);
    let newer = Queue::new(day(3), 10);
    QueueRepository::create(&older).await?;
    QueueRepository::create(&newer).await?;

    let list = QueueRepository::list().await?;
    let ids: Vec<_> = list.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    let by_date = QueueRepository::get_by_date(day(2)).await?;
    assert_eq!(by_date.id, older.id);
    assert!(matches!(
        QueueRepository::get_by_date(day(9)).await,
        Err(DbError::NotFound(_))
    ));

    QueueRepository::update_status(newer.id, QueueStatus::Approved).await?;
    let approved = QueueRepository::list_by_status(QueueStatus::Approved).await?;
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, newer.id);

    let duplicate = QueueRepository::create(&Queue::new(day(2), 5)).await;
    assert!(duplicate.is_err());

    Ok(())
}

async fn check_members_submissions_and_genres() -> Result<(), Box<dyn Error>> {
    common::reset_db().await?;

    let ada = MemberRepository::create(&Member::new("Ada Lovelace", "ada@example.com").with_credits(3)).await?;
    let bo = MemberRepository::create(&Member::new("Bo Diddley", "bo@example.com")).await?;

    let members = MemberRepository::list().await?;
    assert_eq!(members.iter().map(|m| m.id).collect::<Vec<_>>(), vec![ada.id, bo.id]);
    assert_eq!(MemberRepository::count().await?, 2);

    let debited = MemberRepository::adjust_credits(ada.id, -5).await?;
    assert_eq!(debited.credits, -2);
    assert_eq!(MemberRepository::get(ada.id).await?.credits, -2);

    let duplicate_email = MemberRepository::create(&Member::new("Ada Again", "ada@example.com")).await;
    assert!(duplicate_email.is_err());

    let track = Submission::new(ada.id, "Ada", "Engines", "https://example.com/engines")
        .with_family("Electronic")
        .with_subgenres(vec!["Ambient".to_string()]);
    let created = SubmissionRepository::create(&track).await?;
    assert_eq!(created.family.as_deref(), Some("Electronic"));
    assert_eq!(created.subgenres, vec!["Ambient".to_string()]);

    let other = SubmissionRepository::create(&Submission::new(
        bo.id,
        "Bo",
        "Mona",
        "https://example.com/mona",
    ))
    .await?;

    SubmissionRepository::update_status(other.id, SubmissionStatus::Approved).await?;

    let pending = SubmissionRepository::list(SubmissionFilter::status(SubmissionStatus::Pending)).await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, track.id);

    let by_bo = SubmissionRepository::list(SubmissionFilter::member(bo.id)).await?;
    assert_eq!(by_bo.len(), 1);
    assert_eq!(by_bo[0].status, SubmissionStatus::Approved);

    assert_eq!(SubmissionRepository::list(SubmissionFilter::default()).await?.len(), 2);

    let electronic = GenreRepository::create_family(&GenreFamily::new("Electronic")).await?;
    GenreRepository::create_family(&GenreFamily::new("Blues")).await?;
    GenreRepository::create_subgenre(&Subgenre::new(electronic.id, "Techno")).await?;
    GenreRepository::create_subgenre(&Subgenre::new(electronic.id, "Ambient")).await?;

    let families = GenreRepository::list_families().await?;
    assert_eq!(
        families.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["Blues", "Electronic"]
    );
    let subgenres = GenreRepository::list_subgenres(electronic.id).await?;
    assert_eq!(
        subgenres.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["Ambient", "Techno"]
    );

    Ok(())
}

async fn check_assignments() -> Result<(), Box<dyn Error>> {
    common::reset_db().await?;

    let queue = QueueRepository::create(&Queue::new(day(5), 10)).await?;
    let supporter = MemberRepository::create(&Member::new("Cleo", "cleo@example.com")).await?;
    let artist = MemberRepository::create(&Member::new("Dee", "dee@example.com")).await?;
    let submission = SubmissionRepository::create(
        &Submission::new(artist.id, "Dee", "Night Drive", "https://example.com/nd").with_family("Synthwave"),
    )
    .await?;

    let first = AssignmentRepository::create(
        NewAssignment::new(queue.id, 2)
            .submission(submission.id)
            .supporter(supporter.id)
            .credits(1),
    )
    .await?;
    let second = AssignmentRepository::create(NewAssignment::new(queue.id, 1)).await?;

    let resolved = first.submission.as_ref().expect("submission resolved");
    assert_eq!(resolved.artist_name, "Dee");
    assert_eq!(first.genre(), "Synthwave");
    assert_eq!(first.supporter_name(), "Cleo");
    assert_eq!(second.genre(), queue_core::UNKNOWN);

    let listed = AssignmentRepository::list_for_queue(queue.id).await?;
    assert_eq!(listed.iter().map(|a| a.id).collect::<Vec<_>>(), vec![second.id, first.id]);
    assert_eq!(AssignmentRepository::count_for_queue(queue.id).await?, 2);

    AssignmentRepository::update_position(second.id, 3).await?;
    assert_eq!(AssignmentRepository::get(second.id).await?.position, 3);

    AssignmentRepository::update_status(first.id, AssignmentStatus::Completed).await?;
    assert_eq!(AssignmentRepository::get(first.id).await?.status, AssignmentStatus::Completed);
    let missing = AssignmentRepository::update_status(queue_core::AssignmentId::new(), AssignmentStatus::Skipped).await;
    assert!(matches!(missing, Err(DbError::NotFound(_))));

    let missing = AssignmentRepository::update_position(queue_core::AssignmentId::new(), 1).await;
    assert!(matches!(missing, Err(DbError::NotFound(_))));

    // dangling submission reference resolves to None
    let dangling = AssignmentRepository::create(
        NewAssignment::new(queue.id, 4).submission(queue_core::SubmissionId::new()),
    )
    .await?;
    assert!(dangling.submission.is_none());

    let synced = QueueRepository::sync_filled_slots(queue.id).await?;
    assert_eq!(synced.filled_slots, 3);

    QueueRepository::delete(queue.id).await?;
    assert_eq!(AssignmentRepository::count_for_queue(queue.id).await?, 0);

    Ok(())
}

async fn check_editor_over_surreal_store() -> Result<(), Box<dyn Error>> {
    common::reset_db().await?;

    let queue = QueueRepository::create(&Queue::new(day(7), 10)).await?;
    let mut ids = Vec::new();
    for position in 1..=3 {
        ids.push(AssignmentRepository::create(NewAssignment::new(queue.id, position)).await?.id);
    }

    let store = Arc::new(SurrealAssignmentStore);
    let mut editor = QueueEditor::load(store.clone(), queue.clone()).await?;
    assert!(editor.reorder(&Session::anonymous(), 2, Some(0)).await?);

    let durable = store.load_assignments(queue.id).await?;
    assert_eq!(
        durable.iter().map(|a| (a.id, a.position)).collect::<Vec<_>>(),
        vec![(ids[2], 1), (ids[0], 2), (ids[1], 3)]
    );
    assert_eq!(durable, editor.assignments());

    Ok(())
}

async fn check_settings() -> Result<(), Box<dyn Error>> {
    common::reset_db().await?;

    assert_eq!(SettingsRepository::get::<u32>("default_slots").await?, None);

    SettingsRepository::set("default_slots", &40u32).await?;
    assert_eq!(SettingsRepository::get::<u32>("default_slots").await?, Some(40));

    SettingsRepository::set("default_slots", &25u32).await?;
    assert_eq!(SettingsRepository::get::<u32>("default_slots").await?, Some(25));

    Ok(())
}
