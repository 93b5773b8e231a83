//! Demo data for local runs.

use chrono::{Days, Utc};
use db::DbError;
use db::repositories::{
    AssignmentRepository, GenreRepository, MemberRepository, NewAssignment, QueueRepository,
    SubmissionRepository,
};
use queue_core::{
    AssignmentStatus, GenreFamily, Member, Queue, QueueStatus, Subgenre, Submission,
    SubmissionStatus,
};

const FAMILIES: &[(&str, &[&str])] = &[
    ("Electronic", &["House", "Techno", "Ambient"]),
    ("Hip-Hop", &["Boom Bap", "Trap"]),
    ("Indie", &["Dream Pop", "Shoegaze"]),
];

const MEMBERS: &[(&str, &str, i64)] = &[
    ("Nia Okafor", "nia@example.com", 6),
    ("Tomas Lind", "tomas@example.com", 2),
    ("Priya Shah", "priya@example.com", 9),
    ("Jules Moreau", "jules@example.com", 0),
    ("Sam Reyes", "sam@example.com", -1),
];

/// (artist index, track, family)
const TRACKS: &[(usize, &str, Option<&str>)] = &[
    (0, "Low Tide", Some("Electronic")),
    (1, "Concrete Bloom", Some("Electronic")),
    (2, "Glasshouse", Some("Electronic")),
    (3, "Paper Planes Over Lyon", Some("Indie")),
    (4, "Southside Static", Some("Hip-Hop")),
    (0, "Night Bus", None),
];

/// Seed an empty database unless `ENGAGE_SEED_DEMO` turns it off.
pub(crate) async fn should_seed() -> Result<bool, DbError> {
    let enabled = std::env::var("ENGAGE_SEED_DEMO")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(true);
    if !enabled {
        return Ok(false);
    }
    Ok(MemberRepository::count().await? == 0)
}

/// Create a small taxonomy, a handful of members and three queues.
///
/// Today's queue starts with three Electronic tracks in a row and one
/// supporter booked twice, so the board opens with both kinds of conflict.
pub(crate) async fn seed_demo_data() -> Result<(), DbError> {
    tracing::info!("Seeding demo data...");

    for (family, subgenres) in FAMILIES {
        let family = GenreRepository::create_family(&GenreFamily::new(*family)).await?;
        for name in *subgenres {
            GenreRepository::create_subgenre(&Subgenre::new(family.id, *name)).await?;
        }
    }

    let mut members = Vec::with_capacity(MEMBERS.len());
    for (name, email, credits) in MEMBERS {
        members.push(MemberRepository::create(&Member::new(*name, *email).with_credits(*credits)).await?);
    }

    let mut submissions = Vec::with_capacity(TRACKS.len());
    for (artist, track, family) in TRACKS {
        let member = &members[*artist];
        let slug = track.to_lowercase().replace(' ', "-");
        let mut submission = Submission::new(
            member.id,
            member.name.clone(),
            *track,
            format!("https://soundcloud.com/demo/{}", slug),
        );
        if let Some(family) = family {
            submission = submission.with_family(*family);
        }
        submission.status = SubmissionStatus::Queued;
        submissions.push(SubmissionRepository::create(&submission).await?);
    }
    SubmissionRepository::create(&Submission::new(
        members[2].id,
        members[2].name.clone(),
        "Unreviewed Demo",
        "https://soundcloud.com/demo/unreviewed-demo",
    ))
    .await?;

    let today = Utc::now().date_naive();

    let queue = QueueRepository::create(&Queue::new(today, 8).with_notes("Demo queue")).await?;
    // (submission index, supporter index)
    let rows = [(0, 3), (1, 4), (2, 3), (3, 0), (4, 1), (5, 2)];
    for (position, (submission, supporter)) in rows.iter().enumerate() {
        AssignmentRepository::create(
            NewAssignment::new(queue.id, position as u32 + 1)
                .submission(submissions[*submission].id)
                .supporter(members[*supporter].id)
                .credits(1),
        )
        .await?;
    }
    QueueRepository::sync_filled_slots(queue.id).await?;

    if let Some(tomorrow) = today.checked_add_days(Days::new(1)) {
        QueueRepository::create(&Queue::new(tomorrow, 6)).await?;
    }

    if let Some(yesterday) = today.checked_sub_days(Days::new(1)) {
        let done = QueueRepository::create(&Queue::new(yesterday, 4)).await?;
        for (position, supporter) in [1u32, 2].into_iter().zip([0usize, 4]) {
            let row = AssignmentRepository::create(
                NewAssignment::new(done.id, position)
                    .submission(submissions[position as usize + 2].id)
                    .supporter(members[supporter].id),
            )
            .await?;
            AssignmentRepository::update_status(row.id, AssignmentStatus::Completed).await?;
        }
        QueueRepository::sync_filled_slots(done.id).await?;
        QueueRepository::update_status(done.id, QueueStatus::Published).await?;
    }

    tracing::info!("Demo data seeded");
    Ok(())
}
