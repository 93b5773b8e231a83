//! Detection of non-blocking irregularities in a queue's assignment order.
//!
//! Two checks run over the ordered assignment list:
//!
//! - a supporter appearing more than once in the same queue
//! - three or more consecutive assignments from the same genre
//!
//! Detection is pure and recomputed from scratch on every call. Results are
//! never stored; they describe the list they were computed from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::assignment::UNKNOWN;
use crate::{AssignmentId, MemberId, QueueAssignment};

/// Shortest run of same-genre assignments that counts as clustering.
pub const MIN_CLUSTER_RUN: usize = 3;

/// Discriminant of a [`Conflict`], for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    DuplicateSupporter,
    GenreClustering,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::DuplicateSupporter => "duplicate_supporter",
            ConflictKind::GenreClustering => "genre_clustering",
        }
    }
}

/// A detected irregularity. Flagged to the administrator, never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Conflict {
    /// One supporter holds several assignments in the queue.
    DuplicateSupporter {
        /// `None` for the bucket of assignments with no resolved supporter.
        supporter_id: Option<MemberId>,
        supporter_name: String,
        assignments: Vec<AssignmentId>,
        message: String,
    },
    /// A run of consecutive assignments shares a genre.
    GenreClustering {
        genre: String,
        /// 1-based position of the first assignment in the run.
        start_position: u32,
        /// 1-based position of the last assignment in the run.
        end_position: u32,
        assignments: Vec<AssignmentId>,
        message: String,
    },
}

impl Conflict {
    pub fn kind(&self) -> ConflictKind {
        match self {
            Conflict::DuplicateSupporter { .. } => ConflictKind::DuplicateSupporter,
            Conflict::GenreClustering { .. } => ConflictKind::GenreClustering,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Conflict::DuplicateSupporter { message, .. } => message,
            Conflict::GenreClustering { message, .. } => message,
        }
    }

    pub fn assignments(&self) -> &[AssignmentId] {
        match self {
            Conflict::DuplicateSupporter { assignments, .. } => assignments,
            Conflict::GenreClustering { assignments, .. } => assignments,
        }
    }

    /// Whether the given assignment takes part in this conflict.
    pub fn involves(&self, id: AssignmentId) -> bool {
        self.assignments().contains(&id)
    }
}

/// Run every check over `assignments` in their current order.
///
/// Duplicate-supporter conflicts come first, in order of each supporter's
/// first appearance, followed by clustering conflicts grouped by genre in
/// order of first appearance and by ascending start position within a genre.
pub fn detect_conflicts(assignments: &[QueueAssignment]) -> Vec<Conflict> {
    let mut conflicts = duplicate_supporters(assignments);
    conflicts.extend(genre_clusters(assignments));
    conflicts
}

/// Supporters with more than one assignment.
pub fn duplicate_supporters(assignments: &[QueueAssignment]) -> Vec<Conflict> {
    let mut order: Vec<Option<MemberId>> = Vec::new();
    let mut groups: HashMap<Option<MemberId>, Vec<&QueueAssignment>> = HashMap::new();

    for assignment in assignments {
        let key = assignment.supporter_id();
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(assignment);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let group = groups.remove(&key)?;
            if group.len() < 2 {
                return None;
            }
            let supporter_name = group[0].supporter_name().to_string();
            let message = format!(
                "{} is assigned to {} submissions in this queue",
                supporter_name,
                group.len()
            );
            Some(Conflict::DuplicateSupporter {
                supporter_id: key,
                supporter_name,
                assignments: group.iter().map(|a| a.id).collect(),
                message,
            })
        })
        .collect()
}

/// Runs of [`MIN_CLUSTER_RUN`] or more consecutive same-genre assignments.
pub fn genre_clusters(assignments: &[QueueAssignment]) -> Vec<Conflict> {
    let mut order: Vec<&str> = Vec::new();
    let mut indices: HashMap<&str, Vec<usize>> = HashMap::new();

    for (index, assignment) in assignments.iter().enumerate() {
        let genre = assignment.genre();
        indices
            .entry(genre)
            .or_insert_with(|| {
                order.push(genre);
                Vec::new()
            })
            .push(index);
    }

    let mut conflicts = Vec::new();
    for genre in order {
        let Some(positions) = indices.get(genre) else {
            continue;
        };
        for run in consecutive_runs(positions) {
            if run.len() < MIN_CLUSTER_RUN {
                continue;
            }
            let start_position = run[0] as u32 + 1;
            let end_position = run[run.len() - 1] as u32 + 1;
            let label = if genre == UNKNOWN { "unclassified" } else { genre };
            conflicts.push(Conflict::GenreClustering {
                genre: genre.to_string(),
                start_position,
                end_position,
                assignments: run.iter().map(|&i| assignments[i].id).collect(),
                message: format!(
                    "{} consecutive {} tracks at positions {}-{}",
                    run.len(),
                    label,
                    start_position,
                    end_position
                ),
            });
        }
    }
    conflicts
}

/// Split ascending indices into maximal runs where each step is exactly +1.
fn consecutive_runs(indices: &[usize]) -> Vec<&[usize]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=indices.len() {
        if i == indices.len() || indices[i] != indices[i - 1] + 1 {
            if start < i {
                runs.push(&indices[start..i]);
            }
            start = i;
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QueueId, SubmissionId, SubmissionRef, SupporterRef};

    struct Fixture {
        queue_id: QueueId,
        members: HashMap<&'static str, MemberId>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                queue_id: QueueId::new(),
                members: HashMap::new(),
            }
        }

        fn assignment(&mut self, supporter: &'static str, genre: Option<&str>) -> QueueAssignment {
            let member_id = *self.members.entry(supporter).or_insert_with(MemberId::new);
            QueueAssignment::new(self.queue_id, 0)
                .with_supporter(SupporterRef {
                    id: member_id,
                    name: supporter.to_string(),
                })
                .with_submission(SubmissionRef {
                    id: SubmissionId::new(),
                    artist_name: "Artist".to_string(),
                    track_name: "Track".to_string(),
                    family: genre.map(str::to_string),
                })
        }

        fn list(&mut self, rows: &[(&'static str, &str)]) -> Vec<QueueAssignment> {
            rows.iter()
                .map(|(supporter, genre)| self.assignment(supporter, Some(genre)))
                .collect()
        }
    }

    fn clusters(conflicts: &[Conflict]) -> Vec<(String, u32, u32)> {
        conflicts
            .iter()
            .filter_map(|c| match c {
                Conflict::GenreClustering {
                    genre,
                    start_position,
                    end_position,
                    ..
                } => Some((genre.clone(), *start_position, *end_position)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn reports_house_run_but_not_isolated_house() {
        let mut fx = Fixture::new();
        let list = fx.list(&[
            ("a", "House"),
            ("b", "House"),
            ("c", "House"),
            ("d", "Techno"),
            ("e", "House"),
        ]);

        let conflicts = detect_conflicts(&list);
        assert_eq!(clusters(&conflicts), vec![("House".to_string(), 1, 3)]);
        assert_eq!(
            conflicts[0].message(),
            "3 consecutive House tracks at positions 1-3"
        );
        assert_eq!(conflicts[0].assignments(), &[list[0].id, list[1].id, list[2].id]);
        assert!(!conflicts[0].involves(list[4].id));
    }

    #[test]
    fn pairs_never_cluster() {
        let mut fx = Fixture::new();
        let list = fx.list(&[
            ("a", "House"),
            ("b", "House"),
            ("c", "Techno"),
            ("d", "Techno"),
            ("e", "House"),
            ("f", "House"),
        ]);
        assert!(genre_clusters(&list).is_empty());
    }

    #[test]
    fn one_genre_can_produce_several_runs() {
        let mut fx = Fixture::new();
        let list = fx.list(&[
            ("a", "Trance"),
            ("b", "Trance"),
            ("c", "Trance"),
            ("d", "Dub"),
            ("e", "Trance"),
            ("f", "Trance"),
            ("g", "Trance"),
            ("h", "Trance"),
        ]);
        assert_eq!(
            clusters(&genre_clusters(&list)),
            vec![("Trance".to_string(), 1, 3), ("Trance".to_string(), 5, 8)]
        );
    }

    #[test]
    fn missing_genres_share_the_unknown_bucket() {
        let mut fx = Fixture::new();
        let list = vec![
            fx.assignment("a", None),
            fx.assignment("b", Some("  ")),
            fx.assignment("c", None),
        ];
        let conflicts = genre_clusters(&list);
        assert_eq!(clusters(&conflicts), vec![(UNKNOWN.to_string(), 1, 3)]);
        assert!(conflicts[0].message().contains("unclassified"));
    }

    #[test]
    fn supporter_at_two_indices_yields_one_conflict() {
        let mut fx = Fixture::new();
        let list = fx.list(&[
            ("a", "House"),
            ("b", "Techno"),
            ("dana", "Dub"),
            ("c", "House"),
            ("d", "Techno"),
            ("dana", "Disco"),
        ]);

        let dupes = duplicate_supporters(&list);
        assert_eq!(dupes.len(), 1);
        match &dupes[0] {
            Conflict::DuplicateSupporter {
                supporter_id,
                supporter_name,
                assignments,
                message,
            } => {
                assert_eq!(*supporter_id, Some(fx.members["dana"]));
                assert_eq!(supporter_name, "dana");
                assert_eq!(assignments, &vec![list[2].id, list[5].id]);
                assert_eq!(message, "dana is assigned to 2 submissions in this queue");
            }
            other => panic!("unexpected conflict {other:?}"),
        }
    }

    #[test]
    fn single_assignment_supporters_are_never_named() {
        let mut fx = Fixture::new();
        let list = fx.list(&[("a", "House"), ("b", "Techno"), ("c", "Dub")]);
        assert!(duplicate_supporters(&list).is_empty());
    }

    #[test]
    fn duplicate_groups_follow_first_appearance() {
        let mut fx = Fixture::new();
        let list = fx.list(&[
            ("zed", "A"),
            ("amy", "B"),
            ("amy", "C"),
            ("zed", "D"),
        ]);
        let names: Vec<_> = duplicate_supporters(&list)
            .into_iter()
            .map(|c| match c {
                Conflict::DuplicateSupporter { supporter_name, .. } => supporter_name,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(names, vec!["zed", "amy"]);
    }

    #[test]
    fn unresolved_supporters_form_one_bucket() {
        let queue_id = QueueId::new();
        let list = vec![
            QueueAssignment::new(queue_id, 1),
            QueueAssignment::new(queue_id, 2),
        ];
        let dupes = duplicate_supporters(&list);
        assert_eq!(dupes.len(), 1);
        assert!(matches!(
            &dupes[0],
            Conflict::DuplicateSupporter { supporter_id: None, supporter_name, .. } if supporter_name == UNKNOWN
        ));
    }

    #[test]
    fn detection_is_deterministic() {
        let mut fx = Fixture::new();
        let list = fx.list(&[
            ("a", "House"),
            ("a", "House"),
            ("b", "House"),
            ("b", "Techno"),
            ("c", "Techno"),
            ("c", "Techno"),
        ]);
        let first = detect_conflicts(&list);
        let second = detect_conflicts(&list);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
        assert_eq!(first[0].kind(), ConflictKind::DuplicateSupporter);
        assert_eq!(first[4].kind(), ConflictKind::GenreClustering);
    }

    #[test]
    fn empty_list_has_no_conflicts() {
        assert!(detect_conflicts(&[]).is_empty());
    }

    #[test]
    fn conflict_serializes_with_type_tag() {
        let mut fx = Fixture::new();
        let list = fx.list(&[("a", "House"), ("b", "House"), ("c", "House")]);
        let json = serde_json::to_value(&detect_conflicts(&list)[0]).unwrap();
        assert_eq!(json["type"], "genre_clustering");
        assert_eq!(json["start_position"], 1);
        assert_eq!(json["end_position"], 3);
    }
}
