//! In-memory reordering of a queue's assignments.

use thiserror::Error;

use crate::{AssignmentId, QueueAssignment};

/// Rejected reorder request. Raised before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("Source index {index} is out of range for {len} assignments")]
    SourceOutOfRange { index: usize, len: usize },
    #[error("Destination index {index} is out of range for {len} assignments")]
    DestinationOutOfRange { index: usize, len: usize },
}

/// Check a move request against a list of `len` assignments.
///
/// Returns `Ok(false)` when the move would leave the list unchanged.
pub fn validate_move(len: usize, from: usize, to: Option<usize>) -> Result<bool, ReorderError> {
    if from >= len {
        return Err(ReorderError::SourceOutOfRange { index: from, len });
    }
    match to {
        None => Ok(false),
        Some(to) if to >= len => Err(ReorderError::DestinationOutOfRange { index: to, len }),
        Some(to) => Ok(to != from),
    }
}

/// Move the assignment at `from` to `to` and renumber every position.
///
/// `to == None` or `to == from` is a no-op and leaves positions untouched.
/// Returns whether the list changed.
pub fn move_assignment(
    assignments: &mut Vec<QueueAssignment>,
    from: usize,
    to: Option<usize>,
) -> Result<bool, ReorderError> {
    if !validate_move(assignments.len(), from, to)? {
        return Ok(false);
    }
    let Some(to) = to else {
        return Ok(false);
    };

    let moved = assignments.remove(from);
    assignments.insert(to, moved);
    renumber(assignments);
    Ok(true)
}

/// Set each assignment's position to its 1-based index.
pub fn renumber(assignments: &mut [QueueAssignment]) {
    for (index, assignment) in assignments.iter_mut().enumerate() {
        assignment.position = index as u32 + 1;
    }
}

/// The `(id, position)` pairs to persist for the current order.
pub fn position_updates(assignments: &[QueueAssignment]) -> Vec<(AssignmentId, u32)> {
    assignments.iter().map(|a| (a.id, a.position)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueueId;

    fn abc() -> Vec<QueueAssignment> {
        let queue_id = QueueId::new();
        (1..=3).map(|p| QueueAssignment::new(queue_id, p)).collect()
    }

    fn ids(list: &[QueueAssignment]) -> Vec<AssignmentId> {
        list.iter().map(|a| a.id).collect()
    }

    fn positions(list: &[QueueAssignment]) -> Vec<u32> {
        list.iter().map(|a| a.position).collect()
    }

    #[test]
    fn moving_last_to_front() {
        let mut list = abc();
        let [a, b, c] = [list[0].id, list[1].id, list[2].id];

        assert_eq!(move_assignment(&mut list, 2, Some(0)), Ok(true));
        assert_eq!(ids(&list), vec![c, a, b]);
        assert_eq!(positions(&list), vec![1, 2, 3]);
        assert_eq!(position_updates(&list), vec![(c, 1), (a, 2), (b, 3)]);
    }

    #[test]
    fn moving_front_to_back() {
        let mut list = abc();
        let [a, b, c] = [list[0].id, list[1].id, list[2].id];

        assert_eq!(move_assignment(&mut list, 0, Some(2)), Ok(true));
        assert_eq!(ids(&list), vec![b, c, a]);
        assert_eq!(positions(&list), vec![1, 2, 3]);
    }

    #[test]
    fn same_index_is_a_no_op() {
        let mut list = abc();
        let before = list.clone();
        assert_eq!(move_assignment(&mut list, 0, Some(0)), Ok(false));
        assert_eq!(list, before);
    }

    #[test]
    fn missing_destination_is_a_no_op() {
        let mut list = abc();
        let before = list.clone();
        assert_eq!(move_assignment(&mut list, 1, None), Ok(false));
        assert_eq!(list, before);
    }

    #[test]
    fn single_element_is_a_no_op() {
        let mut list = vec![QueueAssignment::new(QueueId::new(), 7)];
        assert_eq!(move_assignment(&mut list, 0, Some(0)), Ok(false));
        assert_eq!(list[0].position, 7);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut list = abc();
        let before = list.clone();
        assert_eq!(
            move_assignment(&mut list, 3, Some(0)),
            Err(ReorderError::SourceOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            move_assignment(&mut list, 0, Some(5)),
            Err(ReorderError::DestinationOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(list, before);

        let mut empty = Vec::new();
        assert!(move_assignment(&mut empty, 0, None).is_err());
    }

    #[test]
    fn renumber_closes_gaps() {
        let queue_id = QueueId::new();
        let mut list = vec![
            QueueAssignment::new(queue_id, 4),
            QueueAssignment::new(queue_id, 9),
            QueueAssignment::new(queue_id, 10),
        ];
        renumber(&mut list);
        assert_eq!(positions(&list), vec![1, 2, 3]);
    }
}
