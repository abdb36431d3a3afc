use thiserror::Error;

use crate::db::TeacherStore;
use crate::models::Teacher;

/// One pending position write: rewrite `order_index` for the given record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderUpdate {
    pub id: i64,
    pub order_index: i64,
}

/// Raised when some of the independent position writes in a reorder plan
/// failed. The surviving writes are not rolled back, so the caller must
/// re-fetch the authoritative order to resynchronize local state.
#[derive(Debug, Error)]
#[error("{failed} of {total} position updates failed; re-fetching roster order")]
pub struct ReorderError {
    pub failed: usize,
    pub total: usize,
}

/// Compute the roster order after dropping the grabbed card onto the target
/// card, together with the plan of position writes that persists it.
///
/// Returns `None` when the gesture is a no-op: the ids are equal or either is
/// missing from the list. No persistence calls are issued for a no-op.
///
/// The move keeps every other element in relative order, and the returned
/// list carries `order_index = position` for every element unconditionally,
/// so the indices form the contiguous sequence 0..N-1 even if the prior data
/// was inconsistent.
pub fn reorder(
    teachers: &[Teacher],
    source_id: i64,
    target_id: i64,
) -> Option<(Vec<Teacher>, Vec<OrderUpdate>)> {
    if source_id == target_id {
        return None;
    }
    let from = teachers.iter().position(|t| t.id == source_id)?;
    let to = teachers.iter().position(|t| t.id == target_id)?;

    let mut reordered: Vec<Teacher> = teachers.to_vec();
    let moved = reordered.remove(from);
    let insert_at = to.min(reordered.len());
    reordered.insert(insert_at, moved);

    let mut plan = Vec::with_capacity(reordered.len());
    for (index, teacher) in reordered.iter_mut().enumerate() {
        teacher.order_index = index as i64;
        plan.push(OrderUpdate {
            id: teacher.id,
            order_index: index as i64,
        });
    }

    Some((reordered, plan))
}

/// Persist a reorder plan as independent per-record writes. Every write is
/// attempted even after a failure, mirroring a batch of concurrent update
/// requests that all settle; partial failure is reported without rollback.
pub fn apply_plan(store: &mut dyn TeacherStore, plan: &[OrderUpdate]) -> Result<(), ReorderError> {
    let mut failed = 0usize;
    for update in plan {
        if store.set_order_index(update.id, update.order_index).is_err() {
            failed += 1;
        }
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(ReorderError {
            failed,
            total: plan.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};

    use crate::models::TeacherDraft;

    use super::*;

    /// Store stub that records position writes and refuses the configured ids.
    struct FlakyStore {
        fail_ids: Vec<i64>,
        writes: Vec<(i64, i64)>,
    }

    impl TeacherStore for FlakyStore {
        fn list_public(&self) -> Result<Vec<Teacher>> {
            Ok(Vec::new())
        }

        fn list_all(&self) -> Result<Vec<Teacher>> {
            Ok(Vec::new())
        }

        fn get(&self, _id: i64) -> Result<Teacher> {
            Err(anyhow!("not backed"))
        }

        fn insert(&mut self, _draft: &TeacherDraft) -> Result<Teacher> {
            Err(anyhow!("not backed"))
        }

        fn update(&mut self, _id: i64, _draft: &TeacherDraft) -> Result<Teacher> {
            Err(anyhow!("not backed"))
        }

        fn delete(&mut self, _id: i64) -> Result<()> {
            Ok(())
        }

        fn set_order_index(&mut self, id: i64, order_index: i64) -> Result<()> {
            self.writes.push((id, order_index));
            if self.fail_ids.contains(&id) {
                Err(anyhow!("write refused"))
            } else {
                Ok(())
            }
        }

        fn set_public(&mut self, _id: i64, _public: bool) -> Result<()> {
            Ok(())
        }

        fn revision(&self) -> Result<i64> {
            Ok(0)
        }
    }

    fn roster(ids: &[i64]) -> Vec<Teacher> {
        ids.iter()
            .enumerate()
            .map(|(index, id)| Teacher {
                id: *id,
                last_name: format!("Фамилия{id}"),
                first_name: "Имя".to_string(),
                middle_name: String::new(),
                position: "Преподаватель".to_string(),
                categories: Vec::new(),
                subjects: Vec::new(),
                bio: String::new(),
                photo_url: String::new(),
                contact_email: String::new(),
                contact_phone: String::new(),
                public: true,
                order_index: index as i64,
                created_at: String::new(),
                updated_at: String::new(),
            })
            .collect()
    }

    fn ids(teachers: &[Teacher]) -> Vec<i64> {
        teachers.iter().map(|t| t.id).collect()
    }

    #[test]
    fn same_source_and_target_is_a_noop() {
        let list = roster(&[10, 20, 30]);
        assert!(reorder(&list, 20, 20).is_none());
    }

    #[test]
    fn absent_ids_are_a_noop() {
        let list = roster(&[10, 20, 30]);
        assert!(reorder(&list, 99, 20).is_none());
        assert!(reorder(&list, 10, 99).is_none());
    }

    #[test]
    fn moving_down_lands_on_target_position() {
        let list = roster(&[10, 20, 30, 40]);
        let (reordered, _) = reorder(&list, 10, 30).unwrap();
        assert_eq!(ids(&reordered), [20, 30, 10, 40]);
    }

    #[test]
    fn moving_up_lands_on_target_position() {
        let list = roster(&[10, 20, 30, 40]);
        let (reordered, _) = reorder(&list, 40, 20).unwrap();
        assert_eq!(ids(&reordered), [10, 40, 20, 30]);
    }

    #[test]
    fn other_elements_keep_relative_order() {
        let list = roster(&[1, 2, 3, 4, 5]);
        let (reordered, _) = reorder(&list, 2, 5).unwrap();
        assert_eq!(ids(&reordered), [1, 3, 4, 5, 2]);
    }

    #[test]
    fn reorder_produces_contiguous_indices() {
        let list = roster(&[7, 3, 9, 1]);
        let (reordered, plan) = reorder(&list, 9, 7).unwrap();

        let indices: Vec<i64> = reordered.iter().map(|t| t.order_index).collect();
        assert_eq!(indices, [0, 1, 2, 3]);

        // The plan covers every record once, matching the new visual order.
        assert_eq!(plan.len(), reordered.len());
        for (teacher, update) in reordered.iter().zip(&plan) {
            assert_eq!(teacher.id, update.id);
            assert_eq!(teacher.order_index, update.order_index);
        }
    }

    #[test]
    fn apply_plan_attempts_every_write_and_reports_partial_failure() {
        let list = roster(&[10, 20, 30]);
        let (_, plan) = reorder(&list, 10, 30).unwrap();

        let mut store = FlakyStore {
            fail_ids: vec![20],
            writes: Vec::new(),
        };
        let err = apply_plan(&mut store, &plan).unwrap_err();

        assert_eq!(err.failed, 1);
        assert_eq!(err.total, 3);
        // The failing write does not stop the rest of the batch, and nothing
        // is rolled back.
        assert_eq!(store.writes.len(), 3);
    }

    #[test]
    fn apply_plan_succeeds_when_every_write_lands() {
        let list = roster(&[10, 20, 30]);
        let (_, plan) = reorder(&list, 30, 10).unwrap();

        let mut store = FlakyStore {
            fail_ids: Vec::new(),
            writes: Vec::new(),
        };
        apply_plan(&mut store, &plan).unwrap();
        assert_eq!(store.writes, [(30, 0), (10, 1), (20, 2)]);
    }

    #[test]
    fn reorder_repairs_inconsistent_prior_indices() {
        let mut list = roster(&[10, 20, 30]);
        list[0].order_index = 5;
        list[1].order_index = 5;
        list[2].order_index = 42;

        let (reordered, _) = reorder(&list, 30, 10).unwrap();
        let indices: Vec<i64> = reordered.iter().map(|t| t.order_index).collect();
        assert_eq!(indices, [0, 1, 2]);
    }
}
