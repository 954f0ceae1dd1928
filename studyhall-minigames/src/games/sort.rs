//! Drag-to-classify sorting: wrong drops cost 5 points (the running total is
//! floored at zero by the session) and the item returns to the pool; retries
//! are unlimited and the board completes when every entry sits in its bucket.

use crate::constants::SORT_MISS_PENALTY;
use crate::content::{ContentItem, ItemPayload};
use crate::games::{InputError, ItemResolutionState, Resolution};

/// Resolve one drop. Any unplaced pool entry may be targeted, not just the
/// one at the current position.
pub fn resolve(
    pool: &[ContentItem],
    item_id: &str,
    bucket_id: &str,
    states: &mut [ItemResolutionState],
) -> Result<Resolution, InputError> {
    let index = pool
        .iter()
        .position(|item| item.id == item_id)
        .ok_or_else(|| InputError::UnknownItem(item_id.to_string()))?;
    let ItemPayload::Classify {
        bucket, buckets, ..
    } = &pool[index].payload
    else {
        return Err(InputError::WrongKind);
    };
    if !buckets.iter().any(|b| b == bucket_id) {
        return Err(InputError::UnknownBucket(bucket_id.to_string()));
    }
    let state = &mut states[index];
    if state.resolved {
        return Err(InputError::ItemClosed);
    }

    state.attempts += 1;
    let hit = bucket_id == bucket;
    if hit {
        state.resolved = true;
        state.correct = true;
        Ok(Resolution {
            correct: true,
            points: 0,
            terminal: true,
        })
    } else {
        // Item stays in the pool for another drag.
        Ok(Resolution {
            correct: false,
            points: -SORT_MISS_PENALTY,
            terminal: false,
        })
    }
}

/// Whether every entry across the pool has been placed correctly.
#[must_use]
pub fn board_cleared(states: &[ItemResolutionState]) -> bool {
    !states.is_empty() && states.iter().all(|s| s.resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<ContentItem> {
        let buckets = vec!["mammal".to_string(), "bird".to_string()];
        [("whale", "mammal"), ("owl", "bird")]
            .into_iter()
            .map(|(label, bucket)| {
                ContentItem::new(
                    label,
                    ItemPayload::Classify {
                        label: label.into(),
                        bucket: bucket.into(),
                        buckets: buckets.clone(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn wrong_drop_penalizes_and_keeps_item_open() {
        let pool = pool();
        let mut states = vec![ItemResolutionState::default(); pool.len()];
        let res = resolve(&pool, "whale", "bird", &mut states).unwrap();
        assert_eq!(res.points, -5);
        assert!(!res.terminal && !states[0].resolved);
        assert_eq!(states[0].attempts, 1);
    }

    #[test]
    fn correct_drop_places_without_extra_points() {
        let pool = pool();
        let mut states = vec![ItemResolutionState::default(); pool.len()];
        let res = resolve(&pool, "owl", "bird", &mut states).unwrap();
        assert_eq!(res.points, 0);
        assert!(res.terminal && states[1].resolved);
        assert!(!board_cleared(&states));
        resolve(&pool, "whale", "mammal", &mut states).unwrap();
        assert!(board_cleared(&states));
    }

    #[test]
    fn placed_item_rejects_further_drops() {
        let pool = pool();
        let mut states = vec![ItemResolutionState::default(); pool.len()];
        resolve(&pool, "whale", "mammal", &mut states).unwrap();
        assert_eq!(
            resolve(&pool, "whale", "bird", &mut states),
            Err(InputError::ItemClosed)
        );
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let pool = pool();
        let mut states = vec![ItemResolutionState::default(); pool.len()];
        assert!(matches!(
            resolve(&pool, "ghost", "bird", &mut states),
            Err(InputError::UnknownItem(_))
        ));
        assert!(matches!(
            resolve(&pool, "whale", "fish", &mut states),
            Err(InputError::UnknownBucket(_))
        ));
        assert_eq!(states[0].attempts, 0);
    }
}
