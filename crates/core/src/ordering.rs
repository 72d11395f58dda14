//! Dense 1-based ordering for items that share a parent list.
//!
//! Routine exercises and assigned exercises both carry an `order` column that
//! must stay exactly `{1, 2, ..., N}` within their parent. The pure `plan_*`
//! functions compute which rows need a new `order`; [`OrderedListManager`]
//! drives them against any [`OrderedStore`].
//!
//! Writes are not wrapped in a multi-statement transaction. Every mutating
//! operation finishes with a [`OrderedListManager::normalize`] pass, so a
//! list left gapped or duplicated by an interrupted or interleaved operation
//! is repaired by the next mutation on the same parent.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{DbId, Position};

// ---------------------------------------------------------------------------
// Item and store abstractions
// ---------------------------------------------------------------------------

/// A record positioned inside a parent list.
pub trait OrderedItem {
    fn id(&self) -> DbId;
    fn parent_id(&self) -> DbId;
    fn order(&self) -> Position;
}

/// A single `order` rewrite produced by one of the `plan_*` functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderChange {
    pub id: DbId,
    pub order: Position,
}

/// Persistence needed by [`OrderedListManager`].
///
/// `find_by_parent` must return the siblings sorted by `(order, id)`.
/// `save_orders` may apply the batch atomically or one row at a time; callers
/// only rely on every change eventually being written.
#[async_trait]
pub trait OrderedStore: Send + Sync {
    type Item: OrderedItem + Send + Sync;
    type Payload: Send + 'static;
    type Error: From<CoreError> + Send;

    /// Entity name of the ordered rows, used in `NotFound` errors.
    const ENTITY: &'static str;
    /// Entity name of the parent rows, used in `NotFound` errors.
    const PARENT_ENTITY: &'static str;

    async fn parent_exists(&self, parent_id: DbId) -> Result<bool, Self::Error>;

    async fn find_by_parent(&self, parent_id: DbId) -> Result<Vec<Self::Item>, Self::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Self::Item>, Self::Error>;

    async fn insert(
        &self,
        parent_id: DbId,
        order: Position,
        payload: Self::Payload,
    ) -> Result<Self::Item, Self::Error>;

    async fn save_orders(&self, changes: &[OrderChange]) -> Result<(), Self::Error>;

    /// Remove one row. Returns `false` if it was already gone.
    async fn delete(&self, id: DbId) -> Result<bool, Self::Error>;
}

// ---------------------------------------------------------------------------
// Planning (pure)
// ---------------------------------------------------------------------------

/// Number of positions in a list, saturating at `i32::MAX`.
fn position_count(len: usize) -> Position {
    Position::try_from(len).unwrap_or(Position::MAX)
}

/// Clamp a caller-supplied position to `[1, upper]`.
///
/// Out-of-range values are never rejected. An `upper` below 1 is treated as 1.
pub fn clamp_position(desired: i64, upper: Position) -> Position {
    let upper = upper.max(1);
    let clamped = desired.clamp(1, i64::from(upper));
    Position::try_from(clamped).unwrap_or(upper)
}

/// Result of [`plan_insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertPlan {
    /// The order the new item is created with.
    pub order: Position,
    /// Sibling shifts, highest order first.
    pub shifts: Vec<OrderChange>,
}

/// Plan the insertion of a new item into `siblings`.
///
/// Without a desired position the item is appended at `N + 1`. Otherwise the
/// position is clamped to `[1, N + 1]` and every sibling at or after it moves
/// up by one. Shifts are emitted in descending order so a store applying them
/// one by one never holds two rows at the same position.
pub fn plan_insert<T: OrderedItem>(siblings: &[T], desired: Option<i64>) -> InsertPlan {
    let count = position_count(siblings.len());

    let Some(desired) = desired else {
        return InsertPlan {
            order: count.saturating_add(1),
            shifts: Vec::new(),
        };
    };

    let order = clamp_position(desired, count.saturating_add(1));
    let mut shifts: Vec<OrderChange> = siblings
        .iter()
        .filter(|s| s.order() >= order)
        .map(|s| OrderChange {
            id: s.id(),
            order: s.order() + 1,
        })
        .collect();
    shifts.sort_by(|a, b| b.order.cmp(&a.order));

    InsertPlan { order, shifts }
}

/// Plan moving `item_id` to `desired` within `siblings`.
///
/// Returns `None` when the item is not among the siblings. An empty plan
/// means the clamped position equals the current one.
///
/// Moving earlier shifts items in `[new, old)` up by one; moving later shifts
/// items in `(old, new]` down by one. The moved item's own change is last.
pub fn plan_reorder<T: OrderedItem>(
    siblings: &[T],
    item_id: DbId,
    desired: i64,
) -> Option<Vec<OrderChange>> {
    let current = siblings.iter().find(|s| s.id() == item_id)?.order();
    let new = clamp_position(desired, position_count(siblings.len()));

    if new == current {
        return Some(Vec::new());
    }

    let mut changes: Vec<OrderChange> = siblings
        .iter()
        .filter(|s| s.id() != item_id)
        .filter_map(|s| {
            let order = s.order();
            if new < current && order >= new && order < current {
                Some(OrderChange {
                    id: s.id(),
                    order: order + 1,
                })
            } else if new > current && order > current && order <= new {
                Some(OrderChange {
                    id: s.id(),
                    order: order - 1,
                })
            } else {
                None
            }
        })
        .collect();

    changes.push(OrderChange {
        id: item_id,
        order: new,
    });
    Some(changes)
}

/// Plan the rewrites that make `siblings` dense and 1-based.
///
/// Siblings are ranked by `(order, id)`; only rows whose order differs from
/// their rank are returned, so an already dense list yields no changes.
pub fn plan_normalize<T: OrderedItem>(siblings: &[T]) -> Vec<OrderChange> {
    let mut ranked: Vec<&T> = siblings.iter().collect();
    ranked.sort_by_key(|s| (s.order(), s.id()));

    ranked
        .into_iter()
        .zip(1..)
        .filter(|(s, rank)| s.order() != *rank)
        .map(|(s, rank)| OrderChange {
            id: s.id(),
            order: rank,
        })
        .collect()
}

/// Read a caller-supplied `desired_order` from a JSON body value.
///
/// Accepts integers, integral floats (`2.0`) and numeric strings (`"2"`).
/// `null` or an absent field means "no position". Range is not checked here;
/// the plan functions clamp.
pub fn parse_desired_order(value: Option<&serde_json::Value>) -> Result<Option<i64>, CoreError> {
    use serde_json::Value;

    let invalid = || CoreError::Validation("desired_order must be an integer".to_string());

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i));
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(Some(f as i64)),
                _ => Err(invalid()),
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Applies ordering plans against an [`OrderedStore`].
pub struct OrderedListManager<'a, S> {
    store: &'a S,
}

impl<'a, S: OrderedStore> OrderedListManager<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create a new item under `parent_id`, appended or at `desired_order`.
    ///
    /// Returns the item as stored after the closing normalize pass.
    pub async fn insert(
        &self,
        parent_id: DbId,
        payload: S::Payload,
        desired_order: Option<i64>,
    ) -> Result<S::Item, S::Error> {
        if !self.store.parent_exists(parent_id).await? {
            return Err(CoreError::NotFound {
                entity: S::PARENT_ENTITY,
                id: parent_id,
            }
            .into());
        }

        let siblings = self.store.find_by_parent(parent_id).await?;
        let plan = plan_insert(&siblings, desired_order);

        if !plan.shifts.is_empty() {
            self.store.save_orders(&plan.shifts).await?;
        }
        let created = self.store.insert(parent_id, plan.order, payload).await?;

        self.normalize(parent_id).await?;

        tracing::debug!(
            entity = S::ENTITY,
            parent_id,
            item_id = created.id(),
            order = plan.order,
            shifted = plan.shifts.len(),
            "Inserted ordered item",
        );

        self.reload(created.id()).await
    }

    /// Move an existing item to `desired_order` among its siblings.
    pub async fn reorder(&self, item_id: DbId, desired_order: i64) -> Result<S::Item, S::Error> {
        let item = self.require(item_id).await?;
        let parent_id = item.parent_id();

        let siblings = self.store.find_by_parent(parent_id).await?;
        let changes = plan_reorder(&siblings, item_id, desired_order).ok_or(
            CoreError::NotFound {
                entity: S::ENTITY,
                id: item_id,
            },
        )?;

        if !changes.is_empty() {
            self.store.save_orders(&changes).await?;
            tracing::debug!(
                entity = S::ENTITY,
                parent_id,
                item_id,
                from = item.order(),
                desired_order,
                rewritten = changes.len(),
                "Reordered item",
            );
        }

        self.normalize(parent_id).await?;
        self.reload(item_id).await
    }

    /// Remove an item and close the gap it leaves.
    ///
    /// Returns the removed item as it was before deletion.
    pub async fn delete(&self, item_id: DbId) -> Result<S::Item, S::Error> {
        let item = self.require(item_id).await?;

        if !self.store.delete(item_id).await? {
            return Err(CoreError::NotFound {
                entity: S::ENTITY,
                id: item_id,
            }
            .into());
        }

        self.normalize(item.parent_id()).await?;
        Ok(item)
    }

    /// Rewrite every sibling whose order differs from its rank.
    ///
    /// Returns the number of rows rewritten; zero for a dense list.
    pub async fn normalize(&self, parent_id: DbId) -> Result<usize, S::Error> {
        let siblings = self.store.find_by_parent(parent_id).await?;
        let changes = plan_normalize(&siblings);

        if !changes.is_empty() {
            self.store.save_orders(&changes).await?;
            tracing::info!(
                entity = S::ENTITY,
                parent_id,
                rewritten = changes.len(),
                "Normalized ordering",
            );
        }

        Ok(changes.len())
    }

    async fn require(&self, item_id: DbId) -> Result<S::Item, S::Error> {
        self.store.find_by_id(item_id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: S::ENTITY,
                id: item_id,
            }
            .into()
        })
    }

    async fn reload(&self, item_id: DbId) -> Result<S::Item, S::Error> {
        self.require(item_id).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
