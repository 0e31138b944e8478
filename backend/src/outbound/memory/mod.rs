//! In-memory repositories.
//!
//! Used when no database URL is configured and by the HTTP tests. Records
//! live in insertion order behind a mutex; filtering and ordering go through
//! the same field registries the filter binder uses.

mod model_store;
mod person_store;

use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

use pagination::{Direction, Page};

use crate::domain::EntityQuery;
use crate::domain::filter::Filterable;

pub use model_store::InMemoryModelRepository;
pub use person_store::InMemoryPersonRepository;

/// Lock a store, recovering the data if a writer panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Filter, order and slice `records` as `query` describes.
///
/// Records that compare equal on every sort property keep insertion order.
fn select_page<E>(records: &[E], query: &EntityQuery<E>) -> Page<E>
where
    E: Filterable + Clone,
{
    let today = query.today;
    let mut matching: Vec<&E> = records
        .iter()
        .filter(|record| query.filter.matches(record, today))
        .collect();

    let orders: Vec<_> = query
        .sort
        .orders()
        .iter()
        .filter_map(|order| {
            E::registry()
                .field(order.property())
                .map(|field| (field, order.direction()))
        })
        .collect();
    if !orders.is_empty() {
        matching.sort_by(|left, right| {
            orders
                .iter()
                .map(|(field, direction)| {
                    let ordering = field.read(left, today).cmp(&field.read(right, today));
                    match direction {
                        Direction::Ascending => ordering,
                        Direction::Descending => ordering.reverse(),
                    }
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
    let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(query.page.size()).unwrap_or(usize::MAX);
    let content = matching
        .into_iter()
        .skip(offset)
        .take(size)
        .cloned()
        .collect();
    Page::new(content, query.page, total)
}
