//! Observable store for the current member list filter

use std::sync::{Arc, RwLock};

use roster_api::filter::{MemberFilter, SortDirection, SortField};

/// Trait for receiving filter change notifications.
///
/// Implement this to react whenever the canonical filter is replaced.
pub trait FilterChangeListener: Send + Sync + 'static {
    /// Called after the new filter has been stored.
    fn filter_changed(&self, filter: &MemberFilter);
}

/// A simple listener that invokes a closure.
pub struct FnFilterChangeListener<F>
where
    F: Fn(&MemberFilter) + Send + Sync + 'static,
{
    f: F,
}

impl<F> FnFilterChangeListener<F>
where
    F: Fn(&MemberFilter) + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> FilterChangeListener for FnFilterChangeListener<F>
where
    F: Fn(&MemberFilter) + Send + Sync + 'static,
{
    fn filter_changed(&self, filter: &MemberFilter) {
        (self.f)(filter);
    }
}

/// Holds the filter every view reads, mutated only through the setters
/// below.
///
/// Listeners run synchronously on the mutating thread once the new value
/// is stored, so a subscriber always observes the state it was notified
/// about. Setters report whether the stored filter actually changed;
/// an ineffective call does not notify.
pub struct FilterStore {
    filter: RwLock<MemberFilter>,
    listeners: RwLock<Vec<Arc<dyn FilterChangeListener>>>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::with_filter(MemberFilter::default())
    }

    /// Start from a restored filter, e.g. one parsed out of a deep link.
    pub fn with_filter(initial: MemberFilter) -> Self {
        let mut filter = initial;
        filter.normalize();
        Self {
            filter: RwLock::new(filter),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of the current filter.
    pub fn current(&self) -> MemberFilter {
        self.filter
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Register a listener invoked after every effective change.
    pub fn subscribe(&self, listener: Arc<dyn FilterChangeListener>) {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(listener);
    }

    /// Replace the whole filter.
    ///
    /// Any change beyond the page number sends the view back to page 1;
    /// a pure page change keeps everything else untouched.
    pub fn set_filter(&self, new: MemberFilter) -> bool {
        let mut next = new;
        next.normalize();
        let changed = {
            let mut current = self.filter.write().unwrap_or_else(|e| e.into_inner());
            if !current.same_except_page(&next) {
                next.current_page = 1;
            }
            if *current == next {
                false
            } else {
                *current = next.clone();
                true
            }
        };
        if changed {
            self.notify(&next);
        }
        changed
    }

    /// Change the ordering and go back to the first page.
    pub fn set_sort(&self, field: SortField, direction: SortDirection) -> bool {
        let mut next = self.current();
        next.sort_by = field;
        next.order_by = direction;
        next.current_page = 1;
        self.replace(next)
    }

    /// Move to another page; everything else stays as it is.
    pub fn set_page(&self, page: u32) -> bool {
        let mut next = self.current();
        next.current_page = page.max(1);
        self.replace(next)
    }

    fn replace(&self, next: MemberFilter) -> bool {
        let changed = {
            let mut current = self.filter.write().unwrap_or_else(|e| e.into_inner());
            if *current == next {
                false
            } else {
                *current = next.clone();
                true
            }
        };
        if changed {
            self.notify(&next);
        }
        changed
    }

    fn notify(&self, filter: &MemberFilter) {
        let listeners: Vec<Arc<dyn FilterChangeListener>> = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for listener in listeners {
            listener.filter_changed(filter);
        }
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}
