use serde::{Deserialize, Serialize};

/// One bounded response from a list or search endpoint.
///
/// `total` is the backend's `X-Total-Count` at fetch time, when it was
/// requested and returned. It can move between pages if the collection
/// changes underneath the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: Option<u64>) -> Self {
        Self { items, total }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
