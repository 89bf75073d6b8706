pub mod history;
pub mod show;
pub mod song;
pub mod venue;

/// One page of rows plus the number of rows matching the filter overall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paged<T> {
    pub rows: Vec<T>,
    pub total_count: i64,
}

impl<T> Paged<T> {
    pub fn new(rows: Vec<T>, total_count: i64) -> Self {
        Self { rows, total_count }
    }
}
