//! Maintenance due-date evaluation
//!
//! Pure functions deciding whether a schedule is overdue, due soon or
//! merely scheduled, and computing the next due date once maintenance has
//! been performed.

mod due;

pub use due::{
    advance, classify, classify_within, next_due_after, parse_frequency, resolve_next_due,
    Completion, DueStatus, InvalidSchedule, DEFAULT_DUE_SOON_DAYS,
};
