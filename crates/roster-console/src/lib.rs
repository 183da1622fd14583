//! Collection-view engine for Roster front-ends
//!
//! Couples the canonical member filter with whatever renders it: an
//! observable [`FilterStore`] holds the single filter a view derives its
//! query from, a [`MemberListSession`] fetches pages for it and drops
//! responses that arrive for superseded requests, and [`feedback`] turns
//! failures into text fit for people.

pub mod feedback;
pub mod session;
pub mod store;

pub use feedback::user_message;
pub use session::{ListSnapshot, MemberDirectory, MemberListSession};
pub use store::{FilterChangeListener, FilterStore, FnFilterChangeListener};
