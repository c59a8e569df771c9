//! Fetch coordination
//!
//! Runs one logical "current" fetch per table state. Each fetch gets an id
//! from a monotonically increasing counter; a completion is applied only if
//! its id still matches the counter, so the latest request always wins.
//!
//! ```text
//! begin(A) -> id 1 ──────────────────────────── A done (id 1 ≠ 2, dropped)
//! begin(B) -> id 2, abort A ───── B done (id 2 = 2, applied)
//! ```
//!
//! Aborting the superseded task only saves network tails. Correctness comes
//! from the id check.

mod coordinator;

pub use coordinator::{Applied, Completion, FetchCoordinator};
