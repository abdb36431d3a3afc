//! Deterministic roster logic, kept free of UI and persistence concerns so it
//! can be exercised directly in tests. `view` turns the ordered roster into
//! the grouped gallery view; `order` computes new orderings for the
//! grab-and-drop flow and the persistence plan that goes with them.

pub mod order;
pub mod view;

pub use order::{apply_plan, reorder, OrderUpdate, ReorderError};
pub use view::{category_options, compute_view, subject_options, CategoryGroup, UNCATEGORIZED};
