//! Editor completion for incant scripts.
//!
//! The embedding editor parses the buffer, runs the eager pass to
//! populate a bindings manager, and calls the builders here to turn
//! what is in scope at the caret into suggestion lists.

mod items;
mod suggest;

pub use items::{CompletionItem, CompletionKind};
pub use suggest::{
    build_current_arg_completion_items, build_module_completion_items,
    build_var_completion_items, calculate_current_arg_index,
};
