//! Recipe documents: the parsed tree and the file loaders.

mod load;
mod tree;

pub use load::{load_recipe, parse_recipe, DocumentFormat};
pub use tree::RecipeTree;
