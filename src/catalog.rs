//! Track and pack records plus the ways a catalog gets into the player:
//! a catalog file exported from the storefront, or a scanned local folder.

mod load;
mod model;
mod scan;

pub use load::{CatalogError, load};
pub use model::*;
pub use scan::scan;
