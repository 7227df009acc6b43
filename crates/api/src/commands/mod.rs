//! Commands - view layer to coordinator bridge

mod landing;
mod routes;
mod session;

pub use landing::*;
pub use routes::*;
pub use session::*;
