//! Carts

pub(crate) mod errors;
mod handlers;
pub(crate) mod items;
mod responses;

pub(crate) use handlers::*;
pub(crate) use responses::CartLineResponse;
