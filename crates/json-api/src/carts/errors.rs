//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart does not exist."),
        CartsServiceError::ItemNotFound => StatusError::not_found().brief("Item does not exist."),
        CartsServiceError::Catalog(source) => {
            error!("failed to read item catalog: {source}");

            StatusError::internal_server_error()
        }
    }
}
