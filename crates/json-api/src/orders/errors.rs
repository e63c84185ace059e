//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

/// Metric label for checkouts refused on business rules, `None` for faults.
pub(crate) fn rejection_reason(error: &OrdersServiceError) -> Option<&'static str> {
    match error {
        OrdersServiceError::Validation(_) => Some("validation"),
        OrdersServiceError::EmptyCart => Some("empty_cart"),
        OrdersServiceError::ItemNotFound(_) => Some("item_not_found"),
        OrdersServiceError::InsufficientInventory { .. } => Some("insufficient_inventory"),
        _ => None,
    }
}

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Validation(errors) => {
            StatusError::unprocessable_entity().brief(errors.to_string())
        }
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty."),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order does not exist."),
        OrdersServiceError::ItemNotFound(_) => {
            StatusError::not_found().brief("Item does not exist.")
        }
        error @ OrdersServiceError::InsufficientInventory { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("failed to persist order: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::InvalidAmount(source) => {
            error!("order amount out of range: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::domain::{
        items::models::ItemUuid,
        orders::models::CustomerDetails,
    };

    use super::*;

    #[test]
    fn validation_is_422_with_joined_message() {
        let errors = CustomerDetails {
            zip: "8012".to_string(),
            ..crate::test_helpers::customer()
        }
        .validate()
        .expect_err("zip should be rejected");

        let error = into_status_error(OrdersServiceError::Validation(errors));

        assert_eq!(error.code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            error.brief,
            "Customer zip is the wrong length (should be 5 characters)"
        );
    }

    #[test]
    fn insufficient_inventory_is_409() {
        let error = OrdersServiceError::InsufficientInventory {
            item: ItemUuid::new(),
            requested: 3,
            available: 1,
        };

        assert_eq!(rejection_reason(&error), Some("insufficient_inventory"));
        assert_eq!(into_status_error(error).code, StatusCode::CONFLICT);
    }

    #[test]
    fn amount_faults_are_500_and_not_rejections() {
        let error =
            OrdersServiceError::InvalidAmount(u8::try_from(300_u32).expect_err("out of range"));

        assert_eq!(rejection_reason(&error), None);
        assert_eq!(
            into_status_error(error).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn empty_cart_is_400() {
        let error = OrdersServiceError::EmptyCart;

        assert_eq!(rejection_reason(&error), Some("empty_cart"));
        assert_eq!(into_status_error(error).code, StatusCode::BAD_REQUEST);
    }
}
