//! Shared handler state.

use std::sync::Arc;

use storefront_app::context::AppContext;
#[cfg(test)]
use storefront_app::domain::{carts::CartsService, items::ItemsService, orders::OrdersService};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }

    /// Assemble state from individual services, e.g. mocks.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_services(
        items: Arc<dyn ItemsService>,
        carts: Arc<dyn CartsService>,
        orders: Arc<dyn OrdersService>,
    ) -> Arc<Self> {
        Self::from_app_context(AppContext {
            items,
            carts,
            orders,
        })
    }
}
