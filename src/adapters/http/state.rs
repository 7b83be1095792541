//! Shared application state.

use std::sync::Arc;

use crate::application::handlers::{
    BuildJourneyHandler, CaptureOrderHandler, CreateOrderHandler, DownloadAssetHandler,
    ListEntitlementsHandler,
};
use crate::domain::catalog::PriceCatalog;
use crate::domain::journey::ProceduresTable;
use crate::domain::library::AssetCatalog;
use crate::ports::{AssetStorage, EntitlementStore, PaymentProcessor, SessionValidator};

/// Dependencies shared by every route. Cloned per request; all fields are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub session_validator: Arc<dyn SessionValidator>,
    pub price_catalog: Arc<PriceCatalog>,
    pub payment_processor: Arc<dyn PaymentProcessor>,
    pub entitlement_store: Arc<dyn EntitlementStore>,
    pub asset_catalog: Arc<AssetCatalog>,
    pub asset_storage: Arc<dyn AssetStorage>,
    pub procedures: Option<Arc<ProceduresTable>>,
}

impl AppState {
    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(
            self.price_catalog.clone(),
            self.payment_processor.clone(),
            self.entitlement_store.clone(),
        )
    }

    pub fn capture_order_handler(&self) -> CaptureOrderHandler {
        CaptureOrderHandler::new(
            self.price_catalog.clone(),
            self.payment_processor.clone(),
            self.entitlement_store.clone(),
        )
    }

    pub fn list_entitlements_handler(&self) -> ListEntitlementsHandler {
        ListEntitlementsHandler::new(self.entitlement_store.clone())
    }

    pub fn download_asset_handler(&self) -> DownloadAssetHandler {
        DownloadAssetHandler::new(
            self.asset_catalog.clone(),
            self.entitlement_store.clone(),
            self.asset_storage.clone(),
        )
    }

    pub fn build_journey_handler(&self) -> BuildJourneyHandler {
        BuildJourneyHandler::new(self.procedures.clone())
    }
}
