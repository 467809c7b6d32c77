use crate::core::render::{render_apis, render_products, render_usage};
use crate::core::{Fetcher, Surface};
use crate::domain::model::{
    decode_list, decode_usage, ApiEntry, Product, RegionId, RegionState, UsageSummary,
};
use crate::utils::error::Result;
use std::time::Instant;

/// Decoded payloads of one successful cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payloads {
    pub products: Option<Vec<Product>>,
    pub apis: Option<Vec<ApiEntry>>,
    pub usage: Option<UsageSummary>,
}

/// Drives the load cycle: all regions to loading, the three resources
/// fetched together, then either every region rendered or the whole cycle
/// reported as failed.
///
/// If any fetch fails the products region shows the error and the apis and
/// usage regions are cleared. Nothing is rendered from the fetches that did
/// succeed.
pub struct Dashboard<F: Fetcher> {
    fetcher: F,
}

impl<F: Fetcher> Dashboard<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Runs one load cycle against `surface`. Never fails: errors end up in
    /// the products region.
    pub async fn load<S: Surface>(&self, surface: &mut S) {
        let started = Instant::now();

        for region in RegionId::ALL {
            surface.set_region(region, RegionState::Loading);
        }

        match self.fetch_all().await {
            Ok(payloads) => {
                tracing::info!(
                    "Dashboard loaded in {:?} ({} products, {} apis)",
                    started.elapsed(),
                    payloads.products.as_ref().map_or(0, Vec::len),
                    payloads.apis.as_ref().map_or(0, Vec::len),
                );
                render_into(surface, &payloads);
            }
            Err(e) => {
                tracing::error!("Dashboard load failed after {:?}: {}", started.elapsed(), e);
                surface.set_region(RegionId::Products, RegionState::Error(e.to_string()));
                surface.set_region(RegionId::Apis, RegionState::Empty);
                surface.set_region(RegionId::Usage, RegionState::Empty);
            }
        }
    }

    /// Issues all three requests at once and waits for every one of them.
    /// The first failure in region order wins.
    pub async fn fetch_all(&self) -> Result<Payloads> {
        let (products, apis, usage) = tokio::join!(
            self.fetch_region(RegionId::Products),
            self.fetch_region(RegionId::Apis),
            self.fetch_region(RegionId::Usage),
        );

        Ok(Payloads {
            products: decode_list(products?),
            apis: decode_list(apis?),
            usage: decode_usage(usage?),
        })
    }

    async fn fetch_region(&self, region: RegionId) -> Result<serde_json::Value> {
        let result = self.fetcher.fetch(region.resource_path()).await;
        if let Err(e) = &result {
            tracing::warn!("Fetching {} failed: {}", region, e);
        }
        result
    }
}

fn render_into<S: Surface>(surface: &mut S, payloads: &Payloads) {
    surface.set_region(
        RegionId::Products,
        RegionState::Loaded(render_products(payloads.products.as_deref())),
    );
    surface.set_region(
        RegionId::Apis,
        RegionState::Loaded(render_apis(payloads.apis.as_deref())),
    );
    surface.set_region(
        RegionId::Usage,
        RegionState::Loaded(render_usage(payloads.usage.as_ref())),
    );
}
