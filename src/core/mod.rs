pub mod dashboard;
pub mod render;

pub use crate::domain::markup::{Element, Markup, Node};
pub use crate::domain::model::{ApiEntry, Product, RegionId, RegionState, UsageSummary};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Storage, Surface};
pub use crate::utils::error::Result;
