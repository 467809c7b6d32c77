use crate::core::render::render_state;
use crate::core::{Markup, RegionId, RegionState, Surface};
use crate::domain::markup::escape_html;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// In-memory host document: the three dashboard regions plus the page
/// chrome around them.
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    regions: BTreeMap<RegionId, RegionState>,
    updated_at: Option<DateTime<Utc>>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            regions: RegionId::ALL
                .into_iter()
                .map(|id| (id, RegionState::Empty))
                .collect(),
            updated_at: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn region(&self, id: RegionId) -> &RegionState {
        // Every region is present from construction on.
        &self.regions[&id]
    }

    pub fn region_markup(&self, id: RegionId) -> Markup {
        render_state(self.region(id))
    }

    pub fn region_html(&self, id: RegionId) -> String {
        self.region_markup(id).to_html()
    }

    pub fn region_text(&self, id: RegionId) -> String {
        self.region_markup(id).text_content()
    }

    /// The last load cycle ended in an error.
    pub fn failed(&self) -> bool {
        matches!(self.region(RegionId::Products), RegionState::Error(_))
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn to_document(&self) -> String {
        let title = escape_html(&self.title);
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", title));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", title));

        for (id, heading) in [
            (RegionId::Products, "Products"),
            (RegionId::Apis, "APIs"),
            (RegionId::Usage, "Usage (24h)"),
        ] {
            html.push_str(&format!(
                "<section>\n<h2>{}</h2>\n<div id=\"{}\">{}</div>\n</section>\n",
                heading,
                id,
                self.region_html(id)
            ));
        }

        if let Some(updated_at) = self.updated_at {
            html.push_str(&format!(
                "<footer>Generated {}</footer>\n",
                updated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Surface for Page {
    fn set_region(&mut self, region: RegionId, state: RegionState) {
        tracing::debug!("Region {} -> {}", region, state_label(&state));
        self.regions.insert(region, state);
        self.updated_at = Some(Utc::now());
    }
}

fn state_label(state: &RegionState) -> &'static str {
    match state {
        RegionState::Loading => "loading",
        RegionState::Loaded(_) => "loaded",
        RegionState::Empty => "empty",
        RegionState::Error(_) => "error",
    }
}
