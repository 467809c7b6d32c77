//! Region renderers. Pure functions from a payload (or its absence) to the
//! markup of one region.

use crate::domain::markup::{Element, Markup, Node};
use crate::domain::model::{ApiEntry, Product, RegionState, UsageSummary};

pub const LOADING_PLACEHOLDER: &str = "Loading...";
pub const NO_PRODUCTS_PLACEHOLDER: &str = "No products published.";
pub const NO_APIS_PLACEHOLDER: &str = "No APIs listed.";

pub fn loading_placeholder() -> Markup {
    Markup::new().with(Element::new("p").class("loading").text(LOADING_PLACEHOLDER))
}

pub fn error_message(message: &str) -> Markup {
    Markup::new().with(
        Element::new("p")
            .class("err")
            .text(format!("Error: {}", message)),
    )
}

fn muted(text: &str) -> Markup {
    Markup::new().with(Element::new("p").class("muted").text(text))
}

/// `None` stands for a payload that was not a list.
pub fn render_products(data: Option<&[Product]>) -> Markup {
    let products = match data {
        Some(products) if !products.is_empty() => products,
        _ => return muted(NO_PRODUCTS_PLACEHOLDER),
    };

    products
        .iter()
        .map(|product| {
            let mut item = Element::new("div")
                .class("item")
                .child(Element::new("strong").text(product.name.as_str()))
                .text(format!(" ({})", product.slug));
            if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
                item = item.text(format!(" - {}", description));
            }
            Node::from(item)
        })
        .collect()
}

pub fn render_apis(data: Option<&[ApiEntry]>) -> Markup {
    let apis = match data {
        Some(apis) if !apis.is_empty() => apis,
        _ => return muted(NO_APIS_PLACEHOLDER),
    };

    apis.iter()
        .map(|api| {
            let mut item = Element::new("div")
                .class("item")
                .child(Element::new("strong").text(api.name.as_str()))
                .text(format!(" {}", api.path_prefix));
            if let Some(backend_url) = api.backend_url.as_deref().filter(|u| !u.is_empty()) {
                item = item.text(format!(" -> {}", backend_url));
            }
            Node::from(item)
        })
        .collect()
}

/// An absent summary renders as still loading. The per-API breakdown is a
/// list sorted by API name and is left out when there is nothing in it.
pub fn render_usage(data: Option<&UsageSummary>) -> Markup {
    let Some(summary) = data else {
        return loading_placeholder();
    };

    let mut markup = Markup::new().with(
        Element::new("p")
            .class("total")
            .text(format!("Total: {}", summary.total)),
    );

    if !summary.by_api.is_empty() {
        let breakdown = summary
            .by_api
            .iter()
            .fold(Element::new("ul").class("breakdown"), |list, (api, count)| {
                list.child(Element::new("li").text(format!("{}: {}", api, count)))
            });
        markup.push(breakdown);
    }

    markup
}

/// What a region displays for a given state.
pub fn render_state(state: &RegionState) -> Markup {
    match state {
        RegionState::Loading => loading_placeholder(),
        RegionState::Loaded(markup) => markup.clone(),
        RegionState::Empty => Markup::new(),
        RegionState::Error(message) => error_message(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn product(name: &str, slug: &str, description: Option<&str>) -> Product {
        Product {
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.map(str::to_string),
        }
    }

    fn api(name: &str, path_prefix: &str, backend_url: Option<&str>) -> ApiEntry {
        ApiEntry {
            name: name.to_string(),
            path_prefix: path_prefix.to_string(),
            backend_url: backend_url.map(str::to_string),
        }
    }

    #[test]
    fn test_products_placeholder_for_empty_and_missing_lists() {
        let expected = "<p class=\"muted\">No products published.</p>";
        assert_eq!(render_products(None).to_html(), expected);
        assert_eq!(render_products(Some(&[] as &[Product])).to_html(), expected);
    }

    #[test]
    fn test_products_one_entry_per_item_in_order() {
        let products = vec![
            product("Payments", "pay", None),
            product("Billing", "bill", Some("Invoices and receipts")),
            product("Search", "search", Some("")),
        ];

        let markup = render_products(Some(products.as_slice()));

        assert_eq!(markup.nodes().len(), 3);
        assert_eq!(
            markup.to_html(),
            "<div class=\"item\"><strong>Payments</strong> (pay)</div>\
             <div class=\"item\"><strong>Billing</strong> (bill) - Invoices and receipts</div>\
             <div class=\"item\"><strong>Search</strong> (search)</div>"
        );
    }

    #[test]
    fn test_products_fields_are_escaped() {
        let products = vec![product("<b>Pay</b>", "a&b", Some("\"quoted\" <i>"))];

        let html = render_products(Some(products.as_slice())).to_html();

        assert!(html.contains("&lt;b&gt;Pay&lt;/b&gt;"));
        assert!(html.contains("(a&amp;b)"));
        assert!(html.contains("&quot;quoted&quot; &lt;i&gt;"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<i>"));
    }

    #[test]
    fn test_apis_placeholder_and_entries() {
        assert_eq!(
            render_apis(Some(&[] as &[ApiEntry])).to_html(),
            "<p class=\"muted\">No APIs listed.</p>"
        );
        assert_eq!(render_apis(None), render_apis(Some(&[] as &[ApiEntry])));

        let apis = vec![
            api("Orders", "/orders", Some("http://orders.internal")),
            api("Users", "/users", None),
        ];
        let markup = render_apis(Some(apis.as_slice()));

        assert_eq!(markup.nodes().len(), 2);
        assert_eq!(
            markup.to_html(),
            "<div class=\"item\"><strong>Orders</strong> /orders -&gt; http://orders.internal</div>\
             <div class=\"item\"><strong>Users</strong> /users</div>"
        );
    }

    #[test]
    fn test_apis_fields_are_escaped() {
        let apis = vec![api("A<script>", "/x?a=1&b=2", Some("http://h/<p>"))];

        let html = render_apis(Some(apis.as_slice())).to_html();

        assert!(html.contains("A&lt;script&gt;"));
        assert!(html.contains("/x?a=1&amp;b=2"));
        assert!(html.contains("http://h/&lt;p&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_usage_absent_is_loading() {
        assert_eq!(render_usage(None), loading_placeholder());
        assert_eq!(render_usage(None).text_content(), "Loading...");
    }

    #[test]
    fn test_usage_zero_total_has_no_breakdown() {
        let markup = render_usage(Some(&UsageSummary::default()));

        assert_eq!(markup.to_html(), "<p class=\"total\">Total: 0</p>");
        assert!(!markup.to_html().contains("breakdown"));
    }

    #[test]
    fn test_usage_breakdown_sorted_and_escaped() {
        let mut by_api = BTreeMap::new();
        by_api.insert("payments".to_string(), 7);
        by_api.insert("<evil>".to_string(), 1);
        by_api.insert("auth".to_string(), 2);
        let summary = UsageSummary { total: 10, by_api };

        let html = render_usage(Some(&summary)).to_html();

        assert_eq!(
            html,
            "<p class=\"total\">Total: 10</p>\
             <ul class=\"breakdown\"><li>&lt;evil&gt;: 1</li><li>auth: 2</li><li>payments: 7</li></ul>"
        );
    }

    #[test]
    fn test_render_state() {
        assert_eq!(render_state(&RegionState::Loading), loading_placeholder());
        assert!(render_state(&RegionState::Empty).is_empty());
        assert_eq!(
            render_state(&RegionState::Error("Bad <Gateway>".to_string())).to_html(),
            "<p class=\"err\">Error: Bad &lt;Gateway&gt;</p>"
        );
    }
}
