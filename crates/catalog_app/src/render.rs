use std::fmt::Write;

use catalog_core::{CatalogItem, EmptyState, ListViewModel};
use catalog_engine::Category;

pub fn render_list(view: &ListViewModel) -> String {
    let mut out = String::new();

    if let Some(error) = &view.error {
        let _ = writeln!(out, "error: {error}");
        let _ = writeln!(out, "(run again to retry)");
        return out;
    }

    match view.empty_state {
        Some(EmptyState::NoMatches) => {
            let _ = writeln!(out, "No Pokemon found.");
            let _ = writeln!(
                out,
                "Try adjusting your search or filters to find what you're looking for."
            );
            return out;
        }
        Some(EmptyState::NothingAvailable) => {
            let _ = writeln!(out, "No Pokemon available.");
            return out;
        }
        None => {}
    }

    for item in &view.items {
        let _ = writeln!(out, "{}", render_item(item));
    }
    let _ = writeln!(
        out,
        "-- {} shown, page {}{}",
        view.items.len(),
        view.current_page,
        if view.show_load_more { ", more available" } else { "" }
    );
    out
}

pub fn render_item(item: &CatalogItem) -> String {
    format!(
        "#{:04} {:<14} {:<16} h{:<4} w{:<5} total {}",
        item.id,
        item.display_name(),
        item.categories.join("/"),
        item.height,
        item.weight,
        item.total_stats()
    )
}

pub fn render_categories(categories: &[Category]) -> String {
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{:>3} {}", category.id, category.name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{ImageRefs, ItemStat};

    fn bulbasaur() -> CatalogItem {
        CatalogItem {
            id: 1,
            name: "bulbasaur".to_string(),
            categories: vec!["grass".to_string(), "poison".to_string()],
            height: 7,
            weight: 69,
            base_experience: Some(64),
            stats: vec![
                ItemStat {
                    name: "hp".to_string(),
                    magnitude: 45,
                },
                ItemStat {
                    name: "attack".to_string(),
                    magnitude: 49,
                },
            ],
            traits: Vec::new(),
            images: ImageRefs::default(),
        }
    }

    #[test]
    fn item_line_carries_key_fields() {
        let line = render_item(&bulbasaur());
        assert!(line.starts_with("#0001 Bulbasaur"));
        assert!(line.contains("grass/poison"));
        assert!(line.ends_with("total 94"));
    }

    #[test]
    fn error_hides_items() {
        let view = ListViewModel {
            items: vec![bulbasaur()],
            error: Some("http status 500".to_string()),
            ..ListViewModel::default()
        };
        let out = render_list(&view);
        assert!(out.starts_with("error: http status 500"));
        assert!(!out.contains("Bulbasaur"));
    }

    #[test]
    fn empty_states_differ() {
        let filtered = ListViewModel {
            empty_state: Some(EmptyState::NoMatches),
            ..ListViewModel::default()
        };
        assert!(render_list(&filtered).starts_with("No Pokemon found."));
        let bare = ListViewModel {
            empty_state: Some(EmptyState::NothingAvailable),
            ..ListViewModel::default()
        };
        assert!(render_list(&bare).starts_with("No Pokemon available."));
    }

    #[test]
    fn footer_reports_more() {
        let view = ListViewModel {
            items: vec![bulbasaur()],
            current_page: 1,
            show_load_more: true,
            ..ListViewModel::default()
        };
        assert!(render_list(&view).ends_with("-- 1 shown, page 1, more available\n"));
    }
}
