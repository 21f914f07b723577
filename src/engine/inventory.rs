/// Item listing and summary formatting shared by the REPL and reports.
use super::types::Item;

/// Combined weight of a slice of items.
pub fn total_weight(items: &[Item]) -> i32 {
    items.iter().map(|item| item.weight).sum()
}

/// Format items as a numbered pick list, 1-based, value/weight per entry.
pub fn format_item_listing(items: &[Item]) -> Vec<String> {
    if items.is_empty() {
        return vec!["(nothing here)".to_string()];
    }

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| format!("{}) {} ({}/{})", idx + 1, item.name, item.value, item.weight))
        .collect()
}

/// Format the inventory with a trailing weight total.
pub fn format_inventory(items: &[Item]) -> Vec<String> {
    if items.is_empty() {
        return vec!["Your inventory is empty.".to_string()];
    }

    let mut lines = format_item_listing(items);
    lines.push(format!(
        "Total: {} items, {} weight",
        items.len(),
        total_weight(items)
    ));
    lines
}

/// Format the end-of-game summary shown when the player wins.
pub fn format_final_summary(score: i32, items: &[Item]) -> Vec<String> {
    let mut lines = vec![format!("Final score: {}", score)];

    if items.is_empty() {
        lines.push("No items collected.".to_string());
    } else {
        lines.push("Items collected:".to_string());
        for item in items {
            lines.push(format!(
                "- {} (value: {}, weight: {})",
                item.name, item.value, item.weight
            ));
        }
    }

    lines
}
