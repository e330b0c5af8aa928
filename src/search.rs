use crate::inventory::{Inventory, Item};

/// Joins fields in a row's canonical text. Form input never produces it, so
/// a query cannot match across a field boundary.
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Canonical searchable text for an item: display forms of name, quantity
/// and price joined by [`FIELD_SEPARATOR`].
pub fn row_text(item: &Item) -> String {
    let mut s = String::with_capacity(item.name().len() + 16);
    s.push_str(item.name());
    s.push(FIELD_SEPARATOR);
    s.push_str(&item.quantity_text());
    s.push(FIELD_SEPARATOR);
    s.push_str(&item.price_text());
    s
}

fn matches(item: &Item, folded_query: &str) -> bool {
    folded_query.is_empty() || row_text(item).to_lowercase().contains(folded_query)
}

/// Items whose row text contains `query`, case-insensitively, paired with
/// their inventory position. Order follows the inventory.
pub fn project<'a>(inventory: &'a Inventory, query: &str) -> Vec<(usize, &'a Item)> {
    let q = query.to_lowercase();
    inventory
        .iter()
        .enumerate()
        .filter(|(_, item)| matches(item, &q))
        .collect()
}

/// The current search projection. Stores inventory positions only; call
/// [`FilteredView::refresh`] after every inventory mutation.
#[derive(Clone, Debug, Default)]
pub struct FilteredView {
    query: String,
    indices: Vec<usize>,
}

impl FilteredView {
    pub fn new(inventory: &Inventory, query: impl Into<String>) -> Self {
        let mut view = Self {
            query: query.into(),
            indices: Vec::new(),
        };
        view.refresh(inventory);
        view
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, inventory: &Inventory, query: impl Into<String>) {
        self.query = query.into();
        self.refresh(inventory);
    }

    pub fn refresh(&mut self, inventory: &Inventory) {
        self.indices = project(inventory, &self.query)
            .into_iter()
            .map(|(i, _)| i)
            .collect();
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Inventory position shown at `view_row`.
    pub fn inventory_index(&self, view_row: usize) -> Option<usize> {
        self.indices.get(view_row).copied()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Resolve the view against `inventory`, skipping positions that no
    /// longer exist (only possible if a refresh was missed).
    pub fn rows<'a>(&'a self, inventory: &'a Inventory) -> impl Iterator<Item = (usize, &'a Item)> + 'a {
        self.indices
            .iter()
            .filter_map(move |&i| inventory.at(i).ok().map(|item| (i, item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(items: &[(&str, u32, f64)]) -> Inventory {
        items
            .iter()
            .map(|&(n, q, p)| Item::new(n, q, p).unwrap())
            .collect()
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let inventory = inv(&[("Pen", 10, 1.5), ("Eraser", 5, 0.75), ("Notebook", 2, 3.25)]);
        let hits: Vec<usize> = project(&inventory, "ERA").into_iter().map(|(i, _)| i).collect();
        assert_eq!(hits, vec![1]);

        let hits: Vec<usize> = project(&inventory, "3.25").into_iter().map(|(i, _)| i).collect();
        assert_eq!(hits, vec![2]);

        let hits: Vec<usize> = project(&inventory, "10").into_iter().map(|(i, _)| i).collect();
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn query_does_not_span_fields() {
        let inventory = inv(&[("Pen", 10, 1.5)]);
        assert!(project(&inventory, "pen10").is_empty());
        assert!(project(&inventory, "n1").is_empty());
    }

    #[test]
    fn unicode_case_folding() {
        let inventory = inv(&[("ÄPFEL", 1, 1.0), ("Straße", 1, 1.0)]);
        assert_eq!(project(&inventory, "äpf").len(), 1);
        assert_eq!(project(&inventory, "STRASSE").len(), 0);
        assert_eq!(project(&inventory, "STRAßE").len(), 1);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let inventory = inv(&[("a.b", 1, 1.0), ("axb", 1, 1.0), ("(x", 1, 1.0)]);
        let hits: Vec<usize> = project(&inventory, "a.b").into_iter().map(|(i, _)| i).collect();
        assert_eq!(hits, vec![0]);
        assert_eq!(project(&inventory, "(").len(), 1);
    }

    #[test]
    fn view_refresh_tracks_mutations() {
        let mut inventory = inv(&[("Pen", 10, 1.5), ("Eraser", 5, 0.75)]);
        let mut view = FilteredView::new(&inventory, "pen");
        assert_eq!(view.indices(), &[0]);

        inventory.append(Item::new("Penguin plush", 1, 9.0).unwrap());
        view.refresh(&inventory);
        assert_eq!(view.indices(), &[0, 2]);
        assert_eq!(view.inventory_index(1), Some(2));
        assert_eq!(view.inventory_index(2), None);

        view.set_query(&inventory, "");
        assert_eq!(view.len(), 3);
        let names: Vec<&str> = view.rows(&inventory).map(|(_, it)| it.name()).collect();
        assert_eq!(names, vec!["Pen", "Eraser", "Penguin plush"]);
    }
}
