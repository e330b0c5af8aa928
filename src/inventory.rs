//! Core data model: [`Item`] values and the ordered [`Inventory`].
//!
//! Nothing here knows about the terminal. Every mutation either succeeds as a
//! whole or leaves the inventory untouched.

use std::fmt;

use crate::error::InventoryError;

/// A stock item. Constructed only through [`Item::new`] or [`Item::parse`],
/// so a value always carries a non-empty name, a quantity and a finite,
/// non-negative price.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    name: String,
    quantity: u32,
    price: f64,
}

impl Item {
    /// Validate an already-typed triple.
    pub fn new(name: impl Into<String>, quantity: u32, price: f64) -> Result<Self, InventoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InventoryError::invalid("Item name cannot be empty"));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(InventoryError::invalid(
                "Price must be a non-negative number",
            ));
        }
        // -0 compares equal to 0 but would display as "-0"
        let price = if price == 0.0 { 0.0 } else { price };
        Ok(Self { name, quantity, price })
    }

    /// Build an item from raw form text.
    ///
    /// Numeric fields are trimmed before parsing; the name is kept as typed.
    pub fn parse(name: &str, quantity: &str, price: &str) -> Result<Self, InventoryError> {
        let quantity = parse_quantity(quantity)?;
        let price = parse_price(price)?;
        Self::new(name, quantity, price)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Display form of the quantity (decimal integer).
    pub fn quantity_text(&self) -> String {
        self.quantity.to_string()
    }

    /// Display form of the price: shortest text that parses back to the
    /// same value (`1.5`, `0.75`, `10`).
    pub fn price_text(&self) -> String {
        self.price.to_string()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (qty {}, price {})", self.name, self.quantity, self.price)
    }
}

fn parse_quantity(s: &str) -> Result<u32, InventoryError> {
    let t = s.trim();
    if t.starts_with('-') && t[1..].parse::<u64>().is_ok() {
        return Err(InventoryError::invalid("Quantity cannot be negative"));
    }
    t.parse::<u32>()
        .map_err(|_| InventoryError::invalid("Quantity & Price must be numbers"))
}

fn parse_price(s: &str) -> Result<f64, InventoryError> {
    let price = s
        .trim()
        .parse::<f64>()
        .map_err(|_| InventoryError::invalid("Quantity & Price must be numbers"))?;
    if !price.is_finite() {
        return Err(InventoryError::invalid("Quantity & Price must be numbers"));
    }
    if price < 0.0 {
        return Err(InventoryError::invalid("Price cannot be negative"));
    }
    Ok(price)
}

/// Ordered, insertion-order collection of items. Items are identified by
/// their 0-based position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Overwrite the item at `index` in place, returning the previous one.
    pub fn replace(&mut self, index: usize, item: Item) -> Result<Item, InventoryError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(InventoryError::OutOfRange { index, len })?;
        Ok(std::mem::replace(slot, item))
    }

    /// Remove the item at `index`; later items shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<Item, InventoryError> {
        self.check(index)?;
        Ok(self.items.remove(index))
    }

    pub fn at(&self, index: usize) -> Result<&Item, InventoryError> {
        self.items.get(index).ok_or(InventoryError::OutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    fn check(&self, index: usize) -> Result<(), InventoryError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(InventoryError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl FromIterator<Item> for Inventory {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, qty: u32, price: f64) -> Item {
        Item::new(name, qty, price).unwrap()
    }

    #[test]
    fn parse_rejects_bad_fields() {
        assert!(matches!(Item::parse("", "1", "1"), Err(InventoryError::InvalidField(_))));
        assert!(matches!(Item::parse("   ", "1", "1"), Err(InventoryError::InvalidField(_))));
        assert!(matches!(Item::parse("X", "abc", "1"), Err(InventoryError::InvalidField(_))));
        assert!(matches!(Item::parse("X", "1", "1,5"), Err(InventoryError::InvalidField(_))));
        assert!(matches!(Item::parse("X", "-1", "1"), Err(InventoryError::InvalidField(_))));
        assert!(matches!(Item::parse("X", "1", "-0.5"), Err(InventoryError::InvalidField(_))));
        assert!(matches!(Item::parse("X", "1", "inf"), Err(InventoryError::InvalidField(_))));
        assert!(matches!(Item::parse("X", "1", "NaN"), Err(InventoryError::InvalidField(_))));
    }

    #[test]
    fn parse_trims_numbers_and_keeps_name() {
        let it = Item::parse(" Pen ", " 10 ", " 1.5").unwrap();
        assert_eq!(it.name(), " Pen ");
        assert_eq!(it.quantity(), 10);
        assert_eq!(it.price(), 1.5);
    }

    #[test]
    fn negative_quantity_has_specific_message() {
        let err = Item::parse("X", "-3", "1").unwrap_err();
        assert_eq!(err.to_string(), "Quantity cannot be negative");
    }

    #[test]
    fn display_forms() {
        let it = item("Pen", 10, 1.5);
        assert_eq!(it.quantity_text(), "10");
        assert_eq!(it.price_text(), "1.5");
        assert_eq!(item("Box", 1, 10.0).price_text(), "10");
    }

    #[test]
    fn negative_zero_price_is_stored_as_zero() {
        let it = Item::parse("X", "1", "-0").unwrap();
        assert!(it.price().is_sign_positive());
        assert_eq!(it.price_text(), "0");
        assert_eq!(item("Y", 1, -0.0).price_text(), "0");
    }

    #[test]
    fn replace_keeps_position_and_size() {
        let mut inv: Inventory = [item("a", 1, 1.0), item("b", 2, 2.0)].into_iter().collect();
        let old = inv.replace(1, item("c", 3, 3.0)).unwrap();
        assert_eq!(old.name(), "b");
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.at(1).unwrap().name(), "c");
    }

    #[test]
    fn out_of_range_operations_leave_inventory_untouched() {
        let mut inv: Inventory = [item("a", 1, 1.0)].into_iter().collect();
        let before = inv.clone();
        assert!(matches!(
            inv.replace(1, item("z", 0, 0.0)),
            Err(InventoryError::OutOfRange { index: 1, len: 1 })
        ));
        assert!(matches!(inv.remove(5), Err(InventoryError::OutOfRange { .. })));
        assert!(inv.at(1).is_err());
        assert_eq!(inv, before);
    }

    #[test]
    fn removing_last_element_empties_inventory() {
        let mut inv = Inventory::new();
        inv.append(item("only", 1, 1.0));
        inv.remove(0).unwrap();
        assert!(inv.is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut inv = Inventory::new();
        inv.append(item("Pen", 1, 1.0));
        inv.append(item("Pen", 1, 1.0));
        assert_eq!(inv.len(), 2);
    }
}
