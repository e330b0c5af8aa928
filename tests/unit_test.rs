// Unit tests for inventory-manager
// These exercise the public core API: inventory laws, search laws, export format.

#[cfg(test)]
mod inventory_tests {
    use inventory_manager::{Inventory, InventoryError, Item};

    fn item(name: &str, qty: u32, price: f64) -> Item {
        Item::new(name, qty, price).unwrap()
    }

    #[test]
    fn size_equals_number_of_appends() {
        let mut inv = Inventory::new();
        for n in 0..25u32 {
            assert_eq!(inv.len(), n as usize);
            inv.append(item(&format!("item{n}"), n, f64::from(n) * 0.5));
        }
        assert_eq!(inv.len(), 25);
    }

    #[test]
    fn replace_then_at_returns_new_item() {
        let mut inv: Inventory = (0..4).map(|n| item(&format!("i{n}"), n, 1.0)).collect();
        let x = item("replacement", 99, 9.99);
        inv.replace(2, x.clone()).unwrap();
        assert_eq!(inv.at(2).unwrap(), &x);
        assert_eq!(inv.len(), 4);
        // neighbours untouched
        assert_eq!(inv.at(1).unwrap().name(), "i1");
        assert_eq!(inv.at(3).unwrap().name(), "i3");
    }

    #[test]
    fn remove_shifts_following_items_down() {
        let mut inv: Inventory = (0..5).map(|n| item(&format!("i{n}"), n, 1.0)).collect();
        for i in [0usize, 2, 1] {
            let before_len = inv.len();
            let next = inv.at(i + 1).ok().cloned();
            inv.remove(i).unwrap();
            assert_eq!(inv.len(), before_len - 1);
            assert_eq!(inv.at(i).ok().cloned(), next);
        }
        let names: Vec<&str> = inv.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["i1", "i4"]);
    }

    #[test]
    fn at_out_of_range() {
        let inv = Inventory::new();
        assert!(matches!(inv.at(0), Err(InventoryError::OutOfRange { index: 0, len: 0 })));
    }

    #[test]
    fn item_accessors() {
        let it = Item::parse("Notebook", "2", "3.25").unwrap();
        assert_eq!(it.name(), "Notebook");
        assert_eq!(it.quantity(), 2);
        assert_eq!(it.price(), 3.25);
        assert_eq!(it.to_string(), "Notebook (qty 2, price 3.25)");
    }
}

#[cfg(test)]
mod search_tests {
    use inventory_manager::search::{FilteredView, project};
    use inventory_manager::{Inventory, Item};

    fn sample() -> Inventory {
        [
            ("Pen", 10, 1.5),
            ("Eraser", 5, 0.75),
            ("Notebook", 2, 3.25),
            ("Pencil case", 12, 4.0),
            ("Sharpener", 7, 0.5),
        ]
        .iter()
        .map(|&(n, q, p)| Item::new(n, q, p).unwrap())
        .collect()
    }

    fn hits(inv: &Inventory, q: &str) -> Vec<usize> {
        project(inv, q).into_iter().map(|(i, _)| i).collect()
    }

    #[test]
    fn empty_query_is_enumerate() {
        let inv = sample();
        let projected: Vec<(usize, &Item)> = project(&inv, "");
        let expected: Vec<(usize, &Item)> = inv.iter().enumerate().collect();
        assert_eq!(projected, expected);
    }

    #[test]
    fn longer_query_never_adds_matches() {
        let inv = sample();
        let chains = [
            vec!["p", "pe", "pen", "penc", "pencil", "pencil case"],
            vec!["e", "er", "era", "eras", "eraser"],
            vec!["0", "0.", "0.7", "0.75"],
            vec!["n", "N", "NO", "note"],
        ];
        for chain in chains.iter() {
            for pair in chain.windows(2) {
                let wide = hits(&inv, pair[0]);
                let narrow = hits(&inv, pair[1]);
                assert!(
                    narrow.iter().all(|i| wide.contains(i)),
                    "{:?} matched {:?} but {:?} matched {:?}",
                    pair[1],
                    narrow,
                    pair[0],
                    wide
                );
            }
        }
    }

    #[test]
    fn matches_keep_inventory_order() {
        let inv = sample();
        assert_eq!(hits(&inv, "pen"), vec![0, 3, 4]);
        assert_eq!(hits(&inv, "E"), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn view_maps_rows_to_inventory_positions() {
        let inv = sample();
        let view = FilteredView::new(&inv, "ER");
        assert_eq!(view.indices(), &[1, 4]);
        assert_eq!(view.inventory_index(0), Some(1));
        assert_eq!(view.inventory_index(1), Some(4));
        assert_eq!(view.query(), "ER");
    }
}

#[cfg(test)]
mod export_tests {
    use inventory_manager::export::{quote_field, write_csv};
    use inventory_manager::{Inventory, Item};

    fn render(inv: &Inventory) -> String {
        let mut buf = Vec::new();
        write_csv(inv, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn record_layout() {
        let inv: Inventory = [Item::new("Box", 3, 10.0).unwrap()].into_iter().collect();
        assert_eq!(render(&inv), "Box,3,10\n");
    }

    #[test]
    fn quoted_names_keep_one_record_per_item() {
        let inv: Inventory = [
            Item::new("Pens, blue", 1, 1.0).unwrap(),
            Item::new("12\" ruler", 2, 2.5).unwrap(),
        ]
        .into_iter()
        .collect();
        assert_eq!(render(&inv), "\"Pens, blue\",1,1\n\"12\"\" ruler\",2,2.5\n");
    }

    #[test]
    fn quote_field_leaves_plain_text_alone() {
        assert_eq!(quote_field("Pencil case"), "Pencil case");
        assert_eq!(quote_field(""), "");
    }
}
