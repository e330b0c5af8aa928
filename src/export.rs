//! CSV export of the inventory.
//!
//! One record per item, `name,quantity,price`, LF-terminated, no header.
//! Fields containing a comma, a double quote, CR or LF are quoted as in
//! RFC 4180; everything else is written verbatim.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::InventoryError;
use crate::inventory::Inventory;

/// Destination used when none is chosen.
pub const DEFAULT_EXPORT_FILE: &str = "inventory.csv";

/// Write every item of `inventory` to `sink` and flush it.
pub fn write_csv<W: Write>(inventory: &Inventory, mut sink: W) -> std::io::Result<()> {
    for item in inventory {
        writeln!(
            sink,
            "{},{},{}",
            quote_field(item.name()),
            item.quantity_text(),
            item.price_text()
        )?;
    }
    sink.flush()
}

/// Export to an arbitrary writer. Write errors are reported against `label`.
pub fn export<W: Write>(inventory: &Inventory, sink: W, label: &Path) -> Result<(), InventoryError> {
    write_csv(inventory, sink).map_err(|source| InventoryError::ExportFailed {
        path: label.to_path_buf(),
        source,
    })
}

/// Create or truncate `path` and export into it. The file is closed before
/// returning, on success and on failure.
pub fn export_to_path(inventory: &Inventory, path: &Path) -> Result<(), InventoryError> {
    let file = File::create(path).map_err(|source| InventoryError::ExportFailed {
        path: path.to_path_buf(),
        source,
    })?;
    export(inventory, BufWriter::new(file), path)?;
    tracing::info!(path = %path.display(), items = inventory.len(), "inventory exported");
    Ok(())
}

/// Quote a field if it would otherwise break the record structure.
pub fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
