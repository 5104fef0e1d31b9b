use std::io;

use tapels_columnize::{Cell, Color, Columnizer};
use tapels_runtime::{
    DIRECTORY_HINT, MIGRATED_HINT, OVERSIZE_HINT, PREMIGRATED_HINT, RESIDENT_HINT, SYMLINK_HINT,
};

/// Print the static color legend for -H and return. Runs entirely
/// outside the listing core.
pub fn display() {
    let rows: [(&str, Color, &str); 6] = [
        ("Blue:", Color::Blue, DIRECTORY_HINT),
        ("Green:", Color::Green, RESIDENT_HINT),
        ("Yellow:", Color::Yellow, PREMIGRATED_HINT),
        ("Red:", Color::Red, MIGRATED_HINT),
        ("Light Blue:", Color::LightBlue, SYMLINK_HINT),
        ("White on Red:", Color::BlinkingRedBackground, OVERSIZE_HINT),
    ];

    let stdout = io::stdout();
    let mut table = Columnizer::new(stdout.lock());
    for (tag, color, hint) in rows {
        table.emit_row(vec![Cell::colored(tag, color), Cell::plain(hint)]);
    }
    if let Err(err) = table.flush() {
        log::warn!("failed to print hints: {err}");
    }
}
