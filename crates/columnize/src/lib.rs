mod color;
mod table;

pub use color::{Color, colorize};
pub use table::{Alignment, Cell, Columnizer};
