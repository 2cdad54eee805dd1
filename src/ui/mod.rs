pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, group_header, header, section, success, summary_row, warn, word_line};
pub use progress::Spinner;
pub use table::{stats_table, TableBuilder};
pub use theme::{theme, Theme};
