mod ace_table;

pub use ace_table::{load_tables, AceTable};
