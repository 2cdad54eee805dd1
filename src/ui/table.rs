use crate::index::IndexStats;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &IndexStats, fingerprint: &str) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Groups", &stats.groups.to_string());
    builder.add_row("Words", &stats.words.to_string());
    builder.add_row("Ungrouped", &stats.ungrouped.to_string());
    if let Some((group, count)) = &stats.largest_group {
        builder.add_row("Largest group", &format!("{} ({})", group, count));
    }
    builder.add_row("Fingerprint", &fingerprint[..fingerprint.len().min(16)]);
    builder.build()
}
