use std::fmt::{self, Display, Formatter};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::replicate::Replication;
use crate::statistics::{Bins, Summary};

fn table(title: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(title).set_alignment(CellAlignment::Center),
            Cell::new("Value").set_alignment(CellAlignment::Center),
        ]);
    table
}

fn row(table: &mut Table, name: &str, value: String) {
    table.add_row(vec![
        Cell::new(name).set_alignment(CellAlignment::Left),
        Cell::new(value).set_alignment(CellAlignment::Right),
    ]);
}

fn number(x: f64) -> String {
    if x.is_nan() {
        "—".to_owned()
    } else if x != 0.0 && (x.abs() >= 1e6 || x.abs() < 1e-4) {
        format!("{x:.4e}")
    } else {
        format!("{x:.4}")
    }
}

impl Summary {
    /// Rendered table of the summary, quantiles included.
    pub fn display(&self) -> String {
        let mut t = table("Summary");
        row(&mut t, "n", self.n.to_string());
        row(&mut t, "mean", number(self.mean));
        row(&mut t, "sd", number(self.sd));
        for &(p, q) in &self.quantiles {
            let name = if p <= 0.0 {
                "min".to_owned()
            } else if p >= 1.0 {
                "max".to_owned()
            } else {
                format!("Q({p:.2})")
            };
            row(&mut t, &name, number(q));
        }
        t.to_string()
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Replication {
    /// Rendered table of cycle counts and the Monte Carlo estimate.
    pub fn display(&self) -> String {
        let mut t = table("Replication");
        row(&mut t, "cycles", self.cycles().to_string());
        row(&mut t, "outcomes", self.len().to_string());
        row(&mut t, "failed", self.failure_count().to_string());
        if let Ok(mean) = self.mean() {
            row(&mut t, "estimate", number(mean));
        }
        if let Ok(se) = self.standard_error() {
            row(&mut t, "standard error", number(se));
        }
        if let Ok(ci) = self.confidence_interval(0.95) {
            row(&mut t, "95% interval", format!("[{}, {}]", number(ci.lower), number(ci.upper)));
        }
        t.to_string()
    }
}

impl Display for Replication {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Display for Bins {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut t = table("Bin");
        for &(start, count) in &self.bins {
            row(
                &mut t,
                &format!("[{}, {})", number(start), number(start + self.width)),
                count.to_string(),
            );
        }
        write!(f, "{t}")
    }
}

#[cfg(test)]
mod tests {
    use crate::statistics::{Histogram, Statistic, summarize};

    #[test]
    fn summary_table_lists_quantiles() {
        let text = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap().to_string();
        assert!(text.contains("mean"));
        assert!(text.contains("2.5000"));
        assert!(text.contains("Q(0.25)"));
        assert!(text.contains("max"));
    }

    #[test]
    fn bins_table_has_one_row_per_bin() {
        let bins = Histogram::new(1.0).unwrap().compute(&[0.0, 0.5, 1.5]).unwrap();
        let text = bins.to_string();
        assert!(text.contains("[0.0000, 1.0000)"));
        assert!(text.contains("[1.0000, 2.0000)"));
    }
}
