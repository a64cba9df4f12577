use super::{Block, RenderSink};
use crate::chart::ChartSpec;
use crate::error::RenderError;
use crate::frame::{Scalar, Series, Table};

/// Records every block in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    blocks: Vec<Block>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Text of every heading, in order.
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every chart spec, in order.
    pub fn charts(&self) -> Vec<&ChartSpec> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Chart { spec } => Some(spec),
                _ => None,
            })
            .collect()
    }

    /// First table recorded under `caption`.
    pub fn find_table(&self, caption: &str) -> Option<&Table> {
        self.blocks.iter().find_map(|b| match b {
            Block::Table { caption: c, table } if c == caption => Some(table),
            _ => None,
        })
    }

    /// First series recorded under `caption`.
    pub fn find_series(&self, caption: &str) -> Option<&Series> {
        self.blocks.iter().find_map(|b| match b {
            Block::Series { caption: c, series } if c == caption => Some(series),
            _ => None,
        })
    }

    /// First scalar recorded under `caption`.
    pub fn find_scalar(&self, caption: &str) -> Option<&Option<Scalar>> {
        self.blocks.iter().find_map(|b| match b {
            Block::Scalar { caption: c, value } if c == caption => Some(value),
            _ => None,
        })
    }
}

impl RenderSink for MemorySink {
    fn heading(&mut self, text: &str) -> Result<(), RenderError> {
        self.blocks.push(Block::Heading { text: text.to_string() });
        Ok(())
    }

    fn note(&mut self, text: &str) -> Result<(), RenderError> {
        self.blocks.push(Block::Note { text: text.to_string() });
        Ok(())
    }

    fn rule(&mut self) -> Result<(), RenderError> {
        self.blocks.push(Block::Rule);
        Ok(())
    }

    fn series(&mut self, caption: &str, series: &Series) -> Result<(), RenderError> {
        self.blocks.push(Block::Series {
            caption: caption.to_string(),
            series: series.clone(),
        });
        Ok(())
    }

    fn table(&mut self, caption: &str, table: &Table) -> Result<(), RenderError> {
        self.blocks.push(Block::Table {
            caption: caption.to_string(),
            table: table.clone(),
        });
        Ok(())
    }

    fn scalar(&mut self, caption: &str, value: Option<Scalar>) -> Result<(), RenderError> {
        self.blocks.push(Block::Scalar {
            caption: caption.to_string(),
            value,
        });
        Ok(())
    }

    fn chart(&mut self, spec: &ChartSpec) -> Result<(), RenderError> {
        spec.validate()?;
        self.blocks.push(Block::Chart { spec: spec.clone() });
        Ok(())
    }
}

/// Collects blocks and serializes them as one JSON array.
#[derive(Debug, Default)]
pub struct JsonSink {
    inner: MemorySink,
}

impl JsonSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-printed JSON array of all blocks.
    pub fn finish(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self.inner.blocks())?)
    }
}

impl RenderSink for JsonSink {
    fn heading(&mut self, text: &str) -> Result<(), RenderError> {
        self.inner.heading(text)
    }

    fn note(&mut self, text: &str) -> Result<(), RenderError> {
        self.inner.note(text)
    }

    fn rule(&mut self) -> Result<(), RenderError> {
        self.inner.rule()
    }

    fn series(&mut self, caption: &str, series: &Series) -> Result<(), RenderError> {
        self.inner.series(caption, series)
    }

    fn table(&mut self, caption: &str, table: &Table) -> Result<(), RenderError> {
        self.inner.table(caption, table)
    }

    fn scalar(&mut self, caption: &str, value: Option<Scalar>) -> Result<(), RenderError> {
        self.inner.scalar(caption, value)
    }

    fn chart(&mut self, spec: &ChartSpec) -> Result<(), RenderError> {
        self.inner.chart(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;

    #[test]
    fn test_memory_sink_records_in_order() {
        let table = Table::from_columns(vec![("CustID", Column::from(vec![1_i64, 2]))]).unwrap();
        let mut sink = MemorySink::new();
        sink.heading("Merge").unwrap();
        sink.table("Inner Merge", &table).unwrap();
        sink.rule().unwrap();
        sink.scalar("Average Score:", None).unwrap();

        let kinds: Vec<&str> = sink.blocks().iter().map(|b| b.kind()).collect();
        assert_eq!(kinds, vec!["heading", "table", "rule", "scalar"]);
        assert_eq!(sink.headings(), vec!["Merge"]);
        assert_eq!(sink.find_table("Inner Merge"), Some(&table));
        assert_eq!(sink.find_scalar("Average Score:"), Some(&None));
        assert!(sink.find_table("Outer Merge").is_none());
    }

    #[test]
    fn test_json_sink_output() {
        let series = Series::with_labels("Sample Data", ["P1", "P2"], vec![Some(25.0), None]).unwrap();
        let mut sink = JsonSink::new();
        sink.heading("Missing Data Handling").unwrap();
        sink.series("Original", &series).unwrap();
        let json: serde_json::Value = serde_json::from_str(&sink.finish().unwrap()).unwrap();

        assert_eq!(json[0]["kind"], "heading");
        assert_eq!(json[0]["text"], "Missing Data Handling");
        assert_eq!(json[1]["series"]["name"], "Sample Data");
        assert_eq!(json[1]["series"]["index"][0], "P1");
        assert_eq!(json[1]["series"]["data"]["dtype"], "float");
        assert!(json[1]["series"]["data"]["values"][1].is_null());
    }

    #[test]
    fn test_chart_validated() {
        let spec = ChartSpec::bar("Bad").data(vec!["a".into()], vec![]);
        assert!(MemorySink::new().chart(&spec).is_err());
    }
}
