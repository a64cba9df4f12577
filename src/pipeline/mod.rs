//! The tabular transform pipeline.
//!
//! A fixed sequence of independent stages. Each stage rebuilds its inputs
//! from literal data, transforms them and hands the results to a
//! `RenderSink`; no state flows from one stage to the next. The only
//! state a `Pipeline` holds is the random generator behind the stock-price
//! sample.

pub mod datasets;
mod stages;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::error::Result;
use crate::render::RenderSink;
use crate::setting::Settings;

pub use stages::Stage;

/// Pipeline options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    /// Seed for random sample data; `None` draws fresh entropy.
    pub seed: Option<u64>,
}

impl PipelineConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Read `random.seed`; a negative value means unseeded.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            seed: settings.random_seed(),
        }
    }
}

/// Runs stages against a sink.
pub struct Pipeline {
    config: PipelineConfig,
    rng: StdRng,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage in order, stopping at the first failure.
    pub fn run(&mut self, sink: &mut dyn RenderSink) -> Result<()> {
        info!(stages = Stage::all().len(), seed = ?self.config.seed, "pipeline started");
        for stage in Stage::all() {
            if let Err(err) = self.run_stage(stage, sink) {
                error!(stage = stage.number(), %err, "stage failed");
                return Err(err);
            }
        }
        info!("pipeline finished");
        Ok(())
    }

    /// Run one stage in isolation.
    pub fn run_stage(&mut self, stage: Stage, sink: &mut dyn RenderSink) -> Result<()> {
        info!(stage = stage.number(), title = stage.title(), "running stage");
        match stage {
            Stage::Alignment => stages::alignment(sink),
            Stage::TimeSeries => stages::time_series(sink, &mut self.rng),
            Stage::Arithmetic => stages::arithmetic(sink),
            Stage::MissingData => stages::missing_data(sink),
            Stage::Merge => stages::merge(sink),
            Stage::Cleaning => stages::cleaning(sink),
            Stage::GroupBy => stages::group_by(sink),
            Stage::CustomFunction => stages::custom_function(sink),
            Stage::Sorting => stages::sorting(sink),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Label, Scalar};
    use crate::render::{Block, MemorySink, TextSink};
    use crate::setting::{SettingValue, RANDOM_SEED};

    fn run_all(seed: u64) -> MemorySink {
        let mut sink = MemorySink::new();
        Pipeline::new(PipelineConfig::seeded(seed)).run(&mut sink).unwrap();
        sink
    }

    fn text_of(value: Option<Scalar>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_config_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("missing.json"));
        assert_eq!(PipelineConfig::from_settings(&settings).seed, None);
        settings.set(RANDOM_SEED, SettingValue::Int(11));
        assert_eq!(PipelineConfig::from_settings(&settings).seed, Some(11));
    }

    #[test]
    fn test_every_stage_has_a_heading() {
        let sink = run_all(1);
        let headings = sink.headings();
        assert_eq!(headings.len(), 9);
        assert_eq!(headings[0], "1. Labeled Data + Automatic Alignment");
        assert_eq!(headings[8], "9. Sorting Data");
    }

    #[test]
    fn test_charts() {
        let sink = run_all(1);
        let titles: Vec<&str> = sink.charts().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Automatic Alignment of Labels (Sum of Sales)",
                "Stock Prices Over Time",
                "Sales Over Time (Cleaned Data)",
                "Total Sales by City",
                "Average Sales by Region",
            ]
        );
        let sizes: Vec<(u32, u32)> = sink.charts().iter().map(|c| c.size).collect();
        assert_eq!(sizes, vec![(800, 400), (1000, 500), (1000, 500), (800, 500), (800, 500)]);
    }

    #[test]
    fn test_alignment_result() {
        let sink = run_all(1);
        let total = sink.find_series("Aligned Result (Sum of Sales):").unwrap();
        assert_eq!(total.get("Delhi"), Some(Scalar::Int(250)));
        assert_eq!(total.get("Mumbai"), None);
        assert_eq!(total.index()[0], Label::from("Bangalore"));
    }

    #[test]
    fn test_player_aggregates() {
        let sink = run_all(1);
        assert_eq!(sink.find_scalar("Average Score:"), Some(&Some(Scalar::Float(53.6))));
        assert_eq!(sink.find_scalar("Maximum Score:"), Some(&Some(Scalar::Int(75))));
        let bonus = sink.find_series("Scores + 5 Bonus Runs:").unwrap();
        assert_eq!(bonus.name(), "Player Scores");
        assert_eq!(bonus.get("Sachin"), Some(Scalar::Int(80)));
    }

    #[test]
    fn test_merge_row_counts() {
        let sink = run_all(1);
        let rows = |caption: &str| sink.find_table(caption).unwrap().nrows();
        assert_eq!(rows("Outer Merge (union of keys, missing where no match):"), 5);
        assert_eq!(rows("Inner Merge (intersection of keys):"), 3);
        assert_eq!(rows("Left Merge (all keys from left, matching from right):"), 4);
        assert_eq!(rows("Right Merge (all keys from right, matching from left):"), 4);
    }

    #[test]
    fn test_group_tables() {
        let sink = run_all(1);
        let by_city = sink.find_table("Sales by City:").unwrap();
        assert_eq!(by_city.nrows(), 5);
        assert_eq!(text_of(by_city.get("City", 0).unwrap()), "Bangalore");
        // 250 + 300 (filled)
        assert_eq!(by_city.get("Sales", 0).unwrap(), Some(Scalar::Float(550.0)));

        let by_region = sink.find_table("Average Sales by Region:").unwrap();
        assert_eq!(by_region.nrows(), 4);
        assert_eq!(text_of(by_region.get("Region", 0).unwrap()), "East");
        assert_eq!(by_region.get("Sales", 0).unwrap(), Some(Scalar::Float(350.0)));
    }

    #[test]
    fn test_sorted_tables() {
        let sink = run_all(1);
        let by_sales = sink.find_table("Sorted by Sales (Ascending):").unwrap();
        assert_eq!(by_sales.get("Sales", 0).unwrap(), Some(Scalar::Float(200.0)));
        assert_eq!(by_sales.get("Sales", 9).unwrap(), Some(Scalar::Float(400.0)));

        let by_date = sink.find_table("Sorted by Date (Descending):").unwrap();
        assert_eq!(by_date.index()[0], Label::Int(9));
        assert_eq!(by_date.ncols(), 5);
    }

    #[test]
    fn test_seed_makes_stock_prices_reproducible() {
        let caption = "Time Series Data (Daily Stock Prices):";
        let first = run_all(42);
        let second = run_all(42);
        assert_eq!(first.find_series(caption), second.find_series(caption));
    }

    #[test]
    fn test_run_stage_in_isolation() {
        let mut sink = MemorySink::new();
        let mut pipeline = Pipeline::new(PipelineConfig::seeded(3));
        pipeline.run_stage(Stage::Sorting, &mut sink).unwrap();
        assert_eq!(sink.headings(), vec!["9. Sorting Data"]);
        assert!(matches!(sink.blocks()[1], Block::Note { .. }));
    }

    #[test]
    fn test_text_report() {
        let mut sink = TextSink::new(Vec::new());
        Pipeline::new(PipelineConfig::seeded(5)).run(&mut sink).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("4. Missing Data Handling"));
        assert!(text.contains("Name: Sample Data, dtype: float64"));
        assert!(text.contains("[line chart] Sales Over Time (Cleaned Data) (10 points, 1000x500)"));
    }
}
