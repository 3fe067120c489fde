use anyhow::{Context as AnyhowContext, Result};
use heatmap_catalog::{load_records, CatalogIndex, ChartSynthesizer, RandomSeries};
use heatmap_matrix::{BackingValues, LabelCodec, MatrixAssembler, MatrixConfig};
use std::path::Path;

/// Loaded catalog plus the configured assembler.
pub(crate) struct Engine {
    pub(crate) config: MatrixConfig,
    pub(crate) index: CatalogIndex,
    pub(crate) assembler: MatrixAssembler,
}

impl Engine {
    pub(crate) fn load(catalog: &Path, config: MatrixConfig) -> Result<Self> {
        let records = load_records(catalog)
            .with_context(|| format!("Failed to load catalog {}", catalog.display()))?;

        let synthesizer =
            ChartSynthesizer::try_new(config.chart.clone()).context("Invalid chart config")?;
        let mut series = RandomSeries::new(&config.chart);
        let index = CatalogIndex::build(&records, &synthesizer, &mut series);

        let assembler = MatrixAssembler::from_config(&config).context("Invalid matrix config")?;
        Ok(Self {
            config,
            index,
            assembler,
        })
    }

    pub(crate) fn load_backing(&self, path: &Path) -> Result<BackingValues> {
        BackingValues::load(path, &self.config.backing)
            .with_context(|| format!("Failed to load backing values {}", path.display()))
    }

    pub(crate) fn codec(&self) -> &LabelCodec {
        self.assembler.codec()
    }
}

/// Config from `--config` (defaults when absent) with command-line overrides applied.
pub(crate) fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<MatrixConfig> {
    let mut config = match path {
        Some(path) => MatrixConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MatrixConfig::default(),
    };
    if seed.is_some() {
        config.chart.seed = seed;
    }
    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}
