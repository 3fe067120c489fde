use crate::brackets::extract_first_available;
use crate::chart::{ChartSpec, ChartSynthesizer, SeriesSource};
use crate::normalize::NormalizedKey;
use crate::record::{MeasurementRecord, Metadata};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Detail data behind one matrix cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub domain: String,
    pub dimension: String,
    pub metadata: Metadata,
    pub chart: ChartSpec,
}

/// Which argument order produced a hit in [`CatalogIndex::get_either_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOrder {
    Canonical,
    Swapped,
}

/// Statistics about one index build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Records seen
    pub records: usize,

    /// Entries inserted
    pub entries: usize,

    /// Records ignored because their (domain, dimension) key was already present
    pub duplicates: usize,

    /// Entries whose chart categories came from a bracket list
    pub extracted_categories: usize,
}

/// Immutable two-level lookup `domain -> dimension -> entry`.
///
/// Built once per catalog load. Duplicate keys keep the first record.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: HashMap<NormalizedKey, HashMap<NormalizedKey, CatalogEntry>>,
    domains: Vec<NormalizedKey>,
    dimensions: Vec<NormalizedKey>,
    stats: IndexStats,
}

impl CatalogIndex {
    pub fn build<'a>(
        records: impl IntoIterator<Item = &'a MeasurementRecord>,
        synthesizer: &ChartSynthesizer,
        source: &mut dyn SeriesSource,
    ) -> Self {
        let mut index = Self::default();

        for record in records {
            index.stats.records += 1;
            let domain = record.domain_key();
            let dimension = record.dimension_key();

            let row = index.entries.entry(domain.clone()).or_default();
            if row.contains_key(&dimension) {
                index.stats.duplicates += 1;
                log::warn!(
                    "duplicate catalog entry ({domain}, {dimension}); keeping the first record"
                );
                continue;
            }

            let extracted = extract_first_available(record.category_sources());
            if extracted.as_ref().is_some_and(|values| !values.is_empty()) {
                index.stats.extracted_categories += 1;
            }
            let chart = synthesizer.synthesize(record.chart_kind, extracted.as_deref(), source);

            row.insert(
                dimension.clone(),
                CatalogEntry {
                    domain: record.domain.clone(),
                    dimension: record.dimension.clone(),
                    metadata: record.metadata(),
                    chart,
                },
            );
            index.stats.entries += 1;

            if !index.domains.contains(&domain) {
                index.domains.push(domain);
            }
            if !index.dimensions.contains(&dimension) {
                index.dimensions.push(dimension);
            }
        }

        log::info!(
            "catalog index built: {} records, {} entries, {} duplicates, {} domains x {} dimensions",
            index.stats.records,
            index.stats.entries,
            index.stats.duplicates,
            index.domains.len(),
            index.dimensions.len()
        );
        index
    }

    pub fn get(&self, domain: &NormalizedKey, dimension: &NormalizedKey) -> Option<&CatalogEntry> {
        self.entries.get(domain)?.get(dimension)
    }

    /// Lookup tolerating callers that swapped the axes.
    ///
    /// Prefer [`CatalogIndex::get`] with (domain, dimension); the swapped probe only absorbs
    /// label pairs whose orientation the caller could not establish.
    pub fn get_either_order(
        &self,
        domain: &NormalizedKey,
        dimension: &NormalizedKey,
    ) -> Option<(&CatalogEntry, LookupOrder)> {
        if let Some(entry) = self.get(domain, dimension) {
            return Some((entry, LookupOrder::Canonical));
        }
        let entry = self.get(dimension, domain)?;
        log::debug!("catalog hit only in swapped order ({dimension}, {domain})");
        Some((entry, LookupOrder::Swapped))
    }

    /// Domains in first-seen order.
    pub fn domains(&self) -> &[NormalizedKey] {
        &self.domains
    }

    /// Dimensions in first-seen order.
    pub fn dimensions(&self) -> &[NormalizedKey] {
        &self.dimensions
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.stats.entries
    }

    pub fn is_empty(&self) -> bool {
        self.stats.entries == 0
    }

    /// All entries as `(domain, dimension, entry)`, domains and dimensions in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedKey, &NormalizedKey, &CatalogEntry)> {
        self.domains.iter().flat_map(move |domain| {
            self.dimensions.iter().filter_map(move |dimension| {
                self.get(domain, dimension)
                    .map(|entry| (domain, dimension, entry))
            })
        })
    }
}

/// Holder of the current index. `replace` swaps in a freshly built index; readers keep the
/// snapshot they loaded.
#[derive(Debug, Default)]
pub struct SharedCatalog {
    current: RwLock<Arc<CatalogIndex>>,
}

impl SharedCatalog {
    pub fn new(index: CatalogIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    pub fn snapshot(&self) -> Arc<CatalogIndex> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Install a new index and return the previous one.
    pub fn replace(&self, index: CatalogIndex) -> Arc<CatalogIndex> {
        let next = Arc::new(index);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }
}
