//! Recommender configuration.

use data_loader::LoadOptions;
use pipeline::SearchConfig;

/// Settings for building and querying a recommender
#[derive(Debug, Clone, Default)]
pub struct RecommenderConfig {
    pub load: LoadOptions,
    pub search: SearchConfig,
}

impl RecommenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_load_options(mut self, load: LoadOptions) -> Self {
        self.load = load;
        self
    }

    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}
