use std::collections::HashMap;
use std::sync::Arc;

use crate::{config::ExchangeConfig, error::ConfigError};

use super::{
    pair_list::PairListCatalog,
    presets::{preset, ResponseShape},
    records::RecordCatalog,
    traits::ExchangeCatalog,
};

/// Resolves a configured exchange into its adapter, layering config
/// overrides on top of the built-in preset.
pub fn build_catalog(config: &ExchangeConfig) -> Result<Arc<dyn ExchangeCatalog>, ConfigError> {
    let name = config.name.to_lowercase();
    let preset = preset(&name);

    let url = config
        .url
        .clone()
        .or_else(|| preset.as_ref().map(|p| p.url.clone()));
    let shape = config
        .shape
        .clone()
        .or_else(|| preset.as_ref().map(|p| p.shape.clone()));

    let (Some(url), Some(shape)) = (url, shape) else {
        return Err(ConfigError::UnknownExchange { name: config.name.clone() });
    };

    let convention = config
        .convention
        .clone()
        .or_else(|| preset.as_ref().map(|p| p.convention.clone()))
        .unwrap_or_default();
    let aliases: HashMap<String, String> = config
        .aliases
        .clone()
        .or_else(|| preset.as_ref().map(|p| p.aliases.clone()))
        .unwrap_or_default()
        .into_iter()
        .map(|(from, to)| (from.to_uppercase(), to.to_uppercase()))
        .collect();

    let catalog: Arc<dyn ExchangeCatalog> = match shape {
        ResponseShape::Records(layout) => Arc::new(RecordCatalog {
            name,
            url,
            layout,
            convention,
            aliases,
        }),
        ResponseShape::PairList { envelope } => Arc::new(PairListCatalog {
            name,
            url,
            envelope,
            convention,
            aliases,
        }),
    };
    Ok(catalog)
}
