pub mod factory;
pub mod traits;
pub mod types;

pub mod http;
pub mod presets;
pub mod symbols;

pub mod pair_list;
pub mod records;
