//! Shows the plugin types the host registers.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use plugscan_core::config::AppConfig;
use plugscan_core::error::AppError;
use plugscan_plugin::PluginType;

/// Table row for a plugin type
#[derive(Debug, Serialize, Tabled)]
pub struct TypeRow {
    /// Assigned bit, or `-` when the type was rejected
    #[tabled(rename = "Bit")]
    pub bit: String,
    /// Type name
    #[tabled(rename = "Type")]
    pub name: String,
    /// Required exported symbol
    #[tabled(rename = "Symbol")]
    pub symbol: String,
}

/// Execute the types command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let ctx = super::build_context(&config.plugins);

    let rows: Vec<TypeRow> = config
        .plugins
        .types
        .iter()
        .map(|ty| TypeRow {
            bit: ctx
                .types()
                .get(&ty.name)
                .map(PluginType::bit_index)
                .map_or_else(|| "-".to_string(), |bit| bit.to_string()),
            name: ty.name.clone(),
            symbol: ty.symbol.clone(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
