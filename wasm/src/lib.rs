use dfd_layout::{CellIdMode, Config, build_cells_from_str};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DfdLayoutOptions {
    cell_ids: Option<CellIdMode>,
    padding: Option<f32>,
    node_spacing: Option<f32>,
    max_columns: Option<usize>,
    font_size: Option<f32>,
    pretty: Option<bool>,
}

fn build_config(options: &DfdLayoutOptions) -> Config {
    let mut config = Config::default();
    if let Some(cell_ids) = options.cell_ids {
        config.layout.cell_ids = cell_ids;
    }
    if let Some(padding) = options.padding {
        config.layout.padding = padding.max(0.0);
    }
    if let Some(spacing) = options.node_spacing {
        config.layout.node_spacing = spacing.max(0.0);
    }
    if let Some(columns) = options.max_columns {
        config.layout.max_columns = columns.max(1);
    }
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size.max(1.0);
    }
    config
}

fn layout_to_json(document: &str, options: &DfdLayoutOptions) -> Result<String, String> {
    let config = build_config(options);
    let cells = build_cells_from_str(document, &config.layout, &config.theme)
        .map_err(|error| error.to_string())?;
    let json = if options.pretty.unwrap_or(false) {
        serde_json::to_string_pretty(&cells)
    } else {
        serde_json::to_string(&cells)
    };
    json.map_err(|error| error.to_string())
}

/// Lays out an extractor document (or a response containing one) and returns
/// the X6 cell array as JSON.
#[wasm_bindgen]
pub fn layout_dfd_cells(document_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<DfdLayoutOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        DfdLayoutOptions::default()
    };

    layout_to_json(document_json, &options).map_err(|error| JsValue::from_str(&error))
}
