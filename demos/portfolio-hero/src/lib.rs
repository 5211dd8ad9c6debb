use wasm_bindgen::prelude::*;
use cogs_scene::SceneConfig;

mod content;

cogs_web::export_scene!(SceneConfig::default(), "portfolio-hero");

/// Listing-page view model for the given content JSON.
#[wasm_bindgen]
pub fn blog_index_json(content_json: &str) -> Result<String, JsValue> {
    content::blog_index(content_json).map_err(|err| JsValue::from(err.to_string()))
}

/// Post-page view model (page, navigation, head metadata) for `slug`.
#[wasm_bindgen]
pub fn post_page_json(content_json: &str, slug: &str) -> Result<String, JsValue> {
    content::post_page(content_json, slug).map_err(|err| JsValue::from(err.to_string()))
}
