use thiserror::Error;

#[derive(Error, Debug)]
pub enum BehaviorError {
    #[error("Failed to parse site config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Invalid site config: {0}")]
    InvalidConfig(String),
    #[error("No global window")]
    MissingWindow,
    #[error("No document on window")]
    MissingDocument,
    #[error("DOM call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for BehaviorError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        BehaviorError::Js(message)
    }
}
