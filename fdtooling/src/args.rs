//! Typed argument decoding for tool calls.
//!
//! ```rust
//! use fdtooling::parse_arguments;
//! use serde_json::{Map, json};
//!
//! let mut args = Map::new();
//! args.insert("question".to_string(), json!("Do you take rush jobs?"));
//!
//! let decoded: std::collections::HashMap<String, String> =
//!     parse_arguments(&args).expect("arguments should decode");
//! assert_eq!(decoded["question"], "Do you take rush jobs?");
//! ```

use fdprovider::ToolArguments;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ToolError;

pub fn parse_arguments<T>(args: &ToolArguments) -> Result<T, ToolError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(Value::Object(args.clone()))
        .map_err(|err| ToolError::invalid_arguments(err.to_string()))
}
