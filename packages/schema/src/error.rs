use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Component type name is empty")]
    EmptyType,

    #[error("Select property '{key}' of '{component_type}' has no options")]
    MissingOptions { component_type: String, key: String },

    #[error("Property '{key}' of '{component_type}' has options but is not a select")]
    UnexpectedOptions { component_type: String, key: String },
}
