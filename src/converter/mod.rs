pub mod data;
pub mod payload;

pub use data::DataConverter;
pub use payload::{
    JsonPayloadConverter, PayloadConverter, METADATA_ENCODING_JSON, METADATA_ENCODING_NULL,
};
