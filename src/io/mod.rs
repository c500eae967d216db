//! Raw binary persistence
//!
//! A graph is written as its vertex records followed by its edges, with
//! endpoints expressed as positions in the written vertex sequence. Property
//! maps follow, keyed by those same file ids. All integers are big-endian.

pub mod codec;
pub mod file_id;
pub mod property_io;
pub mod raw_graph;
pub mod serializer;

use thiserror::Error;

pub use codec::{RawReader, RawWriter};
pub use file_id::{FileIdToGraphMap, FileIdToObjectMap, GraphToFileIdMap, ObjectToFileIdMap};
pub use property_io::{
    read_property_maps, write_property_maps, PropertyMapSerializer, PropertyMapSerializers,
    PropertyValueCodec,
};
pub use raw_graph::{read_raw_graph, write_raw_graph};
pub use serializer::{GraphSerializer, ObjectSerializer, PoolGraphSerializer, PoolObjectSerializer};

/// Raw I/O errors
#[derive(Error, Debug)]
pub enum GraphIoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No Serializer registered for {0}")]
    NoSerializer(String),

    #[error("Invalid {what}: {value}")]
    Invalid { what: &'static str, value: i64 },

    #[error("Invalid UTF-8 string: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Graph rejected duplicate edge between file vertices {from} and {to}")]
    DuplicateEdge { from: i32, to: i32 },
}

pub type GraphIoResult<T> = Result<T, GraphIoError>;
