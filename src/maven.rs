pub mod coordinates;
pub mod emitter;
pub mod metadata_builder;
pub mod metadata_xml;
pub mod paths;
pub mod scanner;
pub mod snapshot;
