/// Student identifier allocation and recycling.
pub mod id_pool;
/// The flat-file import format and the export report format.
pub mod line_format;
mod store;

pub use id_pool::IdPool;
pub use line_format::ImportError;
pub use store::{ExportError, RecordStore, StoreError, UpdateReport};
