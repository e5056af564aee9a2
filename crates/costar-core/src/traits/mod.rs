pub mod data_source;
pub mod progress_sink;

pub use data_source::IDataSource;
pub use progress_sink::IProgressSink;
