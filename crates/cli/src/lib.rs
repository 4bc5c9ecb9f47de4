pub mod batch;
pub mod logging;
pub mod pipeline;
pub mod settings;

pub use batch::{BatchReadFailure, FailurePolicy, InputSource, SourceReader};
pub use pipeline::{convert_bytes, export, load_batch, BatchOutcome, ConvertOptions, Conversion, FileOutcome};
pub use settings::{default_config_path, resolve_config, ConfigOverrides};
