pub mod conversion;

pub use conversion::{ConversionService, ConvertedFile};
