pub mod batch;
pub mod identifier;
pub mod result;

pub use batch::batch_id_from_kwargs;
pub use identifier::ResultIdentifier;
pub use result::{
    RunIdentifier, ValidationResult, ValidationStatistics, NO_DATA_ASSET_NAME, NO_RUN_ID,
    NO_SUITE_NAME,
};
