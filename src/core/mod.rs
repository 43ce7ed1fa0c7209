pub mod attribution;
pub mod builder;
pub mod frequency;
pub mod item;
pub mod normalize;
pub mod traits;

pub use attribution::{TraitState, TraitValue};
pub use builder::{build, build_from_items, build_with_options, BuildOptions, PersonaBuilder, PersonaRecord};
pub use frequency::{Counter, FrequencyAggregator};
pub use item::ContentItem;
pub use normalize::normalize;
pub use traits::{extract_age, extract_location, extract_occupation, Trait};
