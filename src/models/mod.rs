pub mod decoded_text;
pub mod loaders;
pub mod question;
pub mod variant;

pub use decoded_text::{decode, DecodedText};
pub use loaders::{load_catalog, parse_catalog};
pub use question::{Question, QuestionInfo, DEFAULT_POINT};
pub use variant::QuestionVariant;
