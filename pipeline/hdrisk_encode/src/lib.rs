//! Input encoding for heart-disease risk models.
//!
//! Converts the values a user entered on the assessment form into the flat
//! feature-name → value mapping a model was trained on. Numeric fields pass
//! through unchanged, multi-valued categories are always one-hot expanded,
//! and Yes/No and diabetes answers follow the [`EncodingScheme`] the model
//! declares.

pub mod encoder;
pub mod field;
pub mod scheme;
pub mod selection;

pub use encoder::{EncodedFeatureMap, Encoder};
pub use field::{Field, FieldKind, NumericRange, UnknownField};
pub use scheme::{
    BinaryEncoding, DiabeticEncoding, EncodingScheme, EncodingSpec, SchemeId, SuffixCasing,
    UnknownScheme,
};
pub use selection::{RawSelection, RawValue};
