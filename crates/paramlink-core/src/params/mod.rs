//! Connection and credential parameter bundles

mod kind;
mod bundle;

pub use kind::ParamKind;
pub use bundle::ParamBundle;
