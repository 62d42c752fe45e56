//! Builtin symptom catalog data.
//!
//! One module per symptom family; each exposes a `definition()` consumed
//! by [`Catalog::builtin`](crate::catalog::Catalog::builtin).
//!
//! Shared fact ids cross module boundaries on purpose: `body_temp_f`
//! (fever, dehydration) and `vomited_24h` (nausea, vomiting, dehydration)
//! are each asked at most once per session.

mod breathing;
mod chest_pain;
mod dehydration;
mod diarrhea;
mod fever;
mod flu;
mod nausea;
mod vomiting;

use crate::catalog::SymptomDefinition;

pub const BREATHING: &str = "BRE-101";
pub const CHEST_PAIN: &str = "CHP-102";
pub const DEHYDRATION: &str = "DEH-201";
pub const FEVER: &str = "FEV-202";
pub const NAUSEA: &str = "NAU-203";
pub const VOMITING: &str = "VOM-204";
pub const DIARRHEA: &str = "DIA-205";
pub const FLU: &str = "FLU-301";

/// All builtin symptom definitions, emergency families first.
pub fn builtin() -> Vec<SymptomDefinition> {
    vec![
        breathing::definition(),
        chest_pain::definition(),
        dehydration::definition(),
        fever::definition(),
        nausea::definition(),
        vomiting::definition(),
        diarrhea::definition(),
        flu::definition(),
    ]
}
