//! Lexical extractors, one per supported language family

pub mod common;
pub mod javascript;
pub mod python;

use crate::extractor::LanguageExtractor;
use repolens_core::LanguageFamily;

pub use javascript::EcmaScriptExtractor;
pub use python::PythonExtractor;

static ECMASCRIPT: EcmaScriptExtractor = EcmaScriptExtractor;
static PYTHON: PythonExtractor = PythonExtractor;

/// Get the extractor for a language family.
pub fn get_extractor(family: LanguageFamily) -> &'static dyn LanguageExtractor {
    match family {
        LanguageFamily::EcmaScript => &ECMASCRIPT,
        LanguageFamily::Python => &PYTHON,
    }
}
