use crate::translate::{TranslateError, Translator};

/// Offline stand-in that echoes its input. Useful for exercising the
/// session loop without a credential or network.
#[derive(Clone, Debug, Default)]
pub struct DummyTranslator;

impl DummyTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl Translator for DummyTranslator {
    fn translate(&self, text: &str) -> Result<String, TranslateError> {
        Ok(text.to_owned())
    }
}
