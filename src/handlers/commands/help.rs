//! Help command handler

use crate::i18n::I18n;

/// Help text for the current language
pub fn help_text(i18n: &I18n, lang: &str) -> String {
    i18n.t("host.help", lang, None)
}
