//! Language Resolver.
//!
//! Tags are matched case-sensitively against a fixed allow-list. The list
//! carries its own case variants for region-qualified Chinese (`Zh-CN` and
//! `zh-CN`), so `ZH-CN` is unknown while both listed spellings resolve.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

const SUPPORTED: &[&str] = &[
    "af", "sq", "am", "ar", "hy", "az", "eu", "be", "bn", "bs", "bg", "ca", "ceb", "Zh-CN",
    "zh-CN", "zh", "Zh-TW", "zh-TW", "co", "hr", "cs", "da", "nl", "en", "eo", "et", "fi", "fr",
    "fy", "gl", "ka", "de", "el", "gu", "ht", "ha", "haw", "he", "iw", "hi", "hmn", "hu", "is",
    "ig", "id", "ga", "it", "ja", "jv", "kn", "kk", "km", "rw", "ko", "ku", "ky", "lo", "la",
    "lv", "lt", "lb", "mk", "mg", "ms", "ml", "mt", "mi", "mr", "mn", "my", "ne", "no", "ny",
    "or", "ps", "fa", "pl", "pt", "pa", "ro", "ru", "sm", "gd", "sr", "st", "sn", "sd", "si",
    "sk", "sl", "so", "es", "su", "sw", "sv", "tl", "tg", "ta", "tt", "te", "th", "tr", "tk",
    "uk", "ur", "ug", "uz", "vi", "cy", "xh", "yi", "yo", "zu",
];

static SUPPORTED_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| SUPPORTED.iter().copied().collect());

/// A language tag known to be either supported or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LanguageTag(&'static str);

impl LanguageTag {
    /// Let the translation service detect the language.
    pub const AUTO: LanguageTag = LanguageTag("auto");

    /// Language every prompt is assembled in.
    pub const PIVOT: LanguageTag = LanguageTag("en");

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn is_auto(&self) -> bool {
        *self == Self::AUTO
    }

    pub fn is_pivot(&self) -> bool {
        *self == Self::PIVOT
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self::AUTO
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Maps a raw tag onto the allow-list; anything unknown becomes `auto`.
pub fn resolve(tag: &str) -> LanguageTag {
    SUPPORTED_SET
        .get(tag)
        .copied()
        .map(LanguageTag)
        .unwrap_or(LanguageTag::AUTO)
}

pub fn is_supported(tag: &str) -> bool {
    SUPPORTED_SET.contains(tag)
}

pub fn supported_languages() -> impl Iterator<Item = LanguageTag> {
    SUPPORTED.iter().copied().map(LanguageTag)
}

/// What to do with a completion before it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundTranslation {
    Skip,
    To(LanguageTag),
}

/// Chooses the language a completion is translated into.
///
/// Order matters:
/// 1. an explicit `translate_to` always wins;
/// 2. auto-detected pivot input is answered untranslated;
/// 3. other auto-detected input is answered in the detected language;
/// 4. explicit input is answered in the language it was written in.
///
/// A detected language the allow-list does not know is treated like the
/// pivot: there is nothing valid to translate back into.
pub fn select_outbound_target(
    translate_to: LanguageTag,
    translate_from: LanguageTag,
    detected: LanguageTag,
) -> OutboundTranslation {
    if !translate_to.is_auto() {
        return OutboundTranslation::To(translate_to);
    }
    if translate_from.is_auto() {
        if detected.is_pivot() || detected.is_auto() {
            return OutboundTranslation::Skip;
        }
        return OutboundTranslation::To(detected);
    }
    if translate_from.is_pivot() {
        return OutboundTranslation::Skip;
    }
    OutboundTranslation::To(translate_from)
}
