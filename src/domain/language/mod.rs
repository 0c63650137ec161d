//! Language tags, the supported-language allow-list, and outbound target selection.

mod resolver;

pub use resolver::{
    is_supported, resolve, select_outbound_target, supported_languages, LanguageTag,
    OutboundTranslation,
};
