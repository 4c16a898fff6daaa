use crate::config::Config;
use unicode_normalization::UnicodeNormalization;

/// Cleanup for converted markdown. The slicing operations keep their slice
/// text byte-for-byte; only conversion output passes through here.
pub fn clean(cfg: &Config, text: &str) -> String {
    let mut out = text.to_string();

    if cfg.convert.normalize_newlines {
        out = out.replace("\r\n", "\n");
    }

    if cfg.convert.normalize_unicode {
        out = out.nfkc().collect::<String>();
    }

    if cfg.convert.trim_trailing_whitespace {
        out = out
            .lines()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n");
    }

    out
}
