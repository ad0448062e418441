use crate::text_metrics::{FontSpec, FontWeight, TextCache, TextMeasurer};

const VERDANA_UNITS_PER_EM: f32 = 2048.0;
const HELVETICA_UNITS_PER_EM: f32 = 1000.0;
const VERDANA_AVERAGE_UNITS: u16 = 1264;
const HELVETICA_BOLD_AVERAGE_UNITS: u16 = 562;
/// Synthetic emboldening applied to regular Verdana advances; only for-the-badge
/// draws bold Verdana.
const VERDANA_BOLD_WIDENING: f32 = 1.05;

/// Which precomputed table a family list maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WidthTable {
    Verdana,
    HelveticaBold,
}

impl WidthTable {
    fn for_font(font: &FontSpec) -> Self {
        if font.family.contains("Helvetica") {
            Self::HelveticaBold
        } else {
            Self::Verdana
        }
    }

    fn units_per_em(self) -> f32 {
        match self {
            Self::Verdana => VERDANA_UNITS_PER_EM,
            Self::HelveticaBold => HELVETICA_UNITS_PER_EM,
        }
    }

    fn advance_units(self, ch: char) -> f32 {
        let units = match self {
            Self::Verdana => verdana_units(ch),
            Self::HelveticaBold => helvetica_bold_units(ch),
        };
        match units {
            Some(units) => units as f32,
            None if is_wide(ch) => self.units_per_em(),
            None => match self {
                Self::Verdana => VERDANA_AVERAGE_UNITS as f32,
                Self::HelveticaBold => HELVETICA_BOLD_AVERAGE_UNITS as f32,
            },
        }
    }
}

/// Table-driven measurer: no font files, identical results on every platform.
///
/// Verdana advances serve the Verdana/DejaVu stacks; any family list naming
/// Helvetica is measured with Helvetica Bold, which is what the social style
/// draws with.
#[derive(Debug)]
pub struct FastTextMeasurer {
    cache: Option<TextCache>,
}

impl FastTextMeasurer {
    pub fn new() -> Self {
        Self { cache: None }
    }

    pub fn with_cache(capacity: usize) -> Self {
        Self {
            cache: Some(TextCache::new(capacity)),
        }
    }

    pub fn cache(&self) -> Option<&TextCache> {
        self.cache.as_ref()
    }
}

impl Default for FastTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for FastTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        if text.is_empty() || font.size <= 0.0 {
            return 0.0;
        }
        match &self.cache {
            Some(cache) => {
                cache
                    .get_or_measure(text, font, || table_text_width(text, font))
                    .width
            }
            None => table_text_width(text, font),
        }
    }
}

pub(crate) fn table_text_width(text: &str, font: &FontSpec) -> f32 {
    let table = WidthTable::for_font(font);
    let units: f32 = text
        .chars()
        .filter(|ch| !is_zero_width(*ch))
        .map(|ch| table.advance_units(ch))
        .sum();
    let mut width = units * font.size / table.units_per_em();
    if table == WidthTable::Verdana && font.weight == FontWeight::Bold {
        width *= VERDANA_BOLD_WIDENING;
    }
    width
}

fn is_zero_width(ch: char) -> bool {
    ch.is_control()
        || matches!(ch, '\u{200B}'..='\u{200D}' | '\u{FEFF}' | '\u{0300}'..='\u{036F}')
}

// East Asian wide and fullwidth blocks, drawn at one em.
fn is_wide(ch: char) -> bool {
    matches!(
        ch,
        '\u{1100}'..='\u{115F}'
            | '\u{2E80}'..='\u{A4CF}'
            | '\u{AC00}'..='\u{D7A3}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FE30}'..='\u{FE4F}'
            | '\u{FF00}'..='\u{FF60}'
            | '\u{FFE0}'..='\u{FFE6}'
            | '\u{1F300}'..='\u{1F64F}'
            | '\u{20000}'..='\u{3FFFD}'
    )
}

fn verdana_units(ch: char) -> Option<u16> {
    let units = match ch {
        ' ' => 720,
        '!' => 823,
        '"' => 1069,
        '#' | '+' | '<' | '=' | '>' | '^' | '~' => 1706,
        '$' | '*' | '_' | '`' => 1303,
        '0'..='9' => 1303,
        '%' => 2224,
        '&' => 1493,
        '\'' => 604,
        '(' | ')' | '/' | ':' | ';' | '[' | '\\' | ']' | '|' => 909,
        ',' | '.' => 745,
        '-' => 883,
        '?' => 1118,
        '@' => 2048,
        '{' | '}' => 1300,
        'A' => 1401,
        'B' => 1405,
        'C' => 1430,
        'D' => 1577,
        'E' => 1294,
        'F' => 1178,
        'G' => 1587,
        'H' => 1540,
        'I' => 862,
        'J' => 942,
        'K' => 1405,
        'L' => 1145,
        'M' => 1729,
        'N' => 1532,
        'O' | 'Q' => 1612,
        'P' => 1235,
        'R' => 1423,
        'S' => 1401,
        'T' => 1256,
        'U' => 1499,
        'V' => 1401,
        'W' => 2025,
        'X' | 'Z' => 1403,
        'Y' => 1255,
        'a' => 1229,
        'b' | 'd' | 'g' | 'p' | 'q' => 1257,
        'c' | 's' | 'z' => 1067,
        'e' => 1208,
        'f' => 716,
        'h' | 'n' | 'u' => 1296,
        'i' | 'l' => 562,
        'j' => 678,
        'k' | 'v' | 'x' | 'y' => 1194,
        'm' => 1991,
        'o' => 1227,
        'r' => 874,
        't' => 807,
        'w' => 1665,
        _ => return None,
    };
    Some(units)
}

fn helvetica_bold_units(ch: char) -> Option<u16> {
    let units = match ch {
        ' ' | ',' | '.' | '/' | '\\' => 278,
        '!' | '(' | ')' | '-' | ':' | ';' | '[' | ']' | '`' => 333,
        '"' => 474,
        '#' | '$' | '_' | '0'..='9' => 556,
        '%' => 889,
        '&' => 722,
        '\'' => 238,
        '*' | '{' | '}' => 389,
        '+' | '<' | '=' | '>' | '^' | '~' => 584,
        '?' => 611,
        '@' => 975,
        '|' => 280,
        'A' | 'B' | 'C' | 'D' | 'H' | 'K' | 'N' | 'R' | 'U' => 722,
        'E' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'F' | 'L' | 'T' | 'Z' => 611,
        'G' | 'O' | 'Q' => 778,
        'I' => 278,
        'J' => 556,
        'M' => 833,
        'W' => 944,
        'a' | 'c' | 'e' | 'k' | 's' | 'v' | 'x' | 'y' => 556,
        'b' | 'd' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 611,
        'f' | 't' => 333,
        'i' | 'j' | 'l' => 278,
        'm' => 889,
        'r' => 389,
        'w' => 778,
        'z' => 500,
        _ => return None,
    };
    Some(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::pixel_text_width;
    use crate::theme::{HELVETICA_STACK, VERDANA_STACK};

    const VERDANA: FontSpec = FontSpec::new(VERDANA_STACK, 11.0, FontWeight::Normal);
    const HELVETICA_BOLD: FontSpec = FontSpec::new(HELVETICA_STACK, 11.0, FontWeight::Bold);

    fn snapped(text: &str, font: &FontSpec) -> u32 {
        pixel_text_width(FastTextMeasurer::new().measure(text, font), true)
    }

    #[test]
    fn verdana_widths_land_on_the_published_pixel_grid() {
        assert_eq!(snapped("cactus", &VERDANA), 35);
        assert_eq!(snapped("grown", &VERDANA), 35);
        assert_eq!(snapped("label", &VERDANA), 27);
        assert_eq!(snapped("message", &VERDANA), 49);
    }

    #[test]
    fn helvetica_bold_widths_match_social_badges() {
        assert_eq!(snapped("Cactus", &HELVETICA_BOLD), 37);
        assert_eq!(snapped("grown", &HELVETICA_BOLD), 33);
    }

    #[test]
    fn zero_width_characters_add_nothing() {
        let measurer = FastTextMeasurer::new();
        let plain = measurer.measure("build", &VERDANA);
        let padded = measurer.measure("bu\u{200B}il\u{FEFF}d\u{0301}", &VERDANA);
        assert_eq!(plain, padded);
        assert_eq!(measurer.measure("\u{200D}", &VERDANA), 0.0);
    }

    #[test]
    fn wide_characters_take_a_full_em() {
        let width = FastTextMeasurer::new().measure("\u{4e2d}", &VERDANA);
        assert!((width - 11.0).abs() < 1e-4, "got {width}");
    }

    #[test]
    fn unknown_characters_use_the_average_advance() {
        let width = FastTextMeasurer::new().measure("\u{00e9}", &VERDANA);
        let expected = VERDANA_AVERAGE_UNITS as f32 * 11.0 / VERDANA_UNITS_PER_EM;
        assert!((width - expected).abs() < 1e-4);
    }

    #[test]
    fn bold_verdana_is_wider_than_regular() {
        let measurer = FastTextMeasurer::new();
        let regular = measurer.measure("GROWN", &VERDANA);
        let bold = measurer.measure("GROWN", &VERDANA.bold());
        assert!((bold - regular * VERDANA_BOLD_WIDENING).abs() < 1e-3);
    }

    #[test]
    fn width_scales_with_font_size() {
        let measurer = FastTextMeasurer::new();
        let w11 = measurer.measure("Hello", &VERDANA);
        let w22 = measurer.measure("Hello", &FontSpec { size: 22.0, ..VERDANA });
        assert!((w22 - w11 * 2.0).abs() < 0.01, "width should double with font size");
    }

    #[test]
    fn cached_measurer_agrees_with_uncached() {
        let cached = FastTextMeasurer::with_cache(16);
        let plain = FastTextMeasurer::new();
        assert_eq!(
            cached.measure("passing", &VERDANA),
            plain.measure("passing", &VERDANA)
        );
        cached.measure("passing", &VERDANA);
        assert_eq!(cached.cache().map(TextCache::len), Some(1));
    }
}
