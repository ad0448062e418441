use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use ttf_parser::Face;

use crate::error::{BadgeError, Result};
use crate::theme::HELVETICA_STACK;

/// Width charged for a character that neither face can draw, as a fraction of the font size.
const REPLACEMENT_EM: f32 = 0.56;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// The typeface a text run is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// CSS `font-family` list written into the SVG.
    pub family: &'static str,
    /// Size in pixels (the SVG writes it ×10 under `scale(.1)`).
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub const fn new(family: &'static str, size: f32, weight: FontWeight) -> Self {
        Self {
            family,
            size,
            weight,
        }
    }

    pub const fn bold(self) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..self
        }
    }
}

/// Computes the advance width of a text run, in pixels at `font.size`.
///
/// Implementations must be deterministic and must never return a smaller
/// width for a string with more visible characters appended.
pub trait TextMeasurer: Send + Sync {
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredText {
    pub content: String,
    pub font_size: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    family: &'static str,
    size_bits: u32,
    weight: FontWeight,
}

impl CacheKey {
    fn new(text: &str, font: &FontSpec) -> Self {
        Self {
            text: text.to_string(),
            family: font.family,
            size_bits: font.size.to_bits(),
            weight: font.weight,
        }
    }
}

/// Append-only measurement cache shared by every render on a measurer.
///
/// Entries are never replaced or evicted. Two threads racing on the same key
/// both compute it and the first insert wins; the values are identical anyway.
#[derive(Debug)]
pub struct TextCache {
    entries: RwLock<HashMap<CacheKey, Arc<MeasuredText>>>,
    capacity: usize,
}

impl TextCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    pub fn get_or_measure(
        &self,
        text: &str,
        font: &FontSpec,
        measure: impl FnOnce() -> f32,
    ) -> Arc<MeasuredText> {
        let key = CacheKey::new(text, font);
        if let Ok(entries) = self.entries.read()
            && let Some(hit) = entries.get(&key)
        {
            return Arc::clone(hit);
        }

        let measured = Arc::new(MeasuredText {
            content: text.to_string(),
            font_size: font.size,
            width: measure(),
        });
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() < self.capacity {
                return Arc::clone(entries.entry(key).or_insert(measured));
            }
            tracing::debug!(capacity = self.capacity, "text cache full; not storing");
        }
        measured
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascii_advances: [Option<u16>; 128],
}

impl FontFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let mut ascii_advances = [None; 128];
        for byte in 0u8..=127 {
            ascii_advances[byte as usize] = face
                .glyph_index(byte as char)
                .and_then(|glyph_id| face.glyph_hor_advance(glyph_id));
        }
        Some(Self {
            data,
            index,
            units_per_em,
            ascii_advances,
        })
    }

    fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::parse(bytes, 0).ok_or_else(|| BadgeError::FontLoad {
            font: path.display().to_string(),
            reason: "not a parseable TrueType/OpenType face".to_string(),
        })
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, self.index).ok()
    }

    fn scale(&self, font_size: f32) -> f32 {
        font_size / self.units_per_em as f32
    }
}

/// Resolves one character against the primary face, then the fallback.
struct GlyphSource<'a> {
    primary: &'a FontFace,
    primary_face: Option<Face<'a>>,
    fallback: Option<(&'a FontFace, Option<Face<'a>>)>,
}

impl<'a> GlyphSource<'a> {
    fn new(faces: &'a FaceSet, ascii_only: bool) -> Self {
        let parse = |face: &'a FontFace| if ascii_only { None } else { face.face() };
        Self {
            primary: &faces.primary,
            primary_face: parse(&faces.primary),
            fallback: faces
                .fallback
                .as_deref()
                .map(|fallback| (fallback, parse(fallback))),
        }
    }

    fn advance(&self, ch: char, font_size: f32) -> Result<f32> {
        if let Some(units) = lookup(self.primary, self.primary_face.as_ref(), ch) {
            return Ok(units as f32 * self.primary.scale(font_size));
        }
        if let Some((fallback, face)) = &self.fallback
            && let Some(units) = lookup(fallback, face.as_ref(), ch)
        {
            return Ok(units as f32 * fallback.scale(font_size));
        }
        Err(BadgeError::UnsupportedGlyph { ch })
    }
}

fn lookup(font: &FontFace, face: Option<&Face<'_>>, ch: char) -> Option<u16> {
    if ch.is_ascii() {
        return font.ascii_advances[ch as usize];
    }
    let face = face?;
    let glyph = face.glyph_index(ch)?;
    face.glyph_hor_advance(glyph)
}

struct FaceSet {
    primary: Arc<FontFace>,
    fallback: Option<Arc<FontFace>>,
}

/// Regular and bold faces for one `font-family` stack.
struct Faces {
    regular: FaceSet,
    bold: FaceSet,
}

impl Faces {
    /// Font files carry one weight; the same faces serve both.
    fn from_files(primary: &Path, fallback: Option<&Path>) -> Result<Self> {
        let primary = Arc::new(FontFace::load(primary)?);
        let fallback = fallback.map(FontFace::load).transpose()?.map(Arc::new);
        Ok(Self {
            regular: FaceSet {
                primary: Arc::clone(&primary),
                fallback: fallback.clone(),
            },
            bold: FaceSet { primary, fallback },
        })
    }

    fn from_system(db: &Database, primary: &str, fallback: &str) -> Option<Self> {
        let load = |family: &str, weight: Weight| query_face(db, family, weight).map(Arc::new);
        let regular_primary = load(primary, Weight::NORMAL)?;
        let regular_fallback = load(fallback, Weight::NORMAL);
        let bold_primary =
            load(primary, Weight::BOLD).unwrap_or_else(|| Arc::clone(&regular_primary));
        let bold_fallback = load(fallback, Weight::BOLD).or_else(|| regular_fallback.clone());
        Some(Self {
            regular: FaceSet {
                primary: regular_primary,
                fallback: regular_fallback,
            },
            bold: FaceSet {
                primary: bold_primary,
                fallback: bold_fallback,
            },
        })
    }

    fn for_weight(&self, weight: FontWeight) -> &FaceSet {
        match weight {
            FontWeight::Normal => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

/// Measures with real glyph advances from a primary font and an optional fallback.
///
/// Faces are chosen by the run's `font-family` stack; stacks without faces of
/// their own use the default pair.
pub struct ExactTextMeasurer {
    default_faces: Faces,
    families: HashMap<&'static str, Faces>,
    cache: TextCache,
}

impl ExactTextMeasurer {
    /// Loads font files as the default faces for every family stack.
    pub fn from_paths(primary: &Path, fallback: Option<&Path>, cache_capacity: usize) -> Result<Self> {
        Ok(Self {
            default_faces: Faces::from_files(primary, fallback)?,
            families: HashMap::new(),
            cache: TextCache::new(cache_capacity),
        })
    }

    /// Looks both families up among the installed system fonts, per weight.
    ///
    /// The social style's Helvetica stack is resolved separately so it is not
    /// measured with the Verdana faces.
    pub fn from_system(primary: &str, fallback: &str, cache_capacity: usize) -> Result<Self> {
        let mut db = Database::new();
        db.load_system_fonts();
        let default_faces =
            Faces::from_system(&db, primary, fallback).ok_or_else(|| BadgeError::FontLoad {
                font: primary.to_string(),
                reason: "no matching system font".to_string(),
            })?;

        let mut families = HashMap::new();
        if let Some(faces) = Faces::from_system(&db, HELVETICA_STACK, fallback) {
            families.insert(HELVETICA_STACK, faces);
        } else {
            tracing::debug!(family = HELVETICA_STACK, "no system faces; using defaults");
        }

        Ok(Self {
            default_faces,
            families,
            cache: TextCache::new(cache_capacity),
        })
    }

    /// Uses the given font files for runs drawn with `family`.
    pub fn with_family_paths(
        mut self,
        family: &'static str,
        primary: &Path,
        fallback: Option<&Path>,
    ) -> Result<Self> {
        self.families.insert(family, Faces::from_files(primary, fallback)?);
        Ok(self)
    }

    pub fn cache(&self) -> &TextCache {
        &self.cache
    }

    /// Pre-populates the cache, e.g. with the labels a service renders most.
    pub fn warm(&self, texts: &[&str], font: &FontSpec) {
        for text in texts {
            self.measure(text, font);
        }
    }

    /// Advance of a single character, failing when neither face has a glyph.
    pub fn glyph_advance(&self, ch: char, font: &FontSpec) -> Result<f32> {
        GlyphSource::new(self.faces(font), ch.is_ascii()).advance(ch, font.size)
    }

    fn faces(&self, font: &FontSpec) -> &FaceSet {
        self.families
            .get(font.family)
            .unwrap_or(&self.default_faces)
            .for_weight(font.weight)
    }

    fn measure_uncached(&self, text: &str, font: &FontSpec) -> f32 {
        let source = GlyphSource::new(self.faces(font), text.is_ascii());
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            width += source.advance(ch, font.size).unwrap_or_else(|err| {
                tracing::debug!(%err, "using replacement glyph width");
                font.size * REPLACEMENT_EM
            });
        }
        width.max(0.0)
    }
}

impl TextMeasurer for ExactTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        if text.is_empty() || font.size <= 0.0 {
            return 0.0;
        }
        self.cache
            .get_or_measure(text, font, || self.measure_uncached(text, font))
            .width
    }
}

fn query_face(db: &Database, font_family: &str, weight: Weight) -> Option<FontFace> {
    let mut families: Vec<Family<'_>> = Vec::new();
    for part in font_family.split(',') {
        let raw = part.trim().trim_matches('"').trim_matches('\'');
        if raw.is_empty() {
            continue;
        }
        match raw.to_ascii_lowercase().as_str() {
            "serif" => families.push(Family::Serif),
            "sans-serif" => families.push(Family::SansSerif),
            "monospace" => families.push(Family::Monospace),
            _ => families.push(Family::Name(raw)),
        }
    }
    if families.is_empty() {
        families.push(Family::SansSerif);
    }

    let query = Query {
        families: &families,
        weight,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = db.query(&query)?;
    db.with_face_data(id, |data, index| FontFace::parse(data.to_vec(), index))
        .flatten()
}
