use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{LayercastError, LayercastResult};

/// Explicit font cache handed to the pipeline.
///
/// Text layers name a family; the book maps family names (case-insensitive) to raw font bytes.
/// The first registered family is the fallback for unknown or missing names. The book is
/// immutable while a composition runs and is shared by all render workers.
#[derive(Clone, Default)]
pub struct FontBook {
    families: Vec<(String, Arc<Vec<u8>>)>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.families.iter().map(|(name, _)| name))
            .finish()
    }
}

impl FontBook {
    /// An empty book; text layers are skipped until a font is registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` (TTF/OTF) under `family`, replacing an existing entry of the same name.
    pub fn register(&mut self, family: impl Into<String>, bytes: Vec<u8>) {
        let family = family.into();
        let bytes = Arc::new(bytes);
        match self
            .families
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(&family))
        {
            Some(slot) => slot.1 = bytes,
            None => self.families.push((family, bytes)),
        }
    }

    /// Builder-style [`FontBook::register`].
    pub fn with_font(mut self, family: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.register(family, bytes);
        self
    }

    /// Return `true` when no font is registered.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Resolve a requested family to a registered `(name, bytes)` pair.
    ///
    /// Falls back to the first registered family; `None` only when the book is empty.
    pub fn resolve(&self, family: Option<&str>) -> Option<(&str, &Arc<Vec<u8>>)> {
        let exact = family.and_then(|want| {
            self.families
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(want.trim()))
        });
        exact
            .or_else(|| self.families.first())
            .map(|(name, bytes)| (name.as_str(), bytes))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Stateful helper for building Parley text layouts from [`FontBook`] entries.
///
/// Not `Sync`: each render worker owns one. Fonts are registered with Parley once per engine.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: HashMap<String, String>,
    glyph_fonts: HashMap<String, vello_cpu::peniko::FontData>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
            glyph_fonts: HashMap::new(),
        }
    }

    fn parley_family(&mut self, book_name: &str, font_bytes: &[u8]) -> LayercastResult<String> {
        if let Some(name) = self.registered.get(book_name) {
            return Ok(name.clone());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            LayercastError::validation(format!("font '{book_name}' registered no families"))
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LayercastError::validation("registered font family has no name"))?
            .to_string();
        self.registered
            .insert(book_name.to_owned(), family_name.clone());
        Ok(family_name)
    }

    /// Font handle for glyph rasterization, cached per book family.
    pub(crate) fn glyph_font(
        &mut self,
        book_name: &str,
        font_bytes: &[u8],
    ) -> vello_cpu::peniko::FontData {
        self.glyph_fonts
            .entry(book_name.to_owned())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
                    0,
                )
            })
            .clone()
    }

    /// Shape and lay out plain, left-aligned text. Lines break only at `\n`.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        book_name: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> LayercastResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(LayercastError::validation(
                "text font size must be finite and > 0",
            ));
        }

        let family_name = self.parley_family(book_name, font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
