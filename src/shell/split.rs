use crate::{
    dom::{Dom, ElementId},
    foundation::error::MotionResult,
    shell::config::SplitConfig,
};

/// The per-character units produced by [`TextSplitter::split`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitText {
    /// Element whose text was split.
    pub container: ElementId,
    /// One inline-block unit per character, in text order.
    pub units: Vec<ElementId>,
    /// The original text.
    pub text: String,
}

impl SplitText {
    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Return `true` if nothing was split.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Replaces an element's text with one animatable unit per character.
#[derive(Clone, Debug, Default)]
pub struct TextSplitter {
    config: SplitConfig,
}

impl TextSplitter {
    /// Splitter using the given unit margins.
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// Split the text of `el` into per-character spans.
    ///
    /// Returns `None` when the element has no text; the DOM is then left untouched.
    /// Calling this twice on the same element splits the already-split text again.
    pub fn split(&self, dom: &dyn Dom, el: ElementId) -> MotionResult<Option<SplitText>> {
        let text = dom.text_content(el);
        if text.is_empty() {
            return Ok(None);
        }

        dom.set_text_content(el, "");
        let mut units = Vec::with_capacity(text.chars().count());
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let unit = dom.append_span(el, ch.encode_utf8(&mut buf))?;
            dom.set_style(unit, "display", "inline-block");
            let margin = if ch == ' ' {
                &self.config.space_margin
            } else {
                &self.config.char_margin
            };
            dom.set_style(unit, "margin-right", margin);
            units.push(unit);
        }
        tracing::debug!(container = ?el, units = units.len(), "text split");
        Ok(Some(SplitText {
            container: el,
            units,
            text,
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/split.rs"]
mod tests;
