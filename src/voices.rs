//! Voice catalog snapshotting and locale-based default selection.

use crate::engine::Voice;
use tracing::debug;

type ChangeCallback = Box<dyn FnMut(&[Voice])>;

/// Snapshot of the engine's voice list. The catalog may start empty and be
/// refreshed whenever the host relays a voices-changed notification.
#[derive(Default)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
    on_change: Option<ChangeCallback>,
}

impl VoiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            on_change: None,
        }
    }

    /// Current snapshot; the underlying set may change between calls.
    pub fn list(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    /// Replace the snapshot and notify the registered callback.
    pub fn set_voices(&mut self, voices: Vec<Voice>) {
        debug!(count = voices.len(), "Voice catalog updated");
        self.voices = voices;
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.voices);
        }
    }

    /// Register the change notification. A single slot: registering a new
    /// callback replaces the previous one.
    pub fn on_change(&mut self, callback: impl FnMut(&[Voice]) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// First voice whose language tag starts with `language_tag`
    /// (case-insensitive, so `"fr"` matches `"fr-FR"`). Catalog order breaks
    /// ties.
    pub fn default_for(&self, language_tag: &str) -> Option<&Voice> {
        let wanted = language_tag.to_ascii_lowercase();
        self.voices
            .iter()
            .find(|voice| voice.language_tag.to_ascii_lowercase().starts_with(&wanted))
    }

    /// All voices matching `language_tag`, in catalog order, for voice
    /// pickers.
    pub fn voices_for(&self, language_tag: &str) -> Vec<Voice> {
        let wanted = language_tag.to_ascii_lowercase();
        self.voices
            .iter()
            .filter(|voice| voice.language_tag.to_ascii_lowercase().starts_with(&wanted))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn voice(id: &str, tag: &str) -> Voice {
        Voice {
            id: id.to_string(),
            display_name: format!("Voice {id}"),
            language_tag: tag.to_string(),
        }
    }

    #[test]
    fn default_for_matches_language_prefix() {
        let catalog =
            VoiceCatalog::with_voices(vec![voice("a", "en-US"), voice("b", "fr-FR")]);
        assert_eq!(catalog.default_for("fr").map(|v| v.id.as_str()), Some("b"));
        assert_eq!(catalog.default_for("FR").map(|v| v.id.as_str()), Some("b"));
        assert!(catalog.default_for("de").is_none());
    }

    #[test]
    fn default_for_prefers_catalog_order() {
        let catalog = VoiceCatalog::with_voices(vec![
            voice("first", "fr-FR"),
            voice("second", "fr-CA"),
        ]);
        assert_eq!(
            catalog.default_for("fr").map(|v| v.id.as_str()),
            Some("first")
        );
    }

    #[test]
    fn voices_for_filters_by_prefix() {
        let catalog = VoiceCatalog::with_voices(vec![
            voice("a", "fr-FR"),
            voice("b", "en-GB"),
            voice("c", "fr-CA"),
        ]);
        let ids: Vec<String> = catalog
            .voices_for("fr")
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn set_voices_fires_single_slot_callback() {
        let mut catalog = VoiceCatalog::new();
        let first_calls = Rc::new(RefCell::new(0));
        let second_calls = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&first_calls);
        catalog.on_change(move |_| *counter.borrow_mut() += 1);
        catalog.set_voices(vec![voice("a", "fr-FR")]);

        // Registering again replaces the first callback.
        let counter = Rc::clone(&second_calls);
        catalog.on_change(move |_| *counter.borrow_mut() += 1);
        catalog.set_voices(vec![voice("a", "fr-FR"), voice("b", "en-US")]);

        assert_eq!(*first_calls.borrow(), 1);
        assert_eq!(*second_calls.borrow(), 1);
        assert_eq!(catalog.list().len(), 2);
    }

    #[test]
    fn cleared_callback_no_longer_fires() {
        let mut catalog = VoiceCatalog::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        catalog.on_change(move |_| *counter.borrow_mut() += 1);
        catalog.clear_on_change();
        catalog.set_voices(vec![voice("a", "fr-FR")]);
        assert_eq!(*calls.borrow(), 0);
    }
}
