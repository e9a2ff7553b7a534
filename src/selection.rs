use tracing::debug;

use crate::models::{Archetype, FieldRef, Options, TextRef, Toggle, ToggleRef};
use crate::template::{Rendered, render};

pub const DEFAULT_NAME: &str = "NewScript";

/// Everything one open form session knows. The generated text is derived and
/// rebuilt after every mutation.
#[derive(Clone, Debug)]
pub struct Selection {
    archetype: Archetype,
    options: Options,
    name: String,
    rendered: Rendered,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    pub fn new() -> Self {
        let archetype = Archetype::default();
        let options = Options::default();
        let rendered = render(archetype, &options, DEFAULT_NAME);
        Self {
            archetype,
            options,
            name: DEFAULT_NAME.to_string(),
            rendered,
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generated(&self) -> &str {
        &self.rendered.script
    }

    pub fn singleton_base(&self) -> Option<&str> {
        self.rendered.singleton_base.as_deref()
    }

    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }

    pub fn set_archetype(&mut self, archetype: Archetype) {
        debug!(from = ?self.archetype, to = ?archetype, "archetype selected");
        self.archetype = archetype;
        self.recompute();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.recompute();
    }

    /// Applies a user edit. Returns `false` when the toggle is locked.
    pub fn set_toggle(&mut self, field: ToggleRef, value: bool) -> bool {
        if !self.is_editable(FieldRef::Toggle(field)) {
            debug!(?field, "ignored edit of locked toggle");
            return false;
        }
        let Some(toggle) = self.toggle_mut(field) else {
            return false;
        };
        toggle.state = value;
        if field == ToggleRef::CustomEmptyClass && value {
            self.options.custom.base_class.clear();
        }
        self.recompute();
        true
    }

    /// Applies a user edit. Returns `false` when the field is locked.
    pub fn set_text(&mut self, field: TextRef, value: impl Into<String>) -> bool {
        if !self.is_editable(FieldRef::Text(field)) {
            debug!(?field, "ignored edit of locked text field");
            return false;
        }
        *self.text_mut(field) = value.into();
        self.recompute();
        true
    }

    pub fn toggle(&self, field: ToggleRef) -> Option<&Toggle> {
        match field {
            ToggleRef::BehaviorNone => Some(&self.options.behavior.none),
            ToggleRef::BehaviorMethod(index) => self.options.behavior.methods.get(index),
            ToggleRef::SingletonDerive => Some(&self.options.singleton.derive_from_base),
            ToggleRef::SingletonPersist => Some(&self.options.singleton.persist_on_load),
            ToggleRef::CustomEmptyClass => Some(&self.options.custom.empty_class),
        }
    }

    pub fn text(&self, field: TextRef) -> &str {
        match field {
            TextRef::DataAssetFileName => &self.options.data_asset.file_name,
            TextRef::DataAssetMenuName => &self.options.data_asset.menu_name,
            TextRef::CustomBaseClass => &self.options.custom.base_class,
        }
    }

    pub fn is_editable(&self, field: FieldRef) -> bool {
        match field {
            FieldRef::Toggle(ToggleRef::BehaviorMethod(_)) => {
                self.options.behavior.methods_editable()
            }
            FieldRef::Text(TextRef::CustomBaseClass) => self.options.custom.base_class_editable(),
            _ => true,
        }
    }

    /// Option fields of the active archetype in display order.
    pub fn fields(&self) -> Vec<FieldRef> {
        match self.archetype {
            Archetype::Behavior => {
                let mut fields = vec![FieldRef::Toggle(ToggleRef::BehaviorNone)];
                fields.extend(
                    (0..self.options.behavior.methods.len())
                        .map(|index| FieldRef::Toggle(ToggleRef::BehaviorMethod(index))),
                );
                fields
            }
            Archetype::DataAsset => vec![
                FieldRef::Text(TextRef::DataAssetFileName),
                FieldRef::Text(TextRef::DataAssetMenuName),
            ],
            Archetype::Singleton => vec![
                FieldRef::Toggle(ToggleRef::SingletonDerive),
                FieldRef::Toggle(ToggleRef::SingletonPersist),
            ],
            Archetype::Custom => vec![
                FieldRef::Toggle(ToggleRef::CustomEmptyClass),
                FieldRef::Text(TextRef::CustomBaseClass),
            ],
            Archetype::ToolWindow | Archetype::InspectorExtension | Archetype::Component => {
                Vec::new()
            }
        }
    }

    /// Renders the current choices for another name without touching state.
    pub fn render_as(&self, name: &str) -> Rendered {
        render(self.archetype, &self.options, name)
    }

    fn recompute(&mut self) {
        self.rendered = render(self.archetype, &self.options, &self.name);
    }

    fn toggle_mut(&mut self, field: ToggleRef) -> Option<&mut Toggle> {
        match field {
            ToggleRef::BehaviorNone => Some(&mut self.options.behavior.none),
            ToggleRef::BehaviorMethod(index) => self.options.behavior.methods.get_mut(index),
            ToggleRef::SingletonDerive => Some(&mut self.options.singleton.derive_from_base),
            ToggleRef::SingletonPersist => Some(&mut self.options.singleton.persist_on_load),
            ToggleRef::CustomEmptyClass => Some(&mut self.options.custom.empty_class),
        }
    }

    fn text_mut(&mut self, field: TextRef) -> &mut String {
        match field {
            TextRef::DataAssetFileName => &mut self.options.data_asset.file_name,
            TextRef::DataAssetMenuName => &mut self.options.data_asset.menu_name,
            TextRef::CustomBaseClass => &mut self.options.custom.base_class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_behavior_defaults() {
        let selection = Selection::new();
        assert_eq!(selection.archetype(), Archetype::Behavior);
        assert_eq!(selection.name(), DEFAULT_NAME);
        assert!(selection.generated().contains("public class NewScript : MonoBehaviour"));
        assert!(selection.generated().contains("void Start()"));
        assert!(selection.generated().contains("void Update()"));
    }

    #[test]
    fn none_locks_methods_and_keeps_their_values() {
        let mut selection = Selection::new();
        assert!(selection.set_toggle(ToggleRef::BehaviorMethod(0), true));
        assert!(selection.set_toggle(ToggleRef::BehaviorNone, true));

        assert!(!selection.is_editable(FieldRef::Toggle(ToggleRef::BehaviorMethod(0))));
        assert!(!selection.set_toggle(ToggleRef::BehaviorMethod(0), false));
        assert_eq!(selection.toggle(ToggleRef::BehaviorMethod(0)).map(|t| t.state), Some(true));
        assert!(selection.generated().ends_with("{\n\n}"));

        assert!(selection.set_toggle(ToggleRef::BehaviorNone, false));
        assert!(selection.is_editable(FieldRef::Toggle(ToggleRef::BehaviorMethod(0))));
        assert!(selection.generated().contains("void Awake()"));
    }

    #[test]
    fn empty_class_clears_and_locks_base_class() {
        let mut selection = Selection::new();
        selection.set_archetype(Archetype::Custom);
        assert!(!selection.set_text(TextRef::CustomBaseClass, "Base"));

        assert!(selection.set_toggle(ToggleRef::CustomEmptyClass, false));
        assert!(selection.set_text(TextRef::CustomBaseClass, "Base"));
        assert!(selection.generated().contains("public class NewScript : Base"));

        assert!(selection.set_toggle(ToggleRef::CustomEmptyClass, true));
        assert_eq!(selection.text(TextRef::CustomBaseClass), "");
        assert!(!selection.is_editable(FieldRef::Text(TextRef::CustomBaseClass)));
        assert!(selection.generated().contains("public class NewScript\n{"));
    }

    #[test]
    fn switching_archetypes_preserves_input() {
        let mut selection = Selection::new();
        selection.set_archetype(Archetype::DataAsset);
        selection.set_text(TextRef::DataAssetMenuName, "Items/Sword");
        selection.set_archetype(Archetype::Component);
        assert!(selection.generated().contains(": Component"));

        selection.set_archetype(Archetype::DataAsset);
        assert_eq!(selection.text(TextRef::DataAssetMenuName), "Items/Sword");
        assert!(selection.generated().contains("menuName = \"Items/Sword\""));
    }

    #[test]
    fn reselecting_archetype_rerenders_same_text() {
        let mut selection = Selection::new();
        let before = selection.generated().to_string();
        selection.set_archetype(Archetype::Behavior);
        assert_eq!(selection.generated(), before);
    }

    #[test]
    fn name_changes_flow_into_text() {
        let mut selection = Selection::new();
        selection.set_name("My Script");
        assert!(selection.generated().contains("public class My Script"));
        assert!(selection.render_as("MyScript").script.contains("public class MyScript :"));
    }

    #[test]
    fn singleton_base_follows_derive_toggle() {
        let mut selection = Selection::new();
        selection.set_archetype(Archetype::Singleton);
        assert!(selection.singleton_base().is_none());
        selection.set_toggle(ToggleRef::SingletonDerive, true);
        assert!(selection.singleton_base().is_some());
        selection.set_archetype(Archetype::Behavior);
        assert!(selection.singleton_base().is_none());
    }

    #[test]
    fn fields_follow_active_archetype() {
        let mut selection = Selection::new();
        assert_eq!(selection.fields().len(), 8);
        selection.set_archetype(Archetype::ToolWindow);
        assert!(selection.fields().is_empty());
        selection.set_archetype(Archetype::Custom);
        assert_eq!(
            selection.fields(),
            vec![
                FieldRef::Toggle(ToggleRef::CustomEmptyClass),
                FieldRef::Text(TextRef::CustomBaseClass),
            ]
        );
    }
}
