#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Archetype {
    #[default]
    Behavior,
    DataAsset,
    ToolWindow,
    InspectorExtension,
    Singleton,
    Component,
    Custom,
}

impl Archetype {
    pub const ALL: [Archetype; 7] = [
        Archetype::Behavior,
        Archetype::DataAsset,
        Archetype::ToolWindow,
        Archetype::InspectorExtension,
        Archetype::Singleton,
        Archetype::Component,
        Archetype::Custom,
    ];

    /// Unity type name shown in the dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Archetype::Behavior => "MonoBehaviour",
            Archetype::DataAsset => "ScriptableObject",
            Archetype::ToolWindow => "EditorWindow",
            Archetype::InspectorExtension => "Editor",
            Archetype::Singleton => "Singleton",
            Archetype::Component => "Component",
            Archetype::Custom => "Custom",
        }
    }

    /// Base type the generated class derives from, if fixed by the archetype.
    pub fn base_type(self) -> Option<&'static str> {
        match self {
            Archetype::Behavior => Some("MonoBehaviour"),
            Archetype::DataAsset => Some("ScriptableObject"),
            Archetype::ToolWindow => Some("EditorWindow"),
            Archetype::InspectorExtension => Some("Editor"),
            Archetype::Component => Some("Component"),
            Archetype::Singleton | Archetype::Custom => None,
        }
    }

    pub fn next(self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = self.index();
        if index == 0 {
            Self::ALL[Self::ALL.len() - 1]
        } else {
            Self::ALL[index - 1]
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|archetype| *archetype == self)
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toggle {
    pub label: &'static str,
    pub state: bool,
}

impl Toggle {
    pub const fn new(label: &'static str, state: bool) -> Self {
        Self { label, state }
    }
}

pub const BEHAVIOR_METHODS: [(&str, bool); 7] = [
    ("Awake()", false),
    ("OnEnable()", false),
    ("Start()", true),
    ("FixedUpdate()", false),
    ("Update()", true),
    ("LateUpdate()", false),
    ("OnDisable()", false),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BehaviorOptions {
    pub none: Toggle,
    pub methods: Vec<Toggle>,
}

impl Default for BehaviorOptions {
    fn default() -> Self {
        Self {
            none: Toggle::new("None", false),
            methods: BEHAVIOR_METHODS
                .iter()
                .map(|&(label, state)| Toggle::new(label, state))
                .collect(),
        }
    }
}

impl BehaviorOptions {
    /// Method toggles are locked while "None" is set.
    pub fn methods_editable(&self) -> bool {
        !self.none.state
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataAssetOptions {
    pub file_name: String,
    pub menu_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingletonOptions {
    pub derive_from_base: Toggle,
    pub persist_on_load: Toggle,
}

impl Default for SingletonOptions {
    fn default() -> Self {
        Self {
            derive_from_base: Toggle::new("Derive from Singleton", false),
            persist_on_load: Toggle::new("DontDestroyOnLoad()", false),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomOptions {
    pub empty_class: Toggle,
    pub base_class: String,
}

impl Default for CustomOptions {
    fn default() -> Self {
        Self {
            empty_class: Toggle::new("Empty Class", true),
            base_class: String::new(),
        }
    }
}

impl CustomOptions {
    pub fn base_class_editable(&self) -> bool {
        !self.empty_class.state
    }
}

/// Every option set, kept for the whole session so switching archetypes and
/// back does not lose input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub behavior: BehaviorOptions,
    pub data_asset: DataAssetOptions,
    pub singleton: SingletonOptions,
    pub custom: CustomOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleRef {
    BehaviorNone,
    BehaviorMethod(usize),
    SingletonDerive,
    SingletonPersist,
    CustomEmptyClass,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRef {
    DataAssetFileName,
    DataAssetMenuName,
    CustomBaseClass,
}

impl TextRef {
    pub fn label(self) -> &'static str {
        match self {
            TextRef::DataAssetFileName => "File Name",
            TextRef::DataAssetMenuName => "Menu Name",
            TextRef::CustomBaseClass => "Base Class",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRef {
    Toggle(ToggleRef),
    Text(TextRef),
}
