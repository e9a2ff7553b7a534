use crate::models::{Archetype, BehaviorOptions, CustomOptions, DataAssetOptions, Options, SingletonOptions};

const COLLECTION_IMPORTS: &str =
    "using System.Collections;\nusing System.Collections.Generic;\nusing UnityEngine;\n";
const EDITOR_IMPORTS: &str = "using UnityEditor;\nusing UnityEngine;\n";
const ENGINE_IMPORT: &str = "using UnityEngine;\n";

pub const SINGLETON_BASE_NAME: &str = "Singleton";

const SINGLETON_BASE_HEAD: &str = concat!(
    "using System.Collections;\n",
    "using System.Collections.Generic;\n",
    "using UnityEngine;\n",
    "\n",
    "public class Singleton<T> : MonoBehaviour where T : Component\n",
    "{\n",
    "\tprivate static T instance;\n",
    "\n",
    "\tpublic static T Instance\n",
    "\t{\n",
    "\t\tget\n",
    "\t\t{\n",
    "\t\t\tif (instance == null)\n",
    "\t\t\t{\n",
    "\t\t\t\tinstance = FindObjectOfType<T>();\n",
    "\n",
    "\t\t\t\tif (instance == null)\n",
    "\t\t\t\t{\n",
    "\t\t\t\t\tGameObject singletonObj = new GameObject();\n",
    "\t\t\t\t\tsingletonObj.name = typeof(T).Name;\n",
    "\t\t\t\t\tinstance = singletonObj.AddComponent<T>();\n",
    "\t\t\t\t}\n",
    "\t\t\t}\n",
    "\n",
    "\t\t\treturn instance;\n",
    "\t\t}\n",
    "\t}\n",
    "\n",
    "\tprivate void Awake()\n",
    "\t{\n",
);

const SINGLETON_BASE_PERSIST_AWAKE: &str = concat!(
    "\t\tif (instance != null && instance != this)\n",
    "\t\t{\n",
    "\t\t\tDestroy(gameObject);\n",
    "\t\t\treturn;\n",
    "\t\t}\n",
    "\n",
    "\t\tinstance = this as T;\n",
    "\t\tDontDestroyOnLoad(gameObject);\n",
);

const SINGLETON_BASE_AWAKE: &str = concat!(
    "\t\tif (instance != null)\n",
    "\t\t{\n",
    "\t\t\tDestroy(gameObject);\n",
    "\t\t}\n",
    "\t\telse\n",
    "\t\t{\n",
    "\t\t\tinstance = GetComponent<T>();\n",
    "\t\t}\n",
);

/// Output of one render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub script: String,
    /// Generic `Singleton<T>` file, present only when the script derives from it.
    pub singleton_base: Option<String>,
}

pub fn indent(count: usize) -> String {
    "\t".repeat(count)
}

pub fn newline(count: usize) -> String {
    "\n".repeat(count)
}

/// Empty method block at class level, e.g. `\tvoid Start()\n\t{\n\n\t}\n`.
pub fn method_stub(signature: &str, trailing_blank_line: bool, return_type: &str) -> String {
    let mut output = format!(
        "{tab}{return_type} {signature}\n{tab}{{\n\n{tab}}}\n",
        tab = indent(1)
    );
    if trailing_blank_line {
        output.push_str(&newline(1));
    }
    output
}

pub fn render(archetype: Archetype, options: &Options, name: &str) -> Rendered {
    let script = match archetype {
        Archetype::Behavior => render_behavior(&options.behavior, name),
        Archetype::DataAsset => render_data_asset(&options.data_asset, name),
        Archetype::ToolWindow | Archetype::InspectorExtension | Archetype::Component => {
            render_plain(archetype, name)
        }
        Archetype::Singleton => render_singleton(&options.singleton, name),
        Archetype::Custom => render_custom(&options.custom, name),
    };
    let singleton_base = match archetype {
        Archetype::Singleton if options.singleton.derive_from_base.state => Some(
            render_singleton_base(options.singleton.persist_on_load.state),
        ),
        _ => None,
    };
    Rendered {
        script,
        singleton_base,
    }
}

pub fn render_singleton_base(persist_on_load: bool) -> String {
    let awake = if persist_on_load {
        SINGLETON_BASE_PERSIST_AWAKE
    } else {
        SINGLETON_BASE_AWAKE
    };
    format!("{SINGLETON_BASE_HEAD}{awake}\t}}\n}}")
}

fn class_header(imports: &str, name: &str, base: Option<&str>) -> String {
    match base {
        Some(base) => format!("{imports}\npublic class {name} : {base}\n{{"),
        None => format!("{imports}\npublic class {name}\n{{"),
    }
}

fn close(header: String, body: &str) -> String {
    format!("{header}{body}}}")
}

fn empty_body() -> String {
    newline(2)
}

fn render_behavior(options: &BehaviorOptions, name: &str) -> String {
    let header = class_header(COLLECTION_IMPORTS, name, Archetype::Behavior.base_type());
    if options.none.state {
        return close(header, &empty_body());
    }

    let selected: Vec<&str> = options
        .methods
        .iter()
        .filter(|toggle| toggle.state)
        .map(|toggle| toggle.label)
        .collect();
    if selected.is_empty() {
        return close(header, "");
    }

    let mut body = newline(1);
    for (index, signature) in selected.iter().enumerate() {
        let is_last = index + 1 == selected.len();
        body.push_str(&method_stub(signature, !is_last, "void"));
    }
    close(header, &body)
}

fn render_data_asset(options: &DataAssetOptions, name: &str) -> String {
    let mut attribute = String::from("[CreateAssetMenu(");
    if !options.file_name.is_empty() {
        attribute.push_str(&format!("fileName = \"{}\", ", options.file_name));
    }
    let menu_name = if options.menu_name.is_empty() {
        name
    } else {
        options.menu_name.as_str()
    };
    attribute.push_str(&format!("menuName = \"{menu_name}\")]\n"));

    let imports = format!("{ENGINE_IMPORT}\n{attribute}");
    let header = format!(
        "{imports}public class {name} : {}\n{{",
        Archetype::DataAsset.base_type().unwrap_or_default()
    );
    close(header, &empty_body())
}

fn render_plain(archetype: Archetype, name: &str) -> String {
    let imports = match archetype {
        Archetype::Component => ENGINE_IMPORT,
        _ => EDITOR_IMPORTS,
    };
    close(
        class_header(imports, name, archetype.base_type()),
        &empty_body(),
    )
}

fn render_singleton(options: &SingletonOptions, name: &str) -> String {
    if options.derive_from_base.state {
        let base = format!("{SINGLETON_BASE_NAME}<{name}>");
        return close(
            class_header(COLLECTION_IMPORTS, name, Some(&base)),
            &empty_body(),
        );
    }

    let header = class_header(EDITOR_IMPORTS, name, Archetype::Behavior.base_type());
    let mut body = newline(1);
    body.push_str(&format!(
        "{}public static {name} Instance {{ get; private set; }}{}",
        indent(1),
        newline(2)
    ));
    body.push_str(&format!("{}private void Awake(){}", indent(1), newline(1)));
    body.push_str(&format!("{}{{{}", indent(1), newline(1)));
    body.push_str(&format!("{}if (Instance == null){}", indent(2), newline(1)));
    body.push_str(&format!("{}{{{}", indent(2), newline(1)));
    body.push_str(&format!("{}Instance = this;{}", indent(3), newline(1)));
    if options.persist_on_load.state {
        body.push_str(&format!(
            "{}DontDestroyOnLoad(gameObject);{}",
            indent(3),
            newline(1)
        ));
    }
    body.push_str(&format!("{}}}{}", indent(2), newline(1)));
    body.push_str(&format!("{}else if (Instance != this){}", indent(2), newline(1)));
    body.push_str(&format!("{}{{{}", indent(2), newline(1)));
    body.push_str(&format!("{}Destroy(gameObject);{}", indent(3), newline(1)));
    body.push_str(&format!("{}}}{}", indent(2), newline(1)));
    body.push_str(&format!("{}}}{}", indent(1), newline(1)));
    close(header, &body)
}

fn render_custom(options: &CustomOptions, name: &str) -> String {
    let base = if options.empty_class.state || options.base_class.is_empty() {
        None
    } else {
        Some(options.base_class.as_str())
    };
    close(class_header(COLLECTION_IMPORTS, name, base), &empty_body())
}
