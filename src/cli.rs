use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::models::{Archetype, BEHAVIOR_METHODS, TextRef, ToggleRef};
use crate::project::DEFAULT_ROOT;
use crate::selection::{DEFAULT_NAME, Selection};

/// Creates Unity C# scripts from class templates.
#[derive(Debug, Parser)]
#[command(
    name = "scriptsmith",
    version,
    long_about = r#"Creates Unity C# scripts from class templates.

Examples:
  scriptsmith                                   # Open the interactive creator
  scriptsmith --select Assets/Player            # Create next to the selected item
  scriptsmith render --archetype data-asset -n Weapon
  scriptsmith create --archetype singleton -n GameManager --derive --persist"#
)]
pub struct Cli {
    /// Project root that scripts are created in and searched for duplicates
    #[arg(short = 'a', long = "assets", default_value = DEFAULT_ROOT, global = true)]
    pub assets: PathBuf,

    /// Currently selected project item; new scripts go into its folder
    #[arg(short = 's', long = "select", global = true)]
    pub select: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the generated script without writing it
    Render(ScriptArgs),
    /// Create the script without opening the form
    Create(ScriptArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArchetypeArg {
    Behavior,
    DataAsset,
    ToolWindow,
    InspectorExtension,
    Singleton,
    Component,
    Custom,
}

impl From<ArchetypeArg> for Archetype {
    fn from(value: ArchetypeArg) -> Self {
        match value {
            ArchetypeArg::Behavior => Archetype::Behavior,
            ArchetypeArg::DataAsset => Archetype::DataAsset,
            ArchetypeArg::ToolWindow => Archetype::ToolWindow,
            ArchetypeArg::InspectorExtension => Archetype::InspectorExtension,
            ArchetypeArg::Singleton => Archetype::Singleton,
            ArchetypeArg::Component => Archetype::Component,
            ArchetypeArg::Custom => Archetype::Custom,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ScriptArgs {
    #[arg(short = 't', long = "archetype", value_enum, default_value_t = ArchetypeArg::Behavior)]
    pub archetype: ArchetypeArg,

    #[arg(short = 'n', long = "name", default_value = DEFAULT_NAME)]
    pub name: String,

    /// Behavior methods to stub, e.g. `--method Awake --method Update`
    #[arg(short = 'm', long = "method")]
    pub methods: Vec<String>,

    /// Behavior: emit no method stubs
    #[arg(long)]
    pub none: bool,

    /// Data asset: default file name
    #[arg(long = "file-name")]
    pub file_name: Option<String>,

    /// Data asset: asset menu entry, defaults to the script name
    #[arg(long = "menu-name")]
    pub menu_name: Option<String>,

    /// Singleton: derive from the generic Singleton<T> base class
    #[arg(long)]
    pub derive: bool,

    /// Singleton: keep the instance across scene loads
    #[arg(long)]
    pub persist: bool,

    /// Custom: base class to derive from
    #[arg(long = "base-class")]
    pub base_class: Option<String>,
}

impl ScriptArgs {
    /// Builds a form state the same way the interactive editor would.
    pub fn to_selection(&self) -> Result<Selection, String> {
        let mut selection = Selection::new();
        selection.set_archetype(self.archetype.into());
        selection.set_name(self.name.as_str());

        if !self.methods.is_empty() {
            let wanted = self
                .methods
                .iter()
                .map(|method| method_index(method).ok_or_else(|| format!("unknown method: {method}")))
                .collect::<Result<Vec<usize>, String>>()?;
            for index in 0..BEHAVIOR_METHODS.len() {
                selection.set_toggle(ToggleRef::BehaviorMethod(index), wanted.contains(&index));
            }
        }
        if self.none {
            selection.set_toggle(ToggleRef::BehaviorNone, true);
        }

        if let Some(file_name) = &self.file_name {
            selection.set_text(TextRef::DataAssetFileName, file_name.as_str());
        }
        if let Some(menu_name) = &self.menu_name {
            selection.set_text(TextRef::DataAssetMenuName, menu_name.as_str());
        }

        selection.set_toggle(ToggleRef::SingletonDerive, self.derive);
        selection.set_toggle(ToggleRef::SingletonPersist, self.persist);

        if let Some(base_class) = self.base_class.as_deref().filter(|base| !base.is_empty()) {
            selection.set_toggle(ToggleRef::CustomEmptyClass, false);
            selection.set_text(TextRef::CustomBaseClass, base_class);
        }
        Ok(selection)
    }
}

fn method_index(method: &str) -> Option<usize> {
    let wanted = method.trim().trim_end_matches("()");
    BEHAVIOR_METHODS.iter().position(|(label, _)| {
        label
            .trim_end_matches("()")
            .eq_ignore_ascii_case(wanted)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid arguments")
    }

    fn script_args(cli: Cli) -> ScriptArgs {
        match cli.command {
            Some(Commands::Render(args)) | Some(Commands::Create(args)) => args,
            None => panic!("expected a subcommand"),
        }
    }

    #[test]
    fn defaults_open_the_form_on_assets() {
        let cli = parse(&["scriptsmith"]);
        assert_eq!(cli.assets, PathBuf::from("Assets"));
        assert!(cli.select.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn methods_replace_the_default_stubs() {
        let cli = parse(&["scriptsmith", "render", "-m", "awake", "-m", "LateUpdate()"]);
        let selection = script_args(cli).to_selection().expect("known methods");
        let text = selection.generated();
        assert!(text.contains("void Awake()"));
        assert!(text.contains("void LateUpdate()"));
        assert!(!text.contains("void Start()"));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let cli = parse(&["scriptsmith", "render", "-m", "Tick"]);
        assert_eq!(
            script_args(cli).to_selection().err(),
            Some("unknown method: Tick".to_string())
        );
    }

    #[test]
    fn custom_base_class_turns_off_empty_class() {
        let cli = parse(&[
            "scriptsmith",
            "create",
            "--archetype",
            "custom",
            "-n",
            "Enemy",
            "--base-class",
            "Character",
        ]);
        let selection = script_args(cli).to_selection().expect("valid");
        assert!(selection.generated().contains("public class Enemy : Character\n{"));
    }

    #[test]
    fn singleton_flags_reach_the_template() {
        let cli = parse(&[
            "scriptsmith",
            "render",
            "-t",
            "singleton",
            "-n",
            "GameManager",
            "--derive",
            "--persist",
        ]);
        let selection = script_args(cli).to_selection().expect("valid");
        assert!(selection.generated().contains(": Singleton<GameManager>"));
        assert!(selection.singleton_base().is_some_and(|base| base.contains("DontDestroyOnLoad")));
    }
}
