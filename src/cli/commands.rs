//! Command execution: one function per subcommand.

use std::io::{self, BufRead};
use std::path::Path;

use clap::CommandFactory;
use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, instrument};

use crate::application::listing::{bst_listing, traversal_listing, BstOperation};
use crate::application::{dispatch, AppState, Event, Mode, Outcome, TraversalAnimator};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::{output, shell};
use crate::config::{global_config_path, Settings};
use crate::domain::{max_nodes, BinaryTree, TraversalKind};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::view::{render, RenderOptions, RenderState, Viewport};
use crate::view::svg::to_svg;

/// Deepest tree the CLI will generate.
const MAX_DEPTH: usize = 6;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    match &cli.command {
        Some(Commands::Generate {
            depth,
            nodes,
            out,
            json,
        }) => cmd_generate(settings, rng, *depth, *nodes, out.as_deref(), *json),
        Some(Commands::Traverse {
            kind,
            file,
            depth,
            nodes,
            steps,
            listing,
        }) => cmd_traverse(
            settings,
            rng,
            *kind,
            file.as_deref(),
            (*depth, *nodes),
            *steps,
            *listing,
        ),
        Some(Commands::Bst {
            values,
            random,
            insert,
            delete,
            listing,
        }) => cmd_bst(
            settings,
            rng,
            values.as_deref(),
            *random,
            insert,
            delete,
            *listing,
        ),
        Some(Commands::Render {
            file,
            out,
            build,
            simplify_only_child,
        }) => cmd_render(settings, file, out, *build, *simplify_only_child),
        Some(Commands::Quiz) => cmd_quiz(settings, rng, io::stdin().lock()),
        Some(Commands::Shell { ephemeral }) => cmd_shell(settings, rng, *ephemeral),
        Some(Commands::Config { command }) => cmd_config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, try 'treeviz --help'".to_string(),
        )),
    }
}

fn check_depth(depth: usize) -> CliResult<()> {
    if depth == 0 || depth > MAX_DEPTH {
        return Err(CliError::InvalidArgs(format!(
            "depth must be between 1 and {MAX_DEPTH}, got {depth}"
        )));
    }
    Ok(())
}

fn random_tree(rng: &mut SmallRng, depth: usize, nodes: usize) -> CliResult<BinaryTree> {
    check_depth(depth)?;
    let cap = usize::try_from(max_nodes(depth as u32)).unwrap_or(usize::MAX);
    let mut tree = BinaryTree::new();
    tree.generate_random_tree(depth, nodes.min(cap), rng)
        .map_err(|e| CliError::InvalidArgs(e.to_string()))?;
    Ok(tree)
}

fn print_traversals(tree: &BinaryTree) {
    for kind in TraversalKind::ALL {
        output::action(kind.title(), &tree.traversal_values(kind).iter().join(", "));
    }
}

#[instrument(skip(settings, rng))]
fn cmd_generate(
    settings: Settings,
    mut rng: SmallRng,
    depth: usize,
    nodes: usize,
    out: Option<&Path>,
    json: bool,
) -> CliResult<()> {
    let tree = random_tree(&mut rng, depth, nodes)?;
    debug!("generated {} nodes, depth {}", tree.len(), tree.depth());

    if json {
        let traversals: serde_json::Map<String, serde_json::Value> = TraversalKind::ALL
            .into_iter()
            .map(|kind| {
                let values = tree.traversal_values(kind);
                (kind.to_string(), serde_json::json!(values))
            })
            .collect();
        let text = serde_json::to_string_pretty(&traversals).map_err(|e| InfraError::Json {
            context: "serialize traversals".to_string(),
            source: e,
        })?;
        output::info(&text);
    } else {
        output::tree(&tree, &RenderState::default());
        print_traversals(&tree);
    }

    if let Some(path) = out {
        let container = ServiceContainer::ephemeral(settings);
        container.snapshot_service().export_json(&tree, path)?;
        output::success(&format!("Saved {}", path.display()));
    }
    Ok(())
}

#[instrument(skip(settings, rng))]
fn cmd_traverse(
    settings: Settings,
    mut rng: SmallRng,
    kind: TraversalKind,
    file: Option<&Path>,
    random: (usize, usize),
    steps: bool,
    listing: bool,
) -> CliResult<()> {
    let (depth, nodes) = random;
    let tree = match file {
        Some(path) => {
            let container = ServiceContainer::ephemeral(settings);
            container.snapshot_service().import_json(path)?
        }
        None => random_tree(&mut rng, depth, nodes)?,
    };
    if tree.is_empty() {
        return Err(CliError::InvalidArgs("the tree is empty".to_string()));
    }

    if listing {
        output::header(kind.title());
        output::info(traversal_listing(kind));
    }

    let mut render_state = RenderState::default();
    output::tree(&tree, &render_state);

    if steps {
        let mut animator = TraversalAnimator::new(&tree, kind);
        let mut step = 0;
        while animator.next_step(&tree, &mut render_state).is_some() {
            step += 1;
            output::header(&format!("Step {step}: {}", animator.output_text()));
            output::tree(&tree, &render_state);
        }
    }
    output::action(kind.title(), &tree.traversal_values(kind).iter().join(", "));
    Ok(())
}

fn report(outcome: &Outcome) -> bool {
    match outcome {
        Outcome::Info(msg) => {
            output::detail(msg);
            true
        }
        Outcome::Alert(msg) => {
            output::warning(msg);
            false
        }
        _ => true,
    }
}

#[instrument(skip(settings, rng, insert, delete))]
fn cmd_bst(
    settings: Settings,
    mut rng: SmallRng,
    values: Option<&str>,
    random: Option<Option<usize>>,
    insert: &[String],
    delete: &[String],
    listing: bool,
) -> CliResult<()> {
    // an explicit count is drawn up front and replayed as custom input
    let drawn = match random {
        Some(Some(count)) => {
            let values = BinaryTree::new()
                .generate_random_bst(Some(count), &mut rng)
                .map_err(|e| CliError::InvalidArgs(e.to_string()))?;
            Some(values.iter().join(" "))
        }
        _ => None,
    };

    let container = ServiceContainer::ephemeral(settings.clone());
    let mut state = AppState::new(&settings, container.build_session(), rng);
    dispatch(&mut state, Event::SwitchMode(Mode::Bst));

    if listing {
        output::header("Insert");
        output::info(bst_listing(BstOperation::Insert));
        output::header("Delete");
        output::info(bst_listing(BstOperation::Delete));
    }

    match (values, random) {
        (_, Some(Some(_))) => {
            let outcome = dispatch(&mut state, Event::CustomBst(drawn.unwrap_or_default()));
            report(&outcome);
        }
        (_, Some(None)) => {
            let outcome = dispatch(&mut state, Event::RandomBst);
            report(&outcome);
        }
        (Some(values), None) => {
            let outcome = dispatch(&mut state, Event::CustomBst(values.to_string()));
            if !report(&outcome) {
                return Err(CliError::InvalidArgs(
                    outcome.message().unwrap_or_default().to_string(),
                ));
            }
        }
        (None, None) => {}
    }

    for value in insert {
        report(&dispatch(&mut state, Event::BstInsert(value.clone())));
    }
    for value in delete {
        report(&dispatch(&mut state, Event::BstDelete(value.clone())));
    }

    let tree = state.current_tree();
    output::tree(tree, state.render_state());
    output::action("Values", &state.bst_values().iter().join(", "));
    output::action("Inorder", &tree.inorder().iter().join(", "));
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_render(
    settings: Settings,
    file: &Path,
    out: &Path,
    build: bool,
    simplify_only_child: Option<bool>,
) -> CliResult<()> {
    let container = ServiceContainer::ephemeral(settings);
    let snapshots = container.snapshot_service();
    let mut tree = snapshots.import_json(file)?;
    if tree.is_empty() {
        return Err(CliError::InvalidArgs(format!(
            "{} holds an empty tree",
            file.display()
        )));
    }

    let settings = &container.settings;
    let simplify = simplify_only_child.unwrap_or(build && settings.simplify_only_child);
    tree.calculate_positions(simplify);

    let mut viewport = Viewport::default();
    viewport.center_on_root(&tree, settings.canvas_width, settings.canvas_height);
    let options = RenderOptions {
        canvas_width: settings.canvas_width,
        canvas_height: settings.canvas_height,
        show_placeholders: build,
    };
    let scene = render(
        &tree,
        &RenderState::default(),
        &settings.colors,
        &viewport,
        &options,
    );
    snapshots.export_svg(&to_svg(&scene), out)?;
    output::success(&format!("Rendered {} nodes to {}", tree.len(), out.display()));
    Ok(())
}

/// Prints the clues, waits for Enter, then reveals the tree.
#[instrument(skip_all)]
pub fn cmd_quiz<R: BufRead>(settings: Settings, rng: SmallRng, mut input: R) -> CliResult<()> {
    let container = ServiceContainer::ephemeral(settings.clone());
    let mut state = AppState::new(&settings, container.build_session(), rng);
    dispatch(&mut state, Event::SwitchMode(Mode::Guess));

    match dispatch(&mut state, Event::NewQuiz) {
        Outcome::Info(clues) => {
            output::header("Which tree has these traversals?");
            output::info(&clues);
        }
        other => {
            return Err(CliError::Usage(
                other.message().unwrap_or("no quiz").to_string(),
            ))
        }
    }

    output::prompt("Press Enter to reveal the tree...");
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| InfraError::io("read answer", e))?;

    dispatch(&mut state, Event::RevealQuiz);
    if let Some(tree) = state.displayed_tree() {
        output::tree(tree, state.render_state());
    }
    Ok(())
}

fn cmd_shell(settings: Settings, rng: SmallRng, ephemeral: bool) -> CliResult<()> {
    let container = if ephemeral {
        ServiceContainer::ephemeral(settings)
    } else {
        ServiceContainer::new(settings)
    };
    let mut state = AppState::new(&container.settings, container.build_session(), rng);
    shell::run(&mut state, &container.snapshot_service(), io::stdin().lock())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            output::action("Global config", &global);
            output::action("Session file", &settings.session_file.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn test_settings(dir: &TempDir) -> Settings {
        Settings {
            session_file: dir.path().join("session.json"),
            ..Settings::default()
        }
    }

    #[test]
    fn given_zero_depth_when_generating_then_invalid_args() {
        let mut rng = SmallRng::seed_from_u64(1);
        let result = random_tree(&mut rng, 0, 3);
        assert!(matches!(result, Err(CliError::InvalidArgs(_))));
    }

    #[test]
    fn given_more_nodes_than_depth_holds_when_generating_then_caps_count() {
        let mut rng = SmallRng::seed_from_u64(1);
        let tree = random_tree(&mut rng, 2, 20).expect("tree");
        assert!(tree.len() <= 3);
        assert!(tree.depth() <= 2);
    }

    #[test]
    fn given_enter_when_running_quiz_then_completes() {
        let dir = TempDir::new().expect("tempdir");
        let result = cmd_quiz(
            test_settings(&dir),
            SmallRng::seed_from_u64(3),
            Cursor::new("\n"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn given_snapshot_when_rendering_then_writes_svg() {
        // Arrange
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("tree.json");
        let out = dir.path().join("out/tree.svg");
        std::fs::write(&file, r#"{"value":"A","left":{"value":"B"}}"#).expect("write");

        // Act
        cmd_render(test_settings(&dir), &file, &out, true, None).expect("render");

        // Assert
        let svg = std::fs::read_to_string(&out).expect("svg");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">B</text>"));
    }
}
