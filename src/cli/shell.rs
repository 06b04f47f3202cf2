//! Line-driven interactive session.
//!
//! Each input line becomes one [`Event`] (or a shell-local command such as
//! file import/export) and is dispatched against a single [`AppState`].

use std::io::BufRead;
use std::path::PathBuf;

use kurbo::{Point, Vec2};
use tracing::{debug, instrument};

use crate::application::services::SnapshotService;
use crate::application::{dispatch, AppState, Event, Mode, Outcome};
use crate::cli::output;
use crate::cli::CliResult;
use crate::domain::TraversalKind;
use crate::infrastructure::InfraError;

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Event(Event),
    Import(PathBuf),
    Export(PathBuf),
    Image(PathBuf),
    Color { field: ColorField, value: String },
    Show,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
    Fill,
    Stroke,
    Text,
}

pub const HELP: &str = "\
mode <traversal|bst|guess|build>   switch mode
generate <depth> <nodes>           random tree (traversal)
start <kind> | next | reset        step a traversal
load-build                         copy the build tree (traversal)
random | custom <n...>             new BST
insert <n> | delete <n>            BST operations
quiz | reveal                      guess the tree
root                               create root (build)
click <x> <y>                      click at screen point (build)
value <text> | cancel              answer the value prompt
yes | no                           answer the confirmation
clear                              delete the whole tree (build)
simplify <on|off>                  center lone children
placeholders <on|off>              show empty slots
import <file> | export <file>      JSON snapshot
image <file>                       write SVG
zoom <in|out|reset>                zoom
wheel <x> <y> <dy> | pan <dx> <dy> viewport
color <fill|stroke|text> <#hex>    node colors
show | help | quit";

fn number<T: std::str::FromStr>(arg: Option<&str>, what: &str) -> Result<T, String> {
    let raw = arg.ok_or_else(|| format!("missing {what}"))?;
    raw.parse()
        .map_err(|_| format!("{what} must be a number, got '{raw}'"))
}

fn flag(arg: Option<&str>) -> Result<bool, String> {
    match arg {
        Some("on" | "true" | "yes") => Ok(true),
        Some("off" | "false" | "no") => Ok(false),
        other => Err(format!("expected on or off, got {:?}", other.unwrap_or(""))),
    }
}

fn path(rest: &str) -> Result<PathBuf, String> {
    if rest.is_empty() {
        return Err("missing file".to_string());
    }
    Ok(PathBuf::from(rest))
}

/// Parses one input line.
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let event = match word {
        "" => return Ok(ShellCommand::Empty),
        "help" | "?" => return Ok(ShellCommand::Help),
        "quit" | "exit" => return Ok(ShellCommand::Quit),
        "show" => return Ok(ShellCommand::Show),
        "import" => return path(rest).map(ShellCommand::Import),
        "export" => return path(rest).map(ShellCommand::Export),
        "image" => return path(rest).map(ShellCommand::Image),
        "color" => {
            let field = match args.next() {
                Some("fill") => ColorField::Fill,
                Some("stroke") => ColorField::Stroke,
                Some("text") => ColorField::Text,
                _ => return Err("expected fill, stroke or text".to_string()),
            };
            let value = args.next().ok_or("missing color")?.to_string();
            return Ok(ShellCommand::Color { field, value });
        }

        "mode" => Event::SwitchMode(args.next().unwrap_or("").parse::<Mode>()?),
        "generate" => Event::GenerateTree {
            depth: number(args.next(), "depth")?,
            nodes: number(args.next(), "nodes")?,
        },
        "start" => Event::StartTraversal(args.next().unwrap_or("").parse::<TraversalKind>()?),
        "next" | "n" => Event::NextStep,
        "reset" => Event::ResetTraversal,
        "load-build" => Event::LoadFromBuild,
        "random" => Event::RandomBst,
        "custom" => Event::CustomBst(rest.to_string()),
        "insert" => Event::BstInsert(rest.to_string()),
        "delete" => Event::BstDelete(rest.to_string()),
        "quiz" => Event::NewQuiz,
        "reveal" => Event::RevealQuiz,
        "root" => Event::CreateRoot,
        "click" => Event::Click(Point::new(
            number(args.next(), "x")?,
            number(args.next(), "y")?,
        )),
        // raw text: the label rules decide
        "value" => Event::SubmitValue(rest.to_string()),
        "cancel" => Event::CancelEdit,
        "yes" | "y" => Event::Confirm(true),
        "no" => Event::Confirm(false),
        "clear" => Event::ClearTree,
        "simplify" => Event::SetSimplifyOnlyChild(flag(args.next())?),
        "placeholders" => Event::SetShowPlaceholders(flag(args.next())?),
        "zoom" => match args.next() {
            Some("in") => Event::ZoomIn,
            Some("out") => Event::ZoomOut,
            Some("reset") => Event::ResetZoom,
            _ => return Err("expected in, out or reset".to_string()),
        },
        "wheel" => Event::Wheel {
            at: Point::new(number(args.next(), "x")?, number(args.next(), "y")?),
            delta_y: number(args.next(), "delta")?,
        },
        "pan" => Event::Pan(Vec2::new(
            number(args.next(), "dx")?,
            number(args.next(), "dy")?,
        )),
        other => return Err(format!("unknown command '{other}', try help")),
    };
    Ok(ShellCommand::Event(event))
}

fn report(state: &AppState, outcome: &Outcome) {
    match outcome {
        Outcome::Ignored => output::warning("not available right now"),
        Outcome::Alert(msg) => output::warning(msg),
        Outcome::Prompt { title, initial } if initial.is_empty() => {
            output::header(&format!("{title}: answer with 'value <text>'"));
        }
        Outcome::Prompt { title, initial } => {
            output::header(&format!(
                "{title} (current: {initial}): answer with 'value <text>'"
            ));
        }
        Outcome::AskConfirm(msg) => output::header(&format!("{msg} [yes/no]")),
        Outcome::Info(msg) => {
            output::info(msg);
            show(state);
        }
        Outcome::Updated => show(state),
    }
}

fn show(state: &AppState) {
    match state.displayed_tree() {
        Some(tree) => output::tree(tree, state.render_state()),
        None => output::detail("(tree hidden)"),
    }
}

/// Runs the session until `quit` or end of input.
#[instrument(level = "debug", skip_all)]
pub fn run<R: BufRead>(
    state: &mut AppState,
    snapshots: &SnapshotService,
    input: R,
) -> CliResult<()> {
    output::info("treeviz shell, type 'help' for commands");
    let mut lines = input.lines();
    loop {
        output::prompt(&format!("{}>", state.mode()));
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|e| InfraError::io("read shell input", e))?;
        debug!(line = %line, "shell input");

        match parse_line(&line) {
            Err(msg) => output::warning(&msg),
            Ok(ShellCommand::Empty) => {}
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => output::info(HELP),
            Ok(ShellCommand::Show) => show(state),
            Ok(ShellCommand::Event(event)) => {
                let outcome = dispatch(state, event);
                report(state, &outcome);
            }
            Ok(ShellCommand::Color { field, value }) => {
                let mut colors = state.colors().clone();
                match field {
                    ColorField::Fill => colors.node_fill = value,
                    ColorField::Stroke => colors.node_stroke = value,
                    ColorField::Text => colors.node_text = value,
                }
                let outcome = dispatch(state, Event::SetColors(colors));
                report(state, &outcome);
            }
            Ok(ShellCommand::Import(file)) => match snapshots.read_text(&file) {
                Ok(content) => {
                    let outcome = dispatch(state, Event::ImportJson(content));
                    report(state, &outcome);
                }
                Err(e) => output::warning(&e),
            },
            Ok(ShellCommand::Export(file)) => {
                let written = state
                    .export_json()
                    .and_then(|json| snapshots.write_text(&json, &file));
                match written {
                    Ok(()) => output::action("Exported", &file.display()),
                    Err(e) => output::warning(&e),
                }
            }
            Ok(ShellCommand::Image(file)) => {
                let written = state
                    .export_image()
                    .and_then(|svg| snapshots.export_svg(&svg, &file));
                match written {
                    Ok(()) => output::action("Image", &file.display()),
                    Err(e) => output::warning(&e),
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("next", Event::NextStep)]
    #[case("mode bst", Event::SwitchMode(Mode::Bst))]
    #[case("generate 3 7", Event::GenerateTree { depth: 3, nodes: 7 })]
    #[case("start levelorder", Event::StartTraversal(TraversalKind::LevelOrder))]
    #[case("custom 5 3 x 8", Event::CustomBst("5 3 x 8".to_string()))]
    #[case("value  Hello ", Event::SubmitValue("Hello".to_string()))]
    #[case("click 116 34", Event::Click(Point::new(116.0, 34.0)))]
    #[case("simplify off", Event::SetSimplifyOnlyChild(false))]
    #[case("zoom reset", Event::ResetZoom)]
    fn given_line_when_parsing_then_maps_to_event(#[case] line: &str, #[case] expected: Event) {
        assert_eq!(parse_line(line), Ok(ShellCommand::Event(expected)));
    }

    #[rstest]
    #[case("", ShellCommand::Empty)]
    #[case("quit", ShellCommand::Quit)]
    #[case("export out.json", ShellCommand::Export(PathBuf::from("out.json")))]
    #[case(
        "color fill #ff0000",
        ShellCommand::Color { field: ColorField::Fill, value: "#ff0000".to_string() }
    )]
    fn given_line_when_parsing_then_maps_to_shell_command(
        #[case] line: &str,
        #[case] expected: ShellCommand,
    ) {
        assert_eq!(parse_line(line), Ok(expected));
    }

    #[rstest]
    #[case("generate three 7")]
    #[case("mode paint")]
    #[case("click 1")]
    #[case("image")]
    #[case("fly")]
    fn given_bad_line_when_parsing_then_error(#[case] line: &str) {
        assert!(parse_line(line).is_err());
    }
}
