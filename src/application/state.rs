//! Application state and event dispatch.
//!
//! One [`AppState`] owns every tree, the interaction state and the pending
//! dialog. Front ends translate user input into [`Event`]s and act on the
//! returned [`Outcome`]. Each event is handled to completion before the next.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use kurbo::{Point, Vec2};
use rand::rngs::SmallRng;
use tracing::{debug, info, instrument, warn};

use crate::application::animator::TraversalAnimator;
use crate::application::quiz::Quiz;
use crate::application::services::BuildSession;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::validation::{parse_number, parse_number_list, validate_label};
use crate::domain::{
    max_nodes, BinaryTree, DomainError, NodeId, NodeValue, Side, TraversalKind,
};
use crate::view::svg::to_svg;
use crate::view::{
    hit_test, render, ColorScheme, HitTarget, RenderOptions, RenderState, Scene, Viewport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Random general trees and step-through traversals
    Traversal,
    /// BST insert/delete simulator
    Bst,
    /// Guess the tree from its traversals
    Guess,
    /// Manual tree construction
    Build,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Traversal => "traversal",
            Mode::Bst => "bst",
            Mode::Guess => "guess",
            Mode::Build => "build",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "traversal" | "t" => Ok(Mode::Traversal),
            "bst" | "b" => Ok(Mode::Bst),
            "guess" | "quiz" | "g" => Ok(Mode::Guess),
            "build" => Ok(Mode::Build),
            _ => Err(format!(
                "unknown mode '{}', expected traversal, bst, guess or build",
                s
            )),
        }
    }
}

/// Value-entry dialog waiting for input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingEdit {
    CreateRoot,
    AddChild { parent: NodeId, side: Side },
    Rename { node: NodeId },
}

/// Confirmation dialog waiting for yes/no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirm {
    /// The root is the only node.
    DeleteRoot,
    DeleteSubtree(NodeId),
    ClearTree,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SwitchMode(Mode),

    // traversal mode
    GenerateTree { depth: usize, nodes: usize },
    StartTraversal(TraversalKind),
    NextStep,
    ResetTraversal,
    LoadFromBuild,

    // bst mode
    RandomBst,
    CustomBst(String),
    BstInsert(String),
    BstDelete(String),

    // guess mode
    NewQuiz,
    RevealQuiz,

    // build mode
    CreateRoot,
    /// Pointer click in screen coordinates.
    Click(Point),
    SubmitValue(String),
    CancelEdit,
    Confirm(bool),
    ClearTree,
    SetSimplifyOnlyChild(bool),
    SetShowPlaceholders(bool),

    // traversal and build mode
    ImportJson(String),

    // view
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Wheel { at: Point, delta_y: f64 },
    Pan(Vec2),
    SetColors(ColorScheme),
}

/// What the front end should do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// State changed; redraw.
    Updated,
    /// State changed; redraw and show the message.
    Info(String),
    /// Event does not apply in the current state.
    Ignored,
    /// Rejected input. Nothing was applied.
    Alert(String),
    /// Open the value-entry dialog.
    Prompt { title: String, initial: String },
    /// Open a yes/no dialog.
    AskConfirm(String),
}

impl Outcome {
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Info(m) | Outcome::Alert(m) | Outcome::AskConfirm(m) => Some(m),
            Outcome::Prompt { title, .. } => Some(title),
            Outcome::Updated | Outcome::Ignored => None,
        }
    }
}

/// Tree currently on screen for `mode`. Free function so callers can keep
/// borrowing the other fields.
fn displayed<'a>(
    mode: Mode,
    tree: &'a mut BinaryTree,
    build_tree: &'a mut BinaryTree,
    quiz: &'a mut Option<Quiz>,
) -> Option<&'a mut BinaryTree> {
    match mode {
        Mode::Build => Some(build_tree),
        Mode::Guess => quiz.as_mut().and_then(Quiz::tree_mut),
        Mode::Traversal | Mode::Bst => Some(tree),
    }
}

pub struct AppState {
    mode: Mode,
    tree: BinaryTree,
    build_tree: BinaryTree,
    bst_values: Vec<i64>,
    animator: Option<TraversalAnimator>,
    quiz: Option<Quiz>,
    render_state: RenderState,
    viewport: Viewport,
    colors: ColorScheme,
    simplify_only_child: bool,
    default_simplify: bool,
    show_placeholders: bool,
    pending_edit: Option<PendingEdit>,
    pending_confirm: Option<PendingConfirm>,
    canvas_width: f64,
    canvas_height: f64,
    session: BuildSession,
    rng: SmallRng,
}

impl AppState {
    /// Starts in traversal mode with an empty tree.
    pub fn new(settings: &Settings, session: BuildSession, rng: SmallRng) -> Self {
        Self {
            mode: Mode::Traversal,
            tree: BinaryTree::new(),
            build_tree: BinaryTree::new(),
            bst_values: Vec::new(),
            animator: None,
            quiz: None,
            render_state: RenderState::default(),
            viewport: Viewport::default(),
            colors: settings.colors.clone(),
            simplify_only_child: settings.simplify_only_child,
            default_simplify: settings.simplify_only_child,
            show_placeholders: false,
            pending_edit: None,
            pending_confirm: None,
            canvas_width: settings.canvas_width,
            canvas_height: settings.canvas_height,
            session,
            rng,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Tree of traversal and BST mode.
    pub fn current_tree(&self) -> &BinaryTree {
        &self.tree
    }

    pub fn build_tree(&self) -> &BinaryTree {
        &self.build_tree
    }

    /// Tree on screen; `None` in guess mode until revealed.
    pub fn displayed_tree(&self) -> Option<&BinaryTree> {
        match self.mode {
            Mode::Build => Some(&self.build_tree),
            Mode::Guess => self.quiz.as_ref().and_then(Quiz::tree),
            Mode::Traversal | Mode::Bst => Some(&self.tree),
        }
    }

    pub fn bst_values(&self) -> &[i64] {
        &self.bst_values
    }

    pub fn animator(&self) -> Option<&TraversalAnimator> {
        self.animator.as_ref()
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn render_state(&self) -> &RenderState {
        &self.render_state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn colors(&self) -> &ColorScheme {
        &self.colors
    }

    pub fn simplify_only_child(&self) -> bool {
        self.simplify_only_child
    }

    pub fn show_placeholders(&self) -> bool {
        self.show_placeholders
    }

    pub fn pending_edit(&self) -> Option<PendingEdit> {
        self.pending_edit
    }

    pub fn pending_confirm(&self) -> Option<PendingConfirm> {
        self.pending_confirm
    }

    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        let outcome = match event {
            Event::SwitchMode(mode) => self.switch_mode(mode),

            Event::GenerateTree { depth, nodes } => self.generate_tree(depth, nodes),
            Event::StartTraversal(kind) => self.start_traversal(kind),
            Event::NextStep => self.next_step(),
            Event::ResetTraversal => self.reset_traversal(),
            Event::LoadFromBuild => self.load_from_build(),

            Event::RandomBst => self.random_bst(),
            Event::CustomBst(input) => self.custom_bst(&input),
            Event::BstInsert(input) => self.bst_insert(&input),
            Event::BstDelete(input) => self.bst_delete(&input),

            Event::NewQuiz => self.new_quiz(),
            Event::RevealQuiz => self.reveal_quiz(),

            Event::CreateRoot => self.request_create_root(),
            Event::Click(at) => self.click(at),
            Event::SubmitValue(input) => self.submit_value(&input),
            Event::CancelEdit => self.cancel_edit(),
            Event::Confirm(yes) => self.confirm(yes),
            Event::ClearTree => self.request_clear(),
            Event::SetSimplifyOnlyChild(flag) => {
                self.simplify_only_child = flag;
                if self.mode == Mode::Build {
                    self.save_session();
                }
                Outcome::Updated
            }
            Event::SetShowPlaceholders(flag) => {
                self.show_placeholders = flag;
                Outcome::Updated
            }

            Event::ImportJson(content) => self.import_json(&content),

            Event::ZoomIn => {
                self.viewport.zoom_in();
                Outcome::Updated
            }
            Event::ZoomOut => {
                self.viewport.zoom_out();
                Outcome::Updated
            }
            Event::ResetZoom => {
                self.center_view();
                Outcome::Updated
            }
            Event::Wheel { at, delta_y } => {
                self.viewport.wheel(at, delta_y);
                Outcome::Updated
            }
            Event::Pan(delta) => {
                self.viewport.pan(delta);
                Outcome::Updated
            }
            Event::SetColors(colors) => match colors.invalid_entry() {
                Some((field, value)) => {
                    Outcome::Alert(format!("{field}: '{value}' is not a valid color"))
                }
                None => {
                    self.colors = colors;
                    Outcome::Updated
                }
            },
        };
        debug!(?outcome, "dispatched");
        outcome
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Lays out the displayed tree with the current flag and renders it.
    pub fn frame(&mut self) -> Scene {
        let show = self.mode == Mode::Build && self.show_placeholders;
        self.frame_with(show)
    }

    fn frame_with(&mut self, show_placeholders: bool) -> Scene {
        let simplify = self.simplify_only_child;
        let options = RenderOptions {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            show_placeholders,
        };
        let empty = BinaryTree::new();
        let tree: &BinaryTree = match displayed(
            self.mode,
            &mut self.tree,
            &mut self.build_tree,
            &mut self.quiz,
        ) {
            Some(tree) => {
                tree.calculate_positions(simplify);
                tree
            }
            None => &empty,
        };
        render(
            tree,
            &self.render_state,
            &self.colors,
            &self.viewport,
            &options,
        )
    }

    /// SVG of the displayed tree without build-mode affordances.
    pub fn export_image(&mut self) -> ApplicationResult<String> {
        if self.displayed_tree().map_or(true, BinaryTree::is_empty) {
            return Err(ApplicationError::NothingToExport {
                action: "export as image",
            });
        }
        Ok(to_svg(&self.frame_with(false)))
    }

    /// Snapshot JSON of the displayed tree.
    pub fn export_json(&self) -> ApplicationResult<String> {
        match self.displayed_tree() {
            Some(tree) if !tree.is_empty() => Ok(tree.to_json()?),
            _ => Err(ApplicationError::NothingToExport { action: "export" }),
        }
    }

    /// New tree on screen: clear marks and fit the view.
    fn show_tree(&mut self) {
        self.render_state.reset();
        self.center_view();
    }

    fn center_view(&mut self) {
        let simplify = self.simplify_only_child;
        let (width, height) = (self.canvas_width, self.canvas_height);
        if let Some(tree) = displayed(
            self.mode,
            &mut self.tree,
            &mut self.build_tree,
            &mut self.quiz,
        ) {
            tree.calculate_positions(simplify);
            self.viewport.center_on_root(tree, width, height);
        }
    }

    /// Dialogs hold node handles into the tree they were opened on.
    fn drop_pending(&mut self) {
        self.pending_edit = None;
        self.pending_confirm = None;
    }

    fn save_session(&self) {
        if let Err(e) = self.session.save(&self.build_tree, self.simplify_only_child) {
            warn!("could not save session: {}", e);
        }
    }

    // ------------------------------------------------------------------
    // Modes
    // ------------------------------------------------------------------

    fn switch_mode(&mut self, mode: Mode) -> Outcome {
        info!(%mode, "switching mode");
        self.mode = mode;
        self.drop_pending();

        if mode == Mode::Build {
            self.enter_build();
            return Outcome::Updated;
        }
        self.simplify_only_child = false;
        self.show_placeholders = false;
        self.reset_all();
        Outcome::Updated
    }

    fn enter_build(&mut self) {
        self.show_placeholders = true;
        self.viewport.reset();
        self.render_state.reset();
        let (tree, simplify) = self.session.restore();
        self.build_tree = tree;
        self.simplify_only_child = simplify.unwrap_or(self.default_simplify);
        if !self.build_tree.is_empty() {
            self.show_tree();
        }
    }

    fn reset_all(&mut self) {
        self.tree = BinaryTree::new();
        self.bst_values.clear();
        self.animator = None;
        self.quiz = None;
        self.render_state.reset();
    }

    // ------------------------------------------------------------------
    // Traversal mode
    // ------------------------------------------------------------------

    fn generate_tree(&mut self, depth: usize, nodes: usize) -> Outcome {
        if self.mode != Mode::Traversal {
            return Outcome::Ignored;
        }
        // the node input is capped by what the depth can hold
        let cap = max_nodes(u32::try_from(depth).unwrap_or(u32::MAX));
        let nodes = nodes.min(usize::try_from(cap).unwrap_or(usize::MAX));
        match self
            .tree
            .generate_random_tree(depth, nodes, &mut self.rng)
        {
            Ok(()) => {
                self.animator = None;
                self.show_tree();
                Outcome::Updated
            }
            Err(e) => Outcome::Alert(e.to_string()),
        }
    }

    fn start_traversal(&mut self, kind: TraversalKind) -> Outcome {
        if self.mode != Mode::Traversal {
            return Outcome::Ignored;
        }
        if self.tree.is_empty() {
            return Outcome::Alert("Please generate a tree first!".to_string());
        }
        self.render_state.reset();
        self.animator = Some(TraversalAnimator::new(&self.tree, kind));
        Outcome::Updated
    }

    fn next_step(&mut self) -> Outcome {
        let Some(animator) = self.animator.as_mut() else {
            return Outcome::Ignored;
        };
        match animator.next_step(&self.tree, &mut self.render_state) {
            Some(_) => Outcome::Info(animator.output_text()),
            None => Outcome::Ignored,
        }
    }

    /// Rewinds the running traversal to its first step.
    fn reset_traversal(&mut self) -> Outcome {
        match self.animator.as_mut() {
            Some(animator) => animator.reset(&mut self.render_state),
            None => self.render_state.reset(),
        }
        Outcome::Updated
    }

    fn load_from_build(&mut self) -> Outcome {
        if self.mode != Mode::Traversal {
            return Outcome::Ignored;
        }
        match self.session.load_tree() {
            Ok(Some(tree)) => {
                self.drop_pending();
                self.tree = tree;
                self.animator = None;
                self.show_tree();
                Outcome::Info("Tree loaded from build mode.".to_string())
            }
            Ok(None) => Outcome::Alert("No tree saved in build mode!".to_string()),
            Err(e) => Outcome::Alert(format!("Error reading tree from session: {e}")),
        }
    }

    fn import_json(&mut self, content: &str) -> Outcome {
        if !matches!(self.mode, Mode::Traversal | Mode::Build) {
            return Outcome::Ignored;
        }
        let tree = match BinaryTree::from_json(content) {
            Ok(tree) => tree,
            Err(e) => {
                warn!("import failed: {}", e);
                return Outcome::Alert(format!("Error reading JSON file: {e}"));
            }
        };
        self.drop_pending();
        if self.mode == Mode::Build {
            self.build_tree = tree;
            self.show_tree();
            self.save_session();
            Outcome::Updated
        } else {
            self.tree = tree;
            self.animator = None;
            self.show_tree();
            Outcome::Info("Tree imported! Choose a traversal.".to_string())
        }
    }

    // ------------------------------------------------------------------
    // BST mode
    // ------------------------------------------------------------------

    fn bst_summary(&self) -> String {
        self.bst_values.iter().join(", ")
    }

    fn random_bst(&mut self) -> Outcome {
        if self.mode != Mode::Bst {
            return Outcome::Ignored;
        }
        match self.tree.generate_random_bst(None, &mut self.rng) {
            Ok(values) => {
                self.bst_values = values;
                self.show_tree();
                Outcome::Info(format!("Inserted values: {}", self.bst_summary()))
            }
            Err(e) => Outcome::Alert(e.to_string()),
        }
    }

    fn custom_bst(&mut self, input: &str) -> Outcome {
        if self.mode != Mode::Bst {
            return Outcome::Ignored;
        }
        match parse_number_list(input) {
            Ok(numbers) => {
                self.tree.create_bst(numbers.iter().copied());
                self.bst_values = numbers;
                self.show_tree();
                Outcome::Info(format!("Inserted values: {}", self.bst_summary()))
            }
            Err(DomainError::EmptyValue) => {
                Outcome::Alert("Please enter numbers separated by spaces".to_string())
            }
            Err(_) => Outcome::Alert("No valid numbers".to_string()),
        }
    }

    fn bst_number(input: &str) -> Result<i64, Outcome> {
        parse_number(input).map_err(|e| match e {
            DomainError::EmptyValue => Outcome::Alert("Please enter a number".to_string()),
            _ => Outcome::Alert("Please enter a valid number".to_string()),
        })
    }

    fn bst_insert(&mut self, input: &str) -> Outcome {
        if self.mode != Mode::Bst {
            return Outcome::Ignored;
        }
        let number = match Self::bst_number(input) {
            Ok(n) => n,
            Err(outcome) => return outcome,
        };
        if !self.tree.insert(NodeValue::from(number)) {
            return Outcome::Alert(DomainError::DuplicateValue(number.into()).to_string());
        }
        self.bst_values.push(number);
        self.show_tree();
        Outcome::Info(format!(
            "Number {number} inserted. Current values: {}",
            self.bst_summary()
        ))
    }

    fn bst_delete(&mut self, input: &str) -> Outcome {
        if self.mode != Mode::Bst {
            return Outcome::Ignored;
        }
        let number = match Self::bst_number(input) {
            Ok(n) => n,
            Err(outcome) => return outcome,
        };
        if !self.tree.delete(&NodeValue::from(number)) {
            return Outcome::Alert(DomainError::ValueNotFound(number.into()).to_string());
        }
        self.bst_values.retain(|&v| v != number);
        self.show_tree();
        Outcome::Info(format!(
            "Number {number} deleted. Current values: {}",
            self.bst_summary()
        ))
    }

    // ------------------------------------------------------------------
    // Guess mode
    // ------------------------------------------------------------------

    fn new_quiz(&mut self) -> Outcome {
        if self.mode != Mode::Guess {
            return Outcome::Ignored;
        }
        match Quiz::generate(&mut self.rng) {
            Ok(quiz) => {
                let clues = quiz
                    .clues()
                    .iter()
                    .map(|c| format!("{}: {}", c.kind.title(), c.text))
                    .join("\n");
                self.quiz = Some(quiz);
                self.render_state.reset();
                Outcome::Info(clues)
            }
            Err(e) => Outcome::Alert(e.to_string()),
        }
    }

    fn reveal_quiz(&mut self) -> Outcome {
        match self.quiz.as_mut() {
            Some(quiz) if self.mode == Mode::Guess && !quiz.is_revealed() => {
                quiz.reveal();
                self.show_tree();
                Outcome::Updated
            }
            _ => Outcome::Ignored,
        }
    }

    // ------------------------------------------------------------------
    // Build mode
    // ------------------------------------------------------------------

    fn request_create_root(&mut self) -> Outcome {
        if self.mode != Mode::Build {
            return Outcome::Ignored;
        }
        if !self.build_tree.is_empty() {
            return Outcome::Alert(DomainError::RootExists.to_string());
        }
        self.pending_edit = Some(PendingEdit::CreateRoot);
        Outcome::Prompt {
            title: "Create root node".to_string(),
            initial: String::new(),
        }
    }

    fn click(&mut self, screen: Point) -> Outcome {
        if self.mode != Mode::Build {
            return Outcome::Ignored;
        }
        let point = self.viewport.to_tree_space(screen);
        self.build_tree.calculate_positions(self.simplify_only_child);
        match hit_test(&self.build_tree, self.canvas_width, point) {
            None => Outcome::Ignored,
            Some(HitTarget::DeleteButton(node)) => self.request_delete(node),
            Some(HitTarget::AddButton(parent, side))
            | Some(HitTarget::Placeholder(parent, side)) => {
                self.pending_edit = Some(PendingEdit::AddChild { parent, side });
                Outcome::Prompt {
                    title: format!("Add {side} child"),
                    initial: String::new(),
                }
            }
            Some(HitTarget::Node(node)) => {
                let initial = self
                    .build_tree
                    .value(node)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                self.pending_edit = Some(PendingEdit::Rename { node });
                Outcome::Prompt {
                    title: "Rename node".to_string(),
                    initial,
                }
            }
        }
    }

    fn request_delete(&mut self, node: NodeId) -> Outcome {
        let Some(target) = self.build_tree.node(node) else {
            return Outcome::Ignored;
        };
        if self.build_tree.root() == Some(node) && target.is_leaf() {
            self.pending_confirm = Some(PendingConfirm::DeleteRoot);
            return Outcome::AskConfirm("Delete the root node?".to_string());
        }
        let message = format!(
            "Delete node {}? The node and all of its children will be removed.",
            target.value
        );
        self.pending_confirm = Some(PendingConfirm::DeleteSubtree(node));
        Outcome::AskConfirm(message)
    }

    fn request_clear(&mut self) -> Outcome {
        if self.mode != Mode::Build {
            return Outcome::Ignored;
        }
        if self.build_tree.is_empty() {
            return Outcome::Alert("The tree is already empty!".to_string());
        }
        self.pending_confirm = Some(PendingConfirm::ClearTree);
        Outcome::AskConfirm("Delete the whole tree?".to_string())
    }

    /// Applies the pending edit. Invalid input keeps the dialog open.
    fn submit_value(&mut self, input: &str) -> Outcome {
        let Some(edit) = self.pending_edit else {
            return Outcome::Ignored;
        };
        let label = match validate_label(input) {
            Ok(label) => label,
            Err(e) => return Outcome::Alert(e.to_string()),
        };
        self.pending_edit = None;
        let value = NodeValue::Label(label);

        let applied = match edit {
            PendingEdit::CreateRoot => self.build_tree.set_root(value).map(|_| true),
            PendingEdit::AddChild { parent, side } => {
                self.build_tree.add_child(parent, side, value).map(|_| true)
            }
            PendingEdit::Rename { node } => self.build_tree.rename(node, value).map(|_| false),
        };
        match applied {
            Ok(reshaped) => {
                if reshaped {
                    self.show_tree();
                }
                self.save_session();
                Outcome::Updated
            }
            Err(e) => Outcome::Alert(e.to_string()),
        }
    }

    fn cancel_edit(&mut self) -> Outcome {
        match self.pending_edit.take() {
            Some(_) => Outcome::Updated,
            None => Outcome::Ignored,
        }
    }

    fn confirm(&mut self, yes: bool) -> Outcome {
        let Some(pending) = self.pending_confirm.take() else {
            return Outcome::Ignored;
        };
        if !yes {
            debug!(?pending, "declined");
            return Outcome::Updated;
        }
        match pending {
            PendingConfirm::DeleteRoot | PendingConfirm::ClearTree => {
                self.build_tree.clear();
                self.render_state.reset();
            }
            PendingConfirm::DeleteSubtree(node) => {
                if let Err(e) = self.build_tree.remove_subtree(node) {
                    return Outcome::Alert(e.to_string());
                }
                self.show_tree();
            }
        }
        self.save_session();
        Outcome::Updated
    }
}

/// Event-dispatch entry point for front ends.
pub fn dispatch(state: &mut AppState, event: Event) -> Outcome {
    state.dispatch(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_and_display() {
        for mode in [Mode::Traversal, Mode::Bst, Mode::Guess, Mode::Build] {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
        assert_eq!("quiz".parse::<Mode>(), Ok(Mode::Guess));
        assert!("paint".parse::<Mode>().is_err());
    }

    #[test]
    fn test_outcome_message() {
        assert_eq!(Outcome::Alert("x".into()).message(), Some("x"));
        assert_eq!(Outcome::Updated.message(), None);
    }
}
