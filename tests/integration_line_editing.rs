//! End-to-end runs of the shell with scripted keys, a recording renderer and
//! a recording evaluator.

use anyhow::Result;
use std::collections::HashMap;

use runeline::repl::models::History;
use runeline::{
    EditorMode, EditorOptions, LineEditor, RecordingEvaluator, RecordingRenderSink,
    ScriptedRuneSource, Shell, StartMode,
};
use tempfile::TempDir;

type TestShell = Shell<ScriptedRuneSource, RecordingRenderSink, RecordingEvaluator>;

fn shell_with(keys: &str, options: EditorOptions) -> TestShell {
    let editor = LineEditor::new(ScriptedRuneSource::from_keys(keys), options);
    Shell::new(editor, RecordingRenderSink::new(), RecordingEvaluator::new())
}

fn shell(keys: &str) -> TestShell {
    shell_with(keys, EditorOptions::default())
}

#[test]
fn recalled_line_should_be_editable_and_resubmitted() -> Result<()> {
    let mut shell = shell("echo 1\r\x1bka\x7f2\r");
    shell.run()?;

    assert_eq!(shell.evaluator().lines(), ["echo 1", "echo 2"]);
    assert_eq!(shell.editor().history().len(), 2);
    assert_eq!(shell.renderer().finished_lines(), ["echo 1", "echo 2"]);
    Ok(())
}

#[test]
fn quit_should_end_the_session() -> Result<()> {
    let mut shell = shell("ls\r\x1b:quit\rnever\r");
    shell.run()?;
    assert_eq!(shell.evaluator().lines(), ["ls"]);
    Ok(())
}

#[test]
fn numbered_register_put_should_reach_the_evaluator() -> Result<()> {
    let mut shell = shell("A B C\x1b0\"5y$$\"5P\r");
    shell.run()?;
    assert_eq!(shell.evaluator().lines(), ["A B A B CC"]);
    Ok(())
}

#[test]
fn yanked_text_should_carry_into_the_next_line() -> Result<()> {
    let mut shell = shell("git status\x1b0yw\r\x1bPAlog\r");
    shell.run()?;
    assert_eq!(shell.evaluator().lines(), ["git status", "git log"]);
    Ok(())
}

#[test]
fn normal_start_mode_should_apply_to_every_line() -> Result<()> {
    let options = EditorOptions {
        start_mode: StartMode::Normal,
        ..EditorOptions::default()
    };
    let mut shell = shell_with("ione\r", options);
    shell.run()?;

    assert_eq!(shell.evaluator().lines(), ["one"]);
    let first = shell
        .renderer()
        .frames()
        .first()
        .map(|frame| frame.mode);
    assert_eq!(first, Some(EditorMode::Normal));
    Ok(())
}

#[test]
fn abbreviations_should_expand_before_evaluation() -> Result<()> {
    let options = EditorOptions {
        abbreviations: HashMap::from([("gti".to_string(), "git".to_string())]),
        ..EditorOptions::default()
    };
    let mut shell = shell_with("gti\r", options);
    shell.run()?;
    assert_eq!(shell.evaluator().lines(), ["git"]);
    Ok(())
}

#[test]
fn status_line_should_show_command_prompt() -> Result<()> {
    let mut shell = shell("\x1b:he");
    shell.run()?;

    let frame = shell.renderer().last_frame().cloned();
    let frame = frame.ok_or_else(|| anyhow::anyhow!("no frame rendered"))?;
    assert_eq!(frame.mode, EditorMode::CommandLine);
    assert_eq!(frame.status.as_deref(), Some(":he"));
    assert_eq!(frame.status_cursor, Some(3));
    Ok(())
}

#[test]
fn history_should_round_trip_through_the_history_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("history.json");

    let mut first = shell("make\rmake test\r").with_history_file(path.clone(), 100);
    first.run()?;

    let history = History::load(&path)?;
    let editor = LineEditor::new(
        ScriptedRuneSource::from_keys("\x1bk\r"),
        EditorOptions::default(),
    )
    .with_history(history);
    let mut second = Shell::new(editor, RecordingRenderSink::new(), RecordingEvaluator::new());
    second.run()?;

    assert_eq!(second.evaluator().lines(), ["make test"]);
    Ok(())
}
