//! # Editor Scenario Tests
//!
//! Key scripts replayed through a headless editor, checking buffer, cursor,
//! registers and mode after each scenario.

use anyhow::Result;
use std::collections::HashMap;

use super::core::{EditorOptions, LineEditor, LineOutcome, StartMode};
use crate::repl::error::EditorError;
use crate::repl::events::{EditorMode, ScriptedRuneSource, Signal};
use crate::repl::models::History;
use crate::repl::services::{Completer, Completion, CompletionContext};
use crate::repl::views::RecordingRenderSink;

type TestEditor = LineEditor<ScriptedRuneSource>;

fn insert_editor() -> TestEditor {
    let mut editor = LineEditor::new(ScriptedRuneSource::new(), EditorOptions::default());
    editor.begin_line();
    editor
}

/// Editor in Normal mode holding `text` with the cursor at `cursor`
fn normal_at(text: &str, cursor: usize) -> TestEditor {
    let options = EditorOptions {
        start_mode: StartMode::Normal,
        ..EditorOptions::default()
    };
    let mut editor = LineEditor::new(ScriptedRuneSource::new(), options);
    editor.begin_line();
    editor.buffer.set_text(text);
    editor.buffer.move_to(cursor);
    editor
}

/// Run every scripted key, including re-injected ones
fn feed(editor: &mut TestEditor, keys: &str) -> Result<Vec<Signal>> {
    editor.source_mut().push_keys(keys);
    let mut signals = Vec::new();
    while !editor.source().is_exhausted() || editor.input.pending_count() > 0 {
        signals.push(editor.step()?);
    }
    Ok(signals)
}

fn text(editor: &TestEditor) -> String {
    editor.buffer().text()
}

struct FixedCompleter(Vec<&'static str>);

impl Completer for FixedCompleter {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn complete(&self, context: &CompletionContext<'_>) -> Result<Completion> {
        let start = context.line[..context.cursor]
            .iter()
            .rposition(|&ch| ch == ' ')
            .map_or(0, |blank| blank + 1);
        Ok(Completion {
            start,
            candidates: self.0.iter().map(|c| c.to_string()).collect(),
        })
    }
}

#[test]
fn escape_should_leave_insert_and_pull_cursor_back() -> Result<()> {
    let mut editor = insert_editor();
    feed(&mut editor, "abc\x1b")?;

    assert_eq!(text(&editor), "abc");
    assert_eq!(editor.buffer().cursor(), 2);
    assert_eq!(editor.mode(), EditorMode::Normal);
    assert_eq!(editor.registers().get('.'), Some("abc"));
    assert_eq!(editor.undo.current_data(), "abc");
    Ok(())
}

#[test]
fn dw_should_delete_word_into_unnamed_register() -> Result<()> {
    let mut editor = normal_at("aaa bbb ccc", 0);
    feed(&mut editor, "dw")?;

    assert_eq!(text(&editor), "bbb ccc");
    assert_eq!(editor.buffer().cursor(), 0);
    assert_eq!(editor.registers().get('"'), Some("aaa "));
    assert_eq!(editor.registers().get('-'), Some("aaa "));
    Ok(())
}

#[test]
fn operator_and_motion_counts_should_multiply() -> Result<()> {
    let mut editor = normal_at("a b c d e f g", 0);
    feed(&mut editor, "2d3w")?;
    assert_eq!(text(&editor), "g");
    Ok(())
}

#[test]
fn dd_should_delete_linewise_into_numbered_register() -> Result<()> {
    let mut editor = normal_at("hello", 2);
    feed(&mut editor, "dd")?;

    assert_eq!(text(&editor), "");
    assert_eq!(editor.registers().get('1'), Some("hello"));
    assert_eq!(editor.registers().get('"'), Some("hello"));
    Ok(())
}

#[test]
fn shortcut_d_should_delete_to_end_and_settle_cursor() -> Result<()> {
    let mut editor = normal_at("hello world", 6);
    feed(&mut editor, "D")?;

    assert_eq!(text(&editor), "hello ");
    assert_eq!(editor.buffer().cursor(), 5);
    Ok(())
}

#[test]
fn count_should_carry_through_shortcut_expansion() -> Result<()> {
    let mut editor = normal_at("abcdef", 1);
    feed(&mut editor, "3x")?;

    assert_eq!(text(&editor), "aef");
    assert_eq!(editor.buffer().cursor(), 1);
    Ok(())
}

#[test]
fn numbered_register_put_should_match_vim() -> Result<()> {
    let mut editor = insert_editor();
    feed(&mut editor, "A B C\x1b0\"5y$$\"5P")?;

    assert_eq!(text(&editor), "A B A B CC");
    assert_eq!(editor.registers().get('5'), Some("A B C"));
    assert_eq!(editor.buffer().cursor(), 8);
    Ok(())
}

#[test]
fn black_hole_register_should_swallow_yanks() -> Result<()> {
    let mut editor = normal_at("A B C", 0);
    feed(&mut editor, "\"_yw\"_p")?;

    assert_eq!(text(&editor), "A B C");
    assert_eq!(editor.registers().get('"'), None);
    Ok(())
}

#[test]
fn uppercase_register_should_append() -> Result<()> {
    let mut editor = normal_at("foo bar", 0);
    feed(&mut editor, "\"ayiww\"Ayiw")?;
    assert_eq!(editor.registers().get('a'), Some("foobar"));
    Ok(())
}

#[test]
fn invalid_register_name_should_be_dropped() -> Result<()> {
    let mut editor = normal_at("abc", 0);
    feed(&mut editor, "\"!yl")?;
    assert_eq!(editor.registers().get('"'), Some("a"));
    Ok(())
}

#[test]
fn change_word_should_stop_at_word_end() -> Result<()> {
    let mut editor = normal_at("foo bar", 0);
    feed(&mut editor, "cwxyz\x1b")?;

    assert_eq!(text(&editor), "xyz bar");
    assert_eq!(editor.mode(), EditorMode::Normal);
    Ok(())
}

#[test]
fn substitute_line_should_replace_whole_buffer() -> Result<()> {
    let mut editor = normal_at("hello", 2);
    feed(&mut editor, "Sbye\x1b")?;
    assert_eq!(text(&editor), "bye");
    Ok(())
}

#[test]
fn inner_paren_object_should_delete_contents() -> Result<()> {
    let mut editor = normal_at("call(a, b)", 6);
    feed(&mut editor, "di(")?;

    assert_eq!(text(&editor), "call()");
    assert_eq!(editor.buffer().cursor(), 5);
    Ok(())
}

#[test]
fn case_operators_should_transform_objects_and_lines() -> Result<()> {
    let mut editor = normal_at("hello world", 0);
    feed(&mut editor, "gUiw")?;
    assert_eq!(text(&editor), "HELLO world");

    feed(&mut editor, "g~~")?;
    assert_eq!(text(&editor), "hello WORLD");

    feed(&mut editor, "gugu")?;
    assert_eq!(text(&editor), "hello world");
    Ok(())
}

#[test]
fn surround_should_wrap_object_and_line() -> Result<()> {
    let mut editor = normal_at("say hi", 4);
    feed(&mut editor, "gsiw\"")?;
    assert_eq!(text(&editor), "say \"hi\"");

    let mut editor = normal_at("say hi", 0);
    feed(&mut editor, "gss(")?;
    assert_eq!(text(&editor), "(say hi)");
    Ok(())
}

#[test]
fn cancelled_operator_should_change_nothing() -> Result<()> {
    let mut editor = normal_at("abc", 1);
    feed(&mut editor, "d\x1b")?;
    assert_eq!(text(&editor), "abc");
    assert_eq!(editor.mode(), EditorMode::Normal);

    feed(&mut editor, "dz")?;
    assert_eq!(text(&editor), "abc");
    assert_eq!(editor.mode(), EditorMode::Normal);
    Ok(())
}

#[test]
fn escape_should_cancel_pending_count() -> Result<()> {
    let mut editor = normal_at("abcdef", 0);
    feed(&mut editor, "3\x1bx")?;
    assert_eq!(text(&editor), "bcdef");
    Ok(())
}

#[test]
fn undo_and_redo_should_walk_snapshots() -> Result<()> {
    let mut editor = insert_editor();
    feed(&mut editor, "abc\x1bx")?;
    assert_eq!(text(&editor), "ab");

    feed(&mut editor, "u")?;
    assert_eq!(text(&editor), "abc");
    feed(&mut editor, "\x12")?;
    assert_eq!(text(&editor), "ab");
    feed(&mut editor, "uu")?;
    assert_eq!(text(&editor), "");

    feed(&mut editor, "u")?;
    assert_eq!(text(&editor), "");
    assert_eq!(editor.status(), Some("Already at oldest change"));
    Ok(())
}

#[test]
fn earlier_and_later_should_follow_creation_order() -> Result<()> {
    let mut editor = insert_editor();
    feed(&mut editor, "a\x1bab\x1bu")?;
    assert_eq!(text(&editor), "a");

    feed(&mut editor, "g-")?;
    assert_eq!(text(&editor), "");
    feed(&mut editor, "2g+")?;
    assert_eq!(text(&editor), "ab");

    feed(&mut editor, "g+")?;
    assert_eq!(editor.status(), Some("Already at newest change"));
    Ok(())
}

#[test]
fn find_char_should_repeat_both_ways() -> Result<()> {
    let mut editor = normal_at("a,b,c,d", 0);
    feed(&mut editor, "f,")?;
    assert_eq!(editor.buffer().cursor(), 1);
    feed(&mut editor, ";")?;
    assert_eq!(editor.buffer().cursor(), 3);
    feed(&mut editor, ",")?;
    assert_eq!(editor.buffer().cursor(), 1);
    Ok(())
}

#[test]
fn till_with_delete_should_stop_before_target() -> Result<()> {
    let mut editor = normal_at("a,b,c,d", 0);
    feed(&mut editor, "dt,")?;
    assert_eq!(text(&editor), ",b,c,d");
    Ok(())
}

#[test]
fn missing_find_target_should_report_and_stay() -> Result<()> {
    let mut editor = normal_at("abc", 1);
    feed(&mut editor, "fz")?;

    assert_eq!(editor.buffer().cursor(), 1);
    assert_eq!(editor.status(), Some("character not found: z"));
    assert_eq!(editor.mode(), EditorMode::Normal);
    Ok(())
}

#[test]
fn search_should_find_literal_without_wrapping() -> Result<()> {
    let mut editor = normal_at("foo bar foo", 0);
    feed(&mut editor, "/foo\r")?;
    assert_eq!(editor.buffer().cursor(), 8);
    assert_eq!(editor.registers().get('/'), Some("foo"));

    feed(&mut editor, "N")?;
    assert_eq!(editor.buffer().cursor(), 0);
    feed(&mut editor, "n")?;
    assert_eq!(editor.buffer().cursor(), 8);

    feed(&mut editor, "n")?;
    assert_eq!(editor.buffer().cursor(), 8);
    assert_eq!(editor.status(), Some("E486: Pattern not found: foo"));
    Ok(())
}

#[test]
fn empty_search_without_history_should_report_e35() -> Result<()> {
    let mut editor = normal_at("foo", 0);
    feed(&mut editor, "/\r")?;
    assert_eq!(editor.status(), Some("E35: No previous regular expression"));
    Ok(())
}

#[test]
fn unknown_ex_command_should_set_status() -> Result<()> {
    let mut editor = normal_at("abc", 0);
    feed(&mut editor, ":frob\r")?;

    assert_eq!(editor.status(), Some("E492: Not an editor command: frob"));
    assert_eq!(editor.registers().get(':'), Some("frob"));
    assert_eq!(editor.mode(), EditorMode::Normal);
    Ok(())
}

#[test]
fn quit_command_should_abort() -> Result<()> {
    let mut editor = normal_at("abc", 0);
    let signals = feed(&mut editor, ":q\r")?;
    assert_eq!(signals.last(), Some(&Signal::Abort));
    Ok(())
}

#[test]
fn substitute_command_should_replace_all_with_g() -> Result<()> {
    let mut editor = normal_at("foo foo", 0);
    feed(&mut editor, ":s foo bar g\r")?;
    assert_eq!(text(&editor), "bar bar");
    Ok(())
}

#[test]
fn backspace_on_empty_prompt_should_cancel() -> Result<()> {
    let mut editor = normal_at("abc", 0);
    feed(&mut editor, ":")?;
    assert_eq!(editor.mode(), EditorMode::CommandLine);

    feed(&mut editor, "\x7f")?;
    assert_eq!(editor.mode(), EditorMode::Normal);
    Ok(())
}

#[test]
fn command_prompt_should_browse_history_with_write_back() -> Result<()> {
    let mut editor = normal_at("", 0);
    feed(&mut editor, ":help\r:ab")?;

    let frame = editor.frame();
    assert_eq!(frame.status.as_deref(), Some(":ab"));
    assert_eq!(frame.status_cursor, Some(3));

    feed(&mut editor, "\x10")?;
    assert_eq!(editor.frame().status.as_deref(), Some(":help"));
    feed(&mut editor, "\x0e")?;
    assert_eq!(editor.frame().status.as_deref(), Some(":ab"));
    Ok(())
}

#[test]
fn visual_yank_should_take_inclusive_selection() -> Result<()> {
    let mut editor = normal_at("hello world", 0);
    feed(&mut editor, "vey")?;

    assert_eq!(editor.registers().get('"'), Some("hello"));
    assert_eq!(editor.registers().get('0'), Some("hello"));
    assert_eq!(editor.buffer().cursor(), 0);
    assert_eq!(editor.mode(), EditorMode::Normal);
    Ok(())
}

#[test]
fn visual_object_should_become_selection() -> Result<()> {
    let mut editor = normal_at("hello world", 7);
    feed(&mut editor, "viwU")?;
    assert_eq!(text(&editor), "hello WORLD");
    Ok(())
}

#[test]
fn visual_swap_should_keep_selection() -> Result<()> {
    let mut editor = normal_at("abcdef", 1);
    feed(&mut editor, "vllo")?;
    assert_eq!(editor.buffer().cursor(), 1);

    feed(&mut editor, "d")?;
    assert_eq!(text(&editor), "aef");
    Ok(())
}

#[test]
fn replace_char_should_need_enough_characters() -> Result<()> {
    let mut editor = normal_at("abc", 0);
    feed(&mut editor, "2rx")?;
    assert_eq!(text(&editor), "xxc");
    assert_eq!(editor.buffer().cursor(), 1);

    feed(&mut editor, "3rz")?;
    assert_eq!(text(&editor), "xxc");
    Ok(())
}

#[test]
fn tilde_should_switch_case_and_advance() -> Result<()> {
    let mut editor = normal_at("abc", 0);
    feed(&mut editor, "~")?;
    assert_eq!(text(&editor), "Abc");
    assert_eq!(editor.buffer().cursor(), 1);
    Ok(())
}

#[test]
fn put_should_land_on_last_put_char() -> Result<()> {
    let mut editor = normal_at("ab", 0);
    feed(&mut editor, "ylp")?;
    assert_eq!(text(&editor), "aab");
    assert_eq!(editor.buffer().cursor(), 1);

    feed(&mut editor, "3P")?;
    assert_eq!(text(&editor), "aaaaab");
    assert_eq!(editor.buffer().cursor(), 3);
    Ok(())
}

#[test]
fn huge_put_count_should_be_capped() -> Result<()> {
    let mut editor = normal_at("abc", 0);
    feed(&mut editor, "yl99999999999999999999p")?;
    assert_eq!(editor.buffer().len(), 3 + super::normal::MAX_PUT_RUNES);
    assert_eq!(editor.buffer().cursor(), super::normal::MAX_PUT_RUNES);
    assert_eq!(editor.mode(), EditorMode::Normal);
    Ok(())
}

#[test]
fn huge_word_counts_should_stop_at_line_bounds() -> Result<()> {
    let mut editor = normal_at("aaa bbb", 0);
    feed(&mut editor, "99999999999999999999w")?;
    assert_eq!(editor.buffer().cursor(), 6);

    feed(&mut editor, "99999999999999999999b")?;
    assert_eq!(editor.buffer().cursor(), 0);

    feed(&mut editor, "9999999999d9999999999w")?;
    assert_eq!(text(&editor), "");
    Ok(())
}

#[test]
fn begin_line_should_drop_leftover_reinjected_runes() -> Result<()> {
    let mut editor = insert_editor();
    editor.input.unread_str("stale");
    assert_eq!(editor.input.pending_count(), 5);

    editor.begin_line();
    assert_eq!(editor.input.pending_count(), 0);

    feed(&mut editor, "ls")?;
    assert_eq!(text(&editor), "ls");
    Ok(())
}

#[test]
fn history_keys_should_recall_lines() -> Result<()> {
    let history = History::from_entries(vec!["echo 1".to_string(), "echo 2".to_string()]);
    let mut editor =
        LineEditor::new(ScriptedRuneSource::new(), EditorOptions::default()).with_history(history);
    editor.begin_line();

    feed(&mut editor, "\x1bk")?;
    assert_eq!(text(&editor), "echo 2");
    assert_eq!(editor.buffer().cursor(), 5);
    feed(&mut editor, "k")?;
    assert_eq!(text(&editor), "echo 1");
    feed(&mut editor, "jj")?;
    assert_eq!(text(&editor), "");
    Ok(())
}

#[test]
fn abbreviation_should_expand_on_live_separator() -> Result<()> {
    let options = EditorOptions {
        abbreviations: HashMap::from([("gti".to_string(), "git".to_string())]),
        ..EditorOptions::default()
    };
    let mut editor = LineEditor::new(ScriptedRuneSource::new(), options);
    editor.begin_line();

    feed(&mut editor, "gti status")?;
    assert_eq!(text(&editor), "git status");
    Ok(())
}

#[test]
fn abbreviation_should_not_expand_recursively() -> Result<()> {
    let options = EditorOptions {
        abbreviations: HashMap::from([("a".to_string(), "a a".to_string())]),
        ..EditorOptions::default()
    };
    let mut editor = LineEditor::new(ScriptedRuneSource::new(), options);
    editor.begin_line();

    feed(&mut editor, "a ")?;
    assert_eq!(text(&editor), "a a ");
    Ok(())
}

#[test]
fn completion_should_cycle_and_wrap() -> Result<()> {
    let mut editor = LineEditor::new(ScriptedRuneSource::new(), EditorOptions::default())
        .with_path_completer(Box::new(FixedCompleter(vec!["alpha", "alps"])));
    editor.begin_line();

    feed(&mut editor, "cat al\t")?;
    assert_eq!(text(&editor), "cat alpha");
    feed(&mut editor, "\t")?;
    assert_eq!(text(&editor), "cat alps");
    feed(&mut editor, "\t")?;
    assert_eq!(text(&editor), "cat alpha");
    feed(&mut editor, "\x10")?;
    assert_eq!(text(&editor), "cat alps");

    feed(&mut editor, "x")?;
    assert_eq!(text(&editor), "cat alpsx");
    assert_eq!(editor.buffer().cursor(), 9);
    Ok(())
}

#[test]
fn separator_after_completion_should_expand_abbreviation() -> Result<()> {
    let options = EditorOptions {
        abbreviations: HashMap::from([("gti".to_string(), "git".to_string())]),
        ..EditorOptions::default()
    };
    let mut editor = LineEditor::new(ScriptedRuneSource::new(), options)
        .with_path_completer(Box::new(FixedCompleter(vec!["gti"])));
    editor.begin_line();

    feed(&mut editor, "g\t")?;
    assert_eq!(text(&editor), "gti");
    feed(&mut editor, " log")?;
    assert_eq!(text(&editor), "git log");
    Ok(())
}

#[test]
fn completion_without_candidates_should_report() -> Result<()> {
    let mut editor = LineEditor::new(ScriptedRuneSource::new(), EditorOptions::default())
        .with_path_completer(Box::new(FixedCompleter(Vec::new())));
    editor.begin_line();

    feed(&mut editor, "x\t")?;
    assert_eq!(text(&editor), "x");
    assert_eq!(editor.status(), Some("no completion candidates"));
    Ok(())
}

#[test]
fn line_completion_should_offer_history() -> Result<()> {
    let history = History::from_entries(vec!["git status".to_string(), "ls".to_string()]);
    let mut editor =
        LineEditor::new(ScriptedRuneSource::new(), EditorOptions::default()).with_history(history);
    editor.begin_line();

    feed(&mut editor, "g\x18\x0c")?;
    assert_eq!(text(&editor), "git status");
    Ok(())
}

#[test]
fn normal_start_mode_should_be_honored() {
    let options = EditorOptions {
        start_mode: StartMode::Normal,
        ..EditorOptions::default()
    };
    let mut editor = LineEditor::new(ScriptedRuneSource::new(), options);
    editor.begin_line();
    assert_eq!(editor.mode(), EditorMode::Normal);
}

#[test]
fn read_line_should_complete_and_record_history() -> Result<()> {
    let source = ScriptedRuneSource::from_keys("echo hi\r");
    let mut editor = LineEditor::new(source, EditorOptions::default());
    let mut sink = RecordingRenderSink::new();

    let outcome = editor.read_line(&mut sink)?;
    assert_eq!(outcome, LineOutcome::Complete("echo hi".to_string()));
    assert_eq!(sink.finished_lines(), ["echo hi"]);
    assert_eq!(editor.history().entries(), ["echo hi"]);
    assert!(!sink.frames().is_empty());

    let err = match editor.read_line(&mut sink) {
        Ok(outcome) => anyhow::bail!("expected end of input, got {:?}", outcome),
        Err(err) => err,
    };
    assert!(EditorError::is_end_of_input(&err));
    Ok(())
}

#[test]
fn registers_should_survive_between_lines() -> Result<()> {
    let source = ScriptedRuneSource::from_keys("one\x1byiw\r\x1bp\r");
    let mut editor = LineEditor::new(source, EditorOptions::default());
    let mut sink = RecordingRenderSink::new();

    assert_eq!(
        editor.read_line(&mut sink)?,
        LineOutcome::Complete("one".to_string())
    );
    assert_eq!(
        editor.read_line(&mut sink)?,
        LineOutcome::Complete("one".to_string())
    );
    Ok(())
}
