use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use ai_llm_service::AiLlmError;
use docstring_engine::{
    ast::{FunctionFilter, parse_file},
    commit::commit,
    model::{DocumentationBlock, Language, Style},
    orchestrator::{AcceptAll, ApprovalOracle, Decision, Engine, RunOptions, Stage},
    registry::Toolchain,
    summary::{CompletionBackend, Summarizer, default_summary},
};

/// Answers with a fixed summary, except for functions whose qualified name
/// is listed in `broken`, which get prose without JSON.
struct StubBackend {
    broken: Vec<&'static str>,
}

impl CompletionBackend for StubBackend {
    async fn complete(&self, prompt: &str, _system: Option<&str>) -> Result<String, AiLlmError> {
        if self
            .broken
            .iter()
            .any(|b| prompt.contains(&format!("Qualified Name: {b}\n")))
        {
            return Ok("Sorry, I cannot document this function.".into());
        }
        Ok(r#"Sure. {"summary": "Does the thing.", "parameters": [], "return_description": "A value."}"#.into())
    }
}

/// Like [`StubBackend`], but overwrites `path` with `replacement` while
/// summarizing `trigger`.
struct RewritingBackend {
    trigger: &'static str,
    path: PathBuf,
    replacement: &'static str,
}

impl CompletionBackend for RewritingBackend {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        if prompt.contains(&format!("Qualified Name: {}\n", self.trigger)) {
            fs::write(&self.path, self.replacement).unwrap();
        }
        StubBackend { broken: vec![] }.complete(prompt, system).await
    }
}

/// Accepts everything, emptying `victim` while its first block is on screen.
struct Truncating {
    victim: PathBuf,
}

impl ApprovalOracle for Truncating {
    fn review(&mut self, block: &DocumentationBlock) -> Decision {
        if block.path == self.victim {
            fs::write(&self.victim, "").unwrap();
        }
        Decision::Accept
    }
}

/// Replays decisions in order and remembers what it was shown.
struct Scripted {
    decisions: VecDeque<Decision>,
    seen: Vec<Vec<String>>,
}

impl Scripted {
    fn new(decisions: Vec<Decision>) -> Self {
        Self {
            decisions: decisions.into(),
            seen: Vec::new(),
        }
    }
}

impl ApprovalOracle for Scripted {
    fn review(&mut self, block: &DocumentationBlock) -> Decision {
        self.seen.push(block.lines.clone());
        self.decisions.pop_front().unwrap_or(Decision::Quit)
    }
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, content).unwrap();
    p
}

fn python() -> Toolchain {
    Toolchain::resolve(Language::Python, Style::Pep).unwrap()
}

fn forced() -> RunOptions {
    RunOptions {
        force_all: true,
        ..RunOptions::default()
    }
}

#[tokio::test]
async fn placeholder_scenario_grows_file_from_3_to_13_lines() {
    let dir = tempfile::tempdir().unwrap();
    let p = write(
        dir.path(),
        "mod.py",
        "# leading comment\ndef add(a, b):\n    return a + b\n",
    );

    let mut engine = Engine::<StubBackend, _>::new(python(), None, AcceptAll, forced());
    let report = engine.run(&[p.clone()], &FunctionFilter::match_all()).await;

    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(report.blocks_committed, 1);

    let out = fs::read_to_string(&p).unwrap();
    assert_eq!(out.lines().count(), 13);
    assert_eq!(
        out,
        "# leading comment\n\
         def add(a, b):\n    \
         \"\"\"\n    \
         _summary_\n\
         \n    \
         Args:\n    \
         \x20   a (any): _description_\n    \
         \x20   b (any): _description_\n\
         \n    \
         Returns:\n    \
         \x20   _returns_\n    \
         \"\"\"\n    \
         return a + b\n"
    );
    assert!(out.lines().all(|l| l == l.trim_end()));
}

#[test]
fn round_trip_keeps_signatures_at_predictable_lines() {
    let dir = tempfile::tempdir().unwrap();
    let p = write(
        dir.path(),
        "shop.py",
        "\
import os

# cart helpers
class Cart:
    def add(self, item, qty: int = 1):
        def clamp(v):
            return max(v, 0)
        return clamp(qty)

    def total(self):
        return 0


def checkout(cart, *, dry_run=False):
    return cart.total()
",
    );

    let tc = python();
    let all = FunctionFilter::match_all();
    let before = parse_file(tc.parser.as_ref(), &p, &all).unwrap();
    assert_eq!(before.len(), 4);

    let blocks: Vec<DocumentationBlock> = before
        .iter()
        .map(|d| tc.formatter.format(d, &default_summary(d), &p).unwrap())
        .collect();
    let original_len = fs::read_to_string(&p).unwrap().lines().count();
    let added = commit(&p, &blocks).unwrap();
    let total: usize = blocks.iter().map(|b| b.lines.len()).sum();
    assert_eq!(added, total);
    assert_eq!(
        fs::read_to_string(&p).unwrap().lines().count(),
        original_len + total
    );

    let after = parse_file(tc.parser.as_ref(), &p, &all).unwrap();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(&after) {
        let shift: usize = blocks
            .iter()
            .filter(|b| b.target_line < old.start_line)
            .map(|b| b.lines.len())
            .sum();
        assert_eq!(new.signature, old.signature);
        assert_eq!(new.qualified_name, old.qualified_name);
        assert_eq!(new.start_line, old.start_line + shift, "{}", old.qualified_name);
        assert!(new.is_documented());
    }
}

#[tokio::test]
async fn quit_stops_the_run_without_rollback() {
    let dir = tempfile::tempdir().unwrap();
    let a_src = "def a():\n    return 1\n";
    let b_src = "def b1():\n    pass\n\ndef b2():\n    pass\n";
    let c_src = "def c():\n    pass\n";
    let a = write(dir.path(), "a.py", a_src);
    let b = write(dir.path(), "b.py", b_src);
    let c = write(dir.path(), "c.py", c_src);

    let oracle = Scripted::new(vec![Decision::Accept, Decision::Accept, Decision::Quit]);
    let mut engine = Engine::<StubBackend, _>::new(python(), None, oracle, RunOptions::default());
    let report = engine
        .run(&[a.clone(), b.clone(), c.clone()], &FunctionFilter::match_all())
        .await;

    assert!(report.quit);
    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.blocks_committed, 1);
    assert_ne!(fs::read_to_string(&a).unwrap(), a_src);
    assert_eq!(fs::read_to_string(&b).unwrap(), b_src);
    assert_eq!(fs::read_to_string(&c).unwrap(), c_src);
}

#[tokio::test]
async fn edit_replaces_lines_and_re_presents() {
    let dir = tempfile::tempdir().unwrap();
    let p = write(dir.path(), "m.py", "def f(x):\n    return x\n");

    let oracle = Scripted::new(vec![
        Decision::Edit(vec!["\"\"\"Identity.\"\"\"".to_string()]),
        Decision::Accept,
    ]);
    let mut engine = Engine::<StubBackend, _>::new(python(), None, oracle, RunOptions::default());
    let report = engine.run(&[p.clone()], &FunctionFilter::match_all()).await;

    assert!(report.is_success());
    assert_eq!(engine.oracle().seen.len(), 2);
    assert_eq!(engine.oracle().seen[1], vec!["\"\"\"Identity.\"\"\"\n"]);
    assert_eq!(
        fs::read_to_string(&p).unwrap(),
        "def f(x):\n    \"\"\"Identity.\"\"\"\n    return x\n"
    );
}

#[tokio::test]
async fn failures_are_isolated_per_function_and_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(
        dir.path(),
        "m.py",
        "def ok():\n    return 1\n\ndef bad():\n    return 2\n\ndef fine():\n    return 3\n",
    );
    let broken = write(dir.path(), "broken.py", "def nope(:\n    pass\n");
    let empty = write(dir.path(), "consts.py", "LIMIT = 3\n");

    let summarizer = Summarizer::new(
        Arc::new(StubBackend {
            broken: vec!["m.bad"],
        }),
        Language::Python,
    );
    let mut engine = Engine::new(python(), Some(summarizer), AcceptAll, forced());
    let report = engine
        .run(&[broken.clone(), empty, good.clone()], &FunctionFilter::match_all())
        .await;

    assert_eq!(report.failures.len(), 2, "{:?}", report.failures);
    assert_eq!(report.failures[0].stage, Stage::Parse);
    assert_eq!(report.failures[0].path, broken);
    assert_eq!(report.failures[1].stage, Stage::Generate);
    assert_eq!(report.failures[1].qualified_name.as_deref(), Some("m.bad"));
    assert_eq!(report.blocks_committed, 2);
    assert_eq!(report.exit_code(), 1);

    let out = fs::read_to_string(&good).unwrap();
    assert_eq!(out.matches("Does the thing.").count(), 2);
    assert!(out.contains("def bad():\n    return 2\n"));
}

#[tokio::test]
async fn check_mode_lists_undocumented_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let src = "def done():\n    \"\"\"Has docs.\"\"\"\n\ndef todo():\n    pass\n";
    let p = write(dir.path(), "m.py", src);

    let opts = RunOptions {
        check: true,
        ..RunOptions::default()
    };
    let mut engine = Engine::<StubBackend, _>::new(python(), None, AcceptAll, opts);
    let report = engine.run(&[p.clone()], &FunctionFilter::match_all()).await;

    assert_eq!(report.undocumented.len(), 1);
    assert_eq!(report.undocumented[0].qualified_name, "m.todo");
    assert_eq!(report.undocumented[0].line, 4);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(fs::read_to_string(&p).unwrap(), src);
}

#[tokio::test]
async fn csharp_xml_blocks_land_above_declarations() {
    let dir = tempfile::tempdir().unwrap();
    let p = write(
        dir.path(),
        "Calc.cs",
        "namespace Demo\n{\n    public class Calc\n    {\n        public int Add(int a, int b)\n        {\n            return a + b;\n        }\n\n        /// <summary>Done.</summary>\n        public void Reset()\n        {\n        }\n    }\n}\n",
    );

    let opts = RunOptions {
        force_all: true,
        skip_existing: true,
        ..RunOptions::default()
    };
    let tc = Toolchain::resolve(Language::CSharp, Style::Xml).unwrap();
    let mut engine = Engine::<StubBackend, _>::new(tc, None, AcceptAll, opts);
    let report = engine.run(&[p.clone()], &FunctionFilter::match_all()).await;

    assert!(report.is_success());
    assert_eq!(report.blocks_committed, 1);
    let out = fs::read_to_string(&p).unwrap();
    assert!(out.contains(
        "    {\n        /// <summary>\n        /// _summary_\n        /// </summary>\n        /// <param name=\"a\">_description_</param>\n        /// <param name=\"b\">_description_</param>\n        /// <returns>_returns_</returns>\n        public int Add(int a, int b)\n"
    ));
    assert_eq!(out.matches("<summary>").count(), 2);
}

#[tokio::test]
async fn commit_failure_leaves_later_files_alone() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.py", "def a():\n    return 1\n");
    let b = write(dir.path(), "b.py", "def b():\n    return 2\n");

    let oracle = Truncating { victim: a.clone() };
    let mut engine = Engine::<StubBackend, _>::new(python(), None, oracle, RunOptions::default());
    let report = engine.run(&[a.clone(), b.clone()], &FunctionFilter::match_all()).await;

    assert_eq!(report.failures.len(), 1, "{:?}", report.failures);
    assert_eq!(report.failures[0].stage, Stage::Commit);
    assert_eq!(report.failures[0].path, a);
    assert!(report.failures[0].message.contains("past the end"));
    assert_eq!(fs::read_to_string(&a).unwrap(), "");

    assert_eq!(report.files_modified, 1);
    assert_eq!(report.blocks_committed, 1);
    assert!(fs::read_to_string(&b).unwrap().contains("_summary_"));
}

#[tokio::test]
async fn format_failure_skips_only_that_function() {
    let dir = tempfile::tempdir().unwrap();
    let p = write(
        dir.path(),
        "m.py",
        "def f():\n    return 1\n\ndef g():\n    return 2\n",
    );

    // `g` is generated after the file lost its second function.
    let backend = RewritingBackend {
        trigger: "m.g",
        path: p.clone(),
        replacement: "def f():\n    return 1\n",
    };
    let summarizer = Summarizer::new(Arc::new(backend), Language::Python);
    let mut engine = Engine::new(python(), Some(summarizer), AcceptAll, forced());
    let report = engine.run(&[p.clone()], &FunctionFilter::match_all()).await;

    assert_eq!(report.failures.len(), 1, "{:?}", report.failures);
    assert_eq!(report.failures[0].stage, Stage::Format);
    assert_eq!(report.failures[0].qualified_name.as_deref(), Some("m.g"));
    assert!(report.failures[0].message.contains("m.py:4"));
    assert_eq!(report.blocks_committed, 1);

    let out = fs::read_to_string(&p).unwrap();
    assert!(out.starts_with("def f():\n    \"\"\"\n    Does the thing.\n"));
    assert!(out.ends_with("    return 1\n"));
    assert_eq!(out.matches("Does the thing.").count(), 1);
}

#[tokio::test]
async fn one_line_function_is_reported_and_siblings_committed() {
    let dir = tempfile::tempdir().unwrap();
    let p = write(
        dir.path(),
        "inline.py",
        "def f(): return 1\n\ndef g(x):\n    return x\n",
    );

    let mut engine = Engine::<StubBackend, _>::new(python(), None, AcceptAll, forced());
    let report = engine.run(&[p.clone()], &FunctionFilter::match_all()).await;

    assert_eq!(report.failures.len(), 1, "{:?}", report.failures);
    assert_eq!(report.failures[0].stage, Stage::Format);
    assert_eq!(report.failures[0].qualified_name.as_deref(), Some("inline.f"));
    assert_eq!(report.blocks_committed, 1);

    let out = fs::read_to_string(&p).unwrap();
    assert!(out.starts_with("def f(): return 1\n\ndef g(x):\n    \"\"\"\n"));
}
